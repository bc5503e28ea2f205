/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

#![allow(dead_code)]

//! Tests of proactive behaviors under a paused clock: cadence windows, the
//! immediate first fire, failure handling, and same-cycle ordering.

use std::sync::Arc;
use std::time::Duration;

use coterie::prelude::*;

use crate::setup::{
    initialize_tracing,
    probes::{ScriptedWordSource, StalledBalanceSource},
};

mod setup;

/// A fresh cadence fires on the very first cycle, then stays quiet until its
/// period has elapsed.
#[tokio::test(start_paused = true)]
async fn word_drop_fires_immediately_then_respects_its_period() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let words = Arc::new(ScriptedWordSource::new(&["red", "fox"]));
    let mut agent = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("chatty")?
            .with_capabilities(Capabilities::default().with_words(words)),
    );
    agent.register_behavior(WordDropBehavior::with_period(Duration::from_secs(2)));
    let mut running = agent.into_running();
    let mut outbox = running.take_outbox().expect("outbox receiver");

    running.run_cycle().await;
    let first = outbox.try_recv().expect("immediate first drop");
    assert_eq!(
        first.payload(),
        &Payload::RandomWords {
            words: vec!["red".to_string(), "fox".to_string()],
        }
    );

    // Still within the period: nothing new.
    running.run_cycle().await;
    assert!(outbox.try_recv().is_err());

    tokio::time::advance(Duration::from_millis(1_999)).await;
    running.run_cycle().await;
    assert!(outbox.try_recv().is_err());

    tokio::time::advance(Duration::from_millis(1)).await;
    running.run_cycle().await;
    assert!(outbox.try_recv().is_ok());
    Ok(())
}

/// The balance probe records what it saw in the model and broadcasts the same
/// amount.
#[tokio::test(start_paused = true)]
async fn balance_probe_updates_model_and_reports() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let account = Address::from("0xtrader");
    let token = Address::from("0xtoken");
    let ledger = Arc::new(InMemoryLedger::new(account.clone()));
    ledger.credit(&account, &token, 42);

    let mut agent = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("trader")?
            .with_capabilities(Capabilities::default().with_balance(ledger)),
    );
    agent.register_behavior(BalanceProbeBehavior::new(account.clone(), token.clone()));
    let mut running = agent.into_running();
    let mut outbox = running.take_outbox().expect("outbox receiver");

    running.run_cycle().await;

    let report = outbox.try_recv().expect("a balance report");
    assert_eq!(
        report.payload(),
        &Payload::BalanceReport {
            owner: account,
            token,
            amount: 42,
        }
    );
    assert_eq!(running.model.last_known_balance, Some(42));
    Ok(())
}

/// A failing behavior is skipped for the cycle; the rest of the cycle (and
/// the agent's handlers) carry on.
#[tokio::test(start_paused = true)]
async fn failing_behavior_is_skipped_without_harming_the_cycle() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());
    let peer = Ern::with_root("peer")?;

    // The default word-source capability yields no words, so the drop fails.
    let mut agent =
        runtime.new_agent_with_config::<TraderState>(AgentConfig::with_name("chatty")?);
    agent.register_behavior(WordDropBehavior::new());
    agent.register_handler(GreetingHandler::new());
    let mut running = agent.into_running();
    let mut outbox = running.take_outbox().expect("outbox receiver");

    running
        .handle()
        .deliver(Message::new(
            peer,
            Payload::Greeting {
                text: "hi".to_string(),
            },
        ))
        .await?;
    running.run_cycle().await;

    // Only the acknowledgement came out; no words were dropped.
    let only = outbox.try_recv().expect("the acknowledgement");
    assert!(matches!(only.payload(), Payload::GreetingAck { .. }));
    assert!(outbox.try_recv().is_err());
    Ok(())
}

/// The capability timeout from the runtime configuration bounds a stalled
/// collaborator call: the probe's cycle fails instead of hanging, and the
/// agent stays responsive.
#[tokio::test(start_paused = true)]
async fn configured_timeout_bounds_a_stalled_capability_call() -> anyhow::Result<()> {
    initialize_tracing();
    let mut config = CoterieConfig::default();
    config.timing.capability_timeout_ms = 50;
    let runtime = CoterieApp::launch_with_config(config);
    let peer = Ern::with_root("peer")?;

    let account = Address::from("0xtrader");
    let token = Address::from("0xtoken");
    let mut agent = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("trader")?
            .with_capabilities(Capabilities::default().with_balance(Arc::new(StalledBalanceSource))),
    );
    agent.register_behavior(
        BalanceProbeBehavior::new(account, token)
            .with_call_timeout(runtime.config().timing.capability_timeout()),
    );
    agent.register_handler(GreetingHandler::new());
    let mut running = agent.into_running();
    let mut outbox = running.take_outbox().expect("outbox receiver");

    // The stalled query is abandoned after the configured 50ms, not after the
    // hour the collaborator would take.
    running.run_cycle().await;
    assert!(outbox.try_recv().is_err(), "no report from a timed-out probe");
    assert_eq!(running.model.last_known_balance, None);

    // The agent is not wedged: reactive work still runs.
    running
        .handle()
        .deliver(Message::new(
            peer,
            Payload::Greeting {
                text: "still there?".to_string(),
            },
        ))
        .await?;
    running.run_cycle().await;
    let reply = outbox.try_recv().expect("the acknowledgement");
    assert!(matches!(reply.payload(), Payload::GreetingAck { .. }));
    Ok(())
}

/// Behaviors due in the same cycle run in registration order, so the flush
/// order is deterministic.
#[tokio::test(start_paused = true)]
async fn same_cycle_behaviors_run_in_registration_order() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let account = Address::from("0xtrader");
    let token = Address::from("0xtoken");
    let ledger = Arc::new(InMemoryLedger::new(account.clone()));
    ledger.credit(&account, &token, 7);
    let words = Arc::new(ScriptedWordSource::new(&["sun", "moon"]));

    let mut agent = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("both")?.with_capabilities(
            Capabilities::default()
                .with_balance(ledger)
                .with_words(words),
        ),
    );
    agent
        .register_behavior(WordDropBehavior::new())
        .register_behavior(BalanceProbeBehavior::new(account, token));
    let mut running = agent.into_running();
    let mut outbox = running.take_outbox().expect("outbox receiver");

    running.run_cycle().await;

    let first = outbox.try_recv().expect("words first");
    assert!(matches!(first.payload(), Payload::RandomWords { .. }));
    let second = outbox.try_recv().expect("report second");
    assert!(matches!(second.payload(), Payload::BalanceReport { .. }));
    assert!(outbox.try_recv().is_err());
    Ok(())
}
