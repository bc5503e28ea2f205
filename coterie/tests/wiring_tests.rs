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

//! Tests of the bus wiring between free-running agents: ordering, fan-out,
//! and resilience when a destination goes away.

use std::time::Duration;

use coterie::prelude::*;

use crate::setup::{
    initialize_tracing,
    probes::{wait_for_messages, RecordingHandler, ScriptedEmitter},
};

mod setup;

const FAST_TICK: Duration = Duration::from_millis(5);

/// Messages sent by one agent arrive at a wired peer exactly once and in
/// send order.
#[tokio::test]
async fn wired_messages_arrive_once_and_in_order() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let mut emitter = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("emitter")?.with_tick_interval(FAST_TICK),
    );
    emitter.register_behavior(ScriptedEmitter::numbered_greetings(10));

    let (recorder, seen) = RecordingHandler::all();
    let mut observer = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("observer")?.with_tick_interval(FAST_TICK),
    );
    observer.register_handler(recorder);

    runtime.connect(emitter.handle(), observer.handle());

    let emitter_handle = emitter.start().await;
    let observer_handle = observer.start().await;

    let arrived = wait_for_messages(&seen, 10, 500).await;
    assert_eq!(arrived, 10, "all ten greetings must arrive");

    let texts: Vec<String> = seen
        .lock()
        .unwrap()
        .iter()
        .filter_map(|message| match message.payload() {
            Payload::Greeting { text } => Some(text.clone()),
            _ => None,
        })
        .collect();
    let expected: Vec<String> = (0..10).map(|n| format!("greeting-{n}")).collect();
    assert_eq!(texts, expected, "arrival order must match send order");

    emitter_handle.stop().await?;
    observer_handle.stop().await?;
    runtime.shutdown_all().await?;
    Ok(())
}

/// With several destinations wired to one source, every destination receives
/// every message.
#[tokio::test]
async fn fan_out_reaches_every_destination() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let mut emitter = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("emitter")?.with_tick_interval(FAST_TICK),
    );
    emitter.register_behavior(ScriptedEmitter::numbered_greetings(5));

    let (first_recorder, first_seen) = RecordingHandler::all();
    let mut first = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("first")?.with_tick_interval(FAST_TICK),
    );
    first.register_handler(first_recorder);

    let (second_recorder, second_seen) = RecordingHandler::all();
    let mut second = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("second")?.with_tick_interval(FAST_TICK),
    );
    second.register_handler(second_recorder);

    runtime.connect(emitter.handle(), first.handle());
    runtime.connect(emitter.handle(), second.handle());

    emitter.start().await;
    first.start().await;
    second.start().await;

    assert_eq!(wait_for_messages(&first_seen, 5, 500).await, 5);
    assert_eq!(wait_for_messages(&second_seen, 5, 500).await, 5);

    runtime.shutdown_all().await?;
    Ok(())
}

/// A stopped destination does not break delivery to the remaining wired
/// peers.
#[tokio::test]
async fn stopped_destination_does_not_block_its_siblings() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let (doomed_recorder, _doomed_seen) = RecordingHandler::all();
    let mut doomed = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("doomed")?.with_tick_interval(FAST_TICK),
    );
    doomed.register_handler(doomed_recorder);

    let (survivor_recorder, survivor_seen) = RecordingHandler::all();
    let mut survivor = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("survivor")?.with_tick_interval(FAST_TICK),
    );
    survivor.register_handler(survivor_recorder);

    let mut emitter = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("emitter")?.with_tick_interval(FAST_TICK),
    );
    emitter.register_behavior(ScriptedEmitter::numbered_greetings(5));

    runtime.connect(emitter.handle(), doomed.handle());
    runtime.connect(emitter.handle(), survivor.handle());

    let doomed_handle = doomed.start().await;
    survivor.start().await;

    // The destination disappears before the source ever sends.
    doomed_handle.stop().await?;

    emitter.start().await;

    assert_eq!(
        wait_for_messages(&survivor_seen, 5, 500).await,
        5,
        "the live peer still gets everything"
    );

    runtime.shutdown_all().await?;
    Ok(())
}

/// Wiring the same edge twice is rejected, so a message cannot arrive twice
/// over a duplicated connection.
#[tokio::test]
async fn duplicate_wiring_does_not_duplicate_delivery() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let mut emitter = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("emitter")?.with_tick_interval(FAST_TICK),
    );
    emitter.register_behavior(ScriptedEmitter::numbered_greetings(3));

    let (recorder, seen) = RecordingHandler::all();
    let mut observer = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("observer")?.with_tick_interval(FAST_TICK),
    );
    observer.register_handler(recorder);

    runtime.connect(emitter.handle(), observer.handle());
    // Second identical edge is a no-op.
    runtime.connect(emitter.handle(), observer.handle());

    emitter.start().await;
    observer.start().await;

    assert_eq!(wait_for_messages(&seen, 3, 500).await, 3);
    // Allow any stray duplicates time to surface.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(seen.lock().unwrap().len(), 3);

    runtime.shutdown_all().await?;
    Ok(())
}

/// A stopped agent processes nothing further: direct delivery into its inbox
/// fails instead of queueing work nobody will ever run.
#[tokio::test]
async fn delivery_to_a_stopped_agent_errors() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let agent = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("shortlived")?.with_tick_interval(FAST_TICK),
    );
    let handle = agent.start().await;
    handle.stop().await?;

    let result = handle
        .deliver(Message::new(
            Ern::with_root("peer")?,
            Payload::Greeting {
                text: "anyone home?".to_string(),
            },
        ))
        .await;
    assert!(matches!(result, Err(DeliveryError::InboxClosed { .. })));

    runtime.shutdown_all().await?;
    Ok(())
}

/// Stopping an agent twice is an error; stopping the whole runtime after an
/// individual stop is not.
#[tokio::test]
async fn double_stop_errors_but_shutdown_stays_graceful() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = CoterieApp::launch_with_config(CoterieConfig::default());

    let agent = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("loner")?.with_tick_interval(FAST_TICK),
    );
    let handle = agent.start().await;
    assert_eq!(runtime.agent_count(), 1);

    handle.stop().await?;
    assert!(handle.stop().await.is_err(), "second stop must fail");

    // The runtime shutdown simply awaits the already-stopped agent.
    runtime.shutdown_all().await?;
    Ok(())
}
