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

//! A small two-agent society: `chatty` drops random words every couple of
//! seconds and `trader` watches a token balance, acknowledges the chatter, and
//! executes transfer requests against an in-process ledger. Runs until Ctrl-C.

use std::sync::Arc;

use coterie::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = CoterieApp::launch();
    let call_timeout = runtime.config().timing.capability_timeout();

    let trader_account = Address::from("0xtrader");
    let counterparty = Address::from("0xcounterparty");
    let token = Address::from("0xdemotoken");

    let ledger = Arc::new(InMemoryLedger::new(trader_account.clone()));
    ledger.credit(&trader_account, &token, 1_000);
    let lexicon = Arc::new(Lexicon::default());

    let mut chatty = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("chatty")?
            .with_capabilities(Capabilities::default().with_words(lexicon)),
    );
    chatty.register_behavior(WordDropBehavior::new());
    chatty.register_handler(GreetingHandler::new());

    let mut trader = runtime.new_agent_with_config::<TraderState>(
        AgentConfig::with_name("trader")?.with_capabilities(
            Capabilities::default()
                .with_balance(ledger.clone())
                .with_transfer(ledger),
        ),
    );
    trader.register_behavior(
        BalanceProbeBehavior::new(trader_account.clone(), token.clone())
            .with_call_timeout(call_timeout),
    );
    trader.register_handler(GreetingHandler::new());
    trader
        .register_handler(TransferRequestHandler::new(trader_account).with_call_timeout(call_timeout));

    // Wire before starting so the very first word drop already has a route.
    runtime.connect(chatty.handle(), trader.handle());
    runtime.connect(trader.handle(), chatty.handle());

    let chatty_handle = chatty.start().await;
    let trader_handle = trader.start().await;

    // One externally injected trade to get the ledger moving.
    trader_handle
        .deliver(Message::new(
            chatty_handle.id(),
            Payload::TransferRequest {
                to: counterparty,
                token,
                amount: 250,
            },
        ))
        .await?;

    info!("Agents running; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    info!("Stopping");
    runtime.shutdown_all().await?;
    Ok(())
}
