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

use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use coterie_core::prelude::{
    Address, AgentContext, Message, MessageHandler, Payload, PayloadKind,
};
use tracing::{info, warn};

use crate::model::TraderState;

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Executes inbound [`Payload::TransferRequest`] messages against the agent's
/// transfer capability.
///
/// Before spending, the handler re-checks the owner's live balance through the
/// balance capability. An insufficient balance is an explicit no-op: logged,
/// no transfer submitted, no reply sent, and never an error — a poor agent is
/// not a broken agent. A sufficient balance produces a
/// [`Payload::TransferReceipt`] reply.
#[derive(Debug)]
pub struct TransferRequestHandler {
    owner: Address,
    call_timeout: Duration,
}

impl TransferRequestHandler {
    /// Creates a handler that spends from `owner`'s account.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Bounds how long each chain call may take; a timed-out call fails the
    /// handling attempt.
    #[must_use]
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}

#[async_trait]
impl MessageHandler<TraderState> for TransferRequestHandler {
    fn name(&self) -> &str {
        "transfer-request"
    }

    fn matches(&self, message: &Message) -> bool {
        message.payload().kind() == PayloadKind::TransferRequest
    }

    async fn handle(
        &mut self,
        message: &Message,
        context: &mut AgentContext<'_, TraderState>,
    ) -> anyhow::Result<Vec<Message>> {
        let Payload::TransferRequest { to, token, amount } = message.payload() else {
            return Ok(Vec::new());
        };

        let balance = tokio::time::timeout(
            self.call_timeout,
            context.capabilities().balance().balance(&self.owner, token),
        )
        .await
        .context("balance check timed out")??;
        context.model.last_known_balance = Some(balance);
        if balance < *amount {
            warn!(
                agent = %context.id(),
                owner = %self.owner,
                token = %token,
                balance,
                requested = amount,
                "Insufficient balance, transfer skipped"
            );
            return Ok(Vec::new());
        }

        let receipt = tokio::time::timeout(
            self.call_timeout,
            context.capabilities().transfer().transfer(to, token, *amount),
        )
        .await
        .context("transfer submission timed out")??;
        context.model.transfers_submitted += 1;
        info!(
            agent = %context.id(),
            tx = %receipt.tx,
            to = %to,
            amount,
            "Transfer submitted"
        );
        Ok(vec![context.message(Payload::TransferReceipt(receipt))])
    }
}
