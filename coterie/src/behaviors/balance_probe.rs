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
use coterie_core::prelude::{Address, AgentContext, Behavior, Cadence, Message, Payload};
use tokio::time::Instant;
use tracing::info;

use crate::model::TraderState;

const DEFAULT_PERIOD: Duration = Duration::from_secs(10);
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Periodically queries a token balance through the agent's balance capability
/// and broadcasts the observation as a [`Payload::BalanceReport`].
///
/// Each successful probe also records the observed amount in the agent's
/// model, where the transfer handler consults it before spending. A failed
/// probe is logged by the scheduling loop and retried on the next period; the
/// previously recorded balance stays in place.
#[derive(Debug)]
pub struct BalanceProbeBehavior {
    cadence: Cadence,
    owner: Address,
    token: Address,
    call_timeout: Duration,
}

impl BalanceProbeBehavior {
    /// Creates a probe of `owner`'s balance for `token` on the default
    /// ten-second period.
    pub fn new(owner: Address, token: Address) -> Self {
        Self::with_period(owner, token, DEFAULT_PERIOD)
    }

    /// Creates a probe on a custom period.
    pub fn with_period(owner: Address, token: Address, period: Duration) -> Self {
        Self {
            cadence: Cadence::new(period),
            owner,
            token,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Bounds how long one balance query may take; a timed-out query counts
    /// as a failed cycle.
    #[must_use]
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}

#[async_trait]
impl Behavior<TraderState> for BalanceProbeBehavior {
    fn name(&self) -> &str {
        "balance-probe"
    }

    fn is_due(&self, now: Instant) -> bool {
        self.cadence.is_due(now)
    }

    async fn act(
        &mut self,
        context: &mut AgentContext<'_, TraderState>,
    ) -> anyhow::Result<Vec<Message>> {
        // Marked first so a failure retries on the period, not every cycle.
        self.cadence.mark_fired(Instant::now());

        let amount = tokio::time::timeout(
            self.call_timeout,
            context.capabilities().balance().balance(&self.owner, &self.token),
        )
        .await
        .context("balance query timed out")??;
        context.model.last_known_balance = Some(amount);
        info!(
            agent = %context.id(),
            owner = %self.owner,
            token = %self.token,
            amount,
            "Balance observed"
        );

        Ok(vec![context.message(Payload::BalanceReport {
            owner: self.owner.clone(),
            token: self.token.clone(),
            amount,
        })])
    }
}
