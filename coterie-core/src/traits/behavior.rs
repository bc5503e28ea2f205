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

use async_trait::async_trait;
use tokio::time::Instant;

use crate::common::AgentContext;
use crate::message::Message;

/// A unit of proactive work executed by an agent on its own schedule.
///
/// Behaviors are registered while the agent is idle and live for the agent's
/// whole lifetime. Every cycle the scheduling loop evaluates [`is_due`] for
/// each registered behavior against a single `now` and runs the due ones in
/// registration order.
///
/// `is_due` must be a side-effect-free function of elapsed time or behavior
/// state. `act` may have side effects, including calls to external
/// collaborators through the agent's capabilities; it returns the messages to
/// enqueue on the agent's outbox. An `Err` from `act` is logged by the loop
/// and the behavior is simply retried whenever its readiness condition next
/// holds — an error never crashes the agent.
///
/// Timekeeping uses [`tokio::time::Instant`] so tests running under a paused
/// clock can advance time deterministically.
///
/// [`is_due`]: Behavior::is_due
#[async_trait]
pub trait Behavior<State>: Send
where
    State: Send,
{
    /// A short stable name for this behavior, used in log context.
    fn name(&self) -> &str;

    /// Returns `true` when the behavior should run this cycle.
    ///
    /// Must be free of side effects; the loop may call it any number of times.
    fn is_due(&self, now: Instant) -> bool;

    /// Executes the behavior, returning zero or more messages to send.
    ///
    /// Implementations that schedule themselves with a [`Cadence`] should call
    /// [`Cadence::mark_fired`] on entry so a failed action is retried on its
    /// natural period rather than every cycle.
    async fn act(&mut self, context: &mut AgentContext<'_, State>)
        -> anyhow::Result<Vec<Message>>;
}

/// An elapsed-time readiness predicate with the mutable last-fired bookkeeping
/// most periodic behaviors need.
///
/// A fresh `Cadence` is immediately due, so the first fire happens on the
/// first cycle after registration; afterwards it is due again once `period`
/// has elapsed since the last [`mark_fired`](Cadence::mark_fired).
#[derive(Debug, Clone)]
pub struct Cadence {
    period: Duration,
    last_fired: Option<Instant>,
}

impl Cadence {
    /// Creates a cadence that is due every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_fired: None,
        }
    }

    /// Returns the configured period.
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` if the cadence has never fired or `period` has elapsed
    /// since the last fire.
    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.duration_since(last) >= self.period,
        }
    }

    /// Records a fire at `now`, pushing the next due point one period out.
    #[inline]
    pub fn mark_fired(&mut self, now: Instant) {
        self.last_fired = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fresh_cadence_is_due_once_then_waits_a_period() {
        let mut cadence = Cadence::new(Duration::from_secs(2));
        let start = Instant::now();
        assert!(cadence.is_due(start));

        cadence.mark_fired(start);
        assert!(!cadence.is_due(start));

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(!cadence.is_due(Instant::now()));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(cadence.is_due(Instant::now()));
    }
}
