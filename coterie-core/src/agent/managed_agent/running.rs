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

use std::fmt::Debug;

use tokio::time::Instant;
use tracing::{error, instrument, trace, warn};

use crate::agent::ManagedAgent;
use crate::common::{AgentContext, OutboxReceiver};
use crate::message::Message;

/// Type-state marker for a [`ManagedAgent`] whose scheduling loop is active.
///
/// A running agent repeats one cycle: drain a bounded slice of the inbox,
/// dispatch each drained message to all matching handlers, run due behaviors,
/// flush everything produced to the outbox, then wait one tick. "Stopping"
/// is the agent's cancellation token being cancelled (the current cycle
/// completes, then the loop exits); "stopped" is the loop task having
/// finished. Messages still queued in the inbox at that point are never
/// dispatched: they are dropped with the agent, and later deliveries fail
/// with [`DeliveryError::InboxClosed`](crate::message::DeliveryError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Running;

impl<State: Default + Send + Debug + 'static> ManagedAgent<Running, State> {
    /// Takes the receiver half of this agent's outbox.
    ///
    /// Only meaningful for agents brought up with
    /// [`into_running`](ManagedAgent::into_running): started agents have
    /// already surrendered the receiver to the bus. Returns `None` on the
    /// second call.
    pub fn take_outbox(&mut self) -> Option<OutboxReceiver> {
        self.outbox_receiver.take()
    }

    /// The agent's continuous scheduling loop.
    ///
    /// Cycles until the stop signal arrives. The tick sleep between cycles is
    /// the loop's sole suspension point and is interrupted promptly by the
    /// stop signal, so shutdown never waits out a full tick.
    #[instrument(skip(self), fields(agent = %self.id))]
    pub(crate) async fn run(&mut self) {
        trace!(
            behaviors = self.behaviors.len(),
            handlers = self.handlers.len(),
            "Agent loop starting"
        );
        loop {
            self.run_cycle().await;

            // A stop requested mid-cycle lets the cycle above finish first.
            if self.cancellation_token.is_cancelled() {
                break;
            }
            tokio::select! {
                () = self.cancellation_token.cancelled() => break,
                () = tokio::time::sleep(self.tick_interval) => {}
            }
        }
        if !self.pending.is_empty() {
            warn!(
                unflushed = self.pending.len(),
                "Agent stopped with unflushed outbound messages"
            );
        }
        trace!("Agent loop finished");
    }

    /// Executes exactly one scheduling cycle: drain, dispatch, behave, flush.
    ///
    /// Public so tests and deterministic drivers can single-step an agent
    /// instead of racing its free-running loop. Messages still queued in the
    /// inbox beyond the per-cycle drain bound stay queued for the next cycle.
    pub async fn run_cycle(&mut self) {
        self.drain_and_dispatch().await;
        self.run_due_behaviors().await;
        self.flush_outbound().await;
    }

    /// Drains up to `max_messages_per_cycle` inbound messages and dispatches
    /// each to every matching handler, in registration order.
    async fn drain_and_dispatch(&mut self) {
        let mut drained = 0;
        while drained < self.max_messages_per_cycle {
            let Ok(message) = self.inbox.try_recv() else {
                break;
            };
            drained += 1;
            self.dispatch(message).await;
        }
        if drained > 0 {
            trace!(agent = %self.id, drained, "Inbox slice dispatched");
        }
    }

    /// Runs all matching handlers for one message.
    ///
    /// A handler error is logged and does not prevent the remaining handlers
    /// from running; the message counts as processed either way, so it is
    /// handled at most once.
    async fn dispatch(&mut self, message: Message) {
        let ManagedAgent {
            handlers,
            model,
            capabilities,
            id,
            pending,
            ..
        } = self;
        let mut context = AgentContext::new(id, model, capabilities);
        let mut matched = false;
        for handler in handlers.iter_mut() {
            if !handler.matches(&message) {
                continue;
            }
            matched = true;
            match handler.handle(&message, &mut context).await {
                Ok(replies) => pending.extend(replies),
                Err(err) => warn!(
                    agent = %id,
                    handler = handler.name(),
                    message_id = %message.id(),
                    error = %err,
                    "Handler failed; remaining handlers still run"
                ),
            }
        }
        if !matched {
            trace!(
                agent = %id,
                message_id = %message.id(),
                kind = %message.payload().kind(),
                "No handler matched"
            );
        }
    }

    /// Evaluates every behavior against one `now` and runs the due ones in
    /// registration order.
    ///
    /// A behavior error is logged and the behavior is skipped for this cycle;
    /// its own readiness condition governs the retry.
    async fn run_due_behaviors(&mut self) {
        let now = Instant::now();
        let ManagedAgent {
            behaviors,
            model,
            capabilities,
            id,
            pending,
            ..
        } = self;
        let mut context = AgentContext::new(id, model, capabilities);
        for behavior in behaviors.iter_mut() {
            if !behavior.is_due(now) {
                continue;
            }
            match behavior.act(&mut context).await {
                Ok(messages) => pending.extend(messages),
                Err(err) => warn!(
                    agent = %id,
                    behavior = behavior.name(),
                    error = %err,
                    "Behavior failed; skipped for this cycle"
                ),
            }
        }
    }

    /// Flushes every message produced this cycle onto the outbox, in causal
    /// order.
    ///
    /// A full outbox blocks (bounded-block backpressure) but the wait races
    /// the stop signal; once stopping, only non-blocking attempts are made so
    /// the final cycle cannot hang. Whatever cannot be sent stays in the
    /// pending queue and is retried on the next cycle, and a closed outbox is
    /// surfaced as a logged delivery error — never a silent drop.
    async fn flush_outbound(&mut self) {
        let cancellation_token = self.cancellation_token.clone();
        while let Some(message) = self.pending.pop_front() {
            if cancellation_token.is_cancelled() {
                match self.outbox.try_send(message) {
                    Ok(()) => continue,
                    Err(tokio::sync::mpsc::error::TrySendError::Full(message)) => {
                        self.pending.push_front(message);
                        break;
                    }
                    Err(tokio::sync::mpsc::error::TrySendError::Closed(message)) => {
                        error!(
                            agent = %self.id,
                            message_id = %message.id(),
                            "Outbox closed while stopping; message undeliverable"
                        );
                        break;
                    }
                }
            }
            tokio::select! {
                () = cancellation_token.cancelled() => {
                    // Retry non-blocking on the next iteration.
                    self.pending.push_front(message);
                }
                permit = self.outbox.reserve() => match permit {
                    Ok(permit) => permit.send(message),
                    Err(_) => {
                        error!(
                            agent = %self.id,
                            message_id = %message.id(),
                            pending = self.pending.len(),
                            "Outbox closed; flush deferred to next cycle"
                        );
                        self.pending.push_front(message);
                        break;
                    }
                },
            }
        }
    }
}
