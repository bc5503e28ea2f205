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

use std::sync::Arc;

use acton_ern::Ern;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace, warn};

use crate::common::{AgentHandle, OutboxReceiver};
use crate::message::{Message, MessageAddress};

/// Moves messages from each agent's outbox to the inboxes of its wired peers.
///
/// The bus owns the connection graph: a routing table mapping a source agent's
/// identity to the destination addresses its outbox feeds. When an agent
/// starts, the bus takes over the receiver half of that agent's outbox and
/// runs one forwarder task for it. A single forwarder per source guarantees
/// that messages leave in the order they were flushed and that appends to any
/// one destination are serialized, even under fan-out.
///
/// Delivery is at-most-once per edge and never silently dropped: a full
/// destination inbox blocks the forwarder (bounded-block backpressure), and an
/// unreachable destination is logged as a delivery error. Every blocking wait
/// races the bus cancellation token, so a saturated edge — including two
/// mutually saturated directions — cannot deadlock shutdown.
#[derive(Debug, Clone)]
pub struct MessageBus {
    routes: Arc<DashMap<Ern, Vec<MessageAddress>>>,
    tracker: TaskTracker,
    cancellation_token: CancellationToken,
}

impl MessageBus {
    pub(crate) fn new() -> Self {
        let tracker = TaskTracker::new();
        // Closed up front so wait() resolves once all forwarders exit;
        // forwarders may still be spawned afterwards.
        tracker.close();
        Self {
            routes: Arc::new(DashMap::new()),
            tracker,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Wires `from`'s outbox to `to`'s inbox.
    ///
    /// Every message `from` flushes will be appended, in flush order, to
    /// `to`'s inbox. An agent may be connected to any number of peers;
    /// connecting the same pair twice duplicates delivery and is rejected.
    pub fn connect(&self, from: &AgentHandle, to: &AgentHandle) {
        let mut destinations = self.routes.entry(from.id()).or_default();
        if destinations.iter().any(|address| address.id() == &to.id) {
            warn!(
                source = %from.id,
                destination = %to.id,
                "Edge already wired, ignoring duplicate connect"
            );
            return;
        }
        trace!(source = %from.id, destination = %to.id, "Wiring outbox to inbox");
        destinations.push(to.reply_address());
    }

    /// Returns the number of outbound edges currently wired for `source`.
    pub fn fan_out_of(&self, source: &Ern) -> usize {
        self.routes
            .get(source)
            .map_or(0, |entry| entry.value().len())
    }

    /// Takes ownership of a started agent's outbox and begins forwarding it.
    pub(crate) fn attach(&self, source: Ern, outbox: OutboxReceiver) {
        let routes = self.routes.clone();
        let cancellation_token = self.cancellation_token.clone();
        trace!(source = %source, "Attaching outbox forwarder");
        self.tracker.spawn(async move {
            Self::forward_loop(source, outbox, routes, cancellation_token).await;
        });
    }

    /// Drains one source agent's outbox for as long as the bus is running.
    ///
    /// Each received message is fanned out to the currently wired
    /// destinations in original order. On shutdown the forwarder makes one
    /// non-blocking pass over whatever is still queued, then exits.
    #[instrument(skip(outbox, routes, cancellation_token), fields(source = %source))]
    async fn forward_loop(
        source: Ern,
        mut outbox: OutboxReceiver,
        routes: Arc<DashMap<Ern, Vec<MessageAddress>>>,
        cancellation_token: CancellationToken,
    ) {
        loop {
            let received = tokio::select! {
                () = cancellation_token.cancelled() => {
                    trace!("Bus stopping, final non-blocking drain");
                    while let Ok(message) = outbox.try_recv() {
                        Self::fan_out_final(&source, message, &routes);
                    }
                    break;
                }
                received = outbox.recv() => received,
            };
            let Some(message) = received else {
                trace!("Outbox closed, forwarder exiting");
                break;
            };
            Self::fan_out(&source, message, &routes, &cancellation_token).await;
        }
    }

    /// Appends `message` to every destination wired for `source`, in order.
    async fn fan_out(
        source: &Ern,
        message: Message,
        routes: &DashMap<Ern, Vec<MessageAddress>>,
        cancellation_token: &CancellationToken,
    ) {
        let Some(destinations) = routes.get(source).map(|entry| entry.value().clone()) else {
            trace!(message_id = %message.id(), "No wiring for source, message discarded");
            return;
        };
        for destination in destinations {
            tokio::select! {
                () = cancellation_token.cancelled() => {
                    // Shutdown arrived while blocked on a full inbox; one
                    // non-blocking attempt, then give up loudly.
                    if let Err(err) = destination.try_deliver(message.clone()) {
                        warn!(
                            source = %source,
                            destination = destination.name(),
                            message_id = %message.id(),
                            error = %err,
                            "Undeliverable at shutdown"
                        );
                    }
                }
                result = destination.deliver(message.clone()) => {
                    if let Err(err) = result {
                        warn!(
                            source = %source,
                            destination = destination.name(),
                            message_id = %message.id(),
                            error = %err,
                            "Delivery failed"
                        );
                    }
                }
            }
        }
    }

    /// Non-blocking fan-out used for the final drain during shutdown.
    fn fan_out_final(source: &Ern, message: Message, routes: &DashMap<Ern, Vec<MessageAddress>>) {
        let Some(destinations) = routes.get(source).map(|entry| entry.value().clone()) else {
            return;
        };
        for destination in destinations {
            if let Err(err) = destination.try_deliver(message.clone()) {
                warn!(
                    source = %source,
                    destination = destination.name(),
                    message_id = %message.id(),
                    error = %err,
                    "Undeliverable at shutdown"
                );
            }
        }
    }

    /// Stops all forwarders and waits for them to exit.
    pub(crate) async fn shutdown(&self) {
        self.cancellation_token.cancel();
        self.tracker.wait().await;
    }
}
