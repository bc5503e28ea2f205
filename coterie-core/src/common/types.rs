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

//! Defines common internal type aliases used within `coterie-core`.
//!
//! This module centralizes channel type definitions to improve readability:
//! the same `tokio::mpsc` machinery backs both the per-agent inbox (bus
//! delivers, agent drains) and the per-agent outbox (agent flushes, bus
//! forwards).

use tokio::sync::mpsc::{Receiver, Sender};

use crate::message::Message;

/// Crate-internal: the sender half of an agent's inbox channel.
pub(crate) type AgentSender = Sender<Message>;

/// Crate-internal: the receiver half of an agent's inbox channel. Only the
/// owning agent's scheduling loop dequeues from it.
pub(crate) type InboxReceiver = Receiver<Message>;

/// Crate-internal: the receiver half of an agent's outbox channel, handed to
/// the bus forwarder at start.
pub(crate) type OutboxReceiver = Receiver<Message>;
