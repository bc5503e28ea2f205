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

/// Represents errors that can occur while moving messages between agents.
///
/// Delivery errors are surfaced to the caller that attempted the hop — the bus
/// forwarder or an agent's flush step — and are never silently swallowed.
#[derive(Debug)]
pub enum DeliveryError {
    /// The destination agent has stopped and its inbox can no longer accept
    /// messages.
    InboxClosed {
        /// Root name of the unreachable destination.
        destination: String,
    },
    /// The destination inbox is at capacity and the caller declined to wait.
    InboxFull {
        /// Root name of the saturated destination.
        destination: String,
    },
    /// The sending agent's own outbox channel is gone; its bus forwarder has
    /// shut down.
    OutboxClosed,
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::InboxClosed { destination } => {
                write!(f, "inbox of agent '{destination}' is closed")
            }
            DeliveryError::InboxFull { destination } => {
                write!(f, "inbox of agent '{destination}' is full")
            }
            DeliveryError::OutboxClosed => write!(f, "outbox channel closed"),
        }
    }
}

impl std::error::Error for DeliveryError {}

/// Converts a `SendError` from Tokio's MPSC channel into an outbox-side error.
impl<T> From<tokio::sync::mpsc::error::SendError<T>> for DeliveryError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        DeliveryError::OutboxClosed
    }
}
