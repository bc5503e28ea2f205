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

use acton_ern::Ern;
use derive_new::new;

use crate::common::AgentSender;
use crate::message::{DeliveryError, Message};

/// Represents the addressable endpoint of an agent: its identity plus the
/// sender half of the channel feeding its inbox.
///
/// The bus routing table stores one `MessageAddress` per wired destination.
/// Delivering through an address is the only way anything outside an agent
/// may touch that agent's inbox; only the owning agent ever dequeues it.
#[derive(new, Clone, Debug)]
pub struct MessageAddress {
    /// The sender part of the MPSC channel for the agent's inbox.
    pub(crate) inbox: AgentSender,
    /// The unique identifier (`Ern`) of the agent behind this address.
    pub(crate) agent: Ern,
}

impl MessageAddress {
    /// Returns the root name component of the agent's identifier (`Ern`).
    #[inline]
    pub fn name(&self) -> &str {
        self.agent.root.as_str()
    }

    /// Returns the identifier of the agent behind this address.
    #[inline]
    pub fn id(&self) -> &Ern {
        &self.agent
    }

    /// Appends `message` to the destination inbox, waiting while it is full.
    ///
    /// This is the bounded-block half of the backpressure policy: a full inbox
    /// suspends the caller until capacity frees up. Callers that must remain
    /// responsive to shutdown race this future against a cancellation token.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::InboxClosed`] if the destination agent has
    /// stopped and its inbox receiver is gone.
    pub async fn deliver(&self, message: Message) -> Result<(), DeliveryError> {
        self.inbox
            .send(message)
            .await
            .map_err(|_| DeliveryError::InboxClosed {
                destination: self.name().to_string(),
            })
    }

    /// Attempts to append `message` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::InboxFull`] when the destination is at
    /// capacity, or [`DeliveryError::InboxClosed`] when it has stopped.
    pub fn try_deliver(&self, message: Message) -> Result<(), DeliveryError> {
        use tokio::sync::mpsc::error::TrySendError;
        self.inbox.try_send(message).map_err(|err| match err {
            TrySendError::Full(_) => DeliveryError::InboxFull {
                destination: self.name().to_string(),
            },
            TrySendError::Closed(_) => DeliveryError::InboxClosed {
                destination: self.name().to_string(),
            },
        })
    }
}

impl Default for MessageAddress {
    /// Creates a default `MessageAddress` with a default `Ern` and a closed
    /// channel sender.
    ///
    /// This is primarily useful for placeholder initialization before a real
    /// address is known. Messages cannot be successfully delivered through it.
    fn default() -> Self {
        let (inbox, _) = tokio::sync::mpsc::channel(1); // Create a dummy, likely closed sender
        Self::new(inbox, Ern::default())
    }
}
