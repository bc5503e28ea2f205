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

use std::hash::{Hash, Hasher};

use acton_ern::Ern;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{instrument, trace};

use crate::common::AgentSender;
use crate::message::{DeliveryError, Message, MessageAddress};

/// Capacity of the placeholder channel used by [`AgentHandle::default`].
const DUMMY_CHANNEL_SIZE: usize = 8;

/// A clonable handle for interacting with an agent from outside its own task.
///
/// `AgentHandle` encapsulates what the rest of the system may do to an agent:
/// deliver messages into its inbox, identify it, and request a stop. Handles
/// can be cloned freely; the bus routing table, the runtime registry, and
/// application code all hold clones of the same handle.
///
/// Equality and hashing are based solely on the agent's unique identifier.
#[derive(Debug, Clone)]
pub struct AgentHandle {
    /// The unique identifier (`Ern`) for the agent this handle refers to.
    pub(crate) id: Ern,
    /// The sender part of the MPSC channel connected to the agent's inbox.
    pub(crate) inbox: AgentSender,
    /// Tracks the agent's scheduling-loop task; `Stopped` is this tracker
    /// going idle.
    pub(crate) tracker: TaskTracker,
    /// The agent's stop signal. Cancelling it is the `Running -> Stopping`
    /// transition; the loop finishes its current cycle and exits.
    pub(crate) cancellation_token: CancellationToken,
}

impl AgentHandle {
    pub(crate) fn new(
        id: Ern,
        inbox: AgentSender,
        tracker: TaskTracker,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            id,
            inbox,
            tracker,
            cancellation_token,
        }
    }

    /// Returns a clone of the agent's unique identifier.
    #[inline]
    pub fn id(&self) -> Ern {
        self.id.clone()
    }

    /// Returns the agent's root name (the first part of its `Ern`).
    #[inline]
    pub fn name(&self) -> String {
        self.id.root.to_string()
    }

    /// Returns the [`MessageAddress`] under which this agent receives
    /// messages.
    #[inline]
    pub fn reply_address(&self) -> MessageAddress {
        MessageAddress::new(self.inbox.clone(), self.id.clone())
    }

    /// Delivers `message` directly into this agent's inbox, waiting while the
    /// inbox is full.
    ///
    /// Ordinary agent-to-agent traffic flows through the bus; direct delivery
    /// exists for the wiring layer itself and for tests that feed an agent.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::InboxClosed`] if the agent has stopped.
    pub async fn deliver(&self, message: Message) -> Result<(), DeliveryError> {
        self.reply_address().deliver(message).await
    }

    /// Returns `true` once the agent's scheduling loop has been asked to stop.
    #[inline]
    pub fn is_stopping(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Requests a graceful stop and waits for the agent to reach `Stopped`.
    ///
    /// The stop signal lets the loop finish the cycle it is in (the tick wait
    /// is interrupted promptly), after which the agent task exits and this
    /// future resolves. Messages still queued in the inbox at that point stay
    /// queued and are never processed.
    ///
    /// # Errors
    ///
    /// Stopping an agent twice is an invariant violation and returns an error
    /// rather than waiting forever.
    #[instrument(skip(self), fields(agent = %self.id))]
    pub async fn stop(&self) -> anyhow::Result<()> {
        if self.cancellation_token.is_cancelled() {
            anyhow::bail!("agent '{}' was already stopped", self.name());
        }
        trace!("Requesting stop");
        self.cancellation_token.cancel();
        self.tracker.wait().await;
        trace!("Agent reached Stopped");
        Ok(())
    }
}

impl Default for AgentHandle {
    /// Creates a default, placeholder `AgentHandle`.
    ///
    /// The placeholder has a default `Ern` and a dummy channel; it exists so
    /// structs embedding a handle can be initialized before the real agent is
    /// constructed. Messages cannot be delivered through it.
    fn default() -> Self {
        let (inbox, _) = mpsc::channel(DUMMY_CHANNEL_SIZE);
        Self {
            id: Ern::default(),
            inbox,
            tracker: TaskTracker::new(),
            cancellation_token: CancellationToken::new(),
        }
    }
}

/// Implements equality comparison based on the agent's unique ID (`Ern`).
impl PartialEq for AgentHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AgentHandle {}

/// Implements hashing based on the agent's unique ID (`Ern`).
impl Hash for AgentHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
