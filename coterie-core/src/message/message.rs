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

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use acton_ern::Ern;
use static_assertions::assert_impl_all;

use crate::message::Payload;

/// Process-wide counter backing [`MessageId::next`].
static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque, process-unique identifier for a [`Message`].
///
/// Identifiers are allocated from a monotonically increasing counter and are
/// never reused within a process. They carry no meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    /// Allocates the next unused identifier.
    pub(crate) fn next() -> Self {
        Self(NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// An immutable value exchanged between agents.
///
/// A `Message` records who sent it (`sender`), what it carries (`payload`),
/// and when it was created (`sent_at`). Once constructed it is never mutated;
/// the bus clones it when fanning out to multiple destinations.
///
/// Equality, hashing, and ordering of messages are defined by [`MessageId`]
/// alone, so two messages with identical payloads remain distinct.
#[derive(Debug, Clone)]
pub struct Message {
    id: MessageId,
    sender: Ern,
    payload: Payload,
    sent_at: SystemTime,
}

impl Message {
    /// Creates a new message from `sender` carrying `payload`, timestamped now.
    pub fn new(sender: Ern, payload: Payload) -> Self {
        Self::with_timestamp(sender, payload, SystemTime::now())
    }

    /// Creates a new message with an explicit timestamp.
    ///
    /// Primarily useful in tests that need reproducible `sent_at` values; the
    /// id is still freshly allocated.
    pub fn with_timestamp(sender: Ern, payload: Payload, sent_at: SystemTime) -> Self {
        Self {
            id: MessageId::next(),
            sender,
            payload,
            sent_at,
        }
    }

    /// Returns the unique identifier of this message.
    #[inline]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the identity of the agent that created this message.
    #[inline]
    pub fn sender(&self) -> &Ern {
        &self.sender
    }

    /// Returns the payload carried by this message.
    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the time the message was created.
    #[inline]
    pub fn sent_at(&self) -> SystemTime {
        self.sent_at
    }
}

/// Implements equality comparison based on the message's unique id.
impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

/// Implements hashing based on the message's unique id.
impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Ensures that Message can cross task boundaries.
assert_impl_all!(Message: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_monotonic() {
        let a = MessageId::next();
        let b = MessageId::next();
        assert!(b > a);
    }

    #[test]
    fn equality_is_by_id_not_payload() {
        let sender = Ern::default();
        let first = Message::new(
            sender.clone(),
            Payload::Greeting {
                text: "hello there".into(),
            },
        );
        let second = Message::new(
            sender,
            Payload::Greeting {
                text: "hello there".into(),
            },
        );
        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }
}
