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

use crate::traits::{Address, TokenAmount, TransferReceipt};

/// The structured content carried by a [`Message`](crate::message::Message).
///
/// `Payload` is a closed set of kinds; handlers match on [`PayloadKind`]
/// rather than on concrete Rust types, so one handler can react to a family
/// of messages without downcasting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Payload {
    /// A conversational opener, e.g. `"hello there"`.
    Greeting {
        /// The greeting text.
        text: String,
    },
    /// A reply acknowledging a previously received [`Payload::Greeting`].
    GreetingAck {
        /// The acknowledgement text, echoing what was received.
        text: String,
    },
    /// A small bag of words produced by a proactive behavior for demo traffic.
    RandomWords {
        /// The words, in the order the word source produced them.
        words: Vec<String>,
    },
    /// A snapshot of a token balance observed via the balance capability.
    BalanceReport {
        /// The address whose balance was queried.
        owner: Address,
        /// The token contract the balance belongs to.
        token: Address,
        /// The observed balance, in the token's smallest unit.
        amount: TokenAmount,
    },
    /// A request that the receiving agent move tokens to `to`.
    TransferRequest {
        /// The destination address.
        to: Address,
        /// The token contract to draw from.
        token: Address,
        /// The amount to transfer, in the token's smallest unit.
        amount: TokenAmount,
    },
    /// Confirmation that a transfer was submitted via the transfer capability.
    TransferReceipt(TransferReceipt),
}

impl Payload {
    /// Returns the discriminant of this payload.
    #[inline]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Greeting { .. } => PayloadKind::Greeting,
            Payload::GreetingAck { .. } => PayloadKind::GreetingAck,
            Payload::RandomWords { .. } => PayloadKind::RandomWords,
            Payload::BalanceReport { .. } => PayloadKind::BalanceReport,
            Payload::TransferRequest { .. } => PayloadKind::TransferRequest,
            Payload::TransferReceipt(_) => PayloadKind::TransferReceipt,
        }
    }
}

/// The discriminant of a [`Payload`], used by handler match predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PayloadKind {
    /// See [`Payload::Greeting`].
    Greeting,
    /// See [`Payload::GreetingAck`].
    GreetingAck,
    /// See [`Payload::RandomWords`].
    RandomWords,
    /// See [`Payload::BalanceReport`].
    BalanceReport,
    /// See [`Payload::TransferRequest`].
    TransferRequest,
    /// See [`Payload::TransferReceipt`].
    TransferReceipt,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadKind::Greeting => "greeting",
            PayloadKind::GreetingAck => "greeting-ack",
            PayloadKind::RandomWords => "random-words",
            PayloadKind::BalanceReport => "balance-report",
            PayloadKind::TransferRequest => "transfer-request",
            PayloadKind::TransferReceipt => "transfer-receipt",
        };
        f.write_str(name)
    }
}
