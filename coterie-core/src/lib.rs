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

#![forbid(unsafe_code)]
// #![warn(missing_docs)]
//! Coterie Core Library
//!
//! This library provides the runtime for the Coterie agent system: autonomous
//! agents that exchange immutable [`message::Message`] values asynchronously and
//! combine reactive work (message handlers) with proactive work (scheduled
//! behaviors) inside a single sequential scheduling loop per agent.
//!
//! Agents own an inbox and an outbox; a [`common::MessageBus`] forwards each
//! agent's outbox onto the inboxes of its wired peers. Nothing else is shared
//! between agents.

/// Common utilities and structures used throughout the Coterie runtime.
pub(crate) mod common;

pub(crate) mod agent;
pub(crate) mod message;
/// Trait definitions used in the Coterie runtime.
pub(crate) mod traits;

/// Prelude module for convenient imports.
///
/// This module re-exports commonly used items from the `agent`, `common`,
/// `message`, and `traits` modules, as well as the `async_trait` crate.
pub mod prelude {
    pub use acton_ern::*;
    pub use async_trait::async_trait;

    pub use crate::agent::{AgentConfig, Idle, ManagedAgent, Running};
    pub use crate::common::{
        AgentContext, AgentHandle, AgentRuntime, CoterieApp, CoterieConfig, MessageBus,
    };
    pub use crate::message::{
        DeliveryError, Message, MessageAddress, MessageId, Payload, PayloadKind,
    };
    pub use crate::traits::{
        Address, BalanceSource, Behavior, Cadence, Capabilities, CapabilityError, MessageHandler,
        TokenAmount, TokenTransfer, TransferReceipt, WordSource,
    };
}
