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

//! Defines the core traits that establish the fundamental contracts of the
//! Coterie runtime.
//!
//! # Key Traits
//!
//! *   [`Behavior`]: a unit of proactive work an agent executes on its own
//!     schedule (`is_due`/`act`).
//! *   [`MessageHandler`]: a unit of reactive work dispatched against inbound
//!     messages (`matches`/`handle`).
//! *   [`BalanceSource`], [`TokenTransfer`], [`WordSource`]: narrow capability
//!     interfaces behind which external collaborators (chain queries, demo
//!     word lists) live, bundled per agent as [`Capabilities`].

// --- Public Re-exports ---
pub use behavior::{Behavior, Cadence};
pub use capabilities::{
    Address, BalanceSource, Capabilities, CapabilityError, TokenAmount, TokenTransfer,
    TransferReceipt, WordSource,
};
pub use message_handler::MessageHandler;

// --- Submodules ---

/// Defines the [`Behavior`] trait and its [`Cadence`] readiness helper.
mod behavior;
/// Defines the capability traits and the per-agent [`Capabilities`] bundle.
mod capabilities;
/// Defines the [`MessageHandler`] trait.
mod message_handler;
