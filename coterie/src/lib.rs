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
#![forbid(missing_docs)] // Keep this to enforce coverage

//! # Coterie
//!
//! This crate is the user-facing surface of the Coterie agent framework,
//! built on top of Tokio. An agent is a scheduling loop over two ordered
//! collections — proactive [`Behavior`](coterie_core::prelude::Behavior)s
//! that act on their own cadence, and reactive
//! [`MessageHandler`](coterie_core::prelude::MessageHandler)s that react to
//! inbound messages — plus an inbox and an outbox wired to peers through the
//! runtime's message bus.
//!
//! ## Key Concepts
//!
//! - **Agents (`ManagedAgent`)**: Core computational units wrapping
//!   user-defined model state, behaviors, and handlers.
//! - **Handles (`AgentHandle`)**: External references for delivering messages
//!   to and stopping a running agent.
//! - **Behaviors**: Proactive work evaluated every cycle against an
//!   elapsed-time [`Cadence`](coterie_core::prelude::Cadence).
//! - **Handlers**: Reactive work; every handler whose predicate matches an
//!   inbound message runs, in registration order.
//! - **Capabilities**: Explicit per-agent bundles of external collaborators
//!   (balance queries, transfers, word sources) — no ambient globals.
//! - **Runtime (`AgentRuntime`)**: Creates agents, wires outboxes to inboxes,
//!   and coordinates system-wide shutdown.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coterie::prelude::*;
//!
//! let runtime = CoterieApp::launch();
//! let mut agent = runtime.new_agent_with_name::<TraderState>("chatty".into());
//! agent.register_handler(GreetingHandler::new());
//! let handle = agent.start().await;
//! ```

/// Ready-made proactive behaviors.
pub mod behaviors;

/// Ready-made capability implementations backing the behaviors and handlers.
pub mod capabilities;

/// Ready-made reactive message handlers.
pub mod handlers;

/// The model state the bundled behaviors and handlers operate on.
pub mod model;

/// A prelude module for conveniently importing the most commonly used items.
///
/// Re-exports the whole `coterie-core` prelude (runtime, agents, messages,
/// traits) together with this crate's bundled behaviors, handlers, capability
/// implementations, and model state.
pub mod prelude {
    pub use coterie_core::prelude::*;

    pub use crate::behaviors::{BalanceProbeBehavior, WordDropBehavior};
    pub use crate::capabilities::{InMemoryLedger, Lexicon};
    pub use crate::handlers::{GreetingHandler, TransferRequestHandler};
    pub use crate::model::TraderState;
}
