//! Defines the core components for creating, configuring, and running agents.
//!
//! This module provides the fundamental building blocks for agents within the
//! Coterie runtime. It encapsulates the agent's lifecycle, state management,
//! and configuration.
//!
//! # Key Components
//!
//! *   [`ManagedAgent`]: The central struct representing an agent's runtime
//!     state machine. It owns the agent's inbox and outbox, its registered
//!     behaviors and handlers, and the scheduling loop that interleaves them.
//! *   [`AgentConfig`]: A structure holding the parameters needed to
//!     initialize a new agent: its unique identifier (`Ern`), its capability
//!     bundle, and optional per-agent tuning overrides.
//! *   [`Idle`]: A type-state marker indicating that a `ManagedAgent` has been
//!     configured but has not yet started its scheduling loop.
//! *   [`Running`]: A type-state marker indicating that a `ManagedAgent` is
//!     actively cycling. Stopping and Stopped are expressed through the
//!     agent's cancellation token and task tracker rather than further
//!     type-states.
//!
//! The primary interaction point involves configuring a [`ManagedAgent`] in
//! the [`Idle`] state and transitioning it to [`Running`] by calling `start`.

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

// Re-export key types for easier access within the crate and the prelude.
pub use agent_config::AgentConfig;
pub use managed_agent::Idle;
pub use managed_agent::ManagedAgent;
pub use managed_agent::running::Running; // Note: `Running` is defined within a submodule

/// Contains the `ManagedAgent` struct and its state-specific implementations (`Idle`, `Running`).
mod managed_agent;

/// Contains the `AgentConfig` struct for agent initialization.
mod agent_config;
