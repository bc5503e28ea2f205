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

use std::fmt::Debug;

use tracing::{instrument, trace};

use crate::agent::managed_agent::running::Running;
use crate::agent::ManagedAgent;
use crate::common::AgentHandle;
use crate::traits::{Behavior, Capabilities, MessageHandler};

/// Type-state marker for a [`ManagedAgent`] that has been configured but not
/// yet started.
///
/// While idle, an agent accepts behavior and handler registrations and
/// capability wiring. Once configuration is complete the agent transitions to
/// [`Running`] via [`ManagedAgent::start`], or — for deterministic tests that
/// single-step cycles — via [`ManagedAgent::into_running`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idle;

impl<State: Default + Send + Debug + 'static> ManagedAgent<Idle, State> {
    /// Registers a proactive behavior.
    ///
    /// Behaviors are evaluated every cycle in registration order; when several
    /// are due in the same cycle they execute in registration order, making
    /// the tie-break deterministic. Registered behaviors live until the agent
    /// stops.
    ///
    /// # Returns
    ///
    /// A mutable reference to `self` to allow for method chaining during
    /// configuration.
    pub fn register_behavior(&mut self, behavior: impl Behavior<State> + 'static) -> &mut Self {
        trace!(agent = %self.id, behavior = behavior.name(), "Registering behavior");
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Registers a reactive message handler.
    ///
    /// Handlers are evaluated in registration order for every drained message,
    /// and every matching handler runs — handlers are independent reactions,
    /// not a priority chain.
    ///
    /// # Returns
    ///
    /// A mutable reference to `self` to allow for method chaining during
    /// configuration.
    pub fn register_handler(&mut self, handler: impl MessageHandler<State> + 'static) -> &mut Self {
        trace!(agent = %self.id, handler = handler.name(), "Registering handler");
        self.handlers.push(Box::new(handler));
        self
    }

    /// Replaces the agent's capability bundle.
    ///
    /// Usually supplied through [`AgentConfig`](crate::agent::AgentConfig);
    /// this setter covers agents built with the runtime's name-only factory.
    pub fn with_capabilities(&mut self, capabilities: Capabilities) -> &mut Self {
        self.capabilities = capabilities;
        self
    }

    /// Transitions the agent to [`Running`] and spawns its scheduling loop.
    ///
    /// The agent's outbox receiver is handed to the runtime's bus, which
    /// forwards flushed messages to whatever peers were wired via
    /// [`AgentRuntime::connect`](crate::common::AgentRuntime::connect). The
    /// loop task is tracked by the handle, so
    /// [`AgentHandle::stop`](crate::common::AgentHandle::stop) can await the
    /// `Stopped` state.
    ///
    /// # Returns
    ///
    /// The [`AgentHandle`] for interacting with the now-running agent.
    #[instrument(skip(self), fields(agent = %self.id))]
    pub async fn start(mut self) -> AgentHandle {
        let handle = self.handle.clone();
        let outbox_receiver = self
            .outbox_receiver
            .take()
            .expect("idle agent must still own its outbox receiver");
        self.runtime.bus().attach(self.id.clone(), outbox_receiver);

        let mut running = self.into_running();
        let tracker = handle.tracker.clone();
        tracker.spawn(async move {
            running.run().await;
        });
        handle
    }

    /// Transitions the agent to [`Running`] without spawning its loop.
    ///
    /// Intended for deterministic tests and drivers that single-step cycles
    /// with [`ManagedAgent::run_cycle`] instead of free-running against real
    /// time. The outbox receiver stays with the agent and can be taken with
    /// [`ManagedAgent::take_outbox`].
    pub fn into_running(self) -> ManagedAgent<Running, State> {
        trace!(agent = %self.id, "Transitioning Idle -> Running");
        ManagedAgent {
            handle: self.handle,
            id: self.id,
            model: self.model,
            runtime: self.runtime,
            capabilities: self.capabilities,
            inbox: self.inbox,
            outbox: self.outbox,
            outbox_receiver: self.outbox_receiver,
            behaviors: self.behaviors,
            handlers: self.handlers,
            pending: self.pending,
            tick_interval: self.tick_interval,
            max_messages_per_cycle: self.max_messages_per_cycle,
            tracker: self.tracker,
            cancellation_token: self.cancellation_token,
            _phase: std::marker::PhantomData,
        }
    }
}
