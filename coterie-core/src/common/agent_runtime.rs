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
use std::sync::Arc;

use acton_ern::Ern;
use dashmap::DashMap;
use futures::future::join_all;
use tracing::{error, instrument, trace};

use crate::agent::{AgentConfig, Idle, ManagedAgent};
use crate::common::{AgentHandle, CoterieConfig, MessageBus};

/// Crate-internal shared state behind [`AgentRuntime`].
#[derive(Debug)]
pub(crate) struct RuntimeInner {
    /// Registry of all agents created through this runtime.
    pub(crate) roots: DashMap<Ern, AgentHandle>,
    /// The bus carrying outbox contents to wired inboxes.
    pub(crate) bus: MessageBus,
    /// The configuration this runtime was launched with.
    pub(crate) config: CoterieConfig,
}

/// Represents the initialized and active Coterie runtime.
///
/// Obtained from [`CoterieApp::launch`](crate::common::CoterieApp). The
/// runtime is the factory for agents, the owner of the [`MessageBus`] that
/// wires them together, and the coordinator of system-wide shutdown. It is
/// cheaply cloneable; all clones share the same registry and bus.
#[derive(Debug, Clone)]
pub struct AgentRuntime(pub(crate) Arc<RuntimeInner>);

impl AgentRuntime {
    pub(crate) fn new(config: CoterieConfig) -> Self {
        Self(Arc::new(RuntimeInner {
            roots: DashMap::new(),
            bus: MessageBus::new(),
            config,
        }))
    }

    /// Creates an idle agent builder with a root name.
    ///
    /// The agent is registered with the runtime and ready for behavior and
    /// handler registration before being started via `.start()`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid `Ern` root.
    pub fn new_agent_with_name<State>(&self, name: String) -> ManagedAgent<Idle, State>
    where
        State: Default + Send + Debug + 'static,
    {
        let config = AgentConfig::new(
            Ern::with_root(name).expect("Failed to create root Ern for new agent"),
        );
        self.new_agent_with_config(config)
    }

    /// Creates an idle agent builder with the configured default name.
    pub fn new_agent<State>(&self) -> ManagedAgent<Idle, State>
    where
        State: Default + Send + Debug + 'static,
    {
        self.new_agent_with_name(self.0.config.defaults.agent_name.clone())
    }

    /// Creates an idle agent builder from an explicit [`AgentConfig`].
    pub fn new_agent_with_config<State>(&self, config: AgentConfig) -> ManagedAgent<Idle, State>
    where
        State: Default + Send + Debug + 'static,
    {
        let agent = ManagedAgent::new(self, config);
        trace!("Registering agent: {}", agent.id());
        self.0.roots.insert(agent.id().clone(), agent.handle().clone());
        agent
    }

    /// Wires `from`'s outbox to `to`'s inbox.
    ///
    /// Wiring is directional; call twice for a bidirectional pair. Connections
    /// take effect for all messages forwarded after the call.
    pub fn connect(&self, from: &AgentHandle, to: &AgentHandle) {
        self.0.bus.connect(from, to);
    }

    /// Returns the number of agents registered in the runtime.
    #[inline]
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.0.roots.len()
    }

    /// Returns the bus that wires this runtime's agents together.
    pub fn bus(&self) -> &MessageBus {
        &self.0.bus
    }

    /// Returns the configuration this runtime was launched with.
    pub fn config(&self) -> &CoterieConfig {
        &self.0.config
    }

    /// Stops every agent, then the bus, and waits for all of them.
    ///
    /// Each agent gets the configured shutdown timeout; an agent that was
    /// already stopped individually is simply awaited. Errors and timeouts
    /// are logged per agent and do not abort the shutdown of its siblings.
    #[instrument(skip(self))]
    pub async fn shutdown_all(&self) -> anyhow::Result<()> {
        use tokio::time::timeout as tokio_timeout;

        let shutdown_timeout = self.0.config.timing.shutdown_timeout();

        trace!("Signalling stop to all agents");
        let stop_futures: Vec<_> = self
            .0
            .roots
            .iter()
            .map(|item| {
                let handle = item.value().clone();
                async move {
                    if handle.is_stopping() {
                        // Stopped (or stopping) already; just await the task.
                        handle.tracker.wait().await;
                        return;
                    }
                    match tokio_timeout(shutdown_timeout, handle.stop()).await {
                        Ok(Ok(())) => {
                            trace!("Agent {} stopped", handle.name());
                        }
                        Ok(Err(e)) => {
                            error!("Error stopping agent {}: {:?}", handle.name(), e);
                        }
                        Err(_) => {
                            error!(
                                "Shutdown timeout for agent {} after {:?}",
                                handle.name(),
                                shutdown_timeout
                            );
                        }
                    }
                }
            })
            .collect();
        join_all(stop_futures).await;

        trace!("All agents stopped; stopping bus");
        self.0.bus.shutdown().await;
        Ok(())
    }
}
