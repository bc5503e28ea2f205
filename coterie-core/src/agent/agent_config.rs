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

use std::time::Duration;

use acton_ern::Ern;

use crate::traits::Capabilities;

/// Configuration parameters for initializing a new agent.
///
/// Holds the agent's identity, the capability bundle its behaviors and
/// handlers may call, and optional overrides of the runtime-wide scheduling
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    pub(crate) ern: Ern,
    pub(crate) capabilities: Capabilities,
    pub(crate) tick_interval: Option<Duration>,
    pub(crate) max_messages_per_cycle: Option<usize>,
}

impl AgentConfig {
    /// Creates a configuration for the agent identified by `ern`.
    pub fn new(ern: Ern) -> Self {
        Self {
            ern,
            ..Self::default()
        }
    }

    /// Creates a configuration with a root identifier derived from `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid `Ern` root.
    pub fn with_name(name: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self::new(Ern::with_root(name.into())?))
    }

    /// Supplies the capability bundle the agent's behaviors and handlers see.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Overrides the runtime-wide tick interval for this agent.
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = Some(tick_interval);
        self
    }

    /// Overrides the runtime-wide per-cycle inbox drain bound for this agent.
    #[must_use]
    pub fn with_max_messages_per_cycle(mut self, max: usize) -> Self {
        self.max_messages_per_cycle = Some(max);
        self
    }

    /// Returns the identifier this configuration will assign.
    #[inline]
    pub fn ern(&self) -> &Ern {
        &self.ern
    }
}
