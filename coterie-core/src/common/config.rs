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

use serde::{Deserialize, Serialize};

/// Configuration for the Coterie runtime.
///
/// All values are loadable from a TOML file in the XDG config directory
/// (`coterie/config.toml`) and fall back to defaults field by field. The
/// loaded configuration is passed explicitly into
/// [`CoterieApp::launch_with_config`](crate::common::CoterieApp); there is no
/// process-wide configuration singleton.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoterieConfig {
    /// Timing configuration for the scheduling loop and shutdown.
    pub timing: TimingConfig,
    /// Limits and capacity configuration for the per-agent queues.
    pub limits: LimitsConfig,
    /// Default values configuration.
    pub defaults: DefaultsConfig,
}

/// Timing-related configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// The tick interval of an agent's scheduling loop, in milliseconds. This
    /// sleep is the loop's sole suspension point and is interrupted by stop.
    pub tick_interval_ms: u64,
    /// How long `shutdown_all` waits for any one agent to stop, in
    /// milliseconds.
    pub shutdown_timeout_ms: u64,
    /// Suggested timeout for external collaborator calls inside behaviors and
    /// handlers, in milliseconds.
    pub capability_timeout_ms: u64,
}

/// Limits and capacity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Capacity of each agent's inbox channel.
    pub inbox_capacity: usize,
    /// Capacity of each agent's outbox channel.
    pub outbox_capacity: usize,
    /// Maximum messages drained from the inbox in one cycle, so heavy inbound
    /// load cannot starve behaviors.
    pub max_messages_per_cycle: usize,
}

/// Default configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default agent name when none is provided.
    pub agent_name: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            shutdown_timeout_ms: 10_000,
            capability_timeout_ms: 5_000,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 255,
            outbox_capacity: 255,
            max_messages_per_cycle: 64,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            agent_name: "agent".to_string(),
        }
    }
}

impl TimingConfig {
    /// Returns the tick interval as a [`Duration`].
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Returns the per-agent shutdown timeout as a [`Duration`].
    #[inline]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Returns the capability-call timeout as a [`Duration`].
    #[inline]
    pub fn capability_timeout(&self) -> Duration {
        Duration::from_millis(self.capability_timeout_ms)
    }
}

impl CoterieConfig {
    /// Loads configuration from XDG-compliant locations.
    ///
    /// Looks for `config.toml` under the `coterie` prefix. Any failure — no
    /// file, unreadable file, parse error — falls back to defaults and is
    /// logged rather than propagated.
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("coterie") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let Some(path) = xdg_dirs.find_config_file("config.toml") else {
            info!("No configuration file found, using defaults");
            return Self::default();
        };

        info!("Loading configuration from: {}", path.display());
        match std::fs::read_to_string(&path) {
            Ok(config_str) => match toml::from_str::<Self>(&config_str) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
