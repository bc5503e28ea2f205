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

use crate::common::{AgentRuntime, CoterieConfig};

/// Represents the Coterie system.
///
/// The `CoterieApp` struct is the entry point of the framework: it loads
/// configuration and hands back the [`AgentRuntime`] through which agents are
/// created, wired, and stopped.
#[derive(Default, Debug, Clone)]
pub struct CoterieApp;

impl CoterieApp {
    /// Launches the Coterie system with configuration discovered on disk.
    ///
    /// Looks for `config.toml` in the XDG configuration directories and falls
    /// back to built-in defaults when none is found.
    ///
    /// # Returns
    ///
    /// A ready [`AgentRuntime`].
    pub fn launch() -> AgentRuntime {
        Self::launch_with_config(CoterieConfig::load())
    }

    /// Launches the Coterie system with an explicit configuration.
    ///
    /// Used by tests and embedders that want full control over timing and
    /// channel limits rather than whatever happens to be on disk.
    pub fn launch_with_config(config: CoterieConfig) -> AgentRuntime {
        AgentRuntime::new(config)
    }
}
