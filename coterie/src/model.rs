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

use coterie_core::prelude::TokenAmount;

/// Model state shared by the bundled behaviors and handlers.
///
/// Each agent owns its own instance; behaviors and handlers reach it through
/// the per-cycle context and mutate it freely — the scheduling loop guarantees
/// only one of them runs at a time.
#[derive(Debug, Default, Clone)]
pub struct TraderState {
    /// The most recent balance observed by the balance probe, if any probe has
    /// completed yet.
    pub last_known_balance: Option<TokenAmount>,
    /// How many greetings this agent has acknowledged.
    pub greetings_received: u64,
    /// How many transfers this agent has submitted.
    pub transfers_submitted: u64,
}
