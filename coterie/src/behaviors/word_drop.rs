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

use async_trait::async_trait;
use coterie_core::prelude::{AgentContext, Behavior, Cadence, Message, Payload};
use tokio::time::Instant;
use tracing::debug;

use crate::model::TraderState;

const DEFAULT_PERIOD: Duration = Duration::from_secs(2);
const WORDS_PER_DROP: usize = 2;

/// Periodically emits a small [`Payload::RandomWords`] message built from the
/// agent's word-source capability.
///
/// The conversation starter of the bundled agents: its output gives peers'
/// greeting handlers something to react to. Fires immediately on the first
/// cycle, then every `period`.
#[derive(Debug)]
pub struct WordDropBehavior {
    cadence: Cadence,
}

impl WordDropBehavior {
    /// Creates a word drop on the default two-second period.
    pub fn new() -> Self {
        Self::with_period(DEFAULT_PERIOD)
    }

    /// Creates a word drop on a custom period.
    pub fn with_period(period: Duration) -> Self {
        Self {
            cadence: Cadence::new(period),
        }
    }
}

impl Default for WordDropBehavior {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior<TraderState> for WordDropBehavior {
    fn name(&self) -> &str {
        "word-drop"
    }

    fn is_due(&self, now: Instant) -> bool {
        self.cadence.is_due(now)
    }

    async fn act(
        &mut self,
        context: &mut AgentContext<'_, TraderState>,
    ) -> anyhow::Result<Vec<Message>> {
        // Marked first so a failure retries on the period, not every cycle.
        self.cadence.mark_fired(Instant::now());

        let words = context.capabilities().words().random_words(WORDS_PER_DROP);
        anyhow::ensure!(!words.is_empty(), "word source produced no words");
        debug!(agent = %context.id(), words = ?words, "Dropping words");

        Ok(vec![context.message(Payload::RandomWords { words })])
    }
}
