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

//! Instrumented behaviors, handlers, and capabilities for observing agents
//! from outside their tasks.

use std::sync::{Arc, Mutex};

use coterie::prelude::*;
use tokio::time::Instant;

/// A handler that records every message it sees into a shared vector.
///
/// With `only: None` it matches everything; otherwise only the given kind.
/// Registered last it observes without interfering, since all matching
/// handlers run.
#[derive(Debug)]
pub struct RecordingHandler {
    seen: Arc<Mutex<Vec<Message>>>,
    only: Option<PayloadKind>,
}

impl RecordingHandler {
    pub fn all() -> (Self, Arc<Mutex<Vec<Message>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                seen: seen.clone(),
                only: None,
            },
            seen,
        )
    }

    pub fn of_kind(kind: PayloadKind) -> (Self, Arc<Mutex<Vec<Message>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                seen: seen.clone(),
                only: Some(kind),
            },
            seen,
        )
    }
}

#[async_trait]
impl MessageHandler<TraderState> for RecordingHandler {
    fn name(&self) -> &str {
        "recording"
    }

    fn matches(&self, message: &Message) -> bool {
        self.only
            .map_or(true, |kind| message.payload().kind() == kind)
    }

    async fn handle(
        &mut self,
        message: &Message,
        _context: &mut AgentContext<'_, TraderState>,
    ) -> anyhow::Result<Vec<Message>> {
        self.seen.lock().unwrap().push(message.clone());
        Ok(Vec::new())
    }
}

/// A handler that matches greetings and always fails.
#[derive(Debug, Default)]
pub struct FailingHandler;

#[async_trait]
impl MessageHandler<TraderState> for FailingHandler {
    fn name(&self) -> &str {
        "failing"
    }

    fn matches(&self, message: &Message) -> bool {
        message.payload().kind() == PayloadKind::Greeting
    }

    async fn handle(
        &mut self,
        _message: &Message,
        _context: &mut AgentContext<'_, TraderState>,
    ) -> anyhow::Result<Vec<Message>> {
        anyhow::bail!("handler failure for testing")
    }
}

/// A behavior that emits a fixed batch of payloads exactly once, on its first
/// cycle.
#[derive(Debug)]
pub struct ScriptedEmitter {
    payloads: Vec<Payload>,
    fired: bool,
}

impl ScriptedEmitter {
    pub fn new(payloads: Vec<Payload>) -> Self {
        Self {
            payloads,
            fired: false,
        }
    }

    /// A batch of `count` numbered greetings, for ordering assertions.
    pub fn numbered_greetings(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|n| Payload::Greeting {
                    text: format!("greeting-{n}"),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl Behavior<TraderState> for ScriptedEmitter {
    fn name(&self) -> &str {
        "scripted-emitter"
    }

    fn is_due(&self, _now: Instant) -> bool {
        !self.fired
    }

    async fn act(
        &mut self,
        context: &mut AgentContext<'_, TraderState>,
    ) -> anyhow::Result<Vec<Message>> {
        self.fired = true;
        Ok(self
            .payloads
            .drain(..)
            .map(|payload| context.message(payload))
            .collect())
    }
}

/// A balance source that never answers within any reasonable deadline.
///
/// Stands in for a hung RPC endpoint; callers are expected to give up via
/// their own timeout long before this resolves.
#[derive(Debug, Default)]
pub struct StalledBalanceSource;

#[async_trait]
impl BalanceSource for StalledBalanceSource {
    async fn balance(
        &self,
        _owner: &Address,
        _token: &Address,
    ) -> Result<TokenAmount, CapabilityError> {
        tokio::time::sleep(std::time::Duration::from_secs(3_600)).await;
        Err(CapabilityError::Failed("stalled collaborator".to_string()))
    }
}

/// A deterministic word source that always hands out the same words.
#[derive(Debug, Clone)]
pub struct ScriptedWordSource {
    words: Vec<String>,
}

impl ScriptedWordSource {
    pub fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

impl WordSource for ScriptedWordSource {
    fn random_words(&self, count: usize) -> Vec<String> {
        self.words.iter().take(count).cloned().collect()
    }
}

/// Polls `seen` until it holds at least `count` messages or `max_polls`
/// ten-millisecond waits have elapsed.
pub async fn wait_for_messages(
    seen: &Arc<Mutex<Vec<Message>>>,
    count: usize,
    max_polls: usize,
) -> usize {
    for _ in 0..max_polls {
        let len = seen.lock().unwrap().len();
        if len >= count {
            return len;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    seen.lock().unwrap().len()
}
