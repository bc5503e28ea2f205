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

use async_trait::async_trait;
use coterie_core::prelude::{AgentContext, Message, MessageHandler, Payload, PayloadKind};
use tracing::info;

use crate::model::TraderState;

const REPLY_TEXT: &str = "Hello back!";

/// Acknowledges conversational messages with a fixed greeting reply.
///
/// Matches [`Payload::Greeting`] and [`Payload::RandomWords`] but deliberately
/// not [`Payload::GreetingAck`] — two agents wired to each other would
/// otherwise acknowledge acknowledgements forever.
#[derive(Debug, Default)]
pub struct GreetingHandler;

impl GreetingHandler {
    /// Creates the handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageHandler<TraderState> for GreetingHandler {
    fn name(&self) -> &str {
        "greeting"
    }

    fn matches(&self, message: &Message) -> bool {
        matches!(
            message.payload().kind(),
            PayloadKind::Greeting | PayloadKind::RandomWords
        )
    }

    async fn handle(
        &mut self,
        message: &Message,
        context: &mut AgentContext<'_, TraderState>,
    ) -> anyhow::Result<Vec<Message>> {
        context.model.greetings_received += 1;
        info!(
            agent = %context.id(),
            from = %message.sender(),
            kind = %message.payload().kind(),
            "Greeting received, acknowledging"
        );
        Ok(vec![context.message(Payload::GreetingAck {
            text: REPLY_TEXT.to_string(),
        })])
    }
}
