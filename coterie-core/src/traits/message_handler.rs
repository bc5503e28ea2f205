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

use crate::common::AgentContext;
use crate::message::Message;

/// A unit of reactive work dispatched against inbound messages.
///
/// Handlers are registered while the agent is idle and evaluated in
/// registration order for every drained message. Handlers are independent
/// reactions, not a priority chain: **all** handlers whose [`matches`]
/// predicate holds are invoked for a message, and an `Err` from one handler
/// is logged without preventing the remaining handlers from running.
///
/// Each message is handled at most once — after the dispatch pass it is
/// considered processed regardless of handler failures, so a poisoned message
/// cannot cause a reprocessing loop.
///
/// [`matches`]: MessageHandler::matches
#[async_trait]
pub trait MessageHandler<State>: Send
where
    State: Send,
{
    /// A short stable name for this handler, used in log context.
    fn name(&self) -> &str;

    /// Returns `true` if this handler wants to react to `message`.
    ///
    /// Typically a match on [`PayloadKind`](crate::message::PayloadKind);
    /// must be free of side effects.
    fn matches(&self, message: &Message) -> bool;

    /// Consumes the message, possibly mutating agent state through `context`
    /// and returning zero or more reply messages to send.
    async fn handle(
        &mut self,
        message: &Message,
        context: &mut AgentContext<'_, State>,
    ) -> anyhow::Result<Vec<Message>>;
}
