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

use acton_ern::Ern;

use crate::message::{Message, Payload};
use crate::traits::Capabilities;

/// The explicit context handed to behaviors and handlers while they run.
///
/// The context carries everything a unit of work may legitimately touch: the
/// owning agent's identity, a mutable borrow of its model state, and the
/// capability bundle the agent was constructed with. There are no ambient
/// singletons; an agent sees exactly what it was given.
///
/// A context only ever exists inside the owning agent's scheduling loop, so
/// access to the model is single-threaded by construction.
pub struct AgentContext<'a, State> {
    id: &'a Ern,
    /// The agent's mutable model state.
    pub model: &'a mut State,
    capabilities: &'a Capabilities,
}

impl<'a, State> AgentContext<'a, State> {
    pub(crate) fn new(id: &'a Ern, model: &'a mut State, capabilities: &'a Capabilities) -> Self {
        Self {
            id,
            model,
            capabilities,
        }
    }

    /// Returns the identity of the agent this context belongs to.
    #[inline]
    pub fn id(&self) -> &Ern {
        self.id
    }

    /// Returns the capability bundle of the agent.
    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        self.capabilities
    }

    /// Constructs a new outbound [`Message`] with this agent as the sender.
    #[inline]
    pub fn message(&self, payload: Payload) -> Message {
        Message::new(self.id.clone(), payload)
    }
}
