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

use std::collections::VecDeque;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::time::Duration;

use acton_ern::Ern;
use tokio::sync::mpsc::channel;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

pub use idle::Idle;

use crate::agent::AgentConfig;
use crate::common::{AgentHandle, AgentRuntime, AgentSender, InboxReceiver, OutboxReceiver};
use crate::message::Message;
use crate::traits::{Behavior, Capabilities, MessageHandler};

mod idle;
pub mod running;

/// An agent and its scheduling state machine.
///
/// A `ManagedAgent` owns everything an agent is made of: its
/// identity, its inbox and outbox, an ordered sequence of behaviors, an
/// ordered sequence of handlers, and the running flag (expressed as a
/// cancellation token). Exactly one task ever executes an agent's scheduling
/// loop, because `start` consumes the agent value into that task.
///
/// The `Phase` type parameter is the lifecycle state ([`Idle`] or
/// [`running::Running`]); `State` is the user-defined model the agent's
/// behaviors and handlers may read and mutate.
pub struct ManagedAgent<Phase, State: Default + Send + Debug + 'static> {
    pub(crate) handle: AgentHandle,

    pub(crate) id: Ern,

    /// The user-defined model state owned by this agent.
    pub model: State,

    pub(crate) runtime: AgentRuntime,

    pub(crate) capabilities: Capabilities,

    pub(crate) inbox: InboxReceiver,

    /// Sender half of the outbox; the flush step enqueues here.
    pub(crate) outbox: AgentSender,

    /// Receiver half of the outbox, handed to the bus forwarder at start.
    pub(crate) outbox_receiver: Option<OutboxReceiver>,

    /// Proactive work, executed in registration order when due.
    pub(crate) behaviors: Vec<Box<dyn Behavior<State>>>,

    /// Reactive work, evaluated in registration order for every message.
    pub(crate) handlers: Vec<Box<dyn MessageHandler<State>>>,

    /// Messages produced during the current cycle, awaiting the flush step.
    pub(crate) pending: VecDeque<Message>,

    pub(crate) tick_interval: Duration,

    pub(crate) max_messages_per_cycle: usize,

    pub(crate) tracker: TaskTracker,

    pub(crate) cancellation_token: CancellationToken,

    _phase: std::marker::PhantomData<Phase>,
}

impl<State: Default + Send + Debug + 'static> ManagedAgent<Idle, State> {
    /// Creates an idle agent wired into `runtime` per `config`.
    pub(crate) fn new(runtime: &AgentRuntime, config: AgentConfig) -> Self {
        let limits = &runtime.config().limits;
        let timing = &runtime.config().timing;
        let (inbox_sender, inbox) = channel(limits.inbox_capacity);
        let (outbox, outbox_receiver) = channel(limits.outbox_capacity);
        let tracker = TaskTracker::new();
        // Closed up front so wait() resolves once the loop task (spawned
        // later) finishes.
        tracker.close();
        let cancellation_token = CancellationToken::new();
        let handle = AgentHandle::new(
            config.ern.clone(),
            inbox_sender,
            tracker.clone(),
            cancellation_token.clone(),
        );
        Self {
            handle,
            id: config.ern,
            model: State::default(),
            runtime: runtime.clone(),
            capabilities: config.capabilities,
            inbox,
            outbox,
            outbox_receiver: Some(outbox_receiver),
            behaviors: Vec::new(),
            handlers: Vec::new(),
            pending: VecDeque::new(),
            tick_interval: config.tick_interval.unwrap_or_else(|| timing.tick_interval()),
            max_messages_per_cycle: config
                .max_messages_per_cycle
                .unwrap_or(limits.max_messages_per_cycle),
            tracker,
            cancellation_token,
            _phase: std::marker::PhantomData,
        }
    }
}

impl<Phase, State: Default + Send + Debug + 'static> ManagedAgent<Phase, State> {
    /// Returns a reference to the agent's handle.
    #[inline]
    pub fn handle(&self) -> &AgentHandle {
        &self.handle
    }

    /// Returns the agent's unique identifier.
    #[inline]
    pub fn id(&self) -> &Ern {
        &self.id
    }

    /// Returns the agent's root name.
    #[inline]
    pub fn name(&self) -> &str {
        self.id.root.as_str()
    }
}

impl<Phase, State: Default + Send + Debug + 'static> Debug for ManagedAgent<Phase, State> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedAgent")
            .field("id", &self.id)
            .field("behaviors", &self.behaviors.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
