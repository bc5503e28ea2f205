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

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;

/// An opaque on-chain address (account or token contract).
///
/// The runtime treats addresses as plain strings; validation and checksumming
/// belong to whatever implements the chain-facing capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(pub String);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address(value.to_string())
    }
}

/// A token amount in the token's smallest unit.
pub type TokenAmount = u128;

/// The result of a submitted transfer, as reported by the transfer capability.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// An opaque transaction identifier (e.g. a tx hash).
    pub tx: String,
    /// The address the tokens were drawn from.
    pub from: Address,
    /// The address the tokens were sent to.
    pub to: Address,
    /// The token contract involved.
    pub token: Address,
    /// The amount moved, in the token's smallest unit.
    pub amount: TokenAmount,
}

/// Represents failures of external collaborator calls.
///
/// Capability errors are always recoverable from the runtime's point of view:
/// the invoking behavior or handler logs them and skips the cycle.
#[derive(Debug)]
pub enum CapabilityError {
    /// The agent was constructed without this capability.
    Unavailable {
        /// Name of the missing capability.
        capability: &'static str,
    },
    /// The collaborator failed (network, RPC, contract revert, ...).
    Failed(String),
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityError::Unavailable { capability } => {
                write!(f, "capability '{capability}' not supplied to this agent")
            }
            CapabilityError::Failed(cause) => write!(f, "capability call failed: {cause}"),
        }
    }
}

impl std::error::Error for CapabilityError {}

/// Queries token balances on behalf of an agent.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Returns the balance of `owner` for the token at `token`.
    ///
    /// # Errors
    ///
    /// Any failure is a [`CapabilityError`]; callers treat it as a skipped
    /// cycle, never as fatal.
    async fn balance(&self, owner: &Address, token: &Address)
        -> Result<TokenAmount, CapabilityError>;
}

/// Submits token transfers on behalf of an agent.
#[async_trait]
pub trait TokenTransfer: Send + Sync {
    /// Moves `amount` of `token` to `to`, returning the submission receipt.
    ///
    /// # Errors
    ///
    /// Any failure is a [`CapabilityError`]; callers treat it as a recoverable
    /// action failure.
    async fn transfer(
        &self,
        to: &Address,
        token: &Address,
        amount: TokenAmount,
    ) -> Result<TransferReceipt, CapabilityError>;
}

/// Produces word sequences for demo message payloads.
pub trait WordSource: Send + Sync {
    /// Returns `count` words in source-defined order.
    fn random_words(&self, count: usize) -> Vec<String>;
}

/// The bundle of external collaborators handed to an agent at construction.
///
/// Capabilities are explicit per-agent context rather than process-wide
/// globals; two agents may look at entirely different chains or word lists.
/// The [`Default`] bundle wires inert stubs so agents that never touch a
/// capability need not supply one — calling an unsupplied capability yields
/// [`CapabilityError::Unavailable`], and the stub word source returns nothing.
#[derive(Clone)]
pub struct Capabilities {
    balance: Arc<dyn BalanceSource>,
    transfer: Arc<dyn TokenTransfer>,
    words: Arc<dyn WordSource>,
}

impl Capabilities {
    /// Creates a bundle from explicit collaborators.
    pub fn new(
        balance: Arc<dyn BalanceSource>,
        transfer: Arc<dyn TokenTransfer>,
        words: Arc<dyn WordSource>,
    ) -> Self {
        Self {
            balance,
            transfer,
            words,
        }
    }

    /// Replaces the balance-query capability.
    #[must_use]
    pub fn with_balance(mut self, balance: Arc<dyn BalanceSource>) -> Self {
        self.balance = balance;
        self
    }

    /// Replaces the transfer capability.
    #[must_use]
    pub fn with_transfer(mut self, transfer: Arc<dyn TokenTransfer>) -> Self {
        self.transfer = transfer;
        self
    }

    /// Replaces the word-source capability.
    #[must_use]
    pub fn with_words(mut self, words: Arc<dyn WordSource>) -> Self {
        self.words = words;
        self
    }

    /// Returns the balance-query capability.
    #[inline]
    pub fn balance(&self) -> &dyn BalanceSource {
        self.balance.as_ref()
    }

    /// Returns the transfer capability.
    #[inline]
    pub fn transfer(&self) -> &dyn TokenTransfer {
        self.transfer.as_ref()
    }

    /// Returns the word-source capability.
    #[inline]
    pub fn words(&self) -> &dyn WordSource {
        self.words.as_ref()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        let stub = Arc::new(Unsupplied);
        Self {
            balance: stub.clone(),
            transfer: stub.clone(),
            words: stub,
        }
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

/// Inert stand-in for capabilities an agent was not given.
struct Unsupplied;

#[async_trait]
impl BalanceSource for Unsupplied {
    async fn balance(
        &self,
        _owner: &Address,
        _token: &Address,
    ) -> Result<TokenAmount, CapabilityError> {
        Err(CapabilityError::Unavailable {
            capability: "balance-source",
        })
    }
}

#[async_trait]
impl TokenTransfer for Unsupplied {
    async fn transfer(
        &self,
        _to: &Address,
        _token: &Address,
        _amount: TokenAmount,
    ) -> Result<TransferReceipt, CapabilityError> {
        Err(CapabilityError::Unavailable {
            capability: "token-transfer",
        })
    }
}

impl WordSource for Unsupplied {
    fn random_words(&self, _count: usize) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_bundle_reports_unavailable() {
        let capabilities = Capabilities::default();
        let owner = Address::from("0xowner");
        let token = Address::from("0xtoken");
        let err = capabilities.balance().balance(&owner, &token).await.unwrap_err();
        assert!(matches!(err, CapabilityError::Unavailable { .. }));
        assert!(capabilities.words().random_words(2).is_empty());
    }
}
