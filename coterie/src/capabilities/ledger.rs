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

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use coterie_core::prelude::{
    Address, BalanceSource, CapabilityError, TokenAmount, TokenTransfer, TransferReceipt,
};
use dashmap::DashMap;

/// An in-process token ledger implementing both chain-facing capabilities.
///
/// Balances live in a concurrent map keyed by `(owner, token)`, so one ledger
/// can back several agents at once. Transfers draw from the account the
/// ledger was created for and are atomic per account: a debit either finds
/// sufficient funds or leaves the balance untouched.
#[derive(Debug)]
pub struct InMemoryLedger {
    account: Address,
    balances: DashMap<(Address, Address), TokenAmount>,
    next_tx: AtomicU64,
}

impl InMemoryLedger {
    /// Creates an empty ledger whose transfers draw from `account`.
    pub fn new(account: Address) -> Self {
        Self {
            account,
            balances: DashMap::new(),
            next_tx: AtomicU64::new(1),
        }
    }

    /// Adds `amount` of `token` to `owner`'s balance.
    pub fn credit(&self, owner: &Address, token: &Address, amount: TokenAmount) {
        *self
            .balances
            .entry((owner.clone(), token.clone()))
            .or_insert(0) += amount;
    }

    /// Returns `owner`'s balance of `token`; unknown accounts hold zero.
    pub fn balance_of(&self, owner: &Address, token: &Address) -> TokenAmount {
        self.balances
            .get(&(owner.clone(), token.clone()))
            .map_or(0, |entry| *entry)
    }

    fn next_tx_id(&self) -> String {
        format!("0xtx{:08x}", self.next_tx.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl BalanceSource for InMemoryLedger {
    async fn balance(
        &self,
        owner: &Address,
        token: &Address,
    ) -> Result<TokenAmount, CapabilityError> {
        Ok(self.balance_of(owner, token))
    }
}

#[async_trait]
impl TokenTransfer for InMemoryLedger {
    async fn transfer(
        &self,
        to: &Address,
        token: &Address,
        amount: TokenAmount,
    ) -> Result<TransferReceipt, CapabilityError> {
        {
            // Debit under the sender entry's lock; released before the credit
            // so two entries are never held at once.
            let mut from_balance = self
                .balances
                .entry((self.account.clone(), token.clone()))
                .or_insert(0);
            let remaining = from_balance.checked_sub(amount).ok_or_else(|| {
                CapabilityError::Failed(format!(
                    "insufficient funds: {} holds {} of {}, tried to send {}",
                    self.account, *from_balance, token, amount
                ))
            })?;
            *from_balance = remaining;
        }
        self.credit(to, token, amount);

        Ok(TransferReceipt::new(
            self.next_tx_id(),
            self.account.clone(),
            to.clone(),
            token.clone(),
            amount,
        ))
    }
}
