//! Deposit balances held in the shared treasury.
//!
//! Balances are additive across deposits and are the source of vote weight.
//! An account's entry is created on first deposit and never deleted — zero
//! is a valid terminal state after a full withdrawal.

use crate::error::GovernanceError;
use agora_types::{AccountId, TokenAmount};
use std::collections::HashMap;

/// Per-depositor balances of the governed asset held in the treasury.
#[derive(Clone, Debug, Default)]
pub struct Treasury {
    balances: HashMap<AccountId, TokenAmount>,
}

impl Treasury {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Current deposited balance of `account`. Zero if never deposited.
    pub fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Add `amount` to an account's balance.
    pub fn credit(&mut self, account: &AccountId, amount: TokenAmount) {
        let entry = self
            .balances
            .entry(account.clone())
            .or_insert(TokenAmount::ZERO);
        *entry = entry.saturating_add(amount);
    }

    /// Remove `amount` from an account's balance.
    ///
    /// Fails without mutating if the balance is smaller than `amount`.
    pub fn debit(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), GovernanceError> {
        let available = self.balance_of(account);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(GovernanceError::InsufficientBalance {
                    needed: amount.raw(),
                    available: available.raw(),
                })?;
        self.balances.insert(account.clone(), remaining);
        Ok(())
    }
}
