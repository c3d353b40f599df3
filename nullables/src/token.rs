//! Nullable token — in-memory fungible-asset ledger for testing.

use agora_ledger::{ActionDispatcher, LedgerError, TokenLedger};
use agora_types::{AccountId, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The calls the nullable token understands as proposal actions.
///
/// Proposal payloads stay opaque to the engine; this is the wire format the
/// *token* decodes when a passed proposal is dispatched against it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TokenCall {
    /// Create `amount` new tokens for `to`, growing the total supply.
    Mint { to: AccountId, amount: TokenAmount },
    /// Move `amount` out of the treasury account to `to`.
    Transfer { to: AccountId, amount: TokenAmount },
}

impl TokenCall {
    /// Serialize into the opaque payload carried by a proposal.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).expect("TokenCall serialization cannot fail")
    }
}

struct TokenState {
    balances: HashMap<AccountId, TokenAmount>,
    total_supply: TokenAmount,
}

/// An in-memory fungible token for testing.
///
/// Cloning returns a second handle onto the same shared state, so a test
/// can hand the engine its ledger and dispatcher collaborators and keep a
/// handle of its own for minting and assertions.
#[derive(Clone)]
pub struct NullToken {
    /// The token's own account id — the only dispatch target it accepts.
    account: AccountId,
    /// The account holding the engine's pooled deposits.
    treasury: AccountId,
    state: Arc<Mutex<TokenState>>,
}

impl NullToken {
    pub fn new(account: AccountId, treasury: AccountId) -> Self {
        Self {
            account,
            treasury,
            state: Arc::new(Mutex::new(TokenState {
                balances: HashMap::new(),
                total_supply: TokenAmount::ZERO,
            })),
        }
    }

    /// The account id proposals must target to reach this token.
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn treasury(&self) -> &AccountId {
        &self.treasury
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&self, to: &AccountId, amount: TokenAmount) {
        let state = &mut *self.state.lock().unwrap();
        let entry = state
            .balances
            .entry(to.clone())
            .or_insert(TokenAmount::ZERO);
        *entry = entry.saturating_add(amount);
        state.total_supply = state.total_supply.saturating_add(amount);
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.state.lock().unwrap().total_supply
    }

    fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let state = &mut *self.state.lock().unwrap();
        let available = state
            .balances
            .get(from)
            .copied()
            .unwrap_or(TokenAmount::ZERO);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientFunds {
                    needed: amount.raw(),
                    available: available.raw(),
                })?;
        state.balances.insert(from.clone(), remaining);
        let entry = state
            .balances
            .entry(to.clone())
            .or_insert(TokenAmount::ZERO);
        *entry = entry.saturating_add(amount);
        Ok(())
    }
}

impl TokenLedger for NullToken {
    fn transfer_into(&self, from: &AccountId, amount: TokenAmount) -> Result<(), LedgerError> {
        self.transfer(from, &self.treasury, amount)
    }

    fn transfer_out(&self, to: &AccountId, amount: TokenAmount) -> Result<(), LedgerError> {
        self.transfer(&self.treasury, to, amount)
    }

    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }
}

impl ActionDispatcher for NullToken {
    fn dispatch(&self, target: &AccountId, action: &[u8]) -> Result<(), LedgerError> {
        if *target != self.account {
            return Err(LedgerError::UnknownTarget(target.to_string()));
        }
        let call: TokenCall = bincode::deserialize(action)
            .map_err(|err| LedgerError::InvalidAction(err.to_string()))?;
        match call {
            TokenCall::Mint { to, amount } => {
                self.mint(&to, amount);
                Ok(())
            }
            // Dispatched actions run on the treasury's behalf, so a
            // transfer spends the treasury's own holdings.
            TokenCall::Transfer { to, amount } => self.transfer(&self.treasury, &to, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn amt(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    fn token() -> NullToken {
        NullToken::new(acct("token"), acct("dao"))
    }

    #[test]
    fn mint_grows_balance_and_supply() {
        let t = token();
        t.mint(&acct("alice"), amt(1_000));
        t.mint(&acct("alice"), amt(500));

        assert_eq!(t.balance_of(&acct("alice")), amt(1_500));
        assert_eq!(t.total_supply(), amt(1_500));
    }

    #[test]
    fn transfers_move_through_the_treasury() {
        let t = token();
        t.mint(&acct("alice"), amt(1_000));

        t.transfer_into(&acct("alice"), amt(600)).unwrap();
        assert_eq!(t.balance_of(&acct("alice")), amt(400));
        assert_eq!(t.balance_of(&acct("dao")), amt(600));

        t.transfer_out(&acct("alice"), amt(600)).unwrap();
        assert_eq!(t.balance_of(&acct("alice")), amt(1_000));
        assert_eq!(t.balance_of(&acct("dao")), TokenAmount::ZERO);
    }

    #[test]
    fn overdraft_fails_without_mutation() {
        let t = token();
        t.mint(&acct("alice"), amt(100));

        let err = t.transfer_into(&acct("alice"), amt(500)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { needed: 500, available: 100 }));
        assert_eq!(t.balance_of(&acct("alice")), amt(100));
    }

    #[test]
    fn dispatch_decodes_and_applies_a_mint() {
        let t = token();
        let action = TokenCall::Mint {
            to: acct("dao"),
            amount: amt(5_000),
        }
        .encode();

        t.dispatch(&acct("token"), &action).unwrap();
        assert_eq!(t.balance_of(&acct("dao")), amt(5_000));
        assert_eq!(t.total_supply(), amt(5_000));
    }

    #[test]
    fn dispatch_transfer_spends_the_treasury() {
        let t = token();
        t.mint(&acct("dao"), amt(1_000));
        let action = TokenCall::Transfer {
            to: acct("alice"),
            amount: amt(400),
        }
        .encode();

        t.dispatch(&acct("token"), &action).unwrap();
        assert_eq!(t.balance_of(&acct("dao")), amt(600));
        assert_eq!(t.balance_of(&acct("alice")), amt(400));
    }

    #[test]
    fn dispatch_rejects_foreign_targets_and_garbage() {
        let t = token();
        let action = TokenCall::Mint {
            to: acct("dao"),
            amount: amt(1),
        }
        .encode();

        assert!(matches!(
            t.dispatch(&acct("someone-else"), &action),
            Err(LedgerError::UnknownTarget(_))
        ));
        assert!(matches!(
            t.dispatch(&acct("token"), &[0xff, 0xff, 0xff]),
            Err(LedgerError::InvalidAction(_))
        ));
    }

    #[test]
    fn clones_share_state() {
        let t = token();
        let handle = t.clone();
        handle.mint(&acct("alice"), amt(42));
        assert_eq!(t.balance_of(&acct("alice")), amt(42));
    }
}
