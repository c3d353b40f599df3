//! Collaborator traits for the fungible asset and for action invocation.

use crate::LedgerError;
use agora_types::{AccountId, TokenAmount};

/// The external fungible-asset ledger the treasury is denominated in.
///
/// The treasury side of each transfer is implicit: implementations know
/// which account holds the engine's pooled deposits. Both transfer
/// directions either fully apply or fully fail.
pub trait TokenLedger {
    /// Pull `amount` from `from` into the treasury account.
    fn transfer_into(&self, from: &AccountId, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Release `amount` from the treasury account back to `to`.
    fn transfer_out(&self, to: &AccountId, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Current external balance of `account`.
    fn balance_of(&self, account: &AccountId) -> TokenAmount;
}

/// The capability that invokes a passed proposal's encoded action.
///
/// The payload is opaque to the engine: only the dispatcher (and ultimately
/// the target) interprets it. A dispatch observes success or failure
/// synchronously, within the finalizing operation.
pub trait ActionDispatcher {
    fn dispatch(&self, target: &AccountId, action: &[u8]) -> Result<(), LedgerError>;
}
