use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("unknown action target: {0}")]
    UnknownTarget(String),

    #[error("invalid action payload: {0}")]
    InvalidAction(String),

    #[error("ledger rejected the operation: {0}")]
    Rejected(String),
}
