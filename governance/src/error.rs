use agora_ledger::LedgerError;
use agora_types::ProposalId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("caller is not the owner")]
    NotOwner,

    #[error("caller is not the chairperson")]
    NotChairperson,

    #[error("amount should be greater than zero")]
    ZeroAmount,

    #[error("caller has no deposited tokens")]
    NoDeposit,

    #[error("voter has no deposited tokens")]
    NoTokens,

    #[error("amount greater than deposited balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("withdrawal locked while proposal {0} is in debate")]
    WithdrawLocked(ProposalId),

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("proposal {0} is not active")]
    ProposalNotActive(ProposalId),

    #[error("already voted on proposal {0}")]
    AlreadyVoted(ProposalId),

    #[error("debating period is not over for proposal {0}")]
    DebatingPeriodNotOver(ProposalId),

    #[error("proposal {0} is already finished")]
    AlreadyFinished(ProposalId),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
