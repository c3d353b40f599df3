//! Proposal records and their lifecycle.

use agora_types::{AccountId, ProposalId, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An action proposal submitted by the chairperson.
///
/// `finished` is the only field that ever changes after creation; it is set
/// exactly once, by finalization. Records are never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Opaque encoded call, interpreted only by the action target.
    pub action: Vec<u8>,
    /// Where the action is dispatched if the proposal passes.
    pub target: AccountId,
    pub description: String,
    pub created_at: Timestamp,
    pub finished: bool,
}

/// The lifecycle position of a proposal, derived — never stored.
///
/// `Open` accepts votes; `Closable` accepts finalization; `Finished` is
/// terminal. Because the debating period is read live, a parameter change
/// can move a proposal between `Open` and `Closable` in either direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    Open,
    Closable,
    Finished,
}

impl Proposal {
    /// Whether the debating window is still open at `now` under the given
    /// (live) debating period.
    pub fn debate_open(&self, debating_period_secs: u64, now: Timestamp) -> bool {
        !self.created_at.has_elapsed(debating_period_secs, now)
    }

    pub fn state(&self, debating_period_secs: u64, now: Timestamp) -> ProposalState {
        if self.finished {
            ProposalState::Finished
        } else if self.debate_open(debating_period_secs, now) {
            ProposalState::Open
        } else {
            ProposalState::Closable
        }
    }
}

/// The recorded result of finalizing a proposal. Emitted exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalOutcome {
    pub proposal_id: ProposalId,
    pub for_weight: TokenAmount,
    pub against_weight: TokenAmount,
    pub total_weight: TokenAmount,
    /// Quorum reached, strict majority in favor, and the action dispatch
    /// (if attempted) succeeded.
    pub accepted: bool,
}

/// Allocates identifiers and stores proposal records.
#[derive(Clone, Debug)]
pub struct ProposalBook {
    next: ProposalId,
    proposals: BTreeMap<ProposalId, Proposal>,
}

impl ProposalBook {
    pub fn new() -> Self {
        Self {
            next: ProposalId::FIRST,
            proposals: BTreeMap::new(),
        }
    }

    /// Store a new proposal and return its identifier.
    ///
    /// Identifiers start at 1 and increase by one per proposal; the content
    /// of `action` and `target` is not validated.
    pub fn add(
        &mut self,
        action: Vec<u8>,
        target: AccountId,
        description: String,
        now: Timestamp,
    ) -> ProposalId {
        let id = self.next;
        self.next = id.next();
        self.proposals.insert(
            id,
            Proposal {
                id,
                action,
                target,
                description,
                created_at: now,
                finished: false,
            },
        );
        id
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn get_mut(&mut self, id: ProposalId) -> Option<&mut Proposal> {
        self.proposals.get_mut(&id)
    }

    pub fn count(&self) -> u64 {
        self.proposals.len() as u64
    }
}

impl Default for ProposalBook {
    fn default() -> Self {
        Self::new()
    }
}
