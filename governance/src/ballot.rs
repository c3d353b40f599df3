//! Weighted ballots, per-proposal tallies, and the withdrawal lock pointer.

use crate::error::GovernanceError;
use agora_types::{AccountId, ProposalId, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Cumulative weight cast for and against one proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub for_weight: TokenAmount,
    pub against_weight: TokenAmount,
}

impl Tally {
    pub const EMPTY: Self = Self {
        for_weight: TokenAmount::ZERO,
        against_weight: TokenAmount::ZERO,
    };

    /// Total cast weight, the quantity measured against the quorum.
    pub fn total(&self) -> TokenAmount {
        self.for_weight.saturating_add(self.against_weight)
    }

    fn record(&mut self, support: bool, weight: TokenAmount) {
        if support {
            self.for_weight = self.for_weight.saturating_add(weight);
        } else {
            self.against_weight = self.against_weight.saturating_add(weight);
        }
    }
}

/// Records ballots: who voted on what, with how much weight, and which
/// proposal each depositor participated in last.
///
/// A ballot's weight is fixed at the moment it is cast; later balance
/// changes never reach back into a tally. An account votes at most once
/// per proposal, ever.
#[derive(Clone, Debug, Default)]
pub struct BallotBox {
    tallies: HashMap<ProposalId, Tally>,
    voters: HashMap<ProposalId, HashSet<AccountId>>,
    /// Per depositor: the latest proposal they participated in. Withdrawal
    /// stays blocked while this proposal's debating window is open; the
    /// window itself is re-checked against live time at every withdrawal.
    last_voted: HashMap<AccountId, ProposalId>,
}

impl BallotBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-initialize the tally for a freshly created proposal.
    pub fn open(&mut self, id: ProposalId) {
        self.tallies.entry(id).or_insert(Tally::EMPTY);
        self.voters.entry(id).or_default();
    }

    /// Record one ballot of `weight` on proposal `id`.
    ///
    /// Fails with `AlreadyVoted` (and changes nothing) if `voter` has ever
    /// voted on this proposal. On success the voter's lock pointer advances
    /// to `id` if `id` is later than the current pointer; the lock is never
    /// extended backward by a vote on an earlier proposal.
    pub fn record_vote(
        &mut self,
        id: ProposalId,
        voter: &AccountId,
        support: bool,
        weight: TokenAmount,
    ) -> Result<(), GovernanceError> {
        let voted = self.voters.entry(id).or_default();
        if !voted.insert(voter.clone()) {
            return Err(GovernanceError::AlreadyVoted(id));
        }
        self.tallies
            .entry(id)
            .or_insert(Tally::EMPTY)
            .record(support, weight);
        self.last_voted
            .entry(voter.clone())
            .and_modify(|latest| {
                if id > *latest {
                    *latest = id;
                }
            })
            .or_insert(id);
        Ok(())
    }

    pub fn has_voted(&self, id: ProposalId, voter: &AccountId) -> bool {
        self.voters
            .get(&id)
            .is_some_and(|voted| voted.contains(voter))
    }

    /// The tally for `id`. Empty for proposals nobody voted on (or unknown
    /// ids — the caller decides whether the proposal exists).
    pub fn tally(&self, id: ProposalId) -> Tally {
        self.tallies.get(&id).copied().unwrap_or(Tally::EMPTY)
    }

    /// The voter's withdrawal lock pointer, if they ever voted.
    pub fn last_voted(&self, voter: &AccountId) -> Option<ProposalId> {
        self.last_voted.get(voter).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn amt(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    fn pid(raw: u64) -> ProposalId {
        ProposalId::new(raw)
    }

    #[test]
    fn open_zero_initializes_tally() {
        let mut bb = BallotBox::new();
        bb.open(pid(1));
        assert_eq!(bb.tally(pid(1)), Tally::EMPTY);
    }

    #[test]
    fn weights_accumulate_per_side() {
        let mut bb = BallotBox::new();
        bb.open(pid(1));
        bb.record_vote(pid(1), &voter("alice"), true, amt(3_000)).unwrap();
        bb.record_vote(pid(1), &voter("bob"), true, amt(2_000)).unwrap();
        bb.record_vote(pid(1), &voter("carol"), false, amt(1_000)).unwrap();

        let tally = bb.tally(pid(1));
        assert_eq!(tally.for_weight, amt(5_000));
        assert_eq!(tally.against_weight, amt(1_000));
        assert_eq!(tally.total(), amt(6_000));
    }

    #[test]
    fn second_ballot_on_same_proposal_rejected() {
        let mut bb = BallotBox::new();
        bb.open(pid(1));
        bb.record_vote(pid(1), &voter("alice"), true, amt(100)).unwrap();

        // Same support and flipped support both fail; the tally is untouched.
        for support in [true, false] {
            let err = bb
                .record_vote(pid(1), &voter("alice"), support, amt(100))
                .unwrap_err();
            assert!(matches!(err, GovernanceError::AlreadyVoted(id) if id == pid(1)));
        }
        assert_eq!(bb.tally(pid(1)).for_weight, amt(100));
    }

    #[test]
    fn one_voter_many_proposals() {
        let mut bb = BallotBox::new();
        bb.open(pid(1));
        bb.open(pid(2));
        bb.record_vote(pid(1), &voter("alice"), true, amt(100)).unwrap();
        bb.record_vote(pid(2), &voter("alice"), false, amt(100)).unwrap();

        assert!(bb.has_voted(pid(1), &voter("alice")));
        assert!(bb.has_voted(pid(2), &voter("alice")));
        assert_eq!(bb.tally(pid(2)).against_weight, amt(100));
    }

    #[test]
    fn lock_pointer_advances_forward_only() {
        let mut bb = BallotBox::new();
        bb.open(pid(1));
        bb.open(pid(2));
        bb.open(pid(3));
        assert_eq!(bb.last_voted(&voter("alice")), None);

        bb.record_vote(pid(2), &voter("alice"), true, amt(100)).unwrap();
        assert_eq!(bb.last_voted(&voter("alice")), Some(pid(2)));

        // A vote on an earlier proposal never drags the pointer backward.
        bb.record_vote(pid(1), &voter("alice"), true, amt(100)).unwrap();
        assert_eq!(bb.last_voted(&voter("alice")), Some(pid(2)));

        // A vote on a later proposal advances it.
        bb.record_vote(pid(3), &voter("alice"), false, amt(100)).unwrap();
        assert_eq!(bb.last_voted(&voter("alice")), Some(pid(3)));
    }

    #[test]
    fn tally_of_unknown_proposal_is_empty() {
        let bb = BallotBox::new();
        assert_eq!(bb.tally(pid(7)), Tally::EMPTY);
        assert!(!bb.has_voted(pid(7), &voter("alice")));
    }
}
