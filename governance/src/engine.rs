//! The governance engine — ties roles, treasury, proposals and ballots
//! together behind the five public operations.
//!
//! Every operation executes to completion with no interleaving, matching
//! the host substrate where each call is an atomic transaction. Failures
//! are precondition-style rejections with no partial state mutation; the
//! one exception is finalization, which commits `finished = true` even when
//! the proposal's action dispatch fails (the failure is absorbed into the
//! recorded outcome).

use crate::access::Roles;
use crate::ballot::{BallotBox, Tally};
use crate::error::GovernanceError;
use crate::params::EngineParams;
use crate::proposal::{Proposal, ProposalBook, ProposalOutcome, ProposalState};
use crate::treasury::Treasury;
use agora_ledger::{ActionDispatcher, TokenLedger};
use agora_types::{AccountId, ProposalId, Timestamp, TokenAmount};

/// The proposal lifecycle and treasury accounting engine.
///
/// Generic over its two external collaborators: the fungible-asset ledger
/// deposits move through, and the dispatcher that invokes passed proposals'
/// actions. Time enters as an explicit `now` argument on every
/// time-sensitive operation.
pub struct DaoEngine<L, D> {
    roles: Roles,
    params: EngineParams,
    token: L,
    actions: D,
    treasury: Treasury,
    proposals: ProposalBook,
    ballots: BallotBox,
}

impl<L: TokenLedger, D: ActionDispatcher> DaoEngine<L, D> {
    pub fn new(
        owner: AccountId,
        chairperson: AccountId,
        token: L,
        actions: D,
        params: EngineParams,
    ) -> Self {
        Self {
            roles: Roles::new(owner, chairperson),
            params,
            token,
            actions,
            treasury: Treasury::new(),
            proposals: ProposalBook::new(),
            ballots: BallotBox::new(),
        }
    }

    /// Pull `amount` from the caller into the treasury.
    ///
    /// A zero amount is accepted: it moves nothing and credits nothing.
    pub fn deposit(
        &mut self,
        caller: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), GovernanceError> {
        self.token.transfer_into(caller, amount)?;
        self.treasury.credit(caller, amount);
        tracing::debug!(depositor = %caller, %amount, "deposit received");
        Ok(())
    }

    /// Release `amount` of the caller's deposit back to them.
    ///
    /// Blocked while the most recent proposal the caller voted on is still
    /// in debate, so a voter cannot pull their stake out mid-vote.
    pub fn withdraw(
        &mut self,
        caller: &AccountId,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if amount.is_zero() {
            return Err(GovernanceError::ZeroAmount);
        }
        let balance = self.treasury.balance_of(caller);
        if balance.is_zero() {
            return Err(GovernanceError::NoDeposit);
        }
        if amount > balance {
            return Err(GovernanceError::InsufficientBalance {
                needed: amount.raw(),
                available: balance.raw(),
            });
        }
        if let Some(id) = self.ballots.last_voted(caller) {
            // The pointer always references an allocated proposal; the lock
            // is recomputed here under the live debating period.
            if let Some(p) = self.proposals.get(id) {
                if p.debate_open(self.params.debating_period_secs, now) {
                    return Err(GovernanceError::WithdrawLocked(id));
                }
            }
        }
        self.token.transfer_out(caller, amount)?;
        self.treasury.debit(caller, amount)?;
        tracing::debug!(depositor = %caller, %amount, "withdrawal released");
        Ok(())
    }

    /// Submit a proposal. Chairperson only.
    pub fn add_proposal(
        &mut self,
        caller: &AccountId,
        action: Vec<u8>,
        target: AccountId,
        description: impl Into<String>,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        self.roles.ensure_chairperson(caller)?;
        let id = self.proposals.add(action, target, description.into(), now);
        self.ballots.open(id);
        tracing::info!(%id, created_at = %now, "proposal submitted");
        Ok(id)
    }

    /// Cast a ballot weighted by the caller's current deposit.
    ///
    /// The recorded weight is the balance at this moment; later deposits or
    /// withdrawals never reach back into the tally.
    pub fn vote(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let weight = self.treasury.balance_of(caller);
        if weight.is_zero() {
            return Err(GovernanceError::NoTokens);
        }
        // An unknown id and a closed debating window are reported alike:
        // from the voter's seat the proposal is simply not open for votes.
        let open = self
            .proposals
            .get(id)
            .is_some_and(|p| p.debate_open(self.params.debating_period_secs, now));
        if !open {
            return Err(GovernanceError::ProposalNotActive(id));
        }
        self.ballots.record_vote(id, caller, support, weight)?;
        tracing::debug!(voter = %caller, %id, support, %weight, "ballot recorded");
        Ok(())
    }

    /// Finalize a proposal once its debating window has elapsed. Open to
    /// any caller.
    ///
    /// The outcome is accepted iff total cast weight reaches the quorum and
    /// strictly more weight is for than against (a tie loses). An accepted
    /// proposal's action is dispatched against its target; if the dispatch
    /// fails, the outcome is recorded as not accepted but finalization
    /// still succeeds. Either way the proposal terminates: a second call
    /// is refused.
    pub fn finish_proposal(
        &mut self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalOutcome, GovernanceError> {
        let (target, action) = match self.proposals.get(id) {
            None => return Err(GovernanceError::ProposalNotFound(id)),
            Some(p) => {
                if p.debate_open(self.params.debating_period_secs, now) {
                    return Err(GovernanceError::DebatingPeriodNotOver(id));
                }
                if p.finished {
                    return Err(GovernanceError::AlreadyFinished(id));
                }
                (p.target.clone(), p.action.clone())
            }
        };

        let tally = self.ballots.tally(id);
        let total = tally.total();
        let mut accepted =
            total >= self.params.minimum_quorum && tally.for_weight > tally.against_weight;

        if accepted {
            if let Err(err) = self.actions.dispatch(&target, &action) {
                tracing::warn!(%id, %err, "proposal action failed; outcome recorded as rejected");
                accepted = false;
            }
        }

        if let Some(p) = self.proposals.get_mut(id) {
            p.finished = true;
        }

        let outcome = ProposalOutcome {
            proposal_id: id,
            for_weight: tally.for_weight,
            against_weight: tally.against_weight,
            total_weight: total,
            accepted,
        };
        tracing::info!(
            %id,
            for_weight = %outcome.for_weight,
            against_weight = %outcome.against_weight,
            total_weight = %outcome.total_weight,
            accepted = outcome.accepted,
            "proposal finished"
        );
        Ok(outcome)
    }

    /// Retune the quorum threshold. Owner only; applies to every later
    /// check, including proposals already in flight.
    pub fn set_minimum_quorum(
        &mut self,
        caller: &AccountId,
        value: TokenAmount,
    ) -> Result<(), GovernanceError> {
        self.roles.ensure_owner(caller)?;
        self.params.minimum_quorum = value;
        tracing::info!(minimum_quorum = %value, "minimum quorum changed");
        Ok(())
    }

    /// Retune the debating period. Owner only; windows of in-flight
    /// proposals move with it.
    pub fn set_debating_period(
        &mut self,
        caller: &AccountId,
        secs: u64,
    ) -> Result<(), GovernanceError> {
        self.roles.ensure_owner(caller)?;
        self.params.debating_period_secs = secs;
        tracing::info!(debating_period_secs = secs, "debating period changed");
        Ok(())
    }

    pub fn minimum_quorum(&self) -> TokenAmount {
        self.params.minimum_quorum
    }

    pub fn debating_period_secs(&self) -> u64 {
        self.params.debating_period_secs
    }

    /// The caller-visible deposited balance of `account`.
    pub fn deposit_of(&self, account: &AccountId) -> TokenAmount {
        self.treasury.balance_of(account)
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.count()
    }

    pub fn proposal_state(&self, id: ProposalId, now: Timestamp) -> Option<ProposalState> {
        self.proposals
            .get(id)
            .map(|p| p.state(self.params.debating_period_secs, now))
    }

    pub fn tally(&self, id: ProposalId) -> Tally {
        self.ballots.tally(id)
    }

    pub fn has_voted(&self, id: ProposalId, account: &AccountId) -> bool {
        self.ballots.has_voted(id, account)
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_nullables::NullToken;

    const QUORUM: u128 = 5_000;
    const DEBATE_SECS: u64 = 600;

    fn acct(name: &str) -> AccountId {
        AccountId::new(name)
    }

    fn amt(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    fn setup() -> (DaoEngine<NullToken, NullToken>, NullToken) {
        let token = NullToken::new(acct("token"), acct("dao"));
        token.mint(&acct("alice"), amt(QUORUM * 2));
        let engine = DaoEngine::new(
            acct("owner"),
            acct("chair"),
            token.clone(),
            token.clone(),
            EngineParams::new(amt(QUORUM), DEBATE_SECS),
        );
        (engine, token)
    }

    #[test]
    fn deposit_moves_tokens_and_credits_balance() {
        let (mut engine, token) = setup();
        engine.deposit(&acct("alice"), amt(5_000)).unwrap();

        assert_eq!(engine.deposit_of(&acct("alice")), amt(5_000));
        assert_eq!(token.balance_of(&acct("alice")), amt(5_000));
        assert_eq!(token.balance_of(&acct("dao")), amt(5_000));
    }

    #[test]
    fn deposit_exceeding_external_balance_fails_atomically() {
        let (mut engine, token) = setup();
        let err = engine.deposit(&acct("alice"), amt(QUORUM * 3)).unwrap_err();

        assert!(matches!(err, GovernanceError::Ledger(_)));
        assert_eq!(engine.deposit_of(&acct("alice")), TokenAmount::ZERO);
        assert_eq!(token.balance_of(&acct("alice")), amt(QUORUM * 2));
    }

    #[test]
    fn only_chairperson_submits_proposals() {
        let (mut engine, _) = setup();
        let err = engine
            .add_proposal(
                &acct("alice"),
                vec![],
                acct("token"),
                "nope",
                Timestamp::new(0),
            )
            .unwrap_err();
        assert!(matches!(err, GovernanceError::NotChairperson));

        let id = engine
            .add_proposal(
                &acct("chair"),
                vec![],
                acct("token"),
                "fine",
                Timestamp::new(0),
            )
            .unwrap();
        assert_eq!(id, ProposalId::FIRST);
        assert_eq!(engine.proposal_count(), 1);
    }

    #[test]
    fn setters_are_owner_gated_and_live() {
        let (mut engine, _) = setup();

        assert!(matches!(
            engine.set_minimum_quorum(&acct("chair"), amt(1)),
            Err(GovernanceError::NotOwner)
        ));
        assert!(matches!(
            engine.set_debating_period(&acct("alice"), 1),
            Err(GovernanceError::NotOwner)
        ));

        engine.set_minimum_quorum(&acct("owner"), amt(9_000)).unwrap();
        engine.set_debating_period(&acct("owner"), 42).unwrap();
        assert_eq!(engine.minimum_quorum(), amt(9_000));
        assert_eq!(engine.debating_period_secs(), 42);
    }

    #[test]
    fn vote_requires_deposited_tokens() {
        let (mut engine, _) = setup();
        engine
            .add_proposal(&acct("chair"), vec![], acct("token"), "p", Timestamp::new(0))
            .unwrap();

        let err = engine
            .vote(&acct("alice"), ProposalId::FIRST, true, Timestamp::new(1))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::NoTokens));
    }

    #[test]
    fn finish_of_unknown_proposal_is_not_found() {
        let (mut engine, _) = setup();
        let err = engine
            .finish_proposal(ProposalId::new(3), Timestamp::new(10_000))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::ProposalNotFound(id) if id == ProposalId::new(3)));
    }
}
