//! Token-weighted treasury governance engine.
//!
//! Stakeholders deposit a fungible asset into a shared treasury, an
//! authorized chairperson submits action proposals, depositors cast votes
//! weighted by their deposited balance during a fixed debating window, and
//! once the window closes anyone may finalize the proposal — executing its
//! encoded action against its target iff quorum and strict majority hold.
//!
//! A depositor's funds stay locked while the most recent proposal they
//! voted on is still in debate, so voters cannot pull their stake out
//! mid-vote to dodge the outcome they weighed in on.
//!
//! The engine is a strictly serialized state machine: every operation runs
//! to completion, and "current time" enters as an explicit argument rather
//! than an ambient global.

pub mod access;
pub mod ballot;
pub mod engine;
pub mod error;
pub mod params;
pub mod proposal;
pub mod treasury;

pub use access::Roles;
pub use ballot::{BallotBox, Tally};
pub use engine::DaoEngine;
pub use error::GovernanceError;
pub use params::EngineParams;
pub use proposal::{Proposal, ProposalBook, ProposalOutcome, ProposalState};
pub use treasury::Treasury;
