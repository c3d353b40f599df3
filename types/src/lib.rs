//! Fundamental types for the agora governance engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account identifiers, token amounts, proposal identifiers, and
//! timestamps.

pub mod account;
pub mod amount;
pub mod id;
pub mod time;

pub use account::AccountId;
pub use amount::TokenAmount;
pub use id::ProposalId;
pub use time::Timestamp;
