//! Nullable collaborators for deterministic testing.
//!
//! The engine's external dependencies — the clock and the fungible-asset
//! ledger/action target — are abstracted behind explicit arguments and the
//! `agora-ledger` traits. This crate provides test-friendly stand-ins that
//! return deterministic values, can be controlled programmatically, and
//! never touch the system clock or any real ledger.
//!
//! Usage: swap real collaborators for nullables in tests.

pub mod clock;
pub mod token;

pub use clock::NullClock;
pub use token::{NullToken, TokenCall};
