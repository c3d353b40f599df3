//! Engine parameters, owner-tunable at any time.
//!
//! Both parameters are read live at every check: a change applies
//! retroactively to in-flight proposals, not just future ones. A proposal
//! created under one debating period can close early (or stay open longer)
//! after the duration changes, and the quorum that governs an outcome is
//! the one in force at finalize time.

use agora_types::TokenAmount;
use serde::{Deserialize, Serialize};

/// The two tunable engine parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineParams {
    /// Minimum total cast weight (for + against) for an outcome to count
    /// as decided rather than abstained away.
    pub minimum_quorum: TokenAmount,
    /// Length of the debating window, in seconds from proposal creation.
    pub debating_period_secs: u64,
}

impl EngineParams {
    pub fn new(minimum_quorum: TokenAmount, debating_period_secs: u64) -> Self {
        Self {
            minimum_quorum,
            debating_period_secs,
        }
    }
}
