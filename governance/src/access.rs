//! Privileged identities and the gates they pass.

use crate::error::GovernanceError;
use agora_types::AccountId;
use serde::{Deserialize, Serialize};

/// The two fixed privileged identities, set at construction.
///
/// The owner retunes engine parameters; the chairperson submits proposals.
/// Neither role can be transferred or delegated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roles {
    owner: AccountId,
    chairperson: AccountId,
}

impl Roles {
    pub fn new(owner: AccountId, chairperson: AccountId) -> Self {
        Self { owner, chairperson }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn chairperson(&self) -> &AccountId {
        &self.chairperson
    }

    pub fn ensure_owner(&self, caller: &AccountId) -> Result<(), GovernanceError> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(GovernanceError::NotOwner)
        }
    }

    pub fn ensure_chairperson(&self, caller: &AccountId) -> Result<(), GovernanceError> {
        if *caller == self.chairperson {
            Ok(())
        } else {
            Err(GovernanceError::NotChairperson)
        }
    }
}
