//! Transaction store
//!
//! Append-only table of mint proposals keyed by a monotonically increasing
//! id. Ids start at 0 and are never reused; records are never deleted.

use crate::engine::proposal::MintProposal;
use crate::engine::EngineError;
use serde::{Deserialize, Serialize};

/// Holds all proposals ever allocated
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransactionStore {
    /// Proposals indexed by id
    proposals: Vec<MintProposal>,
}

impl TransactionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            proposals: Vec::new(),
        }
    }

    /// Allocate a new pending proposal and return its id
    pub fn allocate(&mut self, recipient: String, amount: u128) -> u64 {
        let id = self.proposals.len() as u64;
        self.proposals.push(MintProposal::new(id, recipient, amount));
        id
    }

    /// Get a proposal by id
    pub fn get(&self, id: u64) -> Result<&MintProposal, EngineError> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.proposals.get(index))
            .ok_or(EngineError::NotFound(id))
    }

    /// Add an owner to a proposal's confirmer set
    ///
    /// Membership and duplicate checks are the engine's responsibility.
    pub fn record_confirmation(&mut self, id: u64, owner: &str) -> Result<(), EngineError> {
        self.get_mut(id)?.record_confirmation(owner);
        Ok(())
    }

    /// Flip a proposal to its terminal executed state
    pub fn mark_executed(&mut self, id: u64) -> Result<(), EngineError> {
        let proposal = self.get_mut(id)?;
        if proposal.executed {
            return Err(EngineError::AlreadyExecuted(id));
        }
        proposal.mark_executed();
        Ok(())
    }

    /// Number of proposals ever allocated
    pub fn count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Iterate over all proposals in id order
    pub fn iter(&self) -> impl Iterator<Item = &MintProposal> {
        self.proposals.iter()
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut MintProposal, EngineError> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.proposals.get_mut(index))
            .ok_or(EngineError::NotFound(id))
    }
}
