//! Mint proposals
//!
//! A proposal represents one requested mint awaiting owner confirmations.
//! Proposals are never deleted; an executed proposal remains queryable as an
//! audit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed mint and its confirmation state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintProposal {
    /// Unique id, assigned in strictly increasing order starting at 0
    pub id: u64,
    /// Account to credit on execution
    pub recipient: String,
    /// Amount to mint
    pub amount: u128,
    /// Owners who have confirmed, in confirmation order
    confirmations: Vec<String>,
    /// Whether the proposal has executed (monotonic false -> true)
    pub executed: bool,
    /// When the proposal was submitted
    pub submitted_at: DateTime<Utc>,
    /// When the proposal executed, if it has
    pub executed_at: Option<DateTime<Utc>>,
}

impl MintProposal {
    /// Create a new pending proposal with no confirmations
    pub fn new(id: u64, recipient: String, amount: u128) -> Self {
        Self {
            id,
            recipient,
            amount,
            confirmations: Vec::new(),
            executed: false,
            submitted_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Check whether an owner has confirmed this proposal
    pub fn is_confirmed_by(&self, owner: &str) -> bool {
        self.confirmations.iter().any(|c| c == owner)
    }

    /// Number of distinct confirmations collected
    pub fn confirmation_count(&self) -> u32 {
        self.confirmations.len() as u32
    }

    /// Owners who have confirmed, in confirmation order
    pub fn confirmers(&self) -> &[String] {
        &self.confirmations
    }

    /// Record an owner's confirmation
    ///
    /// The caller is responsible for membership and duplicate checks; this
    /// only appends.
    pub(crate) fn record_confirmation(&mut self, owner: &str) {
        self.confirmations.push(owner.to_string());
    }

    /// Flip the proposal to its terminal executed state
    pub(crate) fn mark_executed(&mut self) {
        self.executed = true;
        self.executed_at = Some(Utc::now());
    }

    /// Produce the caller-facing view of this proposal
    pub fn summary(&self) -> ProposalSummary {
        ProposalSummary {
            id: self.id,
            recipient: self.recipient.clone(),
            amount: self.amount,
            executed: self.executed,
            confirmation_count: self.confirmation_count(),
        }
    }
}

/// Caller-facing view of a proposal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub id: u64,
    pub recipient: String,
    pub amount: u128,
    pub executed: bool,
    pub confirmation_count: u32,
}
