//! Threshold-approval engine
//!
//! Implements M-of-N approval for privileged mint operations: a fixed set of
//! owners proposes and confirms transactions, and a proposal executes exactly
//! once, in the same call that brings its confirmation count to the required
//! threshold.
//!
//! # Example
//!
//! ```
//! use multisig_mint::engine::{ApprovalEngine, OwnerRegistry};
//! use multisig_mint::ledger::TokenMetadata;
//!
//! let registry = OwnerRegistry::new(
//!     vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
//!     2,
//! ).unwrap();
//! let metadata = TokenMetadata::new("Goofy Goober".to_string(), "GG".to_string(), 18).unwrap();
//! let mut engine = ApprovalEngine::new(registry, metadata);
//!
//! let id = engine.propose("alice", "dave", 100).unwrap();
//! engine.confirm("alice", id).unwrap();
//! engine.confirm("bob", id).unwrap();
//!
//! assert!(engine.get_transaction(id).unwrap().executed);
//! assert_eq!(engine.balance_of("dave"), 100);
//! ```

pub mod engine;
pub mod proposal;
pub mod registry;
pub mod store;

pub use engine::{ApprovalEngine, ConfirmOutcome};
pub use proposal::{MintProposal, ProposalSummary};
pub use registry::OwnerRegistry;
pub use store::TransactionStore;

use crate::ledger::LedgerError;
use thiserror::Error;

/// Errors related to proposal and confirmation handling
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Not an owner: {0}")]
    Unauthorized(String),
    #[error("Invalid amount: amount must be greater than 0")]
    InvalidAmount,
    #[error("Transaction not found: {0}")]
    NotFound(u64),
    #[error("Transaction already executed: {0}")]
    AlreadyExecuted(u64),
    #[error("Already confirmed by this owner: {0}")]
    DuplicateConfirmation(String),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
