//! Multisig Mint: a threshold-approval engine for token mints in Rust
//!
//! This crate implements an M-of-N approval state machine for privileged
//! mint operations:
//! - Fixed owner set and signature threshold, validated at construction
//! - Append-only transaction store with monotonically increasing ids
//! - Per-transaction confirmation tracking with duplicate rejection
//! - Exactly-once, exactly-at-threshold execution crediting a token ledger
//! - JSON persistence with atomic writes and backup rotation
//!
//! # Example
//!
//! ```rust
//! use multisig_mint::engine::{ApprovalEngine, OwnerRegistry};
//! use multisig_mint::ledger::TokenMetadata;
//!
//! // Create a 2-of-3 engine
//! let registry = OwnerRegistry::new(
//!     vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
//!     2,
//! ).unwrap();
//! let metadata = TokenMetadata::new("Goofy Goober".to_string(), "GG".to_string(), 18).unwrap();
//! let mut engine = ApprovalEngine::new(registry, metadata);
//!
//! // Submit a mint and collect confirmations
//! let id = engine.propose("alice", "dave", 100).unwrap();
//! engine.confirm("alice", id).unwrap();
//! let outcome = engine.confirm("bob", id).unwrap();
//!
//! assert!(outcome.executed());
//! assert_eq!(engine.balance_of("dave"), 100);
//! ```

pub mod cli;
pub mod engine;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use engine::{
    ApprovalEngine, ConfirmOutcome, EngineError, MintProposal, OwnerRegistry, ProposalSummary,
    TransactionStore,
};
pub use ledger::{LedgerError, MintEvent, Token, TokenMetadata};
pub use storage::{Storage, StorageConfig, StorageError};
