//! Token ledger
//!
//! Account balances for the minted token. The ledger has a single privileged
//! mutator, `Token::credit`, which is crate-private: the approval engine is
//! the only component allowed to move balances, and it does so exactly once
//! per executed proposal.

pub mod token;

pub use token::{LedgerError, MintEvent, Token, TokenMetadata};
