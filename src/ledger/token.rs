//! Fungible token ledger
//!
//! Holds account balances mutated exclusively through engine-driven mints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Ledger-related errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Balance overflow: crediting {amount} to {recipient} exceeds representable range")]
    Overflow { recipient: String, amount: u128 },
    #[error("Invalid name: must be 1-50 characters")]
    InvalidName,
    #[error("Invalid symbol: must be 1-10 characters")]
    InvalidSymbol,
    #[error("Invalid decimals: must be 0-18")]
    InvalidDecimals,
}

/// Token metadata (immutable after creation)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenMetadata {
    /// Token name (e.g., "Goofy Goober")
    pub name: String,
    /// Token symbol (e.g., "GG")
    pub symbol: String,
    /// Decimal places (usually 18)
    pub decimals: u8,
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(name: String, symbol: String, decimals: u8) -> Result<Self, LedgerError> {
        if name.is_empty() || name.len() > 50 {
            return Err(LedgerError::InvalidName);
        }

        if symbol.is_empty() || symbol.len() > 10 {
            return Err(LedgerError::InvalidSymbol);
        }

        if decimals > 18 {
            return Err(LedgerError::InvalidDecimals);
        }

        Ok(Self {
            name,
            symbol,
            decimals,
        })
    }
}

/// Mint event (emitted when an approved proposal credits the ledger)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintEvent {
    pub recipient: String,
    pub amount: u128,
    pub timestamp: DateTime<Utc>,
}

/// A fungible token whose supply grows only through approved mints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Token metadata
    pub metadata: TokenMetadata,
    /// Balances: account -> amount
    balances: HashMap<String, u128>,
    /// Total amount minted so far
    total_supply: u128,
    /// Mint history (last 100)
    mint_history: Vec<MintEvent>,
}

impl Token {
    /// Create a new token with zero supply
    pub fn new(metadata: TokenMetadata) -> Self {
        Self {
            metadata,
            balances: HashMap::new(),
            total_supply: 0,
            mint_history: Vec::new(),
        }
    }

    /// Get token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Get decimal places
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Get total supply
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: &str) -> u128 {
        *self.balances.get(account).unwrap_or(&0)
    }

    /// Get all holders with non-zero balances
    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    /// Get holder count
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    /// Get recent mint events
    pub fn mint_history(&self) -> &[MintEvent] {
        &self.mint_history
    }

    /// Credit newly minted tokens to an account
    ///
    /// Only callable from within the crate: the approval engine is the sole
    /// caller, as one leg of proposal execution. Both the recipient balance
    /// and the total supply are updated with checked arithmetic; on overflow
    /// nothing is mutated.
    pub(crate) fn credit(
        &mut self,
        recipient: &str,
        amount: u128,
    ) -> Result<MintEvent, LedgerError> {
        let overflow = || LedgerError::Overflow {
            recipient: recipient.to_string(),
            amount,
        };

        // Compute both updated values before touching state
        let new_balance = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or_else(overflow)?;
        let new_supply = self.total_supply.checked_add(amount).ok_or_else(overflow)?;

        self.balances.insert(recipient.to_string(), new_balance);
        self.total_supply = new_supply;

        let event = MintEvent {
            recipient: recipient.to_string(),
            amount,
            timestamp: Utc::now(),
        };

        // Store event (keep last 100)
        self.mint_history.push(event.clone());
        if self.mint_history.len() > 100 {
            self.mint_history.remove(0);
        }

        Ok(event)
    }
}
