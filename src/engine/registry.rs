//! Owner registry
//!
//! The fixed set of identities allowed to propose and confirm mints,
//! together with the signature threshold. Immutable after construction.

use crate::engine::EngineError;
use serde::{Deserialize, Serialize};

/// The owner set and quorum for an approval engine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OwnerRegistry {
    /// Owner identities, in construction order
    owners: Vec<String>,
    /// Minimum distinct confirmations required to execute (M in M-of-N)
    required_signatures: u32,
}

impl OwnerRegistry {
    /// Create a new registry
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the owner list is empty, contains
    /// duplicates, or the threshold is outside `[1, owners.len()]`.
    pub fn new(owners: Vec<String>, required_signatures: u32) -> Result<Self, EngineError> {
        if owners.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "owner list must not be empty".to_string(),
            ));
        }

        // Check for duplicates
        let mut sorted_owners = owners.clone();
        sorted_owners.sort();
        for i in 1..sorted_owners.len() {
            if sorted_owners[i] == sorted_owners[i - 1] {
                return Err(EngineError::InvalidConfiguration(format!(
                    "duplicate owner: {}",
                    sorted_owners[i]
                )));
            }
        }

        if required_signatures == 0 {
            return Err(EngineError::InvalidConfiguration(
                "required signatures must be at least 1".to_string(),
            ));
        }

        if required_signatures as usize > owners.len() {
            return Err(EngineError::InvalidConfiguration(format!(
                "required signatures {} exceeds owner count {}",
                required_signatures,
                owners.len()
            )));
        }

        Ok(Self {
            owners,
            required_signatures,
        })
    }

    /// Check if an identity is an owner
    pub fn is_owner(&self, identity: &str) -> bool {
        self.owners.iter().any(|o| o == identity)
    }

    /// Get the owners in construction order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Get the total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Get the signature threshold (M)
    pub fn required_signatures(&self) -> u32 {
        self.required_signatures
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required_signatures, self.owners.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_owners() -> Vec<String> {
        vec![
            "alice".to_string(),
            "bob".to_string(),
            "carol".to_string(),
        ]
    }

    #[test]
    fn test_registry_creation() {
        let registry = OwnerRegistry::new(sample_owners(), 2).unwrap();

        assert_eq!(registry.owner_count(), 3);
        assert_eq!(registry.required_signatures(), 2);
        assert_eq!(registry.description(), "2-of-3");
        assert_eq!(registry.owners(), &sample_owners()[..]);
    }

    #[test]
    fn test_registry_validation() {
        // Empty owner list
        assert!(matches!(
            OwnerRegistry::new(vec![], 1),
            Err(EngineError::InvalidConfiguration(_))
        ));

        // Zero threshold
        assert!(matches!(
            OwnerRegistry::new(sample_owners(), 0),
            Err(EngineError::InvalidConfiguration(_))
        ));

        // Threshold > owners
        assert!(matches!(
            OwnerRegistry::new(sample_owners(), 4),
            Err(EngineError::InvalidConfiguration(_))
        ));

        // Duplicate owners
        assert!(matches!(
            OwnerRegistry::new(vec!["same".to_string(), "same".to_string()], 1),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_boundary_thresholds() {
        // 1-of-N and N-of-N are both valid
        assert!(OwnerRegistry::new(sample_owners(), 1).is_ok());
        assert!(OwnerRegistry::new(sample_owners(), 3).is_ok());

        // A single-owner 1-of-1 registry is valid
        assert!(OwnerRegistry::new(vec!["solo".to_string()], 1).is_ok());
    }

    #[test]
    fn test_is_owner() {
        let registry = OwnerRegistry::new(sample_owners(), 2).unwrap();

        assert!(registry.is_owner("alice"));
        assert!(registry.is_owner("carol"));
        assert!(!registry.is_owner("mallory"));
    }
}
