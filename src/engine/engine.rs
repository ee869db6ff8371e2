//! Approval engine
//!
//! The serialized state machine tying the owner registry, transaction store
//! and token ledger together. Every mutation goes through `&mut self`, so a
//! call is one atomic transition: it either fully applies or fails with no
//! state change. The one deliberate exception is an overflowing credit,
//! which keeps the triggering confirmation so it is not silently dropped.

use crate::engine::proposal::ProposalSummary;
use crate::engine::registry::OwnerRegistry;
use crate::engine::store::TransactionStore;
use crate::engine::EngineError;
use crate::ledger::{MintEvent, Token, TokenMetadata};
use serde::{Deserialize, Serialize};

/// Result of a successful confirmation
#[derive(Clone, Debug)]
pub enum ConfirmOutcome {
    /// Confirmation recorded; the proposal is still short of the threshold
    Confirmed { confirmations: u32, required: u32 },
    /// This confirmation crossed the threshold and the mint executed
    Executed(MintEvent),
}

impl ConfirmOutcome {
    /// Whether this confirmation triggered execution
    pub fn executed(&self) -> bool {
        matches!(self, ConfirmOutcome::Executed(_))
    }
}

/// Threshold-approval engine for token mints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApprovalEngine {
    registry: OwnerRegistry,
    store: TransactionStore,
    token: Token,
}

impl ApprovalEngine {
    /// Create a new engine with no proposals and an empty ledger
    pub fn new(registry: OwnerRegistry, metadata: TokenMetadata) -> Self {
        Self {
            registry,
            store: TransactionStore::new(),
            token: Token::new(metadata),
        }
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Submit a new mint proposal and return its id
    ///
    /// The proposal starts with an empty confirmer set; the proposer must
    /// confirm like any other owner.
    ///
    /// # Errors
    /// `Unauthorized` if the caller is not an owner, `InvalidAmount` if the
    /// amount is zero.
    pub fn propose(
        &mut self,
        caller: &str,
        recipient: &str,
        amount: u128,
    ) -> Result<u64, EngineError> {
        if !self.registry.is_owner(caller) {
            return Err(EngineError::Unauthorized(caller.to_string()));
        }

        if amount == 0 {
            return Err(EngineError::InvalidAmount);
        }

        let id = self.store.allocate(recipient.to_string(), amount);

        log::info!(
            "Mint transaction {} submitted by {}: {} {} to {}",
            id,
            caller,
            amount,
            self.token.symbol(),
            recipient
        );

        Ok(id)
    }

    /// Record an owner's confirmation of a proposal
    ///
    /// If this confirmation brings the count to the threshold, the mint is
    /// applied and the proposal marked executed within the same call. On an
    /// overflowing credit the confirmation is kept and the proposal stays
    /// pending; the threshold is re-evaluated on the next confirmation.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `AlreadyExecuted` for a terminal
    /// proposal, `Unauthorized` for a non-owner, `DuplicateConfirmation` if
    /// this owner already confirmed.
    pub fn confirm(&mut self, caller: &str, id: u64) -> Result<ConfirmOutcome, EngineError> {
        let proposal = self.store.get(id)?;

        if proposal.executed {
            return Err(EngineError::AlreadyExecuted(id));
        }

        if !self.registry.is_owner(caller) {
            return Err(EngineError::Unauthorized(caller.to_string()));
        }

        if proposal.is_confirmed_by(caller) {
            return Err(EngineError::DuplicateConfirmation(caller.to_string()));
        }

        self.store.record_confirmation(id, caller)?;

        let proposal = self.store.get(id)?;
        let confirmations = proposal.confirmation_count();
        let required = self.registry.required_signatures();

        log::info!(
            "Transaction {} confirmed by {} ({}/{})",
            id,
            caller,
            confirmations,
            required
        );

        if confirmations < required {
            return Ok(ConfirmOutcome::Confirmed {
                confirmations,
                required,
            });
        }

        // Threshold crossed: credit then mark executed, as one step. If the
        // credit overflows we return early and the proposal stays pending
        // with the confirmation recorded.
        let recipient = proposal.recipient.clone();
        let amount = proposal.amount;
        let event = self.token.credit(&recipient, amount)?;
        self.store.mark_executed(id)?;

        log::info!(
            "Transaction {} executed: minted {} {} to {}",
            id,
            amount,
            self.token.symbol(),
            recipient
        );

        Ok(ConfirmOutcome::Executed(event))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check whether an owner has confirmed a proposal
    pub fn is_confirmed(&self, id: u64, owner: &str) -> Result<bool, EngineError> {
        Ok(self.store.get(id)?.is_confirmed_by(owner))
    }

    /// Get the caller-facing view of a proposal
    pub fn get_transaction(&self, id: u64) -> Result<ProposalSummary, EngineError> {
        Ok(self.store.get(id)?.summary())
    }

    /// Number of proposals ever submitted
    pub fn transaction_count(&self) -> u64 {
        self.store.count()
    }

    /// All proposals in submission order
    pub fn transactions(&self) -> impl Iterator<Item = ProposalSummary> + '_ {
        self.store.iter().map(|p| p.summary())
    }

    /// Check if an identity is an owner
    pub fn is_owner(&self, identity: &str) -> bool {
        self.registry.is_owner(identity)
    }

    /// The owners in construction order
    pub fn owners(&self) -> &[String] {
        self.registry.owners()
    }

    /// The total owner count
    pub fn owner_count(&self) -> usize {
        self.registry.owner_count()
    }

    /// The signature threshold
    pub fn required_signatures(&self) -> u32 {
        self.registry.required_signatures()
    }

    /// Token balance of an account
    pub fn balance_of(&self, account: &str) -> u128 {
        self.token.balance_of(account)
    }

    /// The token ledger
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The owner registry
    pub fn registry(&self) -> &OwnerRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_engine(required: u32) -> ApprovalEngine {
        let registry = OwnerRegistry::new(
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            required,
        )
        .unwrap();
        let metadata =
            TokenMetadata::new("Test Token".to_string(), "TST".to_string(), 18).unwrap();
        ApprovalEngine::new(registry, metadata)
    }

    #[test]
    fn test_two_of_three_walkthrough() {
        let mut engine = create_test_engine(2);

        // alice proposes mint(x, 100) -> id 0, pending, no confirmers
        let id = engine.propose("alice", "x", 100).unwrap();
        assert_eq!(id, 0);
        let tx = engine.get_transaction(id).unwrap();
        assert!(!tx.executed);
        assert_eq!(tx.confirmation_count, 0);

        // alice confirms: 1 of 2, still pending, no ledger effect
        let outcome = engine.confirm("alice", id).unwrap();
        assert!(!outcome.executed());
        assert_eq!(engine.balance_of("x"), 0);
        assert!(engine.is_confirmed(id, "alice").unwrap());

        // bob confirms: threshold reached, executed, ledger credited
        let outcome = engine.confirm("bob", id).unwrap();
        assert!(outcome.executed());
        let tx = engine.get_transaction(id).unwrap();
        assert!(tx.executed);
        assert_eq!(tx.confirmation_count, 2);
        assert_eq!(engine.balance_of("x"), 100);

        // carol confirms after execution: rejected, no further credit
        let result = engine.confirm("carol", id);
        assert!(matches!(result, Err(EngineError::AlreadyExecuted(0))));
        assert_eq!(engine.balance_of("x"), 100);
        assert_eq!(engine.get_transaction(id).unwrap().confirmation_count, 2);
    }

    #[test]
    fn test_propose_rejects_non_owner() {
        let mut engine = create_test_engine(2);

        let result = engine.propose("mallory", "x", 100);
        assert!(matches!(result, Err(EngineError::Unauthorized(_))));
        assert_eq!(engine.transaction_count(), 0);
    }

    #[test]
    fn test_propose_rejects_zero_amount() {
        let mut engine = create_test_engine(2);

        let result = engine.propose("alice", "x", 0);
        assert!(matches!(result, Err(EngineError::InvalidAmount)));
        assert_eq!(engine.transaction_count(), 0);
    }

    #[test]
    fn test_confirm_rejects_non_owner() {
        let mut engine = create_test_engine(2);
        let id = engine.propose("alice", "x", 100).unwrap();

        let result = engine.confirm("mallory", id);
        assert!(matches!(result, Err(EngineError::Unauthorized(_))));
        assert_eq!(engine.get_transaction(id).unwrap().confirmation_count, 0);
    }

    #[test]
    fn test_confirm_unknown_id() {
        let mut engine = create_test_engine(2);

        let result = engine.confirm("alice", 5);
        assert!(matches!(result, Err(EngineError::NotFound(5))));
    }

    #[test]
    fn test_duplicate_confirmation_leaves_count_unchanged() {
        let mut engine = create_test_engine(2);
        let id = engine.propose("alice", "x", 100).unwrap();

        engine.confirm("alice", id).unwrap();
        let result = engine.confirm("alice", id);
        assert!(matches!(result, Err(EngineError::DuplicateConfirmation(_))));

        let tx = engine.get_transaction(id).unwrap();
        assert_eq!(tx.confirmation_count, 1);
        assert!(!tx.executed);
    }

    #[test]
    fn test_quorum_of_one_executes_on_first_confirmation() {
        let mut engine = create_test_engine(1);
        let id = engine.propose("alice", "x", 100).unwrap();

        // Submission alone does not execute
        assert!(!engine.get_transaction(id).unwrap().executed);

        let outcome = engine.confirm("alice", id).unwrap();
        assert!(outcome.executed());
        assert_eq!(engine.balance_of("x"), 100);
    }

    #[test]
    fn test_executed_is_monotonic() {
        let mut engine = create_test_engine(2);
        let id = engine.propose("alice", "x", 100).unwrap();
        engine.confirm("alice", id).unwrap();
        engine.confirm("bob", id).unwrap();

        for _ in 0..3 {
            assert!(engine.get_transaction(id).unwrap().executed);
        }
    }

    #[test]
    fn test_independent_proposals() {
        let mut engine = create_test_engine(2);

        let id0 = engine.propose("alice", "x", 100).unwrap();
        let id1 = engine.propose("bob", "y", 200).unwrap();
        assert_eq!((id0, id1), (0, 1));
        assert_eq!(engine.transaction_count(), 2);

        // Confirmations on one proposal do not leak into the other
        engine.confirm("alice", id0).unwrap();
        engine.confirm("bob", id0).unwrap();
        assert!(engine.get_transaction(id0).unwrap().executed);
        assert!(!engine.get_transaction(id1).unwrap().executed);
        assert_eq!(engine.get_transaction(id1).unwrap().confirmation_count, 0);
        assert_eq!(engine.balance_of("x"), 100);
        assert_eq!(engine.balance_of("y"), 0);
    }

    #[test]
    fn test_overflow_preserves_confirmation() {
        let mut engine = create_test_engine(2);

        // Fill the recipient close to the representable limit
        let id = engine.propose("alice", "x", u128::MAX - 10).unwrap();
        engine.confirm("alice", id).unwrap();
        engine.confirm("bob", id).unwrap();
        assert_eq!(engine.balance_of("x"), u128::MAX - 10);

        // A second mint to the same recipient overflows on execution
        let id = engine.propose("alice", "x", 100).unwrap();
        engine.confirm("alice", id).unwrap();
        let result = engine.confirm("bob", id);
        assert!(matches!(
            result,
            Err(EngineError::Ledger(
                crate::ledger::LedgerError::Overflow { .. }
            ))
        ));

        // The proposal is still pending and bob's confirmation was kept
        let tx = engine.get_transaction(id).unwrap();
        assert!(!tx.executed);
        assert_eq!(tx.confirmation_count, 2);
        assert!(engine.is_confirmed(id, "bob").unwrap());
        assert_eq!(engine.balance_of("x"), u128::MAX - 10);

        // The threshold is re-evaluated on the next confirmation attempt
        let result = engine.confirm("carol", id);
        assert!(matches!(result, Err(EngineError::Ledger(_))));
        assert_eq!(engine.get_transaction(id).unwrap().confirmation_count, 3);
    }

    #[test]
    fn test_is_confirmed_unknown_id() {
        let engine = create_test_engine(2);
        assert!(matches!(
            engine.is_confirmed(0, "alice"),
            Err(EngineError::NotFound(0))
        ));
    }

    #[test]
    fn test_informational_queries() {
        let engine = create_test_engine(2);

        assert!(engine.is_owner("alice"));
        assert!(!engine.is_owner("mallory"));
        assert_eq!(engine.owner_count(), 3);
        assert_eq!(engine.required_signatures(), 2);
        assert_eq!(engine.transaction_count(), 0);
        assert_eq!(engine.token().symbol(), "TST");
    }
}
