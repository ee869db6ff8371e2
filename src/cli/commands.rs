//! CLI commands for the multisig mint engine
//!
//! Implements all command handlers for the CLI interface. These are thin
//! wrappers: they load the engine, invoke one of its operations, render the
//! result and save. All invariants live in the engine itself.

use crate::engine::{ApprovalEngine, ConfirmOutcome, OwnerRegistry};
use crate::ledger::TokenMetadata;
use crate::storage::{Storage, StorageConfig};
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub engine: ApprovalEngine,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load application state from an initialized data directory
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let storage_config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };

        let storage = Storage::new(storage_config)?;

        if !storage.exists() {
            return Err(format!(
                "No engine found in {:?}. Run 'init' first.",
                data_dir
            )
            .into());
        }

        let engine = storage.load()?;

        Ok(Self {
            engine,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.engine)?;
        Ok(())
    }
}

/// Initialize a new engine with its owner set, threshold and token metadata
pub fn cmd_init(
    data_dir: &PathBuf,
    owners: Vec<String>,
    required: u32,
    name: String,
    symbol: String,
    decimals: u8,
) -> CliResult<()> {
    let storage_config = StorageConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    };

    let storage = Storage::new(storage_config)?;

    if storage.exists() {
        println!("⚠️  Engine already exists at {:?}", data_dir);
        println!("   Delete the data directory to reinitialize (this discards all state)");
        return Ok(());
    }

    let registry = OwnerRegistry::new(owners, required)?;
    let metadata = TokenMetadata::new(name, symbol, decimals)?;

    println!("🔐 Multisig Configuration:");
    println!("   Required signatures: {}", registry.description());
    for (index, owner) in registry.owners().iter().enumerate() {
        println!("   {}. {}", index + 1, owner);
    }

    let engine = ApprovalEngine::new(registry, metadata);
    storage.save(&engine)?;

    println!("\n✅ Engine initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!(
        "   🪙 Token: {} ({})",
        engine.token().name(),
        engine.token().symbol()
    );
    println!("\n🔐 How to mint tokens:");
    println!("   1. Submit: submit --from <owner> --to <address> --amount <amount>");
    println!("   2. Confirm: confirm --from <owner> --txid <id>");
    println!("   3. The mint executes when the threshold is reached!");

    Ok(())
}

/// Display engine information
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let token = state.engine.token();

    println!("ℹ️  Engine Info");
    println!("   ├─ Name: {}", token.name());
    println!("   ├─ Symbol: {}", token.symbol());
    println!("   ├─ Decimals: {}", token.decimals());
    println!("   ├─ Total supply: {} {}", token.total_supply(), token.symbol());
    println!(
        "   ├─ Required signatures: {}",
        state.engine.required_signatures()
    );
    println!("   └─ Total transactions: {}", state.engine.transaction_count());

    Ok(())
}

/// List all owners
pub fn cmd_owners(state: &AppState) -> CliResult<()> {
    println!("👥 Owners ({})", state.engine.registry().description());
    for (index, owner) in state.engine.owners().iter().enumerate() {
        println!("   {}. {}", index + 1, owner);
    }

    Ok(())
}

/// Submit a new mint transaction
pub fn cmd_submit(state: &mut AppState, from: &str, to: &str, amount: u128) -> CliResult<()> {
    println!("📤 Submitting mint transaction");
    println!("   Recipient: {}", to);
    println!("   Amount: {} {}", amount, state.engine.token().symbol());

    let txid = state.engine.propose(from, to, amount)?;
    state.save()?;

    println!("\n✓ Transaction submitted!");
    println!("   Transaction ID: {}", txid);

    let tx = state.engine.get_transaction(txid)?;
    if tx.executed {
        println!("✓ Transaction was automatically executed (enough signatures)");
    } else {
        println!("⏳ Waiting for signatures...");
        println!(
            "   Confirmations: {} / {}",
            tx.confirmation_count,
            state.engine.required_signatures()
        );
    }

    Ok(())
}

/// Confirm a pending transaction as a specific owner
pub fn cmd_confirm(state: &mut AppState, from: &str, txid: u64) -> CliResult<()> {
    println!("✍️  Confirming transaction {} as {}", txid, from);

    // Pre-checks for clearer diagnostics; the engine re-validates all of
    // them atomically inside confirm
    let tx = state.engine.get_transaction(txid)?;

    if tx.executed {
        println!("❌ Transaction has already been executed");
        println!("   Recipient: {}", tx.recipient);
        println!(
            "   Amount: {} {}",
            tx.amount,
            state.engine.token().symbol()
        );
        return Ok(());
    }

    if state.engine.is_confirmed(txid, from)? {
        println!("❌ This owner has already confirmed this transaction");
        println!(
            "   Confirmations: {} / {}",
            tx.confirmation_count,
            state.engine.required_signatures()
        );
        return Ok(());
    }

    if !state.engine.is_owner(from) {
        println!("❌ This address is not an owner of the multisig");
        println!("   Use 'owners' to see valid owners");
        return Ok(());
    }

    // An overflowing execution fails the call but keeps the confirmation
    // recorded, so the state must be persisted on the error path too
    let outcome = match state.engine.confirm(from, txid) {
        Ok(outcome) => {
            state.save()?;
            outcome
        }
        Err(err) => {
            state.save()?;
            return Err(err.into());
        }
    };

    println!("✓ Transaction confirmed by {}", from);

    match outcome {
        ConfirmOutcome::Executed(event) => {
            println!("✓ Transaction executed successfully!");
            println!(
                "🎉 Minted {} {} to {}",
                event.amount,
                state.engine.token().symbol(),
                event.recipient
            );
        }
        ConfirmOutcome::Confirmed {
            confirmations,
            required,
        } => {
            println!("⏳ Still needs more signatures");
            println!("   Confirmations: {} / {}", confirmations, required);
        }
    }

    Ok(())
}

/// View transaction details
pub fn cmd_tx(state: &AppState, txid: u64) -> CliResult<()> {
    let tx = state.engine.get_transaction(txid)?;

    println!("🧾 Transaction {}", txid);
    println!("   ├─ Recipient: {}", tx.recipient);
    println!(
        "   ├─ Amount: {} {}",
        tx.amount,
        state.engine.token().symbol()
    );
    println!("   ├─ Executed: {}", tx.executed);
    println!(
        "   └─ Confirmations: {} / {}",
        tx.confirmation_count,
        state.engine.required_signatures()
    );

    Ok(())
}

/// List all transactions
pub fn cmd_tx_list(state: &AppState) -> CliResult<()> {
    if state.engine.transaction_count() == 0 {
        println!("📭 No transactions submitted yet.");
        return Ok(());
    }

    println!("🧾 Transactions:");
    for tx in state.engine.transactions() {
        let status = if tx.executed {
            "executed".to_string()
        } else {
            format!(
                "pending {}/{}",
                tx.confirmation_count,
                state.engine.required_signatures()
            )
        };
        println!(
            "   #{} | {} {} -> {} | {}",
            tx.id,
            tx.amount,
            state.engine.token().symbol(),
            tx.recipient,
            status
        );
    }

    Ok(())
}

/// Check token balance for an address
pub fn cmd_balance(state: &AppState, address: &str) -> CliResult<()> {
    let balance = state.engine.balance_of(address);

    println!("💰 Balance for {}", address);
    println!("   {} {}", balance, state.engine.token().symbol());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_state(data_dir: std::path::PathBuf) -> AppState {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        })
        .unwrap();

        let registry = OwnerRegistry::new(
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            2,
        )
        .unwrap();
        let metadata =
            TokenMetadata::new("Test Token".to_string(), "TST".to_string(), 18).unwrap();
        let engine = ApprovalEngine::new(registry, metadata);
        storage.save(&engine).unwrap();

        AppState {
            engine,
            storage,
            data_dir,
        }
    }

    #[test]
    fn test_confirm_persists_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut state = create_test_state(temp_dir.path().to_path_buf());

        let id = state.engine.propose("alice", "x", 100).unwrap();
        state.save().unwrap();

        cmd_confirm(&mut state, "alice", id).unwrap();

        let reloaded = AppState::load(temp_dir.path().to_path_buf()).unwrap();
        assert!(reloaded.engine.is_confirmed(id, "alice").unwrap());
    }

    #[test]
    fn test_overflow_confirmation_survives_restart() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut state = create_test_state(temp_dir.path().to_path_buf());

        // Execute one mint that fills the recipient near the limit
        let id = state.engine.propose("alice", "x", u128::MAX - 10).unwrap();
        state.engine.confirm("alice", id).unwrap();
        state.engine.confirm("bob", id).unwrap();

        // A second mint to the same recipient overflows on execution
        let id2 = state.engine.propose("alice", "x", 100).unwrap();
        state.engine.confirm("alice", id2).unwrap();
        state.save().unwrap();

        let result = cmd_confirm(&mut state, "bob", id2);
        assert!(result.is_err());

        // The failed execution kept bob's confirmation, and it made it to disk
        let reloaded = AppState::load(temp_dir.path().to_path_buf()).unwrap();
        assert!(reloaded.engine.is_confirmed(id2, "bob").unwrap());
        let tx = reloaded.engine.get_transaction(id2).unwrap();
        assert!(!tx.executed);
        assert_eq!(tx.confirmation_count, 2);
        assert_eq!(reloaded.engine.balance_of("x"), u128::MAX - 10);
    }
}
