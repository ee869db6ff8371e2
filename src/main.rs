//! Multisig Mint CLI Application
//!
//! A command-line interface for submitting, confirming and inspecting
//! multisig-approved mint transactions.

use clap::{Parser, Subcommand};
use multisig_mint::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multisig-mint")]
#[command(version = "0.1.0")]
#[command(about = "A threshold-approval engine for token mints", long_about = None)]
struct Cli {
    /// Data directory for engine state
    #[arg(short, long, default_value = ".multisig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new engine
    Init {
        /// Owner identity (repeat for each owner)
        #[arg(short, long = "owner", required = true)]
        owners: Vec<String>,

        /// Number of distinct confirmations required to execute
        #[arg(short, long)]
        required: u32,

        /// Token name
        #[arg(long, default_value = "Goofy Goober")]
        name: String,

        /// Token symbol
        #[arg(long, default_value = "GG")]
        symbol: String,

        /// Token decimal places
        #[arg(long, default_value = "18")]
        decimals: u8,
    },

    /// Display engine information
    Info,

    /// List all owners
    Owners,

    /// Submit a new mint transaction
    Submit {
        /// Owner submitting the transaction
        #[arg(short, long)]
        from: String,

        /// Recipient address
        #[arg(short, long)]
        to: String,

        /// Amount of tokens to mint
        #[arg(short, long)]
        amount: u128,
    },

    /// Confirm a pending transaction
    Confirm {
        /// Owner confirming the transaction
        #[arg(short, long)]
        from: String,

        /// Transaction ID to confirm
        #[arg(short, long)]
        txid: u64,
    },

    /// Transaction operations
    Tx {
        #[command(subcommand)]
        action: TxCommands,
    },

    /// Check token balance
    Balance {
        /// Address to check
        #[arg(short, long)]
        address: String,
    },
}

#[derive(Subcommand)]
enum TxCommands {
    /// Show transaction details
    Show {
        /// Transaction ID
        #[arg(short, long)]
        txid: u64,
    },

    /// List all transactions
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init separately: it is the only command that does not need an
    // existing engine
    let command = match cli.command {
        Commands::Init {
            owners,
            required,
            name,
            symbol,
            decimals,
        } => {
            return cli::cmd_init(&cli.data_dir, owners, required, name, symbol, decimals);
        }
        other => other,
    };

    // All other commands operate on an initialized engine
    let mut state = AppState::load(cli.data_dir.clone())?;

    match command {
        Commands::Init { .. } => unreachable!(),

        Commands::Info => {
            cli::cmd_info(&state)?;
        }

        Commands::Owners => {
            cli::cmd_owners(&state)?;
        }

        Commands::Submit { from, to, amount } => {
            cli::cmd_submit(&mut state, &from, &to, amount)?;
        }

        Commands::Confirm { from, txid } => {
            cli::cmd_confirm(&mut state, &from, txid)?;
        }

        Commands::Tx { action } => match action {
            TxCommands::Show { txid } => {
                cli::cmd_tx(&state, txid)?;
            }
            TxCommands::List => {
                cli::cmd_tx_list(&state)?;
            }
        },

        Commands::Balance { address } => {
            cli::cmd_balance(&state, &address)?;
        }
    }

    Ok(())
}
