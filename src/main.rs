//! wallet-bridge command line front end.
//!
//! Drives a [`WalletBridge`] the way a page would: mount, then run one
//! user action, then print the resulting state.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use wallet_bridge::bridge::{FormField, TransactionForm, WalletBridge};
use wallet_bridge::config::resolve_config;
use wallet_bridge::lifecycle::build_bridge;
use wallet_bridge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "wallet-bridge")]
#[command(about = "Wallet and ledger bridge for the Transactions contract", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ledger contract address, overriding the file and the
    /// WALLET_BRIDGE_CONTRACT_ADDRESS environment variable
    #[arg(long, global = true)]
    contract: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount and print the bridge state
    Status,
    /// Print the ledger transaction history
    History,
    /// Refresh and print the cached transaction count
    Count,
    /// Authorize a wallet account
    Connect,
    /// Transfer ETH and record it on the ledger
    Send {
        #[arg(long)]
        to: String,
        /// Decimal ETH amount, e.g. 0.01
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long, default_value = "")]
        keyword: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref(), cli.contract.clone())?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        provider_enabled = config.provider.enabled,
        ledger_rpc = %config.ledger.rpc_url,
        contract = %config.ledger.contract_address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let bridge = build_bridge(&config)?;
    bridge.mount().await?;

    match cli.command {
        Commands::Status => print_json(&bridge.snapshot())?,
        Commands::History => print_json(&bridge.transactions())?,
        Commands::Count => {
            let count = bridge.refresh_transaction_count().await?;
            print_json(&json!({ "transactionCount": count }))?;
        }
        Commands::Connect => {
            bridge.connect_wallet().await?;
            print_json(&bridge.snapshot())?;
        }
        Commands::Send {
            to,
            amount,
            message,
            keyword,
        } => {
            send(&bridge, to, amount, message, keyword).await?;
        }
    }

    Ok(())
}

async fn send(
    bridge: &WalletBridge,
    to: String,
    amount: String,
    message: String,
    keyword: String,
) -> Result<(), Box<dyn std::error::Error>> {
    bridge.set_form(TransactionForm::default());
    bridge.update_form_field(FormField::AddressTo, to);
    bridge.update_form_field(FormField::Amount, amount);
    bridge.update_form_field(FormField::Message, message);
    bridge.update_form_field(FormField::Keyword, keyword);

    match bridge.send_transaction().await? {
        Some(receipt) => print_json(&json!({
            "transfer": receipt.transfer_id,
            "ledgerHash": receipt.ledger_hash.to_string(),
            "confirmation": format!("{:?}", receipt.confirmation),
            "transactionCount": receipt.transaction_count,
        })),
        None => {
            eprintln!("No wallet provider available");
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
