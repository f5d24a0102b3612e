//! CLI Commands
//!
//! Argument definitions for the pump-launcher binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::NetworkMode;

/// pump-launcher - create pump.fun tokens from the command line
#[derive(Parser, Debug)]
#[command(
    name = "pump-launcher",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create pump.fun tokens with an optional initial buy",
    long_about = "pump-launcher builds the transaction that creates a pump.fun token and its \
                  bonding curve, signs it with the payer and mint keys, and submits it."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a token and its bonding curve
    Create(CreateCmd),

    /// Print the addresses derived for a mint
    Derive(DeriveCmd),

    /// Show wallet balance and RPC health
    Status(StatusCmd),

    /// Show a submitted transaction
    Inspect(InspectCmd),
}

/// Create a token
#[derive(Parser, Debug)]
pub struct CreateCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/mainnet.toml")]
    pub config: PathBuf,

    /// Token name
    #[arg(long)]
    pub name: String,

    /// Token symbol
    #[arg(long)]
    pub symbol: String,

    /// Metadata URI (already uploaded)
    #[arg(long)]
    pub uri: String,

    /// Initial buy in SOL (0 = no buy)
    #[arg(long, value_name = "SOL", default_value = "0")]
    pub buy_sol: f64,

    /// Slippage tolerance in percent (default: from config)
    #[arg(long, value_name = "PERCENT")]
    pub slippage: Option<f64>,

    /// Mint keypair file; a new mint is generated when omitted
    #[arg(long, value_name = "FILE")]
    pub mint_keypair: Option<PathBuf>,

    /// Write the generated mint keypair here
    #[arg(long, value_name = "FILE", conflicts_with = "mint_keypair")]
    pub save_mint: Option<PathBuf>,

    /// Use devnet addresses regardless of config
    #[arg(long)]
    pub devnet: bool,

    /// Override RPC URL
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Override keypair path
    #[arg(long, value_name = "FILE")]
    pub keypair: Option<PathBuf>,

    /// Build and sign but do not submit
    #[arg(long)]
    pub dry_run: bool,
}

/// Derive launch addresses
#[derive(Parser, Debug)]
pub struct DeriveCmd {
    /// Mint address (base58)
    #[arg(value_name = "MINT")]
    pub mint: String,

    /// Address set to derive under
    #[arg(long, value_name = "MODE", default_value = "mainnet")]
    pub network: NetworkMode,

    /// Buyer wallet, to also show its token account
    #[arg(long, value_name = "PUBKEY")]
    pub owner: Option<String>,
}

/// Check wallet and RPC
#[derive(Parser, Debug)]
pub struct StatusCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/mainnet.toml")]
    pub config: PathBuf,
}

/// Inspect a transaction
#[derive(Parser, Debug)]
pub struct InspectCmd {
    /// Transaction signature (base58)
    #[arg(value_name = "SIGNATURE")]
    pub signature: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/mainnet.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_with_buy() {
        let app = CliApp::try_parse_from([
            "pump-launcher",
            "create",
            "--name",
            "Butter",
            "--symbol",
            "BTR",
            "--uri",
            "https://example.com/meta.json",
            "--buy-sol",
            "1.5",
            "--slippage",
            "5",
            "--devnet",
            "--dry-run",
        ])
        .unwrap();

        match app.command {
            Command::Create(cmd) => {
                assert_eq!(cmd.name, "Butter");
                assert_eq!(cmd.buy_sol, 1.5);
                assert_eq!(cmd.slippage, Some(5.0));
                assert!(cmd.devnet);
                assert!(cmd.dry_run);
                assert!(cmd.mint_keypair.is_none());
                assert_eq!(cmd.config, PathBuf::from("config/mainnet.toml"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_metadata() {
        let result = CliApp::try_parse_from(["pump-launcher", "create", "--name", "Butter"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mint_keypair_conflicts_with_save_mint() {
        let result = CliApp::try_parse_from([
            "pump-launcher",
            "create",
            "--name",
            "a",
            "--symbol",
            "b",
            "--uri",
            "c",
            "--mint-keypair",
            "mint.json",
            "--save-mint",
            "out.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_derive_network() {
        let app = CliApp::try_parse_from([
            "pump-launcher",
            "derive",
            "So11111111111111111111111111111111111111112",
            "--network",
            "devnet",
            "-v",
        ])
        .unwrap();

        assert!(app.verbose);
        match app.command {
            Command::Derive(cmd) => assert_eq!(cmd.network, NetworkMode::Devnet),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_debug_flag() {
        let app = CliApp::try_parse_from(["pump-launcher", "--debug", "inspect", "abc"]).unwrap();
        assert!(app.debug);
        assert!(matches!(app.command, Command::Inspect(_)));
    }
}
