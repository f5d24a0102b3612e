//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - pump_fun: Instruction encoding and the bonding curve buy builder
//! - Solana: RPC client and wallet management
//! - CLI: Command-line argument definitions

pub mod pump_fun;
pub mod solana;
pub mod cli;

pub use pump_fun::BondingCurveBuyBuilder;
pub use solana::{SolanaClient, WalletManager};
pub use cli::CliApp;
