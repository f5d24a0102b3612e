//! Pump.fun Adapter
//!
//! Instruction encoding for the pump.fun bonding curve program.
//!
//! # Overview
//!
//! Pump.fun is a Solana-based platform for launching meme coins with bonding curves.
//! A launch is a single `create` instruction that mints the token, initializes its
//! bonding curve and writes Metaplex metadata. An optional `buy` can follow in the
//! same transaction.
//!
//! # Example
//!
//! ```ignore
//! use pump_launcher::adapters::pump_fun::BondingCurveBuyBuilder;
//! use pump_launcher::domain::WellKnownAddresses;
//! use pump_launcher::ports::{BuyInstructionBuilder, BuyRequest};
//!
//! let builder = BondingCurveBuyBuilder::new();
//! let ixs = builder
//!     .buy_instructions(&WellKnownAddresses::mainnet(), &BuyRequest {
//!         mint,
//!         buyer,
//!         lamports: 100_000_000,
//!         slippage_percent: 10.0,
//!     })
//!     .await?;
//! ```

mod buy;
mod instructions;
mod types;

pub use buy::{BondingCurveBuyBuilder, DEFAULT_FEE_BASIS_POINTS};
pub use instructions::{
    buy_instruction, create_instruction, BuyAccounts, CreateAccounts, InstructionError,
};
pub use types::{
    BondingCurveState, BuyArgs, CreateArgs, BUY_DISCRIMINATOR, CREATE_DISCRIMINATOR,
};
