//! Domain Layer - Pure launch logic for the pump.fun launcher
//!
//! This module contains deterministic, network-free building blocks.
//! All external interactions happen through the ports layer.
//!
//! - `known_programs`: Solana program and sysvar IDs
//! - `network`: Mainnet/devnet pump.fun accounts
//! - `pda`: Bonding curve and metadata address derivation
//! - `priority_fee`: Fee sample reduction
//! - `amount`: SOL/lamport and slippage math
//! - `assembler`: Instruction ordering
//! - `signing`: Required-signer resolution

pub mod known_programs;
pub mod network;
pub mod pda;
pub mod priority_fee;
pub mod amount;
pub mod assembler;
pub mod signing;

pub use network::{NetworkMode, WellKnownAddresses};
pub use pda::{BondingCurveAddresses, DerivationError, LaunchAddresses};
pub use priority_fee::FeeEstimationError;
pub use amount::AmountError;
pub use assembler::{DEFAULT_COMPUTE_UNIT_LIMIT, OrderingError};
pub use signing::{SignerSet, SigningError};
