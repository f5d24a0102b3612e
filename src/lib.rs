//! pump-launcher - atomic pump.fun token launches
//!
//! Builds the transaction that creates a pump.fun token and its bonding curve,
//! optionally buying into it in the same transaction, then signs and submits it.
//!
//! # Modules
//!
//! - `domain`: Address derivation, fee reduction, instruction ordering, signing
//! - `ports`: Trait abstractions (LedgerRpc, BuyInstructionBuilder)
//! - `adapters`: External implementations (pump.fun encoding, Solana RPC, wallet, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: The token launcher

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
