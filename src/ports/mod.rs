//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Ledger access (fee samples, blockhash, submission)
//! - Buy instruction construction

pub mod rpc;
pub mod buy;
pub mod mocks;

pub use rpc::{LedgerRpc, PrioritizationFeeSample, RpcError, SubmitError};
pub use buy::{BuyError, BuyInstructionBuilder, BuyRequest};
pub use mocks::{LedgerCall, MockLedger};
