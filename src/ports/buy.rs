//! Buy instruction port
//!
//! Produces the instructions for an initial purchase bundled with a launch.
//! The launcher treats the result as opaque and appends it after `create`.

use async_trait::async_trait;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use thiserror::Error;

use crate::domain::WellKnownAddresses;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuyError {
    #[error("Invalid buy parameters: {0}")]
    InvalidParameters(String),
    #[error("Address derivation failed: {0}")]
    Derivation(String),
    #[error("Failed to encode buy instruction: {0}")]
    Encoding(String),
    #[error("Curve data unavailable: {0}")]
    CurveUnavailable(String),
}

/// A buy of `lamports` worth of `mint` for `buyer`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuyRequest {
    pub mint: Pubkey,
    pub buyer: Pubkey,
    pub lamports: u64,
    pub slippage_percent: f64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuyInstructionBuilder: Send + Sync {
    /// `addresses` is the launcher's address set, so the fee recipient
    /// always matches the network mode of the create instruction.
    async fn buy_instructions(
        &self,
        addresses: &WellKnownAddresses,
        request: &BuyRequest,
    ) -> Result<Vec<Instruction>, BuyError>;
}
