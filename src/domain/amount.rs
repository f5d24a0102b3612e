//! SOL amount conversion
//!
//! Decimal arithmetic for converting user-facing SOL amounts to lamports and
//! applying slippage tolerance, avoiding float rounding on the way.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use thiserror::Error;

use super::known_programs::LAMPORTS_PER_SOL;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountError {
    #[error("Invalid SOL amount: {0}")]
    InvalidSol(f64),
    #[error("Invalid slippage percentage: {0}")]
    InvalidSlippage(f64),
    #[error("Amount overflows u64 lamports")]
    Overflow,
}

/// Convert SOL to lamports, truncating below one lamport.
pub fn sol_to_lamports(sol: f64) -> Result<u64, AmountError> {
    if !sol.is_finite() || sol < 0.0 {
        return Err(AmountError::InvalidSol(sol));
    }
    let sol = Decimal::from_f64(sol).ok_or(AmountError::InvalidSol(sol))?;
    let lamports = sol
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or(AmountError::Overflow)?;
    lamports.trunc().to_u64().ok_or(AmountError::Overflow)
}

/// Upper bound on lamports spent for a buy of `lamports`, given a percentage tolerance
pub fn max_cost_with_slippage(lamports: u64, slippage_percent: f64) -> Result<u64, AmountError> {
    if !slippage_percent.is_finite() || slippage_percent < 0.0 {
        return Err(AmountError::InvalidSlippage(slippage_percent));
    }
    let pct = Decimal::from_f64(slippage_percent).ok_or(AmountError::InvalidSlippage(slippage_percent))?;
    let factor = Decimal::ONE + pct / Decimal::ONE_HUNDRED;
    Decimal::from(lamports)
        .checked_mul(factor)
        .ok_or(AmountError::Overflow)?
        .ceil()
        .to_u64()
        .ok_or(AmountError::Overflow)
}
