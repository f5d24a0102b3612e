//! Bonding curve buy builder
//!
//! Builds the initial purchase bundled with a launch. The curve does not exist
//! yet when the transaction is assembled, so the quote is taken against the
//! reserves of a freshly created curve instead of fetched account data.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solana_sdk::instruction::Instruction;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;

use crate::domain::amount::max_cost_with_slippage;
use crate::domain::known_programs::TOKEN_PROGRAM;
use crate::domain::pda::{associated_token_address, bonding_curve_addresses};
use crate::domain::WellKnownAddresses;
use crate::ports::buy::{BuyError, BuyInstructionBuilder, BuyRequest};

use super::instructions::{buy_instruction, BuyAccounts};
use super::types::{BondingCurveState, BuyArgs};

/// pump.fun trading fee on buys
pub const DEFAULT_FEE_BASIS_POINTS: u64 = 100;

#[derive(Debug, Clone)]
pub struct BondingCurveBuyBuilder {
    curve: BondingCurveState,
    fee_basis_points: u64,
}

impl BondingCurveBuyBuilder {
    pub fn new() -> Self {
        Self {
            curve: BondingCurveState::initial(),
            fee_basis_points: DEFAULT_FEE_BASIS_POINTS,
        }
    }

    pub fn with_fee_basis_points(mut self, fee_basis_points: u64) -> Self {
        self.fee_basis_points = fee_basis_points;
        self
    }

    /// Lamports that reach the curve once the program takes its fee
    fn lamports_after_fee(&self, lamports: u64) -> Result<u64, BuyError> {
        let factor = dec!(1) + Decimal::from(self.fee_basis_points) / dec!(10_000);
        (Decimal::from(lamports) / factor)
            .floor()
            .to_u64()
            .ok_or_else(|| BuyError::InvalidParameters(format!("lamports {} out of range", lamports)))
    }

    /// Token amount and lamport ceiling for a buy
    pub fn quote(&self, lamports: u64, slippage_percent: f64) -> Result<BuyArgs, BuyError> {
        if lamports == 0 {
            return Err(BuyError::InvalidParameters("buy amount must be > 0".to_string()));
        }
        let amount = self.curve.tokens_for_lamports(self.lamports_after_fee(lamports)?);
        if amount == 0 {
            return Err(BuyError::InvalidParameters(format!(
                "{} lamports buys no tokens",
                lamports
            )));
        }
        let max_sol_cost = max_cost_with_slippage(lamports, slippage_percent)
            .map_err(|e| BuyError::InvalidParameters(e.to_string()))?;
        Ok(BuyArgs { amount, max_sol_cost })
    }
}

impl Default for BondingCurveBuyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BuyInstructionBuilder for BondingCurveBuyBuilder {
    async fn buy_instructions(
        &self,
        addresses: &WellKnownAddresses,
        request: &BuyRequest,
    ) -> Result<Vec<Instruction>, BuyError> {
        let args = self.quote(request.lamports, request.slippage_percent)?;

        let curve = bonding_curve_addresses(&request.mint, &addresses.program_id)
            .map_err(|e| BuyError::Derivation(e.to_string()))?;
        let associated_user = associated_token_address(&request.buyer, &request.mint)
            .map_err(|e| BuyError::Derivation(e.to_string()))?;

        let accounts = BuyAccounts {
            global: addresses.global,
            fee_recipient: addresses.fee_recipient,
            mint: request.mint,
            bonding_curve: curve.bonding_curve,
            associated_bonding_curve: curve.associated_bonding_curve,
            associated_user,
            user: request.buyer,
            event_authority: addresses.event_authority,
            program: addresses.program_id,
        };

        tracing::debug!(
            "Buy quote: {} lamports -> {} tokens (max cost {})",
            request.lamports,
            args.amount,
            args.max_sol_cost
        );

        Ok(vec![
            create_associated_token_account_idempotent(
                &request.buyer,
                &request.buyer,
                &request.mint,
                &TOKEN_PROGRAM,
            ),
            buy_instruction(&args, &accounts).map_err(|e| BuyError::Encoding(e.to_string()))?,
        ])
    }
}
