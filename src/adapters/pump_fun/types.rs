//! Pump.fun Types
//!
//! Instruction arguments and bonding curve reserves for the pump.fun program.

use borsh::{BorshDeserialize, BorshSerialize};

/// Anchor discriminator of `create`
pub const CREATE_DISCRIMINATOR: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];

/// Anchor discriminator of `buy`
pub const BUY_DISCRIMINATOR: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];

/// Virtual SOL reserves of a freshly created curve
pub const INITIAL_VIRTUAL_SOL_RESERVES: u64 = 30_000_000_000;

/// Virtual token reserves of a freshly created curve
pub const INITIAL_VIRTUAL_TOKEN_RESERVES: u64 = 1_073_000_000_000_000;

/// Tokens actually purchasable from a fresh curve
pub const INITIAL_REAL_TOKEN_RESERVES: u64 = 793_100_000_000_000;

/// Arguments of the `create` instruction
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreateArgs {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Arguments of the `buy` instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BuyArgs {
    /// Token amount to receive (6 decimals)
    pub amount: u64,
    /// Most lamports the buyer will pay
    pub max_sol_cost: u64,
}

/// Bonding curve reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondingCurveState {
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
    pub real_token_reserves: u64,
}

impl BondingCurveState {
    /// Reserves of a curve that has just been created
    pub const fn initial() -> Self {
        Self {
            virtual_sol_reserves: INITIAL_VIRTUAL_SOL_RESERVES,
            virtual_token_reserves: INITIAL_VIRTUAL_TOKEN_RESERVES,
            real_token_reserves: INITIAL_REAL_TOKEN_RESERVES,
        }
    }

    /// Tokens received for `lamports` on the constant-product curve,
    /// capped at the real reserves
    pub fn tokens_for_lamports(&self, lamports: u64) -> u64 {
        if lamports == 0 || self.virtual_sol_reserves == 0 {
            return 0;
        }
        let k = self.virtual_sol_reserves as u128 * self.virtual_token_reserves as u128;
        let new_sol = self.virtual_sol_reserves as u128 + lamports as u128;
        // round the remaining reserves up so the buyer never gets more than the curve allows
        let new_tokens = k.div_ceil(new_sol);
        let out = (self.virtual_token_reserves as u128).saturating_sub(new_tokens);
        out.min(self.real_token_reserves as u128) as u64
    }
}

impl Default for BondingCurveState {
    fn default() -> Self {
        Self::initial()
    }
}
