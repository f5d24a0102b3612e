//! Program Derived Addresses
//!
//! Deterministic derivation of the accounts a pump.fun launch creates:
//! the bonding curve, its token vault, and the Metaplex metadata account.
//! Every function here is pure and uses the non-panicking
//! `Pubkey::try_find_program_address`, so bump exhaustion surfaces as an error.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::known_programs::{ASSOCIATED_TOKEN_PROGRAM, TOKEN_METADATA_PROGRAM, TOKEN_PROGRAM};

/// Seed for bonding curve PDAs
pub const BONDING_CURVE_SEED: &[u8] = b"bonding-curve";

/// Seed for metadata PDAs
pub const METADATA_SEED: &[u8] = b"metadata";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("No valid bump seed for bonding curve of mint {mint}")]
    BondingCurve { mint: Pubkey },
    #[error("No valid bump seed for associated token account of owner {owner}, mint {mint}")]
    AssociatedTokenAccount { owner: Pubkey, mint: Pubkey },
    #[error("No valid bump seed for metadata account of mint {mint}")]
    Metadata { mint: Pubkey },
}

/// Bonding curve account and the token account it holds its supply in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondingCurveAddresses {
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
}

/// Everything a create instruction needs that depends on the mint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchAddresses {
    pub curve: BondingCurveAddresses,
    pub metadata: Pubkey,
}

pub fn bonding_curve_address(mint: &Pubkey, program_id: &Pubkey) -> Result<Pubkey, DerivationError> {
    Pubkey::try_find_program_address(&[BONDING_CURVE_SEED, mint.as_ref()], program_id)
        .map(|(address, _bump)| address)
        .ok_or(DerivationError::BondingCurve { mint: *mint })
}

/// Associated token account of `owner` for `mint` under the classic token program.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, DerivationError> {
    Pubkey::try_find_program_address(
        &[owner.as_ref(), TOKEN_PROGRAM.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM,
    )
    .map(|(address, _bump)| address)
    .ok_or(DerivationError::AssociatedTokenAccount {
        owner: *owner,
        mint: *mint,
    })
}

pub fn metadata_address(mint: &Pubkey) -> Result<Pubkey, DerivationError> {
    Pubkey::try_find_program_address(
        &[METADATA_SEED, TOKEN_METADATA_PROGRAM.as_ref(), mint.as_ref()],
        &TOKEN_METADATA_PROGRAM,
    )
    .map(|(address, _bump)| address)
    .ok_or(DerivationError::Metadata { mint: *mint })
}

pub fn bonding_curve_addresses(
    mint: &Pubkey,
    program_id: &Pubkey,
) -> Result<BondingCurveAddresses, DerivationError> {
    let bonding_curve = bonding_curve_address(mint, program_id)?;
    let associated_bonding_curve = associated_token_address(&bonding_curve, mint)?;
    Ok(BondingCurveAddresses {
        bonding_curve,
        associated_bonding_curve,
    })
}

pub fn launch_addresses(mint: &Pubkey, program_id: &Pubkey) -> Result<LaunchAddresses, DerivationError> {
    Ok(LaunchAddresses {
        curve: bonding_curve_addresses(mint, program_id)?,
        metadata: metadata_address(mint)?,
    })
}
