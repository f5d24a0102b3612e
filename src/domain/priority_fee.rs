//! Priority Fee Estimation
//!
//! Reduces recent prioritization-fee samples to a single compute unit price
//! (micro-lamports per CU). The reduction is the arithmetic mean of all samples.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::known_programs::launch_program_pubkeys;
use super::network::WellKnownAddresses;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeeEstimationError {
    #[error("Insufficient sample data: the network returned no prioritization fees")]
    InsufficientSampleData,
}

/// Accounts whose recent fees matter for a create transaction
pub fn fee_sample_accounts(payer: &Pubkey, addresses: &WellKnownAddresses) -> Vec<Pubkey> {
    let mut accounts = vec![
        *payer,
        addresses.program_id,
        addresses.mint_authority,
        addresses.global,
    ];
    accounts.extend(launch_program_pubkeys());
    accounts.push(addresses.event_authority);
    accounts
}

/// Arithmetic mean of the samples, rounded down.
pub fn mean_priority_fee(samples: &[u64]) -> Result<u64, FeeEstimationError> {
    if samples.is_empty() {
        return Err(FeeEstimationError::InsufficientSampleData);
    }
    let sum: u128 = samples.iter().map(|&fee| fee as u128).sum();
    // mean never exceeds the largest sample, so it fits in u64
    Ok((sum / samples.len() as u128) as u64)
}

/// Mean fee, clamped to `ceiling` when one is configured
pub fn recommended_priority_fee(
    samples: &[u64],
    ceiling: Option<u64>,
) -> Result<u64, FeeEstimationError> {
    let mean = mean_priority_fee(samples)?;
    match ceiling {
        Some(cap) if mean > cap => {
            tracing::warn!("Priority fee {} above ceiling, clamped to {}", mean, cap);
            Ok(cap)
        }
        _ => Ok(mean),
    }
}
