//! Known Program Addresses
//!
//! Constants for the Solana programs and sysvars a pump.fun launch touches.
//! Network-dependent pump.fun accounts live in `network`.

use solana_sdk::{pubkey, pubkey::Pubkey};

/// Metaplex Token Metadata program
pub const TOKEN_METADATA_PROGRAM: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// System Program
pub const SYSTEM_PROGRAM: Pubkey = solana_sdk::system_program::ID;

/// SPL Token Program
pub const TOKEN_PROGRAM: Pubkey = spl_token::ID;

/// Associated Token Account Program
pub const ASSOCIATED_TOKEN_PROGRAM: Pubkey = spl_associated_token_account::ID;

/// Rent sysvar
pub const RENT_SYSVAR: Pubkey = solana_sdk::sysvar::rent::ID;

/// Compute Budget Program
pub const COMPUTE_BUDGET_PROGRAM: Pubkey = solana_sdk::compute_budget::ID;

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Maximum serialized transaction size accepted by the network
pub const MAX_TRANSACTION_SIZE: usize = solana_sdk::packet::PACKET_DATA_SIZE;

/// Programs every create transaction references
pub fn launch_program_pubkeys() -> Vec<Pubkey> {
    vec![
        TOKEN_METADATA_PROGRAM,
        SYSTEM_PROGRAM,
        TOKEN_PROGRAM,
        ASSOCIATED_TOKEN_PROGRAM,
        RENT_SYSVAR,
    ]
}
