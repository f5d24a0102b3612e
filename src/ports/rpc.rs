//! Ledger RPC port
//!
//! The three network calls a launch makes. Implemented by
//! `adapters::solana::SolanaClient` and by `ports::mocks::MockLedger` in tests.

use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("RPC request failed: {0}")]
    Request(String),
    #[error("Task join error: {0}")]
    Join(String),
}

/// Outcome of a failed submission.
///
/// `Rejected` means the transaction was never accepted for broadcast.
/// `Unconfirmed` means it may have been broadcast; check the ledger for
/// `signature` before resubmitting. `Failed` means it landed and the program
/// returned an error, so nothing was created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Transaction rejected before broadcast: {0}")]
    Rejected(String),
    #[error("Transaction {signature} sent but not confirmed: {reason}")]
    Unconfirmed { signature: Signature, reason: String },
    #[error("Transaction {signature} failed on chain: {reason}")]
    Failed { signature: Signature, reason: String },
}

/// One observation from `getRecentPrioritizationFees`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrioritizationFeeSample {
    pub slot: u64,
    /// micro-lamports per compute unit
    pub prioritization_fee: u64,
}

#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Recent prioritization fees paid by transactions touching `accounts`
    async fn recent_prioritization_fees(
        &self,
        accounts: &[Pubkey],
    ) -> Result<Vec<PrioritizationFeeSample>, RpcError>;

    async fn latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, RpcError>;

    /// Submit a signed transaction and wait until it reaches `commitment`
    async fn send_and_confirm(
        &self,
        transaction: &Transaction,
        commitment: CommitmentConfig,
    ) -> Result<Signature, SubmitError>;
}
