use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};

use super::rpc::{LedgerRpc, PrioritizationFeeSample, RpcError, SubmitError};

/// Call recorded by `MockLedger`
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCall {
    PrioritizationFees(Vec<Pubkey>),
    LatestBlockhash(CommitmentConfig),
    SendAndConfirm {
        transaction: Transaction,
        commitment: CommitmentConfig,
    },
}

/// In-memory ledger that records calls and returns configured responses
#[derive(Debug, Clone)]
pub struct MockLedger {
    calls: Arc<Mutex<Vec<LedgerCall>>>,
    fees: Result<Vec<u64>, RpcError>,
    blockhash: Result<Hash, RpcError>,
    submit_error: Option<SubmitError>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fees: Ok(vec![1_000]),
            blockhash: Ok(Hash::new_unique()),
            submit_error: None,
        }
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the fee samples returned
    pub fn with_fees(mut self, fees: Vec<u64>) -> Self {
        self.fees = Ok(fees);
        self
    }

    pub fn with_fee_error(mut self, error: RpcError) -> Self {
        self.fees = Err(error);
        self
    }

    pub fn with_blockhash(mut self, blockhash: Hash) -> Self {
        self.blockhash = Ok(blockhash);
        self
    }

    pub fn with_blockhash_error(mut self, error: RpcError) -> Self {
        self.blockhash = Err(error);
        self
    }

    /// Make every submission fail with `error`
    pub fn with_submit_error(mut self, error: SubmitError) -> Self {
        self.submit_error = Some(error);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Transactions passed to `send_and_confirm`
    pub fn submitted(&self) -> Vec<Transaction> {
        self.get_calls()
            .into_iter()
            .filter_map(|call| match call {
                LedgerCall::SendAndConfirm { transaction, .. } => Some(transaction),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: LedgerCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn recent_prioritization_fees(
        &self,
        accounts: &[Pubkey],
    ) -> Result<Vec<PrioritizationFeeSample>, RpcError> {
        self.record(LedgerCall::PrioritizationFees(accounts.to_vec()));
        self.fees.clone().map(|fees| {
            fees.into_iter()
                .enumerate()
                .map(|(slot, prioritization_fee)| PrioritizationFeeSample {
                    slot: slot as u64,
                    prioritization_fee,
                })
                .collect()
        })
    }

    async fn latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, RpcError> {
        self.record(LedgerCall::LatestBlockhash(commitment));
        self.blockhash.clone()
    }

    async fn send_and_confirm(
        &self,
        transaction: &Transaction,
        commitment: CommitmentConfig,
    ) -> Result<Signature, SubmitError> {
        self.record(LedgerCall::SendAndConfirm {
            transaction: transaction.clone(),
            commitment,
        });
        if let Some(error) = &self.submit_error {
            return Err(error.clone());
        }
        transaction
            .signatures
            .first()
            .copied()
            .ok_or_else(|| SubmitError::Rejected("transaction has no signatures".to_string()))
    }
}
