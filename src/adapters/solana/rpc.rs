use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use solana_transaction_status::UiTransactionEncoding;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::ports::rpc::{LedgerRpc, PrioritizationFeeSample, RpcError, SubmitError};

#[derive(Debug, Error)]
pub enum SolanaClientError {
    #[error("RPC request failed: {0}")]
    RpcError(String),
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Wrapper around Solana RPC client with async-compatible methods
#[derive(Clone)]
pub struct SolanaClient {
    client: Arc<RpcClient>,
}

impl SolanaClient {
    /// Create a new Solana RPC client
    pub fn new(rpc_url: String, commitment: CommitmentConfig) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, commitment));
        Self { client }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Get SOL balance for a public key
    pub async fn get_balance(&self, pubkey: &str) -> Result<u64, SolanaClientError> {
        let pubkey = Pubkey::from_str(pubkey)
            .map_err(|e| SolanaClientError::InvalidPublicKey(e.to_string()))?;

        // Spawn blocking to make sync RPC call async-compatible
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_balance(&pubkey)
                .map_err(|e| SolanaClientError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))?
    }

    pub async fn get_slot(&self) -> Result<u64, SolanaClientError> {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_slot()
                .map_err(|e| SolanaClientError::RpcError(e.to_string()))
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))?
    }

    /// Get transaction details by signature as pretty JSON
    pub async fn get_transaction(&self, signature_str: &str) -> Result<String, SolanaClientError> {
        let signature = Signature::from_str(signature_str)
            .map_err(|e| SolanaClientError::InvalidSignature(e.to_string()))?;

        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            let tx = client
                .get_transaction(&signature, UiTransactionEncoding::Json)
                .map_err(|e| SolanaClientError::RpcError(e.to_string()))?;
            serde_json::to_string_pretty(&tx)
                .map_err(|e| SolanaClientError::RpcError(format!("Encode error: {}", e)))
        })
        .await
        .map_err(|e| SolanaClientError::RpcError(format!("Task join error: {}", e)))?
    }
}

/// Transport failures leave it unknown whether the node received the
/// transaction. Anything the node answered is a rejection.
fn classify_send_error(err: &ClientError, signature: Signature) -> SubmitError {
    match err.kind() {
        ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => SubmitError::Unconfirmed {
            signature,
            reason: err.to_string(),
        },
        _ => SubmitError::Rejected(err.to_string()),
    }
}

/// Pause between signature status polls
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Upper bound on the confirm loop if the blockhash check never reports expiry
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(150);

/// What one signature status poll says about a sent transaction
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfirmPoll {
    Confirmed,
    Pending,
    Settled(SubmitError),
}

/// `still_pending` is false once the blockhash has expired and the
/// transaction is not visible at any commitment.
fn classify_status(
    status: Option<Result<(), TransactionError>>,
    still_pending: bool,
    signature: Signature,
    commitment: CommitmentConfig,
) -> ConfirmPoll {
    match status {
        Some(Ok(())) => ConfirmPoll::Confirmed,
        Some(Err(err)) => ConfirmPoll::Settled(SubmitError::Failed {
            signature,
            reason: err.to_string(),
        }),
        None if still_pending => ConfirmPoll::Pending,
        None => ConfirmPoll::Settled(SubmitError::Unconfirmed {
            signature,
            reason: format!(
                "blockhash expired before the transaction reached {:?}",
                commitment.commitment
            ),
        }),
    }
}

/// Poll `status` until it settles, `still_pending` goes false, or `timeout` passes
fn wait_for_confirmation<S, P>(
    signature: Signature,
    commitment: CommitmentConfig,
    interval: Duration,
    timeout: Duration,
    mut status: S,
    mut still_pending: P,
) -> Result<Signature, SubmitError>
where
    S: FnMut() -> Option<Result<(), TransactionError>>,
    P: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        let current = status();
        let pending = current.is_some() || still_pending();
        match classify_status(current, pending, signature, commitment) {
            ConfirmPoll::Confirmed => return Ok(signature),
            ConfirmPoll::Settled(err) => return Err(err),
            ConfirmPoll::Pending if Instant::now() >= deadline => {
                return Err(SubmitError::Unconfirmed {
                    signature,
                    reason: format!("no {:?} status after {:?}", commitment.commitment, timeout),
                })
            }
            ConfirmPoll::Pending => std::thread::sleep(interval),
        }
    }
}

#[async_trait]
impl LedgerRpc for SolanaClient {
    async fn recent_prioritization_fees(
        &self,
        accounts: &[Pubkey],
    ) -> Result<Vec<PrioritizationFeeSample>, RpcError> {
        let accounts = accounts.to_vec();
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_recent_prioritization_fees(&accounts)
                .map(|fees| {
                    fees.into_iter()
                        .map(|fee| PrioritizationFeeSample {
                            slot: fee.slot,
                            prioritization_fee: fee.prioritization_fee,
                        })
                        .collect()
                })
                .map_err(|e| RpcError::Request(e.to_string()))
        })
        .await
        .map_err(|e| RpcError::Join(e.to_string()))?
    }

    async fn latest_blockhash(&self, commitment: CommitmentConfig) -> Result<Hash, RpcError> {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_latest_blockhash_with_commitment(commitment)
                .map(|(hash, _last_valid_height)| hash)
                .map_err(|e| RpcError::Request(e.to_string()))
        })
        .await
        .map_err(|e| RpcError::Join(e.to_string()))?
    }

    async fn send_and_confirm(
        &self,
        transaction: &Transaction,
        commitment: CommitmentConfig,
    ) -> Result<Signature, SubmitError> {
        let tx = transaction.clone();
        let expected = tx.signatures.first().copied().unwrap_or_default();
        let client = Arc::clone(&self.client);

        tokio::task::spawn_blocking(move || {
            let config = RpcSendTransactionConfig {
                preflight_commitment: Some(commitment.commitment),
                ..RpcSendTransactionConfig::default()
            };
            let signature = client
                .send_transaction_with_config(&tx, config)
                .map_err(|e| classify_send_error(&e, expected))?;

            tracing::debug!("Sent {}, waiting for {:?}", signature, commitment.commitment);
            let blockhash = tx.message.recent_blockhash;
            wait_for_confirmation(
                signature,
                commitment,
                CONFIRM_POLL_INTERVAL,
                CONFIRM_TIMEOUT,
                || match client.get_signature_status_with_commitment(&signature, commitment) {
                    Ok(status) => status,
                    Err(e) => {
                        tracing::debug!("Status poll for {} failed: {}", signature, e);
                        None
                    }
                },
                || {
                    // landed but not yet at the target commitment
                    let seen = client
                        .get_signature_status_with_commitment(&signature, CommitmentConfig::processed())
                        .map(|status| status.is_some())
                        .unwrap_or(false);
                    seen || client
                        .is_blockhash_valid(&blockhash, CommitmentConfig::processed())
                        .unwrap_or(true)
                },
            )
        })
        .await
        .map_err(|e| SubmitError::Unconfirmed {
            signature: expected,
            reason: format!("Task join error: {}", e),
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = SolanaClient::new(
            "https://api.devnet.solana.com".to_string(),
            CommitmentConfig::confirmed(),
        );
        assert_eq!(client.url(), "https://api.devnet.solana.com");
    }

    #[tokio::test]
    async fn test_invalid_pubkey_is_rejected_locally() {
        let client = SolanaClient::new("http://127.0.0.1:1".to_string(), CommitmentConfig::confirmed());
        let result = client.get_balance("not-a-pubkey").await;
        assert!(matches!(result, Err(SolanaClientError::InvalidPublicKey(_))));
    }

    #[tokio::test]
    async fn test_invalid_signature_is_rejected_locally() {
        let client = SolanaClient::new("http://127.0.0.1:1".to_string(), CommitmentConfig::confirmed());
        let result = client.get_transaction("xyz").await;
        assert!(matches!(result, Err(SolanaClientError::InvalidSignature(_))));
    }

    #[test]
    fn test_transport_failure_may_have_landed() {
        let signature = Signature::new_unique();
        let err = ClientError::from(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"));

        assert!(matches!(
            classify_send_error(&err, signature),
            SubmitError::Unconfirmed { signature: s, .. } if s == signature
        ));
    }

    #[test]
    fn test_node_answer_is_rejection() {
        let err = ClientError::from(ClientErrorKind::Custom("blockhash not found".to_string()));
        assert!(matches!(
            classify_send_error(&err, Signature::new_unique()),
            SubmitError::Rejected(_)
        ));
    }

    #[test]
    fn test_failed_status_is_definite_failure() {
        let signature = Signature::new_unique();
        let status = Some(Err(TransactionError::InstructionError(
            3,
            solana_sdk::instruction::InstructionError::Custom(6002),
        )));

        match classify_status(status, true, signature, CommitmentConfig::confirmed()) {
            ConfirmPoll::Settled(SubmitError::Failed { signature: s, .. }) => assert_eq!(s, signature),
            other => panic!("expected on-chain failure, got {:?}", other),
        }
    }

    #[test]
    fn test_status_classification() {
        let signature = Signature::new_unique();
        let commitment = CommitmentConfig::finalized();

        assert_eq!(
            classify_status(Some(Ok(())), false, signature, commitment),
            ConfirmPoll::Confirmed
        );
        assert_eq!(
            classify_status(None, true, signature, commitment),
            ConfirmPoll::Pending
        );
        assert!(matches!(
            classify_status(None, false, signature, commitment),
            ConfirmPoll::Settled(SubmitError::Unconfirmed { .. })
        ));
    }

    #[test]
    fn test_wait_outlasts_slow_finalization() {
        let signature = Signature::new_unique();
        let mut polls = 0;

        // many more polls than a fixed short window would allow
        let result = wait_for_confirmation(
            signature,
            CommitmentConfig::finalized(),
            Duration::ZERO,
            Duration::from_secs(30),
            || {
                polls += 1;
                if polls < 200 {
                    None
                } else {
                    Some(Ok(()))
                }
            },
            || true,
        );

        assert_eq!(result, Ok(signature));
        assert_eq!(polls, 200);
    }

    #[test]
    fn test_wait_reports_on_chain_failure() {
        let signature = Signature::new_unique();
        let mut statuses = vec![None, None, Some(Err(TransactionError::AccountInUse))].into_iter();

        let result = wait_for_confirmation(
            signature,
            CommitmentConfig::confirmed(),
            Duration::ZERO,
            Duration::from_secs(30),
            || statuses.next().flatten(),
            || true,
        );

        assert!(matches!(result, Err(SubmitError::Failed { signature: s, .. }) if s == signature));
    }

    #[test]
    fn test_wait_stops_when_blockhash_expires() {
        let signature = Signature::new_unique();
        let mut checks = 0;

        let result = wait_for_confirmation(
            signature,
            CommitmentConfig::confirmed(),
            Duration::ZERO,
            Duration::from_secs(30),
            || None,
            || {
                checks += 1;
                checks < 5
            },
        );

        assert!(matches!(result, Err(SubmitError::Unconfirmed { .. })));
        assert_eq!(checks, 5);
    }

    #[test]
    fn test_wait_times_out_as_unconfirmed() {
        let result = wait_for_confirmation(
            Signature::new_unique(),
            CommitmentConfig::confirmed(),
            Duration::from_millis(1),
            Duration::from_millis(20),
            || None,
            || true,
        );

        assert!(matches!(result, Err(SubmitError::Unconfirmed { .. })));
    }

    #[test]
    fn test_error_display() {
        let err = SolanaClientError::RpcError("test".to_string());
        assert!(err.to_string().contains("RPC request failed"));
    }
}
