//! Token Launcher
//!
//! Builds, signs and submits the transaction that creates a pump.fun token and
//! its bonding curve, optionally buying into it in the same transaction.
//!
//! A launch moves through
//! `Unbuilt -> InstructionsAssembled -> Unsigned -> Signed -> Submitted -> Confirmed | Failed`
//! and stops at the first failing step. Nothing reaches the network after a
//! local failure, and the launcher never retries on its own.

use std::fmt;

use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::adapters::pump_fun::{create_instruction, CreateAccounts, CreateArgs, InstructionError};
use crate::domain::amount::{sol_to_lamports, AmountError};
use crate::domain::assembler::{assemble_launch_instructions, verify_instruction_order, OrderingError};
use crate::domain::known_programs::MAX_TRANSACTION_SIZE;
use crate::domain::pda::{launch_addresses, DerivationError, LaunchAddresses};
use crate::domain::priority_fee::{fee_sample_accounts, recommended_priority_fee, FeeEstimationError};
use crate::domain::signing::{SignerSet, SigningError};
use crate::domain::{NetworkMode, WellKnownAddresses, DEFAULT_COMPUTE_UNIT_LIMIT};
use crate::ports::{BuyError, BuyInstructionBuilder, BuyRequest, LedgerRpc, RpcError, SubmitError};

/// What a network fetch was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    PrioritizationFees,
    Blockhash,
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrioritizationFees => write!(f, "prioritization fees"),
            Self::Blockhash => write!(f, "latest blockhash"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid buy amount: {0}")]
    Amount(#[from] AmountError),
    #[error("Create instruction: {0}")]
    CreateInstruction(#[from] InstructionError),
    #[error("Buy instructions: {0}")]
    BuyInstructions(#[from] BuyError),
    #[error("Instruction order: {0}")]
    Ordering(#[from] OrderingError),
    #[error("Transaction has no instructions")]
    Empty,
    #[error("Transaction is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
    #[error("Failed to serialize transaction: {0}")]
    Serialization(String),
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Address derivation failed: {0}")]
    AddressDerivation(#[from] DerivationError),
    #[error("Fee estimation failed: {0}")]
    FeeEstimation(#[from] FeeEstimationError),
    #[error("Failed to fetch {target}: {source}")]
    NetworkFetch {
        target: FetchTarget,
        #[source]
        source: RpcError,
    },
    #[error("Transaction build failed: {0}")]
    TransactionBuild(#[from] BuildError),
    #[error("Signing failed: {0}")]
    Signing(#[from] SigningError),
    #[error("Submission failed: {0}")]
    Submission(#[from] SubmitError),
}

impl LaunchError {
    /// Network conditions that may clear on their own
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LaunchError::NetworkFetch { .. }
                | LaunchError::FeeEstimation(FeeEstimationError::InsufficientSampleData)
        )
    }

    /// True when the transaction may be on the ledger; check before resubmitting
    pub fn may_have_landed(&self) -> bool {
        matches!(self, LaunchError::Submission(SubmitError::Unconfirmed { .. }))
    }

    /// Last stage reached before the failure
    pub fn stage(&self) -> LaunchStage {
        match self {
            LaunchError::AddressDerivation(_)
            | LaunchError::FeeEstimation(_)
            | LaunchError::NetworkFetch {
                target: FetchTarget::PrioritizationFees,
                ..
            } => LaunchStage::Unbuilt,
            LaunchError::TransactionBuild(
                BuildError::Amount(_) | BuildError::CreateInstruction(_) | BuildError::BuyInstructions(_),
            ) => LaunchStage::Unbuilt,
            LaunchError::TransactionBuild(_) | LaunchError::NetworkFetch { .. } => {
                LaunchStage::InstructionsAssembled
            }
            LaunchError::Signing(_) => LaunchStage::Unsigned,
            LaunchError::Submission(SubmitError::Rejected(_)) => LaunchStage::Signed,
            LaunchError::Submission(SubmitError::Unconfirmed { .. }) => LaunchStage::Submitted,
            LaunchError::Submission(SubmitError::Failed { .. }) => LaunchStage::Failed,
        }
    }
}

/// Launch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStage {
    Unbuilt,
    InstructionsAssembled,
    Unsigned,
    Signed,
    Submitted,
    Confirmed,
    Failed,
}

impl fmt::Display for LaunchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unbuilt => "unbuilt",
            Self::InstructionsAssembled => "instructions-assembled",
            Self::Unsigned => "unsigned",
            Self::Signed => "signed",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Launcher settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    pub compute_unit_limit: u32,
    /// Ceiling on the estimated compute unit price, in micro-lamports
    pub max_priority_fee: Option<u64>,
    /// Commitment to wait for after submission
    pub confirm_commitment: CommitmentConfig,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            compute_unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
            max_priority_fee: None,
            confirm_commitment: CommitmentConfig::confirmed(),
        }
    }
}

/// User-facing launch parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTokenParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Initial buy in SOL; 0 skips the buy
    pub buy_amount_sol: f64,
    pub slippage_percent: f64,
}

impl CreateTokenParams {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            buy_amount_sol: 0.0,
            slippage_percent: 0.0,
        }
    }

    pub fn with_buy(mut self, buy_amount_sol: f64, slippage_percent: f64) -> Self {
        self.buy_amount_sol = buy_amount_sol;
        self.slippage_percent = slippage_percent;
        self
    }
}

/// Ordered instructions plus what went into them
#[derive(Debug, Clone)]
pub struct AssembledLaunch {
    pub instructions: Vec<Instruction>,
    pub addresses: LaunchAddresses,
    pub priority_fee: u64,
    pub buy_instruction_count: usize,
}

/// A signed launch transaction that has not been submitted
#[derive(Debug, Clone)]
pub struct PreparedLaunch {
    pub transaction: Transaction,
    pub mint: Pubkey,
    pub addresses: LaunchAddresses,
    pub priority_fee: u64,
    pub instruction_count: usize,
}

/// Result of a confirmed launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReceipt {
    pub signature: Signature,
    pub mint: Pubkey,
    pub addresses: LaunchAddresses,
    pub priority_fee: u64,
    pub instruction_count: usize,
}

/// Creates pump.fun tokens through a ledger RPC and a buy builder.
///
/// The address set is fixed when the launcher is built, so concurrent
/// launches from one launcher all target the same network.
pub struct TokenLauncher<R, B> {
    rpc: R,
    buy_builder: B,
    addresses: WellKnownAddresses,
    config: LaunchConfig,
}

impl<R: LedgerRpc, B: BuyInstructionBuilder> TokenLauncher<R, B> {
    /// Launcher targeting mainnet with default settings
    pub fn new(rpc: R, buy_builder: B) -> Self {
        Self {
            rpc,
            buy_builder,
            addresses: WellKnownAddresses::mainnet(),
            config: LaunchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LaunchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_network(mut self, mode: NetworkMode) -> Self {
        self.addresses = WellKnownAddresses::for_mode(mode);
        self
    }

    /// Use the devnet fee recipient. Idempotent.
    pub fn use_devnet_addresses(mut self) -> Self {
        self.addresses.use_devnet_addresses();
        self
    }

    pub fn addresses(&self) -> &WellKnownAddresses {
        &self.addresses
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn derive_addresses(&self, mint: &Pubkey) -> Result<LaunchAddresses, LaunchError> {
        Ok(launch_addresses(mint, &self.addresses.program_id)?)
    }

    /// Mean recent prioritization fee over the accounts a launch touches
    pub async fn estimate_priority_fee(&self, payer: &Pubkey) -> Result<u64, LaunchError> {
        let accounts = fee_sample_accounts(payer, &self.addresses);
        let samples = self
            .rpc
            .recent_prioritization_fees(&accounts)
            .await
            .map_err(|source| LaunchError::NetworkFetch {
                target: FetchTarget::PrioritizationFees,
                source,
            })?;

        let fees: Vec<u64> = samples.iter().map(|s| s.prioritization_fee).collect();
        let fee = recommended_priority_fee(&fees, self.config.max_priority_fee)?;
        debug!("Priority fee {} micro-lamports from {} samples", fee, fees.len());
        Ok(fee)
    }

    pub async fn assemble_instructions(
        &self,
        user: &Pubkey,
        mint: &Pubkey,
        params: &CreateTokenParams,
    ) -> Result<AssembledLaunch, LaunchError> {
        let addresses = self.derive_addresses(mint)?;
        let priority_fee = self.estimate_priority_fee(user).await?;

        let args = CreateArgs {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            uri: params.uri.clone(),
        };
        let accounts = CreateAccounts::new(*mint, *user, &addresses, &self.addresses);
        let create_ix = create_instruction(&args, &accounts).map_err(BuildError::from)?;

        // rejects NaN and negative amounts before the zero check can skip them
        let lamports = sol_to_lamports(params.buy_amount_sol).map_err(BuildError::from)?;
        let buy_ixs = if lamports > 0 {
            let request = BuyRequest {
                mint: *mint,
                buyer: *user,
                lamports,
                slippage_percent: params.slippage_percent,
            };
            self.buy_builder
                .buy_instructions(&self.addresses, &request)
                .await
                .map_err(BuildError::from)?
        } else {
            Vec::new()
        };
        let buy_instruction_count = buy_ixs.len();

        let instructions = assemble_launch_instructions(
            self.config.compute_unit_limit,
            priority_fee,
            create_ix,
            buy_ixs,
        );
        verify_instruction_order(&instructions).map_err(BuildError::from)?;

        Ok(AssembledLaunch {
            instructions,
            addresses,
            priority_fee,
            buy_instruction_count,
        })
    }

    /// Unsigned transaction paid for by `payer`
    pub fn build_transaction(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        blockhash: Hash,
    ) -> Result<Transaction, LaunchError> {
        if instructions.is_empty() {
            return Err(BuildError::Empty.into());
        }
        let message = Message::new_with_blockhash(instructions, Some(payer), &blockhash);
        let transaction = Transaction::new_unsigned(message);

        let size = bincode::serialized_size(&transaction)
            .map_err(|e| BuildError::Serialization(e.to_string()))? as usize;
        if size > MAX_TRANSACTION_SIZE {
            return Err(BuildError::TooLarge {
                size,
                max: MAX_TRANSACTION_SIZE,
            }
            .into());
        }
        Ok(transaction)
    }

    /// Every step up to and including signing, without submitting
    pub async fn build_signed_transaction(
        &self,
        user: &Keypair,
        mint: &Keypair,
        params: &CreateTokenParams,
    ) -> Result<PreparedLaunch, LaunchError> {
        let mint_pubkey = mint.pubkey();
        debug!("Launch {}: {}", mint_pubkey, LaunchStage::Unbuilt);

        let assembled = self
            .assemble_instructions(&user.pubkey(), &mint_pubkey, params)
            .await?;
        debug!(
            "Launch {}: {} ({} instructions, {} buy)",
            mint_pubkey,
            LaunchStage::InstructionsAssembled,
            assembled.instructions.len(),
            assembled.buy_instruction_count
        );

        let blockhash = self
            .rpc
            .latest_blockhash(CommitmentConfig::finalized())
            .await
            .map_err(|source| LaunchError::NetworkFetch {
                target: FetchTarget::Blockhash,
                source,
            })?;

        let mut transaction = self.build_transaction(&assembled.instructions, &user.pubkey(), blockhash)?;
        debug!("Launch {}: {}", mint_pubkey, LaunchStage::Unsigned);

        SignerSet::new().with(user).with(mint).sign(&mut transaction)?;
        debug!("Launch {}: {}", mint_pubkey, LaunchStage::Signed);

        Ok(PreparedLaunch {
            transaction,
            mint: mint_pubkey,
            addresses: assembled.addresses,
            priority_fee: assembled.priority_fee,
            instruction_count: assembled.instructions.len(),
        })
    }

    /// Submit a prepared launch and wait for the configured commitment
    pub async fn submit(&self, prepared: &PreparedLaunch) -> Result<Signature, LaunchError> {
        if !prepared.transaction.is_signed() {
            return Err(SigningError::Incomplete.into());
        }

        info!(
            "Submitting launch of {} (priority fee {} micro-lamports)",
            prepared.mint, prepared.priority_fee
        );
        match self
            .rpc
            .send_and_confirm(&prepared.transaction, self.config.confirm_commitment)
            .await
        {
            Ok(signature) => {
                info!("Launch {}: {} ({})", prepared.mint, LaunchStage::Confirmed, signature);
                Ok(signature)
            }
            Err(err @ SubmitError::Unconfirmed { .. }) => {
                warn!(
                    "Launch {}: {} but not confirmed, check the ledger before resubmitting: {}",
                    prepared.mint,
                    LaunchStage::Submitted,
                    err
                );
                Err(err.into())
            }
            Err(err) => {
                error!("Launch {}: {}: {}", prepared.mint, LaunchStage::Failed, err);
                Err(err.into())
            }
        }
    }

    pub async fn create_token_with_receipt(
        &self,
        user: &Keypair,
        mint: &Keypair,
        params: &CreateTokenParams,
    ) -> Result<LaunchReceipt, LaunchError> {
        let prepared = self.build_signed_transaction(user, mint, params).await?;
        let signature = self.submit(&prepared).await?;
        Ok(LaunchReceipt {
            signature,
            mint: prepared.mint,
            addresses: prepared.addresses,
            priority_fee: prepared.priority_fee,
            instruction_count: prepared.instruction_count,
        })
    }

    /// Create `mint` with its bonding curve, buying `params.buy_amount_sol` if > 0
    pub async fn create_token(
        &self,
        user: &Keypair,
        mint: &Keypair,
        params: &CreateTokenParams,
    ) -> Result<Signature, LaunchError> {
        self.create_token_with_receipt(user, mint, params)
            .await
            .map(|receipt| receipt.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::DEVNET_FEE_RECIPIENT;
    use crate::ports::buy::MockBuyInstructionBuilder;
    use crate::ports::{LedgerCall, MockLedger};
    use solana_sdk::instruction::AccountMeta;

    fn params() -> CreateTokenParams {
        CreateTokenParams::new("Butter", "BTR", "https://ipfs.io/ipfs/butter")
    }

    fn marker_ix(tag: u8) -> Instruction {
        Instruction::new_with_bytes(Pubkey::new_unique(), &[tag], vec![])
    }

    fn no_buy_builder() -> MockBuyInstructionBuilder {
        let mut builder = MockBuyInstructionBuilder::new();
        builder.expect_buy_instructions().times(0);
        builder
    }

    #[tokio::test]
    async fn test_zero_buy_gives_three_instructions() {
        let launcher = TokenLauncher::new(MockLedger::new().with_fees(vec![100, 300]), no_buy_builder());
        let user = Keypair::new();
        let mint = Keypair::new();

        let assembled = launcher
            .assemble_instructions(&user.pubkey(), &mint.pubkey(), &params())
            .await
            .unwrap();

        assert_eq!(assembled.instructions.len(), 3);
        assert_eq!(assembled.priority_fee, 200);
        assert_eq!(assembled.buy_instruction_count, 0);
        assert_eq!(assembled.instructions[2].program_id, launcher.addresses().program_id);
    }

    #[tokio::test]
    async fn test_buy_instructions_follow_create() {
        let buys = vec![marker_ix(7), marker_ix(8)];
        let returned = buys.clone();
        let mut builder = MockBuyInstructionBuilder::new();
        builder
            .expect_buy_instructions()
            .withf(|_, request| request.lamports == 1_500_000_000 && request.slippage_percent == 10.0)
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));

        let launcher = TokenLauncher::new(MockLedger::new(), builder);
        let user = Keypair::new();
        let mint = Keypair::new();

        let assembled = launcher
            .assemble_instructions(&user.pubkey(), &mint.pubkey(), &params().with_buy(1.5, 10.0))
            .await
            .unwrap();

        assert_eq!(assembled.instructions.len(), 3 + buys.len());
        assert_eq!(&assembled.instructions[3..], &buys[..]);
    }

    #[tokio::test]
    async fn test_devnet_addresses_reach_buy_builder() {
        let mut builder = MockBuyInstructionBuilder::new();
        builder
            .expect_buy_instructions()
            .withf(|addresses, _| addresses.fee_recipient == DEVNET_FEE_RECIPIENT)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let launcher = TokenLauncher::new(MockLedger::new(), builder)
            .use_devnet_addresses()
            .use_devnet_addresses();
        let user = Keypair::new();
        let mint = Keypair::new();

        launcher
            .assemble_instructions(&user.pubkey(), &mint.pubkey(), &params().with_buy(0.1, 5.0))
            .await
            .unwrap();
        assert_eq!(launcher.addresses().mode(), NetworkMode::Devnet);
    }

    #[tokio::test]
    async fn test_empty_fee_samples_stop_before_blockhash() {
        let ledger = MockLedger::new().with_fees(vec![]);
        let launcher = TokenLauncher::new(ledger.clone(), no_buy_builder());

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchError::FeeEstimation(FeeEstimationError::InsufficientSampleData)
        ));
        assert_eq!(err.stage(), LaunchStage::Unbuilt);
        assert_eq!(ledger.get_calls().len(), 1);
        assert!(ledger.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_fee_fetch_failure_is_retryable() {
        let ledger = MockLedger::new().with_fee_error(RpcError::Request("timeout".to_string()));
        let launcher = TokenLauncher::new(ledger, no_buy_builder());

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchError::NetworkFetch {
                target: FetchTarget::PrioritizationFees,
                ..
            }
        ));
        assert!(err.is_retryable());
        assert!(!err.may_have_landed());
    }

    #[tokio::test]
    async fn test_blockhash_fetched_at_finalized() {
        let ledger = MockLedger::new();
        let launcher = TokenLauncher::new(ledger.clone(), no_buy_builder());

        launcher
            .build_signed_transaction(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap();

        assert!(ledger
            .get_calls()
            .contains(&LedgerCall::LatestBlockhash(CommitmentConfig::finalized())));
        assert!(ledger.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_blockhash_failure() {
        let ledger = MockLedger::new().with_blockhash_error(RpcError::Request("503".to_string()));
        let launcher = TokenLauncher::new(ledger.clone(), no_buy_builder());

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchError::NetworkFetch {
                target: FetchTarget::Blockhash,
                ..
            }
        ));
        assert_eq!(err.stage(), LaunchStage::InstructionsAssembled);
        assert!(ledger.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_signer_never_submits() {
        let stranger = Pubkey::new_unique();
        let mut builder = MockBuyInstructionBuilder::new();
        builder.expect_buy_instructions().returning(move |_, _| {
            Ok(vec![Instruction::new_with_bytes(
                Pubkey::new_unique(),
                &[1],
                vec![AccountMeta::new(stranger, true)],
            )])
        });
        let ledger = MockLedger::new();
        let launcher = TokenLauncher::new(ledger.clone(), builder);

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params().with_buy(1.0, 1.0))
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::Signing(SigningError::MissingSigner(key)) if key == stranger));
        assert_eq!(err.stage(), LaunchStage::Unsigned);
        assert!(ledger.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_successful_launch_signed_by_user_and_mint() {
        let ledger = MockLedger::new();
        let launcher = TokenLauncher::new(ledger.clone(), no_buy_builder());
        let user = Keypair::new();
        let mint = Keypair::new();

        let receipt = launcher
            .create_token_with_receipt(&user, &mint, &params())
            .await
            .unwrap();

        let submitted = ledger.submitted();
        assert_eq!(submitted.len(), 1);
        let tx = &submitted[0];
        assert_eq!(tx.message.account_keys[0], user.pubkey());
        assert_eq!(tx.message.header.num_required_signatures, 2);
        assert!(tx.verify().is_ok());
        assert_eq!(receipt.signature, tx.signatures[0]);
        assert_eq!(receipt.mint, mint.pubkey());
        assert_eq!(receipt.instruction_count, 3);
    }

    #[tokio::test]
    async fn test_submission_uses_configured_commitment() {
        let ledger = MockLedger::new();
        let config = LaunchConfig {
            confirm_commitment: CommitmentConfig::finalized(),
            ..LaunchConfig::default()
        };
        let launcher = TokenLauncher::new(ledger.clone(), no_buy_builder()).with_config(config);

        launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap();

        let commitment = ledger.get_calls().into_iter().find_map(|call| match call {
            LedgerCall::SendAndConfirm { commitment, .. } => Some(commitment),
            _ => None,
        });
        assert_eq!(commitment, Some(CommitmentConfig::finalized()));
    }

    #[tokio::test]
    async fn test_unconfirmed_submission_is_ambiguous() {
        let ledger = MockLedger::new().with_submit_error(SubmitError::Unconfirmed {
            signature: Signature::default(),
            reason: "timed out".to_string(),
        });
        let launcher = TokenLauncher::new(ledger, no_buy_builder());

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap_err();

        assert!(err.may_have_landed());
        assert!(!err.is_retryable());
        assert_eq!(err.stage(), LaunchStage::Submitted);
    }

    #[tokio::test]
    async fn test_rejected_submission_did_not_land() {
        let ledger = MockLedger::new()
            .with_submit_error(SubmitError::Rejected("simulation failed".to_string()));
        let launcher = TokenLauncher::new(ledger, no_buy_builder());

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap_err();

        assert!(!err.may_have_landed());
        assert_eq!(err.stage(), LaunchStage::Signed);
    }

    #[tokio::test]
    async fn test_unsigned_transaction_is_not_submitted() {
        let ledger = MockLedger::new();
        let launcher = TokenLauncher::new(ledger.clone(), no_buy_builder());
        let user = Keypair::new();
        let mint = Keypair::new();

        let mut prepared = launcher
            .build_signed_transaction(&user, &mint, &params())
            .await
            .unwrap();
        prepared.transaction.signatures[1] = Signature::default();

        let err = launcher.submit(&prepared).await.unwrap_err();
        assert!(matches!(err, LaunchError::Signing(SigningError::Incomplete)));
        assert!(ledger.submitted().is_empty());
    }

    #[test]
    fn test_build_transaction_rejects_empty_list() {
        let launcher = TokenLauncher::new(MockLedger::new(), no_buy_builder());
        let err = launcher
            .build_transaction(&[], &Pubkey::new_unique(), Hash::new_unique())
            .unwrap_err();
        assert!(matches!(err, LaunchError::TransactionBuild(BuildError::Empty)));
    }

    #[test]
    fn test_build_transaction_rejects_oversized() {
        let launcher = TokenLauncher::new(MockLedger::new(), no_buy_builder());
        let big = Instruction::new_with_bytes(Pubkey::new_unique(), &[0u8; 2_000], vec![]);
        let err = launcher
            .build_transaction(&[big], &Pubkey::new_unique(), Hash::new_unique())
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchError::TransactionBuild(BuildError::TooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_nan_buy_amount_is_not_skipped() {
        let ledger = MockLedger::new();
        let launcher = TokenLauncher::new(ledger.clone(), no_buy_builder());

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params().with_buy(f64::NAN, 10.0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LaunchError::TransactionBuild(BuildError::Amount(AmountError::InvalidSol(_)))
        ));
        assert!(ledger.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_negative_buy_amount_is_build_error() {
        let launcher = TokenLauncher::new(MockLedger::new(), no_buy_builder());
        let err = launcher
            .assemble_instructions(&Pubkey::new_unique(), &Pubkey::new_unique(), &params().with_buy(-0.5, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::TransactionBuild(BuildError::Amount(_))));
    }

    #[tokio::test]
    async fn test_on_chain_failure_is_not_success() {
        let ledger = MockLedger::new().with_submit_error(SubmitError::Failed {
            signature: Signature::default(),
            reason: "custom program error: 0x1772".to_string(),
        });
        let launcher = TokenLauncher::new(ledger, no_buy_builder());

        let err = launcher
            .create_token(&Keypair::new(), &Keypair::new(), &params())
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::Submission(SubmitError::Failed { .. })));
        assert!(!err.may_have_landed());
        assert!(!err.is_retryable());
        assert_eq!(err.stage(), LaunchStage::Failed);
    }

    #[tokio::test]
    async fn test_invalid_buy_amount_is_build_error() {
        let launcher = TokenLauncher::new(MockLedger::new(), no_buy_builder());
        let err = launcher
            .assemble_instructions(
                &Pubkey::new_unique(),
                &Pubkey::new_unique(),
                &params().with_buy(f64::INFINITY, 1.0),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchError::TransactionBuild(BuildError::Amount(_))
        ));
    }
}
