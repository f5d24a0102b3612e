//! Signer Resolution
//!
//! Maps the required signer pubkeys of a transaction message to the keypairs
//! that can sign for them. Signing is all-or-nothing: if any required signer
//! is missing, nothing is signed.

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    #[error("No keypair available for required signer {0}")]
    MissingSigner(Pubkey),
    #[error("Transaction is not fully signed")]
    Incomplete,
    #[error("Signer error: {0}")]
    Signer(String),
}

/// Keypairs available to sign a transaction, keyed by pubkey
#[derive(Default)]
pub struct SignerSet<'a> {
    keys: HashMap<Pubkey, &'a Keypair>,
}

impl<'a> SignerSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, keypair: &'a Keypair) -> Self {
        self.insert(keypair);
        self
    }

    pub fn insert(&mut self, keypair: &'a Keypair) {
        self.keys.insert(keypair.pubkey(), keypair);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Look up every pubkey, failing on the first one without a keypair
    pub fn resolve(&self, required: &[Pubkey]) -> Result<Vec<&'a Keypair>, SigningError> {
        required
            .iter()
            .map(|pubkey| {
                self.keys
                    .get(pubkey)
                    .copied()
                    .ok_or(SigningError::MissingSigner(*pubkey))
            })
            .collect()
    }

    /// Sign `transaction` with every signer its message requires.
    pub fn sign(&self, transaction: &mut Transaction) -> Result<(), SigningError> {
        let keypairs = self.resolve(required_signers(transaction))?;
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_sign(&keypairs, blockhash)
            .map_err(|e| SigningError::Signer(e.to_string()))?;

        if !transaction.is_signed() {
            return Err(SigningError::Incomplete);
        }
        Ok(())
    }
}

/// Signer pubkeys a transaction message requires, fee payer first
pub fn required_signers(transaction: &Transaction) -> &[Pubkey] {
    let count = transaction.message.header.num_required_signatures as usize;
    &transaction.message.account_keys[..count]
}
