//! pump.fun `create` and `buy` instruction encoding
//!
//! Account order follows the program IDL. Arguments are borsh-encoded after
//! the 8-byte Anchor discriminator.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use thiserror::Error;

use crate::domain::known_programs::{
    ASSOCIATED_TOKEN_PROGRAM, RENT_SYSVAR, SYSTEM_PROGRAM, TOKEN_METADATA_PROGRAM, TOKEN_PROGRAM,
};
use crate::domain::{LaunchAddresses, WellKnownAddresses};

use super::types::{BuyArgs, CreateArgs, BUY_DISCRIMINATOR, CREATE_DISCRIMINATOR};

#[derive(Debug, Error)]
pub enum InstructionError {
    #[error("Failed to serialize instruction arguments: {0}")]
    Serialization(#[from] std::io::Error),
}

fn encode<T: BorshSerialize>(discriminator: &[u8; 8], args: &T) -> Result<Vec<u8>, InstructionError> {
    let mut data = discriminator.to_vec();
    args.serialize(&mut data)?;
    Ok(data)
}

/// Accounts of the `create` instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAccounts {
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub global: Pubkey,
    pub mpl_token_metadata: Pubkey,
    pub metadata: Pubkey,
    pub user: Pubkey,
    pub system_program: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    pub rent: Pubkey,
    pub event_authority: Pubkey,
    pub program: Pubkey,
}

impl CreateAccounts {
    pub fn new(
        mint: Pubkey,
        user: Pubkey,
        derived: &LaunchAddresses,
        addresses: &WellKnownAddresses,
    ) -> Self {
        Self {
            mint,
            mint_authority: addresses.mint_authority,
            bonding_curve: derived.curve.bonding_curve,
            associated_bonding_curve: derived.curve.associated_bonding_curve,
            global: addresses.global,
            mpl_token_metadata: TOKEN_METADATA_PROGRAM,
            metadata: derived.metadata,
            user,
            system_program: SYSTEM_PROGRAM,
            token_program: TOKEN_PROGRAM,
            associated_token_program: ASSOCIATED_TOKEN_PROGRAM,
            rent: RENT_SYSVAR,
            event_authority: addresses.event_authority,
            program: addresses.program_id,
        }
    }

    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.mint, true),
            AccountMeta::new_readonly(self.mint_authority, false),
            AccountMeta::new(self.bonding_curve, false),
            AccountMeta::new(self.associated_bonding_curve, false),
            AccountMeta::new_readonly(self.global, false),
            AccountMeta::new_readonly(self.mpl_token_metadata, false),
            AccountMeta::new(self.metadata, false),
            AccountMeta::new(self.user, true),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.associated_token_program, false),
            AccountMeta::new_readonly(self.rent, false),
            AccountMeta::new_readonly(self.event_authority, false),
            AccountMeta::new_readonly(self.program, false),
        ]
    }
}

pub fn create_instruction(
    args: &CreateArgs,
    accounts: &CreateAccounts,
) -> Result<Instruction, InstructionError> {
    Ok(Instruction {
        program_id: accounts.program,
        accounts: accounts.to_account_metas(),
        data: encode(&CREATE_DISCRIMINATOR, args)?,
    })
}

/// Accounts of the `buy` instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyAccounts {
    pub global: Pubkey,
    pub fee_recipient: Pubkey,
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub associated_user: Pubkey,
    pub user: Pubkey,
    pub event_authority: Pubkey,
    pub program: Pubkey,
}

impl BuyAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.global, false),
            AccountMeta::new(self.fee_recipient, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new(self.bonding_curve, false),
            AccountMeta::new(self.associated_bonding_curve, false),
            AccountMeta::new(self.associated_user, false),
            AccountMeta::new(self.user, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM, false),
            AccountMeta::new_readonly(RENT_SYSVAR, false),
            AccountMeta::new_readonly(self.event_authority, false),
            AccountMeta::new_readonly(self.program, false),
        ]
    }
}

pub fn buy_instruction(args: &BuyArgs, accounts: &BuyAccounts) -> Result<Instruction, InstructionError> {
    Ok(Instruction {
        program_id: accounts.program,
        accounts: accounts.to_account_metas(),
        data: encode(&BUY_DISCRIMINATOR, args)?,
    })
}
