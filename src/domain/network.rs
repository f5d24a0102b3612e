//! Network Mode
//!
//! The pump.fun accounts that are not part of the program IDL. Mainnet and
//! devnet share everything except the fee recipient, because the official fee
//! recipient account is not initialized on devnet.
//!
//! A `WellKnownAddresses` value is selected once and then captured by the
//! launcher, so every instruction built by one launcher sees the same variant.
//! Changing it while a launch is being built is not supported.

use serde::Deserialize;
use solana_sdk::{pubkey, pubkey::Pubkey};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// pump.fun program
pub const PUMP_FUN_PROGRAM: Pubkey = pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");

/// pump.fun global state account
pub const PUMP_FUN_GLOBAL: Pubkey = pubkey!("4wTV1YmiEkRvAtNtsSGPtUrqRYQMe5SKy2uB4Jjaxnjf");

/// pump.fun mint authority
pub const PUMP_FUN_MINT_AUTHORITY: Pubkey = pubkey!("TSLvdd1pWpHVjahSpsvCXUbgwsL3JAcvokwaKt1eokM");

/// pump.fun event authority
pub const PUMP_FUN_EVENT_AUTHORITY: Pubkey = pubkey!("Ce6TQqeHC9p8KetsN6JsjHK7UTZk7nasjjnr7XxXp9F1");

/// Mainnet fee recipient
pub const MAINNET_FEE_RECIPIENT: Pubkey = pubkey!("CebN5WGQ4jvEPvsVU4EoHEpgzq1VV7AbicfhtW4xC9iM");

/// Devnet fee recipient
pub const DEVNET_FEE_RECIPIENT: Pubkey = pubkey!("68yFSZxzLWJXkxxRGydZ63C6mHx1NLEDWmwN9Lb5yySg");

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown network mode: {0} (expected \"mainnet\" or \"devnet\")")]
pub struct UnknownNetworkMode(pub String);

/// Which cluster the launcher targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    #[default]
    Mainnet,
    Devnet,
}

impl FromStr for NetworkMode {
    type Err = UnknownNetworkMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Self::Mainnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(UnknownNetworkMode(other.to_string())),
        }
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Devnet => write!(f, "devnet"),
        }
    }
}

/// pump.fun accounts that are fixed per cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownAddresses {
    pub program_id: Pubkey,
    pub mint_authority: Pubkey,
    pub event_authority: Pubkey,
    pub fee_recipient: Pubkey,
    pub global: Pubkey,
}

impl WellKnownAddresses {
    pub const fn mainnet() -> Self {
        Self {
            program_id: PUMP_FUN_PROGRAM,
            mint_authority: PUMP_FUN_MINT_AUTHORITY,
            event_authority: PUMP_FUN_EVENT_AUTHORITY,
            fee_recipient: MAINNET_FEE_RECIPIENT,
            global: PUMP_FUN_GLOBAL,
        }
    }

    pub const fn devnet() -> Self {
        Self {
            fee_recipient: DEVNET_FEE_RECIPIENT,
            ..Self::mainnet()
        }
    }

    pub fn for_mode(mode: NetworkMode) -> Self {
        match mode {
            NetworkMode::Mainnet => Self::mainnet(),
            NetworkMode::Devnet => Self::devnet(),
        }
    }

    /// Switch to the devnet fee recipient. Calling it again is a no-op.
    pub fn use_devnet_addresses(&mut self) {
        self.fee_recipient = DEVNET_FEE_RECIPIENT;
    }

    /// Which variant these addresses correspond to
    pub fn mode(&self) -> NetworkMode {
        if self.fee_recipient == DEVNET_FEE_RECIPIENT {
            NetworkMode::Devnet
        } else {
            NetworkMode::Mainnet
        }
    }
}

impl Default for WellKnownAddresses {
    fn default() -> Self {
        Self::mainnet()
    }
}
