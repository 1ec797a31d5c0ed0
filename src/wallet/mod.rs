// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Deterministic Custodial Wallets
//!
//! Wallets are never stored. Each one is recomputed on demand from the
//! caller's identity fields and the process-wide `WALLET_SECRET`:
//!
//! ```text
//! digest  = HMAC-SHA256(key = WALLET_SECRET, "{id}:{created_at}:{secret}")
//! keypair = Ed25519 from digest (the 32 bytes are the seed, no stretching)
//! ```
//!
//! ## Security Model
//!
//! Anyone holding `WALLET_SECRET` can recompute every user's private key
//! offline. The secret is the only protection of every derived wallet.
//!
//! ## Mnemonics
//!
//! - [`MnemonicKind::Display`]: 12 words picked by `digest[2*i] % wordlist`.
//!   Non-standard and lossy; it cannot be turned back into the key.
//! - [`MnemonicKind::Bip39`]: a standard phrase from `digest[..16]`. The
//!   wallet key is then derived from that phrase, so the address differs from
//!   the display variant and the phrase restores the wallet elsewhere.

pub mod keys;

use serde::{Deserialize, Serialize};
use sha2::Sha256;
use hmac::{Hmac, Mac};
use utoipa::ToSchema;

use crate::chain::SuiAddress;

pub use keys::SuiKeypair;

/// Separator placed between identity fields before hashing.
const FIELD_DELIMITER: char = ':';

/// Number of words in either mnemonic form.
pub const MNEMONIC_WORDS: usize = 12;

type HmacSha256 = Hmac<Sha256>;

/// Identity fields supplied by the caller for one derivation.
#[derive(Debug, Clone, Copy)]
pub struct UserIdentity<'a> {
    pub id: &'a str,
    pub created_at: &'a str,
    pub secret: &'a str,
}

/// Which mnemonic accompanies a derived wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MnemonicKind {
    /// Cosmetic word list; not a recovery phrase.
    #[default]
    Display,
    /// Standard BIP-39 phrase that restores the wallet.
    Bip39,
}

/// A wallet recomputed from a [`UserIdentity`].
#[derive(Debug, Clone)]
pub struct DerivedWallet {
    keypair: SuiKeypair,
    mnemonic: Vec<&'static str>,
    mnemonic_kind: MnemonicKind,
}

impl DerivedWallet {
    pub fn keypair(&self) -> &SuiKeypair {
        &self.keypair
    }

    pub fn address(&self) -> SuiAddress {
        self.keypair.address()
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.keypair.public_key_bytes()
    }

    pub fn private_key_seed(&self) -> [u8; 32] {
        self.keypair.private_key_seed()
    }

    pub fn mnemonic_words(&self) -> &[&'static str] {
        &self.mnemonic
    }

    /// Words joined by single spaces.
    pub fn mnemonic_phrase(&self) -> String {
        self.mnemonic.join(" ")
    }

    pub fn mnemonic_kind(&self) -> MnemonicKind {
        self.mnemonic_kind
    }
}

/// Errors raised while deriving or importing keys.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("WALLET_SECRET is not configured")]
    MissingWalletSecret,

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Key encoding failed: {0}")]
    Encoding(String),

    #[error("Cannot sign transaction: {0}")]
    InvalidTransaction(String),
}

/// HMAC-SHA256 of the delimited identity fields, keyed by `wallet_secret`.
pub fn identity_digest(
    identity: UserIdentity<'_>,
    wallet_secret: &str,
) -> Result<[u8; 32], WalletError> {
    if identity.id.trim().is_empty() {
        return Err(WalletError::MissingField("id"));
    }
    if identity.secret.is_empty() {
        return Err(WalletError::MissingField("secret_key"));
    }
    if wallet_secret.is_empty() {
        return Err(WalletError::MissingWalletSecret);
    }

    let seed_input = format!(
        "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
        identity.id, identity.created_at, identity.secret
    );

    let mut mac = HmacSha256::new_from_slice(wallet_secret.as_bytes())
        .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;
    mac.update(seed_input.as_bytes());
    Ok(mac.finalize().into_bytes().into())
}

/// Derive the wallet for `identity`.
pub fn derive_wallet(
    identity: UserIdentity<'_>,
    wallet_secret: &str,
    kind: MnemonicKind,
) -> Result<DerivedWallet, WalletError> {
    let digest = identity_digest(identity, wallet_secret)?;

    match kind {
        MnemonicKind::Display => Ok(DerivedWallet {
            keypair: SuiKeypair::from_seed(&digest),
            mnemonic: display_mnemonic(&digest),
            mnemonic_kind: kind,
        }),
        MnemonicKind::Bip39 => {
            let mnemonic = bip39::Mnemonic::from_entropy(&digest[..16])
                .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
            Ok(DerivedWallet {
                keypair: SuiKeypair::from_bip39(&mnemonic)?,
                mnemonic: mnemonic.words().collect(),
                mnemonic_kind: kind,
            })
        }
    }
}

/// Cosmetic word list: word `i` is `WORDLIST[digest[2*i] % WORDLIST.len()]`.
pub fn display_mnemonic(digest: &[u8; 32]) -> Vec<&'static str> {
    let wordlist = bip39::Language::English.word_list();
    (0..MNEMONIC_WORDS)
        .map(|i| wordlist[usize::from(digest[2 * i]) % wordlist.len()])
        .collect()
}
