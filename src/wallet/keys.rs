// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ed25519 keypairs in the Sui key format.
//!
//! Address derivation and the transaction signing digest come from
//! `sui_sdk_types`; this module owns the key material and the encodings
//! around it:
//! - private keys exported as Bech32 `suiprivkey1...` (flag || 32-byte seed)
//! - mnemonics derived along SLIP-0010 path `m/44'/784'/0'/0'/0'`

use std::fmt;

use base64ct::{Base64, Encoding};
use bech32::{Bech32, Hrp};
use ed25519_dalek::{Signer, SigningKey};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use sui_sdk_types::{
    Ed25519PublicKey, Ed25519Signature, SimpleSignature, Transaction, UserSignature,
};

use super::WalletError;
use crate::chain::SuiAddress;

/// Signature scheme flag for Ed25519.
pub const ED25519_FLAG: u8 = 0x00;

/// Human-readable part of Bech32-encoded private keys.
const PRIVATE_KEY_HRP: Hrp = Hrp::parse_unchecked("suiprivkey");

/// Default Sui derivation path, every component hardened.
pub const DERIVATION_PATH: [u32; 5] = [44, 784, 0, 0, 0];

const HARDENED_OFFSET: u32 = 0x8000_0000;

type HmacSha512 = Hmac<Sha512>;

/// Ed25519 signing keypair.
///
/// `Debug` never prints key material.
#[derive(Clone)]
pub struct SuiKeypair {
    signing_key: SigningKey,
}

impl SuiKeypair {
    /// Keypair from a raw 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse a private key given as `suiprivkey1...` or as 64 hex characters
    /// (optionally `0x`-prefixed).
    pub fn from_private_key_str(raw: &str) -> Result<Self, WalletError> {
        let raw = raw.trim();
        if raw.starts_with("suiprivkey") {
            return Self::from_bech32(raw);
        }

        let digits = raw.strip_prefix("0x").unwrap_or(raw);
        let mut seed = [0u8; 32];
        hex::decode_to_slice(digits, &mut seed).map_err(|e| {
            WalletError::InvalidPrivateKey(format!(
                "expected suiprivkey or 64 hex characters: {e}"
            ))
        })?;
        Ok(Self::from_seed(&seed))
    }

    fn from_bech32(encoded: &str) -> Result<Self, WalletError> {
        let (hrp, data) = bech32::decode(encoded)
            .map_err(|e| WalletError::InvalidPrivateKey(format!("invalid Bech32: {e}")))?;

        if hrp != PRIVATE_KEY_HRP {
            return Err(WalletError::InvalidPrivateKey(format!(
                "expected HRP `suiprivkey`, got `{hrp}`"
            )));
        }
        if data.len() != 33 {
            return Err(WalletError::InvalidPrivateKey(format!(
                "expected 33 bytes, got {}",
                data.len()
            )));
        }
        if data[0] != ED25519_FLAG {
            return Err(WalletError::InvalidPrivateKey(format!(
                "expected Ed25519 scheme (0x00), got 0x{:02x}",
                data[0]
            )));
        }

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&data[1..]);
        Ok(Self::from_seed(&seed))
    }

    /// Keypair from a BIP-39 phrase along [`DERIVATION_PATH`].
    pub fn from_mnemonic(phrase: &str) -> Result<Self, WalletError> {
        let mnemonic = bip39::Mnemonic::parse_normalized(phrase.trim())
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
        Self::from_bip39(&mnemonic)
    }

    /// Keypair from an already-parsed BIP-39 mnemonic (empty passphrase).
    pub fn from_bip39(mnemonic: &bip39::Mnemonic) -> Result<Self, WalletError> {
        let seed = mnemonic.to_seed("");
        let key = slip10_ed25519(&seed, &DERIVATION_PATH)?;
        Ok(Self::from_seed(&key))
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Raw public key, base64-encoded.
    pub fn public_key_base64(&self) -> String {
        Base64::encode_string(&self.public_key_bytes())
    }

    /// The 32-byte Ed25519 seed.
    pub fn private_key_seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::new(self.public_key_bytes())
    }

    pub fn address(&self) -> SuiAddress {
        SuiAddress::new(self.public_key().derive_address().into_inner())
    }

    /// Export as `suiprivkey1...`.
    pub fn to_bech32(&self) -> Result<String, WalletError> {
        let mut data = Vec::with_capacity(33);
        data.push(ED25519_FLAG);
        data.extend_from_slice(&self.private_key_seed());
        bech32::encode::<Bech32>(PRIVATE_KEY_HRP, &data)
            .map_err(|e| WalletError::Encoding(e.to_string()))
    }

    /// Sign node-built transaction bytes.
    ///
    /// The bytes must decode as transaction data sent by this key. Returns
    /// the serialized signature `base64(flag || signature || public key)`
    /// expected by `sui_executeTransactionBlock`.
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> Result<String, WalletError> {
        let transaction: Transaction = bcs::from_bytes(tx_bytes)
            .map_err(|e| WalletError::InvalidTransaction(e.to_string()))?;

        let address = self.address();
        if transaction.sender.inner() != address.as_bytes() {
            return Err(WalletError::InvalidTransaction(format!(
                "sender {} is not the signing key {address}",
                transaction.sender
            )));
        }

        Ok(self.sign(&transaction).to_base64())
    }

    fn sign(&self, transaction: &Transaction) -> UserSignature {
        let signature = self.signing_key.sign(&transaction.signing_digest());
        UserSignature::Simple(SimpleSignature::Ed25519 {
            signature: Ed25519Signature::new(signature.to_bytes()),
            public_key: self.public_key(),
        })
    }
}

impl fmt::Debug for SuiKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiKeypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// SLIP-0010 Ed25519 derivation. Every path component is hardened.
fn slip10_ed25519(seed: &[u8], path: &[u32]) -> Result<[u8; 32], WalletError> {
    let (mut key, mut chain_code) = split_hmac(b"ed25519 seed", &[seed])?;

    for index in path {
        let hardened = (index | HARDENED_OFFSET).to_be_bytes();
        (key, chain_code) = split_hmac(&chain_code, &[&[0u8], &key, &hardened])?;
    }

    Ok(key)
}

fn split_hmac(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32]), WalletError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;
    for part in parts {
        mac.update(part);
    }
    let output = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    Ok((left, right))
}
