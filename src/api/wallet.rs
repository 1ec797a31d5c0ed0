// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Custodial wallet derivation endpoint.
//!
//! Wallets are recomputed from the caller's identity on every request and
//! never stored. The response carries the private key, so the caller is
//! responsible for keeping it.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::{body_or_default, JsonBody};
use crate::{
    error::ApiError,
    state::AppState,
    wallet::{derive_wallet, MnemonicKind, UserIdentity},
};

/// Identity fields, in the caller's snake_case form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserDetails {
    pub id: Option<String>,
    /// Folded into the derivation; absent reads as an empty string.
    pub created_at: Option<String>,
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub user_details: Option<UserDetails>,
    /// Return a standard BIP-39 phrase instead of the display mnemonic.
    /// The two variants yield different addresses.
    #[serde(default)]
    pub use_standard_mnemonic: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub address: String,
    /// Base64 of the raw 32-byte Ed25519 public key.
    pub public_key: String,
    /// `suiprivkey1...` bech32 export.
    pub private_key: String,
    pub mnemonic: String,
    pub mnemonic_kind: MnemonicKind,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateWalletResponse {
    pub success: bool,
    pub wallet: WalletInfo,
}

/// Derive the custodial wallet for a user identity.
#[utoipa::path(
    post,
    path = "/api/create-wallet",
    tag = "Wallet",
    request_body = CreateWalletRequest,
    responses(
        (status = 200, description = "Wallet derived", body = CreateWalletResponse),
        (status = 400, description = "Missing identity field or WALLET_SECRET"),
        (status = 500, description = "Key encoding failed")
    )
)]
pub async fn create_wallet(
    State(state): State<AppState>,
    body: JsonBody<CreateWalletRequest>,
) -> Result<Json<CreateWalletResponse>, ApiError> {
    let request = body_or_default(body)?;
    let details = request
        .user_details
        .ok_or_else(|| ApiError::bad_request("userDetails is required"))?;

    let identity = UserIdentity {
        id: details
            .id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("userDetails.id is required"))?,
        created_at: details.created_at.as_deref().unwrap_or_default(),
        secret: details
            .secret_key
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("userDetails.secret_key is required"))?,
    };

    let kind = if request.use_standard_mnemonic {
        MnemonicKind::Bip39
    } else {
        MnemonicKind::Display
    };

    let wallet = derive_wallet(identity, state.config.wallet_secret()?, kind)?;
    let keypair = wallet.keypair();

    info!(address = %wallet.address(), mnemonic_kind = ?kind, "Derived custodial wallet");

    Ok(Json(CreateWalletResponse {
        success: true,
        wallet: WalletInfo {
            address: wallet.address().to_string(),
            public_key: keypair.public_key_base64(),
            private_key: keypair.to_bech32()?,
            mnemonic: wallet.mnemonic_phrase(),
            mnemonic_kind: wallet.mnemonic_kind(),
        },
    }))
}
