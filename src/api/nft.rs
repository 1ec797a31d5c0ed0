// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! NFT endpoints: minting, display objects and name edits.
//!
//! All transactions are signed by the service key. Each mint or display
//! request returns the single object of the expected type created by the
//! transaction, or 404 when the transaction created none.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::{body_or_default, required, required_id, JsonBody};
use crate::{
    chain::ObjectId,
    contract::{self, MintArgs},
    error::ApiError,
    state::AppState,
};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintNftRequest {
    pub package_id: Option<String>,
    pub supply_cap_id: Option<String>,
    pub lineage_id: Option<String>,
    pub counter_id: Option<String>,
    pub recipient_address: Option<String>,
    pub nft_name: Option<String>,
    pub badge_coin_id: Option<String>,
    /// Defaults to 1.
    pub nft_version: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintRestrictedNftRequest {
    #[serde(flatten)]
    pub mint: MintNftRequest,
    pub creator_cap_id: Option<String>,
    /// Coin paying the mint fee.
    pub coin_id: Option<String>,
    pub braav_version: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintedNft {
    pub transaction_digest: String,
    pub nft_object_id: String,
    pub recipient_address: String,
    pub nft_name: String,
    pub explorer_url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MintNftResponse {
    pub success: bool,
    pub data: MintedNft,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintedRestrictedNft {
    pub transaction_digest: String,
    pub restricted_nft_object_id: String,
    pub recipient_address: String,
    pub nft_name: String,
    pub explorer_url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MintRestrictedNftResponse {
    pub success: bool,
    pub data: MintedRestrictedNft,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisplayRequest {
    pub display_keys: Option<Vec<String>>,
    /// Same length as `displayKeys`.
    pub display_values: Option<Vec<String>>,
    pub braav_version: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCreated {
    pub display_id: String,
    pub transaction_digest: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateDisplayResponse {
    pub success: bool,
    pub data: DisplayCreated,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedDisplayCreated {
    pub restricted_display_id: String,
    pub transaction_digest: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRestrictedDisplayResponse {
    pub success: bool,
    pub data: RestrictedDisplayCreated,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditNftRequest {
    pub nft_object_id: Option<String>,
    pub nft_name: Option<String>,
    /// Falls back to the configured `PACKAGE_ID`.
    pub package_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NftEdited {
    pub transaction_digest: String,
    pub nft_object_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EditNftResponse {
    pub success: bool,
    pub data: NftEdited,
}

fn mint_args(request: &MintNftRequest) -> Result<MintArgs, ApiError> {
    Ok(MintArgs {
        package: required_id(&request.package_id, "packageId")?,
        supply_cap: required_id(&request.supply_cap_id, "supplyCapId")?,
        lineage: required_id(&request.lineage_id, "lineageId")?,
        counter: required_id(&request.counter_id, "counterId")?,
        recipient: required_id(&request.recipient_address, "recipientAddress")?,
        name: required(&request.nft_name, "nftName")?.to_string(),
        badge_coin: required_id(&request.badge_coin_id, "badgeCoinId")?,
    })
}

/// Mint an NFT to a recipient.
#[utoipa::path(
    post,
    path = "/api/mint-nft",
    tag = "NFT",
    request_body = MintNftRequest,
    responses(
        (status = 200, description = "NFT minted", body = MintNftResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Transaction created no NFT"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn mint_nft(
    State(state): State<AppState>,
    body: JsonBody<MintNftRequest>,
) -> Result<Json<MintNftResponse>, ApiError> {
    let request = body_or_default(body)?;
    let args = mint_args(&request)?;
    let version = request.nft_version.unwrap_or(contract::DEFAULT_NFT_VERSION);
    let signer = state.config.signer()?;

    let outcome = state
        .chain
        .execute_move_call(signer, &contract::mint_nft(&args, version))
        .await?;
    let nft = outcome.created_object(contract::NFT)?;

    info!(nft = %nft, recipient = %args.recipient, digest = %outcome.digest, "NFT minted");

    Ok(Json(MintNftResponse {
        success: true,
        data: MintedNft {
            explorer_url: state.chain.network().explorer_tx_url(&outcome.digest),
            transaction_digest: outcome.digest,
            nft_object_id: nft.to_string(),
            recipient_address: args.recipient.to_string(),
            nft_name: args.name,
        },
    }))
}

/// Mint a restricted NFT, paying the fee with `coinId`.
#[utoipa::path(
    post,
    path = "/api/mint-restricted-nft",
    tag = "NFT",
    request_body = MintRestrictedNftRequest,
    responses(
        (status = 200, description = "Restricted NFT minted", body = MintRestrictedNftResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 404, description = "Transaction created no restricted NFT"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn mint_restricted_nft(
    State(state): State<AppState>,
    body: JsonBody<MintRestrictedNftRequest>,
) -> Result<Json<MintRestrictedNftResponse>, ApiError> {
    let request = body_or_default(body)?;
    let args = mint_args(&request.mint)?;
    let creator_cap = required_id(&request.creator_cap_id, "creatorCapId")?;
    let payment_coin = required_id(&request.coin_id, "coinId")?;
    let braav_version = request
        .braav_version
        .ok_or_else(|| ApiError::bad_request("braavVersion is required"))?;
    let signer = state.config.signer()?;

    let call = contract::mint_restricted_nft(&args, creator_cap, payment_coin, braav_version);
    let outcome = state.chain.execute_move_call(signer, &call).await?;
    let nft = outcome.created_object(contract::RESTRICTED_NFT)?;

    info!(nft = %nft, recipient = %args.recipient, digest = %outcome.digest, "Restricted NFT minted");

    Ok(Json(MintRestrictedNftResponse {
        success: true,
        data: MintedRestrictedNft {
            explorer_url: state.chain.network().explorer_tx_url(&outcome.digest),
            transaction_digest: outcome.digest,
            restricted_nft_object_id: nft.to_string(),
            recipient_address: args.recipient.to_string(),
            nft_name: args.name,
        },
    }))
}

/// Validate a display request and execute the matching Move call.
/// Returns the created display ID and the digest.
async fn create_display_object(
    state: &AppState,
    body: JsonBody<CreateDisplayRequest>,
    restricted: bool,
) -> Result<(ObjectId, String), ApiError> {
    let request = body_or_default(body)?;
    let keys = request
        .display_keys
        .ok_or_else(|| ApiError::bad_request("displayKeys is required"))?;
    let values = request
        .display_values
        .ok_or_else(|| ApiError::bad_request("displayValues is required"))?;
    if keys.is_empty() {
        return Err(ApiError::bad_request("displayKeys must not be empty"));
    }
    if keys.len() != values.len() {
        return Err(ApiError::bad_request(format!(
            "displayKeys and displayValues must have the same length ({} != {})",
            keys.len(),
            values.len()
        )));
    }
    let braav_version = request
        .braav_version
        .ok_or_else(|| ApiError::bad_request("braavVersion is required"))?;

    let package = state.config.package_id()?;
    let signer = state.config.signer()?;

    let call = contract::create_display(package, restricted, keys, values, braav_version);
    let outcome = state.chain.execute_move_call(signer, &call).await?;

    let kind = if restricted {
        contract::RESTRICTED_NFT_DISPLAY
    } else {
        contract::NFT_DISPLAY
    };
    let display_id = outcome.created_object(kind)?;

    info!(display_id = %display_id, restricted, digest = %outcome.digest, "Display created");
    Ok((display_id, outcome.digest))
}

/// Create the `Display` object for plain NFTs.
#[utoipa::path(
    post,
    path = "/api/create-display",
    tag = "NFT",
    request_body = CreateDisplayRequest,
    responses(
        (status = 200, description = "Display created", body = CreateDisplayResponse),
        (status = 400, description = "Missing fields or length mismatch"),
        (status = 404, description = "Transaction created no display"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn create_display(
    State(state): State<AppState>,
    body: JsonBody<CreateDisplayRequest>,
) -> Result<Json<CreateDisplayResponse>, ApiError> {
    let (display_id, digest) = create_display_object(&state, body, false).await?;
    Ok(Json(CreateDisplayResponse {
        success: true,
        data: DisplayCreated {
            display_id: display_id.to_string(),
            transaction_digest: digest,
        },
    }))
}

/// Create the `Display` object for restricted NFTs.
#[utoipa::path(
    post,
    path = "/api/create-restricted-display",
    tag = "NFT",
    request_body = CreateDisplayRequest,
    responses(
        (status = 200, description = "Display created", body = CreateRestrictedDisplayResponse),
        (status = 400, description = "Missing fields or length mismatch"),
        (status = 404, description = "Transaction created no restricted display"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn create_restricted_display(
    State(state): State<AppState>,
    body: JsonBody<CreateDisplayRequest>,
) -> Result<Json<CreateRestrictedDisplayResponse>, ApiError> {
    let (display_id, digest) = create_display_object(&state, body, true).await?;
    Ok(Json(CreateRestrictedDisplayResponse {
        success: true,
        data: RestrictedDisplayCreated {
            restricted_display_id: display_id.to_string(),
            transaction_digest: digest,
        },
    }))
}

/// Rename an NFT owned by the service signer.
#[utoipa::path(
    post,
    path = "/api/edit-nft",
    tag = "NFT",
    request_body = EditNftRequest,
    responses(
        (status = 200, description = "NFT renamed", body = EditNftResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn edit_nft(
    State(state): State<AppState>,
    body: JsonBody<EditNftRequest>,
) -> Result<Json<EditNftResponse>, ApiError> {
    let request = body_or_default(body)?;
    let nft = required_id(&request.nft_object_id, "nftObjectId")?;
    let name = required(&request.nft_name, "nftName")?;
    let package = match request.package_id {
        Some(_) => required_id(&request.package_id, "packageId")?,
        None => state.config.package_id()?,
    };
    let signer = state.config.signer()?;

    let outcome = state
        .chain
        .execute_move_call(signer, &contract::edit_nft_name(package, nft, name))
        .await?;

    info!(nft = %nft, digest = %outcome.digest, "NFT renamed");

    Ok(Json(EditNftResponse {
        success: true,
        data: NftEdited {
            transaction_digest: outcome.digest,
            nft_object_id: nft.to_string(),
        },
    }))
}
