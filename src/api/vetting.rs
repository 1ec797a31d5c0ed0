// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Vetting workflow endpoints.
//!
//! Applicants submit themselves to the shared vetting table, the holder of
//! the admin capability approves or rejects them, and anyone can read the
//! current status. Failures on the transaction endpoints echo the endpoint
//! path back in the error body.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::{body_or_default, required, required_id, JsonBody};
use crate::{
    contract,
    error::ApiError,
    state::AppState,
    vetting::{resolve_status, VettingState},
    wallet::{SuiKeypair, WalletError},
};

const SUBMIT_PATH: &str = "/api/submit-for-vetting";
const APPROVE_PATH: &str = "/api/approve-vetting";
const REJECT_PATH: &str = "/api/reject-vetting";
const INITIALIZE_PATH: &str = "/api/initialize-vetting-table";

/// Applicant key material. `mnemonic` wins when both are present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletCredentials {
    pub mnemonic: Option<String>,
    /// `suiprivkey1...` or 32-byte hex seed.
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVettingRequest {
    /// Applicant wallet; the service signer applies when omitted.
    pub wallet_credentials: Option<WalletCredentials>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VettingDecisionRequest {
    pub applicant_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VettingTransactionResponse {
    pub success: bool,
    pub transaction_digest: String,
    pub applicant_address: String,
    pub message: String,
}

/// Status of one applicant. `hasApplied`/`isApproved` keep their legacy
/// meaning (a failed lookup reads as not applied); `status` tells the cases
/// apart.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VettingStatusResponse {
    pub applicant_address: String,
    pub has_applied: bool,
    pub is_approved: bool,
    pub status: VettingState,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializeVettingTableResponse {
    pub success: bool,
    pub vetting_table_id: String,
    pub transaction_digest: String,
}

fn applicant_keypair(credentials: &WalletCredentials) -> Result<SuiKeypair, ApiError> {
    let non_blank = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    match (non_blank(&credentials.mnemonic), non_blank(&credentials.private_key)) {
        (Some(phrase), _) => Ok(SuiKeypair::from_mnemonic(&phrase)?),
        (None, Some(key)) => Ok(SuiKeypair::from_private_key_str(&key)?),
        (None, None) => Err(WalletError::MissingField(
            "walletCredentials.mnemonic or walletCredentials.privateKey",
        )
        .into()),
    }
}

/// Submit the signing wallet to the vetting table.
#[utoipa::path(
    post,
    path = "/api/submit-for-vetting",
    tag = "Vetting",
    request_body = SubmitVettingRequest,
    responses(
        (status = 200, description = "Application submitted", body = VettingTransactionResponse),
        (status = 400, description = "Invalid credentials or missing configuration"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn submit_for_vetting(
    State(state): State<AppState>,
    body: JsonBody<SubmitVettingRequest>,
) -> Result<Json<VettingTransactionResponse>, ApiError> {
    submit(&state, body)
        .await
        .map(Json)
        .map_err(|e| e.with_endpoint(SUBMIT_PATH))
}

async fn submit(
    state: &AppState,
    body: JsonBody<SubmitVettingRequest>,
) -> Result<VettingTransactionResponse, ApiError> {
    let request = body_or_default(body)?;
    let package = state.config.package_id()?;
    let table = state.config.vetting_table_id()?;

    let applicant = match &request.wallet_credentials {
        Some(credentials) => applicant_keypair(credentials)?,
        None => state.config.signer()?.clone(),
    };
    let address = applicant.address();

    let call = contract::submit_for_vetting(package, table);
    let outcome = state.chain.execute_move_call(&applicant, &call).await?;

    info!(applicant = %address, digest = %outcome.digest, "Vetting application submitted");

    Ok(VettingTransactionResponse {
        success: true,
        transaction_digest: outcome.digest,
        applicant_address: address.to_string(),
        message: "Vetting application submitted".to_string(),
    })
}

/// Approve a pending applicant. Signed by the service key holding the
/// admin capability.
#[utoipa::path(
    post,
    path = "/api/approve-vetting",
    tag = "Vetting",
    request_body = VettingDecisionRequest,
    responses(
        (status = 200, description = "Applicant approved", body = VettingTransactionResponse),
        (status = 400, description = "Missing applicantAddress or configuration"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn approve_vetting(
    State(state): State<AppState>,
    body: JsonBody<VettingDecisionRequest>,
) -> Result<Json<VettingTransactionResponse>, ApiError> {
    decide(&state, body, true)
        .await
        .map(Json)
        .map_err(|e| e.with_endpoint(APPROVE_PATH))
}

/// Reject a pending applicant.
#[utoipa::path(
    post,
    path = "/api/reject-vetting",
    tag = "Vetting",
    request_body = VettingDecisionRequest,
    responses(
        (status = 200, description = "Applicant rejected", body = VettingTransactionResponse),
        (status = 400, description = "Missing applicantAddress or configuration"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn reject_vetting(
    State(state): State<AppState>,
    body: JsonBody<VettingDecisionRequest>,
) -> Result<Json<VettingTransactionResponse>, ApiError> {
    decide(&state, body, false)
        .await
        .map(Json)
        .map_err(|e| e.with_endpoint(REJECT_PATH))
}

async fn decide(
    state: &AppState,
    body: JsonBody<VettingDecisionRequest>,
    approve: bool,
) -> Result<VettingTransactionResponse, ApiError> {
    let request = body_or_default(body)?;
    let applicant = required_id(&request.applicant_address, "applicantAddress")?;

    let config = &state.config;
    let package = config.package_id()?;
    let table = config.vetting_table_id()?;
    let admin_cap = config.vetting_admin_cap_id()?;
    let signer = config.signer()?;

    let call = contract::decide_vetting(package, admin_cap, table, applicant, approve);
    let outcome = state.chain.execute_move_call(signer, &call).await?;

    let verdict = if approve { "approved" } else { "rejected" };
    info!(applicant = %applicant, digest = %outcome.digest, verdict, "Vetting decision recorded");

    Ok(VettingTransactionResponse {
        success: true,
        transaction_digest: outcome.digest,
        applicant_address: applicant.to_string(),
        message: format!("Applicant {verdict}"),
    })
}

/// Read the vetting status of an address.
///
/// Remote failures do not fail the request; they are reported through
/// `status` while `hasApplied` reads false.
#[utoipa::path(
    post,
    path = "/api/status-of-vetting",
    tag = "Vetting",
    request_body = VettingDecisionRequest,
    responses(
        (status = 200, description = "Current status", body = VettingStatusResponse),
        (status = 400, description = "Missing applicantAddress or configuration")
    )
)]
pub async fn status_of_vetting(
    State(state): State<AppState>,
    body: JsonBody<VettingDecisionRequest>,
) -> Result<Json<VettingStatusResponse>, ApiError> {
    let request = body_or_default(body)?;
    let raw_address = required(&request.applicant_address, "applicantAddress")?;
    let applicant = required_id(&request.applicant_address, "applicantAddress")?;
    let package = state.config.package_id()?;
    let table = state.config.vetting_table_id()?;

    let lookup = resolve_status(state.chain.as_ref(), package, table, applicant).await;
    let status = lookup.collapse();

    Ok(Json(VettingStatusResponse {
        applicant_address: raw_address.to_string(),
        has_applied: status.has_applied(),
        is_approved: status.is_approved(),
        status: lookup.state(),
        message: lookup.message(),
    }))
}

/// Create a new shared vetting table owned by the service signer.
#[utoipa::path(
    post,
    path = "/api/initialize-vetting-table",
    tag = "Vetting",
    responses(
        (status = 200, description = "Table created", body = InitializeVettingTableResponse),
        (status = 400, description = "Missing configuration"),
        (status = 404, description = "Transaction created no vetting table"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn initialize_vetting_table(
    State(state): State<AppState>,
) -> Result<Json<InitializeVettingTableResponse>, ApiError> {
    let initialize = async {
        let package = state.config.package_id()?;
        let signer = state.config.signer()?;

        let outcome = state
            .chain
            .execute_move_call(signer, &contract::create_vetting_table(package))
            .await?;
        let table = outcome.created_object(contract::VETTING_TABLE)?;

        info!(table = %table, digest = %outcome.digest, "Vetting table created; set VETTING_TABLE_ID to use it");

        Ok::<_, ApiError>(InitializeVettingTableResponse {
            success: true,
            vetting_table_id: table.to_string(),
            transaction_digest: outcome.digest,
        })
    };

    initialize
        .await
        .map(Json)
        .map_err(|e| e.with_endpoint(INITIALIZE_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::chain::{stub::StubGateway, MoveArg, ObjectId};
    use crate::config::{SUI_PRIVATE_KEY_ENV, VETTING_ADMIN_CAP_ID_ENV};
    use axum::http::StatusCode;
    use serde_json::json;

    const TABLE_TYPE: &str = "0xaa::vetting::VettingTable";

    fn id(raw: &str) -> ObjectId {
        raw.parse().unwrap()
    }

    #[tokio::test]
    async fn submit_uses_supplied_credentials() {
        let (app, stub) = app(full_config(), StubGateway::default());
        let applicant = SuiKeypair::from_seed(&[7; 32]);
        let key = applicant.to_bech32().unwrap();

        let (status, body) = post(
            &app,
            "/api/submit-for-vetting",
            json!({ "walletCredentials": { "privateKey": key } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applicantAddress"], applicant.address().to_string());
        assert_eq!(body["transactionDigest"], "StubDigest1111");

        let (sender, call) = stub.last_executed().unwrap();
        assert_eq!(sender, applicant.address());
        assert_eq!(call.function, "submit_for_vetting");
        assert_eq!(call.arguments, vec![MoveArg::Object(id(TABLE))]);
    }

    #[tokio::test]
    async fn submit_without_credentials_uses_service_signer() {
        let (app, stub) = app(full_config(), StubGateway::default());
        let (status, body) = post(&app, "/api/submit-for-vetting", json!({})).await;

        let service = SuiKeypair::from_seed(&[0x11; 32]).address();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applicantAddress"], service.to_string());
        assert_eq!(stub.last_executed().unwrap().0, service);
    }

    #[tokio::test]
    async fn bad_credentials_fail_before_remote_calls() {
        let (app, stub) = app(full_config(), StubGateway::default());

        for credentials in [
            json!({}),
            json!({ "privateKey": "suiprivkey1nope" }),
            json!({ "mnemonic": "not a real phrase" }),
        ] {
            let (status, body) = post(
                &app,
                "/api/submit-for-vetting",
                json!({ "walletCredentials": credentials }),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(body["endpoint"], SUBMIT_PATH);
        }
        assert_eq!(stub.total_calls(), 0);
    }

    #[tokio::test]
    async fn approve_and_reject_target_the_applicant() {
        let (app, stub) = app(full_config(), StubGateway::default());

        for (path, function, message) in [
            (APPROVE_PATH, "approve_vetting", "Applicant approved"),
            (REJECT_PATH, "reject_vetting", "Applicant rejected"),
        ] {
            let (status, body) = post(&app, path, json!({ "applicantAddress": APPLICANT })).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], message);
            assert_eq!(body["applicantAddress"], APPLICANT);

            let (_, call) = stub.last_executed().unwrap();
            assert_eq!(call.function, function);
            assert_eq!(
                call.arguments,
                vec![
                    MoveArg::Object(id(ADMIN_CAP)),
                    MoveArg::Object(id(TABLE)),
                    MoveArg::Address(id(APPLICANT)),
                ]
            );
        }
        assert_eq!(stub.execute_calls(), 2);
    }

    #[tokio::test]
    async fn decisions_require_admin_cap_and_signer() {
        for unset in [VETTING_ADMIN_CAP_ID_ENV, SUI_PRIVATE_KEY_ENV] {
            let (app, stub) = app(config_with(&[unset]), StubGateway::default());
            let (status, body) =
                post(&app, APPROVE_PATH, json!({ "applicantAddress": APPLICANT })).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["endpoint"], APPROVE_PATH);
            assert_eq!(stub.total_calls(), 0);
        }
    }

    #[tokio::test]
    async fn invalid_applicant_address_is_rejected() {
        let (app, stub) = app(full_config(), StubGateway::default());
        let (status, body) =
            post(&app, REJECT_PATH, json!({ "applicantAddress": "0xnot-hex" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid applicantAddress"));
        assert_eq!(stub.total_calls(), 0);
    }

    #[tokio::test]
    async fn remote_failure_is_passed_through_with_endpoint() {
        let (app, _) = app(
            full_config(),
            StubGateway::default().with_execute_error("MoveAbort(vetting, 3)"),
        );
        let (status, body) = post(&app, APPROVE_PATH, json!({ "applicantAddress": APPLICANT })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["endpoint"], APPROVE_PATH);
        assert!(body["error"].as_str().unwrap().contains("MoveAbort(vetting, 3)"));
    }

    #[tokio::test]
    async fn status_reports_each_state() {
        for (bytes, state, applied, approved) in [
            (vec![0], "not_applied", false, false),
            (vec![1, 0], "pending", true, false),
            (vec![1, 1, 1], "approved", true, true),
            (vec![1, 1, 0], "rejected", true, false),
        ] {
            let (app, _) = app(
                full_config(),
                StubGateway::default().with_inspect_values(vec![bytes]),
            );
            let (status, body) = post(
                &app,
                "/api/status-of-vetting",
                json!({ "applicantAddress": APPLICANT }),
            )
            .await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], state);
            assert_eq!(body["hasApplied"], applied);
            assert_eq!(body["isApproved"], approved);
        }
    }

    #[tokio::test]
    async fn status_degrades_on_remote_failure() {
        let (app, stub) = app(
            full_config(),
            StubGateway::default().with_inspect_error("node unreachable"),
        );
        let (status, body) = post(
            &app,
            "/api/status-of-vetting",
            json!({ "applicantAddress": APPLICANT }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hasApplied"], false);
        assert_eq!(body["isApproved"], false);
        assert_eq!(body["status"], "query_failed");
        assert!(body["message"].as_str().unwrap().contains("node unreachable"));
        assert_eq!(stub.inspect_calls(), 1);
    }

    #[tokio::test]
    async fn initialize_returns_created_table() {
        let created = id("0x1234");
        let (app, _) = app(
            full_config(),
            StubGateway::default()
                .with_created(id("0x99"), "0x2::coin::Coin<0x2::sui::SUI>")
                .with_created(created, TABLE_TYPE),
        );
        let (status, body) = send(&app, "POST", INITIALIZE_PATH, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vettingTableId"], created.to_string());
        assert_eq!(body["transactionDigest"], "StubDigest1111");
    }

    #[tokio::test]
    async fn initialize_without_created_table_is_not_found() {
        let (app, stub) = app(full_config(), StubGateway::default());
        let (status, body) = send(&app, "POST", INITIALIZE_PATH, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["endpoint"], INITIALIZE_PATH);
        assert_eq!(stub.execute_calls(), 1);
    }
}
