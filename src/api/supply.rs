// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::{body_or_default, required, JsonBody};
use crate::{contract, error::ApiError, state::AppState};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplyRequest {
    /// Maximum number of tokens; must be positive.
    pub supply_limit: Option<i64>,
    pub token_type_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplyResult {
    pub transaction_digest: String,
    pub supply_cap_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateSupplyResponse {
    pub success: bool,
    pub message: String,
    pub result: SupplyResult,
}

/// Create a capped token supply and return its `SupplyCap`.
#[utoipa::path(
    post,
    path = "/api/create-supply",
    tag = "Supply",
    request_body = CreateSupplyRequest,
    responses(
        (status = 200, description = "Supply created", body = CreateSupplyResponse),
        (status = 400, description = "Invalid supplyLimit or tokenTypeName"),
        (status = 404, description = "Transaction created no SupplyCap"),
        (status = 500, description = "Transaction failed")
    )
)]
pub async fn create_supply(
    State(state): State<AppState>,
    body: JsonBody<CreateSupplyRequest>,
) -> Result<Json<CreateSupplyResponse>, ApiError> {
    let request = body_or_default(body)?;

    let supply_limit = request
        .supply_limit
        .ok_or_else(|| ApiError::bad_request("supplyLimit is required"))?;
    let supply_limit = u64::try_from(supply_limit)
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or_else(|| ApiError::bad_request("supplyLimit must be a positive number"))?;
    let token_type_name = required(&request.token_type_name, "tokenTypeName")?;

    let package = state.config.package_id()?;
    let signer = state.config.signer()?;

    let call = contract::create_supply(package, supply_limit, token_type_name);
    let outcome = state.chain.execute_move_call(signer, &call).await?;
    let supply_cap = outcome.created_object(contract::SUPPLY_CAP)?;

    info!(supply_cap = %supply_cap, supply_limit, token_type_name, digest = %outcome.digest, "Supply created");

    Ok(Json(CreateSupplyResponse {
        success: true,
        message: format!("Supply of {supply_limit} {token_type_name} created"),
        result: SupplyResult {
            transaction_digest: outcome.digest,
            supply_cap_id: supply_cap.to_string(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::*;
    use crate::chain::{stub::StubGateway, MoveArg, ObjectId};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn creates_supply_and_returns_cap() {
        let cap: ObjectId = "0xcafe".parse().unwrap();
        let (app, stub) = app(
            full_config(),
            StubGateway::default().with_created(cap, "0xaa::supply::SupplyCap"),
        );

        let (status, body) = post(
            &app,
            "/api/create-supply",
            json!({ "supplyLimit": 500, "tokenTypeName": "GOLD" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["result"]["supplyCapId"], cap.to_string());
        assert_eq!(body["result"]["transactionDigest"], "StubDigest1111");

        let (_, call) = stub.last_executed().unwrap();
        assert_eq!(call.function, "create_supply");
        assert_eq!(
            call.arguments,
            vec![MoveArg::U64(500), MoveArg::String("GOLD".to_string())]
        );
    }

    #[tokio::test]
    async fn non_positive_limits_are_rejected() {
        let (app, stub) = app(full_config(), StubGateway::default());

        for limit in [json!(0), json!(-5)] {
            let (status, body) = post(
                &app,
                "/api/create-supply",
                json!({ "supplyLimit": limit, "tokenTypeName": "GOLD" }),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "supplyLimit must be a positive number");
        }

        let (status, _) = post(
            &app,
            "/api/create-supply",
            json!({ "supplyLimit": 5, "tokenTypeName": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(stub.total_calls(), 0);
    }

    #[tokio::test]
    async fn missing_supply_cap_is_not_found() {
        let (app, _) = app(
            full_config(),
            StubGateway::default().with_created("0x1".parse().unwrap(), "0xaa::supply::Other"),
        );
        let (status, body) = post(
            &app,
            "/api/create-supply",
            json!({ "supplyLimit": 1, "tokenTypeName": "GOLD" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("SupplyCap"));
    }
}
