// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    chain::ObjectId, error::ApiError, state::AppState, vetting::VettingState,
    wallet::MnemonicKind,
};

pub mod catalog;
pub mod health;
pub mod nft;
pub mod supply;
pub mod vetting;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/create-wallet", post(wallet::create_wallet))
        .route("/submit-for-vetting", post(vetting::submit_for_vetting))
        .route("/approve-vetting", post(vetting::approve_vetting))
        .route("/reject-vetting", post(vetting::reject_vetting))
        .route("/status-of-vetting", post(vetting::status_of_vetting))
        .route(
            "/initialize-vetting-table",
            post(vetting::initialize_vetting_table),
        )
        .route("/create-supply", post(supply::create_supply))
        .route("/mint-nft", post(nft::mint_nft))
        .route("/mint-restricted-nft", post(nft::mint_restricted_nft))
        .route("/create-display", post(nft::create_display))
        .route(
            "/create-restricted-display",
            post(nft::create_restricted_display),
        )
        .route("/edit-nft", post(nft::edit_nft))
        .route("/endpoints", get(catalog::list_endpoints));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        wallet::create_wallet,
        vetting::submit_for_vetting,
        vetting::approve_vetting,
        vetting::reject_vetting,
        vetting::status_of_vetting,
        vetting::initialize_vetting_table,
        supply::create_supply,
        nft::mint_nft,
        nft::mint_restricted_nft,
        nft::create_display,
        nft::create_restricted_display,
        nft::edit_nft,
        catalog::list_endpoints
    ),
    components(
        schemas(
            health::HealthResponse,
            wallet::CreateWalletRequest,
            wallet::UserDetails,
            wallet::CreateWalletResponse,
            wallet::WalletInfo,
            MnemonicKind,
            vetting::SubmitVettingRequest,
            vetting::WalletCredentials,
            vetting::VettingDecisionRequest,
            vetting::VettingTransactionResponse,
            vetting::VettingStatusResponse,
            vetting::InitializeVettingTableResponse,
            VettingState,
            supply::CreateSupplyRequest,
            supply::CreateSupplyResponse,
            supply::SupplyResult,
            nft::MintNftRequest,
            nft::MintRestrictedNftRequest,
            nft::MintNftResponse,
            nft::MintedNft,
            nft::MintRestrictedNftResponse,
            nft::MintedRestrictedNft,
            nft::CreateDisplayRequest,
            nft::CreateDisplayResponse,
            nft::DisplayCreated,
            nft::CreateRestrictedDisplayResponse,
            nft::RestrictedDisplayCreated,
            nft::EditNftRequest,
            nft::EditNftResponse,
            nft::NftEdited,
            catalog::EndpointCatalog,
            catalog::EndpointInfo
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Wallet", description = "Deterministic custodial wallets"),
        (name = "Vetting", description = "On-chain allow-list workflow"),
        (name = "Supply", description = "Token supply creation"),
        (name = "NFT", description = "Minting, display objects and edits"),
        (name = "Meta", description = "Endpoint catalog")
    )
)]
struct ApiDoc;

/// Optional JSON request body. The rejection is kept so malformed JSON is
/// reported in the service's own error shape.
pub(crate) type JsonBody<T> = Result<Option<Json<T>>, JsonRejection>;

/// A request sent without a body reads as `T::default()`, so missing fields
/// are reported by field name rather than as a parse error.
pub(crate) fn body_or_default<T: Default>(body: JsonBody<T>) -> Result<T, ApiError> {
    let Json(request) = body?.unwrap_or_default();
    Ok(request)
}

/// A present, non-blank string field.
pub(crate) fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{field} is required")))
}

/// A present field holding a Sui address or object ID.
pub(crate) fn required_id(value: &Option<String>, field: &str) -> Result<ObjectId, ApiError> {
    required(value, field)?
        .parse()
        .map_err(|e| ApiError::bad_request(format!("Invalid {field}: {e}")))
}


#[cfg(test)]
mod tests {
    use super::testing::{app, config_with, full_config, post, send};
    use super::{body_or_default, required, required_id};
    use crate::chain::stub::StubGateway;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Json,
    };
    use serde_json::json;
    use tower::ServiceExt;

    #[derive(Debug, Default, serde::Deserialize)]
    struct Named {
        name: Option<String>,
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (app, _) = app(full_config(), StubGateway::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[test]
    fn absent_body_reads_as_default() {
        let named: Named = body_or_default(Ok(None)).unwrap();
        assert!(named.name.is_none());

        let named: Named = body_or_default(Ok(Some(Json(Named {
            name: Some("x".into()),
        }))))
        .unwrap();
        assert_eq!(named.name.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn malformed_json_uses_the_error_shape() {
        let (app, stub) = app(full_config(), StubGateway::default());

        for (content_type, payload) in [
            ("application/json", "{nope"),
            ("application/json", "{\"supplyLimit\":\"ten\"}"),
            ("text/plain", "{}"),
        ] {
            let request = Request::builder()
                .method("POST")
                .uri("/api/create-supply")
                .header("content-type", content_type)
                .body(Body::from(payload))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["success"], false);
            assert!(body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body"));
        }
        assert_eq!(stub.total_calls(), 0);
    }

    #[test]
    fn required_rejects_blank_values() {
        assert_eq!(required(&Some(" a ".into()), "f").unwrap(), "a");
        assert_eq!(required(&Some("  ".into()), "f").unwrap_err().message, "f is required");
        assert!(required(&None, "f").is_err());
        assert!(required_id(&Some("0xzz".into()), "f").is_err());
        assert!(required_id(&Some("0x2".into()), "f").is_ok());
    }

    #[tokio::test]
    async fn every_post_endpoint_validates_before_remote_calls() {
        let paths = [
            "/api/create-wallet",
            "/api/approve-vetting",
            "/api/reject-vetting",
            "/api/status-of-vetting",
            "/api/create-supply",
            "/api/mint-nft",
            "/api/mint-restricted-nft",
            "/api/create-display",
            "/api/create-restricted-display",
            "/api/edit-nft",
        ];
        let (app, stub) = app(full_config(), StubGateway::default());

        for path in paths {
            let (status, body) = post(&app, path, json!({})).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}: {body}");
            assert_eq!(body["success"], false, "{path}");
            assert!(body["error"].as_str().unwrap().contains("required"), "{path}: {body}");
        }
        assert_eq!(stub.total_calls(), 0);
    }

    #[tokio::test]
    async fn missing_configuration_is_reported_before_remote_calls() {
        let (app, stub) = app(
            config_with(&[
                crate::config::PACKAGE_ID_ENV,
                crate::config::SUI_PRIVATE_KEY_ENV,
            ]),
            StubGateway::default(),
        );

        for path in [
            "/api/submit-for-vetting",
            "/api/initialize-vetting-table",
        ] {
            let (status, body) = post(&app, path, json!({})).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
            assert!(body["error"].as_str().unwrap().contains("not configured"));
        }
        assert_eq!(stub.total_calls(), 0);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let (app, _) = app(full_config(), StubGateway::default());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (app, _) = app(full_config(), StubGateway::default());
        let (status, _) = send(&app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
