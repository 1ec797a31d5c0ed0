// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndpointCatalog {
    pub service: &'static str,
    pub docs: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/health", "Service liveness"),
    ("POST", "/api/create-wallet", "Derive a custodial wallet from user details"),
    ("POST", "/api/submit-for-vetting", "Apply to the vetting table"),
    ("POST", "/api/approve-vetting", "Approve an applicant"),
    ("POST", "/api/reject-vetting", "Reject an applicant"),
    ("POST", "/api/status-of-vetting", "Read an applicant's vetting status"),
    ("POST", "/api/initialize-vetting-table", "Create a new vetting table"),
    ("POST", "/api/create-supply", "Create a capped token supply"),
    ("POST", "/api/mint-nft", "Mint an NFT"),
    ("POST", "/api/mint-restricted-nft", "Mint a restricted NFT"),
    ("POST", "/api/create-display", "Create the NFT display object"),
    ("POST", "/api/create-restricted-display", "Create the restricted NFT display object"),
    ("POST", "/api/edit-nft", "Rename an NFT"),
    ("GET", "/api/endpoints", "This catalog"),
];

/// Static list of every endpoint the service exposes.
#[utoipa::path(
    get,
    path = "/api/endpoints",
    tag = "Meta",
    responses(
        (status = 200, description = "Endpoint catalog", body = EndpointCatalog)
    )
)]
pub async fn list_endpoints() -> Json<EndpointCatalog> {
    Json(EndpointCatalog {
        service: "braav-rust-server",
        docs: "/docs",
        endpoints: ENDPOINTS
            .iter()
            .map(|&(method, path, description)| EndpointInfo {
                method,
                path,
                description,
            })
            .collect(),
    })
}
