// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sui network integration.
//!
//! This module provides:
//! - Move call execution (node-built transaction data, locally signed)
//! - Read-only dev-inspect queries returning Move return values
//! - A typed decoder for transaction effects and object changes
//!
//! Handlers talk to the network only through [`ChainGateway`], so tests can
//! substitute a stub and count remote calls.

pub mod client;
pub mod inspect;
pub mod types;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;

use crate::wallet::SuiKeypair;

pub use client::SuiClient;
pub use types::*;

/// Remote operations the service performs against a full node.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Network this gateway is connected to.
    fn network(&self) -> &NetworkConfig;

    /// Build, sign and execute a single Move call.
    ///
    /// Returns the decoded outcome only when effects report success.
    async fn execute_move_call(
        &self,
        signer: &SuiKeypair,
        call: &MoveCall,
    ) -> Result<TransactionOutcome, ChainError>;

    /// Run a Move call without committing state and return the BCS-encoded
    /// return values of the call.
    async fn inspect_move_call(
        &self,
        sender: SuiAddress,
        call: &MoveCall,
    ) -> Result<Vec<Vec<u8>>, ChainError>;
}

/// Errors that can occur during chain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Node or transport error; the node's message is kept as-is.
    #[error("{0}")]
    RpcError(String),

    /// Execution error reported by the effects, kept as-is.
    #[error("{0}")]
    TransactionFailed(String),

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),
}
