// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Braav Rust Server - NFT Minting & Vetting Service
//!
//! A thin HTTP service over a Sui full node. Every state-changing request
//! becomes one Move call, signed locally and executed remotely.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `chain` - Sui JSON-RPC client and typed transaction results
//! - `contract` - Move call builders for the Braav package
//! - `vetting` - Vetting status decoding
//! - `wallet` - Deterministic custodial wallets and Sui keys

pub mod api;
pub mod chain;
pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod state;
pub mod vetting;
pub mod wallet;
