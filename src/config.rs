// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! immutable [`AppConfig`] built once at startup. Handlers receive it through
//! application state and never read the environment themselves.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SUI_NETWORK` | `mainnet`, `testnet`, `devnet` or `localnet` | `testnet` |
//! | `SUI_RPC_URL` | Full node JSON-RPC URL | Network default |
//! | `PACKAGE_ID` | Braav Move package | Required for contract calls |
//! | `VETTING_TABLE_ID` | Shared vetting table object | Required for vetting |
//! | `VETTING_ADMIN_CAP_ID` | Admin capability for vetting decisions | Required to approve/reject |
//! | `SUI_PRIVATE_KEY` | Service signer (`suiprivkey1...` or hex) | Optional |
//! | `SUI_MNEMONIC` | Service signer as a BIP-39 phrase | Optional |
//! | `WALLET_SECRET` | HMAC key for custodial wallet derivation | Required for wallets |
//! | `GAS_BUDGET` | Gas budget per transaction, in MIST | `100000000` |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM files enabling HTTPS | Plain HTTP |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, path::PathBuf};

use crate::{
    chain::{network_by_id, NetworkConfig, ObjectId, SUI_TESTNET},
    wallet::SuiKeypair,
};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SUI_NETWORK_ENV: &str = "SUI_NETWORK";
pub const SUI_RPC_URL_ENV: &str = "SUI_RPC_URL";
pub const PACKAGE_ID_ENV: &str = "PACKAGE_ID";
pub const VETTING_TABLE_ID_ENV: &str = "VETTING_TABLE_ID";
pub const VETTING_ADMIN_CAP_ID_ENV: &str = "VETTING_ADMIN_CAP_ID";
pub const SUI_PRIVATE_KEY_ENV: &str = "SUI_PRIVATE_KEY";
pub const SUI_MNEMONIC_ENV: &str = "SUI_MNEMONIC";
pub const WALLET_SECRET_ENV: &str = "WALLET_SECRET";
pub const GAS_BUDGET_ENV: &str = "GAS_BUDGET";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GAS_BUDGET: u64 = 100_000_000;

/// Certificate and key files for HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process-wide settings, read-only after startup.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub network: NetworkConfig,
    /// Overrides `network.rpc_url` when set
    pub rpc_url: Option<String>,
    pub package_id: Option<ObjectId>,
    pub vetting_table_id: Option<ObjectId>,
    pub vetting_admin_cap_id: Option<ObjectId>,
    pub signer: Option<SuiKeypair>,
    pub wallet_secret: Option<String>,
    pub gas_budget: u64,
    pub tls: Option<TlsPaths>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("network", &self.network.id)
            .field("rpc_url", &self.rpc_url)
            .field("package_id", &self.package_id)
            .field("vetting_table_id", &self.vetting_table_id)
            .field("vetting_admin_cap_id", &self.vetting_admin_cap_id)
            .field("signer", &self.signer.as_ref().map(SuiKeypair::address))
            .field("wallet_secret", &self.wallet_secret.as_ref().map(|_| "<redacted>"))
            .field("gas_budget", &self.gas_budget)
            .field("tls", &self.tls)
            .finish()
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` for each variable. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| invalid(PORT_ENV, e))?,
            None => DEFAULT_PORT,
        };

        let network = match get(SUI_NETWORK_ENV) {
            Some(raw) => network_by_id(&raw).ok_or_else(|| {
                invalid(SUI_NETWORK_ENV, format!("unknown network `{raw}`"))
            })?,
            None => SUI_TESTNET,
        };

        let rpc_url = get(SUI_RPC_URL_ENV)
            .map(|raw| {
                raw.parse::<url::Url>()
                    .map(|_| raw)
                    .map_err(|e| invalid(SUI_RPC_URL_ENV, e))
            })
            .transpose()?;

        let object_id = |name: &'static str| -> Result<Option<ObjectId>, ConfigError> {
            get(name)
                .map(|raw| raw.parse().map_err(|e| invalid(name, e)))
                .transpose()
        };

        let signer = match (get(SUI_PRIVATE_KEY_ENV), get(SUI_MNEMONIC_ENV)) {
            (Some(key), _) => Some(
                SuiKeypair::from_private_key_str(&key)
                    .map_err(|e| invalid(SUI_PRIVATE_KEY_ENV, e))?,
            ),
            (None, Some(phrase)) => Some(
                SuiKeypair::from_mnemonic(&phrase).map_err(|e| invalid(SUI_MNEMONIC_ENV, e))?,
            ),
            (None, None) => None,
        };

        let gas_budget = match get(GAS_BUDGET_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => return Err(invalid(GAS_BUDGET_ENV, "must be greater than zero")),
                Ok(budget) => budget,
                Err(e) => return Err(invalid(GAS_BUDGET_ENV, e)),
            },
            None => DEFAULT_GAS_BUDGET,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        Ok(Self {
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            network,
            rpc_url,
            package_id: object_id(PACKAGE_ID_ENV)?,
            vetting_table_id: object_id(VETTING_TABLE_ID_ENV)?,
            vetting_admin_cap_id: object_id(VETTING_ADMIN_CAP_ID_ENV)?,
            signer,
            // the secret is used verbatim, so keep surrounding whitespace
            wallet_secret: lookup(WALLET_SECRET_ENV).filter(|value| !value.is_empty()),
            gas_budget,
            tls,
        })
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn package_id(&self) -> Result<ObjectId, ConfigError> {
        self.package_id.ok_or(ConfigError::Missing(PACKAGE_ID_ENV))
    }

    pub fn vetting_table_id(&self) -> Result<ObjectId, ConfigError> {
        self.vetting_table_id
            .ok_or(ConfigError::Missing(VETTING_TABLE_ID_ENV))
    }

    pub fn vetting_admin_cap_id(&self) -> Result<ObjectId, ConfigError> {
        self.vetting_admin_cap_id
            .ok_or(ConfigError::Missing(VETTING_ADMIN_CAP_ID_ENV))
    }

    pub fn signer(&self) -> Result<&SuiKeypair, ConfigError> {
        self.signer
            .as_ref()
            .ok_or(ConfigError::Missing("SUI_PRIVATE_KEY or SUI_MNEMONIC"))
    }

    pub fn wallet_secret(&self) -> Result<&str, ConfigError> {
        self.wallet_secret
            .as_deref()
            .ok_or(ConfigError::Missing(WALLET_SECRET_ENV))
    }
}

fn invalid(name: &'static str, reason: impl fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::SUI_DEVNET;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.network, SUI_TESTNET);
        assert_eq!(config.gas_budget, DEFAULT_GAS_BUDGET);
        assert!(config.signer.is_none());
        assert!(config.tls.is_none());
        assert!(matches!(
            config.package_id(),
            Err(ConfigError::Missing(PACKAGE_ID_ENV))
        ));
        assert!(config.wallet_secret().is_err());
    }

    #[test]
    fn values_are_parsed() {
        let key = format!("0x{}", "11".repeat(32));
        let config = load(&[
            (PORT_ENV, "9090"),
            (SUI_NETWORK_ENV, "devnet"),
            (SUI_RPC_URL_ENV, "http://localhost:9000"),
            (PACKAGE_ID_ENV, "0xabc"),
            (VETTING_TABLE_ID_ENV, "0x2"),
            (SUI_PRIVATE_KEY_ENV, key.as_str()),
            (WALLET_SECRET_ENV, "s3cret"),
            (GAS_BUDGET_ENV, "5000"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.network, SUI_DEVNET);
        assert_eq!(config.rpc_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.package_id().unwrap(), "0xabc".parse::<ObjectId>().unwrap());
        assert_eq!(config.vetting_table_id().unwrap(), "0x2".parse::<ObjectId>().unwrap());
        assert!(config.vetting_admin_cap_id().is_err());
        assert_eq!(config.signer().unwrap().private_key_seed(), [0x11; 32]);
        assert_eq!(config.wallet_secret().unwrap(), "s3cret");
        assert_eq!(config.gas_budget, 5000);
    }

    #[test]
    fn malformed_values_fail_startup() {
        assert!(load(&[(PORT_ENV, "eighty")]).is_err());
        assert!(load(&[(SUI_NETWORK_ENV, "moonnet")]).is_err());
        assert!(load(&[(SUI_RPC_URL_ENV, "::")]).is_err());
        assert!(load(&[(PACKAGE_ID_ENV, "0xnothex")]).is_err());
        assert!(load(&[(SUI_PRIVATE_KEY_ENV, "short")]).is_err());
        assert!(load(&[(SUI_MNEMONIC_ENV, "one two three")]).is_err());
        assert!(load(&[(GAS_BUDGET_ENV, "0")]).is_err());
        assert!(matches!(
            load(&[(TLS_CERT_PATH_ENV, "/tmp/cert.pem")]),
            Err(ConfigError::Missing(TLS_KEY_PATH_ENV))
        ));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[(PACKAGE_ID_ENV, "  "), (WALLET_SECRET_ENV, "")]).unwrap();
        assert!(config.package_id.is_none());
        assert!(config.wallet_secret.is_none());
    }

    #[test]
    fn debug_redacts_secrets() {
        let key = "22".repeat(32);
        let config = load(&[(SUI_PRIVATE_KEY_ENV, key.as_str()), (WALLET_SECRET_ENV, "hunter2")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains(&key));
        assert!(debug.contains("<redacted>"));
    }
}
