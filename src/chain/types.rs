// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain types and constants.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ChainError;

/// Sui network configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Short identifier accepted in `SUI_NETWORK`
    pub id: &'static str,
    /// Full node JSON-RPC endpoint URL
    pub rpc_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

impl NetworkConfig {
    /// Explorer link for a transaction digest.
    pub fn explorer_tx_url(&self, digest: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, digest)
    }
}

/// Sui Mainnet configuration.
pub const SUI_MAINNET: NetworkConfig = NetworkConfig {
    name: "Sui Mainnet",
    id: "mainnet",
    rpc_url: "https://fullnode.mainnet.sui.io:443",
    explorer_url: "https://suiscan.xyz/mainnet",
};

/// Sui Testnet configuration.
pub const SUI_TESTNET: NetworkConfig = NetworkConfig {
    name: "Sui Testnet",
    id: "testnet",
    rpc_url: "https://fullnode.testnet.sui.io:443",
    explorer_url: "https://suiscan.xyz/testnet",
};

/// Sui Devnet configuration.
pub const SUI_DEVNET: NetworkConfig = NetworkConfig {
    name: "Sui Devnet",
    id: "devnet",
    rpc_url: "https://fullnode.devnet.sui.io:443",
    explorer_url: "https://suiscan.xyz/devnet",
};

/// Local network started with `sui start`.
pub const SUI_LOCALNET: NetworkConfig = NetworkConfig {
    name: "Sui Localnet",
    id: "localnet",
    rpc_url: "http://127.0.0.1:9000",
    explorer_url: "http://127.0.0.1:9001",
};

/// Look up a network preset by its identifier (case-insensitive).
pub fn network_by_id(raw: &str) -> Option<NetworkConfig> {
    let value = raw.trim().to_ascii_lowercase();
    [SUI_MAINNET, SUI_TESTNET, SUI_DEVNET, SUI_LOCALNET]
        .into_iter()
        .find(|network| network.id == value)
}

// =============================================================================
// Addresses
// =============================================================================

/// 32-byte Sui account address or object ID.
///
/// Displays as `0x` followed by 64 lowercase hex characters. Parsing accepts
/// short forms such as `0x2` and left-pads them with zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuiAddress([u8; 32]);

/// Object IDs share the address representation.
pub type ObjectId = SuiAddress;

impl SuiAddress {
    pub const LENGTH: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for SuiAddress {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(ChainError::InvalidAddress(format!(
                "`{s}` must be 1 to 64 hex characters"
            )));
        }

        let padded = format!("{digits:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| ChainError::InvalidAddress(format!("`{s}`: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Move calls
// =============================================================================

/// A single argument to a Move entry function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveArg {
    /// An on-chain object passed by ID; the node resolves ownership.
    Object(ObjectId),
    Address(SuiAddress),
    U64(u64),
    Bool(bool),
    String(String),
    StringVec(Vec<String>),
}

impl MoveArg {
    /// JSON form accepted by `unsafe_moveCall`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            MoveArg::Object(id) | MoveArg::Address(id) => Value::String(id.to_string()),
            // u64 travels as a decimal string so it survives JSON number limits
            MoveArg::U64(n) => Value::String(n.to_string()),
            MoveArg::Bool(b) => Value::Bool(*b),
            MoveArg::String(s) => Value::String(s.clone()),
            MoveArg::StringVec(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// One call to `{package}::{module}::{function}` without type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: &'static str,
    pub function: &'static str,
    pub arguments: Vec<MoveArg>,
}

impl MoveCall {
    pub fn new(package: ObjectId, module: &'static str, function: &'static str) -> Self {
        Self {
            package,
            module,
            function,
            arguments: Vec::new(),
        }
    }

    pub fn arg(mut self, argument: MoveArg) -> Self {
        self.arguments.push(argument);
        self
    }

    /// `package::module::function` for logs and error messages.
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

// =============================================================================
// Move types
// =============================================================================

/// A Move type argument: either a struct or anything else kept verbatim
/// (`u64`, `vector<u8>`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Struct(StructTag),
    Other(String),
}

/// Parsed Move struct type such as `0x2::display::Display<0xab::nft::Nft>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTag {
    pub address: SuiAddress,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    /// Whether any struct type parameter has the given struct name.
    pub fn has_type_param_named(&self, name: &str) -> bool {
        self.type_params
            .iter()
            .any(|param| matches!(param, TypeTag::Struct(tag) if tag.name == name))
    }
}

impl FromStr for StructTag {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChainError::InvalidResponse(format!("unparsable Move type `{s}`"));
        let s = s.trim();

        let (head, params) = match s.find('<') {
            Some(open) => {
                let inner = s[open + 1..].strip_suffix('>').ok_or_else(invalid)?;
                (&s[..open], split_type_params(inner).ok_or_else(invalid)?)
            }
            None => (s, Vec::new()),
        };

        let mut parts = head.split("::");
        let (Some(address), Some(module), Some(name), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if module.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        let type_params = params
            .into_iter()
            .map(|param| match param.parse::<StructTag>() {
                Ok(tag) => TypeTag::Struct(tag),
                Err(_) => TypeTag::Other(param.to_string()),
            })
            .collect();

        Ok(Self {
            address: address.parse().map_err(|_| invalid())?,
            module: module.to_string(),
            name: name.to_string(),
            type_params,
        })
    }
}

/// Split `A, B<C, D>, E` on top-level commas.
fn split_type_params(inner: &str) -> Option<Vec<&str>> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                params.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        params.push(last);
    }
    Some(params)
}

// =============================================================================
// Transaction results
// =============================================================================

/// An entry of a transaction's `objectChanges`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    #[serde(rename_all = "camelCase")]
    Created {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Mutated {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Transferred {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Deleted {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Wrapped {
        object_id: ObjectId,
        object_type: String,
    },
    #[serde(rename_all = "camelCase")]
    Published { package_id: ObjectId },
    #[serde(other)]
    Unknown,
}

/// Identifies the struct a handler expects a transaction to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectKind {
    pub module: &'static str,
    pub name: &'static str,
    /// When set, one struct type parameter must carry this name.
    pub type_param: Option<&'static str>,
}

impl ObjectKind {
    pub const fn new(module: &'static str, name: &'static str) -> Self {
        Self {
            module,
            name,
            type_param: None,
        }
    }

    pub const fn with_type_param(mut self, name: &'static str) -> Self {
        self.type_param = Some(name);
        self
    }

    pub fn matches(&self, tag: &StructTag) -> bool {
        tag.module == self.module
            && tag.name == self.name
            && self
                .type_param
                .is_none_or(|param| tag.has_type_param_named(param))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_param {
            Some(param) => write!(f, "{}::{}<{}>", self.module, self.name, param),
            None => write!(f, "{}::{}", self.module, self.name),
        }
    }
}

/// Execution status reported in transaction effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Failure(String),
}

/// Typed view of an executed transaction.
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    pub digest: String,
    pub status: ExecutionStatus,
    pub object_changes: Vec<ObjectChange>,
}

impl TransactionOutcome {
    /// ID of the first created object of the given kind.
    pub fn created_object(&self, kind: ObjectKind) -> Result<ObjectId, ChainError> {
        self.object_changes
            .iter()
            .find_map(|change| match change {
                ObjectChange::Created {
                    object_id,
                    object_type,
                } => object_type
                    .parse::<StructTag>()
                    .ok()
                    .filter(|tag| kind.matches(tag))
                    .map(|_| *object_id),
                _ => None,
            })
            .ok_or_else(|| {
                ChainError::ObjectNotFound(format!(
                    "no created {kind} object in transaction {}",
                    self.digest
                ))
            })
    }

    /// Fail with the remote error when effects report anything but success.
    pub fn ensure_success(self) -> Result<Self, ChainError> {
        match &self.status {
            ExecutionStatus::Success => Ok(self),
            ExecutionStatus::Failure(error) => Err(ChainError::TransactionFailed(error.clone())),
        }
    }
}

/// Raw `sui_executeTransactionBlock` result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTransactionResponse {
    pub digest: String,
    pub effects: Option<RawEffects>,
    #[serde(default)]
    pub object_changes: Vec<ObjectChange>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawEffects {
    pub status: RawStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStatus {
    pub status: String,
    pub error: Option<String>,
}

impl RawStatus {
    pub fn into_status(self) -> ExecutionStatus {
        if self.status == "success" {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failure(
                self.error
                    .unwrap_or_else(|| format!("execution status `{}`", self.status)),
            )
        }
    }
}

impl TryFrom<RawTransactionResponse> for TransactionOutcome {
    type Error = ChainError;

    fn try_from(raw: RawTransactionResponse) -> Result<Self, Self::Error> {
        let effects = raw.effects.ok_or_else(|| {
            ChainError::InvalidResponse(format!("transaction {} returned no effects", raw.digest))
        })?;
        Ok(Self {
            digest: raw.digest,
            status: effects.status.into_status(),
            object_changes: raw.object_changes,
        })
    }
}
