// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Vetting status resolution.
//!
//! The on-chain vetting table answers `get_vetting_status(table, applicant)`
//! with an `Option<Option<bool>>`:
//!
//! | BCS bytes   | Meaning                     |
//! |-------------|-----------------------------|
//! | `[0]`       | never applied               |
//! | `[1, 0]`    | applied, no decision yet    |
//! | `[1, 1, b]` | decided, approved iff `b=1` |
//!
//! A failed query and an unexpected encoding are reported as their own
//! [`VettingLookup`] variants. [`VettingLookup::collapse`] folds both into
//! [`VettingStatus::NotApplied`] for callers that only want the tri-state.

use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::{
    chain::{ChainGateway, ObjectId, SuiAddress},
    contract,
};

/// Point-in-time vetting state of one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VettingStatus {
    NotApplied,
    Pending,
    Decided { approved: bool },
}

impl VettingStatus {
    pub fn has_applied(&self) -> bool {
        !matches!(self, VettingStatus::NotApplied)
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, VettingStatus::Decided { approved: true })
    }
}

/// Result of one status query, keeping failures distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VettingLookup {
    Status(VettingStatus),
    /// The remote query could not be executed.
    QueryFailed(String),
    /// The query ran but returned bytes outside the known encodings.
    Unexpected(Vec<u8>),
}

/// Wire discriminant for [`VettingLookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VettingState {
    NotApplied,
    Pending,
    Approved,
    Rejected,
    QueryFailed,
    UnexpectedValue,
}

impl VettingLookup {
    /// Legacy tri-state: every failure reads as "not applied".
    pub fn collapse(&self) -> VettingStatus {
        match self {
            VettingLookup::Status(status) => *status,
            VettingLookup::QueryFailed(_) | VettingLookup::Unexpected(_) => {
                VettingStatus::NotApplied
            }
        }
    }

    pub fn state(&self) -> VettingState {
        match self {
            VettingLookup::Status(VettingStatus::NotApplied) => VettingState::NotApplied,
            VettingLookup::Status(VettingStatus::Pending) => VettingState::Pending,
            VettingLookup::Status(VettingStatus::Decided { approved: true }) => {
                VettingState::Approved
            }
            VettingLookup::Status(VettingStatus::Decided { approved: false }) => {
                VettingState::Rejected
            }
            VettingLookup::QueryFailed(_) => VettingState::QueryFailed,
            VettingLookup::Unexpected(_) => VettingState::UnexpectedValue,
        }
    }

    /// Human-readable summary for API responses.
    pub fn message(&self) -> String {
        match self {
            VettingLookup::Status(VettingStatus::NotApplied) => {
                "Address has not applied for vetting".to_string()
            }
            VettingLookup::Status(VettingStatus::Pending) => {
                "Vetting application is pending review".to_string()
            }
            VettingLookup::Status(VettingStatus::Decided { approved: true }) => {
                "Vetting application approved".to_string()
            }
            VettingLookup::Status(VettingStatus::Decided { approved: false }) => {
                "Vetting application rejected".to_string()
            }
            VettingLookup::QueryFailed(reason) => {
                format!("Could not determine vetting status: {reason}")
            }
            VettingLookup::Unexpected(bytes) => format!(
                "Unexpected vetting status value 0x{}",
                hex::encode(bytes)
            ),
        }
    }
}

/// Decode the BCS `Option<Option<bool>>` returned by the status query.
pub fn decode_status(bytes: &[u8]) -> VettingLookup {
    match bytes {
        [0] => VettingLookup::Status(VettingStatus::NotApplied),
        [1, 0] => VettingLookup::Status(VettingStatus::Pending),
        [1, 1, flag @ (0 | 1)] => VettingLookup::Status(VettingStatus::Decided {
            approved: *flag == 1,
        }),
        other => VettingLookup::Unexpected(other.to_vec()),
    }
}

/// Query the vetting table for `applicant`. Never fails.
pub async fn resolve_status(
    chain: &dyn ChainGateway,
    package: ObjectId,
    table: ObjectId,
    applicant: SuiAddress,
) -> VettingLookup {
    let call = contract::vetting_status(package, table, applicant);

    let lookup = match chain.inspect_move_call(applicant, &call).await {
        Ok(values) => match values.first() {
            Some(bytes) => decode_status(bytes),
            None => VettingLookup::Unexpected(Vec::new()),
        },
        Err(e) => VettingLookup::QueryFailed(e.to_string()),
    };

    if let VettingLookup::QueryFailed(_) | VettingLookup::Unexpected(_) = &lookup {
        warn!(applicant = %applicant, detail = %lookup.message(), "Vetting status degraded");
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::stub::StubGateway;

    #[test]
    fn decodes_every_known_shape() {
        assert_eq!(
            decode_status(&[0]),
            VettingLookup::Status(VettingStatus::NotApplied)
        );
        assert_eq!(
            decode_status(&[1, 0]),
            VettingLookup::Status(VettingStatus::Pending)
        );
        assert_eq!(
            decode_status(&[1, 1, 1]),
            VettingLookup::Status(VettingStatus::Decided { approved: true })
        );
        assert_eq!(
            decode_status(&[1, 1, 0]),
            VettingLookup::Status(VettingStatus::Decided { approved: false })
        );
    }

    #[test]
    fn malformed_bytes_collapse_to_not_applied() {
        let cases: [&[u8]; 7] = [&[], &[2], &[1], &[1, 1], &[1, 1, 2], &[0, 0], &[1, 1, 1, 0]];
        for bytes in cases {
            let lookup = decode_status(bytes);
            assert_eq!(lookup, VettingLookup::Unexpected(bytes.to_vec()));
            assert_eq!(lookup.collapse(), VettingStatus::NotApplied);
            assert_eq!(lookup.state(), VettingState::UnexpectedValue);
        }
    }

    #[test]
    fn status_flags() {
        assert!(!VettingStatus::NotApplied.has_applied());
        assert!(VettingStatus::Pending.has_applied());
        assert!(!VettingStatus::Pending.is_approved());
        assert!(VettingStatus::Decided { approved: true }.is_approved());
        assert!(!VettingStatus::Decided { approved: false }.is_approved());
    }

    fn ids() -> (ObjectId, ObjectId, SuiAddress) {
        (
            SuiAddress::new([1; 32]),
            SuiAddress::new([2; 32]),
            SuiAddress::new([3; 32]),
        )
    }

    #[tokio::test]
    async fn query_failure_is_distinct_but_collapses() {
        let (package, table, applicant) = ids();
        let stub = StubGateway::default().with_inspect_error("connection refused");

        let lookup = resolve_status(&stub, package, table, applicant).await;
        assert!(matches!(lookup, VettingLookup::QueryFailed(ref m) if m.contains("connection refused")));
        assert_eq!(lookup.collapse(), VettingStatus::NotApplied);
        assert_eq!(lookup.state(), VettingState::QueryFailed);
    }

    #[tokio::test]
    async fn repeated_reads_agree() {
        let (package, table, applicant) = ids();
        let stub = StubGateway::default().with_inspect_values(vec![vec![1, 1, 1]]);

        let first = resolve_status(&stub, package, table, applicant).await;
        let second = resolve_status(&stub, package, table, applicant).await;
        assert_eq!(first, second);
        assert_eq!(first.state(), VettingState::Approved);
        assert_eq!(stub.inspect_calls(), 2);

        let call = stub.last_inspected().unwrap();
        assert_eq!(call.function, "get_vetting_status");
    }

    #[tokio::test]
    async fn empty_return_values_are_unexpected() {
        let (package, table, applicant) = ids();
        let stub = StubGateway::default().with_inspect_values(vec![]);
        let lookup = resolve_status(&stub, package, table, applicant).await;
        assert_eq!(lookup, VettingLookup::Unexpected(Vec::new()));
    }
}
