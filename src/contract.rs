// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Move entry points of the Braav package and the objects they create.
//!
//! Each builder returns one [`MoveCall`]; argument order matches the Move
//! function signature.

use crate::chain::{MoveArg, MoveCall, ObjectId, ObjectKind, SuiAddress};

pub const VETTING_MODULE: &str = "vetting";
pub const NFT_MODULE: &str = "nft";
pub const RESTRICTED_NFT_MODULE: &str = "restricted_nft";
pub const SUPPLY_MODULE: &str = "supply";

/// Version passed to `mint_nft` when the request omits `nftVersion`.
pub const DEFAULT_NFT_VERSION: u64 = 1;

/// Shared allow-list created by `create_vetting_table`.
pub const VETTING_TABLE: ObjectKind = ObjectKind::new(VETTING_MODULE, "VettingTable");
pub const SUPPLY_CAP: ObjectKind = ObjectKind::new(SUPPLY_MODULE, "SupplyCap");
pub const NFT: ObjectKind = ObjectKind::new(NFT_MODULE, "Nft");
pub const RESTRICTED_NFT: ObjectKind = ObjectKind::new(RESTRICTED_NFT_MODULE, "RestrictedNft");
/// `0x2::display::Display<Nft>`
pub const NFT_DISPLAY: ObjectKind = ObjectKind::new("display", "Display").with_type_param("Nft");
/// `0x2::display::Display<RestrictedNft>`
pub const RESTRICTED_NFT_DISPLAY: ObjectKind =
    ObjectKind::new("display", "Display").with_type_param("RestrictedNft");

// =============================================================================
// Vetting
// =============================================================================

pub fn create_vetting_table(package: ObjectId) -> MoveCall {
    MoveCall::new(package, VETTING_MODULE, "create_vetting_table")
}

/// Signed by the applicant; records a pending application.
pub fn submit_for_vetting(package: ObjectId, table: ObjectId) -> MoveCall {
    MoveCall::new(package, VETTING_MODULE, "submit_for_vetting").arg(MoveArg::Object(table))
}

/// Signed by the admin-cap holder.
pub fn decide_vetting(
    package: ObjectId,
    admin_cap: ObjectId,
    table: ObjectId,
    applicant: SuiAddress,
    approve: bool,
) -> MoveCall {
    let function = if approve {
        "approve_vetting"
    } else {
        "reject_vetting"
    };
    MoveCall::new(package, VETTING_MODULE, function)
        .arg(MoveArg::Object(admin_cap))
        .arg(MoveArg::Object(table))
        .arg(MoveArg::Address(applicant))
}

/// Read-only; returns `Option<Option<bool>>`.
pub fn vetting_status(package: ObjectId, table: ObjectId, applicant: SuiAddress) -> MoveCall {
    MoveCall::new(package, VETTING_MODULE, "get_vetting_status")
        .arg(MoveArg::Object(table))
        .arg(MoveArg::Address(applicant))
}

// =============================================================================
// Supply
// =============================================================================

pub fn create_supply(package: ObjectId, supply_limit: u64, token_type_name: &str) -> MoveCall {
    MoveCall::new(package, SUPPLY_MODULE, "create_supply")
        .arg(MoveArg::U64(supply_limit))
        .arg(MoveArg::String(token_type_name.to_string()))
}

// =============================================================================
// NFTs
// =============================================================================

/// Objects and metadata shared by both mint variants.
#[derive(Debug, Clone)]
pub struct MintArgs {
    pub package: ObjectId,
    pub supply_cap: ObjectId,
    pub lineage: ObjectId,
    pub counter: ObjectId,
    pub badge_coin: ObjectId,
    pub recipient: SuiAddress,
    pub name: String,
}

pub fn mint_nft(args: &MintArgs, nft_version: u64) -> MoveCall {
    MoveCall::new(args.package, NFT_MODULE, "mint_nft")
        .arg(MoveArg::Object(args.supply_cap))
        .arg(MoveArg::Object(args.lineage))
        .arg(MoveArg::Object(args.counter))
        .arg(MoveArg::Object(args.badge_coin))
        .arg(MoveArg::String(args.name.clone()))
        .arg(MoveArg::Address(args.recipient))
        .arg(MoveArg::U64(nft_version))
}

pub fn mint_restricted_nft(
    args: &MintArgs,
    creator_cap: ObjectId,
    payment_coin: ObjectId,
    braav_version: u64,
) -> MoveCall {
    MoveCall::new(args.package, RESTRICTED_NFT_MODULE, "mint_restricted_nft")
        .arg(MoveArg::Object(creator_cap))
        .arg(MoveArg::Object(args.supply_cap))
        .arg(MoveArg::Object(args.lineage))
        .arg(MoveArg::Object(args.counter))
        .arg(MoveArg::Object(args.badge_coin))
        .arg(MoveArg::Object(payment_coin))
        .arg(MoveArg::String(args.name.clone()))
        .arg(MoveArg::Address(args.recipient))
        .arg(MoveArg::U64(braav_version))
}

/// Display fields for plain (`restricted == false`) or restricted NFTs.
pub fn create_display(
    package: ObjectId,
    restricted: bool,
    keys: Vec<String>,
    values: Vec<String>,
    braav_version: u64,
) -> MoveCall {
    let (module, function) = if restricted {
        (RESTRICTED_NFT_MODULE, "create_restricted_display")
    } else {
        (NFT_MODULE, "create_display")
    };
    MoveCall::new(package, module, function)
        .arg(MoveArg::StringVec(keys))
        .arg(MoveArg::StringVec(values))
        .arg(MoveArg::U64(braav_version))
}

pub fn edit_nft_name(package: ObjectId, nft: ObjectId, name: &str) -> MoveCall {
    MoveCall::new(package, NFT_MODULE, "edit_name")
        .arg(MoveArg::Object(nft))
        .arg(MoveArg::String(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::StructTag;

    fn id(byte: u8) -> ObjectId {
        ObjectId::new([byte; 32])
    }

    #[test]
    fn decide_vetting_picks_function_by_outcome() {
        let approve = decide_vetting(id(1), id(2), id(3), id(4), true);
        let reject = decide_vetting(id(1), id(2), id(3), id(4), false);
        assert_eq!(approve.function, "approve_vetting");
        assert_eq!(reject.function, "reject_vetting");
        assert_eq!(approve.arguments, reject.arguments);
        assert_eq!(approve.arguments[2], MoveArg::Address(id(4)));
    }

    #[test]
    fn restricted_mint_leads_with_creator_cap() {
        let args = MintArgs {
            package: id(1),
            supply_cap: id(2),
            lineage: id(3),
            counter: id(4),
            badge_coin: id(5),
            recipient: id(6),
            name: "Badge".to_string(),
        };
        let plain = mint_nft(&args, DEFAULT_NFT_VERSION);
        let restricted = mint_restricted_nft(&args, id(7), id(8), 3);

        assert_eq!(plain.module, NFT_MODULE);
        assert_eq!(restricted.module, RESTRICTED_NFT_MODULE);
        assert_eq!(restricted.arguments[0], MoveArg::Object(id(7)));
        assert_eq!(restricted.arguments.len(), plain.arguments.len() + 2);
        assert_eq!(restricted.arguments.last(), Some(&MoveArg::U64(3)));
    }

    #[test]
    fn display_kinds_distinguish_type_parameters() {
        let plain: StructTag = "0x2::display::Display<0xab::nft::Nft>".parse().unwrap();
        let restricted: StructTag = "0x2::display::Display<0xab::restricted_nft::RestrictedNft>"
            .parse()
            .unwrap();

        assert!(NFT_DISPLAY.matches(&plain));
        assert!(!NFT_DISPLAY.matches(&restricted));
        assert!(RESTRICTED_NFT_DISPLAY.matches(&restricted));
        assert!(!RESTRICTED_NFT_DISPLAY.matches(&plain));
    }
}
