// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Dev-inspect payload for a single Move call.
//!
//! `sui_devInspectTransactionBlock` takes a BCS-encoded transaction *kind*
//! rather than full transaction data, so read-only queries cannot reuse the
//! node-built bytes from `unsafe_moveCall`. The call is expressed as a
//! `sui_sdk_types` programmable transaction with one `MoveCall` command and
//! serialized with `bcs`.

use sui_sdk_types::{
    Address, Argument, Command, Identifier, Input, ProgrammableTransaction, TransactionKind,
};

use super::{ChainError, MoveArg, MoveCall, SuiAddress};

impl From<SuiAddress> for Address {
    fn from(address: SuiAddress) -> Self {
        Address::new(*address.as_bytes())
    }
}

/// Build `call` as a `TransactionKind::ProgrammableTransaction`.
///
/// `objects` must hold one resolved input per [`MoveArg::Object`] argument,
/// in argument order. Every other argument becomes a pure input.
pub fn move_call_kind(call: &MoveCall, objects: &[Input]) -> Result<TransactionKind, ChainError> {
    let object_args = call
        .arguments
        .iter()
        .filter(|arg| matches!(arg, MoveArg::Object(_)))
        .count();
    if object_args != objects.len() {
        return Err(ChainError::Unsupported(format!(
            "{} object arguments but {} resolved inputs",
            object_args,
            objects.len()
        )));
    }

    let mut resolved = objects.iter().cloned();
    let inputs = call
        .arguments
        .iter()
        .map(|arg| match arg {
            MoveArg::Object(_) => resolved
                .next()
                .ok_or_else(|| ChainError::Unsupported("unresolved object input".to_string())),
            pure => pure_input(pure),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let arguments = (0..inputs.len())
        .map(|index| {
            u16::try_from(index)
                .map(Argument::Input)
                .map_err(|_| ChainError::Unsupported("too many arguments".to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let command = Command::MoveCall(sui_sdk_types::MoveCall {
        package: call.package.into(),
        module: identifier(call.module)?,
        function: identifier(call.function)?,
        type_arguments: Vec::new(),
        arguments,
    });

    Ok(TransactionKind::ProgrammableTransaction(
        ProgrammableTransaction {
            inputs,
            commands: vec![command],
        },
    ))
}

/// BCS bytes of [`move_call_kind`].
pub fn encode_move_call_kind(call: &MoveCall, objects: &[Input]) -> Result<Vec<u8>, ChainError> {
    let kind = move_call_kind(call, objects)?;
    bcs::to_bytes(&kind)
        .map_err(|e| ChainError::Unsupported(format!("transaction kind encoding: {e}")))
}

fn identifier(name: &str) -> Result<Identifier, ChainError> {
    Identifier::new(name)
        .map_err(|e| ChainError::Unsupported(format!("invalid Move identifier `{name}`: {e}")))
}

fn pure_input(arg: &MoveArg) -> Result<Input, ChainError> {
    let value = match arg {
        MoveArg::Object(id) | MoveArg::Address(id) => bcs::to_bytes(id.as_bytes()),
        MoveArg::U64(n) => bcs::to_bytes(n),
        MoveArg::Bool(b) => bcs::to_bytes(b),
        MoveArg::String(s) => bcs::to_bytes(s),
        MoveArg::StringVec(items) => bcs::to_bytes(items),
    }
    .map_err(|e| ChainError::Unsupported(format!("pure argument encoding: {e}")))?;

    Ok(Input::Pure { value })
}
