// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory [`ChainGateway`] for tests. Counts every remote call.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::*;

pub(crate) struct StubGateway {
    execute_calls: AtomicUsize,
    inspect_calls: AtomicUsize,
    created: Vec<(ObjectId, String)>,
    execute_error: Option<String>,
    inspect_result: Result<Vec<Vec<u8>>, String>,
    last_executed: Mutex<Option<(SuiAddress, MoveCall)>>,
    last_inspected: Mutex<Option<MoveCall>>,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self {
            execute_calls: AtomicUsize::new(0),
            inspect_calls: AtomicUsize::new(0),
            created: Vec::new(),
            execute_error: None,
            inspect_result: Ok(vec![vec![0]]),
            last_executed: Mutex::new(None),
            last_inspected: Mutex::new(None),
        }
    }
}

impl StubGateway {
    /// Executed transactions report a created object of `object_type`.
    pub fn with_created(mut self, id: ObjectId, object_type: &str) -> Self {
        self.created.push((id, object_type.to_string()));
        self
    }

    pub fn with_execute_error(mut self, message: &str) -> Self {
        self.execute_error = Some(message.to_string());
        self
    }

    pub fn with_inspect_values(mut self, values: Vec<Vec<u8>>) -> Self {
        self.inspect_result = Ok(values);
        self
    }

    pub fn with_inspect_error(mut self, message: &str) -> Self {
        self.inspect_result = Err(message.to_string());
        self
    }

    pub fn execute_calls(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }

    pub fn inspect_calls(&self) -> usize {
        self.inspect_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.execute_calls() + self.inspect_calls()
    }

    pub fn last_executed(&self) -> Option<(SuiAddress, MoveCall)> {
        self.last_executed.lock().ok()?.clone()
    }

    pub fn last_inspected(&self) -> Option<MoveCall> {
        self.last_inspected.lock().ok()?.clone()
    }
}

#[async_trait]
impl ChainGateway for StubGateway {
    fn network(&self) -> &NetworkConfig {
        &SUI_TESTNET
    }

    async fn execute_move_call(
        &self,
        signer: &SuiKeypair,
        call: &MoveCall,
    ) -> Result<TransactionOutcome, ChainError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_executed.lock() {
            *last = Some((signer.address(), call.clone()));
        }

        if let Some(message) = &self.execute_error {
            return Err(ChainError::TransactionFailed(message.clone()));
        }

        Ok(TransactionOutcome {
            digest: "StubDigest1111".to_string(),
            status: ExecutionStatus::Success,
            object_changes: self
                .created
                .iter()
                .map(|(object_id, object_type)| ObjectChange::Created {
                    object_id: *object_id,
                    object_type: object_type.clone(),
                })
                .collect(),
        })
    }

    async fn inspect_move_call(
        &self,
        _sender: SuiAddress,
        call: &MoveCall,
    ) -> Result<Vec<Vec<u8>>, ChainError> {
        self.inspect_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_inspected.lock() {
            *last = Some(call.clone());
        }
        self.inspect_result.clone().map_err(ChainError::RpcError)
    }
}

/// BCS transaction data as `unsafe_moveCall` would return it for `sender`:
/// an empty programmable transaction paid from one gas coin.
pub(crate) fn unsigned_transaction(sender: SuiAddress) -> Vec<u8> {
    use sui_sdk_types::{
        Address, Digest, GasPayment, ObjectReference, ProgrammableTransaction, Transaction,
        TransactionExpiration, TransactionKind,
    };

    let sender = Address::from(sender);
    let transaction = Transaction {
        kind: TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
            inputs: Vec::new(),
            commands: Vec::new(),
        }),
        sender,
        gas_payment: GasPayment {
            objects: vec![ObjectReference::new(
                Address::new([5u8; 32]),
                1,
                Digest::new([6u8; 32]),
            )],
            owner: sender,
            price: 1_000,
            budget: 100_000_000,
        },
        expiration: TransactionExpiration::None,
    };
    bcs::to_bytes(&transaction).unwrap()
}
