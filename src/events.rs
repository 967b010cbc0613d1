// MerkleRedeem Event Decoders
//
// This module defines the distributor contract's events and turns a raw log
// plus its block/transaction context into a typed event for the handlers.

use alloy_primitives::{Address, Bytes, Log, B256, U256};
use alloy_sol_types::{sol, SolEvent};
use serde::{Deserialize, Serialize};

// ============================================================================
// CONTRACT EVENTS
// ============================================================================
// NOTE: Event names and parameter types MUST match the deployed contract for
// the signature hash to line up. None of the parameters are indexed.

sol! {
    #[derive(Debug)]
    event Claimed(address recipient, uint256 balance);

    #[derive(Debug)]
    event OwnerChanged(address oldOwner, address newOwner);

    #[derive(Debug)]
    event OwnerNominated(address newOwner);
}

/// Block and transaction data surrounding a log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventContext {
    pub block_hash: B256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
    /// Transaction sender
    pub transaction_from: Address,
    /// Full transaction input (selector + encoded arguments)
    pub transaction_input: Bytes,
    pub log_index: u64,
}

/// `Claimed(recipient, balance)` with its context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimedEvent {
    #[serde(flatten)]
    pub context: EventContext,
    pub recipient: Address,
    pub balance: U256,
}

/// `OwnerChanged(oldOwner, newOwner)` with its context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerChangedEvent {
    #[serde(flatten)]
    pub context: EventContext,
    pub old_owner: Address,
    pub new_owner: Address,
}

/// `OwnerNominated(newOwner)` with its context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerNominatedEvent {
    #[serde(flatten)]
    pub context: EventContext,
    pub new_owner: Address,
}

/// Any event emitted by the distributor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MerkleRedeemEvent {
    Claimed(ClaimedEvent),
    OwnerChanged(OwnerChangedEvent),
    OwnerNominated(OwnerNominatedEvent),
}

impl MerkleRedeemEvent {
    pub fn context(&self) -> &EventContext {
        match self {
            MerkleRedeemEvent::Claimed(e) => &e.context,
            MerkleRedeemEvent::OwnerChanged(e) => &e.context,
            MerkleRedeemEvent::OwnerNominated(e) => &e.context,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MerkleRedeemEvent::Claimed(_) => "Claimed",
            MerkleRedeemEvent::OwnerChanged(_) => "OwnerChanged",
            MerkleRedeemEvent::OwnerNominated(_) => "OwnerNominated",
        }
    }
}

/// Try to decode a log as one of the distributor's events.
///
/// Returns `None` for logs with a foreign signature or undecodable data.
pub fn decode_log(log: &Log, context: EventContext) -> Option<MerkleRedeemEvent> {
    let topic0 = log.topics().first()?;

    if *topic0 == Claimed::SIGNATURE_HASH {
        let event = Claimed::decode_log_data(&log.data).ok()?;
        return Some(MerkleRedeemEvent::Claimed(ClaimedEvent {
            context,
            recipient: event.recipient,
            balance: event.balance,
        }));
    }

    if *topic0 == OwnerChanged::SIGNATURE_HASH {
        let event = OwnerChanged::decode_log_data(&log.data).ok()?;
        return Some(MerkleRedeemEvent::OwnerChanged(OwnerChangedEvent {
            context,
            old_owner: event.oldOwner,
            new_owner: event.newOwner,
        }));
    }

    if *topic0 == OwnerNominated::SIGNATURE_HASH {
        let event = OwnerNominated::decode_log_data(&log.data).ok()?;
        return Some(MerkleRedeemEvent::OwnerNominated(OwnerNominatedEvent {
            context,
            new_owner: event.newOwner,
        }));
    }

    None
}
