// MerkleRedeem Event Handlers
//
// Entry points called by the host once per event, in chain order. Each
// handler runs to completion before the next event is delivered.

use crate::aggregator::apply_claim;
use crate::decoder::decode_claim;
use crate::events::{ClaimedEvent, MerkleRedeemEvent, OwnerChangedEvent, OwnerNominatedEvent};
use crate::id::build_id;
use crate::store::{Entity, Store};
use crate::types::{ClaimRecord, OwnerChangedRecord, OwnerNominatedRecord};
use eyre::{Result, WrapErr};
use tracing::info;

/// Decode a `Claimed` event's transaction input and aggregate it
pub fn handle_claimed<S: Store>(store: &mut S, event: &ClaimedEvent) -> Result<()> {
    let ctx = &event.context;
    let id = build_id(ctx.block_hash, ctx.transaction_hash, ctx.log_index)?;
    let decoded = decode_claim(&ctx.transaction_input, event.balance);

    info!(
        "Claimed: tx={}, method={} (0x{}), from={}, recipient={}, balance={}, periods={}, decoded_balance={}",
        ctx.transaction_hash,
        decoded.method,
        hex::encode(&decoded.method_id),
        ctx.transaction_from,
        event.recipient,
        event.balance,
        decoded.period_count(),
        decoded.total_balance()
    );

    let record = ClaimRecord {
        id,
        from: ctx.transaction_from,
        recipient: event.recipient,
        balance: event.balance,
        block_number: ctx.block_number,
        block_timestamp: ctx.block_timestamp,
        transaction_hash: ctx.transaction_hash,
        transaction_input: ctx.transaction_input.clone(),
        method_id: decoded.method_id,
        method: decoded.method,
        claims: decoded.claims,
    };

    apply_claim(store, record)
        .wrap_err_with(|| format!("Failed to apply claim from tx {}", ctx.transaction_hash))
}

/// Record an `OwnerChanged` event
pub fn handle_owner_changed<S: Store>(store: &mut S, event: &OwnerChangedEvent) -> Result<()> {
    let ctx = &event.context;
    let id = build_id(ctx.block_hash, ctx.transaction_hash, ctx.log_index)?;

    info!(
        "OwnerChanged: tx={}, old_owner={}, new_owner={}",
        ctx.transaction_hash, event.old_owner, event.new_owner
    );

    store
        .save(Entity::OwnerChanged(OwnerChangedRecord {
            id,
            old_owner: event.old_owner,
            new_owner: event.new_owner,
            block_number: ctx.block_number,
            block_timestamp: ctx.block_timestamp,
            transaction_hash: ctx.transaction_hash,
        }))
        .wrap_err("Failed to save OwnerChanged")
}

/// Record an `OwnerNominated` event
pub fn handle_owner_nominated<S: Store>(store: &mut S, event: &OwnerNominatedEvent) -> Result<()> {
    let ctx = &event.context;
    let id = build_id(ctx.block_hash, ctx.transaction_hash, ctx.log_index)?;

    info!(
        "OwnerNominated: tx={}, new_owner={}",
        ctx.transaction_hash, event.new_owner
    );

    store
        .save(Entity::OwnerNominated(OwnerNominatedRecord {
            id,
            new_owner: event.new_owner,
            block_number: ctx.block_number,
            block_timestamp: ctx.block_timestamp,
            transaction_hash: ctx.transaction_hash,
        }))
        .wrap_err("Failed to save OwnerNominated")
}

/// Route an event to its handler
pub fn handle_event<S: Store>(store: &mut S, event: &MerkleRedeemEvent) -> Result<()> {
    match event {
        MerkleRedeemEvent::Claimed(e) => handle_claimed(store, e),
        MerkleRedeemEvent::OwnerChanged(e) => handle_owner_changed(store, e),
        MerkleRedeemEvent::OwnerNominated(e) => handle_owner_nominated(store, e),
    }
}
