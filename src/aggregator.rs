// Claim Aggregation
//
// Applies one decoded claim to the store: the three running totals, the
// claim record, and one period record per decoded entry. Events are applied
// exactly as delivered; re-delivering an event counts it again.

use crate::id::{account_id, global_total_id, period_id};
use crate::store::{Entity, EntityKind, Store};
use crate::types::{ClaimRecord, ClaimTotal, PeriodRecord};
use alloy_primitives::{Address, Bytes, U256};
use eyre::{eyre, Result, WrapErr};
use tracing::debug;

/// Which running total to update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalScope {
    Global,
    Sender(Address),
    Recipient(Address),
}

impl TotalScope {
    pub fn kind(&self) -> EntityKind {
        match self {
            TotalScope::Global => EntityKind::ClaimedTotal,
            TotalScope::Sender(_) => EntityKind::ClaimedTotalByFrom,
            TotalScope::Recipient(_) => EntityKind::ClaimedTotalByRecipient,
        }
    }

    pub fn id(&self) -> Bytes {
        match self {
            TotalScope::Global => global_total_id(),
            TotalScope::Sender(account) | TotalScope::Recipient(account) => account_id(*account),
        }
    }

    fn account(&self) -> Option<Address> {
        match self {
            TotalScope::Global => None,
            TotalScope::Sender(account) | TotalScope::Recipient(account) => Some(*account),
        }
    }

    fn wrap(&self, total: ClaimTotal) -> Entity {
        match self {
            TotalScope::Global => Entity::ClaimedTotal(total),
            TotalScope::Sender(_) => Entity::ClaimedTotalByFrom(total),
            TotalScope::Recipient(_) => Entity::ClaimedTotalByRecipient(total),
        }
    }
}

/// Load-modify-save one running total, creating it zeroed on first use
pub fn update_total<S: Store>(
    store: &mut S,
    scope: TotalScope,
    balance: U256,
    period_count: u64,
) -> Result<ClaimTotal> {
    let kind = scope.kind();
    let id = scope.id();

    let mut total = match store
        .load(kind, &id)
        .wrap_err_with(|| format!("Failed to load {} 0x{}", kind, hex::encode(&id)))?
    {
        Some(entity) => entity
            .into_total()
            .ok_or_else(|| eyre!("{} 0x{} is not a total record", kind, hex::encode(&id)))?,
        None => ClaimTotal::new(id.clone(), scope.account()),
    };

    total.add_claim(balance, period_count);

    store
        .save(scope.wrap(total.clone()))
        .wrap_err_with(|| format!("Failed to save {} 0x{}", kind, hex::encode(&id)))?;

    Ok(total)
}

/// Build the period records for a claim, one per decoded entry
pub fn period_records(claim: &ClaimRecord) -> Vec<PeriodRecord> {
    claim
        .claims
        .iter()
        .zip(0u32..)
        .map(|(entry, index)| PeriodRecord {
            id: period_id(&claim.id, index),
            claim_id: claim.id.clone(),
            index,
            from: claim.from,
            recipient: claim.recipient,
            period: entry.period,
            balance: entry.balance,
            block_number: claim.block_number,
            block_timestamp: claim.block_timestamp,
            transaction_hash: claim.transaction_hash,
            method_id: claim.method_id.clone(),
            method: claim.method,
        })
        .collect()
}

/// Apply a decoded claim.
///
/// Totals are keyed by the transaction sender and the claim recipient and
/// accumulate the event's reported balance. Every step runs even when no
/// period was decoded. Any store error aborts the claim.
pub fn apply_claim<S: Store>(store: &mut S, claim: ClaimRecord) -> Result<()> {
    let period_count = claim.period_count() as u64;

    for scope in [
        TotalScope::Global,
        TotalScope::Sender(claim.from),
        TotalScope::Recipient(claim.recipient),
    ] {
        update_total(store, scope, claim.balance, period_count)?;
    }

    let periods = period_records(&claim);
    let claim_id = claim.id.clone();

    store
        .save(Entity::Claimed(claim))
        .wrap_err_with(|| format!("Failed to save Claimed 0x{}", hex::encode(&claim_id)))?;

    for record in periods {
        debug!(
            "Period record {}: period={}, balance={}",
            record.index, record.period, record.balance
        );
        let id = record.id.clone();
        store
            .save(Entity::ClaimedByPeriod(record))
            .wrap_err_with(|| format!("Failed to save ClaimedByPeriod 0x{}", hex::encode(&id)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::ClaimMethod;
    use crate::store::MemoryStore;
    use crate::types::{Period, PeriodClaim};
    use alloy_primitives::{address, B256};

    const SENDER: Address = address!("0000000000000000000000000000000000000001");
    const RECIPIENT: Address = address!("0000000000000000000000000000000000000002");

    fn claim(id: u8, balance: u64, entries: &[(Period, u64)]) -> ClaimRecord {
        ClaimRecord {
            id: Bytes::from(vec![id]),
            from: SENDER,
            recipient: RECIPIENT,
            balance: U256::from(balance),
            block_number: 100,
            block_timestamp: 1_000,
            transaction_hash: B256::repeat_byte(id),
            transaction_input: Bytes::new(),
            method_id: Bytes::from_static(&[0xb0, 0x3d, 0x8c, 0x2f]),
            method: ClaimMethod::ClaimPeriods,
            claims: entries
                .iter()
                .map(|(period, balance)| PeriodClaim { period: *period, balance: U256::from(*balance) })
                .collect(),
        }
    }

    #[test]
    fn test_totals_created_lazily() {
        let mut store = MemoryStore::new();
        let total = update_total(&mut store, TotalScope::Sender(SENDER), U256::from(3u64), 2).unwrap();

        assert_eq!(total.account, Some(SENDER));
        assert_eq!(total.id, account_id(SENDER));
        assert_eq!(total.claim_count, 1);
        assert_eq!(total.period_count, 2);
        assert_eq!(store.count(EntityKind::ClaimedTotalByFrom), 1);
        assert_eq!(store.count(EntityKind::ClaimedTotal), 0);
    }

    #[test]
    fn test_apply_claim_writes_all_records() {
        let mut store = MemoryStore::new();
        let entries = [
            (Period::Known(U256::from(2)), 30),
            (Period::Known(U256::from(1)), 70),
        ];
        apply_claim(&mut store, claim(1, 100, &entries)).unwrap();

        assert_eq!(store.count(EntityKind::Claimed), 1);
        assert_eq!(store.count(EntityKind::ClaimedByPeriod), 2);

        let global = store.total(EntityKind::ClaimedTotal, &global_total_id()).unwrap();
        assert_eq!(global.account, None);
        assert_eq!(global.total_balance, U256::from(100u64));
        assert_eq!(global.claim_count, 1);
        assert_eq!(global.period_count, 2);

        let second = store.period(&period_id(&Bytes::from(vec![1]), 1)).unwrap();
        assert_eq!(second.period, Period::Known(U256::from(1)));
        assert_eq!(second.balance, U256::from(70u64));
        assert_eq!(second.index, 1);
        assert_eq!(second.from, SENDER);
    }

    #[test]
    fn test_apply_claim_without_periods_still_aggregates() {
        let mut store = MemoryStore::new();
        apply_claim(&mut store, claim(1, 100, &[])).unwrap();

        assert_eq!(store.count(EntityKind::Claimed), 1);
        assert_eq!(store.count(EntityKind::ClaimedByPeriod), 0);

        let by_recipient = store
            .total(EntityKind::ClaimedTotalByRecipient, &account_id(RECIPIENT))
            .unwrap();
        assert_eq!(by_recipient.total_balance, U256::from(100u64));
        assert_eq!(by_recipient.period_count, 0);
        assert_eq!(by_recipient.claim_count, 1);
    }

    #[test]
    fn test_reapplying_doubles_totals() {
        let mut store = MemoryStore::new();
        let entries = [(Period::Unknown, 100)];
        apply_claim(&mut store, claim(1, 100, &entries)).unwrap();
        apply_claim(&mut store, claim(1, 100, &entries)).unwrap();

        for (kind, id) in [
            (EntityKind::ClaimedTotal, global_total_id()),
            (EntityKind::ClaimedTotalByFrom, account_id(SENDER)),
            (EntityKind::ClaimedTotalByRecipient, account_id(RECIPIENT)),
        ] {
            let total = store.total(kind, &id).unwrap();
            assert_eq!(total.total_balance, U256::from(200u64), "{kind}");
            assert_eq!(total.claim_count, 2, "{kind}");
            assert_eq!(total.period_count, 2, "{kind}");
        }
        // Same id: the claim and period records are rewritten, not duplicated
        assert_eq!(store.count(EntityKind::Claimed), 1);
        assert_eq!(store.count(EntityKind::ClaimedByPeriod), 1);
    }

    #[test]
    fn test_mismatched_total_record_is_an_error() {
        struct WrongKindStore;
        impl Store for WrongKindStore {
            fn load(&self, _: EntityKind, _: &Bytes) -> Result<Option<Entity>> {
                Ok(Some(Entity::Claimed(claim(1, 1, &[]))))
            }
            fn save(&mut self, _: Entity) -> Result<()> {
                Ok(())
            }
        }

        let result = update_total(&mut WrongKindStore, TotalScope::Global, U256::from(1u64), 0);
        assert!(result.is_err());
    }
}
