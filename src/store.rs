// Record Store
//
// Persistence boundary for the handlers. A store only needs keyed load and
// save; each save is assumed atomic and durable once it returns.

use crate::types::{
    ClaimRecord, ClaimTotal, OwnerChangedRecord, OwnerNominatedRecord, PeriodRecord,
};
use alloy_primitives::Bytes;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Record type, used together with the id as the storage key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Claimed,
    ClaimedByPeriod,
    ClaimedTotal,
    ClaimedTotalByFrom,
    ClaimedTotalByRecipient,
    OwnerChanged,
    OwnerNominated,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A stored record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Entity {
    Claimed(ClaimRecord),
    ClaimedByPeriod(PeriodRecord),
    ClaimedTotal(ClaimTotal),
    ClaimedTotalByFrom(ClaimTotal),
    ClaimedTotalByRecipient(ClaimTotal),
    OwnerChanged(OwnerChangedRecord),
    OwnerNominated(OwnerNominatedRecord),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Claimed(_) => EntityKind::Claimed,
            Entity::ClaimedByPeriod(_) => EntityKind::ClaimedByPeriod,
            Entity::ClaimedTotal(_) => EntityKind::ClaimedTotal,
            Entity::ClaimedTotalByFrom(_) => EntityKind::ClaimedTotalByFrom,
            Entity::ClaimedTotalByRecipient(_) => EntityKind::ClaimedTotalByRecipient,
            Entity::OwnerChanged(_) => EntityKind::OwnerChanged,
            Entity::OwnerNominated(_) => EntityKind::OwnerNominated,
        }
    }

    pub fn id(&self) -> &Bytes {
        match self {
            Entity::Claimed(r) => &r.id,
            Entity::ClaimedByPeriod(r) => &r.id,
            Entity::ClaimedTotal(t)
            | Entity::ClaimedTotalByFrom(t)
            | Entity::ClaimedTotalByRecipient(t) => &t.id,
            Entity::OwnerChanged(r) => &r.id,
            Entity::OwnerNominated(r) => &r.id,
        }
    }

    /// The running total carried by a total entity
    pub fn into_total(self) -> Option<ClaimTotal> {
        match self {
            Entity::ClaimedTotal(t)
            | Entity::ClaimedTotalByFrom(t)
            | Entity::ClaimedTotalByRecipient(t) => Some(t),
            _ => None,
        }
    }
}

/// Keyed record persistence
pub trait Store {
    /// Load a record, `None` if absent
    fn load(&self, kind: EntityKind, id: &Bytes) -> Result<Option<Entity>>;

    /// Insert or replace a record
    fn save(&mut self, entity: Entity) -> Result<()>;
}

/// In-process store backed by a map
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<(EntityKind, Bytes), Entity>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records of a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.records.keys().filter(|(k, _)| *k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, kind: EntityKind, id: &Bytes) -> Option<&Entity> {
        self.records.get(&(kind, id.clone()))
    }

    pub fn claim(&self, id: &Bytes) -> Option<&ClaimRecord> {
        match self.get(EntityKind::Claimed, id)? {
            Entity::Claimed(record) => Some(record),
            _ => None,
        }
    }

    pub fn period(&self, id: &Bytes) -> Option<&PeriodRecord> {
        match self.get(EntityKind::ClaimedByPeriod, id)? {
            Entity::ClaimedByPeriod(record) => Some(record),
            _ => None,
        }
    }

    /// Running total of a total kind
    pub fn total(&self, kind: EntityKind, id: &Bytes) -> Option<&ClaimTotal> {
        match self.get(kind, id)? {
            Entity::ClaimedTotal(t)
            | Entity::ClaimedTotalByFrom(t)
            | Entity::ClaimedTotalByRecipient(t) => Some(t),
            _ => None,
        }
    }

    /// All records, ordered by kind then id
    pub fn snapshot(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.records.values().cloned().collect();
        entities.sort_by(|a, b| (a.kind(), a.id()).cmp(&(b.kind(), b.id())));
        entities
    }

    /// Encode the snapshot with bincode
    pub fn to_bincode(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.snapshot()).wrap_err("Failed to encode store snapshot")
    }

    /// Rebuild a store from a bincode snapshot
    pub fn from_bincode(bytes: &[u8]) -> Result<Self> {
        let entities: Vec<Entity> =
            bincode::deserialize(bytes).wrap_err("Failed to decode store snapshot")?;
        let records = entities
            .into_iter()
            .map(|e| ((e.kind(), e.id().clone()), e))
            .collect();
        Ok(Self { records })
    }
}

impl Store for MemoryStore {
    fn load(&self, kind: EntityKind, id: &Bytes) -> Result<Option<Entity>> {
        Ok(self.get(kind, id).cloned())
    }

    fn save(&mut self, entity: Entity) -> Result<()> {
        self.records.insert((entity.kind(), entity.id().clone()), entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Period;
    use alloy_primitives::{Address, U256};

    fn total(id: &'static [u8], balance: u64) -> ClaimTotal {
        let mut t = ClaimTotal::new(Bytes::from_static(id), None);
        t.add_claim(U256::from(balance), 1);
        t
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        let loaded = store.load(EntityKind::ClaimedTotal, &Bytes::from_static(&[1])).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_replaces_by_kind_and_id() {
        let mut store = MemoryStore::new();
        store.save(Entity::ClaimedTotal(total(&[1], 5))).unwrap();
        store.save(Entity::ClaimedTotal(total(&[1], 7))).unwrap();
        // Same id under another kind is a separate record
        store.save(Entity::ClaimedTotalByFrom(total(&[1], 9))).unwrap();

        assert_eq!(store.count(EntityKind::ClaimedTotal), 1);
        assert_eq!(store.count(EntityKind::ClaimedTotalByFrom), 1);
        assert_eq!(
            store.total(EntityKind::ClaimedTotal, &Bytes::from_static(&[1])).unwrap().total_balance,
            U256::from(7u64)
        );
    }

    #[test]
    fn test_bincode_snapshot_restores_store() {
        let mut store = MemoryStore::new();
        store.save(Entity::ClaimedTotal(total(&[1, 0, 0, 0], 42))).unwrap();
        store
            .save(Entity::ClaimedByPeriod(PeriodRecord {
                id: Bytes::from_static(&[9, b'-', 0, 0, 0, 0]),
                claim_id: Bytes::from_static(&[9]),
                index: 0,
                from: Address::ZERO,
                recipient: Address::ZERO,
                period: Period::Unknown,
                balance: U256::from(42u64),
                block_number: 1,
                block_timestamp: 2,
                transaction_hash: Default::default(),
                method_id: Bytes::from_static(&[0x1c, 0xff, 0x79, 0xcd]),
                method: crate::method::ClaimMethod::Execute,
            }))
            .unwrap();

        let restored = MemoryStore::from_bincode(&store.to_bincode().unwrap()).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.snapshot(), store.snapshot());
    }
}
