// MerkleRedeem Claim Indexer Library
//
// Derives claim, per-period, running-total and owner audit records from the
// distributor contract's events and the call-data that triggered them.

pub mod aggregator;
pub mod calldata;
pub mod config;
pub mod decoder;
pub mod events;
pub mod handlers;
pub mod id;
pub mod method;
pub mod replay;
pub mod store;
pub mod types;

// Re-export commonly used items for testing
pub use decoder::{decode_claim, DecodedClaim};
pub use events::{decode_log, ClaimedEvent, EventContext, MerkleRedeemEvent};
pub use handlers::{handle_claimed, handle_event, handle_owner_changed, handle_owner_nominated};
pub use method::{classify, ClaimMethod};
pub use store::{Entity, EntityKind, MemoryStore, Store};
pub use types::{ClaimRecord, ClaimTotal, Period, PeriodClaim, PeriodRecord};
