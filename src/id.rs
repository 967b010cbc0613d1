// Entity Identifiers
//
// Composite keys for records derived from a single log:
//   block_hash ++ "-" ++ tx_hash ++ "-" ++ u32_le(log_index)
// Per-period records append "-" ++ u32_le(index) to the claim id.

use alloy_primitives::{Address, Bytes, B256};
use eyre::{eyre, Result};

/// Separator between id components (UTF-8 dash)
pub const ID_SEPARATOR: u8 = b'-';

/// Key of the singleton global total: integer 1 as a 4-byte little-endian word
pub const GLOBAL_TOTAL_ID: [u8; 4] = 1u32.to_le_bytes();

/// Length of an id produced by [`build_id`]
pub const EVENT_ID_LEN: usize = 32 + 1 + 32 + 1 + 4;

/// Build the composite id for a log.
///
/// Fails only when `log_index` does not fit in the 4-byte index word.
pub fn build_id(block_hash: B256, tx_hash: B256, log_index: u64) -> Result<Bytes> {
    let index = u32::try_from(log_index)
        .map_err(|_| eyre!("log index {} does not fit in a 32-bit id word", log_index))?;

    let mut id = Vec::with_capacity(EVENT_ID_LEN);
    id.extend_from_slice(block_hash.as_slice());
    id.push(ID_SEPARATOR);
    id.extend_from_slice(tx_hash.as_slice());
    id.push(ID_SEPARATOR);
    id.extend_from_slice(&index.to_le_bytes());
    Ok(id.into())
}

/// Id of the `index`-th period record of a claim
pub fn period_id(claim_id: &Bytes, index: u32) -> Bytes {
    let mut id = Vec::with_capacity(claim_id.len() + 5);
    id.extend_from_slice(claim_id);
    id.push(ID_SEPARATOR);
    id.extend_from_slice(&index.to_le_bytes());
    id.into()
}

/// Id of a per-account total (raw address bytes)
pub fn account_id(account: Address) -> Bytes {
    Bytes::copy_from_slice(account.as_slice())
}

/// Id of the global total singleton
pub fn global_total_id() -> Bytes {
    Bytes::copy_from_slice(&GLOBAL_TOTAL_ID)
}
