// Claim Indexer Record Types
//
// Records written by the claim and owner handlers. Claim, period and audit
// records are write-once; totals are the only records updated across events.

use crate::method::ClaimMethod;
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distribution period of a claim entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Period {
    /// Period index decoded from call-data
    Known(U256),
    /// Call-data did not carry a decodable period (`execute` or unknown selector)
    Unknown,
}

impl Period {
    /// Flat sentinel standing in for `Unknown` where a plain integer is required
    pub const UNKNOWN_MARKER: U256 = U256::MAX;

    /// Integer form of the period, with `Unknown` mapped to [`Period::UNKNOWN_MARKER`]
    pub fn as_raw(&self) -> U256 {
        match self {
            Period::Known(period) => *period,
            Period::Unknown => Self::UNKNOWN_MARKER,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Known(period) => write!(f, "{}", period),
            Period::Unknown => f.write_str("unknown"),
        }
    }
}

/// One decoded (period, balance) entry of a claim
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodClaim {
    pub period: Period,
    pub balance: U256,
}

/// One record per `Claimed` event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimRecord {
    pub id: Bytes,
    /// Transaction sender
    pub from: Address,
    pub recipient: Address,
    /// Balance reported by the event
    pub balance: U256,

    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
    pub transaction_input: Bytes,

    /// Selector prefix of the transaction input (shorter than 4 bytes only for degenerate input)
    pub method_id: Bytes,
    pub method: ClaimMethod,

    /// Decoded entries, index-aligned with the period records
    pub claims: Vec<PeriodClaim>,
}

impl ClaimRecord {
    pub fn period_count(&self) -> usize {
        self.claims.len()
    }

    pub fn periods(&self) -> Vec<Period> {
        self.claims.iter().map(|c| c.period).collect()
    }

    pub fn balances(&self) -> Vec<U256> {
        self.claims.iter().map(|c| c.balance).collect()
    }

    pub fn transaction_input_length(&self) -> usize {
        self.transaction_input.len()
    }

    /// Canonical method name (`claimPeriod`, `claimPeriods`, `execute`, `unknown`)
    pub fn method_name(&self) -> &'static str {
        self.method.name()
    }
}

/// One record per decoded (period, balance) entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodRecord {
    /// `claim id ++ "-" ++ u32_le(index)`
    pub id: Bytes,
    pub claim_id: Bytes,
    pub index: u32,
    pub from: Address,
    pub recipient: Address,
    pub period: Period,
    pub balance: U256,

    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,

    pub method_id: Bytes,
    pub method: ClaimMethod,
}

/// Running claim totals, globally or for one account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimTotal {
    pub id: Bytes,
    /// Sender or recipient the total is partitioned by; `None` for the global total
    pub account: Option<Address>,
    pub total_balance: U256,
    pub claim_count: u64,
    pub period_count: u64,
}

impl ClaimTotal {
    /// Zeroed total, as created on first occurrence of a key
    pub fn new(id: Bytes, account: Option<Address>) -> Self {
        Self {
            id,
            account,
            total_balance: U256::ZERO,
            claim_count: 0,
            period_count: 0,
        }
    }

    /// Add one claim event to the running totals.
    ///
    /// Every field saturates at its maximum rather than wrapping.
    pub fn add_claim(&mut self, balance: U256, period_count: u64) {
        self.total_balance = self.total_balance.saturating_add(balance);
        self.claim_count = self.claim_count.saturating_add(1);
        self.period_count = self.period_count.saturating_add(period_count);
    }
}

/// Audit record for `OwnerChanged`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerChangedRecord {
    pub id: Bytes,
    pub old_owner: Address,
    pub new_owner: Address,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}

/// Audit record for `OwnerNominated`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerNominatedRecord {
    pub id: Bytes,
    pub new_owner: Address,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}
