// Claim Decoder
//
// Turns the claim transaction's input into the ordered (period, balance)
// breakdown recorded for a `Claimed` event.

use crate::calldata::{decode_claim_period, decode_claim_periods, split_selector, wrap_as_tuple};
use crate::method::{classify, ClaimMethod};
use crate::types::{Period, PeriodClaim};
use alloy_primitives::{Bytes, U256};
use tracing::{debug, warn};

/// Result of decoding one claim transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedClaim {
    /// Selector prefix of the input
    pub method_id: Bytes,
    pub method: ClaimMethod,
    /// Ordered entries; empty when a recognized method failed to decode
    pub claims: Vec<PeriodClaim>,
}

impl DecodedClaim {
    pub fn period_count(&self) -> usize {
        self.claims.len()
    }

    /// Sum of decoded balances (saturating)
    pub fn total_balance(&self) -> U256 {
        self.claims
            .iter()
            .fold(U256::ZERO, |acc, c| acc.saturating_add(c.balance))
    }
}

/// Classify and decode a claim transaction's input.
///
/// `event_balance` is the balance reported by the `Claimed` event; it becomes
/// the single entry for `execute` and unrecognized selectors. A recognized
/// method whose parameters fail to decode yields no entries.
pub fn decode_claim(input: &[u8], event_balance: U256) -> DecodedClaim {
    let (selector, tail) = split_selector(input);
    let method = <[u8; 4]>::try_from(selector)
        .map(classify)
        .unwrap_or(ClaimMethod::Unknown);

    let claims = match method {
        ClaimMethod::ClaimPeriod => decode_claim_period(&wrap_as_tuple(tail))
            .map(|(_, period, balance, _)| {
                vec![PeriodClaim {
                    period: Period::Known(period),
                    balance,
                }]
            })
            .unwrap_or_else(|| {
                warn!("Failed to decode claimPeriod input ({} bytes)", input.len());
                Vec::new()
            }),

        ClaimMethod::ClaimPeriods => decode_claim_periods(&wrap_as_tuple(tail))
            .map(|(_, claims)| {
                claims
                    .into_iter()
                    .map(|(period, balance, _)| PeriodClaim {
                        period: Period::Known(period),
                        balance,
                    })
                    .collect()
            })
            .unwrap_or_else(|| {
                warn!("Failed to decode claimPeriods input ({} bytes)", input.len());
                Vec::new()
            }),

        ClaimMethod::Execute | ClaimMethod::Unknown => {
            if method == ClaimMethod::Unknown {
                debug!("Unrecognized claim selector 0x{}", hex::encode(selector));
            }
            vec![PeriodClaim {
                period: Period::Unknown,
                balance: event_balance,
            }]
        }
    };

    DecodedClaim {
        method_id: Bytes::copy_from_slice(selector),
        method,
        claims,
    }
}
