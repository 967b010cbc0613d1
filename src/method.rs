// Method Classifier
//
// Maps the 4-byte selector at the head of the claim transaction's input to one
// of the MerkleRedeem entry points that can emit `Claimed`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// keccak256("claimPeriod(address,uint256,uint256,bytes32[])")[..4]
pub const CLAIM_PERIOD_SELECTOR: [u8; 4] = [0x8d, 0xbf, 0xd5, 0xe8];

/// keccak256("claimPeriods(address,(uint256,uint256,bytes32[])[])")[..4]
pub const CLAIM_PERIODS_SELECTOR: [u8; 4] = [0xb0, 0x3d, 0x8c, 0x2f];

/// keccak256("execute(address,bytes)")[..4]
pub const EXECUTE_SELECTOR: [u8; 4] = [0x1c, 0xff, 0x79, 0xcd];

const KNOWN_METHODS: &[([u8; 4], ClaimMethod)] = &[
    (CLAIM_PERIOD_SELECTOR, ClaimMethod::ClaimPeriod),
    (CLAIM_PERIODS_SELECTOR, ClaimMethod::ClaimPeriods),
    (EXECUTE_SELECTOR, ClaimMethod::Execute),
];

/// Contract method that triggered a claim
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClaimMethod {
    ClaimPeriod,
    ClaimPeriods,
    Execute,
    Unknown,
}

impl ClaimMethod {
    /// Canonical method name stored on claim records
    pub fn name(&self) -> &'static str {
        match self {
            ClaimMethod::ClaimPeriod => "claimPeriod",
            ClaimMethod::ClaimPeriods => "claimPeriods",
            ClaimMethod::Execute => "execute",
            ClaimMethod::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClaimMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a selector. Anything outside the known table is `Unknown`.
pub fn classify(selector: [u8; 4]) -> ClaimMethod {
    KNOWN_METHODS
        .iter()
        .find(|(known, _)| *known == selector)
        .map(|(_, method)| *method)
        .unwrap_or(ClaimMethod::Unknown)
}
