// Call-data Decoding
//
// The claim methods take a dynamic array as an argument, so their parameter
// block is not a self-describing value on its own. Prefixing it with a single
// offset word (0x20) turns it into the encoding of a one-field dynamic tuple,
// which a plain tuple decode can read back.
//
// Refer: https://ethereum.stackexchange.com/questions/114582

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolValue};

sol! {
    /// Element of the `claimPeriods` array
    #[derive(Debug)]
    struct Claim {
        uint256 period;
        uint256 balance;
        bytes32[] proof;
    }

    /// claimPeriod(address,uint256,uint256,bytes32[]) = 0x8dbfd5e8
    #[derive(Debug)]
    function claimPeriod(address recipient, uint256 period, uint256 balance, bytes32[] proof);

    /// claimPeriods(address,(uint256,uint256,bytes32[])[]) = 0xb03d8c2f
    #[derive(Debug)]
    function claimPeriods(address recipient, Claim[] claims);

    /// execute(address,bytes) = 0x1cff79cd
    #[derive(Debug)]
    function execute(address target, bytes data);
}

/// Offset word prepended to the parameter block: 31 zero bytes, then 0x20
pub const TUPLE_OFFSET_WORD: [u8; 32] = {
    let mut word = [0u8; 32];
    word[31] = 0x20;
    word
};

/// Selector length at the head of call-data
pub const SELECTOR_LEN: usize = 4;

/// `(address recipient, uint256 period, uint256 balance, bytes32[] proof)`
pub type ClaimPeriodParams = (Address, U256, U256, Vec<B256>);

/// `(address recipient, (uint256 period, uint256 balance, bytes32[] proof)[] claims)`
pub type ClaimPeriodsParams = (Address, Vec<(U256, U256, Vec<B256>)>);

/// Split call-data into its selector prefix and parameter tail.
///
/// Inputs shorter than a selector yield the whole input as prefix and an empty tail.
pub fn split_selector(input: &[u8]) -> (&[u8], &[u8]) {
    input.split_at(input.len().min(SELECTOR_LEN))
}

/// Prefix a parameter block with the tuple offset word
pub fn wrap_as_tuple(tail: &[u8]) -> Bytes {
    let mut envelope = Vec::with_capacity(TUPLE_OFFSET_WORD.len() + tail.len());
    envelope.extend_from_slice(&TUPLE_OFFSET_WORD);
    envelope.extend_from_slice(tail);
    envelope.into()
}

/// Decode a wrapped `claimPeriod` parameter block. `None` on malformed input.
pub fn decode_claim_period(envelope: &[u8]) -> Option<ClaimPeriodParams> {
    ClaimPeriodParams::abi_decode(envelope).ok()
}

/// Decode a wrapped `claimPeriods` parameter block. `None` on malformed input.
pub fn decode_claim_periods(envelope: &[u8]) -> Option<ClaimPeriodsParams> {
    ClaimPeriodsParams::abi_decode(envelope).ok()
}
