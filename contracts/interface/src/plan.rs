use soroban_sdk::{contracttype, Address, Vec};

/// Longest cycle a plan may carry.
pub const MAX_HOPS: u32 = 4;

/// One swap of a cyclic path: sell `token_in` into `pool` for `token_out`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hop {
    pub pool: Address,
    pub token_in: Address,
    pub token_out: Address,
}

/// A flash-loan cycle: borrow `amount` of `token` from `lender`, walk `hops`
/// back to `token`, repay, and hand what is left to `beneficiary`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CyclePlan {
    pub beneficiary: Address,
    pub lender: Address,
    pub token: Address,
    pub amount: i128,
    pub hops: Vec<Hop>,
}
