use soroban_sdk::{contractclient, Address, Bytes, Env};

/// The slice of the Pair contract that the planner and the executor use.
#[contractclient(name = "PoolClient")]
pub trait PoolInterface {
    fn tokens(env: Env) -> (Address, Address);
    fn get_reserves(env: Env) -> (i128, i128, u64);
    fn get_current_fee_bps(env: Env) -> u32;
    fn swap(env: Env, amount_a_out: i128, amount_b_out: i128, to: Address);
    fn flash_loan(env: Env, receiver: Address, amount_a: i128, amount_b: i128, data: Bytes);
}
