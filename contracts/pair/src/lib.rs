#![no_std]

mod errors;
mod events;
mod flash_loan;
mod reentrancy;
mod storage;
mod swap;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; pair is no_std so we must opt-in explicitly.

#[cfg(test)]
mod test;

pub use errors::PairError;

use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env};
use storage::PairStorage;

/// Swap fee reported by an uninitialized pool (0.30%).
pub const DEFAULT_FEE_BPS: u32 = 30;

#[contract]
pub struct Pair;

#[contractimpl]
impl Pair {
    /// Binds the pool to its two tokens and a swap fee in basis points.
    pub fn initialize(
        env: Env,
        token_a: Address,
        token_b: Address,
        fee_bps: u32,
    ) -> Result<(), PairError> {
        if storage::has_pair_state(&env) {
            return Err(PairError::AlreadyInitialized);
        }
        if token_a == token_b {
            return Err(PairError::IdenticalTokens);
        }
        if fee_bps as i128 >= flashswap_interface::math::BPS_DENOMINATOR {
            return Err(PairError::InvalidFee);
        }

        storage::set_pair_state(
            &env,
            &PairStorage {
                token_a,
                token_b,
                reserve_a: 0,
                reserve_b: 0,
                block_timestamp_last: env.ledger().timestamp(),
                fee_bps,
            },
        );
        Ok(())
    }

    pub fn swap(
        env: Env,
        amount_a_out: i128,
        amount_b_out: i128,
        to: Address,
    ) -> Result<(), PairError> {
        swap::execute_swap(&env, amount_a_out, amount_b_out, &to)
    }

    /// Executes a flash loan of up to `amount_a` of token_a and/or `amount_b`
    /// of token_b to `receiver`.  The receiver must repay principal + fee
    /// before the `on_flash_loan` callback returns.
    pub fn flash_loan(
        env: Env,
        receiver: Address,
        amount_a: i128,
        amount_b: i128,
        data: Bytes,
    ) -> Result<(), PairError> {
        flash_loan::execute_flash_loan(&env, &receiver, amount_a, amount_b, &data)
    }

    /// Forces reserves to match the pool's token balances. Liquidity is
    /// seeded by transferring tokens to the pool and calling `sync`.
    pub fn sync(env: Env) -> Result<(), PairError> {
        let mut state = storage::get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        reentrancy::acquire(&env)?;

        let contract = env.current_contract_address();
        state.reserve_a = TokenClient::new(&env, &state.token_a).balance(&contract);
        state.reserve_b = TokenClient::new(&env, &state.token_b).balance(&contract);
        // Reserves whose product overflows could never pass a k check.
        state
            .reserve_a
            .checked_mul(state.reserve_b)
            .ok_or(PairError::Overflow)?;
        state.block_timestamp_last = env.ledger().timestamp();
        storage::set_pair_state(&env, &state);

        events::PairEvents::sync(&env, state.reserve_a, state.reserve_b);
        reentrancy::release(&env);
        Ok(())
    }

    pub fn get_reserves(env: Env) -> Result<(i128, i128, u64), PairError> {
        let state = storage::get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok((state.reserve_a, state.reserve_b, state.block_timestamp_last))
    }

    pub fn tokens(env: Env) -> Result<(Address, Address), PairError> {
        let state = storage::get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok((state.token_a, state.token_b))
    }

    pub fn get_current_fee_bps(env: Env) -> u32 {
        storage::get_pair_state(&env)
            .map(|state| state.fee_bps)
            .unwrap_or(DEFAULT_FEE_BPS)
    }
}
