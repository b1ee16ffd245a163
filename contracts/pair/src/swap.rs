use soroban_sdk::{token::TokenClient, Address, Env};

use flashswap_interface::math::BPS_DENOMINATOR;

use crate::{
    errors::PairError,
    events::PairEvents,
    reentrancy,
    storage::{get_pair_state, set_pair_state},
};

/// Input that arrived on one side: whatever the balance holds above
/// `reserve - amount_out`.
fn amount_in(balance: i128, reserve: i128, amount_out: i128) -> i128 {
    let floor = reserve - amount_out;
    if balance > floor {
        balance - floor
    } else {
        0
    }
}

/// Optimistic constant-product swap.
///
/// The caller transfers its input to the pool first; the pool sends the
/// requested outputs to `to` and then checks the fee-adjusted invariant
/// `(bal_a*10^4 - in_a*fee) * (bal_b*10^4 - in_b*fee) >= r_a * r_b * 10^8`.
pub fn execute_swap(
    env: &Env,
    amount_a_out: i128,
    amount_b_out: i128,
    to: &Address,
) -> Result<(), PairError> {
    if amount_a_out < 0 || amount_b_out < 0 {
        return Err(PairError::InsufficientOutputAmount);
    }
    if amount_a_out == 0 && amount_b_out == 0 {
        return Err(PairError::InsufficientOutputAmount);
    }

    let mut state = get_pair_state(env).ok_or(PairError::NotInitialized)?;

    if amount_a_out >= state.reserve_a || amount_b_out >= state.reserve_b {
        return Err(PairError::InsufficientLiquidity);
    }
    if *to == state.token_a || *to == state.token_b {
        return Err(PairError::InvalidTo);
    }

    reentrancy::acquire(env)?;

    let contract = env.current_contract_address();
    let token_a = TokenClient::new(env, &state.token_a);
    let token_b = TokenClient::new(env, &state.token_b);

    if amount_a_out > 0 {
        token_a.transfer(&contract, to, &amount_a_out);
    }
    if amount_b_out > 0 {
        token_b.transfer(&contract, to, &amount_b_out);
    }

    let balance_a = token_a.balance(&contract);
    let balance_b = token_b.balance(&contract);

    let amount_a_in = amount_in(balance_a, state.reserve_a, amount_a_out);
    let amount_b_in = amount_in(balance_b, state.reserve_b, amount_b_out);
    if amount_a_in == 0 && amount_b_in == 0 {
        return Err(PairError::InsufficientInputAmount);
    }

    let fee = state.fee_bps as i128;
    let adjusted_a = balance_a
        .checked_mul(BPS_DENOMINATOR)
        .and_then(|v| v.checked_sub(amount_a_in.checked_mul(fee)?))
        .ok_or(PairError::Overflow)?;
    let adjusted_b = balance_b
        .checked_mul(BPS_DENOMINATOR)
        .and_then(|v| v.checked_sub(amount_b_in.checked_mul(fee)?))
        .ok_or(PairError::Overflow)?;

    let post_k = adjusted_a
        .checked_mul(adjusted_b)
        .ok_or(PairError::Overflow)?;
    let pre_k = state
        .reserve_a
        .checked_mul(state.reserve_b)
        .and_then(|v| v.checked_mul(BPS_DENOMINATOR * BPS_DENOMINATOR))
        .ok_or(PairError::Overflow)?;

    if post_k < pre_k {
        return Err(PairError::InvalidK);
    }

    state.reserve_a = balance_a;
    state.reserve_b = balance_b;
    state.block_timestamp_last = env.ledger().timestamp();
    set_pair_state(env, &state);

    PairEvents::swap(
        env,
        to,
        amount_a_in,
        amount_b_in,
        amount_a_out,
        amount_b_out,
        state.fee_bps,
    );
    PairEvents::sync(env, state.reserve_a, state.reserve_b);

    reentrancy::release(env);

    Ok(())
}
