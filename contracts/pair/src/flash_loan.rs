use soroban_sdk::{token::TokenClient, Address, Bytes, Env};

use flashswap_interface::{math::compute_flash_fee, FlashReceiverClient};

use crate::{
    errors::PairError,
    events::PairEvents,
    reentrancy,
    storage::{get_pair_state, set_pair_state, PairStorage},
};

/// Maximum allowed byte length for the `data` payload passed to the receiver.
pub const MAX_PAYLOAD_SIZE: u32 = 256;

/// Fee owed on one side of a loan; nothing is owed on a side not borrowed.
fn side_fee(amount: i128, fee_bps: u32) -> i128 {
    if amount > 0 {
        compute_flash_fee(amount, fee_bps)
    } else {
        0
    }
}

/// Balance the pool must hold after the callback on a borrowed side.
fn owed_balance(reserve: i128, amount: i128, fee: i128) -> Result<Option<i128>, PairError> {
    if amount == 0 {
        return Ok(None);
    }
    reserve.checked_add(fee).map(Some).ok_or(PairError::Overflow)
}

fn check_liquidity(state: &PairStorage, amount_a: i128, amount_b: i128) -> Result<(), PairError> {
    if amount_a > state.reserve_a || amount_b > state.reserve_b {
        return Err(PairError::InsufficientLiquidity);
    }
    Ok(())
}

/// Lends `amount_a` of token_a and/or `amount_b` of token_b to `receiver`.
///
/// The pool is locked for the whole loan, so the receiver cannot trade
/// against the lender inside its callback. `on_flash_loan` is called with
/// the pool as initiator and must send principal plus fee back before it
/// returns. The fee is the pool's swap fee with a floor of 5 bps and never
/// less than one unit, so even a one-unit loan costs two to repay.
///
/// After the callback each borrowed side must hold at least its old reserve
/// plus its fee and the product of the reserves must not shrink. Reserves
/// are then re-read from the token balances.
///
/// Any failure inside the callback, such as a repayment transfer larger
/// than the receiver's balance, aborts the loan with the callee's error.
pub fn execute_flash_loan(
    env: &Env,
    receiver: &Address,
    amount_a: i128,
    amount_b: i128,
    data: &Bytes,
) -> Result<(), PairError> {
    if data.len() > MAX_PAYLOAD_SIZE {
        return Err(PairError::FlashPayloadTooLarge);
    }
    if amount_a < 0 || amount_b < 0 || (amount_a == 0 && amount_b == 0) {
        return Err(PairError::InsufficientInputAmount);
    }

    let mut state = get_pair_state(env).ok_or(PairError::NotInitialized)?;
    check_liquidity(&state, amount_a, amount_b)?;

    let k_before = state
        .reserve_a
        .checked_mul(state.reserve_b)
        .ok_or(PairError::Overflow)?;
    let fee_a = side_fee(amount_a, state.fee_bps);
    let fee_b = side_fee(amount_b, state.fee_bps);
    let owed_a = owed_balance(state.reserve_a, amount_a, fee_a)?;
    let owed_b = owed_balance(state.reserve_b, amount_b, fee_b)?;

    reentrancy::acquire(env)?;

    let pool = env.current_contract_address();
    let token_a = TokenClient::new(env, &state.token_a);
    let token_b = TokenClient::new(env, &state.token_b);
    if amount_a > 0 {
        token_a.transfer(&pool, receiver, &amount_a);
    }
    if amount_b > 0 {
        token_b.transfer(&pool, receiver, &amount_b);
    }

    FlashReceiverClient::new(env, receiver).on_flash_loan(
        &pool,
        &state.token_a,
        &state.token_b,
        &amount_a,
        &amount_b,
        &fee_a,
        &fee_b,
        data,
    );

    let balance_a = token_a.balance(&pool);
    let balance_b = token_b.balance(&pool);
    let repaid = |owed: Option<i128>, balance: i128| owed.map_or(true, |owed| balance >= owed);
    if !repaid(owed_a, balance_a) || !repaid(owed_b, balance_b) {
        return Err(PairError::FlashLoanNotRepaid);
    }

    let k_after = balance_a
        .checked_mul(balance_b)
        .ok_or(PairError::Overflow)?;
    if k_after < k_before {
        return Err(PairError::InvalidK);
    }

    state.reserve_a = balance_a;
    state.reserve_b = balance_b;
    state.block_timestamp_last = env.ledger().timestamp();
    set_pair_state(env, &state);

    PairEvents::flash_loan(env, receiver, amount_a, amount_b, fee_a, fee_b);
    reentrancy::release(env);
    Ok(())
}
