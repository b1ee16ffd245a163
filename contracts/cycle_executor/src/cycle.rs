use soroban_sdk::{log, token::TokenClient, Address, Env};

use flashswap_interface::{math::get_amount_out, CyclePlan, Hop, PoolClient, MAX_HOPS};

use crate::errors::ExecutorError;

/// Checks that `plan` is a closed path starting and ending at `plan.token`
/// that never trades against the lending pool.
pub fn validate_plan(plan: &CyclePlan) -> Result<(), ExecutorError> {
    if plan.amount <= 0 || plan.hops.is_empty() || plan.hops.len() > MAX_HOPS {
        return Err(ExecutorError::InvalidPlan);
    }

    let mut expected_in = plan.token.clone();
    for hop in plan.hops.iter() {
        if hop.token_in != expected_in || hop.token_in == hop.token_out {
            return Err(ExecutorError::InvalidPlan);
        }
        // The lender is locked for the whole loan.
        if hop.pool == plan.lender {
            return Err(ExecutorError::InvalidPlan);
        }
        expected_in = hop.token_out.clone();
    }

    if expected_in != plan.token {
        return Err(ExecutorError::InvalidPlan);
    }
    Ok(())
}

/// Sells `amount_in` through one hop and returns what came out.
/// `Ok(0)` means the input is dust for this pool and nothing was traded.
fn swap_hop(env: &Env, hop: &Hop, amount_in: i128) -> Result<i128, ExecutorError> {
    let pool = PoolClient::new(env, &hop.pool);
    let (token_a, token_b) = pool.tokens();
    let (reserve_a, reserve_b, _) = pool.get_reserves();

    let sells_a = if hop.token_in == token_a && hop.token_out == token_b {
        true
    } else if hop.token_in == token_b && hop.token_out == token_a {
        false
    } else {
        return Err(ExecutorError::HopMismatch);
    };
    let (reserve_in, reserve_out) = if sells_a {
        (reserve_a, reserve_b)
    } else {
        (reserve_b, reserve_a)
    };

    let amount_out = get_amount_out(amount_in, reserve_in, reserve_out, pool.get_current_fee_bps())
        .ok_or(ExecutorError::QuoteFailed)?;
    if amount_out == 0 {
        log!(env, "dust hop, cycle stops here", hop.pool.clone(), amount_in);
        return Ok(0);
    }

    let me = env.current_contract_address();
    TokenClient::new(env, &hop.token_in).transfer(&me, &hop.pool, &amount_in);
    if sells_a {
        pool.swap(&0, &amount_out, &me);
    } else {
        pool.swap(&amount_out, &0, &me);
    }
    Ok(amount_out)
}

/// Walks the plan's hops with `borrowed` units of the loan token.
///
/// Returns the amount of the loan token produced by the last hop, or `0`
/// when some hop could not trade its input. In that case whatever was
/// still held (the unsold input) stays with this contract.
pub fn walk(env: &Env, plan: &CyclePlan, borrowed: i128) -> Result<i128, ExecutorError> {
    let mut amount = borrowed;
    for hop in plan.hops.iter() {
        amount = swap_hop(env, &hop, amount)?;
        if amount == 0 {
            return Ok(0);
        }
    }
    Ok(amount)
}

/// Moves every token of the path still held here to `to`.
/// Returns the amount of `plan.token` moved.
pub fn sweep(env: &Env, plan: &CyclePlan, to: &Address) -> i128 {
    let me = env.current_contract_address();
    let mut swept = 0;
    for hop in plan.hops.iter() {
        let token = TokenClient::new(env, &hop.token_out);
        let balance = token.balance(&me);
        if balance > 0 {
            token.transfer(&me, to, &balance);
        }
        if hop.token_out == plan.token {
            swept += balance;
        }
    }
    swept
}
