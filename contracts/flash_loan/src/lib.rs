#![no_std]

mod errors;
mod events;
mod planner;
mod storage;

#[cfg(test)]
extern crate std;


pub use errors::FlashLoanError;
pub use planner::{CycleQuote, MAX_POOLS};

use flashswap_interface::{CyclePlan, PoolClient, TokenError};
use soroban_sdk::{
    contract, contractclient, contractimpl, log, token::TokenClient, Address, Bytes, Env, Vec,
};

use events::FlashLoanEvents;
use storage::FlashLoanConfig;

#[contractclient(name = "ExecutorClient")]
pub trait ExecutorInterface {
    fn prepare(env: Env, plan: CyclePlan);
}

/// Maps the failure of a flash loan to this contract's error.
///
/// The executor repays with a plain token transfer, so a cycle that brought
/// back less than principal + fee surfaces as the token's balance error.
fn classify_loan_failure(env: &Env, error: soroban_sdk::Error) -> FlashLoanError {
    if error == soroban_sdk::Error::from(TokenError::TransferAmountExceedsBalance) {
        FlashLoanError::TransferAmountExceedsBalance
    } else {
        log!(env, "flash loan reverted", error);
        FlashLoanError::LoanReverted
    }
}

fn require_owner(env: &Env) -> Result<FlashLoanConfig, FlashLoanError> {
    let config = storage::get_config(env).ok_or(FlashLoanError::NotInitialized)?;
    config.owner.require_auth();
    storage::extend_instance_ttl(env);
    Ok(config)
}

/// Runs cyclic flash loans: borrow a token from one pool, trade it around a
/// loop of other pools back into the same token, repay, keep the surplus.
///
/// There is no profitability pre-check in `run`. A cycle that cannot pay
/// for itself fails at repayment and the whole invocation is rolled back.
#[contract]
pub struct FlashLoan;

#[contractimpl]
impl FlashLoan {
    /// `executor` must be a cycle executor owned by this contract.
    pub fn initialize(env: Env, owner: Address, executor: Address) -> Result<(), FlashLoanError> {
        if storage::has_config(&env) {
            return Err(FlashLoanError::AlreadyInitialized);
        }
        storage::set_config(&env, &FlashLoanConfig { owner, executor });
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, FlashLoanError> {
        storage::get_config(&env)
            .map(|config| config.owner)
            .ok_or(FlashLoanError::NotInitialized)
    }

    pub fn executor(env: Env) -> Result<Address, FlashLoanError> {
        storage::get_config(&env)
            .map(|config| config.executor)
            .ok_or(FlashLoanError::NotInitialized)
    }

    /// Registers a pool for planning. The pool must answer `tokens`.
    pub fn add_pool(env: Env, pool: Address) -> Result<(), FlashLoanError> {
        require_owner(&env)?;

        let mut pools = storage::get_pools(&env);
        if pools.contains(&pool) {
            return Err(FlashLoanError::PoolExists);
        }
        if pools.len() >= MAX_POOLS {
            return Err(FlashLoanError::TooManyPools);
        }
        PoolClient::new(&env, &pool).tokens();

        pools.push_back(pool.clone());
        storage::set_pools(&env, &pools);
        FlashLoanEvents::pool_added(&env, &pool);
        Ok(())
    }

    pub fn remove_pool(env: Env, pool: Address) -> Result<(), FlashLoanError> {
        require_owner(&env)?;

        let mut pools = storage::get_pools(&env);
        let index = pools.first_index_of(&pool).ok_or(FlashLoanError::PoolNotFound)?;
        pools.remove(index);
        storage::set_pools(&env, &pools);
        FlashLoanEvents::pool_removed(&env, &pool);
        Ok(())
    }

    pub fn pools(env: Env) -> Vec<Address> {
        storage::get_pools(&env)
    }

    /// Quotes the best cycle for borrowing `amount` of `token` without
    /// moving anything. `profit` is negative for a losing cycle.
    pub fn preview(env: Env, token: Address, amount: i128) -> Result<CycleQuote, FlashLoanError> {
        if amount <= 0 {
            return Err(FlashLoanError::InvalidAmount);
        }
        let views = planner::load_pools(&env, &storage::get_pools(&env));
        planner::best_cycle(&env, &views, &token, amount)
    }

    /// Borrows `amount` of `token`, runs it around the best cycle and
    /// returns the surplus credited to this contract.
    pub fn run(env: Env, token: Address, amount: i128) -> Result<i128, FlashLoanError> {
        let config = require_owner(&env)?;
        if amount <= 0 {
            return Err(FlashLoanError::InvalidAmount);
        }

        let views = planner::load_pools(&env, &storage::get_pools(&env));
        let quote = planner::best_cycle(&env, &views, &token, amount)?;

        let me = env.current_contract_address();
        ExecutorClient::new(&env, &config.executor).prepare(&CyclePlan {
            beneficiary: me.clone(),
            lender: quote.lender.clone(),
            token: token.clone(),
            amount,
            hops: quote.hops.clone(),
        });

        let token_client = TokenClient::new(&env, &token);
        let before = token_client.balance(&me);

        let (amount_a, amount_b) = if quote.lends_a {
            (amount, 0)
        } else {
            (0, amount)
        };
        let lender = PoolClient::new(&env, &quote.lender);
        match lender.try_flash_loan(&config.executor, &amount_a, &amount_b, &Bytes::new(&env)) {
            Ok(_) => {}
            Err(Ok(error)) => return Err(classify_loan_failure(&env, error)),
            Err(Err(_)) => return Err(FlashLoanError::LoanReverted),
        }

        let profit = token_client.balance(&me) - before;
        FlashLoanEvents::run(&env, &token, &quote.lender, amount, profit);
        Ok(profit)
    }

    /// Moves proceeds held by this contract to `to`.
    pub fn withdraw(env: Env, token: Address, to: Address, amount: i128) -> Result<(), FlashLoanError> {
        require_owner(&env)?;
        if amount <= 0 {
            return Err(FlashLoanError::InvalidAmount);
        }
        TokenClient::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);
        Ok(())
    }
}
