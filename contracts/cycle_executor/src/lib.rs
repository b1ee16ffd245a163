#![no_std]

mod cycle;
mod errors;
mod events;
mod storage;

#[cfg(test)]
extern crate std;


pub use errors::ExecutorError;

use flashswap_interface::{CyclePlan, FlashReceiver};
use soroban_sdk::{contract, contractimpl, panic_with_error, token::TokenClient, Address, Bytes, Env};

use events::ExecutorEvents;

/// Flash-loan receiver that trades the borrowed amount around a cyclic path.
///
/// Soroban does not allow a contract to be re-entered, so the contract that
/// asks for the loan cannot also receive the callback. The owner arms a plan
/// with `prepare`, asks the lending pool for a loan naming this contract as
/// receiver, and gets back whatever the cycle earned above the repayment.
#[contract]
pub struct CycleExecutor;

#[contractimpl]
impl CycleExecutor {
    pub fn initialize(env: Env, owner: Address) -> Result<(), ExecutorError> {
        if storage::get_owner(&env).is_some() {
            return Err(ExecutorError::AlreadyInitialized);
        }
        storage::set_owner(&env, &owner);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, ExecutorError> {
        storage::get_owner(&env).ok_or(ExecutorError::NotInitialized)
    }

    /// Arms `plan` for the next `on_flash_loan` from `plan.lender`.
    pub fn prepare(env: Env, plan: CyclePlan) -> Result<(), ExecutorError> {
        let owner = storage::get_owner(&env).ok_or(ExecutorError::NotInitialized)?;
        owner.require_auth();

        if plan.beneficiary != owner {
            return Err(ExecutorError::BeneficiaryMismatch);
        }
        cycle::validate_plan(&plan)?;

        storage::set_plan(&env, &plan);
        Ok(())
    }

    pub fn is_armed(env: Env) -> bool {
        storage::has_plan(&env)
    }
}

#[contractimpl]
impl FlashReceiver for CycleExecutor {
    fn on_flash_loan(
        env: Env,
        initiator: Address,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        fee_a: i128,
        fee_b: i128,
        _data: Bytes,
    ) {
        // The lending pool is the direct caller, so its auth is implicit.
        initiator.require_auth();

        let plan = match storage::take_plan(&env) {
            Some(plan) => plan,
            None => panic_with_error!(&env, ExecutorError::NoActivePlan),
        };
        if plan.lender != initiator {
            panic_with_error!(&env, ExecutorError::UnexpectedLender);
        }

        let (borrowed, fee) = if plan.token == token_a {
            (amount_a, fee_a)
        } else if plan.token == token_b {
            (amount_b, fee_b)
        } else {
            panic_with_error!(&env, ExecutorError::UnexpectedToken)
        };
        if borrowed != plan.amount {
            panic_with_error!(&env, ExecutorError::AmountMismatch);
        }

        let returned = cycle::walk(&env, &plan, borrowed).unwrap_or_else(|e| panic_with_error!(&env, e));

        // An unprofitable cycle leaves less than this on hand, and the
        // transfer reverts the whole loan with the token's balance error.
        let repay = match borrowed.checked_add(fee) {
            Some(repay) => repay,
            None => panic_with_error!(&env, ExecutorError::Overflow),
        };
        let me = env.current_contract_address();
        TokenClient::new(&env, &plan.token).transfer(&me, &initiator, &repay);

        let swept = cycle::sweep(&env, &plan, &plan.beneficiary);
        ExecutorEvents::cycle(&env, &plan.lender, &plan.token, borrowed, fee, returned, swept);
    }
}
