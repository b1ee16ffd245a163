#![no_std]

#[cfg(test)]
extern crate std;

mod storage;


pub use flashswap_interface::TokenError;

use soroban_sdk::{contract, contractimpl, log, Address, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};
use storage::AllowanceEntry;

fn check_nonnegative_amount(amount: i128) -> Result<(), TokenError> {
    if amount < 0 {
        return Err(TokenError::NegativeAmount);
    }
    Ok(())
}

fn spend_balance(env: &Env, from: &Address, amount: i128) -> Result<(), TokenError> {
    let balance = storage::get_balance(env, from);
    if balance < amount {
        log!(env, "transfer amount exceeds balance", from.clone(), balance, amount);
        return Err(TokenError::TransferAmountExceedsBalance);
    }
    storage::set_balance(env, from, balance - amount);
    Ok(())
}

fn receive_balance(env: &Env, to: &Address, amount: i128) -> Result<(), TokenError> {
    let balance = storage::get_balance(env, to);
    let updated = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
    storage::set_balance(env, to, updated);
    Ok(())
}

fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), TokenError> {
    let allowance = storage::get_allowance(env, from, spender);
    if allowance.amount < amount {
        log!(env, "insufficient allowance", spender.clone(), allowance.amount, amount);
        return Err(TokenError::InsufficientAllowance);
    }
    if amount > 0 {
        storage::set_allowance(
            env,
            from,
            spender,
            &AllowanceEntry {
                amount: allowance.amount - amount,
                expiration_ledger: allowance.expiration_ledger,
            },
        );
    }
    Ok(())
}

/// SEP-41 fungible token. Balance failures revert with ERC20-worded reasons
/// so the forked-chain scenarios read like their mainnet counterparts.
#[contract]
pub struct Token;

#[contractimpl]
impl Token {
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if storage::has_admin(&env) {
            return Err(TokenError::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: decimals,
            name,
            symbol,
        });
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        check_nonnegative_amount(amount)?;
        let admin = storage::get_admin(&env).ok_or(TokenError::NotInitialized)?;
        admin.require_auth();
        storage::extend_instance_ttl(&env);

        receive_balance(&env, &to, amount)?;
        let supply = storage::get_total_supply(&env)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        storage::set_total_supply(&env, supply);

        TokenUtils::new(&env).events().mint(admin, to, amount);
        Ok(())
    }

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), TokenError> {
        let admin = storage::get_admin(&env).ok_or(TokenError::NotInitialized)?;
        admin.require_auth();
        storage::extend_instance_ttl(&env);

        storage::set_admin(&env, &new_admin);
        TokenUtils::new(&env).events().set_admin(admin, new_admin);
        Ok(())
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &from, &spender).amount
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), TokenError> {
        from.require_auth();
        check_nonnegative_amount(amount)?;
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(TokenError::InvalidExpiration);
        }
        storage::extend_instance_ttl(&env);

        storage::set_allowance(
            &env,
            &from,
            &spender,
            &AllowanceEntry {
                amount,
                expiration_ledger,
            },
        );
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        check_nonnegative_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_balance(&env, &from, amount)?;
        receive_balance(&env, &to, amount)?;
        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        check_nonnegative_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_allowance(&env, &from, &spender, amount)?;
        spend_balance(&env, &from, amount)?;
        receive_balance(&env, &to, amount)?;
        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        check_nonnegative_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_balance(&env, &from, amount)?;
        storage::set_total_supply(&env, storage::get_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
        Ok(())
    }

    pub fn burn_from(
        env: Env,
        spender: Address,
        from: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        check_nonnegative_amount(amount)?;
        storage::extend_instance_ttl(&env);

        spend_allowance(&env, &from, &spender, amount)?;
        spend_balance(&env, &from, amount)?;
        storage::set_total_supply(&env, storage::get_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
        Ok(())
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_total_supply(&env)
    }
}
