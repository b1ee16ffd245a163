use soroban_sdk::{symbol_short, Address, Env};

pub struct FlashLoanEvents;

impl FlashLoanEvents {
    /// Topics: `("run", token)`
    /// Data:   `(lender, amount, profit)`
    pub fn run(env: &Env, token: &Address, lender: &Address, amount: i128, profit: i128) {
        env.events().publish(
            (symbol_short!("run"), token.clone()),
            (lender.clone(), amount, profit),
        );
    }

    pub fn pool_added(env: &Env, pool: &Address) {
        env.events().publish((symbol_short!("pool_add"),), pool.clone());
    }

    pub fn pool_removed(env: &Env, pool: &Address) {
        env.events().publish((symbol_short!("pool_rm"),), pool.clone());
    }
}
