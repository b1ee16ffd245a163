use soroban_sdk::{symbol_short, Address, Env};

pub struct ExecutorEvents;

impl ExecutorEvents {
    /// Topics: `("cycle", lender)`
    /// Data:   `(token, borrowed, fee, returned, swept)`
    ///
    /// `returned` is what the last hop produced; `swept` is what was left of
    /// the loan token for the owner after repayment.
    pub fn cycle(
        env: &Env,
        lender: &Address,
        token: &Address,
        borrowed: i128,
        fee: i128,
        returned: i128,
        swept: i128,
    ) {
        env.events().publish(
            (symbol_short!("cycle"), lender.clone()),
            (token.clone(), borrowed, fee, returned, swept),
        );
    }
}
