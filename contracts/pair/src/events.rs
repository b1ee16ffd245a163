use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub struct PairEvents;

impl PairEvents {
    /// Emits a `swap` event after a successful token swap.
    ///
    /// Topics: `("swap", to)`
    /// Data:   `(amount_a_in, amount_b_in, amount_a_out, amount_b_out, fee_bps)`
    ///
    /// Soroban has no implicit message sender, so the topic carries the
    /// recipient of the output instead.
    pub fn swap(
        env: &Env,
        to: &Address,
        amount_a_in: i128,
        amount_b_in: i128,
        amount_a_out: i128,
        amount_b_out: i128,
        fee_bps: u32,
    ) {
        env.events().publish(
            (symbol_short!("swap"), to.clone()),
            (amount_a_in, amount_b_in, amount_a_out, amount_b_out, fee_bps),
        );
    }

    pub fn sync(env: &Env, reserve_a: i128, reserve_b: i128) {
        env.events().publish((symbol_short!("sync"),), (reserve_a, reserve_b));
    }

    /// Emits a `flash_loan` event after a successful flash loan.
    ///
    /// Topics: `("flash_loan", receiver)`
    /// Data:   `(amount_a, amount_b, fee_a, fee_b)`
    ///
    /// "flash_loan" = 10 chars → exceeds the 9-char symbol_short! limit,
    /// so we use Symbol::new for a runtime allocation.
    pub fn flash_loan(
        env: &Env,
        receiver: &Address,
        amount_a: i128,
        amount_b: i128,
        fee_a: i128,
        fee_b: i128,
    ) {
        env.events().publish(
            (Symbol::new(env, "flash_loan"), receiver.clone()),
            (amount_a, amount_b, fee_a, fee_b),
        );
    }
}
