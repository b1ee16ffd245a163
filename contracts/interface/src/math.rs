//! Constant-product pricing shared by the pool, the planner and the executor.
//! All amounts are raw token units; fees are in basis points.

/// Basis point denominator.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Minimum flash-loan fee in basis points (0.05%).
/// The effective fee is max(pool_fee_bps, FLASH_FEE_FLOOR_BPS).
pub const FLASH_FEE_FLOOR_BPS: u32 = 5;

/// Computes the flash-loan fee for `amount` units.
///
/// The effective fee rate is the higher of the pool's swap fee and
/// `FLASH_FEE_FLOOR_BPS`. A minimum of 1 unit is charged so that zero-fee
/// loans are impossible regardless of rounding.
pub fn compute_flash_fee(amount: i128, pool_fee_bps: u32) -> i128 {
    let effective_bps = pool_fee_bps.max(FLASH_FEE_FLOOR_BPS) as i128;
    // Saturate to i128::MAX (fee > principal) rather than panicking.
    let fee = amount
        .checked_mul(effective_bps)
        .map(|v| v / BPS_DENOMINATOR)
        .unwrap_or(i128::MAX);
    fee.max(1)
}

/// Output of an exact-input swap against `reserve_in`/`reserve_out`.
///
/// Formula: amount_out = (amount_in * (10000 - fee_bps) * reserve_out) /
///                       (reserve_in * 10000 + amount_in * (10000 - fee_bps))
///
/// Dust inputs quote `Some(0)`. `None` means the quote is meaningless:
/// non-positive input or reserves, a fee of 100% or more, or overflow.
pub fn get_amount_out(
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Option<i128> {
    if amount_in <= 0 || reserve_in <= 0 || reserve_out <= 0 {
        return None;
    }
    let fee_factor = BPS_DENOMINATOR.checked_sub(fee_bps as i128)?;
    if fee_factor <= 0 {
        return None;
    }

    let amount_in_with_fee = amount_in.checked_mul(fee_factor)?;
    let numerator = amount_in_with_fee.checked_mul(reserve_out)?;
    let denominator = reserve_in
        .checked_mul(BPS_DENOMINATOR)?
        .checked_add(amount_in_with_fee)?;

    Some(numerator / denominator)
}

/// Input required for an exact-output swap, rounded up.
///
/// Formula: amount_in = (reserve_in * amount_out * 10000) /
///                      ((reserve_out - amount_out) * (10000 - fee_bps)) + 1
pub fn get_amount_in(
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Option<i128> {
    if amount_out <= 0 || reserve_in <= 0 || amount_out >= reserve_out {
        return None;
    }
    let fee_factor = BPS_DENOMINATOR.checked_sub(fee_bps as i128)?;
    if fee_factor <= 0 {
        return None;
    }

    let numerator = reserve_in
        .checked_mul(amount_out)?
        .checked_mul(BPS_DENOMINATOR)?;
    let denominator = (reserve_out - amount_out).checked_mul(fee_factor)?;

    (numerator / denominator).checked_add(1)
}
