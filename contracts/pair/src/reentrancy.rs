use soroban_sdk::Env;

use crate::{
    errors::PairError,
    storage::{get_reentrancy_guard, set_reentrancy_guard, ReentrancyGuard},
};

/// Acquires the pool lock. Reverts with `Locked` if already held.
///
/// Held for the whole of a swap or a flash loan, so a receiver cannot swap
/// against the pool that is lending to it. Soroban rolls back all state on a
/// failed invocation, so the lock is cleared if the outer call reverts.
pub fn acquire(env: &Env) -> Result<(), PairError> {
    let guard = get_reentrancy_guard(env);
    if guard.locked {
        return Err(PairError::Locked);
    }
    set_reentrancy_guard(env, &ReentrancyGuard { locked: true });
    Ok(())
}

/// Releases the lock on the happy path; error paths rely on the rollback.
pub fn release(env: &Env) {
    set_reentrancy_guard(env, &ReentrancyGuard { locked: false });
}
