use soroban_sdk::{contracttype, Address, Env};

pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280; // ~1 day in 5s ledgers
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 518_400; // ~30 days in 5s ledgers
pub(crate) const BALANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub(crate) const BALANCE_BUMP_AMOUNT: u32 = 518_400;

#[contracttype]
#[derive(Clone, Debug)]
pub struct AllowanceEntry {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum TokenKey {
    Balance(Address),
    Allowance(Address, Address),
    TotalSupply,
    Admin,
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&TokenKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&TokenKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&TokenKey::Admin, admin);
}

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&TokenKey::TotalSupply).unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&TokenKey::TotalSupply, &supply);
}

pub fn get_balance(env: &Env, id: &Address) -> i128 {
    let key = TokenKey::Balance(id.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
            balance
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    let key = TokenKey::Balance(id.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

/// Live allowance; an entry past its expiration ledger reads as zero.
pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceEntry {
    let key = TokenKey::Allowance(from.clone(), spender.clone());
    match env.storage().temporary().get::<_, AllowanceEntry>(&key) {
        Some(entry) if entry.expiration_ledger >= env.ledger().sequence() => entry,
        _ => AllowanceEntry {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, entry: &AllowanceEntry) {
    let key = TokenKey::Allowance(from.clone(), spender.clone());
    env.storage().temporary().set(&key, entry);

    if entry.amount > 0 {
        let live_for = entry
            .expiration_ledger
            .saturating_sub(env.ledger().sequence());
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
