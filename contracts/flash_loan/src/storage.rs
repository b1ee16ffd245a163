use soroban_sdk::{contracttype, Address, Env, Vec};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518_400; // ~30 days in 5s ledgers

#[contracttype]
#[derive(Clone, Debug)]
pub struct FlashLoanConfig {
    pub owner: Address,
    pub executor: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Pools,
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Option<FlashLoanConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &FlashLoanConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_pools(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Pools)
        .unwrap_or(Vec::new(env))
}

pub fn set_pools(env: &Env, pools: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Pools, pools);
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
