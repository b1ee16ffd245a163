use flashswap_interface::CyclePlan;
use soroban_sdk::{contracttype, Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518_400; // ~30 days in 5s ledgers

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Owner,
    ActivePlan,
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Plans only need to outlive the invocation that arms and consumes them.
pub fn set_plan(env: &Env, plan: &CyclePlan) {
    env.storage().temporary().set(&DataKey::ActivePlan, plan);
}

/// Reads and disarms the active plan.
pub fn take_plan(env: &Env) -> Option<CyclePlan> {
    let plan = env.storage().temporary().get(&DataKey::ActivePlan);
    if plan.is_some() {
        env.storage().temporary().remove(&DataKey::ActivePlan);
    }
    plan
}

pub fn has_plan(env: &Env) -> bool {
    env.storage().temporary().has(&DataKey::ActivePlan)
}
