use multipool_shared::{
    GlobalConfig, Pool, UserPosition, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD,
    PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD,
};
use soroban_sdk::{contracttype, Address, Env};

use crate::error::LedgerError;

// Storage Keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    PoolCount,
    Pool(u32),
    Position(u32, Address),
}

// ========== Instance ==========

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<GlobalConfig, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(LedgerError::NotInitialized)
}

pub fn set_config(env: &Env, config: &GlobalConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_pool_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PoolCount, &count);
}

// ========== Pools ==========

pub fn get_pool(env: &Env, pool_id: u32) -> Result<Pool, LedgerError> {
    let key = DataKey::Pool(pool_id);
    let pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(LedgerError::PoolNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    Ok(pool)
}

pub fn set_pool(env: &Env, pool: &Pool) {
    let key = DataKey::Pool(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ========== Positions ==========

pub fn get_position(env: &Env, pool_id: u32, user: &Address) -> Option<UserPosition> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(pool_id, user.clone()))
}

/// Writes the position, or drops the entry once nothing is left in it.
pub fn store_position(env: &Env, pool_id: u32, user: &Address, position: &UserPosition) {
    let key = DataKey::Position(pool_id, user.clone());
    if crate::ledger::is_prunable(position) {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
