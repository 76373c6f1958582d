use multipool_shared::{validate_non_negative_amount, GlobalConfig, Pool};
use soroban_sdk::{Address, Env};

use crate::accrual;
use crate::error::LedgerError;
use crate::events::{self, PoolAddedEvent, PoolWeightEvent};
use crate::storage;

/// Accrue every pool to `tick` and write them back.
///
/// Must run before anything that changes how the emission is apportioned
/// (weights, reward rate, window), so that ticks already elapsed are paid at
/// the old terms.
pub fn accrue_all(env: &Env, config: &GlobalConfig, tick: u64) -> Result<(), LedgerError> {
    let count = storage::get_pool_count(env);
    for pool_id in 0..count {
        let mut pool = storage::get_pool(env, pool_id)?;
        accrual::accrue(&mut pool, config, tick)?;
        storage::set_pool(env, &pool);
    }
    Ok(())
}

/// Move every checkpoint to `max(now, start_tick)` after a window change.
///
/// Must follow an `accrue_all` under the previous window. Ticks up to `now`
/// are then settled, either paid or outside that window, and a checkpoint
/// ahead of `now` has nothing booked past `now`.
pub fn rebase_checkpoints(env: &Env, config: &GlobalConfig, now: u64) -> Result<(), LedgerError> {
    let floor = now.max(config.start_tick);
    let count = storage::get_pool_count(env);
    for pool_id in 0..count {
        let mut pool = storage::get_pool(env, pool_id)?;
        if pool.last_accrual_tick != floor {
            pool.last_accrual_tick = floor;
            storage::set_pool(env, &pool);
        }
    }
    Ok(())
}

pub fn add_pool(
    env: &Env,
    config: &mut GlobalConfig,
    stake_asset: Address,
    weight: u64,
    min_deposit: i128,
    unlock_delay: u64,
    now: u64,
) -> Result<u32, LedgerError> {
    if weight == 0 {
        return Err(LedgerError::InvalidWeight);
    }
    if !validate_non_negative_amount(min_deposit) {
        return Err(LedgerError::InvalidAmount);
    }
    let total_weight = config
        .total_weight
        .checked_add(weight)
        .ok_or(LedgerError::NumericOverflow)?;
    let pool_id = storage::get_pool_count(env);
    let next_count = pool_id.checked_add(1).ok_or(LedgerError::NumericOverflow)?;

    accrue_all(env, config, now)?;
    config.total_weight = total_weight;

    let pool = Pool {
        id: pool_id,
        stake_asset: stake_asset.clone(),
        weight,
        total_staked: 0,
        acc_reward_per_share: 0,
        last_accrual_tick: now.max(config.start_tick),
        min_deposit,
        unlock_delay,
    };
    storage::set_pool(env, &pool);
    storage::set_pool_count(env, next_count);
    storage::set_config(env, config);

    events::pool_added(
        env,
        PoolAddedEvent {
            pool_id,
            stake_asset,
            weight,
            min_deposit,
            unlock_delay,
        },
    );

    Ok(pool_id)
}

pub fn set_weight(
    env: &Env,
    config: &mut GlobalConfig,
    pool_id: u32,
    new_weight: u64,
    now: u64,
) -> Result<(), LedgerError> {
    let pool = storage::get_pool(env, pool_id)?;
    if new_weight == 0 {
        return Err(LedgerError::InvalidWeight);
    }
    let total_weight = config
        .total_weight
        .checked_sub(pool.weight)
        .and_then(|rest| rest.checked_add(new_weight))
        .ok_or(LedgerError::NumericOverflow)?;

    accrue_all(env, config, now)?;

    // re-read: accrue_all wrote the accrued copy
    let mut pool = storage::get_pool(env, pool_id)?;
    let old_weight = pool.weight;
    pool.weight = new_weight;
    config.total_weight = total_weight;
    storage::set_pool(env, &pool);
    storage::set_config(env, config);

    events::pool_weight(
        env,
        PoolWeightEvent {
            pool_id,
            old_weight,
            new_weight,
            total_weight,
        },
    );

    Ok(())
}

/// Change the deposit floor and lock length. Requests already queued keep the
/// unlock tick they were given.
pub fn update_pool(
    env: &Env,
    pool_id: u32,
    min_deposit: i128,
    unlock_delay: u64,
) -> Result<Pool, LedgerError> {
    let mut pool = storage::get_pool(env, pool_id)?;
    if !validate_non_negative_amount(min_deposit) {
        return Err(LedgerError::InvalidAmount);
    }
    pool.min_deposit = min_deposit;
    pool.unlock_delay = unlock_delay;
    storage::set_pool(env, &pool);
    Ok(pool)
}

pub fn get_pool(env: &Env, pool_id: u32) -> Result<Pool, LedgerError> {
    storage::get_pool(env, pool_id)
}

pub fn pool_length(env: &Env) -> u32 {
    storage::get_pool_count(env)
}
