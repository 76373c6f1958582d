use multipool_shared::{
    from_index, validate_positive_amount, UserPosition, WithdrawalSummary,
};
use soroban_sdk::{log, Address, Env};

use crate::accrual;
use crate::clock;
use crate::error::LedgerError;
use crate::events::{self, ClaimEvent, DepositEvent, UnstakeEvent, WithdrawEvent};
use crate::ledger;
use crate::registry;
use crate::storage;
use crate::transfer::AssetTransfer;

// Every operation works on in-memory copies of the pool and the position and
// only writes them once all checks have passed. Outbound transfers go last;
// if one is declined the debit is put back before the error is returned.

pub fn deposit<T: AssetTransfer>(
    env: &Env,
    transfer: &T,
    pool_id: u32,
    user: &Address,
    amount: i128,
) -> Result<(), LedgerError> {
    if !validate_positive_amount(amount) {
        return Err(LedgerError::InvalidAmount);
    }
    let config = storage::get_config(env)?;
    let mut pool = storage::get_pool(env, pool_id)?;
    let mut position = storage::get_position(env, pool_id, user)
        .unwrap_or_else(|| UserPosition::empty(env));
    let now = clock::current_tick(env);

    accrual::accrue(&mut pool, &config, now)?;
    ledger::settle(&pool, &mut position)?;
    ledger::record_deposit(&mut pool, &mut position, amount)?;

    // a declined pull must leave the ledger as it was
    transfer.pull(env, &pool.stake_asset, user, amount)?;

    storage::set_pool(env, &pool);
    storage::store_position(env, pool_id, user, &position);

    events::deposit(
        env,
        pool_id,
        DepositEvent {
            user: user.clone(),
            amount,
            tick: now,
        },
    );
    log!(env, "User {} deposited {} into pool {}", user, amount, pool_id);

    Ok(())
}

/// Stop `amount` of the stake from earning and lock it for the pool's unlock
/// delay. Returns the tick from which it can be withdrawn.
pub fn unstake(
    env: &Env,
    pool_id: u32,
    user: &Address,
    amount: i128,
) -> Result<u64, LedgerError> {
    if !validate_positive_amount(amount) {
        return Err(LedgerError::InvalidAmount);
    }
    let config = storage::get_config(env)?;
    let mut pool = storage::get_pool(env, pool_id)?;
    let mut position = storage::get_position(env, pool_id, user)
        .unwrap_or_else(|| UserPosition::empty(env));
    let now = clock::current_tick(env);

    accrual::accrue(&mut pool, &config, now)?;
    ledger::settle(&pool, &mut position)?;
    let unlock_tick = ledger::record_unstake_request(&mut pool, &mut position, amount, now)?;

    storage::set_pool(env, &pool);
    storage::store_position(env, pool_id, user, &position);

    events::unstake(
        env,
        pool_id,
        UnstakeEvent {
            user: user.clone(),
            amount,
            unlock_tick,
        },
    );
    log!(
        env,
        "User {} requested {} from pool {}, unlocks at {}",
        user,
        amount,
        pool_id,
        unlock_tick
    );

    Ok(unlock_tick)
}

/// Pay out every unlocked request. Zero when nothing has matured yet.
pub fn withdraw<T: AssetTransfer>(
    env: &Env,
    transfer: &T,
    pool_id: u32,
    user: &Address,
) -> Result<i128, LedgerError> {
    let config = storage::get_config(env)?;
    if config.withdraw_paused {
        return Err(LedgerError::WithdrawPaused);
    }
    let pool = storage::get_pool(env, pool_id)?;
    let Some(mut position) = storage::get_position(env, pool_id, user) else {
        return Ok(0);
    };
    let now = clock::current_tick(env);

    let before = position.clone();
    let amount = ledger::sweep_matured(env, &mut position, now)?;
    if amount == 0 {
        return Ok(0);
    }
    storage::store_position(env, pool_id, user, &position);

    if let Err(err) = transfer.push(env, &pool.stake_asset, user, amount) {
        storage::store_position(env, pool_id, user, &before);
        return Err(err);
    }

    events::withdraw(
        env,
        pool_id,
        WithdrawEvent {
            user: user.clone(),
            amount,
            tick: now,
        },
    );
    log!(env, "User {} withdrew {} from pool {}", user, amount, pool_id);

    Ok(amount)
}

/// Settle and pay out the position's reward. Zero pending is not an error.
pub fn claim<T: AssetTransfer>(
    env: &Env,
    transfer: &T,
    pool_id: u32,
    user: &Address,
) -> Result<i128, LedgerError> {
    let config = storage::get_config(env)?;
    if config.claim_paused {
        return Err(LedgerError::ClaimPaused);
    }
    let mut pool = storage::get_pool(env, pool_id)?;
    let Some(mut position) = storage::get_position(env, pool_id, user) else {
        return Ok(0);
    };
    let now = clock::current_tick(env);

    accrual::accrue(&mut pool, &config, now)?;
    ledger::settle(&pool, &mut position)?;
    let amount = ledger::drain_pending_reward(&mut position)?;

    storage::set_pool(env, &pool);
    storage::store_position(env, pool_id, user, &position);

    if amount == 0 {
        return Ok(0);
    }

    if let Err(err) = transfer.push(env, &config.reward_asset, user, amount) {
        ledger::recredit_pending_reward(&mut position, amount)?;
        storage::store_position(env, pool_id, user, &position);
        return Err(err);
    }

    events::claim(
        env,
        pool_id,
        ClaimEvent {
            user: user.clone(),
            amount,
            tick: now,
        },
    );
    log!(env, "User {} claimed {} from pool {}", user, amount, pool_id);

    Ok(amount)
}

pub fn mass_accrue(env: &Env) -> Result<(), LedgerError> {
    let config = storage::get_config(env)?;
    registry::accrue_all(env, &config, clock::current_tick(env))
}

/// Reward the position could claim right now, including what the pool has
/// earned since its last checkpoint.
pub fn pending_reward(env: &Env, pool_id: u32, user: &Address) -> Result<i128, LedgerError> {
    let config = storage::get_config(env)?;
    let pool = storage::get_pool(env, pool_id)?;
    let Some(position) = storage::get_position(env, pool_id, user) else {
        return Ok(0);
    };

    let acc = accrual::projected_acc_reward_per_share(&pool, &config, clock::current_tick(env))?;
    let accumulated =
        from_index(position.staked_amount, acc).ok_or(LedgerError::NumericOverflow)?;
    accumulated
        .checked_sub(position.reward_debt)
        .and_then(|owed| owed.checked_add(position.pending_reward))
        .ok_or(LedgerError::NumericOverflow)
}

pub fn withdraw_amount(
    env: &Env,
    pool_id: u32,
    user: &Address,
) -> Result<WithdrawalSummary, LedgerError> {
    storage::get_pool(env, pool_id)?;
    match storage::get_position(env, pool_id, user) {
        Some(position) => ledger::withdrawal_summary(&position, clock::current_tick(env)),
        None => Ok(WithdrawalSummary {
            requested: 0,
            unlocked: 0,
        }),
    }
}
