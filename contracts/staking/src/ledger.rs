use multipool_shared::{
    from_index, Pool, UserPosition, WithdrawalRequest, WithdrawalSummary,
};
use soroban_sdk::{Env, Vec};

use crate::error::LedgerError;

/// Move everything the position earned since its last settlement into
/// `pending_reward` and return that amount. The pool must already be accrued.
pub fn settle(pool: &Pool, position: &mut UserPosition) -> Result<i128, LedgerError> {
    let accumulated = from_index(position.staked_amount, pool.acc_reward_per_share)
        .ok_or(LedgerError::NumericOverflow)?;
    let owed = accumulated
        .checked_sub(position.reward_debt)
        .ok_or(LedgerError::NumericOverflow)?;
    position.pending_reward = position
        .pending_reward
        .checked_add(owed)
        .ok_or(LedgerError::NumericOverflow)?;
    position.reward_debt = accumulated;
    Ok(owed)
}

fn sync_reward_debt(pool: &Pool, position: &mut UserPosition) -> Result<(), LedgerError> {
    position.reward_debt = from_index(position.staked_amount, pool.acc_reward_per_share)
        .ok_or(LedgerError::NumericOverflow)?;
    Ok(())
}

/// Add `amount` to the position and the pool total. The pool floor applies to
/// a fresh stake only; a live stake may be topped up by any amount.
pub fn record_deposit(
    pool: &mut Pool,
    position: &mut UserPosition,
    amount: i128,
) -> Result<(), LedgerError> {
    if position.staked_amount == 0 && amount < pool.min_deposit {
        return Err(LedgerError::BelowMinimum);
    }
    let staked = position
        .staked_amount
        .checked_add(amount)
        .ok_or(LedgerError::NumericOverflow)?;
    let total = pool
        .total_staked
        .checked_add(amount)
        .ok_or(LedgerError::NumericOverflow)?;

    position.staked_amount = staked;
    pool.total_staked = total;
    sync_reward_debt(pool, position)
}

/// Take `amount` out of the earning stake right away and queue it for release
/// after the pool's unlock delay. Returns the unlock tick.
pub fn record_unstake_request(
    pool: &mut Pool,
    position: &mut UserPosition,
    amount: i128,
    now: u64,
) -> Result<u64, LedgerError> {
    if amount > position.staked_amount {
        return Err(LedgerError::InsufficientStake);
    }
    let unlock_tick = now
        .checked_add(pool.unlock_delay)
        .ok_or(LedgerError::NumericOverflow)?;
    let total = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(LedgerError::NumericOverflow)?;

    position.staked_amount -= amount;
    pool.total_staked = total;
    position.withdrawal_requests.push_back(WithdrawalRequest {
        amount,
        unlock_tick,
    });
    sync_reward_debt(pool, position)?;
    Ok(unlock_tick)
}

/// Remove every request unlocked at `tick` and return their sum. Requests still
/// locked keep their relative order. Zero means nothing has matured yet.
pub fn sweep_matured(
    env: &Env,
    position: &mut UserPosition,
    tick: u64,
) -> Result<i128, LedgerError> {
    let mut matured: i128 = 0;
    let mut remaining = Vec::new(env);
    for request in position.withdrawal_requests.iter() {
        if request.unlock_tick <= tick {
            matured = matured
                .checked_add(request.amount)
                .ok_or(LedgerError::NumericOverflow)?;
        } else {
            remaining.push_back(request);
        }
    }
    if matured > 0 {
        position.withdrawal_requests = remaining;
    }
    Ok(matured)
}

/// Zero the pending reward, book it as claimed and return it.
pub fn drain_pending_reward(position: &mut UserPosition) -> Result<i128, LedgerError> {
    let amount = position.pending_reward;
    position.claimed_reward = position
        .claimed_reward
        .checked_add(amount)
        .ok_or(LedgerError::NumericOverflow)?;
    position.pending_reward = 0;
    Ok(amount)
}

/// Put a drained reward back after the payout could not be delivered.
pub fn recredit_pending_reward(
    position: &mut UserPosition,
    amount: i128,
) -> Result<(), LedgerError> {
    let pending = position
        .pending_reward
        .checked_add(amount)
        .ok_or(LedgerError::NumericOverflow)?;
    let claimed = position
        .claimed_reward
        .checked_sub(amount)
        .ok_or(LedgerError::NumericOverflow)?;
    position.pending_reward = pending;
    position.claimed_reward = claimed;
    Ok(())
}

pub fn is_prunable(position: &UserPosition) -> bool {
    position.staked_amount == 0
        && position.pending_reward == 0
        && position.withdrawal_requests.is_empty()
}

pub fn withdrawal_summary(
    position: &UserPosition,
    tick: u64,
) -> Result<WithdrawalSummary, LedgerError> {
    let mut summary = WithdrawalSummary {
        requested: 0,
        unlocked: 0,
    };
    for request in position.withdrawal_requests.iter() {
        summary.requested = summary
            .requested
            .checked_add(request.amount)
            .ok_or(LedgerError::NumericOverflow)?;
        if request.unlock_tick <= tick {
            summary.unlocked = summary
                .unlocked
                .checked_add(request.amount)
                .ok_or(LedgerError::NumericOverflow)?;
        }
    }
    Ok(summary)
}
