use multipool_shared::{clamp_tick, mul_div_floor, to_index, GlobalConfig, Pool};

use crate::error::LedgerError;

/// Reward emitted to `pool` for the ticks in `(from, to]`, apportioned by
/// weight. The division truncates and the remainder is forfeited.
pub fn pool_reward(
    config: &GlobalConfig,
    pool: &Pool,
    from: u64,
    to: u64,
) -> Result<i128, LedgerError> {
    if to <= from || config.total_weight == 0 {
        return Ok(0);
    }
    let elapsed = i128::from(to - from);
    let emitted = elapsed
        .checked_mul(config.reward_per_tick)
        .ok_or(LedgerError::NumericOverflow)?;
    mul_div_floor(
        emitted,
        i128::from(pool.weight),
        i128::from(config.total_weight),
    )
    .ok_or(LedgerError::NumericOverflow)
}

/// Bring the pool's reward index up to `tick`.
///
/// Calling it again at the same tick is a no-op, and the checkpoint never
/// moves backwards even if the emission window was shortened after the last
/// accrual. On error the pool is left untouched.
pub fn accrue(pool: &mut Pool, config: &GlobalConfig, tick: u64) -> Result<(), LedgerError> {
    let effective_tick = clamp_tick(tick, config.start_tick, config.end_tick);
    if effective_tick <= pool.last_accrual_tick {
        return Ok(());
    }
    if pool.total_staked == 0 {
        // nobody to pay
        pool.last_accrual_tick = effective_tick;
        return Ok(());
    }

    // a checkpoint left behind a later start tick only earns from the start
    let from = pool.last_accrual_tick.max(config.start_tick);
    let reward = pool_reward(config, pool, from, effective_tick)?;
    let delta = to_index(reward, pool.total_staked).ok_or(LedgerError::NumericOverflow)?;
    pool.acc_reward_per_share = pool
        .acc_reward_per_share
        .checked_add(delta)
        .ok_or(LedgerError::NumericOverflow)?;
    pool.last_accrual_tick = effective_tick;
    Ok(())
}

/// Index value the pool would hold if accrued at `tick`, without writing it.
pub fn projected_acc_reward_per_share(
    pool: &Pool,
    config: &GlobalConfig,
    tick: u64,
) -> Result<i128, LedgerError> {
    let mut projected = pool.clone();
    accrue(&mut projected, config, tick)?;
    Ok(projected.acc_reward_per_share)
}
