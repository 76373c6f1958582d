#![no_std]
use soroban_sdk::{contracttype, Address, Env, Vec};

/// Shared data types used by the MultiPool staking contract and its clients.
/// Amounts are i128 to line up with the Soroban token interface; ticks are
/// ledger sequence numbers widened to u64.

// ============================================================================
// Pool Types
// ============================================================================

/// A stake pool. `acc_reward_per_share` is scaled by [`REWARD_SCALE`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub stake_asset: Address,
    pub weight: u64,
    pub total_staked: i128,
    pub acc_reward_per_share: i128,
    pub last_accrual_tick: u64,
    pub min_deposit: i128,
    pub unlock_delay: u64,
}

/// Contract-wide emission schedule and operator settings.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalConfig {
    pub admin: Address,
    pub reward_asset: Address,
    pub start_tick: u64,
    pub end_tick: u64,
    pub reward_per_tick: i128,
    pub total_weight: u64,
    pub withdraw_paused: bool,
    pub claim_paused: bool,
}

// ============================================================================
// User Data Types
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    pub amount: i128,
    pub unlock_tick: u64,
}

/// Per-(pool, user) ledger entry.
///
/// `reward_debt` is `staked_amount * acc_reward_per_share / REWARD_SCALE` as of
/// the last settlement; the difference against the current index is what the
/// position earned since then.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub staked_amount: i128,
    pub reward_debt: i128,
    pub pending_reward: i128,
    pub claimed_reward: i128,
    pub withdrawal_requests: Vec<WithdrawalRequest>,
}

impl UserPosition {
    pub fn empty(env: &Env) -> Self {
        Self {
            staked_amount: 0,
            reward_debt: 0,
            pending_reward: 0,
            claimed_reward: 0,
            withdrawal_requests: Vec::new(env),
        }
    }
}

/// Outstanding withdrawal totals for a position at a given tick.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalSummary {
    pub requested: i128,
    pub unlocked: i128,
}

// ============================================================================
// Fixed-point and Tick Helpers
// ============================================================================

/// `a * b / denominator`, truncating toward zero. `None` on overflow or a zero
/// denominator.
pub fn mul_div_floor(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(denominator)
}

/// Scale a raw reward amount into per-share index units.
pub fn to_index(reward: i128, total_staked: i128) -> Option<i128> {
    mul_div_floor(reward, REWARD_SCALE, total_staked)
}

/// Convert a stake amount and an index value back into reward units.
pub fn from_index(amount: i128, acc_reward_per_share: i128) -> Option<i128> {
    mul_div_floor(amount, acc_reward_per_share, REWARD_SCALE)
}

/// Clamp a tick into the emission window `[start_tick, end_tick]`.
pub fn clamp_tick(tick: u64, start_tick: u64, end_tick: u64) -> u64 {
    tick.max(start_tick).min(end_tick)
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: i128) -> bool {
    amount > 0
}

pub fn validate_non_negative_amount(amount: i128) -> bool {
    amount >= 0
}

pub fn validate_window(start_tick: u64, end_tick: u64) -> bool {
    start_tick <= end_tick
}

// ============================================================================
// Constants
// ============================================================================

/// Scale factor of `acc_reward_per_share` (12 decimals).
pub const REWARD_SCALE: i128 = 1_000_000_000_000;

/// Ledgers closed per day at ~5s per ledger
pub const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip_truncates() {
        // 100 reward over 1000 stake
        let index = to_index(100, 1000).unwrap();
        assert_eq!(index, 100_000_000_000);
        assert_eq!(from_index(1000, index), Some(100));
        // 10 reward over 3 stake loses the remainder
        let index = to_index(10, 3).unwrap();
        assert_eq!(from_index(3, index), Some(9));
    }

    #[test]
    fn mul_div_rejects_zero_denominator_and_overflow() {
        assert_eq!(mul_div_floor(1, 1, 0), None);
        assert_eq!(mul_div_floor(i128::MAX, 2, 1), None);
    }

    #[test]
    fn clamp_tick_stays_in_window() {
        assert_eq!(clamp_tick(5, 10, 20), 10);
        assert_eq!(clamp_tick(15, 10, 20), 15);
        assert_eq!(clamp_tick(25, 10, 20), 20);
    }
}
