#![no_std]
//! MultiPool staking ledger.
//!
//! Stakers deposit into weighted pools and earn a share of a fixed per-tick
//! reward emission. The emission is split between pools by weight and inside a
//! pool by stake, through an accumulated-reward-per-share index that each pool
//! updates lazily. Leaving a pool takes two steps: `unstake` stops the stake
//! from earning and locks it for the pool's unlock delay, `withdraw` pays out
//! whatever has unlocked.
//!
//! A tick is the ledger sequence number.

pub mod accrual;
pub mod clock;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod storage;
pub mod transfer;


use multipool_shared::{
    validate_non_negative_amount, validate_window, GlobalConfig, Pool, UserPosition,
    WithdrawalSummary,
};
use soroban_sdk::{contract, contractimpl, log, Address, Env};

pub use error::LedgerError;
use transfer::TokenTransfer;

#[contract]
pub struct MultiPoolStaking;

#[contractimpl]
impl MultiPoolStaking {
    /// Initialize the ledger
    ///
    /// * `reward_asset`    – token paid out as reward; the contract must be funded with it.
    /// * `start_tick`      – first ledger that emits rewards.
    /// * `end_tick`        – last ledger that emits rewards.
    /// * `reward_per_tick` – total emission per ledger across all pools.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_asset: Address,
        start_tick: u64,
        end_tick: u64,
        reward_per_tick: i128,
    ) -> Result<(), LedgerError> {
        if storage::has_config(&env) {
            return Err(LedgerError::AlreadyInitialized);
        }
        if !validate_window(start_tick, end_tick) {
            return Err(LedgerError::OutOfWindow);
        }
        if !validate_non_negative_amount(reward_per_tick) {
            return Err(LedgerError::InvalidAmount);
        }

        admin.require_auth();

        let config = GlobalConfig {
            admin: admin.clone(),
            reward_asset,
            start_tick,
            end_tick,
            reward_per_tick,
            total_weight: 0,
            withdraw_paused: false,
            claim_paused: false,
        };
        storage::set_config(&env, &config);
        storage::set_pool_count(&env, 0);
        storage::extend_instance_ttl(&env);

        log!(&env, "Staking ledger initialized by admin: {}", admin);

        Ok(())
    }

    // ========== Admin Functions ==========

    /// Register a new pool. Every existing pool is accrued first so the
    /// weight change only affects ticks from now on.
    pub fn add_pool(
        env: Env,
        admin: Address,
        stake_asset: Address,
        weight: u64,
        min_deposit: i128,
        unlock_delay: u64,
    ) -> Result<u32, LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        let now = clock::current_tick(&env);
        let pool_id = registry::add_pool(
            &env,
            &mut config,
            stake_asset,
            weight,
            min_deposit,
            unlock_delay,
            now,
        )?;

        log!(&env, "Pool {} added with weight {}", pool_id, weight);

        Ok(pool_id)
    }

    pub fn set_weight(
        env: Env,
        admin: Address,
        pool_id: u32,
        weight: u64,
    ) -> Result<(), LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        registry::set_weight(&env, &mut config, pool_id, weight, clock::current_tick(&env))?;

        log!(&env, "Pool {} weight set to {}", pool_id, weight);

        Ok(())
    }

    pub fn update_pool(
        env: Env,
        admin: Address,
        pool_id: u32,
        min_deposit: i128,
        unlock_delay: u64,
    ) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        storage::extend_instance_ttl(&env);

        registry::update_pool(&env, pool_id, min_deposit, unlock_delay)?;

        log!(
            &env,
            "Pool {} updated: min deposit {}, unlock delay {}",
            pool_id,
            min_deposit,
            unlock_delay
        );

        Ok(())
    }

    pub fn set_reward_per_tick(
        env: Env,
        admin: Address,
        reward_per_tick: i128,
    ) -> Result<(), LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;
        if !validate_non_negative_amount(reward_per_tick) {
            return Err(LedgerError::InvalidAmount);
        }
        storage::extend_instance_ttl(&env);

        registry::accrue_all(&env, &config, clock::current_tick(&env))?;
        config.reward_per_tick = reward_per_tick;
        storage::set_config(&env, &config);

        log!(&env, "Reward per tick updated to: {}", reward_per_tick);

        Ok(())
    }

    pub fn set_start_tick(env: Env, admin: Address, start_tick: u64) -> Result<(), LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;
        if !validate_window(start_tick, config.end_tick) {
            return Err(LedgerError::OutOfWindow);
        }
        storage::extend_instance_ttl(&env);

        let now = clock::current_tick(&env);
        registry::accrue_all(&env, &config, now)?;
        config.start_tick = start_tick;
        storage::set_config(&env, &config);
        registry::rebase_checkpoints(&env, &config, now)?;

        log!(&env, "Start tick updated to: {}", start_tick);

        Ok(())
    }

    pub fn set_end_tick(env: Env, admin: Address, end_tick: u64) -> Result<(), LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;
        if !validate_window(config.start_tick, end_tick) {
            return Err(LedgerError::OutOfWindow);
        }
        storage::extend_instance_ttl(&env);

        let now = clock::current_tick(&env);
        registry::accrue_all(&env, &config, now)?;
        config.end_tick = end_tick;
        storage::set_config(&env, &config);
        registry::rebase_checkpoints(&env, &config, now)?;

        log!(&env, "End tick updated to: {}", end_tick);

        Ok(())
    }

    pub fn set_withdraw_paused(env: Env, admin: Address, paused: bool) -> Result<(), LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;

        config.withdraw_paused = paused;
        storage::set_config(&env, &config);

        log!(&env, "Withdraw paused set to: {}", paused);

        Ok(())
    }

    pub fn set_claim_paused(env: Env, admin: Address, paused: bool) -> Result<(), LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;

        config.claim_paused = paused;
        storage::set_config(&env, &config);

        log!(&env, "Claim paused set to: {}", paused);

        Ok(())
    }

    /// Hand the operator role to another address.
    pub fn set_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), LedgerError> {
        let mut config = Self::require_admin(&env, &admin)?;

        config.admin = new_admin.clone();
        storage::set_config(&env, &config);

        log!(&env, "Admin changed from {} to {}", admin, new_admin);

        Ok(())
    }

    // ========== User Functions ==========

    /// Stake `amount` of the pool's stake asset.
    pub fn deposit(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<(), LedgerError> {
        user.require_auth();
        storage::extend_instance_ttl(&env);
        engine::deposit(&env, &TokenTransfer, pool_id, &user, amount)
    }

    /// Request `amount` back. The stake stops earning now and can be withdrawn
    /// once the returned tick is reached.
    pub fn unstake(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<u64, LedgerError> {
        user.require_auth();
        storage::extend_instance_ttl(&env);
        engine::unstake(&env, pool_id, &user, amount)
    }

    /// Pay out every unlocked request. Returns the amount sent, possibly zero.
    pub fn withdraw(env: Env, user: Address, pool_id: u32) -> Result<i128, LedgerError> {
        user.require_auth();
        storage::extend_instance_ttl(&env);
        engine::withdraw(&env, &TokenTransfer, pool_id, &user)
    }

    /// Pay out the accrued reward. Returns the amount sent, possibly zero.
    pub fn claim(env: Env, user: Address, pool_id: u32) -> Result<i128, LedgerError> {
        user.require_auth();
        storage::extend_instance_ttl(&env);
        engine::claim(&env, &TokenTransfer, pool_id, &user)
    }

    /// Accrue every pool to the current tick. Never required for correctness.
    pub fn mass_accrue(env: Env) -> Result<(), LedgerError> {
        storage::extend_instance_ttl(&env);
        engine::mass_accrue(&env)
    }

    // ========== View Functions ==========

    pub fn get_config(env: Env) -> Result<GlobalConfig, LedgerError> {
        storage::get_config(&env)
    }

    pub fn get_pool_info(env: Env, pool_id: u32) -> Result<Pool, LedgerError> {
        registry::get_pool(&env, pool_id)
    }

    pub fn pool_length(env: Env) -> u32 {
        registry::pool_length(&env)
    }

    /// Stored position, or `None` if the user holds nothing in the pool.
    pub fn get_user_info(env: Env, pool_id: u32, user: Address) -> Option<UserPosition> {
        storage::get_position(&env, pool_id, &user)
    }

    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, LedgerError> {
        engine::pending_reward(&env, pool_id, &user)
    }

    pub fn withdraw_amount(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<WithdrawalSummary, LedgerError> {
        engine::withdraw_amount(&env, pool_id, &user)
    }

    pub fn current_tick(env: Env) -> u64 {
        clock::current_tick(&env)
    }

    // Internal helper functions
    fn require_admin(env: &Env, caller: &Address) -> Result<GlobalConfig, LedgerError> {
        caller.require_auth();
        let config = storage::get_config(env)?;
        if config.admin != *caller {
            return Err(LedgerError::Unauthorized);
        }
        Ok(config)
    }
}
