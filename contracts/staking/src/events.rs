use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Events
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub stake_asset: Address,
    pub weight: u64,
    pub min_deposit: i128,
    pub unlock_delay: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightEvent {
    pub pool_id: u32,
    pub old_weight: u64,
    pub new_weight: u64,
    pub total_weight: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub user: Address,
    pub amount: i128,
    pub tick: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeEvent {
    pub user: Address,
    pub amount: i128,
    pub unlock_tick: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub user: Address,
    pub amount: i128,
    pub tick: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimEvent {
    pub user: Address,
    pub amount: i128,
    pub tick: u64,
}

pub fn pool_added(env: &Env, event: PoolAddedEvent) {
    env.events()
        .publish((symbol_short!("pool_add"), event.pool_id), event);
}

pub fn pool_weight(env: &Env, event: PoolWeightEvent) {
    env.events()
        .publish((symbol_short!("weight"), event.pool_id), event);
}

pub fn deposit(env: &Env, pool_id: u32, event: DepositEvent) {
    env.events().publish((symbol_short!("deposit"), pool_id), event);
}

pub fn unstake(env: &Env, pool_id: u32, event: UnstakeEvent) {
    env.events().publish((symbol_short!("unstake"), pool_id), event);
}

pub fn withdraw(env: &Env, pool_id: u32, event: WithdrawEvent) {
    env.events().publish((symbol_short!("withdraw"), pool_id), event);
}

pub fn claim(env: &Env, pool_id: u32, event: ClaimEvent) {
    env.events().publish((symbol_short!("claim"), pool_id), event);
}
