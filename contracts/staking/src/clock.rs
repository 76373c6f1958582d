use soroban_sdk::Env;

/// Current ledger tick. The ledger sequence number plays the role of a block
/// height: it only moves forward and every invocation in a ledger sees the
/// same value.
pub fn current_tick(env: &Env) -> u64 {
    u64::from(env.ledger().sequence())
}
