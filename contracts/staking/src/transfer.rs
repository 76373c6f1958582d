use soroban_sdk::{log, token, Address, Env};

use crate::error::LedgerError;

/// Custody seam. The ledger decides how much moves and when; implementors
/// decide how. A declined movement must come back as `TransferFailed`.
pub trait AssetTransfer {
    /// Move `amount` of `asset` from `from` into the contract.
    fn pull(&self, env: &Env, asset: &Address, from: &Address, amount: i128)
        -> Result<(), LedgerError>;

    /// Move `amount` of `asset` from the contract to `to`.
    fn push(&self, env: &Env, asset: &Address, to: &Address, amount: i128)
        -> Result<(), LedgerError>;
}

/// Moves assets through the Stellar token interface.
pub struct TokenTransfer;

impl AssetTransfer for TokenTransfer {
    fn pull(
        &self,
        env: &Env,
        asset: &Address,
        from: &Address,
        amount: i128,
    ) -> Result<(), LedgerError> {
        let client = token::Client::new(env, asset);
        match client.try_transfer(from, &env.current_contract_address(), &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(env, "Pull of {} {} from {} declined", amount, asset, from);
                Err(LedgerError::TransferFailed)
            }
        }
    }

    fn push(
        &self,
        env: &Env,
        asset: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), LedgerError> {
        let client = token::Client::new(env, asset);
        match client.try_transfer(&env.current_contract_address(), to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(env, "Push of {} {} to {} declined", amount, asset, to);
                Err(LedgerError::TransferFailed)
            }
        }
    }
}
