//! Asset movements in and out of contract custody.
//!
//! Every call goes through the `try_` client so a refused transfer surfaces
//! as `ContractError::TransferFailure` instead of trapping the host.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Reward or staked asset currently held by this contract.
pub fn held(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}

/// Move `amount` of `asset` from `from` into contract custody.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    let custody = env.current_contract_address();
    transfer(env, asset, from, &custody, amount)
}

/// Move `amount` of `asset` from contract custody to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    let custody = env.current_contract_address();
    transfer(env, asset, &custody, to, amount)
}

fn transfer(
    env: &Env,
    asset: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match token::Client::new(env, asset).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailure),
    }
}
