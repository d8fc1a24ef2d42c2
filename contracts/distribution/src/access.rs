use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
/// Identity allowed to notify reward and run bonus payouts.
const NOTIFIER: Symbol = symbol_short!("NOTIFIER");

// ── Owner ───────────────────────────────────────────────────────────────────

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(ContractError::NotInitialized)
}

/// Guard: revert if `caller` is not the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != owner(env)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, candidate: &Address) {
    env.storage().instance().set(&PENDING_OWNER, candidate);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

// ── Notifier ────────────────────────────────────────────────────────────────

pub fn set_notifier(env: &Env, notifier: &Address) {
    env.storage().instance().set(&NOTIFIER, notifier);
}

pub fn notifier(env: &Env) -> Option<Address> {
    env.storage().instance().get(&NOTIFIER)
}

/// Guard: revert unless `caller` is the configured notifier.
/// Nobody passes while the role is unassigned.
pub fn require_notifier(env: &Env, caller: &Address) -> Result<(), ContractError> {
    match notifier(env) {
        Some(expected) if expected == *caller => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}
