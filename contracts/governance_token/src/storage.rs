use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage keys ────────────────────────────────────────────────────────────

const BALANCE: Symbol = symbol_short!("BALANCE");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

// ── Balances ────────────────────────────────────────────────────────────────

pub fn balance(env: &Env, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(BALANCE, holder.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, holder: &Address, amount: i128) {
    let key = (BALANCE, holder.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Allowances ──────────────────────────────────────────────────────────────

pub fn allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(ALLOWANCE, from.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = (ALLOWANCE, from.clone(), spender.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
