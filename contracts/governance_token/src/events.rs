#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintEvent {
    pub to: Address,
    pub amount: i128,
    pub new_total_supply: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

/// `amount` is the allowance after the change, not the delta.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalEvent {
    pub from: Address,
    pub spender: Address,
    pub amount: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnEvent {
    pub from: Address,
    pub amount: i128,
    pub new_total_supply: i128,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_mint(env: &Env, to: Address, amount: i128, new_total_supply: i128) {
    env.events().publish(
        (symbol_short!("MINT"), to.clone()),
        MintEvent {
            to,
            amount,
            new_total_supply,
        },
    );
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone()),
        TransferEvent { from, to, amount },
    );
}

pub fn publish_approval(env: &Env, from: Address, spender: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("APPROVE"), from.clone()),
        ApprovalEvent {
            from,
            spender,
            amount,
        },
    );
}

pub fn publish_burn(env: &Env, from: Address, amount: i128, new_total_supply: i128) {
    env.events().publish(
        (symbol_short!("BURN"), from.clone()),
        BurnEvent {
            from,
            amount,
            new_total_supply,
        },
    );
}
