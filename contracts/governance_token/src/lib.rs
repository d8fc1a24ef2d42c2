#![no_std]

pub mod events;
pub mod storage;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const DECIMALS: Symbol = symbol_short!("DECIMALS");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const MAX_SUPPLY: Symbol = symbol_short!("MAX_SUP");
const TOTAL_SUPPLY: Symbol = symbol_short!("SUPPLY");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    InsufficientAllowance = 6,
    SupplyCapExceeded = 7,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Bounded-supply governance token. Only the owner can mint, and never past
/// `max_supply`.
#[contract]
pub struct GovernanceTokenContract;

#[contractimpl]
impl GovernanceTokenContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    pub fn initialize(
        env: Env,
        owner: Address,
        decimals: u32,
        name: String,
        symbol: String,
        max_supply: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&OWNER) {
            return Err(ContractError::AlreadyInitialized);
        }
        if max_supply <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&DECIMALS, &decimals);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&MAX_SUPPLY, &max_supply);
        env.storage().instance().set(&TOTAL_SUPPLY, &0i128);
        storage::extend_instance(&env);

        Ok(())
    }

    // ── Supply ──────────────────────────────────────────────────────────────

    pub fn mint(env: Env, owner: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        owner.require_auth();
        if owner != Self::owner(env.clone())? {
            return Err(ContractError::Unauthorized);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let new_supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::SupplyCapExceeded)?;
        if new_supply > Self::max_supply(env.clone())? {
            return Err(ContractError::SupplyCapExceeded);
        }

        env.storage().instance().set(&TOTAL_SUPPLY, &new_supply);
        storage::set_balance(&env, &to, storage::balance(&env, &to) + amount);
        storage::extend_instance(&env);

        events::publish_mint(&env, to, amount, new_supply);
        Ok(())
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        Self::require_initialized(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let held = storage::balance(&env, &from);
        if amount > held {
            return Err(ContractError::InsufficientBalance);
        }

        let new_supply = Self::total_supply(env.clone()) - amount;
        storage::set_balance(&env, &from, held - amount);
        env.storage().instance().set(&TOTAL_SUPPLY, &new_supply);

        events::publish_burn(&env, from, amount, new_supply);
        Ok(())
    }

    // ── Transfers ───────────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        Self::require_initialized(&env)?;
        Self::move_balance(&env, from, to, amount)
    }

    /// Move `amount` out of `from` on the strength of an allowance granted to
    /// `spender`. The allowance is consumed before the balance moves.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        spender.require_auth();
        Self::require_initialized(&env)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let allowed = storage::allowance(&env, &from, &spender);
        if allowed < amount {
            return Err(ContractError::InsufficientAllowance);
        }
        storage::set_allowance(&env, &from, &spender, allowed - amount);

        Self::move_balance(&env, from, to, amount)
    }

    // ── Allowances ──────────────────────────────────────────────────────────

    /// Replace the allowance of `spender` over `from`'s balance. The
    /// allowance may exceed the current balance.
    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        Self::require_initialized(&env)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        storage::set_allowance(&env, &from, &spender, amount);
        events::publish_approval(&env, from, spender, amount);
        Ok(())
    }

    pub fn increase_allowance(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        from.require_auth();
        Self::require_initialized(&env)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let updated = storage::allowance(&env, &from, &spender)
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;
        storage::set_allowance(&env, &from, &spender, updated);
        events::publish_approval(&env, from, spender, updated);
        Ok(())
    }

    pub fn decrease_allowance(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        from.require_auth();
        Self::require_initialized(&env)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let current = storage::allowance(&env, &from, &spender);
        if amount > current {
            return Err(ContractError::InsufficientAllowance);
        }
        let updated = current - amount;
        storage::set_allowance(&env, &from, &spender, updated);
        events::publish_approval(&env, from, spender, updated);
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::allowance(&env, &from, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
    }

    pub fn max_supply(env: Env) -> Result<i128, ContractError> {
        env.storage()
            .instance()
            .get(&MAX_SUPPLY)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&NAME)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&SYMBOL)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn decimals(env: Env) -> Result<u32, ContractError> {
        env.storage()
            .instance()
            .get(&DECIMALS)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

impl GovernanceTokenContract {
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&OWNER) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn move_balance(env: &Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let from_balance = storage::balance(env, &from);
        if amount > from_balance {
            return Err(ContractError::InsufficientBalance);
        }

        // Read the recipient after the debit so a self-transfer nets to zero.
        storage::set_balance(env, &from, from_balance - amount);
        storage::set_balance(env, &to, storage::balance(env, &to) + amount);

        events::publish_transfer(env, from, to, amount);
        Ok(())
    }
}
