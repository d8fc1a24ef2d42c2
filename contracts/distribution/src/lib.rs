#![no_std]

pub mod access;
pub mod custody;
pub mod events;
pub mod ledger;
pub mod period;
pub mod rewards;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec, I256};

use ledger::Ledger;
pub use ledger::{AccrualState, ParticipantAccount};

// ── Storage key constants ────────────────────────────────────────────────────

const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");

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
    TransferFailure = 6,
    InsufficientRewardBalance = 7,
    ArityMismatch = 8,
    TokensIdentical = 9,
    PeriodActive = 10,
    ArithmeticOverflow = 11,
    NoPendingOwner = 12,
    ProtectedAsset = 13,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of a participant's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub earned: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct DistributionContract;

#[contractimpl]
impl DistributionContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`      – SAC address of the token participants stake.
    /// * `reward_token`     – SAC address of the token streamed as reward.
    /// * `rewards_duration` – length of one distribution period in seconds.
    ///
    /// The notifier role starts unassigned; the owner grants it with
    /// `set_reward_distribution`.
    pub fn initialize(
        env: Env,
        owner: Address,
        stake_token: Address,
        reward_token: Address,
        rewards_duration: u64,
    ) -> Result<(), ContractError> {
        if ledger::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }
        if rewards_duration == 0 {
            return Err(ContractError::InvalidAmount);
        }

        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        access::set_owner(&env, &owner);
        ledger::init_state(&env, rewards_duration);

        events::publish_initialized(&env, owner, stake_token, reward_token, rewards_duration);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// The accumulator is checkpointed first so the new tokens never earn
    /// reward for time that passed before they arrived.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut ledger = Ledger::checkpoint(&env)?;
        let mut account = ledger.settle(&staker)?;
        ledger.deposit(&mut account, amount)?;
        ledger.store_account(&staker, &account);
        let state = ledger.commit();

        custody::pull(&env, &Self::stake_token_address(&env)?, &staker, amount)?;

        events::publish_staked(&env, staker, amount, state.total_staked);

        Ok(())
    }

    /// Return `amount` staked tokens to `staker`.
    ///
    /// Balances are reduced and persisted before the tokens leave custody.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut ledger = Ledger::checkpoint(&env)?;
        let mut account = ledger.settle(&staker)?;
        ledger.release(&mut account, amount)?;
        ledger.store_account(&staker, &account);
        let state = ledger.commit();

        Self::pay_out_stake(&env, &staker, amount, state.total_staked)
    }

    /// Pay out everything `staker` has accrued.
    ///
    /// Returns the amount paid; `0` when nothing is owed (not an error).
    pub fn claim(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let ledger = Ledger::checkpoint(&env)?;
        let mut account = ledger.settle(&staker)?;
        let reward = core::mem::take(&mut account.rewards);
        ledger.store_account(&staker, &account);
        ledger.commit();

        Self::pay_out_reward(&env, &staker, reward)?;

        Ok(reward)
    }

    /// Withdraw the whole position and claim in one call.
    ///
    /// Returns the reward paid. Like `withdraw(0)`, exiting with nothing
    /// staked fails with `InvalidAmount`; use `claim` for leftover reward.
    pub fn exit(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut ledger = Ledger::checkpoint(&env)?;
        let mut account = ledger.settle(&staker)?;
        let amount = account.balance;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        ledger.release(&mut account, amount)?;
        let reward = core::mem::take(&mut account.rewards);
        ledger.store_account(&staker, &account);
        let state = ledger.commit();

        Self::pay_out_stake(&env, &staker, amount, state.total_staked)?;
        Self::pay_out_reward(&env, &staker, reward)?;

        Ok(reward)
    }

    // ── Reward distribution ────────────────────────────────────────────────

    /// Start a new distribution period carrying `amount` of reward, or fold it
    /// into the running one.
    ///
    /// The reward tokens must already sit in the contract: the call fails
    /// with `InsufficientRewardBalance` if the resulting rate would release
    /// more than the contract holds.
    pub fn notify_reward_amount(
        env: Env,
        notifier: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        notifier.require_auth();
        access::require_notifier(&env, &notifier)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let available = custody::held(&env, &Self::reward_token_address(&env)?);

        let mut ledger = Ledger::checkpoint(&env)?;
        period::notify_reward_amount(&mut ledger, amount, available)?;
        let state = ledger.commit();

        events::publish_reward_added(&env, amount, state.reward_rate, state.period_finish);

        Ok(())
    }

    /// One-shot payout of `asset` held by the contract: `amounts[i]` goes to
    /// `recipients[i]`. Independent of the accrual state.
    ///
    /// The staked and reward assets are refused with `ProtectedAsset`; they
    /// back stakers' deposits and promised reward.
    pub fn distribute_bonus(
        env: Env,
        notifier: Address,
        asset: Address,
        recipients: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        notifier.require_auth();
        access::require_notifier(&env, &notifier)?;

        if recipients.len() != amounts.len() {
            return Err(ContractError::ArityMismatch);
        }
        if asset == Self::stake_token_address(&env)? || asset == Self::reward_token_address(&env)? {
            return Err(ContractError::ProtectedAsset);
        }
        if amounts.iter().any(|amount| amount < 0) {
            return Err(ContractError::InvalidAmount);
        }

        for (recipient, amount) in recipients.iter().zip(amounts.iter()) {
            custody::push(&env, &asset, &recipient, amount)?;
            events::publish_bonus_paid(&env, asset.clone(), recipient, amount);
        }

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Accumulated reward per staked unit (scaled by `rewards::PRECISION`)
    /// as of now.
    pub fn reward_per_token(env: Env) -> Result<I256, ContractError> {
        let state = ledger::load_state(&env)?;
        Ok(state.reward_per_token(&env, env.ledger().timestamp()))
    }

    /// Reward `participant` could claim right now.
    pub fn earned(env: Env, participant: Address) -> Result<i128, ContractError> {
        let state = ledger::load_state(&env)?;
        let account = ledger::load_account(&env, &participant);
        state.earned(&env, &account, env.ledger().timestamp())
    }

    /// Return the participant's current staked balance.
    pub fn balance_of(env: Env, participant: Address) -> i128 {
        ledger::load_account(&env, &participant).balance
    }

    /// Return the combined position for a participant in one read.
    pub fn get_staker_info(env: Env, participant: Address) -> Result<StakerInfo, ContractError> {
        let state = ledger::load_state(&env)?;
        let account = ledger::load_account(&env, &participant);
        Ok(StakerInfo {
            staked: account.balance,
            earned: state.earned(&env, &account, env.ledger().timestamp())?,
        })
    }

    /// Return the current reward rate (tokens per second).
    pub fn reward_rate(env: Env) -> i128 {
        ledger::load_state(&env).map_or(0, |state| state.reward_rate)
    }

    /// Return the sum of all currently staked tokens.
    pub fn total_staked(env: Env) -> i128 {
        ledger::load_state(&env).map_or(0, |state| state.total_staked)
    }

    pub fn period_finish(env: Env) -> u64 {
        ledger::load_state(&env).map_or(0, |state| state.period_finish)
    }

    pub fn rewards_duration(env: Env) -> u64 {
        ledger::load_state(&env).map_or(0, |state| state.rewards_duration)
    }

    pub fn last_time_reward_applicable(env: Env) -> u64 {
        let now = env.ledger().timestamp();
        ledger::load_state(&env).map_or(0, |state| state.last_time_reward_applicable(now))
    }

    /// Reward a full period at the current rate releases.
    pub fn get_reward_for_duration(env: Env) -> Result<i128, ContractError> {
        let state = ledger::load_state(&env)?;
        rewards::reward_for_duration(state.reward_rate, state.rewards_duration)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn stake_token(env: Env) -> Result<Address, ContractError> {
        Self::stake_token_address(&env)
    }

    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        Self::reward_token_address(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        ledger::is_initialized(&env)
    }

    // ── Owner functions ──────────────────────────────────────────────────────

    /// Assign the identity allowed to call `notify_reward_amount` and
    /// `distribute_bonus`.
    pub fn set_reward_distribution(
        env: Env,
        owner: Address,
        notifier: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        access::require_owner(&env, &owner)?;

        access::set_notifier(&env, &notifier);

        events::publish_reward_distribution_set(&env, notifier);

        Ok(())
    }

    pub fn get_reward_distribution(env: Env) -> Option<Address> {
        access::notifier(&env)
    }

    /// Change the period length. Only allowed once the current period has
    /// finished; fails with `PeriodActive` otherwise.
    pub fn set_rewards_duration(
        env: Env,
        owner: Address,
        rewards_duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        access::require_owner(&env, &owner)?;

        let mut ledger = Ledger::checkpoint(&env)?;
        period::set_rewards_duration(&mut ledger, rewards_duration)?;
        ledger.commit();

        events::publish_rewards_duration_set(&env, rewards_duration);

        Ok(())
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. The candidate must call `accept_owner` to
    /// complete the transfer.
    pub fn propose_owner(env: Env, owner: Address, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        access::require_owner(&env, &owner)?;

        access::set_pending_owner(&env, &new_owner);

        events::publish_owner_transfer_proposed(&env, owner, new_owner);

        Ok(())
    }

    /// Accept the pending ownership transfer. Only the proposed owner can
    /// call this.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let pending = access::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner = access::owner(&env)?;
        access::set_owner(&env, &new_owner);
        access::clear_pending_owner(&env);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Cancel a pending ownership transfer.
    pub fn cancel_owner_transfer(env: Env, owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        access::require_owner(&env, &owner)?;

        let pending = access::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        access::clear_pending_owner(&env);

        events::publish_owner_transfer_cancelled(&env, owner, pending);

        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        access::owner(&env)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        access::pending_owner(&env)
    }
}

impl DistributionContract {
    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !ledger::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn stake_token_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn reward_token_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Outbound leg of `withdraw`/`exit`. State must already be committed.
    fn pay_out_stake(
        env: &Env,
        staker: &Address,
        amount: i128,
        new_total_staked: i128,
    ) -> Result<(), ContractError> {
        custody::push(env, &Self::stake_token_address(env)?, staker, amount)?;
        events::publish_withdrawn(env, staker.clone(), amount, new_total_staked);
        Ok(())
    }

    /// Outbound leg of `claim`/`exit`. State must already be committed.
    fn pay_out_reward(env: &Env, staker: &Address, reward: i128) -> Result<(), ContractError> {
        if reward <= 0 {
            return Ok(());
        }
        custody::push(env, &Self::reward_token_address(env)?, staker, reward)?;
        events::publish_reward_paid(env, staker.clone(), reward);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_periods;
