use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::{rewards, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

const STATE: Symbol = symbol_short!("STATE");
// Per-participant persistent storage uses tuple keys: (prefix, address)
const ACCOUNT: Symbol = symbol_short!("ACCOUNT");

/// TTL constants for persistent and instance storage (in ledgers)
const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

// ── Types ───────────────────────────────────────────────────────────────────

/// Process-wide accrual state.
///
/// Only [`Ledger`] hands out mutable access to it, and only after the
/// accumulator has been brought up to date.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccrualState {
    /// Sum of every participant's `balance`.
    pub total_staked: i128,
    /// Cumulative reward per staked unit since genesis, scaled by
    /// [`rewards::PRECISION`]. Never decreases.
    pub reward_per_token_stored: I256,
    /// Timestamp of the last accumulator refresh.
    pub last_update_time: u64,
    /// Reward units released per second while `now < period_finish`.
    pub reward_rate: i128,
    /// End of the current distribution period.
    pub period_finish: u64,
    /// Length of one distribution period in seconds.
    pub rewards_duration: u64,
}

impl AccrualState {
    pub fn new(env: &Env, rewards_duration: u64) -> Self {
        Self {
            total_staked: 0,
            reward_per_token_stored: I256::from_i128(env, 0),
            last_update_time: 0,
            reward_rate: 0,
            period_finish: 0,
            rewards_duration,
        }
    }

    pub fn last_time_reward_applicable(&self, now: u64) -> u64 {
        rewards::last_time_reward_applicable(now, self.period_finish)
    }

    /// Accumulator value as of `now`, without writing anything.
    pub fn reward_per_token(&self, env: &Env, now: u64) -> I256 {
        let elapsed = self
            .last_time_reward_applicable(now)
            .saturating_sub(self.last_update_time);
        rewards::compute_reward_per_token(
            env,
            &self.reward_per_token_stored,
            self.reward_rate,
            elapsed,
            self.total_staked,
        )
    }

    /// Everything `account` could claim as of `now`.
    pub fn earned(
        &self,
        env: &Env,
        account: &ParticipantAccount,
        now: u64,
    ) -> Result<i128, ContractError> {
        let current_rpt = self.reward_per_token(env, now);
        account.earned_at(env, &current_rpt)
    }
}

/// One staking position. Missing entries read as the all-zero record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantAccount {
    /// Currently staked amount.
    pub balance: i128,
    /// Snapshot of `reward_per_token_stored` at the last checkpoint.
    pub reward_per_token_paid: I256,
    /// Reward owed but not yet paid out.
    pub rewards: i128,
}

impl ParticipantAccount {
    pub fn new(env: &Env) -> Self {
        Self {
            balance: 0,
            reward_per_token_paid: I256::from_i128(env, 0),
            rewards: 0,
        }
    }

    fn earned_at(&self, env: &Env, current_rpt: &I256) -> Result<i128, ContractError> {
        rewards::earned(
            env,
            self.balance,
            current_rpt,
            &self.reward_per_token_paid,
            self.rewards,
        )
        .ok_or(ContractError::ArithmeticOverflow)
    }

    /// A record with nothing staked and nothing owed carries no information:
    /// its snapshot only ever multiplies a zero balance.
    pub fn is_empty(&self) -> bool {
        self.balance == 0 && self.rewards == 0
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn account_key(participant: &Address) -> (Symbol, Address) {
    (ACCOUNT, participant.clone())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&STATE)
}

/// Write the genesis state. Callers check `is_initialized` first.
pub fn init_state(env: &Env, rewards_duration: u64) -> AccrualState {
    let state = AccrualState::new(env, rewards_duration);
    store_state(env, &state);
    state
}

pub fn load_state(env: &Env) -> Result<AccrualState, ContractError> {
    env.storage()
        .instance()
        .get(&STATE)
        .ok_or(ContractError::NotInitialized)
}

fn store_state(env: &Env, state: &AccrualState) {
    env.storage().instance().set(&STATE, state);
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load_account(env: &Env, participant: &Address) -> ParticipantAccount {
    env.storage()
        .persistent()
        .get(&account_key(participant))
        .unwrap_or_else(|| ParticipantAccount::new(env))
}

// ── Checkpoint guard ────────────────────────────────────────────────────────

/// The accrual state, opened for mutation.
///
/// [`Ledger::checkpoint`] is the only constructor and it refreshes the
/// global accumulator before returning, so no code path can change stakes,
/// rates or periods against a stale accumulator. Changes stay in memory
/// until [`Ledger::commit`]; an error returned before that leaves storage
/// untouched.
pub struct Ledger<'a> {
    env: &'a Env,
    now: u64,
    state: AccrualState,
}

impl<'a> Ledger<'a> {
    /// Steps 1 and 2 of the checkpoint: fold the elapsed interval into the
    /// accumulator and move `last_update_time` up to the applicable time.
    pub fn checkpoint(env: &'a Env) -> Result<Self, ContractError> {
        let mut state = load_state(env)?;
        let now = env.ledger().timestamp();

        state.reward_per_token_stored = state.reward_per_token(env, now);
        state.last_update_time = state.last_time_reward_applicable(now);

        Ok(Self { env, now, state })
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn state(&self) -> &AccrualState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut AccrualState {
        &mut self.state
    }

    /// Step 3 of the checkpoint: freeze what `participant` has earned so far
    /// and move their snapshot up to the current accumulator.
    pub fn settle(&self, participant: &Address) -> Result<ParticipantAccount, ContractError> {
        let mut account = load_account(self.env, participant);
        account.rewards = account.earned_at(self.env, &self.state.reward_per_token_stored)?;
        account.reward_per_token_paid = self.state.reward_per_token_stored.clone();
        Ok(account)
    }

    /// Add `amount` to a settled position and to the pool total.
    pub fn deposit(
        &mut self,
        account: &mut ParticipantAccount,
        amount: i128,
    ) -> Result<(), ContractError> {
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.state.total_staked = self
            .state
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Remove `amount` from a settled position and from the pool total.
    pub fn release(
        &mut self,
        account: &mut ParticipantAccount,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount > account.balance {
            return Err(ContractError::InsufficientBalance);
        }
        account.balance -= amount;
        // total_staked >= account.balance >= amount
        self.state.total_staked -= amount;
        Ok(())
    }

    /// Persist a settled position. Empty positions are dropped from storage.
    pub fn store_account(&self, participant: &Address, account: &ParticipantAccount) {
        let key = account_key(participant);
        if account.is_empty() {
            self.env.storage().persistent().remove(&key);
            return;
        }
        self.env.storage().persistent().set(&key, account);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    /// Write the refreshed global state back and hand out the final values.
    pub fn commit(self) -> AccrualState {
        store_state(self.env, &self.state);
        self.state
    }
}
