#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub rewards_duration: u64,
    pub timestamp: u64,
}

/// Fired when a participant deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when stake is returned to a participant.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when accrued reward is paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the notifier opens or extends a distribution period.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAddedEvent {
    pub amount: i128,
    pub reward_rate: i128,
    pub period_finish: u64,
    pub timestamp: u64,
}

/// Fired when the owner changes the period length.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDurationSetEvent {
    pub rewards_duration: u64,
    pub timestamp: u64,
}

/// Fired when the owner assigns the notifier role.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardDistributionSetEvent {
    pub notifier: Address,
    pub timestamp: u64,
}

/// Fired once per recipient of a bonus payout.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BonusPaidEvent {
    pub asset: Address,
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    stake_token: Address,
    reward_token: Address,
    rewards_duration: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            stake_token,
            reward_token,
            rewards_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), staker.clone()),
        RewardPaidEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_added(env: &Env, amount: i128, reward_rate: i128, period_finish: u64) {
    env.events().publish(
        (symbol_short!("RWD_ADDED"),),
        RewardAddedEvent {
            amount,
            reward_rate,
            period_finish,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_duration_set(env: &Env, rewards_duration: u64) {
    env.events().publish(
        (symbol_short!("DUR_SET"),),
        RewardsDurationSetEvent {
            rewards_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_distribution_set(env: &Env, notifier: Address) {
    env.events().publish(
        (symbol_short!("NOTIF_SET"),),
        RewardDistributionSetEvent {
            notifier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_bonus_paid(env: &Env, asset: Address, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("BONUS"), recipient.clone()),
        BonusPaidEvent {
            asset,
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
