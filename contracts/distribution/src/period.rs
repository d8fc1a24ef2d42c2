//! Distribution period controller.
//!
//! A period is a window of `rewards_duration` seconds with a constant
//! `reward_rate`. Notifying new reward either opens a fresh period or, while
//! one is running, re-bases the rate so the unreleased remainder is carried
//! into the new window.

use crate::{ledger::Ledger, rewards, ContractError};

/// `true` while the current period still releases reward.
pub fn is_active(now: u64, period_finish: u64) -> bool {
    now < period_finish
}

/// Open or extend a distribution period with `amount` of fresh reward.
///
/// `available` is the reward-asset balance the contract holds right now. The
/// guard compares it against what the *truncated* rate will release over a
/// full period, so the contract never promises more than it can pay even if
/// nobody touches their stake again.
///
/// Nothing is written unless every check passes.
pub fn notify_reward_amount(
    ledger: &mut Ledger,
    amount: i128,
    available: i128,
) -> Result<(), ContractError> {
    let now = ledger.now();
    let state = ledger.state();
    let duration = state.rewards_duration;

    let reward_rate = rewards::next_reward_rate(
        amount,
        now,
        state.period_finish,
        state.reward_rate,
        duration,
    )
    .ok_or(ContractError::ArithmeticOverflow)?;

    let promised = rewards::reward_for_duration(reward_rate, duration)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if promised > available {
        return Err(ContractError::InsufficientRewardBalance);
    }

    let period_finish = now
        .checked_add(duration)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let state = ledger.state_mut();
    state.reward_rate = reward_rate;
    state.last_update_time = now;
    state.period_finish = period_finish;

    Ok(())
}

/// Change the period length used by the *next* notification.
pub fn set_rewards_duration(ledger: &mut Ledger, duration: u64) -> Result<(), ContractError> {
    if duration == 0 {
        return Err(ContractError::InvalidAmount);
    }
    if is_active(ledger.now(), ledger.state().period_finish) {
        return Err(ContractError::PeriodActive);
    }

    ledger.state_mut().rewards_duration = duration;
    Ok(())
}
