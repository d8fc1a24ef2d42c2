use soroban_sdk::{Env, I256};

/// Fixed-point scaling factor.
///
/// Reward-per-token values are multiplied by this constant before storage
/// to preserve sub-unit precision without floating-point arithmetic.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

// ── Core reward engine ──────────────────────────────────────────────────────
//
// The accumulator lives in 256 bits. `rate × elapsed` never exceeds the
// reward the contract was funded with, so `rate × elapsed × PRECISION` fits
// with room to spare even for 18-decimal assets and a single base unit of
// stake. Amounts stay `i128`; narrowing back is checked and `None` means the
// result left the i128 range.

/// The latest instant for which the current reward rate still applies.
pub fn last_time_reward_applicable(now: u64, period_finish: u64) -> u64 {
    now.min(period_finish)
}

fn scaled(env: &Env) -> I256 {
    I256::from_i128(env, PRECISION)
}

/// Recompute the global `reward_per_token_stored` value.
///
/// This is the fundamental O(1) accumulation step:
///
/// ```text
/// Δrpt = reward_rate × elapsed_seconds × PRECISION / total_staked
/// new_rpt = stored_rpt + Δrpt
/// ```
///
/// When `total_staked` is zero we return `stored` unchanged. Reward emitted
/// while nobody is staked is not carried forward.
///
/// # Arguments
/// * `stored`       – current `reward_per_token_stored` (scaled by PRECISION)
/// * `reward_rate`  – tokens emitted per second across *all* stakers
/// * `elapsed`      – seconds since the last update, already capped at the
///                    period finish
/// * `total_staked` – sum of all active stakes
pub fn compute_reward_per_token(
    env: &Env,
    stored: &I256,
    reward_rate: i128,
    elapsed: u64,
    total_staked: i128,
) -> I256 {
    if total_staked <= 0 || elapsed == 0 || reward_rate <= 0 {
        return stored.clone();
    }

    let delta = I256::from_i128(env, reward_rate)
        .mul(&I256::from_i128(env, i128::from(elapsed)))
        .mul(&scaled(env))
        .div(&I256::from_i128(env, total_staked));

    stored.add(&delta)
}

/// Calculate the total rewards earned by a single staker.
///
/// ```text
/// earned = staked × (current_rpt − user_rpt_paid) / PRECISION + user_earned
/// ```
///
/// The subtraction `current_rpt − user_rpt_paid` isolates only the
/// accumulation that happened *since the user's last snapshot*, so prior
/// claims/snapshots are never double-counted.
pub fn earned(
    env: &Env,
    staked: i128,
    current_rpt: &I256,
    user_rpt_paid: &I256,
    user_earned: i128,
) -> Option<i128> {
    let new_rewards = I256::from_i128(env, staked)
        .mul(&current_rpt.sub(user_rpt_paid))
        .div(&scaled(env))
        .to_i128()?;

    user_earned.checked_add(new_rewards)
}

/// Rate for a distribution period opened at `now` with `amount` fresh reward.
///
/// If the previous period is still running, the part of it that has not been
/// released yet (`(period_finish − now) × current_rate`) is folded into the
/// new period instead of being dropped.
///
/// Division truncates, so `rate × duration` may fall short of the nominal
/// amount. The remainder stays in the contract.
pub fn next_reward_rate(
    amount: i128,
    now: u64,
    period_finish: u64,
    current_rate: i128,
    duration: u64,
) -> Option<i128> {
    let duration = i128::from(duration);
    if now >= period_finish {
        return amount.checked_div(duration);
    }

    let remaining = i128::from(period_finish - now);
    let leftover = remaining.checked_mul(current_rate)?;
    amount.checked_add(leftover)?.checked_div(duration)
}

/// Total reward a full period at `reward_rate` will release.
pub fn reward_for_duration(reward_rate: i128, duration: u64) -> Option<i128> {
    reward_rate.checked_mul(i128::from(duration))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
