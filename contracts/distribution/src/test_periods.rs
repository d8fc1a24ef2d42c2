#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{assert_rpt, assert_tokens, setup, setup_funded, DAY, START, UNIT, WEEK};
use crate::ContractError;

// ── Opening a period ──────────────────────────────────────────────────────────

#[test]
fn test_notify_opens_period() {
    let ctx = setup();
    ctx.notify(72_000);

    let expected_rate = 72_000 * UNIT / i128::from(WEEK);
    assert_eq!(ctx.client.reward_rate(), expected_rate);
    assert_eq!(ctx.client.period_finish(), START + WEEK);
    assert_eq!(ctx.client.last_time_reward_applicable(), START);
    assert_eq!(
        ctx.client.get_reward_for_duration(),
        expected_rate * i128::from(WEEK)
    );
    assert!(ctx.client.get_reward_for_duration() <= 72_000 * UNIT);
}

#[test]
fn test_notify_by_non_notifier_fails() {
    let ctx = setup();
    let intruder = Address::generate(&ctx.env);

    for caller in [intruder, ctx.owner.clone()] {
        match ctx.client.try_notify_reward_amount(&caller, &UNIT) {
            Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
            _ => unreachable!("Expected Unauthorized error"),
        }
    }
    assert_eq!(ctx.client.reward_rate(), 0);
}

#[test]
fn test_notify_zero_fails() {
    let ctx = setup();

    match ctx.client.try_notify_reward_amount(&ctx.notifier, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
}

#[test]
fn test_reward_stops_at_period_finish() {
    let ctx = setup();
    ctx.notify(72_000);
    let staker = ctx.participant();
    ctx.client.stake(&staker, &UNIT);

    ctx.jump_to(START + WEEK);
    let at_finish = ctx.client.earned(&staker);
    let rpt_at_finish = ctx.client.reward_per_token();

    ctx.jump_to(START + 10 * WEEK);
    assert_eq!(ctx.client.last_time_reward_applicable(), START + WEEK);
    assert_eq!(ctx.client.earned(&staker), at_finish);
    assert_eq!(ctx.client.reward_per_token(), rpt_at_finish);
}

// ── Insolvency guard ──────────────────────────────────────────────────────────

#[test]
fn test_notify_more_than_held_fails() {
    let ctx = setup_funded(1_000 * UNIT);

    match ctx.client.try_notify_reward_amount(&ctx.notifier, &(1_001 * UNIT)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientRewardBalance),
        _ => unreachable!("Expected InsufficientRewardBalance error"),
    }

    // Period state is untouched.
    assert_eq!(ctx.client.reward_rate(), 0);
    assert_eq!(ctx.client.period_finish(), 0);

    // Exactly the held balance is fine: truncation keeps the promise below it.
    ctx.notify(1_000);
    assert!(ctx.client.get_reward_for_duration() <= 1_000 * UNIT);
}

#[test]
fn test_notify_without_funding_fails() {
    let ctx = setup_funded(0);

    match ctx.client.try_notify_reward_amount(&ctx.notifier, &(72_000 * UNIT)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientRewardBalance),
        _ => unreachable!("Expected InsufficientRewardBalance error"),
    }
}

#[test]
fn test_top_up_counts_leftover_against_balance() {
    let ctx = setup_funded(1_000 * UNIT);
    ctx.notify(700);
    let rate = ctx.client.reward_rate();

    // Same instant: the whole first period is still unreleased, so 700 + 400
    // would have to be backed by 1_000.
    match ctx.client.try_notify_reward_amount(&ctx.notifier, &(400 * UNIT)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientRewardBalance),
        _ => unreachable!("Expected InsufficientRewardBalance error"),
    }
    assert_eq!(ctx.client.reward_rate(), rate);
    assert_eq!(ctx.client.period_finish(), START + WEEK);

    ctx.notify(300);
    assert!(ctx.client.get_reward_for_duration() <= 1_000 * UNIT);
}

// ── Extension and gaps ────────────────────────────────────────────────────────

#[test]
fn test_notify_after_six_days_rebases_rate() {
    let ctx = setup();
    ctx.notify(72_000);
    let wallet1 = ctx.participant();
    let wallet2 = ctx.participant();
    ctx.client.stake(&wallet1, &UNIT);
    ctx.client.stake(&wallet2, &UNIT);

    ctx.jump_to(START + 6 * DAY);
    ctx.notify(72_000);

    let first_rate = 72_000 * UNIT / i128::from(WEEK);
    let leftover = first_rate * i128::from(DAY);
    let expected = (72_000 * UNIT + leftover) / i128::from(WEEK);

    assert_eq!(ctx.client.reward_rate(), expected);
    assert_eq!(ctx.client.period_finish(), START + 6 * DAY + WEEK);
}

#[test]
fn test_top_up_does_not_reduce_total_payable() {
    // Top up three days into the first period.
    let early = setup();
    early.notify(72_000);
    let staker_a = early.participant();
    early.client.stake(&staker_a, &UNIT);
    early.jump_to(START + 3 * DAY);
    early.notify(72_000);
    early.jump_to(START + 3 * DAY + WEEK);

    // Let the first period finish, then notify again.
    let late = setup();
    late.notify(72_000);
    let staker_b = late.participant();
    late.client.stake(&staker_b, &UNIT);
    late.jump_to(START + WEEK);
    late.notify(72_000);
    late.jump_to(START + 2 * WEEK);

    let early_total = early.client.earned(&staker_a);
    let late_total = late.client.earned(&staker_b);

    assert_tokens(early_total, 144_000);
    assert_tokens(late_total, 144_000);
}

#[test]
fn test_one_staker_two_periods_with_gap() {
    let ctx = setup();
    ctx.notify(72_000);
    let wallet1 = ctx.participant();
    ctx.client.stake(&wallet1, &UNIT);

    ctx.jump_to(START + 2 * WEEK);

    assert_rpt(ctx.client.reward_per_token(), 72_000);
    assert_tokens(ctx.client.earned(&wallet1), 72_000);

    ctx.notify(72_000);
    ctx.jump_to(START + 3 * WEEK);

    assert_rpt(ctx.client.reward_per_token(), 144_000);
    assert_tokens(ctx.client.earned(&wallet1), 144_000);
}

#[test]
fn test_reward_forfeited_while_nobody_staked() {
    let ctx = setup();
    ctx.notify(70_000);
    let staker = ctx.participant();

    // Three of seven days pass with an empty pool.
    ctx.jump_to(START + 3 * DAY);
    ctx.client.stake(&staker, &UNIT);

    ctx.jump_to(START + WEEK);
    assert_tokens(ctx.client.earned(&staker), 40_000);

    // The idle share is not credited to anyone later.
    ctx.jump_to(START + 3 * WEEK);
    assert_tokens(ctx.client.earned(&staker), 40_000);
}

#[test]
fn test_notify_amount_smaller_than_duration_yields_zero_rate() {
    let ctx = setup();
    let staker = ctx.participant();
    ctx.client.stake(&staker, &UNIT);

    // Fewer base units than seconds in the period truncate to a zero rate.
    ctx.client
        .notify_reward_amount(&ctx.notifier, &(i128::from(WEEK) - 1));
    assert_eq!(ctx.client.reward_rate(), 0);

    ctx.jump_to(START + WEEK);
    assert_eq!(ctx.client.earned(&staker), 0);
}

// ── Rewards duration ──────────────────────────────────────────────────────────

#[test]
fn test_set_rewards_duration_while_active_fails() {
    let ctx = setup();
    ctx.notify(72_000);

    ctx.jump_to(START + WEEK - 1);
    match ctx.client.try_set_rewards_duration(&ctx.owner, &(2 * WEEK)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PeriodActive),
        _ => unreachable!("Expected PeriodActive error"),
    }
    assert_eq!(ctx.client.rewards_duration(), WEEK);
}

#[test]
fn test_set_rewards_duration_after_period() {
    let ctx = setup();
    ctx.notify(72_000);
    let staker = ctx.participant();
    ctx.client.stake(&staker, &UNIT);

    ctx.jump_to(START + WEEK);
    ctx.client.set_rewards_duration(&ctx.owner, &(2 * WEEK));
    assert_eq!(ctx.client.rewards_duration(), 2 * WEEK);

    // Reward earned under the old period is kept.
    assert_tokens(ctx.client.earned(&staker), 72_000);

    ctx.notify(72_000);
    assert_eq!(ctx.client.period_finish(), START + 3 * WEEK);
    assert_eq!(ctx.client.reward_rate(), 72_000 * UNIT / i128::from(2 * WEEK));

    ctx.jump_to(START + 3 * WEEK);
    assert_tokens(ctx.client.earned(&staker), 144_000);
}

#[test]
fn test_set_rewards_duration_validation() {
    let ctx = setup();
    let intruder = Address::generate(&ctx.env);

    match ctx.client.try_set_rewards_duration(&intruder, &DAY) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match ctx.client.try_set_rewards_duration(&ctx.owner, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
    assert_eq!(ctx.client.rewards_duration(), WEEK);
}
