#![no_main]

use arbitrary::Arbitrary;
use distribution::{DistributionContract, DistributionContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

const UNIT: i128 = 10_000_000;
const WEEK: u64 = 7 * 24 * 60 * 60;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { who: u8, amount: u32 },
    Withdraw { who: u8, amount: u32 },
    Claim { who: u8 },
    Exit { who: u8 },
    Notify { amount: u32 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000_000);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(DistributionContract, ());
    let client = DistributionContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    let notifier = Address::generate(&env);
    client.initialize(&owner, &stake_token, &reward_token, &WEEK);
    client.set_reward_distribution(&owner, &notifier);

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &(1_000_000 * UNIT));

    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &(1_000_000 * UNIT));
        users.push(user);
    }

    let mut notified: i128 = 0;
    let mut paid: i128 = 0;

    // Amounts are raw base units so truncation paths are exercised too.
    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Stake { who, amount } => {
                let user = &users[usize::from(who) % users.len()];
                let _ = client.try_stake(user, &i128::from(amount));
            }
            FuzzAction::Withdraw { who, amount } => {
                let user = &users[usize::from(who) % users.len()];
                let _ = client.try_withdraw(user, &i128::from(amount));
            }
            FuzzAction::Claim { who } => {
                let user = &users[usize::from(who) % users.len()];
                if let Ok(Ok(amount)) = client.try_claim(user) {
                    paid += amount;
                }
            }
            FuzzAction::Exit { who } => {
                let user = &users[usize::from(who) % users.len()];
                if let Ok(Ok(amount)) = client.try_exit(user) {
                    paid += amount;
                }
            }
            FuzzAction::Notify { amount } => {
                let amount = i128::from(amount);
                if let Ok(Ok(())) = client.try_notify_reward_amount(&notifier, &amount) {
                    notified += amount;
                }
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds % (2 * WEEK) as u32));
            }
        }

        let outstanding: i128 = users.iter().map(|u| client.earned(u)).sum();
        assert!(outstanding + paid <= notified, "distributed more than notified");

        let staked: i128 = users.iter().map(|u| client.balance_of(u)).sum();
        assert_eq!(client.total_staked(), staked);
        assert_eq!(TokenClient::new(&env, &stake_token).balance(&contract_id), staked);
    }
});
