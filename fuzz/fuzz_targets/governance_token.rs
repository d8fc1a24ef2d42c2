#![no_main]

use arbitrary::Arbitrary;
use governance_token::{GovernanceTokenContract, GovernanceTokenContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

const MAX_SUPPLY: i128 = 1_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Mint { to: u8, amount: u32 },
    Burn { from: u8, amount: u32 },
    Transfer { from: u8, to: u8, amount: u32 },
    Approve { from: u8, spender: u8, amount: u32 },
    TransferFrom { spender: u8, from: u8, to: u8, amount: u32 },
    DecreaseAllowance { from: u8, spender: u8, amount: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(GovernanceTokenContract, ());
    let client = GovernanceTokenContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &18,
        &String::from_str(&env, "Governance"),
        &String::from_str(&env, "GOV"),
        &MAX_SUPPLY,
    );

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    let pick = |i: u8| &users[usize::from(i) % users.len()];

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Mint { to, amount } => {
                let _ = client.try_mint(&owner, pick(to), &i128::from(amount));
            }
            FuzzAction::Burn { from, amount } => {
                let _ = client.try_burn(pick(from), &i128::from(amount));
            }
            FuzzAction::Transfer { from, to, amount } => {
                let _ = client.try_transfer(pick(from), pick(to), &i128::from(amount));
            }
            FuzzAction::Approve { from, spender, amount } => {
                let _ = client.try_approve(pick(from), pick(spender), &i128::from(amount));
            }
            FuzzAction::TransferFrom { spender, from, to, amount } => {
                let _ = client.try_transfer_from(pick(spender), pick(from), pick(to), &i128::from(amount));
            }
            FuzzAction::DecreaseAllowance { from, spender, amount } => {
                let _ = client.try_decrease_allowance(pick(from), pick(spender), &i128::from(amount));
            }
        }

        let held: i128 = users.iter().map(|u| client.balance(u)).sum();
        assert_eq!(held, client.total_supply());
        assert!(client.total_supply() <= MAX_SUPPLY);
    }
});
