//! Conservation property: the locked counter tracks the account sum.
//!
//! `total_funds_locked == Σ account amounts` holds across arbitrary
//! deposit/withdraw interleavings; only a fee skim (custody moves, counter
//! does not) and the emergency sweep (counter zeroed, accounts kept) break
//! the relationship between counter, sum, and custody — each pinned by a
//! directed test below.

use proptest::prelude::*;
use strata_core::{Amount, HostChain};
use strata_testkit::{principal, VaultFixture};
use strata_vault::FEE_COLLECTION_INTERVAL;

const USERS: [&str; 3] = ["alice", "bob", "carol"];

fn fixture_with_protocol() -> VaultFixture {
    let mut fx = VaultFixture::new();
    fx.vault
        .add_protocol(fx.owner, principal("dest"), 1)
        .expect("add protocol");
    for user in USERS {
        fx.fund(principal(user), u128::from(u32::MAX));
    }
    fx
}

proptest! {
    #[test]
    fn counter_matches_account_sum_under_any_interleaving(
        ops in proptest::collection::vec(
            (0usize..USERS.len(), any::<bool>(), 1u128..10_000),
            1..40,
        )
    ) {
        let mut fx = fixture_with_protocol();
        for (user_index, is_deposit, raw_amount) in ops {
            let user = principal(USERS[user_index]);
            let amount = Amount::new(raw_amount);
            if is_deposit {
                fx.vault.deposit(user, amount).expect("funded deposit succeeds");
            } else {
                // Overdraws are legal no-ops for the property.
                let _ = fx.vault.withdraw(user, amount);
            }

            let sum = fx.vault.state().ledger.recorded_sum();
            prop_assert_eq!(fx.vault.total_funds_locked(), sum);
            // Height never advances here, so no fee skim: custody agrees too.
            prop_assert_eq!(fx.custody_balance(), sum);
        }
    }
}

#[test]
fn fee_skim_diverges_custody_but_not_the_sum() {
    let mut fx = fixture_with_protocol();
    let alice = principal("alice");
    fx.vault
        .deposit(alice, Amount::new(1_000_000))
        .expect("deposit");

    fx.advance(FEE_COLLECTION_INTERVAL + 1);
    fx.vault.rebalance_funds(fx.owner).expect("skim");

    let sum = fx.vault.state().ledger.recorded_sum();
    // Counter and sum still agree with each other...
    assert_eq!(fx.vault.total_funds_locked(), sum);
    // ...but custody no longer backs them in full.
    assert!(fx.custody_balance() < sum);
    assert_eq!(fx.custody_balance(), Amount::new(900_000));
}

#[test]
fn sweep_diverges_counter_from_the_sum() {
    let mut fx = fixture_with_protocol();
    let alice = principal("alice");
    fx.vault
        .initialize(fx.owner, vec![principal("w1")], 1)
        .expect("initialize");
    fx.vault
        .deposit(alice, Amount::new(250_000))
        .expect("deposit");
    fx.vault
        .sign_emergency_withdrawal(principal("w1"))
        .expect("sign");
    fx.vault
        .execute_emergency_withdraw(principal("anyone"), principal("rescue"))
        .expect("sweep");

    assert_eq!(fx.vault.total_funds_locked(), Amount::ZERO);
    assert_eq!(
        fx.vault.state().ledger.recorded_sum(),
        Amount::new(250_000)
    );
    assert_eq!(
        fx.vault.host().balance_of(principal("rescue")),
        Amount::new(250_000)
    );
}
