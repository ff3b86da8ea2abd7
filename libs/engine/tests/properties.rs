//! Property-based tests for exchange invariants
//!
//! Random deposit and swap sizes against a fresh in-memory exchange.

use engine::{
    AccountId, AssetLedger, Exchange, ExchangeError, InMemoryAssetLedger, ManualClock, TokenId,
    U256,
};
use proptest::prelude::*;

const SUPPLY: u64 = 1_000_000_000_000;

fn setup() -> (Exchange<InMemoryAssetLedger, ManualClock>, TokenId, TokenId) {
    let low = TokenId::from_low_u64_be(1);
    let high = TokenId::from_low_u64_be(2);
    let mut exchange = Exchange::new(
        AccountId::from_low_u64_be(0xee),
        InMemoryAssetLedger::new(),
        ManualClock::new(1),
    );
    let engine = exchange.engine_account();
    for holder in 1..=2u64 {
        let holder = AccountId::from_low_u64_be(holder);
        for token in [low, high] {
            exchange
                .assets_mut()
                .mint(token, holder, U256::from(SUPPLY))
                .unwrap();
            exchange
                .assets_mut()
                .approve(token, holder, engine, U256::MAX);
        }
    }
    (exchange, low, high)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn deposits_increase_reserves_by_exact_amounts(
        first_a in 1u64..1_000_000_000,
        first_b in 1u64..1_000_000_000,
        second_a in 1u64..1_000_000_000,
        second_b in 1u64..1_000_000_000,
        reversed in any::<bool>(),
    ) {
        let (mut exchange, low, high) = setup();
        let provider = AccountId::from_low_u64_be(1);

        exchange
            .add_liquidity(provider, low, high, U256::from(first_a), U256::from(first_b))
            .unwrap();
        let before = exchange.get_pool(low, high);

        let minted = if reversed {
            exchange.add_liquidity(provider, high, low, U256::from(second_b), U256::from(second_a))
        } else {
            exchange.add_liquidity(provider, low, high, U256::from(second_a), U256::from(second_b))
        }
        .unwrap();

        let after = exchange.get_pool(low, high);
        prop_assert_eq!(after.reserve_a, before.reserve_a + U256::from(second_a));
        prop_assert_eq!(after.reserve_b, before.reserve_b + U256::from(second_b));
        prop_assert_eq!(
            minted,
            (U256::from(second_a) * U256::from(second_b)).integer_sqrt()
        );
    }

    #[test]
    fn swap_preserves_or_grows_product_and_conserves_tokens(
        reserve_a in 1_000u64..1_000_000_000,
        reserve_b in 1_000u64..1_000_000_000,
        amount_in in 1u64..100_000_000,
        forward in any::<bool>(),
    ) {
        let (mut exchange, low, high) = setup();
        let trader = AccountId::from_low_u64_be(2);
        exchange
            .add_liquidity(AccountId::from_low_u64_be(1), low, high, U256::from(reserve_a), U256::from(reserve_b))
            .unwrap();
        let (token_in, token_out) = if forward { (low, high) } else { (high, low) };
        let before = exchange.get_pool(low, high);
        let k_before = before.reserve_a.full_mul(before.reserve_b);

        match exchange.swap_tokens(trader, token_in, token_out, U256::from(amount_in)) {
            Ok(out) => {
                let after = exchange.get_pool(low, high);
                prop_assert!(after.reserve_a.full_mul(after.reserve_b) >= k_before);
                let (reserve_out_before, reserve_out_after) = if forward {
                    (before.reserve_b, after.reserve_b)
                } else {
                    (before.reserve_a, after.reserve_a)
                };
                prop_assert!(out < reserve_out_before);
                prop_assert_eq!(reserve_out_after, reserve_out_before - out);
                prop_assert_eq!(
                    exchange.assets().balance_of(token_in, trader),
                    U256::from(SUPPLY - amount_in)
                );
                prop_assert_eq!(
                    exchange.assets().balance_of(token_out, trader),
                    U256::from(SUPPLY) + out
                );
                prop_assert_eq!(exchange.trade_count(trader), 1);
            }
            Err(err) => {
                prop_assert_eq!(err, ExchangeError::InsufficientOutput);
                prop_assert_eq!(exchange.get_pool(low, high), before);
                prop_assert_eq!(exchange.trade_count(trader), 0);
            }
        }
    }

    #[test]
    fn round_trip_swap_never_profits(
        reserve_a in 10_000u64..1_000_000_000,
        reserve_b in 10_000u64..1_000_000_000,
        amount_in in 1_000u64..10_000_000,
    ) {
        let (mut exchange, low, high) = setup();
        let trader = AccountId::from_low_u64_be(2);
        exchange
            .add_liquidity(AccountId::from_low_u64_be(1), low, high, U256::from(reserve_a), U256::from(reserve_b))
            .unwrap();

        let Ok(mid) = exchange.swap_tokens(trader, low, high, U256::from(amount_in)) else {
            return Ok(());
        };
        let back = exchange.swap_tokens(trader, high, low, mid).unwrap_or_default();

        prop_assert!(back <= U256::from(amount_in));
    }

    #[test]
    fn withdrawing_everything_from_sole_deposit_drains_pool(
        amount_a in 1u64..1_000_000_000,
        amount_b in 1u64..1_000_000_000,
    ) {
        let (mut exchange, low, high) = setup();
        let provider = AccountId::from_low_u64_be(1);
        let minted = exchange
            .add_liquidity(provider, low, high, U256::from(amount_a), U256::from(amount_b))
            .unwrap();

        let (out_a, out_b) = exchange.remove_liquidity(provider, low, high, minted).unwrap();

        prop_assert_eq!(out_a, U256::from(amount_a));
        prop_assert_eq!(out_b, U256::from(amount_b));
        prop_assert_eq!(exchange.total_liquidity(low, high), U256::zero());
        prop_assert!(exchange.get_pool(low, high).is_empty());
        prop_assert_eq!(exchange.assets().balance_of(low, provider), U256::from(SUPPLY));
    }
}
