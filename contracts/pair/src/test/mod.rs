#![cfg(test)]

// ---------------------------------------------------------------------------
// Pair test suite
//
// Structure
// ─────────
// 1. preflight: flash-loan guard checks that fire before any storage access.
// 2. integration: full flash loan lifecycle with receivers that repay, that
//    do not, and that try to trade against the lending pool.
// 3. swaps: optimistic swaps against the fee-adjusted invariant.
// 4. views: initialization and read-only entry points.
// ---------------------------------------------------------------------------


use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use crate::{Pair, PairClient};

/// Registers a Stellar Asset Contract and mints `amount` to `recipient`.
fn create_token(env: &Env, admin: &Address, recipient: &Address, amount: i128) -> Address {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone()).address();
    StellarAssetClient::new(env, &token_id).mint(recipient, &amount);
    token_id
}

/// A pool seeded with `reserve_a`/`reserve_b` through transfer + `sync`.
fn funded_pair<'a>(
    env: &Env,
    reserve_a: i128,
    reserve_b: i128,
) -> (PairClient<'a>, Address, Address) {
    let admin = Address::generate(env);
    let pair_id = env.register_contract(None, Pair);
    let client = PairClient::new(env, &pair_id);

    let token_a = create_token(env, &admin, &pair_id, reserve_a);
    let token_b = create_token(env, &admin, &pair_id, reserve_b);
    client.initialize(&token_a, &token_b, &30);
    client.sync();

    (client, token_a, token_b)
}

// ============================================================================
// 1. Pre-flight validation tests (no pair state needed)
// ============================================================================
mod preflight {
    use soroban_sdk::{testutils::Address as _, Address, Bytes, Env};

    use crate::{errors::PairError, flash_loan::execute_flash_loan};

    #[test]
    fn payload_exceeding_max_size_reverts() {
        let env = Env::default();
        // MAX_PAYLOAD_SIZE = 256; send 257 bytes
        let oversized = Bytes::from_slice(&env, &[0u8; 257]);
        let receiver = Address::generate(&env);

        let result = execute_flash_loan(&env, &receiver, 1_000, 0, &oversized);
        assert_eq!(result, Err(PairError::FlashPayloadTooLarge));
    }

    #[test]
    fn zero_or_negative_amounts_revert() {
        let env = Env::default();
        let data = Bytes::new(&env);
        let receiver = Address::generate(&env);

        for (amount_a, amount_b) in [(0, 0), (-1, 0), (0, -1)] {
            let result = execute_flash_loan(&env, &receiver, amount_a, amount_b, &data);
            assert_eq!(result, Err(PairError::InsufficientInputAmount));
        }
    }
}

// ============================================================================
// 2. Integration tests: full flash loan lifecycle
// ============================================================================
mod integration {
    use soroban_sdk::{token::StellarAssetClient, Address, Bytes, Env};

    use super::funded_pair;
    use crate::{errors::PairError, PairClient};
    use flashswap_interface::math::compute_flash_fee;

    // Isolated submodules avoid symbol collisions between receivers.
    mod good_receiver_mod {
        use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env};

        #[contract]
        pub struct GoodReceiver;

        #[contractimpl]
        impl GoodReceiver {
            /// Repays principal + fee back to `initiator` (the pair contract).
            pub fn on_flash_loan(
                env: Env,
                initiator: Address,
                token_a: Address,
                token_b: Address,
                amount_a: i128,
                amount_b: i128,
                fee_a: i128,
                fee_b: i128,
                _data: Bytes,
            ) {
                let me = env.current_contract_address();
                if amount_a > 0 {
                    TokenClient::new(&env, &token_a).transfer(&me, &initiator, &(amount_a + fee_a));
                }
                if amount_b > 0 {
                    TokenClient::new(&env, &token_b).transfer(&me, &initiator, &(amount_b + fee_b));
                }
            }
        }
    }
    use good_receiver_mod::GoodReceiver;

    mod bad_receiver_mod {
        use soroban_sdk::{contract, contractimpl, Address, Bytes, Env};

        #[contract]
        pub struct BadReceiver;

        #[contractimpl]
        impl BadReceiver {
            /// Keeps the loan.
            pub fn on_flash_loan(
                _env: Env,
                _initiator: Address,
                _token_a: Address,
                _token_b: Address,
                _amount_a: i128,
                _amount_b: i128,
                _fee_a: i128,
                _fee_b: i128,
                _data: Bytes,
            ) {
            }
        }
    }
    use bad_receiver_mod::BadReceiver;

    mod principal_only_mod {
        use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env};

        #[contract]
        pub struct PrincipalOnlyReceiver;

        #[contractimpl]
        impl PrincipalOnlyReceiver {
            /// Returns the principal but not the fee.
            pub fn on_flash_loan(
                env: Env,
                initiator: Address,
                token_a: Address,
                _token_b: Address,
                amount_a: i128,
                _amount_b: i128,
                _fee_a: i128,
                _fee_b: i128,
                _data: Bytes,
            ) {
                let me = env.current_contract_address();
                TokenClient::new(&env, &token_a).transfer(&me, &initiator, &amount_a);
            }
        }
    }
    use principal_only_mod::PrincipalOnlyReceiver;

    fn register_good(env: &Env) -> Address {
        env.register_contract(None, GoodReceiver)
    }

    fn stellar_admin_mint(env: &Env, token: &Address, to: &Address, amount: i128) {
        StellarAssetClient::new(env, token).mint(to, &amount);
    }

    #[test]
    fn flash_loan_repaid_with_fee_passes() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, token_a, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let receiver_id = register_good(&env);

        let amount_a = 1_000_000_i128;
        let fee_a = compute_flash_fee(amount_a, 30); // 30 bps → 3_000
        stellar_admin_mint(&env, &token_a, &receiver_id, fee_a);

        client.flash_loan(&receiver_id, &amount_a, &0_i128, &Bytes::new(&env));

        let (reserve_a, reserve_b, _) = client.get_reserves();
        assert_eq!(reserve_a, 10_000_000 + fee_a, "reserve_a should grow by fee");
        assert_eq!(reserve_b, 10_000_000, "reserve_b unchanged");
    }

    #[test]
    fn one_unit_loan_costs_two_to_repay() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, token_a, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let receiver_id = register_good(&env);
        assert_eq!(compute_flash_fee(1, 30), 1);

        // Without the extra unit the repayment transfer fails in the callback.
        let result = client.try_flash_loan(&receiver_id, &1_i128, &0_i128, &Bytes::new(&env));
        assert!(result.is_err());
        assert_eq!(client.get_reserves().0, 10_000_000);

        stellar_admin_mint(&env, &token_a, &receiver_id, 1);
        client.flash_loan(&receiver_id, &1_i128, &0_i128, &Bytes::new(&env));
        assert_eq!(client.get_reserves().0, 10_000_001);
    }

    #[test]
    fn flash_loan_both_tokens_repaid_passes() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, token_a, token_b) = funded_pair(&env, 10_000_000, 8_000_000);
        let receiver_id = register_good(&env);

        let (amount_a, amount_b) = (500_000_i128, 400_000_i128);
        let fee_a = compute_flash_fee(amount_a, 30);
        let fee_b = compute_flash_fee(amount_b, 30);
        stellar_admin_mint(&env, &token_a, &receiver_id, fee_a);
        stellar_admin_mint(&env, &token_b, &receiver_id, fee_b);

        client.flash_loan(&receiver_id, &amount_a, &amount_b, &Bytes::new(&env));

        let (reserve_a, reserve_b, _) = client.get_reserves();
        assert_eq!(reserve_a, 10_000_000 + fee_a);
        assert_eq!(reserve_b, 8_000_000 + fee_b);
    }

    #[test]
    fn flash_loan_without_repayment_reverts() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let receiver_id = env.register_contract(None, BadReceiver);

        let result = client.try_flash_loan(&receiver_id, &1_000_000_i128, &0_i128, &Bytes::new(&env));
        assert_eq!(result, Err(Ok(PairError::FlashLoanNotRepaid)));

        // Rolled back: reserves untouched and the pool is usable again.
        let (reserve_a, _, _) = client.get_reserves();
        assert_eq!(reserve_a, 10_000_000);
    }

    #[test]
    fn flash_loan_missing_fee_reverts() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let receiver_id = env.register_contract(None, PrincipalOnlyReceiver);

        let result = client.try_flash_loan(&receiver_id, &1_000_000_i128, &0_i128, &Bytes::new(&env));
        assert_eq!(result, Err(Ok(PairError::FlashLoanNotRepaid)));
    }

    #[test]
    fn receiver_short_of_fee_reverts_inside_callback() {
        let env = Env::default();
        env.mock_all_auths();

        // GoodReceiver tries to repay amount + fee but was never given the fee.
        let (client, _, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let receiver_id = register_good(&env);

        let result = client.try_flash_loan(&receiver_id, &1_000_000_i128, &0_i128, &Bytes::new(&env));
        assert!(result.is_err(), "repayment transfer larger than the balance must revert");
        assert_eq!(client.get_reserves().0, 10_000_000);
    }

    #[test]
    fn flash_loan_oversized_payload_reverts() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let receiver_id = register_good(&env);

        let oversized = Bytes::from_slice(&env, &[0u8; 257]);
        let result = client.try_flash_loan(&receiver_id, &1_000_000_i128, &0_i128, &oversized);
        assert_eq!(result, Err(Ok(PairError::FlashPayloadTooLarge)));
    }

    #[test]
    fn flash_loan_exceeding_reserves_reverts() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _, _) = funded_pair(&env, 500_000, 10_000_000);
        let receiver_id = register_good(&env);

        let result = client.try_flash_loan(&receiver_id, &1_000_000_i128, &0_i128, &Bytes::new(&env));
        assert_eq!(result, Err(Ok(PairError::InsufficientLiquidity)));
    }

    #[test]
    fn flash_loan_on_uninitialized_pair_reverts() {
        let env = Env::default();
        env.mock_all_auths();

        let client = PairClient::new(&env, &env.register_contract(None, crate::Pair));
        let receiver_id = register_good(&env);

        let result = client.try_flash_loan(&receiver_id, &1_i128, &0_i128, &Bytes::new(&env));
        assert_eq!(result, Err(Ok(PairError::NotInitialized)));
    }
}

// ============================================================================
// 3. Swaps
// ============================================================================
mod swaps {
    use soroban_sdk::{testutils::Address as _, Address, Env};

    use super::{funded_pair, TokenClient};
    use crate::errors::PairError;
    use flashswap_interface::math::get_amount_out;

    #[test]
    fn quoted_swap_succeeds_and_updates_reserves() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, token_a, token_b) = funded_pair(&env, 10_000_000, 20_000_000);
        let trader = Address::generate(&env);
        let pair_id = client.address.clone();

        soroban_sdk::token::StellarAssetClient::new(&env, &token_a).mint(&trader, &100_000);
        let out = get_amount_out(100_000, 10_000_000, 20_000_000, 30).unwrap();

        TokenClient::new(&env, &token_a).transfer(&trader, &pair_id, &100_000);
        client.swap(&0, &out, &trader);

        assert_eq!(TokenClient::new(&env, &token_b).balance(&trader), out);
        let (reserve_a, reserve_b, _) = client.get_reserves();
        assert_eq!(reserve_a, 10_100_000);
        assert_eq!(reserve_b, 20_000_000 - out);
    }

    #[test]
    fn asking_for_more_than_the_quote_breaks_k() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, token_a, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let trader = Address::generate(&env);
        let pair_id = client.address.clone();

        soroban_sdk::token::StellarAssetClient::new(&env, &token_a).mint(&trader, &10_000);
        let out = get_amount_out(10_000, 10_000_000, 10_000_000, 30).unwrap();

        TokenClient::new(&env, &token_a).transfer(&trader, &pair_id, &10_000);
        assert_eq!(client.try_swap(&0, &(out + 1), &trader), Err(Ok(PairError::InvalidK)));
    }

    #[test]
    fn swap_without_input_reverts() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _, _) = funded_pair(&env, 10_000_000, 10_000_000);
        let trader = Address::generate(&env);

        assert_eq!(
            client.try_swap(&0, &1_000, &trader),
            Err(Ok(PairError::InsufficientInputAmount))
        );
    }

    #[test]
    fn swap_output_bounds() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, token_a, _) = funded_pair(&env, 1_000, 1_000);
        let trader = Address::generate(&env);

        assert_eq!(
            client.try_swap(&0, &0, &trader),
            Err(Ok(PairError::InsufficientOutputAmount))
        );
        assert_eq!(
            client.try_swap(&0, &1_000, &trader),
            Err(Ok(PairError::InsufficientLiquidity))
        );
        assert_eq!(client.try_swap(&0, &1, &token_a), Err(Ok(PairError::InvalidTo)));
    }
}

// ============================================================================
// 4. Views and initialization
// ============================================================================
mod views {
    use soroban_sdk::{testutils::Address as _, Address, Env};

    use crate::{errors::PairError, Pair, PairClient, DEFAULT_FEE_BPS};

    #[test]
    fn uninitialized_pair_reports_defaults_and_errors() {
        let env = Env::default();
        let client = PairClient::new(&env, &env.register_contract(None, Pair));

        assert_eq!(client.get_current_fee_bps(), DEFAULT_FEE_BPS);
        assert_eq!(client.try_get_reserves(), Err(Ok(PairError::NotInitialized)));
        assert_eq!(client.try_tokens(), Err(Ok(PairError::NotInitialized)));
    }

    #[test]
    fn initialize_records_tokens_and_fee() {
        let env = Env::default();
        let client = PairClient::new(&env, &env.register_contract(None, Pair));
        let token_a = Address::generate(&env);
        let token_b = Address::generate(&env);

        client.initialize(&token_a, &token_b, &25);

        assert_eq!(client.tokens(), (token_a, token_b));
        assert_eq!(client.get_current_fee_bps(), 25);
        let (reserve_a, reserve_b, timestamp) = client.get_reserves();
        assert_eq!((reserve_a, reserve_b), (0, 0));
        assert_eq!(timestamp, env.ledger().timestamp());
    }

    #[test]
    fn initialize_guards() {
        let env = Env::default();
        let client = PairClient::new(&env, &env.register_contract(None, Pair));
        let token_a = Address::generate(&env);
        let token_b = Address::generate(&env);

        assert_eq!(
            client.try_initialize(&token_a, &token_a, &30),
            Err(Ok(PairError::IdenticalTokens))
        );
        assert_eq!(
            client.try_initialize(&token_a, &token_b, &10_000),
            Err(Ok(PairError::InvalidFee))
        );

        client.initialize(&token_a, &token_b, &30);
        assert_eq!(
            client.try_initialize(&token_a, &token_b, &30),
            Err(Ok(PairError::AlreadyInitialized))
        );
    }
}
