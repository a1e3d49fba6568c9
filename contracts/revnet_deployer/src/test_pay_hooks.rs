extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Bytes, Symbol, Vec};

use crate::interfaces::DataHookClient;
use crate::invariants::{
    assert_composed_hooks, assert_data_hook_matches_variant, assert_rulesets_use_data_hook,
};
use crate::permissions::{Permission, PLATFORM_WIDE};
use crate::test_support::{Harness, Participation};
use crate::types::{HookSpecification, RedeemContext, TokenAmount};
use crate::Variant;

fn two_hooks(h: &Harness) -> Vec<HookSpecification> {
    vec![&h.env, h.hook(100), h.hook(200)]
}

#[test]
fn test_payment_with_participating_buyback_appends_it_last() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Participate(42));
    let hooks = two_hooks(&h);
    let project_id = h.deploy_with_pay_hooks(&hooks);

    let response = h.deployer.on_payment_context(&h.pay_context(project_id, 7));

    assert_eq!(response.specifications.len(), 3);
    assert_eq!(response.specifications.get(0), hooks.get(0));
    assert_eq!(response.specifications.get(1), hooks.get(1));
    assert_eq!(
        response.specifications.get(2).unwrap().hook,
        h.buyback.address
    );
    assert_composed_hooks(&hooks, &response, Some(&h.buyback.address));
}

#[test]
fn test_payment_with_abstaining_buyback_returns_stored_hooks() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Abstain);
    let hooks = two_hooks(&h);
    let project_id = h.deploy_with_pay_hooks(&hooks);

    let response = h.deployer.on_payment_context(&h.pay_context(project_id, 7));

    assert_eq!(response.specifications, hooks);
    assert_composed_hooks(&hooks, &response, None);
}

#[test]
fn test_payment_weight_is_buyback_weight_verbatim() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Participate(123_456));
    let project_id = h.deploy_with_pay_hooks(&two_hooks(&h));

    let response = h.deployer.on_payment_context(&h.pay_context(project_id, 1));
    assert_eq!(response.weight, 123_456);

    h.buyback.configure(&Participation::Abstain);
    let response = h.deployer.on_payment_context(&h.pay_context(project_id, 99));
    assert_eq!(response.weight, 99);
}

#[test]
fn test_payment_without_registered_hooks_returns_only_buyback() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Participate(5));
    let project_id = h.deploy_with_pay_hooks(&Vec::new(&h.env));

    let response = h.deployer.on_payment_context(&h.pay_context(project_id, 1));
    assert_eq!(response.specifications.len(), 1);
    assert_eq!(
        response.specifications.get(0).unwrap().hook,
        h.buyback.address
    );
}

#[test]
fn test_payment_keeps_duplicate_hooks_in_order() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Abstain);
    let repeated = h.hook(1);
    let hooks = vec![&h.env, repeated.clone(), h.hook(2), repeated.clone()];
    let project_id = h.deploy_with_pay_hooks(&hooks);

    assert_eq!(h.deployer.pay_hook_specifications_of(&project_id), hooks);
    let response = h.deployer.on_payment_context(&h.pay_context(project_id, 1));
    assert_eq!(response.specifications, hooks);
}

#[test]
fn test_payment_composition_is_repeatable() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Participate(10));
    let project_id = h.deploy_with_pay_hooks(&two_hooks(&h));
    let context = h.pay_context(project_id, 1);

    let first = h.deployer.on_payment_context(&context);
    let second = h.deployer.on_payment_context(&context);
    assert_eq!(first, second);
}

#[test]
fn test_payment_for_revnet_without_binding_passes_weight_through() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Participate(10));
    // The basic variant binds nothing on the deployer.
    let project_id = h.deploy_basic();

    let response = h.deployer.on_payment_context(&h.pay_context(project_id, 77));
    assert_eq!(response.weight, 77);
    assert!(response.specifications.is_empty());
}

#[test]
fn test_hooks_are_isolated_per_project() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Abstain);
    let first_hooks = two_hooks(&h);
    let second_hooks = vec![&h.env, h.hook(9)];
    let first = h.deploy_with_pay_hooks(&first_hooks);
    let second = h.deploy_with_pay_hooks(&second_hooks);

    assert_eq!(h.deployer.pay_hook_specifications_of(&first), first_hooks);
    assert_eq!(h.deployer.pay_hook_specifications_of(&second), second_hooks);
}

#[test]
fn test_redemption_always_returns_zero_and_no_hooks() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Participate(10));
    let project_id = h.deploy_with_pay_hooks(&two_hooks(&h));

    for id in [project_id, 0, 999] {
        let context = RedeemContext {
            terminal: Address::generate(&h.env),
            holder: Address::generate(&h.env),
            project_id: id,
            ruleset_id: 1,
            redeem_count: 1_000,
            total_supply: 10_000,
            surplus: TokenAmount {
                token: Address::generate(&h.env),
                value: 50_000,
                decimals: 7,
                currency: 1,
            },
            redemption_rate: 7_000,
            metadata: Bytes::new(&h.env),
        };
        let response = h.deployer.on_redemption_context(&context);
        assert_eq!(response.weight, 0);
        assert!(response.specifications.is_empty());
    }
}

#[test]
fn test_deployer_is_data_hook_of_pay_hook_revnets() {
    let h = Harness::new();
    let project_id = h.deploy_with_pay_hooks(&two_hooks(&h));

    let record = h.deployer.revnet_of(&project_id).unwrap();
    assert_eq!(record.variant, Variant::PayHooks);
    assert_data_hook_matches_variant(&record, &h.deployer.address);
    assert_rulesets_use_data_hook(&h.controller.rulesets_of(&project_id), &record);
    assert_eq!(
        h.deployer.buyback_hook_of(&project_id),
        Some(h.buyback.address.clone())
    );
}

#[test]
fn test_ledger_calls_through_data_hook_interface() {
    let h = Harness::new();
    h.buyback.configure(&Participation::Participate(3));
    let hooks = two_hooks(&h);
    let project_id = h.deploy_with_pay_hooks(&hooks);

    let data_hook = DataHookClient::new(&h.env, &h.deployer.address);
    assert!(data_hook.supports_interface(&Symbol::new(&h.env, "data_hook")));
    assert!(!data_hook.supports_interface(&Symbol::new(&h.env, "split_hook")));

    let response = data_hook.on_payment_context(&h.pay_context(project_id, 1));
    assert_composed_hooks(&hooks, &response, Some(&h.buyback.address));
}

#[test]
fn test_only_bound_buyback_has_mint_permission() {
    let h = Harness::new();
    let project_id = h.deploy_with_pay_hooks(&two_hooks(&h));
    let stranger = Address::generate(&h.env);

    assert!(h
        .deployer
        .has_mint_permission_for(&project_id, &h.buyback.address));
    assert!(!h.deployer.has_mint_permission_for(&project_id, &stranger));
    assert!(!h
        .deployer
        .has_mint_permission_for(&(project_id + 1), &h.buyback.address));
}

#[test]
fn test_buyback_granted_platform_wide_mint_once() {
    let h = Harness::new();
    let mint = vec![&h.env, Permission::MintTokens.id()];

    h.deploy_with_pay_hooks(&two_hooks(&h));
    // Operator split grant plus the buyback mint grant.
    assert_eq!(h.permissions.write_count(), 2);
    assert!(h.permissions.has_permissions(
        &h.buyback.address,
        &h.deployer.address,
        &PLATFORM_WIDE,
        &mint
    ));

    h.deploy_with_pay_hooks(&two_hooks(&h));
    // Only the new operator split grant; the buyback already holds mint.
    assert_eq!(h.permissions.write_count(), 3);
    assert_eq!(
        h.permissions
            .permissions_of(&h.deployer.address, &h.buyback.address, &PLATFORM_WIDE)
            .len(),
        1
    );
}

#[test]
fn test_extra_hook_metadata_reaches_every_ruleset() {
    let h = Harness::new();
    let project_id = h.deploy_with_pay_hooks_and_metadata(&two_hooks(&h), 0b101);

    let rulesets = h.controller.rulesets_of(&project_id);
    assert_eq!(rulesets.len(), 2);
    for ruleset in rulesets.iter() {
        assert_eq!(ruleset.metadata.metadata, 0b101);
    }

    let basic = h.deploy_basic();
    for ruleset in h.controller.rulesets_of(&basic).iter() {
        assert_eq!(ruleset.metadata.metadata, 0);
    }
}
