extern crate std;

use soroban_sdk::{
    symbol_short, testutils::Events, vec, Address, Env, IntoVal, String, Symbol, TryIntoVal, Val,
    Vec,
};

use crate::events::{PayHooksRegistered, PermissionSet, PostsAllowed, RevnetDeployed, VestingConfigured};
use crate::permissions::{Permission, PLATFORM_WIDE};
use crate::test_support::{Harness, PREMINT};
use crate::types::{AllowedPost, VestingActual, VestingOptions, VestingPreset};
use crate::{Variant, VestingStatus};

/// Last event published by `contract` whose topics are exactly `topics`.
fn last_event(env: &Env, contract: &Address, topics: Vec<Val>) -> Val {
    let mut found = None;
    for (address, event_topics, data) in env.events().all().iter() {
        if &address == contract && event_topics == topics {
            found = Some(data);
        }
    }
    found.expect("No matching event found")
}

fn topics(env: &Env, name: Symbol, id: u64) -> Vec<Val> {
    vec![env, name.into_val(env), id.into_val(env)]
}

#[test]
fn test_revnet_deployed_event() {
    let h = Harness::new();
    let project_id = h.deploy_basic();

    let data = last_event(
        &h.env,
        &h.deployer.address,
        topics(&h.env, symbol_short!("deployed"), project_id),
    );
    let event: RevnetDeployed = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        RevnetDeployed {
            project_id,
            variant: Variant::Basic,
            operator: h.operator.clone(),
            token: h.controller.address.clone(),
            data_hook: h.buyback.address.clone(),
        }
    );
}

#[test]
fn test_operator_permission_event() {
    let h = Harness::new();
    let project_id = h.deploy_basic();

    let data = last_event(
        &h.env,
        &h.deployer.address,
        topics(&h.env, symbol_short!("perm_set"), project_id),
    );
    let event: PermissionSet = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        PermissionSet {
            operator: h.operator.clone(),
            scope_id: project_id,
            permission_ids: vec![&h.env, Permission::SetSplitGroups.id()],
            written: true,
        }
    );
}

#[test]
fn test_pay_hooks_registered_event() {
    let h = Harness::new();
    let hooks = vec![&h.env, h.hook(1), h.hook(2)];
    let project_id = h.deploy_with_pay_hooks(&hooks);

    let data = last_event(
        &h.env,
        &h.deployer.address,
        topics(&h.env, symbol_short!("pay_hooks"), project_id),
    );
    let event: PayHooksRegistered = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        PayHooksRegistered {
            project_id,
            hook_count: 2,
            buyback_hook: h.buyback.address.clone(),
        }
    );
}

#[test]
fn test_reused_buyback_grant_is_reported_as_skipped() {
    let h = Harness::new();
    h.deploy_with_pay_hooks(&Vec::new(&h.env));
    h.deploy_with_pay_hooks(&Vec::new(&h.env));

    let data = last_event(
        &h.env,
        &h.deployer.address,
        topics(&h.env, symbol_short!("perm_set"), PLATFORM_WIDE),
    );
    let event: PermissionSet = data.try_into_val(&h.env).unwrap();
    assert_eq!(event.operator, h.buyback.address);
    assert_eq!(event.permission_ids, vec![&h.env, Permission::MintTokens.id()]);
    assert!(!event.written);
}

#[test]
fn test_posts_allowed_event() {
    let h = Harness::new();
    let posts = vec![
        &h.env,
        AllowedPost {
            category: 4,
            minimum_price: 1,
            minimum_total_supply: 1,
            maximum_total_supply: 10,
            allowed_addresses: Vec::new(&h.env),
        },
    ];
    let project_id = h.deployer.deploy_with_publishing(
        &h.name(),
        &h.symbol(),
        &h.uri(),
        &h.config(PREMINT),
        &h.terminals(),
        &h.buyback_config(),
        &posts,
    );

    let data = last_event(
        &h.env,
        &h.deployer.address,
        topics(&h.env, symbol_short!("posts"), project_id),
    );
    let event: PostsAllowed = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        PostsAllowed {
            project_id,
            publisher: h.publisher.address.clone(),
            post_count: 1,
        }
    );
}

#[test]
fn test_vesting_configured_event() {
    let h = Harness::new();
    let options = VestingOptions {
        label: String::from_str(&h.env, "team"),
        revocable: true,
        presets: vec![
            &h.env,
            VestingPreset {
                id: 3,
                cliff: 0,
                duration: 100,
                period: 10,
            },
        ],
        actuals: vec![
            &h.env,
            VestingActual {
                recipient: h.operator.clone(),
                preset_id: 3,
                amount: PREMINT / 2,
                start: 0,
            },
        ],
    };
    let project_id = h.deployer.deploy_with_vesting(
        &h.name(),
        &h.symbol(),
        &h.uri(),
        &h.config(PREMINT),
        &h.terminals(),
        &h.buyback_config(),
        &options,
    );

    let data = last_event(
        &h.env,
        &h.deployer.address,
        topics(&h.env, symbol_short!("vesting"), project_id),
    );
    let event: VestingConfigured = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event,
        VestingConfigured {
            project_id,
            instance: h.unlocker.address.clone(),
            recipient: h.operator.clone(),
            amount: PREMINT / 2,
            status: VestingStatus::OwnershipTransferred,
        }
    );
}
