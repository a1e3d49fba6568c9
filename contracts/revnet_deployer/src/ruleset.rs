//! # Ruleset construction
//!
//! Turns a [`RevnetConfig`] into the rulesets the controller queues at launch.
//! Pure: no storage, no calls. Validation happens here so a bad schedule never
//! reaches the ledger.
//!
//! Stage to ruleset mapping:
//!
//! | Ruleset field         | Source                                   |
//! |-----------------------|------------------------------------------|
//! | `must_start_at_or_after` | `starts_at_or_after`                  |
//! | `duration`            | `ceiling_increase_frequency`             |
//! | `weight`              | `initial_issuance_rate`                  |
//! | `decay_rate`          | `ceiling_increase_percentage`            |
//! | `reserved_rate`       | `split_rate`                             |
//! | `redemption_rate`     | `MAX_RATE_BPS - floor_tax_intensity`     |

use soroban_sdk::{vec, Address, Env, Vec};

use crate::types::{
    RevnetConfig, RulesetConfig, RulesetMetadata, Split, SplitGroup, StageConfig, MAX_DECAY_RATE,
    MAX_RATE_BPS, RESERVED_TOKEN_GROUP, SPLITS_TOTAL_PERCENT,
};
use crate::Error;

/// Reject schedules the ledger would misinterpret.
pub fn validate(config: &RevnetConfig) -> Result<(), Error> {
    if config.stages.is_empty() {
        return Err(Error::EmptyStages);
    }
    if config.premint_token_amount < 0 {
        return Err(Error::InvalidPremint);
    }

    let mut previous_start: Option<u64> = None;
    for stage in config.stages.iter() {
        validate_stage(&stage)?;
        if let Some(previous) = previous_start {
            if stage.starts_at_or_after <= previous {
                return Err(Error::StageTimesMustIncrease);
            }
        }
        previous_start = Some(stage.starts_at_or_after);
    }
    Ok(())
}

fn validate_stage(stage: &StageConfig) -> Result<(), Error> {
    if stage.split_rate > MAX_RATE_BPS
        || stage.floor_tax_intensity > MAX_RATE_BPS
        || stage.ceiling_increase_percentage > MAX_DECAY_RATE
    {
        return Err(Error::InvalidRate);
    }
    if stage.initial_issuance_rate < 0 {
        return Err(Error::InvalidRate);
    }
    Ok(())
}

/// Build one ruleset per stage, every one consulting `data_hook`.
pub fn build(
    env: &Env,
    config: &RevnetConfig,
    data_hook: &Address,
    extra_metadata: u32,
) -> Result<Vec<RulesetConfig>, Error> {
    validate(config)?;

    let mut rulesets = Vec::new(env);
    for stage in config.stages.iter() {
        rulesets.push_back(RulesetConfig {
            must_start_at_or_after: stage.starts_at_or_after,
            duration: stage.ceiling_increase_frequency,
            weight: stage.initial_issuance_rate,
            decay_rate: stage.ceiling_increase_percentage,
            metadata: RulesetMetadata {
                reserved_rate: stage.split_rate,
                redemption_rate: MAX_RATE_BPS - stage.floor_tax_intensity,
                base_currency: config.base_currency,
                allow_owner_minting: true,
                use_data_hook_for_pay: true,
                use_data_hook_for_redeem: true,
                data_hook: data_hook.clone(),
                metadata: extra_metadata,
            },
        });
    }
    Ok(rulesets)
}

/// The default split group: all reserved tokens go to the boost operator.
pub fn boost_split_groups(env: &Env, operator: &Address) -> Vec<SplitGroup> {
    vec![
        env,
        SplitGroup {
            group_id: RESERVED_TOKEN_GROUP,
            splits: vec![
                env,
                Split {
                    beneficiary: operator.clone(),
                    percent: SPLITS_TOTAL_PERCENT,
                },
            ],
        },
    ]
}
