//! # Vesting extension
//!
//! Routes the premint through a vesting instance instead of handing it to the
//! boost operator outright.
//!
//! The options are checked before anything touches the ledger: exactly one
//! preset, exactly one actual, the actual's recipient is the boost operator,
//! it references the preset and its amount is positive and covered by the
//! premint.
//!
//! Once the project and token exist the factory creates an instance owned by
//! this contract, the premint is minted to it, it is seeded, and ownership
//! moves to the boost operator. The hand-over is read back from the instance;
//! if it did not take, the whole deployment fails. The per-project
//! [`VestingRecord`] only ever holds [`VestingStatus::OwnershipTransferred`].

use soroban_sdk::{Address, Env};

use crate::basic::{BasicDeployer, DeployRequest};
use crate::events;
use crate::interfaces::{UnlockerClient, VestingFactoryClient};
use crate::storage;
use crate::types::{Variant, VestingActual, VestingOptions, VestingRecord, VestingStatus};
use crate::Error;

/// Check the options against the boost operator and premint. Returns the single actual.
pub fn validate_options(
    options: &VestingOptions,
    operator: &Address,
    premint_token_amount: i128,
) -> Result<VestingActual, Error> {
    if options.presets.len() != 1 {
        return Err(Error::InvalidPresetCount);
    }
    if options.actuals.len() != 1 {
        return Err(Error::InvalidActualCount);
    }

    let preset = options.presets.get(0).ok_or(Error::InvalidPresetCount)?;
    let actual = options.actuals.get(0).ok_or(Error::InvalidActualCount)?;

    if actual.recipient != *operator {
        return Err(Error::RecipientNotOperator);
    }
    if actual.preset_id != preset.id {
        return Err(Error::UnknownPreset);
    }
    if actual.amount <= 0 || actual.amount > premint_token_amount {
        return Err(Error::InvalidVestingAmount);
    }
    Ok(actual)
}

pub struct VestingExtension<'a> {
    base: BasicDeployer<'a>,
}

impl<'a> VestingExtension<'a> {
    pub fn new(base: BasicDeployer<'a>) -> Self {
        Self { base }
    }

    pub fn deploy(&self, request: &DeployRequest, options: &VestingOptions) -> Result<u64, Error> {
        let env = self.base.env();
        let operator = request.operator().clone();
        let actual = validate_options(options, &operator, request.config.premint_token_amount)?;

        let factory = VestingFactoryClient::new(env, &self.base.collaborators().vesting_factory);
        let deployment = self.base.deploy_with(
            request,
            Variant::Vesting,
            &request.buyback.hook,
            0,
            |_, token| {
                Ok(factory.create_instance(
                    &env.current_contract_address(),
                    token,
                    &options.label,
                    &options.revocable,
                ))
            },
        )?;
        let project_id = deployment.project_id;

        let mut record = VestingRecord {
            instance: deployment.premint_beneficiary,
            recipient: actual.recipient,
            amount: actual.amount,
            status: VestingStatus::Uninitialized,
        };
        self.seed(env, &mut record, options);
        self.hand_over(env, &mut record, &operator)?;

        storage::save_vesting(env, project_id, &record);
        events::emit_vesting_configured(env, project_id, &record);
        Ok(project_id)
    }

    fn seed(&self, env: &Env, record: &mut VestingRecord, options: &VestingOptions) {
        let unlocker = UnlockerClient::new(env, &record.instance);
        unlocker.seed_presets(&options.presets);
        unlocker.seed_actuals(&options.actuals);
        record.status = VestingStatus::Seeded;
    }

    fn hand_over(
        &self,
        env: &Env,
        record: &mut VestingRecord,
        operator: &Address,
    ) -> Result<(), Error> {
        let unlocker = UnlockerClient::new(env, &record.instance);
        unlocker.transfer_ownership(operator);
        if unlocker.owner() != *operator {
            return Err(Error::VestingOwnershipNotTransferred);
        }
        record.status = VestingStatus::OwnershipTransferred;
        Ok(())
    }
}
