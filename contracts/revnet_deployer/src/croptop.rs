//! # Croptop extension
//!
//! Lets anyone meeting the project's posting criteria publish collectibles to
//! it through the publishing proxy. The proxy gets exactly
//! [`PUBLISHER_PERMISSIONS`] on the new project and nothing else.

use soroban_sdk::Vec;

use crate::basic::{BasicDeployer, DeployRequest};
use crate::events;
use crate::interfaces::PublisherClient;
use crate::permissions::Permission;
use crate::types::{AllowedPost, Variant};
use crate::Error;

pub const PUBLISHER_PERMISSIONS: [Permission; 1] = [Permission::AdjustTiers];

pub struct CroptopExtension<'a> {
    base: BasicDeployer<'a>,
}

impl<'a> CroptopExtension<'a> {
    pub fn new(base: BasicDeployer<'a>) -> Self {
        Self { base }
    }

    pub fn deploy(
        &self,
        request: &DeployRequest,
        allowed_posts: &Vec<AllowedPost>,
    ) -> Result<u64, Error> {
        let env = self.base.env();
        let deployment = self.base.deploy(request, Variant::Croptop)?;
        let project_id = deployment.project_id;
        let publisher = self.base.collaborators().publisher.clone();

        if !allowed_posts.is_empty() {
            PublisherClient::new(env, &publisher).register_allowed_posts(
                &env.current_contract_address(),
                &project_id,
                allowed_posts,
            );
            events::emit_posts_allowed(env, project_id, publisher.clone(), allowed_posts.len());
        }

        self.base
            .permissions()
            .grant(&publisher, project_id, &PUBLISHER_PERMISSIONS);

        Ok(project_id)
    }
}
