/// Factory: build the identity client from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::identity::{GoTrueClient, IdentityError};

pub fn build_identity_client(config: &Config) -> Result<Arc<GoTrueClient>, IdentityError> {
    let client = GoTrueClient::new(
        config.supabase_url.clone(),
        &config.supabase_service_role_key,
    )?;

    Ok(Arc::new(client))
}
