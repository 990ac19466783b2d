/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - db pool, identity service handles, runtime environment
 * - Cheap to clone (everything inside is Arc/pool-backed)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppEnv;
use crate::services::identity::{TokenVerifier, UserAdmin};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub verifier: Arc<dyn TokenVerifier>,
    pub users: Arc<dyn UserAdmin>,
    pub app_env: AppEnv,
}

impl AppState {
    pub fn new(
        db: PgPool,
        verifier: Arc<dyn TokenVerifier>,
        users: Arc<dyn UserAdmin>,
        app_env: AppEnv,
    ) -> Self {
        Self {
            db,
            verifier,
            users,
            app_env,
        }
    }
}
