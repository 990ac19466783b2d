use sqlx::PgPool;

use crate::repos::error::RepoResult;

/// Row count of `profiles`; doubles as a connectivity check.
pub async fn count_profiles(db: &PgPool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(db)
        .await?;

    Ok(count)
}
