/*
 * Responsibility
 * - One module per table group, each a set of free functions over `&PgPool`
 * - Every query touching user data is scoped by `profile_id`
 */
pub mod activity_repo;
pub mod attendance_repo;
pub mod error;
pub mod health_repo;
pub mod profile_repo;
pub mod report_repo;
pub mod schedule_repo;
pub mod seed_repo;
