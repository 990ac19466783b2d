/*
 * Responsibility
 * - URL layout under /api
 * - Public: health check, dev seeding
 * - Everything else sits behind the bearer-token gate (route_layer)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::{middleware::auth::access, state::AppState};

use crate::api::handlers::{
    activities::{create_activity, delete_activity, get_activity, list_activities, update_activity},
    attendance::{list_attendance, mark_attendance},
    health::database_health,
    profile::{get_profile, update_profile},
    reports::{create_report, delete_report, get_report, list_reports, update_report},
    schedule::{
        create_schedule_item, delete_schedule_item, get_schedule_item, list_schedule,
        update_schedule_item,
    },
    seed::seed_demo_data,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health/supabase", get(database_health))
        .route("/dev/seed", post(seed_demo_data));

    let protected = Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/attendance", get(list_attendance).post(mark_attendance))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/reports", get(list_reports).post(create_report))
        .route(
            "/reports/{id}",
            get(get_report).put(update_report).delete(delete_report),
        )
        .route("/schedule", get(list_schedule).post(create_schedule_item))
        .route(
            "/schedule/{id}",
            get(get_schedule_item)
                .put(update_schedule_item)
                .delete(delete_schedule_item),
        );

    public.merge(access::apply(protected, state))
}
