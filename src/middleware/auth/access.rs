//! Bearer authentication for the protected API routes.
//!
//! Runs the auth gate (`bearer_auth::authenticate`) once per request and puts
//! the resolved `AuthenticatedUser` into request extensions, where handlers
//! pick it up through the `AuthUser` extractor.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::middleware::bearer_auth;
use crate::state::AppState;

/// Applies the gate to every route already registered on `router`.
///
/// `route_layer` keeps unmatched paths as 404 instead of 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8: State is only reachable from middleware via `from_fn_with_state`
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = bearer_auth::authenticate(req.headers(), state.verifier.as_ref()).await?;

    tracing::debug!(user_id = %user.id, "request authenticated");

    // middleware -> extractor handoff
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
