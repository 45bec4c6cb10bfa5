// Server-side subscription enforcement
// The storefront runs the same gate client-side for rendering, but
// client-side gating is bypassable, so every protected route re-evaluates it
// here at the data-access layer.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::{Company, UserRole},
    services::access_gate::{self, AccessDecision, AccountSnapshot, GateContext, GateOutcome},
    utils::service_error::ServiceError,
};

/// Gate middleware for subscription-protected routes. Runs after
/// auth_middleware, so a missing AuthenticatedUser means an unauthenticated
/// scope and the gate defers (step 1 of the algorithm).
///
/// The path fed to the gate is the request URI only, never a client header:
/// an expired account must not be able to lift the gate by claiming to be on
/// an exempt SPA route. Billing endpoints stay reachable because they are
/// mounted outside this middleware, not because of anything the caller sends.
pub async fn subscription_guard(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let auth_user = request.extensions().get::<AuthenticatedUser>().cloned();

    let path = request.uri().path().to_string();

    let outcome = match &auth_user {
        Some(user) => evaluate_for_user(&state, user, &path).await,
        None => access_gate::fail_open(),
    };

    match outcome.decision {
        AccessDecision::PassThrough => next.run(request).await,
        AccessDecision::Blocked => ServiceError::AccountBlocked.into_response(),
        AccessDecision::TrialExpiredRedirect => ServiceError::TrialExpired.into_response(),
    }
}

/// Load roles and the company row, then run the pure gate. Every read error
/// is logged and fails open: access is never denied because the backend had
/// a transient problem.
pub async fn evaluate_for_user(
    state: &AppState,
    user: &AuthenticatedUser,
    path: &str,
) -> GateOutcome {
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Subscription gate: connection checkout failed, failing open: {}", e);
            return access_gate::fail_open();
        },
    };

    let is_super_admin = match UserRole::has_super_admin(&mut conn, user.user_id).await {
        Ok(flag) => flag,
        Err(e) => {
            warn!("Subscription gate: role lookup failed, failing open: {}", e);
            return access_gate::fail_open();
        },
    };

    let account = match Company::find_by_owner(&mut conn, user.user_id).await {
        Ok(company) => company.as_ref().map(AccountSnapshot::from),
        Err(e) => {
            warn!("Subscription gate: company lookup failed, failing open: {}", e);
            return access_gate::fail_open();
        },
    };

    let ctx = GateContext {
        session_present: true,
        is_super_admin,
        account,
    };

    access_gate::evaluate(&ctx, path, chrono::Utc::now())
}
