// Account/billing panel handlers
// Read-only subscription snapshot consumed by the billing panel and the
// client-side guard. The same gate decision the middleware enforces is
// returned here so the UI can render the right screen.

use axum::{
    extract::{Extension, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::{Company, UserRole},
    services::access_gate::{self, AccountSnapshot, GateContext},
};

#[derive(Debug, Deserialize)]
pub struct SubscriptionQuery {
    /// SPA route the caller wants the decision for; defaults to the root
    #[serde(default)]
    pub path: Option<String>,
}

/// Subscription snapshot plus the gate decision for a path
/// GET /api/v1/account/subscription
pub async fn subscription_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<SubscriptionQuery>,
) -> impl IntoResponse {
    let path = query.path.as_deref().unwrap_or("/");

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Subscription snapshot: connection checkout failed: {}", e);
            return Json(fail_open_body(path)).into_response();
        },
    };

    let is_super_admin = match UserRole::has_super_admin(&mut conn, auth_user.user_id).await {
        Ok(flag) => flag,
        Err(e) => {
            warn!("Subscription snapshot: role lookup failed: {}", e);
            return Json(fail_open_body(path)).into_response();
        },
    };

    let company = match Company::find_by_owner(&mut conn, auth_user.user_id).await {
        Ok(company) => company,
        Err(e) => {
            warn!("Subscription snapshot: company lookup failed: {}", e);
            return Json(fail_open_body(path)).into_response();
        },
    };

    let ctx = GateContext {
        session_present: true,
        is_super_admin,
        account: company.as_ref().map(AccountSnapshot::from),
    };
    let outcome = access_gate::evaluate(&ctx, path, chrono::Utc::now());

    Json(json!({
        "plan_status": company.as_ref().map(|c| c.plan_status.clone()),
        "is_partner": company.as_ref().map(|c| c.is_partner).unwrap_or(false),
        "is_blocked": company.as_ref().map(|c| c.is_blocked).unwrap_or(false),
        "is_super_admin": is_super_admin,
        "days_remaining": outcome.days_remaining,
        "decision": outcome.decision,
        "path": path,
    }))
    .into_response()
}

/// Reads failed: surface the fail-open pass-through the gate would apply
fn fail_open_body(path: &str) -> serde_json::Value {
    let outcome = access_gate::fail_open();
    json!({
        "plan_status": null,
        "is_partner": false,
        "is_blocked": false,
        "is_super_admin": false,
        "days_remaining": outcome.days_remaining,
        "decision": outcome.decision,
        "path": path,
    })
}
