// Library exports for the Navalha backend
// This file exposes modules and functions for library consumers

pub mod app;
pub mod app_config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod utils;

use std::sync::Arc;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, ConfigError, CONFIG};
pub use db::{DieselDatabaseConfig, DieselPool};
pub use middleware::auth_middleware;
pub use middleware::AuthenticatedUser;
pub use models::{Campaign, CampaignMessageLog, Company, DeliveryStatus, PaymentMethod, PlanStatus};
pub use services::{
    AccessDecision, AccountSnapshot, CampaignService, GateContext, GateOutcome,
    EXEMPT_PATH_PREFIXES,
};
pub use utils::ServiceError;

// Re-export handler route builders
pub use handlers::{account_routes, barber_routes, campaign_routes, payment_routes};

// Library initialization function for external consumers
pub async fn initialize_app_state() -> Result<AppState, Box<dyn std::error::Error + Send + Sync>> {
    use tracing::info;

    // Load environment
    dotenv::dotenv().ok();

    // Initialize config (fails fast if required secrets are missing)
    let config = app_config::config();

    // Initialize database pool
    info!("Initializing database pool...");
    let db_config = db::DieselDatabaseConfig::default();
    let diesel_pool = db::create_diesel_pool(db_config).await?;

    // Run migrations if enabled
    if migrations::should_run_migrations() {
        info!("Running embedded migrations...");
        migrations::run_migrations()
            .await
            .map_err(|e| format!("Migration failed: {}", e))?;
    }

    let campaign_service = Arc::new(CampaignService::new(
        diesel_pool.clone(),
        config.callback_secret.clone(),
    ));

    Ok(AppState {
        config: Arc::new(config.clone()),
        diesel_pool,
        campaign_service,
    })
}

/// Build the full application router
pub fn build_router(state: AppState) -> axum::Router {
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use tower_http::trace::TraceLayer;

    // Routes behind auth AND the subscription gate
    let gated = axum::Router::new()
        .nest("/barbers", barber_routes())
        .nest("/payments", payment_routes())
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::subscription_guard,
        ))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    // Routes behind auth only: the billing panel must stay reachable with an
    // expired subscription, mirroring the exempt paths
    let account = axum::Router::new()
        .nest("/account", account_routes())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    axum::Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/campaigns", campaign_routes())
        .nest("/api/v1", gated)
        .nest("/api/v1", account)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Health check handler
pub async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    use axum::http::StatusCode;
    use axum::Json;

    let timestamp = chrono::Utc::now().to_rfc3339();

    let (overall_healthy, postgres_health) = match db::check_diesel_health(&state.diesel_pool).await
    {
        Ok(_) => (
            true,
            serde_json::json!({
                "status": "healthy",
                "error": null
            }),
        ),
        Err(e) => (
            false,
            serde_json::json!({
                "status": "unhealthy",
                "error": format!("Database connection failed: {}", e)
            }),
        ),
    };

    let response = serde_json::json!({
        "status": if overall_healthy { "healthy" } else { "degraded" },
        "service": "navalha-backend",
        "timestamp": timestamp,
        "components": {
            "postgresql": postgres_health
        }
    });

    if overall_healthy {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
