// HTTP handlers and route builders

pub mod account;
pub mod barbers;
pub mod campaigns;
pub mod payments;

use crate::app::AppState;
use crate::middleware::callback_cors_layer;
use axum::{
    routing::{get, post},
    Router,
};

// Campaign dispatch callback routes (shared-secret auth, permissive CORS)
pub fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/callback", post(campaigns::campaign_callback))
        .route(
            "/status",
            get(campaigns::check_campaign_status).post(campaigns::check_campaign_status),
        )
        .route("/complete", post(campaigns::update_campaign_status))
        .layer(callback_cors_layer())
}

// Staff management routes
pub fn barber_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(barbers::create_barber).get(barbers::list_barbers))
        .route(
            "/{id}",
            get(barbers::get_barber)
                .put(barbers::update_barber)
                .delete(barbers::delete_barber),
        )
}

// Point-of-sale payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        post(payments::create_payment).get(payments::list_payments),
    )
}

// Account/billing panel routes
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/subscription", get(account::subscription_status))
}
