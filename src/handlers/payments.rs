// Point-of-sale payment capture handlers
// Records how a service was settled; the external billing provider owns the
// actual money movement.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::{payment::CreatePaymentRequest, Company, Payment},
    utils::service_error::ServiceError,
};

/// Capture a payment
/// POST /api/v1/payments
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => return ServiceError::DatabaseError(e.to_string()).into_response(),
    };

    let company = match Company::find_by_owner(&mut conn, auth_user.user_id).await {
        Ok(Some(company)) => company,
        Ok(None) => return ServiceError::NotFound.into_response(),
        Err(e) => return ServiceError::from(e).into_response(),
    };

    let new_payment = match request.resolve(company.id) {
        Ok(payment) => payment,
        Err(reason) => return ServiceError::ValidationError(reason).into_response(),
    };

    match Payment::create(&mut conn, new_payment).await {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// List the company's captures, newest first
/// GET /api/v1/payments
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> impl IntoResponse {
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => return ServiceError::DatabaseError(e.to_string()).into_response(),
    };

    let company = match Company::find_by_owner(&mut conn, auth_user.user_id).await {
        Ok(Some(company)) => company,
        Ok(None) => return ServiceError::NotFound.into_response(),
        Err(e) => return ServiceError::from(e).into_response(),
    };

    match Payment::list_for_company(&mut conn, company.id).await {
        Ok(payments) => Json(payments).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}
