// Staff (barber) management handlers
// All rows are company-scoped through the authenticated owner; a caller can
// never see or touch another company's staff.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        barber::{Barber, CreateBarberRequest, NewBarber, UpdateBarberRequest},
        Company,
    },
    utils::service_error::ServiceError,
};

async fn company_for(
    state: &AppState,
    auth_user: &AuthenticatedUser,
) -> Result<Company, ServiceError> {
    let mut conn = state
        .diesel_pool
        .get()
        .await
        .map_err(|e| ServiceError::DatabaseError(e.to_string()))?;

    Company::find_by_owner(&mut conn, auth_user.user_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Create a barber
/// POST /api/v1/barbers
pub async fn create_barber(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBarberRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.validate() {
        return ServiceError::from(e).into_response();
    }

    let company = match company_for(&state, &auth_user).await {
        Ok(company) => company,
        Err(e) => return e.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => return ServiceError::DatabaseError(e.to_string()).into_response(),
    };

    let new_barber = NewBarber {
        company_id: company.id,
        name: request.name,
        phone: request.phone,
        commission_rate: request.commission_rate.unwrap_or(0),
        is_active: request.is_active.unwrap_or(true),
    };

    match Barber::create(&mut conn, new_barber).await {
        Ok(barber) => (StatusCode::CREATED, Json(barber)).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// List the company's barbers
/// GET /api/v1/barbers
pub async fn list_barbers(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> impl IntoResponse {
    let company = match company_for(&state, &auth_user).await {
        Ok(company) => company,
        Err(e) => return e.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => return ServiceError::DatabaseError(e.to_string()).into_response(),
    };

    match Barber::list_for_company(&mut conn, company.id).await {
        Ok(barbers) => Json(barbers).into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// Get one barber
/// GET /api/v1/barbers/:id
pub async fn get_barber(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(barber_id): Path<Uuid>,
) -> impl IntoResponse {
    let company = match company_for(&state, &auth_user).await {
        Ok(company) => company,
        Err(e) => return e.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => return ServiceError::DatabaseError(e.to_string()).into_response(),
    };

    match Barber::find_scoped(&mut conn, barber_id, company.id).await {
        Ok(Some(barber)) => Json(barber).into_response(),
        Ok(None) => ServiceError::NotFound.into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// Partially update a barber
/// PUT /api/v1/barbers/:id
pub async fn update_barber(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(barber_id): Path<Uuid>,
    Json(request): Json<UpdateBarberRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.validate() {
        return ServiceError::from(e).into_response();
    }

    let company = match company_for(&state, &auth_user).await {
        Ok(company) => company,
        Err(e) => return e.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => return ServiceError::DatabaseError(e.to_string()).into_response(),
    };

    match Barber::update_scoped(&mut conn, barber_id, company.id, &request).await {
        Ok(Some(barber)) => Json(barber).into_response(),
        Ok(None) => ServiceError::NotFound.into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}

/// Deactivate a barber (soft delete)
/// DELETE /api/v1/barbers/:id
pub async fn delete_barber(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(barber_id): Path<Uuid>,
) -> impl IntoResponse {
    let company = match company_for(&state, &auth_user).await {
        Ok(company) => company,
        Err(e) => return e.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => return ServiceError::DatabaseError(e.to_string()).into_response(),
    };

    match Barber::deactivate_scoped(&mut conn, barber_id, company.id).await {
        Ok(0) => ServiceError::NotFound.into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ServiceError::from(e).into_response(),
    }
}
