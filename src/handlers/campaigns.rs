// Campaign dispatch callback endpoints
// Called by the external workflow-automation dispatcher, authenticated with a
// shared secret. Three narrow operations: per-message delivery results, the
// polling status query, and final completion totals.

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    app::AppState,
    models::campaign::{CampaignCompletion, DeliveryStatus},
    utils::service_error::ServiceError,
};

#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    pub log_id: Option<String>,
    pub campaign_id: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub secret: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub campaign_id: Option<String>,
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub campaign_id: Option<String>,
    pub status: Option<String>,
    pub sent_count: Option<i32>,
    pub failed_count: Option<i32>,
    pub secret: Option<String>,
}

fn parse_uuid(value: Option<&str>) -> Result<Uuid, ServiceError> {
    value
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or(ServiceError::MissingFields)
}

/// Delivery result for a single campaign message
/// POST /api/v1/campaigns/callback
pub async fn campaign_callback(
    State(state): State<AppState>,
    Json(request): Json<CallbackRequest>,
) -> impl IntoResponse {
    let service = &state.campaign_service;

    if let Err(e) = service.verify_secret(request.secret.as_deref()) {
        return e.into_response();
    }

    let log_id = match parse_uuid(request.log_id.as_deref()) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let campaign_id = match parse_uuid(request.campaign_id.as_deref()) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let status = match request.status.as_deref().and_then(DeliveryStatus::from_string) {
        Some(status) => status,
        None => return ServiceError::MissingFields.into_response(),
    };

    info!("Callback received for log {}, status: {}", log_id, status.as_str());

    match service
        .record_delivery(log_id, campaign_id, status, request.error_message)
        .await
    {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Campaign lifecycle status for the dispatcher's polling loop. Accepts GET
/// with query parameters or POST with a JSON body; query values win when both
/// are present.
/// GET|POST /api/v1/campaigns/status
pub async fn check_campaign_status(
    State(state): State<AppState>,
    Query(query): Query<StatusParams>,
    body: Bytes,
) -> impl IntoResponse {
    // Query string first, JSON body as fallback; GET requests usually carry
    // no body at all, so body parsing is lenient.
    let body: StatusParams = serde_json::from_slice(&body).unwrap_or_default();
    let campaign_id = query.campaign_id.or(body.campaign_id);
    let secret = query.secret.or(body.secret);

    let service = &state.campaign_service;

    if let Err(e) = service.verify_secret(secret.as_deref()) {
        return e.into_response();
    }

    let campaign_id = match campaign_id.as_deref().and_then(|v| Uuid::parse_str(v).ok()) {
        Some(id) => id,
        None => {
            return ServiceError::ValidationError("campaign_id is required".to_string())
                .into_response()
        },
    };

    match service.campaign_status(campaign_id).await {
        Ok(campaign) => {
            info!("Campaign {} status: {}", campaign_id, campaign.status);
            Json(json!({
                "status": campaign.status,
                "should_continue": campaign.should_continue(),
            }))
            .into_response()
        },
        Err(e) => e.into_response(),
    }
}

/// Final totals and terminal status from the dispatcher
/// POST /api/v1/campaigns/complete
pub async fn update_campaign_status(
    State(state): State<AppState>,
    Json(request): Json<CompleteRequest>,
) -> impl IntoResponse {
    let service = &state.campaign_service;

    if let Err(e) = service.verify_secret(request.secret.as_deref()) {
        return e.into_response();
    }

    let campaign_id = match parse_uuid(request.campaign_id.as_deref()) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let status = match request.status {
        Some(ref status) if !status.is_empty() => status.clone(),
        _ => return ServiceError::MissingFields.into_response(),
    };

    info!("Update campaign status: {} -> {}", campaign_id, status);

    let completion = CampaignCompletion {
        status,
        completed_at: chrono::Utc::now(),
        sent_count: request.sent_count,
        failed_count: request.failed_count,
    };

    match service.complete_campaign(campaign_id, completion).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => e.into_response(),
    }
}
