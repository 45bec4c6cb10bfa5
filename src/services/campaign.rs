// Campaign dispatch coordination
// The external workflow-automation dispatcher owns sending and retries; this
// service owns the three narrow state transitions it reports back through.

use subtle::ConstantTimeEq;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    db::DieselPool,
    models::campaign::{Campaign, CampaignCompletion, CampaignMessageLog, DeliveryStatus},
    utils::service_error::ServiceError,
};

pub struct CampaignService {
    pool: DieselPool,
    callback_secret: String,
}

impl CampaignService {
    pub fn new(pool: DieselPool, callback_secret: String) -> Self {
        Self {
            pool,
            callback_secret,
        }
    }

    /// Constant-time check of the dispatcher's shared secret. A missing
    /// secret is the same failure as a wrong one.
    pub fn verify_secret(&self, provided: Option<&str>) -> Result<(), ServiceError> {
        let provided = provided.unwrap_or("");
        let matches: bool = provided
            .as_bytes()
            .ct_eq(self.callback_secret.as_bytes())
            .into();

        if matches {
            Ok(())
        } else {
            warn!("Callback rejected: invalid shared secret");
            Err(ServiceError::Unauthorized)
        }
    }

    /// Apply one delivery result: update the message log, then bump the
    /// matching campaign counter. The counter increment runs only after the
    /// log update succeeded; an increment failure is logged but does not fail
    /// the callback, since the dispatcher would retry and double-write the
    /// log. The message log stays authoritative for reconciliation.
    pub async fn record_delivery(
        &self,
        log_id: Uuid,
        campaign_id: Uuid,
        status: DeliveryStatus,
        error_message: Option<String>,
    ) -> Result<(), ServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ServiceError::DatabaseError(e.to_string()))?;

        CampaignMessageLog::record_delivery(&mut conn, log_id, status, error_message)
            .await
            .map_err(|e| {
                error!("Error updating message log {}: {}", log_id, e);
                ServiceError::DatabaseError("Failed to update log".to_string())
            })?;

        let increment = match status {
            DeliveryStatus::Sent => Campaign::increment_sent(&mut conn, campaign_id).await,
            DeliveryStatus::Failed => Campaign::increment_failed(&mut conn, campaign_id).await,
        };

        if let Err(e) = increment {
            error!(
                "Error incrementing {} count for campaign {}: {}",
                status.as_str(),
                campaign_id,
                e
            );
        }

        info!("Log {} updated to {}", log_id, status.as_str());
        Ok(())
    }

    /// Current lifecycle state for the dispatcher's polling loop
    pub async fn campaign_status(&self, campaign_id: Uuid) -> Result<Campaign, ServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ServiceError::DatabaseError(e.to_string()))?;

        match Campaign::find_by_id(&mut conn, campaign_id).await? {
            Some(campaign) => Ok(campaign),
            None => {
                warn!("Campaign not found: {}", campaign_id);
                Err(ServiceError::CampaignNotFound)
            },
        }
    }

    /// Finalize a campaign with the dispatcher's totals. Last write wins.
    pub async fn complete_campaign(
        &self,
        campaign_id: Uuid,
        completion: CampaignCompletion,
    ) -> Result<(), ServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ServiceError::DatabaseError(e.to_string()))?;

        Campaign::complete(&mut conn, campaign_id, &completion)
            .await
            .map_err(|e| {
                error!("Error updating campaign {}: {}", campaign_id, e);
                ServiceError::DatabaseError("Failed to update campaign".to_string())
            })?;

        info!("Campaign {} updated to {}", campaign_id, completion.status);
        Ok(())
    }
}
