// Marketing campaign rows and per-message delivery logs.
// Campaigns and their logs are created by an external process; this backend
// only transitions status and counters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{campaign_message_logs, marketing_campaigns};

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, AsChangeset,
)]
#[diesel(table_name = marketing_campaigns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Campaign {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub status: String,
    pub sent_count: i32,
    pub failed_count: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = campaign_message_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CampaignMessageLog {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub status: String,
    pub error_message: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Delivery result reported by the dispatcher for a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(DeliveryStatus::Sent),
            "failed" => Some(DeliveryStatus::Failed),
            _ => None,
        }
    }
}

/// The dispatcher keeps polling a campaign while it reports `processing`;
/// anything else is terminal from its point of view.
pub const CAMPAIGN_STATUS_PROCESSING: &str = "processing";

impl Campaign {
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        campaign_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::marketing_campaigns::dsl;

        dsl::marketing_campaigns
            .find(campaign_id)
            .first::<Self>(conn)
            .await
            .optional()
    }

    pub fn should_continue(&self) -> bool {
        self.status == CAMPAIGN_STATUS_PROCESSING
    }

    /// Atomic `sent_count = sent_count + 1`. SQL-level arithmetic, never
    /// read-modify-write: concurrent callbacks for the same campaign must not
    /// lose updates.
    pub async fn increment_sent(
        conn: &mut AsyncPgConnection,
        campaign_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::marketing_campaigns::dsl;

        diesel::update(dsl::marketing_campaigns.find(campaign_id))
            .set(dsl::sent_count.eq(dsl::sent_count + 1))
            .execute(conn)
            .await
    }

    /// Atomic `failed_count = failed_count + 1`.
    pub async fn increment_failed(
        conn: &mut AsyncPgConnection,
        campaign_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::marketing_campaigns::dsl;

        diesel::update(dsl::marketing_campaigns.find(campaign_id))
            .set(dsl::failed_count.eq(dsl::failed_count + 1))
            .execute(conn)
            .await
    }

    /// Finalize a campaign: status and `completed_at` are always written,
    /// counters only when the dispatcher supplied final values. Last write
    /// wins.
    pub async fn complete(
        conn: &mut AsyncPgConnection,
        campaign_id: Uuid,
        completion: &CampaignCompletion,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::marketing_campaigns::dsl;

        diesel::update(dsl::marketing_campaigns.find(campaign_id))
            .set(completion)
            .execute(conn)
            .await
    }
}

/// Partial update applied by the completion endpoint. `None` counter fields
/// are left untouched by AsChangeset.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = marketing_campaigns)]
pub struct CampaignCompletion {
    pub status: String,
    pub completed_at: DateTime<Utc>,
    pub sent_count: Option<i32>,
    pub failed_count: Option<i32>,
}

impl CampaignMessageLog {
    /// Record the delivery result for one message: status, error message
    /// (cleared when absent), and `sent_at` stamped with the callback time.
    pub async fn record_delivery(
        conn: &mut AsyncPgConnection,
        log_id: Uuid,
        status: DeliveryStatus,
        error_message: Option<String>,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::campaign_message_logs::dsl;

        diesel::update(dsl::campaign_message_logs.find(log_id))
            .set((
                dsl::status.eq(status.as_str()),
                dsl::error_message.eq(error_message),
                dsl::sent_at.eq(Some(Utc::now())),
            ))
            .execute(conn)
            .await
    }
}
