use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::companies;

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, AsChangeset,
)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Company {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    pub plan_status: String,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub partner_ends_at: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub is_partner: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subscription state of an account. Exactly one holds at a time;
/// `trial_ends_at` is meaningful only for Trial, `partner_ends_at` only for
/// Partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStatus {
    Trial,
    Active,
    Cancelled,
    Overdue,
    Partner,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Trial => "trial",
            PlanStatus::Active => "active",
            PlanStatus::Cancelled => "cancelled",
            PlanStatus::Overdue => "overdue",
            PlanStatus::Partner => "partner",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "trial" => Some(PlanStatus::Trial),
            "active" => Some(PlanStatus::Active),
            "cancelled" => Some(PlanStatus::Cancelled),
            "overdue" => Some(PlanStatus::Overdue),
            "partner" => Some(PlanStatus::Partner),
            _ => None,
        }
    }
}

impl Company {
    pub async fn find_by_owner(
        conn: &mut AsyncPgConnection,
        owner_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::companies::dsl;

        dsl::companies
            .filter(dsl::owner_user_id.eq(owner_id))
            .first::<Self>(conn)
            .await
            .optional()
    }

    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
    ) -> Result<Self, diesel::result::Error> {
        use crate::schema::companies::dsl;

        dsl::companies.find(company_id).first::<Self>(conn).await
    }

    pub fn plan_status(&self) -> Option<PlanStatus> {
        PlanStatus::from_string(&self.plan_status)
    }
}
