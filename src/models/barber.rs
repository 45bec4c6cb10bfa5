use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::schema::barbers;

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, AsChangeset,
)]
#[diesel(table_name = barbers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Barber {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub commission_rate: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = barbers)]
pub struct NewBarber {
    pub company_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub commission_rate: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBarberRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(max = 30, message = "Phone is too long"))]
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Commission must be 0-100"))]
    pub commission_rate: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, AsChangeset)]
#[diesel(table_name = barbers)]
pub struct UpdateBarberRequest {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(max = 30, message = "Phone is too long"))]
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Commission must be 0-100"))]
    pub commission_rate: Option<i32>,
    pub is_active: Option<bool>,
}

impl Barber {
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_barber: NewBarber,
    ) -> Result<Self, diesel::result::Error> {
        diesel::insert_into(barbers::table)
            .values(&new_barber)
            .get_result::<Self>(conn)
            .await
    }

    /// List a company's staff, active first, newest within each group.
    pub async fn list_for_company(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::barbers::dsl;

        dsl::barbers
            .filter(dsl::company_id.eq(company_id))
            .order((dsl::is_active.desc(), dsl::created_at.desc()))
            .load::<Self>(conn)
            .await
    }

    /// Company scoping is part of the lookup: a caller can never reach
    /// another company's rows by id.
    pub async fn find_scoped(
        conn: &mut AsyncPgConnection,
        barber_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::barbers::dsl;

        dsl::barbers
            .find(barber_id)
            .filter(dsl::company_id.eq(company_id))
            .first::<Self>(conn)
            .await
            .optional()
    }

    pub async fn update_scoped(
        conn: &mut AsyncPgConnection,
        barber_id: Uuid,
        company_id: Uuid,
        changes: &UpdateBarberRequest,
    ) -> Result<Option<Self>, diesel::result::Error> {
        use crate::schema::barbers::dsl;

        diesel::update(
            dsl::barbers
                .find(barber_id)
                .filter(dsl::company_id.eq(company_id)),
        )
        .set((changes, dsl::updated_at.eq(Utc::now())))
        .get_result::<Self>(conn)
        .await
        .optional()
    }

    /// Soft delete: barbers keep their payment history, so removal only
    /// flips `is_active`.
    pub async fn deactivate_scoped(
        conn: &mut AsyncPgConnection,
        barber_id: Uuid,
        company_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::barbers::dsl;

        diesel::update(
            dsl::barbers
                .find(barber_id)
                .filter(dsl::company_id.eq(company_id)),
        )
        .set((dsl::is_active.eq(false), dsl::updated_at.eq(Utc::now())))
        .execute(conn)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateBarberRequest {
            name: "Carlos".to_string(),
            phone: Some("+55 11 98888-7777".to_string()),
            commission_rate: Some(40),
            is_active: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateBarberRequest {
            name: String::new(),
            phone: None,
            commission_rate: None,
            is_active: None,
        };
        assert!(empty_name.validate().is_err());

        let bad_commission = CreateBarberRequest {
            name: "Carlos".to_string(),
            phone: None,
            commission_rate: Some(150),
            is_active: None,
        };
        assert!(bad_commission.validate().is_err());
    }
}
