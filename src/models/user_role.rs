use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::user_roles;

/// Role tag granted to a user. `super_admin` bypasses every subscription
/// check.
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRole {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRole {
    pub async fn roles_for_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Vec<String>, diesel::result::Error> {
        use crate::schema::user_roles::dsl;

        dsl::user_roles
            .filter(dsl::user_id.eq(user_id))
            .select(dsl::role)
            .load::<String>(conn)
            .await
    }

    pub async fn has_super_admin(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::user_roles::dsl;

        let found: Option<Uuid> = dsl::user_roles
            .filter(dsl::user_id.eq(user_id))
            .filter(dsl::role.eq(ROLE_SUPER_ADMIN))
            .select(dsl::id)
            .first::<Uuid>(conn)
            .await
            .optional()?;

        Ok(found.is_some())
    }
}
