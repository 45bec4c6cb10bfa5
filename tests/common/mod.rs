// Common test utilities shared by the database-backed integration tests.
// These tests need a reachable Postgres; callers skip when DATABASE_URL is
// not set.

use std::sync::Arc;

use bb8::Pool;
use diesel::prelude::*;
use diesel::{Connection, PgConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel_migrations::MigrationHarness;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tokio::sync::OnceCell;
use uuid::Uuid;

use navalha_backend::app::AppState;
use navalha_backend::app_config::{AppConfig, Environment};
use navalha_backend::db::{DieselPool, MIGRATIONS};
use navalha_backend::middleware::auth::SessionClaims;
use navalha_backend::models::{Campaign, CampaignMessageLog, Company};
use navalha_backend::services::CampaignService;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const JWT_AUDIENCE: &str = "authenticated";
pub const JWT_ISSUER: &str = "navalha.app";
pub const CALLBACK_SECRET: &str = "integration-test-callback-secret";

static MIGRATIONS_APPLIED: OnceCell<()> = OnceCell::const_new();

/// DATABASE_URL if configured; tests return early when it is absent
pub fn database_url() -> Option<String> {
    dotenv::dotenv().ok();
    std::env::var("DATABASE_URL").ok()
}

/// Connection pool against the test database, schema migrated.
/// Migrations run once per test binary; tests within a binary run in
/// parallel and must not race the harness.
pub async fn setup_pool(database_url: &str) -> DieselPool {
    let url = database_url.to_string();
    MIGRATIONS_APPLIED
        .get_or_init(|| async move {
            tokio::task::spawn_blocking(move || {
                let mut conn =
                    PgConnection::establish(&url).expect("Should connect for migrations");
                conn.run_pending_migrations(MIGRATIONS)
                    .expect("Should run migrations");
            })
            .await
            .expect("Migration task should complete");
        })
        .await;

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder()
        .max_size(5)
        .build(manager)
        .await
        .expect("Should build diesel pool")
}

/// Application state wired to the test pool with fixed test secrets
pub fn app_state(pool: DieselPool) -> AppState {
    let config = AppConfig {
        bind_address: "127.0.0.1:0".to_string(),
        port: 0,
        environment: Environment::Test,
        database_url: String::new(),
        database_max_connections: 5,
        database_min_connections: 1,
        database_connect_timeout: 5,
        database_idle_timeout: 60,
        database_max_lifetime: 300,
        auth_jwt_secret: JWT_SECRET.to_string(),
        auth_jwt_audience: JWT_AUDIENCE.to_string(),
        auth_jwt_issuer: JWT_ISSUER.to_string(),
        callback_secret: CALLBACK_SECRET.to_string(),
        disable_embedded_migrations: true,
    };

    AppState {
        config: Arc::new(config),
        diesel_pool: pool.clone(),
        campaign_service: Arc::new(CampaignService::new(pool, CALLBACK_SECRET.to_string())),
    }
}

/// Bearer token for `user_id`, signed like the managed auth provider would
pub fn bearer_token(user_id: Uuid) -> String {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        aud: JWT_AUDIENCE.to_string(),
        iss: JWT_ISSUER.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        email: Some("owner@example.com".to_string()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("Should sign test token")
}

pub async fn insert_company(
    conn: &mut AsyncPgConnection,
    owner_user_id: Uuid,
    plan_status: &str,
) -> Company {
    use navalha_backend::schema::companies;

    diesel::insert_into(companies::table)
        .values((
            companies::owner_user_id.eq(owner_user_id),
            companies::name.eq(format!("test_company_{}", owner_user_id.simple())),
            companies::plan_status.eq(plan_status),
        ))
        .get_result::<Company>(conn)
        .await
        .expect("Should insert company")
}

pub async fn insert_campaign(conn: &mut AsyncPgConnection, company_id: Uuid) -> Campaign {
    use navalha_backend::schema::marketing_campaigns;

    diesel::insert_into(marketing_campaigns::table)
        .values((
            marketing_campaigns::company_id.eq(company_id),
            marketing_campaigns::name.eq("test campaign"),
        ))
        .get_result::<Campaign>(conn)
        .await
        .expect("Should insert campaign")
}

pub async fn insert_message_log(
    conn: &mut AsyncPgConnection,
    campaign_id: Uuid,
) -> CampaignMessageLog {
    use navalha_backend::schema::campaign_message_logs;

    diesel::insert_into(campaign_message_logs::table)
        .values(campaign_message_logs::campaign_id.eq(campaign_id))
        .get_result::<CampaignMessageLog>(conn)
        .await
        .expect("Should insert message log")
}

/// Remove everything a test created under one company, children first
pub async fn delete_company(conn: &mut AsyncPgConnection, company_id: Uuid) {
    use navalha_backend::schema::{
        barbers, campaign_message_logs, companies, marketing_campaigns, payments,
    };

    let campaign_ids: Vec<Uuid> = marketing_campaigns::table
        .filter(marketing_campaigns::company_id.eq(company_id))
        .select(marketing_campaigns::id)
        .load::<Uuid>(conn)
        .await
        .unwrap_or_default();

    let _ = diesel::delete(
        campaign_message_logs::table
            .filter(campaign_message_logs::campaign_id.eq_any(campaign_ids)),
    )
    .execute(conn)
    .await;
    let _ = diesel::delete(
        marketing_campaigns::table.filter(marketing_campaigns::company_id.eq(company_id)),
    )
    .execute(conn)
    .await;
    let _ = diesel::delete(payments::table.filter(payments::company_id.eq(company_id)))
        .execute(conn)
        .await;
    let _ = diesel::delete(barbers::table.filter(barbers::company_id.eq(company_id)))
        .execute(conn)
        .await;
    let _ = diesel::delete(companies::table.filter(companies::id.eq(company_id)))
        .execute(conn)
        .await;
}
