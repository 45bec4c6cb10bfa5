// Server-side subscription enforcement through the full router against a
// live Postgres. Skipped when DATABASE_URL is not set.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::util::ServiceExt;
use uuid::Uuid;

use navalha_backend::build_router;

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("Should build request")
}

#[tokio::test]
async fn test_cancelled_plan_is_refused_on_protected_routes() {
    let Some(url) = common::database_url() else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let pool = common::setup_pool(&url).await;
    let router = build_router(common::app_state(pool.clone()));

    let owner = Uuid::new_v4();
    let mut conn = pool.get().await.expect("Should get connection");
    let company = common::insert_company(&mut conn, owner, "cancelled").await;
    let token = common::bearer_token(owner);

    let response = router
        .clone()
        .oneshot(get("/api/v1/barbers", &token))
        .await
        .expect("Should route request");
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    let response = router
        .oneshot(get("/api/v1/payments", &token))
        .await
        .expect("Should route request");
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

    common::delete_company(&mut conn, company.id).await;
}

#[tokio::test]
async fn test_client_path_header_does_not_lift_the_gate() {
    let Some(url) = common::database_url() else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let pool = common::setup_pool(&url).await;
    let router = build_router(common::app_state(pool.clone()));

    let owner = Uuid::new_v4();
    let mut conn = pool.get().await.expect("Should get connection");
    let company = common::insert_company(&mut conn, owner, "cancelled").await;
    let token = common::bearer_token(owner);

    // A caller claiming to be on an exempt billing route must still be
    // gated: only the request URI counts, never a client-supplied header.
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/barbers")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header("x-app-path", "/assinatura")
        .body(Body::empty())
        .expect("Should build request");

    let response = router.oneshot(request).await.expect("Should route request");
    assert_eq!(
        response.status(),
        StatusCode::PAYMENT_REQUIRED,
        "path header must not lift the expired-subscription gate"
    );

    common::delete_company(&mut conn, company.id).await;
}

#[tokio::test]
async fn test_billing_snapshot_stays_reachable_when_cancelled() {
    let Some(url) = common::database_url() else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let pool = common::setup_pool(&url).await;
    let router = build_router(common::app_state(pool.clone()));

    let owner = Uuid::new_v4();
    let mut conn = pool.get().await.expect("Should get connection");
    let company = common::insert_company(&mut conn, owner, "cancelled").await;
    let token = common::bearer_token(owner);

    let response = router
        .oneshot(get("/api/v1/account/subscription", &token))
        .await
        .expect("Should route request");
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "billing panel must stay reachable with an expired subscription"
    );

    common::delete_company(&mut conn, company.id).await;
}

#[tokio::test]
async fn test_active_plan_passes_the_gate() {
    let Some(url) = common::database_url() else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let pool = common::setup_pool(&url).await;
    let router = build_router(common::app_state(pool.clone()));

    let owner = Uuid::new_v4();
    let mut conn = pool.get().await.expect("Should get connection");
    let company = common::insert_company(&mut conn, owner, "active").await;
    let token = common::bearer_token(owner);

    let response = router
        .oneshot(get("/api/v1/barbers", &token))
        .await
        .expect("Should route request");
    assert_eq!(response.status(), StatusCode::OK);

    common::delete_company(&mut conn, company.id).await;
}
