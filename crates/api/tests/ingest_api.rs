//! HTTP-level tests for the host-report ingestion resource.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use watchpost_db::repositories::EntityRepo;

use common::{admin_token, assert_error, body_json, build_test_app, patch_json, patch_json_auth};

fn report_body() -> serde_json::Value {
    json!({
        "passive_checks_enabled": true,
        "template": { "_realm": "dc1" },
        "livestate": { "state": "UP", "output": "host is up" },
        "services": [
            { "name": "svc1", "livestate": { "state": "OK", "perf_data": "'cpu'=10c" } }
        ]
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ingest_returns_feedback_envelope(pool: PgPool) {
    let app = build_test_app(pool);

    let response =
        patch_json_auth(&app, "/api/v1/hosts/host1", &admin_token(), report_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["_status"], "OK");
    assert_eq!(body["_feedback"]["check_interval"], 60);
    assert_eq!(body["_feedback"]["freshness_threshold"], 1200);
    assert_eq!(body["_feedback"]["passive_check_enabled"], true);
    assert_eq!(body["_feedback"]["active_check_enabled"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ingest_requires_authentication(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = patch_json(&app, "/api/v1/hosts/host1", report_body()).await;

    assert_error(response, StatusCode::UNAUTHORIZED).await;
    assert!(EntityRepo::find_by_name(&pool, "host1").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_state_is_not_found_and_rolls_back(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let body = json!({
        "passive_checks_enabled": true,
        "livestate": { "state": "SIDEWAYS" }
    });
    let response = patch_json_auth(&app, "/api/v1/hosts/hostx", &admin_token(), body).await;

    let err = assert_error(response, StatusCode::NOT_FOUND).await;
    assert!(err["_issues"][0]
        .as_str()
        .unwrap()
        .contains("SIDEWAYS"));

    // Nothing from the failed report persisted.
    assert!(EntityRepo::find_by_name(&pool, "hostx").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_perf_data_is_bad_request(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let body = json!({
        "passive_checks_enabled": true,
        "livestate": { "state": "UP", "perf_data": "cpu" }
    });
    let response = patch_json_auth(&app, "/api/v1/hosts/hosty", &admin_token(), body).await;

    assert_error(response, StatusCode::BAD_REQUEST).await;
    assert!(EntityRepo::find_by_name(&pool, "hosty").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn body_name_must_match_path_name(pool: PgPool) {
    let app = build_test_app(pool);

    let body = json!({ "name": "other", "passive_checks_enabled": true });
    let response = patch_json_auth(&app, "/api/v1/hosts/host1", &admin_token(), body).await;

    assert_error(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn body_name_may_be_omitted(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let body = json!({ "passive_checks_enabled": true });
    let response = patch_json_auth(&app, "/api/v1/hosts/pathonly", &admin_token(), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(EntityRepo::find_by_name(&pool, "pathonly")
        .await
        .unwrap()
        .is_some());
}
