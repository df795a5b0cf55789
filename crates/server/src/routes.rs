use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use service::employees::EmployeeStore;

use crate::employees;

/// Build the full application router: static frontend, health probe and the
/// employee CRUD API.
pub fn build_router(store: Arc<EmployeeStore>, cors: CorsLayer, frontend_dir: &str) -> Router {
    let index = std::path::Path::new(frontend_dir).join("index.html");
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    // Static frontend + health (no state)
    let public = Router::new()
        .nest_service("/", static_dir)
        .route("/api/health", get(employees::health));

    // Employee CRUD API
    let api = Router::new()
        .route("/api/employees", get(employees::list).post(employees::create))
        .route(
            "/api/employees/:id",
            get(employees::get_by_id)
                .put(employees::update)
                .delete(employees::delete),
        );

    public
        .merge(api)
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn test_router() -> (Router, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("routes_test_{}.json", Uuid::new_v4()));
        let store = EmployeeStore::new(&path).await.unwrap();
        let router = build_router(store, CorsLayer::very_permissive(), "no-such-frontend");
        (router, path)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok_body() {
        let (router, path) = test_router().await;
        let resp = router
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({"status": "ok"}));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn create_then_get_round_trips_over_http() {
        let (router, path) = test_router().await;

        let resp = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/employees",
                r#"{"name":"Ann","role":"Eng","department":"R&D"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let created = body_json(resp).await;
        assert_eq!(
            created,
            serde_json::json!({
                "id": 1, "name": "Ann", "role": "Eng", "department": "R&D", "email": null
            })
        );

        let resp = router
            .oneshot(Request::get("/api/employees/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, created);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_employee_is_404_with_json_error_body() {
        let (router, path) = test_router().await;
        let resp = router
            .oneshot(Request::get("/api/employees/99").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("99"));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn create_missing_required_field_is_422() {
        let (router, path) = test_router().await;
        let resp = router
            .oneshot(json_request(
                "POST",
                "/api/employees",
                r#"{"name":"Ann","role":"Eng"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert!(body["error"].is_string());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn put_merges_and_null_fields_are_ignored() {
        let (router, path) = test_router().await;

        let resp = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/employees",
                r#"{"name":"Ann","role":"Eng","department":"R&D"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = router
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/employees/1",
                r#"{"department":"Ops","name":null}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "id": 1, "name": "Ann", "role": "Eng", "department": "Ops", "email": null
            })
        );

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn delete_returns_removed_record_then_404() {
        let (router, path) = test_router().await;

        router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/employees",
                r#"{"name":"Bo","role":"QA","department":"R&D","email":"bo@example.com"}"#,
            ))
            .await
            .unwrap();

        let resp = router
            .clone()
            .oneshot(
                Request::delete("/api/employees/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let removed = body_json(resp).await;
        assert_eq!(removed["email"], serde_json::json!("bo@example.com"));

        let resp = router
            .oneshot(
                Request::delete("/api/employees/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn list_returns_records_in_insertion_order() {
        let (router, path) = test_router().await;

        for name in ["Ann", "Bo"] {
            router
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/employees",
                    &format!(r#"{{"name":"{name}","role":"Eng","department":"R&D"}}"#),
                ))
                .await
                .unwrap();
        }

        let resp = router
            .oneshot(Request::get("/api/employees").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Ann", "Bo"]);

        let _ = tokio::fs::remove_file(&path).await;
    }
}
