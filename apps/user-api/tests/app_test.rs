use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use core_config::AppInfo;
use domain_users::{InMemoryEventPublisher, InMemoryUserRepository, UserService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use user_api::app_router;

fn app(publisher: InMemoryEventPublisher) -> Router {
    let service = UserService::new(InMemoryUserRepository::new(), publisher);
    app_router(
        handlers::router(service),
        Router::new(),
        AppInfo {
            name: "user_api",
            version: "0.1.0",
        },
    )
    .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_user_through_full_stack() {
    let publisher = InMemoryEventPublisher::new();
    let app = app(publisher.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/user")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"name": "Ana", "email": "ana@x.com"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("x-content-type-options"));

    let body = body_json(response).await;
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["email"], "ana@x.com");

    let published = publisher.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].email_to, "ana@x.com");
    assert_eq!(published[0].email_body, "Whello, Ana bem vindo a plataforma.");
}

#[tokio::test]
async fn test_health_reports_binary_name() {
    let response = app(InMemoryEventPublisher::new())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "user_api");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app(InMemoryEventPublisher::new())
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/user"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = app(InMemoryEventPublisher::new())
        .oneshot(Request::get("/api/nothing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
