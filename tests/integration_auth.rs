mod common;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use common::{StubBackend, paged, user_json, valid_token};
use serde_json::{Value, json};
use swimdesk::modules::{AuthService, CourseService, StudentService};
use swimdesk_auth::{Role, TokenStatus};
use swimdesk_core::{ClientError, ListQuery};

fn login_router(token: String) -> Router {
    Router::new()
        .route(
            "/v1/auth/login",
            post(move |Json(body): Json<Value>| {
                let token = token.clone();
                async move {
                    if body["password"] == "correct-horse" {
                        (
                            StatusCode::OK,
                            Json(json!({
                                "data": { "accessToken": token, "user": user_json("u1", "manager") },
                                "message": "success",
                                "statusCode": 200
                            })),
                        )
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "message": "Invalid credentials", "statusCode": 401 })),
                        )
                    }
                }
            }),
        )
        .route(
            "/v1/workflow-process/manager/users",
            get(|| async {
                Json(paged(json!([{ "_id": "s1", "first_name": "Ploy" }]), 1))
            }),
        )
}

#[tokio::test]
async fn test_login_stores_session_and_scopes_requests() {
    let token = valid_token();
    let backend = StubBackend::spawn(login_router(token.clone())).await;
    let ctx = backend.context();

    let user = ctx.login("manager@example.com", "correct-horse").await.unwrap();
    assert_eq!(user.role, Role::Manager);
    assert!(ctx.sessions.is_session_valid());
    assert_eq!(ctx.sessions.token().as_deref(), Some(token.as_str()));
    assert_eq!(ctx.tenants.tenant().as_deref(), Some("t1"));

    let page = StudentService::list_students(&ctx.api, &ctx.auth(), &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "s1");

    let requests = backend.requests_to("/v1/workflow-process/manager/users");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.tenant_id.as_deref(), Some("t1"));
    assert_eq!(
        request.authorization.as_deref(),
        Some(format!("Bearer {token}").as_str())
    );
    let query = request.query.as_deref().unwrap();
    assert!(query.contains("role=student"));
    assert!(query.contains("page=1"));
    assert!(query.contains("limit=10"));
}

#[tokio::test]
async fn test_login_keeps_previously_selected_tenant() {
    let backend = StubBackend::spawn(login_router(valid_token())).await;
    let ctx = backend.context();
    ctx.tenants.set_tenant("branch-9").unwrap();

    ctx.login("manager@example.com", "correct-horse").await.unwrap();
    assert_eq!(ctx.tenants.tenant().as_deref(), Some("branch-9"));
}

#[tokio::test]
async fn test_login_with_blank_tenant_leaves_tenant_unselected() {
    let token = valid_token();
    let router = Router::new().route(
        "/v1/auth/login",
        post(move || {
            let token = token.clone();
            async move {
                let mut user = user_json("u1", "manager");
                user["tenant_id"] = json!("");
                Json(json!({
                    "data": { "accessToken": token, "user": user },
                    "message": "success",
                    "statusCode": 200
                }))
            }
        }),
    );
    let backend = StubBackend::spawn(router).await;
    let ctx = backend.context();

    let user = ctx.login("manager@example.com", "correct-horse").await.unwrap();
    assert_eq!(user.tenant_id, None);
    assert!(ctx.sessions.is_session_valid());
    assert_eq!(ctx.tenants.tenant(), None);

    let err = CourseService::get_course(&ctx.api, &ctx.auth(), "k1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AuthRequired(_)));
}

#[tokio::test]
async fn test_login_failure_surfaces_backend_message() {
    let backend = StubBackend::spawn(login_router(valid_token())).await;
    let ctx = backend.context();

    let err = ctx.login("manager@example.com", "wrong").await.unwrap_err();
    match &err {
        ClientError::Http { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert!(err.requires_login());
    assert_eq!(ctx.sessions.token_status(), TokenStatus::Missing);
}

#[tokio::test]
async fn test_login_rejects_blank_credentials_before_network() {
    let backend = StubBackend::spawn(login_router(valid_token())).await;
    let ctx = backend.context();

    let err = AuthService::login(&ctx.api, "  ", "").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_and_tenant() {
    let backend = StubBackend::spawn(login_router(valid_token())).await;
    let ctx = backend.context();
    ctx.login("manager@example.com", "correct-horse").await.unwrap();

    ctx.logout().unwrap();
    assert!(!ctx.sessions.is_session_valid());
    assert!(ctx.sessions.user().is_none());
    assert!(ctx.tenants.tenant().is_none());
}

#[tokio::test]
async fn test_profile_requires_token_only() {
    let router = Router::new().route(
        "/v1/auth/profile",
        get(|| async { Json(json!({ "data": user_json("u1", "instructor") })) }),
    );
    let backend = StubBackend::spawn(router).await;
    let ctx = backend.context();

    let err = AuthService::profile(&ctx.api, &ctx.auth()).await.unwrap_err();
    assert!(matches!(err, ClientError::AuthRequired(_)));
    assert!(backend.requests().is_empty());

    let token = valid_token();
    let profile = serde_json::from_value::<swimdesk_models::UserProfile>(user_json("u1", "manager"))
        .unwrap();
    ctx.sessions.set_session(&token, profile).unwrap();

    let profile = AuthService::profile(&ctx.api, &ctx.auth()).await.unwrap();
    assert_eq!(profile.role_front, vec!["instructor"]);
    assert_eq!(backend.requests()[0].tenant_id, None);
}
