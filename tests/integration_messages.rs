mod common;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use common::{StubBackend, authenticate, nested_detail, paged, user_json};
use serde_json::json;
use swimdesk::modules::MessageService;
use swimdesk_core::{ClientError, ListQuery};

fn messages_router() -> Router {
    Router::new()
        .route(
            "/v1/workflow-process/messages",
            get(|| async {
                Json(paged(
                    json!([
                        { "_id": "c1", "title": "Lessons", "participants": ["u1", "u2", "u3"] },
                        { "_id": "c2", "title": "Billing", "participants": ["u3"] },
                        { "_id": "c3", "participants": [] }
                    ]),
                    3,
                ))
            }),
        )
        .route(
            "/v1/workflow-process/message",
            get(|| async {
                Json(paged(
                    json!([
                        { "_id": "m1", "conversation_id": "c1", "sender_id": "u2", "content": "Hello" },
                        { "_id": "m2", "conversation_id": "c1", "sender_id": "u1", "content": "Hi" }
                    ]),
                    2,
                ))
            }),
        )
        .route(
            "/v1/workflow-process/manager/user/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "u2" {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "message": "boom" })),
                    )
                } else {
                    (StatusCode::OK, Json(nested_detail(user_json(&id, "student"))))
                }
            }),
        )
}

#[tokio::test]
async fn test_conversations_with_user_details_drops_failed_lookups() {
    let backend = StubBackend::spawn(messages_router()).await;
    let ctx = backend.context();
    authenticate(&ctx);

    let page =
        MessageService::conversations_with_user_details(&ctx.api, &ctx.auth(), &ListQuery::default())
            .await
            .unwrap();

    let ids: Vec<&str> = page
        .items
        .iter()
        .map(|c| c.conversation.id.as_str())
        .collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);

    let c1_users: Vec<&str> = page.items[0]
        .user_details
        .iter()
        .map(|u| u.id.as_str())
        .collect();
    assert_eq!(c1_users, vec!["u1", "u3"]);
    assert_eq!(page.items[1].user_details.len(), 1);
    assert!(page.items[2].user_details.is_empty());
    assert_eq!(page.meta.total, 3);

    let lookups = backend
        .requests()
        .into_iter()
        .filter(|r| r.path.starts_with("/v1/workflow-process/manager/user/"))
        .count();
    assert_eq!(lookups, 4);
}

#[tokio::test]
async fn test_enriched_conversation_serializes_user_details() {
    let backend = StubBackend::spawn(messages_router()).await;
    let ctx = backend.context();
    authenticate(&ctx);

    let page =
        MessageService::conversations_with_user_details(&ctx.api, &ctx.auth(), &ListQuery::default())
            .await
            .unwrap();
    let value = serde_json::to_value(&page.items[1]).unwrap();
    assert_eq!(value["_id"], "c2");
    assert_eq!(value["userDetails"][0]["_id"], "u3");
}

#[tokio::test]
async fn test_base_list_failure_propagates() {
    let router = Router::new().route(
        "/v1/workflow-process/messages",
        get(|| async { (StatusCode::FORBIDDEN, Json(json!({ "message": "Forbidden" }))) }),
    );
    let backend = StubBackend::spawn(router).await;
    let ctx = backend.context();
    authenticate(&ctx);

    let err =
        MessageService::conversations_with_user_details(&ctx.api, &ctx.auth(), &ListQuery::default())
            .await
            .unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 403, .. }));
}

#[tokio::test]
async fn test_list_messages_passes_conversation_id() {
    let backend = StubBackend::spawn(messages_router()).await;
    let ctx = backend.context();
    authenticate(&ctx);

    let page = MessageService::list_messages(&ctx.api, &ctx.auth(), "c1", &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].content, "Hello");

    let request = &backend.requests()[0];
    assert_eq!(request.path, "/v1/workflow-process/message");
    assert!(request.query.as_deref().unwrap().contains("conversation_id=c1"));
}
