mod create;
pub mod handler;
mod list;
mod options;
pub mod types;

use crate::types::Context;
use axum::routing::{any, Router};
use std::sync::Arc;
use types::{
    request,
    response::{Error, Reply},
};

/// Serves one HTTP-like event. Every outcome, including storage and body
/// failures, comes back as a complete reply.
pub async fn handle(ctx: Arc<Context>, event: request::Event) -> Reply {
    tracing::debug!("Received event: {:?}", event);

    let outcome = match event.http_method.as_deref() {
        Some("OPTIONS") => Ok(options::service().into()),
        Some("GET") => list::service(ctx).await.map(Reply::from),
        Some("POST") => create::service(ctx, event.body).await.map(Reply::from),
        _ => Err(Error::MethodNotAllowed),
    };

    outcome.unwrap_or_else(Reply::from)
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().route("/grades", any(handler::handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::grade::{
            repository::{Error as StoreError, ErrorKind, StoredGrade},
            store::MemoryStore,
        },
        types::AppContext,
    };
    use serde_json::{json, Value};

    fn context(store: Arc<MemoryStore>) -> Arc<Context> {
        Arc::new(Context {
            app: AppContext {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            store,
        })
    }

    fn event(method: Option<&str>, body: Option<Value>) -> request::Event {
        request::Event {
            http_method: method.map(str::to_string),
            body: body.map(|body| body.to_string()),
        }
    }

    fn seeded(items: Value) -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_items(
            serde_json::from_value::<Vec<StoredGrade>>(items).unwrap(),
        ))
    }

    #[tokio::test]
    async fn options_answers_preflight_without_storage() {
        let store = Arc::new(MemoryStore::new());

        let reply = handle(context(store.clone()), event(Some("OPTIONS"), Some(json!("junk")))).await;

        assert_eq!(reply.status_code, 200);
        assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(reply.header("Access-Control-Allow-Headers"), Some("Content-Type"));
        assert_eq!(
            reply.header("Access-Control-Allow-Methods"),
            Some("GET,POST,OPTIONS")
        );
        assert_eq!(reply.header("Content-Type"), None);
        assert_eq!(reply.json_body().unwrap(), json!({ "message": "CORS OK" }));
        assert_eq!(store.scan_count() + store.put_count(), 0);
    }

    #[tokio::test]
    async fn get_on_empty_table_averages_to_zero() {
        let reply = handle(context(Arc::new(MemoryStore::new())), event(Some("GET"), None)).await;

        assert_eq!(reply.status_code, 200);
        assert_eq!(reply.header("Content-Type"), Some("application/json"));
        assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(reply.json_body().unwrap(), json!({ "grades": [], "average": 0.0 }));
    }

    #[tokio::test]
    async fn get_excludes_non_numeric_grades() {
        let store = seeded(json!([
            { "student_id": "a", "grade": "90" },
            { "student_id": "b", "grade": "not-a-number" },
        ]));

        let reply = handle(context(store.clone()), event(Some("GET"), None)).await;
        let body = reply.json_body().unwrap();

        assert_eq!(reply.status_code, 200);
        assert_eq!(body["grades"], json!([{ "student_id": "a", "grade": 90.0 }]));
        assert_eq!(body["average"], json!(90.0));
        assert_eq!(store.scan_count(), 1);
    }

    #[tokio::test]
    async fn get_average_does_not_depend_on_scan_order() {
        let forward = seeded(json!([
            { "student_id": "a", "grade": 60 },
            { "student_id": "b", "grade": "75" },
            { "student_id": "c", "grade": 90 },
        ]));
        let backward = seeded(json!([
            { "student_id": "c", "grade": 90 },
            { "student_id": "b", "grade": "75" },
            { "student_id": "a", "grade": 60 },
        ]));

        let forward = handle(context(forward), event(Some("GET"), None)).await;
        let backward = handle(context(backward), event(Some("GET"), None)).await;

        assert_eq!(
            forward.json_body().unwrap()["average"],
            backward.json_body().unwrap()["average"]
        );
        assert_eq!(forward.json_body().unwrap()["average"], json!(75.0));
    }

    #[tokio::test]
    async fn post_saves_grade_and_recomputes_average() {
        let store = seeded(json!([{ "student_id": "z", "timestamp": 1, "grade": 95 }]));

        let reply = handle(
            context(store.clone()),
            event(Some("POST"), Some(json!({ "student_id": "a", "grade": 85 }))),
        )
        .await;

        assert_eq!(reply.status_code, 200);
        assert_eq!(
            reply.json_body().unwrap(),
            json!({ "average": 90.0, "itemsSaved": 2 })
        );

        let items = store.items().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].student_id.as_deref(), Some("a"));
        assert_eq!(items[1].grade, Some(json!(85.0)));
        assert!(items[1].timestamp.is_some());
        assert_eq!(store.put_count(), 1);
        assert_eq!(store.scan_count(), 1);
    }

    #[tokio::test]
    async fn post_accepts_numeric_strings_and_repeat_students() {
        let store = seeded(json!([{ "student_id": "a", "grade": 70 }]));

        let reply = handle(
            context(store.clone()),
            event(Some("POST"), Some(json!({ "student_id": "a", "grade": "80" }))),
        )
        .await;

        assert_eq!(
            reply.json_body().unwrap(),
            json!({ "average": 75.0, "itemsSaved": 2 })
        );
        assert_eq!(store.items().await.len(), 2);
    }

    #[tokio::test]
    async fn post_rejects_invalid_payloads_without_writing() {
        let payloads = [
            json!({ "student_id": "", "grade": 85 }),
            json!({ "student_id": "a", "grade": "x" }),
            json!({ "grade": 85 }),
            json!({ "student_id": "a" }),
            json!({ "student_id": 0, "grade": 85 }),
            json!({ "student_id": null, "grade": 85 }),
            json!([1, 2]),
        ];

        for payload in payloads {
            let store = seeded(json!([{ "student_id": "z", "grade": 95 }]));

            let reply = handle(context(store.clone()), event(Some("POST"), Some(payload))).await;

            assert_eq!(reply.status_code, 400);
            assert_eq!(reply.header("Content-Type"), Some("application/json"));
            assert_eq!(
                reply.json_body().unwrap(),
                json!({ "error": "Invalid student_id or grade" })
            );
            assert_eq!(store.items().await.len(), 1);
            assert_eq!(store.put_count() + store.scan_count(), 0);
        }
    }

    #[tokio::test]
    async fn unsupported_methods_are_not_allowed() {
        for method in [Some("DELETE"), Some("get"), Some("PUT"), None] {
            let store = Arc::new(MemoryStore::new());

            let reply = handle(context(store.clone()), event(method, None)).await;

            assert_eq!(reply.status_code, 405);
            assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
            assert_eq!(
                reply.json_body().unwrap(),
                json!({ "error": "Method not allowed" })
            );
            assert_eq!(store.scan_count() + store.put_count(), 0);
        }
    }

    #[tokio::test]
    async fn malformed_bodies_surface_as_failures() {
        let store = Arc::new(MemoryStore::new());
        let ctx = context(store.clone());

        let cases = [
            (None, "SyntaxError"),
            (Some("{not json".to_string()), "SyntaxError"),
            (Some("null".to_string()), "TypeError"),
        ];

        for (body, kind) in cases {
            let reply = handle(
                ctx.clone(),
                request::Event {
                    http_method: Some("POST".to_string()),
                    body,
                },
            )
            .await;
            let body = reply.json_body().unwrap();

            assert_eq!(reply.status_code, 500);
            assert_eq!(body["errorType"], json!(kind));
            assert!(!body["error"].as_str().unwrap().is_empty());
        }

        assert_eq!(store.put_count(), 0);
    }

    #[tokio::test]
    async fn scan_failure_surfaces_as_failure() {
        let store = Arc::new(
            MemoryStore::new()
                .failing_scans(StoreError::new(ErrorKind::Unavailable, "table is unreachable")),
        );

        let reply = handle(context(store), event(Some("GET"), None)).await;

        assert_eq!(reply.status_code, 500);
        assert_eq!(reply.header("Content-Type"), Some("application/json"));
        assert_eq!(
            reply.json_body().unwrap(),
            json!({ "error": "table is unreachable", "errorType": "StorageUnavailable" })
        );
    }

    #[tokio::test]
    async fn put_failure_skips_the_rescan() {
        let store = Arc::new(
            MemoryStore::new().failing_puts(StoreError::new(ErrorKind::Rejected, "write refused")),
        );

        let reply = handle(
            context(store.clone()),
            event(Some("POST"), Some(json!({ "student_id": "a", "grade": 85 }))),
        )
        .await;

        assert_eq!(reply.status_code, 500);
        assert_eq!(
            reply.json_body().unwrap(),
            json!({ "error": "write refused", "errorType": "StorageRejected" })
        );
        assert_eq!(store.scan_count(), 0);
    }

    #[tokio::test]
    async fn post_counts_only_numeric_grades_as_saved() {
        let store = seeded(json!([
            { "student_id": "z", "grade": 95 },
            { "student_id": "y", "grade": "bad" },
            { "student_id": "x" },
        ]));

        let reply = handle(
            context(store.clone()),
            event(Some("POST"), Some(json!({ "student_id": "a", "grade": 85 }))),
        )
        .await;

        assert_eq!(reply.status_code, 200);
        assert_eq!(
            reply.json_body().unwrap(),
            json!({ "average": 90.0, "itemsSaved": 2 })
        );
        assert_eq!(store.items().await.len(), 4);
    }

    #[tokio::test]
    async fn post_rejects_signed_radix_grades() {
        for grade in ["0x+1", "0x-1"] {
            let store = seeded(json!([{ "student_id": "z", "grade": "bad" }]));

            let reply = handle(
                context(store.clone()),
                event(Some("POST"), Some(json!({ "student_id": "a", "grade": grade }))),
            )
            .await;

            assert_eq!(reply.status_code, 400);
            assert_eq!(store.items().await.len(), 1);
            assert_eq!(store.put_count(), 0);
        }
    }
}
