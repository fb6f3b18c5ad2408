//! Axum router configuration with middleware.
//!
//! Routes: `POST /callback` (LINE webhook), `GET /health`.
//! Middleware: tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/callback", post(handlers::webhook::callback))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::extract::State;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use gurume_core::conversation::{ConversationEngine, EventDispatcher};
    use gurume_core::storage::user_store::UserQueryStore;
    use gurume_infra::crypto::hash::Sha256KeyHasher;
    use gurume_infra::line::LineReplyClient;
    use gurume_infra::line::signature::sign;
    use gurume_infra::places::GooglePlacesClient;
    use gurume_infra::sqlite::document::SqliteDocumentStore;
    use gurume_infra::sqlite::pool::DatabasePool;

    const SECRET: &str = "channel-secret";

    type Replies = Arc<Mutex<Vec<Value>>>;

    /// Stand-in for the LINE reply endpoint.
    async fn spawn_line_stub() -> (String, Replies) {
        async fn reply(State(replies): State<Replies>, axum::Json(body): axum::Json<Value>) {
            replies.lock().unwrap().push(body);
        }

        let replies: Replies = Arc::default();
        let router = Router::new()
            .route("/v2/bot/message/reply", post(reply))
            .with_state(Arc::clone(&replies));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        (format!("http://{addr}"), replies)
    }

    async fn test_app() -> (Router, Replies, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        let store = UserQueryStore::new(SqliteDocumentStore::new(pool, "test"), Sha256KeyHasher::new());

        // search is never reached by these tests
        let places = GooglePlacesClient::with_base_url(
            SecretString::from("unused"),
            "http://127.0.0.1:9".to_string(),
        )
        .unwrap();

        let (line_base, replies) = spawn_line_stub().await;
        let sender =
            LineReplyClient::with_base_url(SecretString::from("token"), line_base).unwrap();

        let dispatcher = EventDispatcher::new(ConversationEngine::new(store, places), sender);
        let state = AppState::new(dispatcher, SecretString::from(SECRET));
        (build_router(state), replies, dir)
    }

    fn signed_request(body: &str) -> Request<Body> {
        let signature = sign(SECRET.as_bytes(), body.as_bytes()).unwrap();
        Request::builder()
            .method("POST")
            .uri("/callback")
            .header("content-type", "application/json")
            .header("x-line-signature", signature)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn text_event(token: &str, text: &str) -> Value {
        json!({
            "type": "message",
            "replyToken": token,
            "source": {"type": "user", "userId": "U1"},
            "message": {"type": "text", "id": "1", "text": text}
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _, _dir) = test_app().await;
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn test_callback_replies_to_each_event() {
        let (app, replies, _dir) = test_app().await;
        let body = json!({
            "destination": "Ubot",
            "events": [text_event("r1", "位置情報検索"), text_event("r2", "ラーメン")]
        })
        .to_string();

        let resp = app.oneshot(signed_request(&body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let replies = replies.lock().unwrap();
        assert_eq!(replies.len(), 2);
        let r1 = replies.iter().find(|r| r["replyToken"] == "r1").unwrap();
        assert_eq!(r1["messages"][0]["type"], "template");
        assert_eq!(
            r1["messages"][0]["template"]["actions"][0]["uri"],
            "line://nv/location"
        );
        let r2 = replies.iter().find(|r| r["replyToken"] == "r2").unwrap();
        assert_eq!(
            r2["messages"][0]["text"],
            "位置情報を送信して「キーワードで絞り込み」を選択してください"
        );
    }

    #[tokio::test]
    async fn test_location_then_keyword_flow() {
        let (app, replies, _dir) = test_app().await;

        let location = json!({"events": [{
            "type": "message", "replyToken": "r1", "source": {"userId": "U1"},
            "message": {"type": "location", "id": "1", "latitude": 35.0, "longitude": 139.0}
        }]})
        .to_string();
        let resp = app.clone().oneshot(signed_request(&location)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // the confirm window carries the query; tapping "change keyword" stores it
        let change_keyword = {
            let replies = replies.lock().unwrap();
            assert_eq!(replies[0]["messages"][0]["template"]["text"], "距離: 500m\n");
            replies[0]["messages"][0]["template"]["actions"][1]["data"]
                .as_str()
                .unwrap()
                .to_string()
        };
        let postback = json!({"events": [{
            "type": "postback", "replyToken": "r2", "source": {"userId": "U1"},
            "postback": {"data": change_keyword}
        }]})
        .to_string();
        app.clone().oneshot(signed_request(&postback)).await.unwrap();

        let keyword = json!({"events": [text_event("r3", "焼き鳥")]}).to_string();
        app.oneshot(signed_request(&keyword)).await.unwrap();

        let replies = replies.lock().unwrap();
        assert_eq!(replies.len(), 3);
        let last = &replies[2]["messages"][0]["template"];
        assert_eq!(last["text"], "距離: 500m\nキーワード: 焼き鳥\n");
    }

    #[tokio::test]
    async fn test_bad_signature_is_rejected() {
        let (app, replies, _dir) = test_app().await;
        let body = json!({"events": [text_event("r1", "hi")]}).to_string();
        let req = Request::builder()
            .method("POST")
            .uri("/callback")
            .header("x-line-signature", "bm9wZQ==")
            .body(Body::from(body))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(replies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_signature_is_rejected() {
        let (app, _, _dir) = test_app().await;
        let req = Request::builder()
            .method("POST")
            .uri("/callback")
            .body(Body::from("{}"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (app, _, _dir) = test_app().await;
        let resp = app.oneshot(signed_request("not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
