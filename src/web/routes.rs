// Webhook receiver - the thin HTTP skin over the moderation service.
//
// GroupMe POSTs every group message to /webhook and only looks at the
// response status, so the handler acks 200 no matter what moderation
// decided; only a body that fails to parse gets a 500. GET / is a
// human-readable status page.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::membership::Clock;
use crate::core::moderation::{GroupApi, ModerationService, WebhookPayload};

/// Shared application state.
pub struct AppState<A: GroupApi, C: Clock> {
    pub service: Arc<ModerationService<A, C>>,
}

// Manual impl: deriving would put Clone bounds on A and C.
impl<A: GroupApi, C: Clock> Clone for AppState<A, C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Create the application router.
pub fn create_router<A, C>(state: AppState<A, C>) -> Router
where
    A: GroupApi + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/webhook", post(receive_webhook::<A, C>))
        .route("/", get(status_page::<A, C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn receive_webhook<A, C>(State(state): State<AppState<A, C>>, body: String) -> StatusCode
where
    A: GroupApi + 'static,
    C: Clock + 'static,
{
    let payload: WebhookPayload = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Error processing webhook: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    let disposition = state.service.handle_event(payload.into()).await;
    tracing::debug!(?disposition, "Webhook processed");

    // Internal failures were logged downstream; GroupMe still gets a 200.
    StatusCode::OK
}

async fn status_page<A, C>(State(state): State<AppState<A, C>>) -> Html<String>
where
    A: GroupApi + 'static,
    C: Clock + 'static,
{
    Html(format!(
        "<h1>GroupMe Moderation Bot</h1>\n\
         <p>Status: Running</p>\n\
         <p>Monitoring keywords: {}</p>",
        state.service.keyword_count()
    ))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::membership::tests::ManualClock;
    use crate::core::membership::MembershipTracker;
    use crate::core::moderation::action_executor::tests::MockGroupApi;
    use crate::core::moderation::KeywordFilter;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let clock = ManualClock::new("2024-06-01T12:00:00Z".parse().unwrap());
        let tracker = MembershipTracker::new(clock);
        let service = Arc::new(ModerationService::new(
            tracker,
            KeywordFilter::default_list(),
            MockGroupApi::default(),
        ));
        create_router(AppState { service })
    }

    fn webhook_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_webhook_is_acked_with_200() {
        let app = test_app();
        let response = app
            .oneshot(webhook_request(
                r#"{"text": "hello", "user_id": "u1", "name": "Alice"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn internal_failures_still_ack_200() {
        // Banned message from a recent joiner, but the mock has no members,
        // so the removal fails internally. The caller must not see that.
        let app = test_app();

        let join = app
            .clone()
            .oneshot(webhook_request(
                r#"{"text": "Mallory joined the group", "user_id": "u1", "system": true}"#,
            ))
            .await
            .unwrap();
        assert_eq!(join.status(), StatusCode::OK);

        let message = app
            .oneshot(webhook_request(r#"{"text": "free crypto", "user_id": "u1"}"#))
            .await
            .unwrap();
        assert_eq!(message.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_payload_is_acked_with_500() {
        let app = test_app();
        let response = app
            .oneshot(webhook_request("this is not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn status_page_shows_keyword_count() {
        let app = test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("GroupMe Moderation Bot"));
        assert!(page.contains(&format!(
            "Monitoring keywords: {}",
            KeywordFilter::default_list().keyword_count()
        )));
    }
}
