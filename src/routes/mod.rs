/// Application routes configuration
use crate::handlers::{get_view, health, retry, screen, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // APOD screen
        .route("/", get(screen))
        .route("/view", get(get_view))
        .route("/retry", post(retry))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::NasaClient;
    use crate::domain::RequestOutcome;
    use crate::errors::ErrorKind;
    use crate::services::ApodService;
    use crate::testing::closed_port_url;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn state() -> AppState {
        let client = NasaClient::with_endpoint(
            closed_port_url(),
            "DEMO_KEY".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        AppState {
            apod_service: Arc::new(ApodService::new(client, Default::default())),
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = build_router(state())
            .oneshot(request("GET", "/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_screen_shows_loading_initially() {
        let resp = build_router(state())
            .oneshot(request("GET", "/"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("Cargando imagen del día..."));
    }

    #[tokio::test]
    async fn test_view_json_reflects_failure() {
        let state = state();
        state
            .apod_service
            .store()
            .publish(RequestOutcome::failure(ErrorKind::Unauthorized));

        let resp = build_router(state)
            .oneshot(request("GET", "/view"))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["version"], 1);
        assert_eq!(json["view"]["kind"], "error");
        assert_eq!(
            json["view"]["message"],
            "Error 401: La API Key es incorrecta o no autorizada."
        );
    }

    #[tokio::test]
    async fn test_retry_from_error_redirects_to_screen() {
        let state = state();
        state
            .apod_service
            .store()
            .publish(RequestOutcome::failure(ErrorKind::ServerError(502)));

        let resp = build_router(state.clone())
            .oneshot(request("POST", "/retry"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");
        assert!(state.apod_service.store().current().version >= 2);
    }

    #[tokio::test]
    async fn test_retry_outside_error_state_is_conflict() {
        let resp = build_router(state())
            .oneshot(request("POST", "/retry"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "RETRY_UNAVAILABLE");
    }
}
