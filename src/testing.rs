//! Shared helpers for unit tests: a local stand-in for the APOD provider.

use axum::Router;
use serde_json::Value;

/// Serve `router` on an ephemeral localhost port and return its base url
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

/// Url of a port with nothing listening on it
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/planetary/apod", addr)
}

pub fn image_record_json() -> Value {
    serde_json::json!({
        "title": "The Horsehead Nebula",
        "date": "2024-01-15",
        "media_type": "image",
        "url": "https://apod.nasa.gov/apod/image/2401/horsehead.jpg",
        "explanation": "A dark nebula in Orion.",
        "copyright": "Jane Doe"
    })
}

pub fn video_record_json() -> Value {
    serde_json::json!({
        "title": "Solar Eclipse Timelapse",
        "date": "2024-04-08",
        "media_type": "video",
        "url": "https://www.youtube.com/embed/abc",
        "explanation": "Totality over Texas."
    })
}
