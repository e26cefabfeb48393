use axum::{debug_handler, extract::Path, http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub async fn run(addr: SocketAddr) {
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, router()).await.unwrap();
}

pub fn router() -> Router {
    Router::new()
        .route("/delay/ms/:delay_ms", get(delay))
        .route("/error", get(error))
}

#[debug_handler]
pub async fn delay(Path(delay_ms): Path<u64>) {
    debug!("MOCK SERVER ___ DELAY {delay_ms}ms");
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}

#[debug_handler]
pub async fn error() -> StatusCode {
    debug!("MOCK SERVER ___ ERR");
    StatusCode::INTERNAL_SERVER_ERROR
}
