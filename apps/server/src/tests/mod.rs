//! Test Module
//!
//! End-to-end test suite for the SentiMine backend.
//!
//! ## Test Categories
//! - `api_tests`: HTTP surface against a deterministic stub classifier
//! - `integration_tests`: full stack with a mocked remote inference API


mod helpers {
    use crate::routes::AppState;

    /// Serves the application on an ephemeral local port and returns its
    /// base URL. The server task lives for the rest of the test run.
    pub async fn spawn_app(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = crate::routes::router(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}
