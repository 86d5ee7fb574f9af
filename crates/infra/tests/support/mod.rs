//! Shared helpers for `kindred-infra` integration tests.

#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use kindred_infra::HttpClient;
use url::Url;
use wiremock::MockServer;

static TRACING: Once = Once::new();

/// Route adapter logs to the test harness output once per binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kindred_infra=debug,kindred_core=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Client with fast retries so failure paths stay quick.
pub fn fast_client() -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_secs(2))
        .base_backoff(Duration::from_millis(5))
        .max_attempts(2)
        .build()
        .expect("http client")
}

pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/v1/", server.uri())).expect("mock server url")
}
