//! Integration tests for AppContext lifecycle
//!
//! Verify that the context wires the right adapters, follows the auth
//! provider, runs the scripted session and shuts down cleanly.

use std::time::Duration;

use kindred_app::context::{AppContext, StorageMode};
use kindred_app::demo;
use kindred_common::assert_eventually_async;
use kindred_core::LoadOutcome;
use kindred_domain::{BackendConfig, Config, ProfileDocument, SwipeDirection, UserIdentity};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_default_config_uses_in_memory_backends() {
    let ctx = AppContext::new_with_config(Config::default()).await.expect("context");

    assert_eq!(ctx.storage, StorageMode::InMemory);
    assert_eq!(ctx.store.current_user(), None);

    ctx.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn test_demo_session_round_trip() {
    let ctx = AppContext::new_with_config(Config::default()).await.expect("context");

    let summary = demo::run(&ctx).await.expect("demo runs");

    assert_eq!(summary.load, Some(LoadOutcome::Missing));
    let directions: Vec<SwipeDirection> = summary.decisions.iter().map(|d| d.direction).collect();
    assert_eq!(directions, [SwipeDirection::Right, SwipeDirection::Left, SwipeDirection::Right]);
    let ids: Vec<&str> = summary.decisions.iter().map(|d| d.candidate_id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(summary.remaining, 1);

    assert!(summary.saved);
    assert_eq!(summary.profile.name, "Avery");
    assert_eq!(summary.profile.social_interests, ["Boba", "Cycling"]);

    // Signing out resets the in-memory profile.
    assert_eq!(ctx.store.current_user(), None);
    assert_eq!(ctx.store.document(), ProfileDocument::default());

    // Signing back in loads what the session saved.
    let outcome = ctx.sign_in(UserIdentity::new(demo::DEMO_USER_ID)).await;
    assert_eq!(outcome, Some(LoadOutcome::Loaded));
    assert_eq!(ctx.store.document().location, "Oakland");

    ctx.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn test_auth_provider_drives_the_store() {
    let ctx = AppContext::new_with_config(Config::default()).await.expect("context");

    ctx.auth.sign_in(UserIdentity::new("u-42"));
    assert_eventually_async!(Duration::from_secs(2), async {
        ctx.store.current_user().is_some_and(|user| user.uid == "u-42")
    });

    ctx.store.set_field(kindred_domain::ProfileField::Name, "Kai").expect("edit");
    ctx.auth.sign_out();
    assert_eventually_async!(Duration::from_secs(2), async {
        ctx.store.current_user().is_none() && ctx.store.document().name.is_empty()
    });

    ctx.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn test_remote_document_backend_is_used_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profiles/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Liana", "age": "24"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        backend: BackendConfig {
            document_base_url: Some(server.uri()),
            max_attempts: 1,
            ..BackendConfig::default()
        },
        ..Config::default()
    };
    let ctx = AppContext::new_with_config(config).await.expect("context");
    assert_eq!(ctx.storage, StorageMode::Remote);

    let outcome = ctx.sign_in(UserIdentity::new("u1")).await;
    assert_eq!(outcome, Some(LoadOutcome::Loaded));
    assert_eq!(ctx.store.document().name, "Liana");
    assert_eq!(ctx.store.document().age, "24");

    ctx.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn test_invalid_backend_url_fails_fast() {
    let config = Config {
        backend: BackendConfig {
            document_base_url: Some("not a url".into()),
            ..BackendConfig::default()
        },
        ..Config::default()
    };

    assert!(AppContext::new_with_config(config).await.is_err());
}
