use std::sync::Arc;

use encore::config::ConfigManager;
use encore::models::{RecommendationMode, RequestKind};
use encore::session::{SessionManager, SignUpDetails, SocialProvider};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("encore=debug")
        .try_init();
}

fn session() -> (SessionManager, TempDir) {
    let dir = tempfile::tempdir().expect("cannot create temp dir");
    let config = Arc::new(ConfigManager::with_path(dir.path().join("config.json")));
    (SessionManager::new(config), dir)
}

fn sign_up_details() -> SignUpDetails {
    SignUpDetails {
        name: "Jisoo Han".to_string(),
        nickname: "jisoo".to_string(),
        phone: "010-1234-5678".to_string(),
    }
}

#[tokio::test]
async fn test_default_profile() {
    init_tracing();
    // Arrange
    let (session, _dir) = session();
    // Act
    let profile = session.profile().await;
    // Assert
    assert_eq!(profile.name, "Chulsoo Kim");
    assert_eq!(profile.nickname, "User");
    assert_eq!(profile.genres, vec!["Ballad", "Jazz"]);
    assert_eq!(profile.recommendation_count, 15);
    assert!(!session.is_signed_in().await);
}

#[tokio::test]
async fn test_record_recommendation_persists() {
    init_tracing();
    // Arrange
    let (session, dir) = session();
    // Act
    let count = session.record_recommendation().await;
    // Assert
    assert_eq!(count, 16);

    // A fresh session over the same file sees the bumped counter
    let config = Arc::new(ConfigManager::with_path(dir.path().join("config.json")));
    let reloaded = SessionManager::new(config);
    assert_eq!(reloaded.profile().await.recommendation_count, 16);
}

#[tokio::test]
async fn test_sign_up_and_complete_profile() {
    init_tracing();
    // Arrange
    let (session, _dir) = session();
    session.sign_up(sign_up_details()).await;

    // Act
    let profile = session
        .complete_profile(vec!["Rock".to_string()], RecommendationMode::Ai)
        .await
        .expect("complete_profile failed");

    // Assert: the pending sign-up replaces the default profile
    assert_eq!(profile.name, "Jisoo Han");
    assert_eq!(profile.nickname, "jisoo");
    assert_eq!(profile.genres, vec!["Rock"]);
    assert_eq!(profile.mode, RecommendationMode::Ai);
    assert_eq!(profile.recommendation_count, 0);
    assert_eq!(profile.join_date.len(), 10, "join date is YYYY-MM-DD");
    assert!(session.is_signed_in().await);
}

#[tokio::test]
async fn test_skip_profile_keeps_defaults() {
    init_tracing();
    // Arrange
    let (session, _dir) = session();
    session.sign_up(sign_up_details()).await;
    // Act
    let profile = session.skip_profile().await.expect("skip_profile failed");
    // Assert
    assert_eq!(profile.name, "Jisoo Han");
    assert!(profile.genres.is_empty());
    assert_eq!(profile.mode, RecommendationMode::Preference);
    assert!(session.is_signed_in().await);
}

#[tokio::test(start_paused = true)]
async fn test_submit_request() {
    init_tracing();
    // Arrange
    let (session, _dir) = session();

    // Act / Assert: validation rejects before the round trip
    let err = session
        .submit_request(RequestKind::BugReport, "   ".to_string())
        .await
        .expect_err("empty content must be rejected");
    assert_eq!(err.to_string(), "Request details cannot be empty");

    let err = session
        .submit_request(RequestKind::BugReport, "x".repeat(1001))
        .await
        .expect_err("oversized content must be rejected");
    assert!(err.to_string().contains("1000"));

    // A valid request is accepted after the simulated round trip
    session
        .submit_request(RequestKind::FeatureRequest, "Add a queue view".to_string())
        .await
        .expect("submit_request failed");
    let requests = session.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].kind, RequestKind::FeatureRequest);
    assert_eq!(requests[0].content, "Add a queue view");
}

#[tokio::test]
async fn test_sign_in_and_out() {
    init_tracing();
    // Arrange
    let (session, _dir) = session();
    assert!(!session.is_signed_in().await);
    // Act
    session.sign_in("jisoo").await;
    assert!(session.is_signed_in().await);
    session.sign_out().await;
    // Assert
    assert!(!session.is_signed_in().await);

    session.sign_in_social(SocialProvider::Kakao).await;
    assert!(session.is_signed_in().await);
}
