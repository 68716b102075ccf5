use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::Mutex as TokioMutex;

use crate::config::ConfigManager;
use crate::models::{
    DateTime, DeveloperRequest, MAX_REQUEST_CONTENT, RecommendationMode, RequestKind, UserProfile,
};

/// Simulated round trip before a developer request is accepted.
const SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// Social identity providers offered on the sign-in form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialProvider {
    Kakao,
    Naver,
}

impl SocialProvider {
    pub fn label(self) -> &'static str {
        match self {
            Self::Kakao => "Kakao",
            Self::Naver => "Naver",
        }
    }
}

/// Account details collected by the sign-up form.
#[derive(Clone, Debug, Default)]
pub struct SignUpDetails {
    pub name: String,
    pub nickname: String,
    pub phone: String,
}

#[derive(Default)]
struct SessionState {
    profile: UserProfile,
    signed_in: bool,
    pending_signup: Option<SignUpDetails>,
    requests: Vec<DeveloperRequest>,
}

/// Account state for the current run plus the persisted profile.
pub struct SessionManager {
    config: Arc<ConfigManager>,
    state: TokioMutex<SessionState>,
}

impl SessionManager {
    pub fn new(config: Arc<ConfigManager>) -> Self {
        let state = SessionState {
            profile: config.load().profile,
            ..Default::default()
        };
        Self {
            config,
            state: TokioMutex::new(state),
        }
    }

    pub async fn profile(&self) -> UserProfile {
        let state = self.state.lock().await;
        state.profile.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        let state = self.state.lock().await;
        state.signed_in
    }

    /// Mark the session signed in. Credentials are not verified anywhere yet.
    pub async fn sign_in(&self, nickname: &str) {
        let mut state = self.state.lock().await;
        state.signed_in = true;
        tracing::info!(nickname, "Signed in");
    }

    /// Mark the session signed in through a social provider.
    pub async fn sign_in_social(&self, provider: SocialProvider) {
        let mut state = self.state.lock().await;
        state.signed_in = true;
        tracing::info!(provider = provider.label(), "Signed in via social provider");
    }

    /// Stash sign-up details until the profile setup step finishes.
    pub async fn sign_up(&self, details: SignUpDetails) {
        let mut state = self.state.lock().await;
        tracing::info!(nickname = %details.nickname, "Registered new account");
        state.pending_signup = Some(details);
    }

    /// Finish sign-up with the chosen genres and recommendation mode.
    pub async fn complete_profile(
        &self,
        genres: Vec<String>,
        mode: RecommendationMode,
    ) -> Result<UserProfile, anyhow::Error> {
        let mut state = self.state.lock().await;
        if let Some(details) = state.pending_signup.take() {
            state.profile = Self::fresh_profile(details);
        }
        state.profile.genres = genres;
        state.profile.mode = mode;
        state.signed_in = true;
        self.config.set_profile(&state.profile)?;
        Ok(state.profile.clone())
    }

    /// Finish sign-up keeping default taste settings.
    pub async fn skip_profile(&self) -> Result<UserProfile, anyhow::Error> {
        let mut state = self.state.lock().await;
        if let Some(details) = state.pending_signup.take() {
            state.profile = Self::fresh_profile(details);
        }
        state.signed_in = true;
        self.config.set_profile(&state.profile)?;
        Ok(state.profile.clone())
    }

    /// Replace the stored profile with edited values.
    pub async fn update_profile(&self, profile: UserProfile) -> Result<(), anyhow::Error> {
        let mut state = self.state.lock().await;
        state.profile = profile;
        self.config.set_profile(&state.profile)
    }

    /// Bump the recommendation counter when a conversation ends with picks.
    pub async fn record_recommendation(&self) -> u32 {
        let mut state = self.state.lock().await;
        state.profile.recommendation_count += 1;
        if let Err(err) = self.config.set_profile(&state.profile) {
            tracing::warn!(?err, "Cannot persist recommendation counter");
        }
        state.profile.recommendation_count
    }

    /// Submit a developer request after the simulated round trip.
    pub async fn submit_request(
        &self,
        kind: RequestKind,
        content: String,
    ) -> Result<(), anyhow::Error> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(anyhow!("Request details cannot be empty"));
        }
        if content.chars().count() > MAX_REQUEST_CONTENT {
            return Err(anyhow!(
                "Request details cannot exceed {MAX_REQUEST_CONTENT} characters"
            ));
        }
        tokio::time::sleep(SUBMIT_DELAY).await;
        let mut state = self.state.lock().await;
        tracing::info!(kind = kind.label(), "Accepted developer request");
        state.requests.push(DeveloperRequest {
            kind,
            content,
            submit_time: DateTime::now(),
        });
        Ok(())
    }

    /// Requests accepted during this run.
    pub async fn requests(&self) -> Vec<DeveloperRequest> {
        let state = self.state.lock().await;
        state.requests.clone()
    }

    pub async fn sign_out(&self) {
        let mut state = self.state.lock().await;
        state.signed_in = false;
        tracing::info!("Signed out");
    }

    fn fresh_profile(details: SignUpDetails) -> UserProfile {
        UserProfile {
            name: details.name,
            nickname: details.nickname,
            image: None,
            genres: Vec::new(),
            mode: RecommendationMode::default(),
            join_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            recommendation_count: 0,
        }
    }
}
