use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::analysis::Workout;
use crate::error::ServiceError;

/// Token pair returned by the OAuth token endpoint for both the initial code
/// exchange and subsequent refreshes.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix epoch seconds.
    pub expires_at: i64,
}

/// The fitness platform as the orchestrator sees it: OAuth round-trips plus a
/// workout source and sink. Production talks to Strava; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait FitnessPlatform {
    async fn exchange(&self, code: &str) -> Result<TokenResponse, ServiceError>;
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ServiceError>;
    async fn list_recent(
        &self,
        access_token: &str,
        after_epoch: i64,
        before_epoch: i64,
    ) -> Result<Vec<Workout>, ServiceError>;
    async fn update_workout(
        &self,
        workout_id: i64,
        access_token: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    api_base: String,
    token_url: String,
}

impl StravaClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            api_base: "https://www.strava.com/api/v3".into(),
            token_url: "https://www.strava.com/oauth/token".into(),
        }
    }

    /// Point the client at a different API host, used by tests.
    pub fn with_base_urls(mut self, api_base: String, token_url: String) -> Self {
        self.api_base = api_base;
        self.token_url = token_url;
        self
    }

    /// Authorization URL the athlete visits to grant access.
    pub fn authorize_url(&self, redirect_uri: &str) -> String {
        format!(
            "https://www.strava.com/oauth/authorize?client_id={}&response_type=code&scope=activity:read_all,activity:write&approval_prompt=force&redirect_uri={}/exchange_token",
            self.client_id, redirect_uri
        )
    }

    async fn token_request(&self, grant: &[(&str, &str)]) -> Result<TokenResponse, ServiceError> {
        let mut query = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        query.extend_from_slice(grant);

        let response = self
            .http
            .post(&self.token_url)
            .query(&query)
            .send()
            .await
            .map_err(|err| ServiceError::CredentialRefreshFailed(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ServiceError::CredentialRefreshFailed(err.to_string()))?;

        if !status.is_success() {
            return Err(ServiceError::CredentialRefreshFailed(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|err| ServiceError::CredentialRefreshFailed(err.to_string()))
    }
}

#[async_trait]
impl FitnessPlatform for StravaClient {
    async fn exchange(&self, code: &str) -> Result<TokenResponse, ServiceError> {
        tracing::info!("exchanging authorization code for tokens");
        self.token_request(&[("code", code), ("grant_type", "authorization_code")])
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ServiceError> {
        tracing::info!("refreshing expired access token");
        self.token_request(&[
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .await
    }

    async fn list_recent(
        &self,
        access_token: &str,
        after_epoch: i64,
        before_epoch: i64,
    ) -> Result<Vec<Workout>, ServiceError> {
        let url = format!(
            "{}/activities?before={before_epoch}&after={after_epoch}",
            self.api_base
        );

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|err| ServiceError::WorkoutFetchFailed {
                status: 0,
                body: err.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ServiceError::WorkoutFetchFailed {
                status: status.as_u16(),
                body: err.to_string(),
            })?;

        if !status.is_success() {
            return Err(ServiceError::WorkoutFetchFailed {
                status: status.as_u16(),
                body,
            });
        }

        let workouts: Vec<Workout> =
            serde_json::from_str(&body).map_err(|err| ServiceError::WorkoutFetchFailed {
                status: status.as_u16(),
                body: err.to_string(),
            })?;

        tracing::info!(count = workouts.len(), "fetched recent workouts");
        Ok(workouts)
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        access_token: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ServiceError> {
        tracing::info!(workout_id, name, "updating workout on the platform");

        let response = self
            .http
            .put(format!("{}/activities/{workout_id}", self.api_base))
            .bearer_auth(access_token)
            .json(&json!({ "name": name, "description": description }))
            .send()
            .await
            .map_err(|_| ServiceError::WorkoutUpdateFailed { status: 0 })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::WorkoutUpdateFailed {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
