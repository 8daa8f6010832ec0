use chrono::{Duration, Utc};

use crate::analysis::{ClassifierConfig, build_prompt, classify};
use crate::error::ServiceError;
use crate::strava::FitnessPlatform;
use crate::summarizer::Summarizer;
use crate::tokens::TokenStore;

/// Title written onto the workout that closes the week.
const WEEKLY_DIGEST_TITLE: &str = "Week Finisher 🔥🔥";

/// Signature appended after every generated summary.
const SIGNATURE: &str = "\n\nYour friendly neighbourhood - Runrecap ✌️🏴‍☠️";

/// Drives one summary run end to end: credential check, workout fetch, prompt
/// build, summarizer call, platform write-back. Every external call is a
/// blocking round-trip executed in sequence; the first failure surfaces to the
/// caller and nothing that already happened is rolled back.
pub struct Orchestrator<P, S> {
    platform: P,
    summarizer: S,
    store: TokenStore,
    athlete_id: i64,
    classifier: ClassifierConfig,
}

impl<P: FitnessPlatform, S: Summarizer> Orchestrator<P, S> {
    pub fn new(platform: P, summarizer: S, store: TokenStore, athlete_id: i64) -> Self {
        Self {
            platform,
            summarizer,
            store,
            athlete_id,
            classifier: ClassifierConfig::default(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Persist a token pair obtained from the authorization-code exchange.
    pub async fn complete_authorization(&self, code: &str) -> Result<(), ServiceError> {
        let tokens = self.platform.exchange(code).await?;
        self.store.store_tokens(self.athlete_id, &tokens)
    }

    /// Current access token, refreshed through the platform first when the
    /// stored one has expired. The refreshed pair replaces the stored one and
    /// the fresh token is the one returned.
    pub async fn access_token(&self) -> Result<String, ServiceError> {
        let stored = self.store.access_token(self.athlete_id)?;
        if !stored.is_expired(Utc::now()) {
            return Ok(stored.token);
        }

        tracing::info!(athlete_id = self.athlete_id, "stored token expired");
        let refresh_token = self.store.refresh_token(self.athlete_id)?;
        let refreshed = self.platform.refresh(&refresh_token).await?;
        self.store.store_tokens(self.athlete_id, &refreshed)?;
        Ok(refreshed.access_token)
    }

    /// Expiry of the credential currently usable, refreshing first if needed.
    pub async fn token_status(&self) -> Result<chrono::DateTime<Utc>, ServiceError> {
        self.access_token().await?;
        Ok(self.store.access_token(self.athlete_id)?.expires_at)
    }

    /// Weekly digest: summarize the trailing seven days of workouts and write
    /// the result onto the given workout under the fixed week-finisher title.
    pub async fn run_weekly_digest(&self, target_workout_id: i64) -> Result<(), ServiceError> {
        let token = self.access_token().await?;
        let workouts = self.fetch_week(&token).await?;

        let prompt = build_prompt(&workouts);
        tracing::debug!(%prompt, "sending prompt to summarizer");

        let summary = self.summarizer.complete(&prompt).await?;
        tracing::info!(workout_id = target_workout_id, "summary generated");

        self.platform
            .update_workout(
                target_workout_id,
                &token,
                WEEKLY_DIGEST_TITLE,
                &format!("{summary}{SIGNATURE}"),
            )
            .await
    }

    /// Single-workout annotation: classify one recent workout, title it with
    /// its category and describe it with a summary of that workout alone.
    pub async fn annotate_workout(&self, workout_id: i64) -> Result<(), ServiceError> {
        let token = self.access_token().await?;
        let workouts = self.fetch_week(&token).await?;

        let workout = workouts
            .iter()
            .find(|workout| workout.id == workout_id)
            .ok_or_else(|| {
                ServiceError::InvalidInput(format!(
                    "workout {workout_id} is not among the recent workouts"
                ))
            })?;

        let category = classify(workout, &self.classifier);
        tracing::info!(workout_id, %category, "classified workout");

        let prompt = build_prompt(std::slice::from_ref(workout));
        let summary = self.summarizer.complete(&prompt).await?;

        self.platform
            .update_workout(
                workout_id,
                &token,
                &category.to_string(),
                &format!("{summary}{SIGNATURE}"),
            )
            .await
    }

    /// Workouts for the inclusive trailing 7-day window.
    async fn fetch_week(
        &self,
        token: &str,
    ) -> Result<Vec<crate::analysis::Workout>, ServiceError> {
        let now = Utc::now();
        let week_ago = now - Duration::days(7);
        self.platform
            .list_recent(token, week_ago.timestamp(), now.timestamp())
            .await
    }
}
