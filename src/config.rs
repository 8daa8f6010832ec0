use std::env;
use std::path::PathBuf;

use chrono::Weekday;

use crate::error::ServiceError;

/// Immutable service configuration, read once at startup and passed down.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The single athlete identity this service manages credentials for.
    pub athlete_id: i64,
    pub client_id: String,
    pub client_secret: String,
    pub openai_api_key: String,
    /// Shared secret for the webhook subscription handshake.
    pub verify_token: String,
    /// Public URL the OAuth redirect lands on.
    pub redirect_uri: String,
    pub token_db_path: PathBuf,
    pub bind_addr: String,
    /// The weekly digest only runs on this day.
    pub summary_weekday: Weekday,
}

impl AppConfig {
    /// Read configuration from the environment. Missing or malformed values
    /// are startup errors, not per-request ones.
    pub fn from_env() -> Result<Self, ServiceError> {
        let athlete_id = required("ATHLETE_ID")?
            .parse::<i64>()
            .map_err(|err| ServiceError::InvalidInput(format!("ATHLETE_ID: {err}")))?;

        Ok(Self {
            athlete_id,
            client_id: required("STRAVA_CLIENT_ID")?,
            client_secret: required("STRAVA_CLIENT_SECRET")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            verify_token: required("STRAVA_VERIFY_TOKEN")?,
            redirect_uri: required("REDIRECT_URI")?,
            token_db_path: env::var("TOKEN_DB_PATH")
                .unwrap_or_else(|_| "tokens.db".into())
                .into(),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            summary_weekday: Weekday::Sun,
        })
    }
}

fn required(key: &str) -> Result<String, ServiceError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ServiceError::InvalidInput(format!(
            "{key} environment variable not set"
        ))),
    }
}
