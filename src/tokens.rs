use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::ServiceError;
use crate::strava::TokenResponse;

/// Access credential as persisted for one athlete.
#[derive(Debug, Clone)]
pub struct StoredToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// File-backed credential store. A connection is opened and released per call;
/// the only state shared across requests is the database file itself. Reads
/// and writes are not coordinated, so two simultaneous refreshes for the same
/// athlete can race. Known and accepted for a single-athlete service.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Open the store, creating the schema when the file is new.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS access_tokens (
                 athlete_id INTEGER PRIMARY KEY,
                 token      TEXT NOT NULL,
                 expires_at INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS refresh_tokens (
                 athlete_id    INTEGER PRIMARY KEY,
                 refresh_token TEXT NOT NULL
             );",
        )?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, ServiceError> {
        Connection::open(&self.path).map_err(ServiceError::from)
    }

    pub fn access_token(&self, athlete_id: i64) -> Result<StoredToken, ServiceError> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                "SELECT token, expires_at FROM access_tokens WHERE athlete_id = ?1",
                params![athlete_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match row {
            Some((token, epoch)) => Ok(StoredToken {
                token,
                expires_at: Utc
                    .timestamp_opt(epoch, 0)
                    .single()
                    .ok_or_else(|| ServiceError::Store(format!("bad expiry epoch {epoch}")))?,
            }),
            None => Err(ServiceError::CredentialUnavailable(format!(
                "no access token on file for athlete {athlete_id}"
            ))),
        }
    }

    pub fn refresh_token(&self, athlete_id: i64) -> Result<String, ServiceError> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT refresh_token FROM refresh_tokens WHERE athlete_id = ?1",
            params![athlete_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| {
            ServiceError::CredentialUnavailable(format!(
                "no refresh token on file for athlete {athlete_id}"
            ))
        })
    }

    /// Upsert both halves of the credential pair.
    pub fn store_tokens(
        &self,
        athlete_id: i64,
        tokens: &TokenResponse,
    ) -> Result<(), ServiceError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO access_tokens (athlete_id, token, expires_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(athlete_id) DO UPDATE SET token = ?2, expires_at = ?3",
            params![athlete_id, tokens.access_token, tokens.expires_at],
        )?;
        conn.execute(
            "INSERT INTO refresh_tokens (athlete_id, refresh_token) VALUES (?1, ?2)
             ON CONFLICT(athlete_id) DO UPDATE SET refresh_token = ?2",
            params![athlete_id, tokens.refresh_token],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::open(dir.path().join("tokens.db")).expect("store opens");
        (dir, store)
    }

    #[test]
    fn missing_credential_is_reported_as_unavailable() {
        let (_dir, store) = store();
        assert!(matches!(
            store.access_token(42),
            Err(ServiceError::CredentialUnavailable(_))
        ));
        assert!(matches!(
            store.refresh_token(42),
            Err(ServiceError::CredentialUnavailable(_))
        ));
    }

    #[test]
    fn stored_tokens_round_trip() {
        let (_dir, store) = store();
        let expires = Utc::now() + Duration::hours(6);
        store
            .store_tokens(
                42,
                &TokenResponse {
                    access_token: "access".into(),
                    refresh_token: "refresh".into(),
                    expires_at: expires.timestamp(),
                },
            )
            .expect("store succeeds");

        let stored = store.access_token(42).expect("token present");
        assert_eq!(stored.token, "access");
        assert_eq!(stored.expires_at.timestamp(), expires.timestamp());
        assert!(!stored.is_expired(Utc::now()));
        assert_eq!(store.refresh_token(42).expect("refresh present"), "refresh");
    }

    #[test]
    fn storing_twice_overwrites() {
        let (_dir, store) = store();
        for token in ["first", "second"] {
            store
                .store_tokens(
                    42,
                    &TokenResponse {
                        access_token: token.into(),
                        refresh_token: format!("{token}-refresh"),
                        expires_at: Utc::now().timestamp(),
                    },
                )
                .expect("store succeeds");
        }

        assert_eq!(store.access_token(42).expect("token").token, "second");
        assert_eq!(store.refresh_token(42).expect("refresh"), "second-refresh");
    }
}
