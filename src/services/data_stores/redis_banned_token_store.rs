use chrono::Utc;
use color_eyre::eyre::{eyre, WrapErr};
use redis::{Commands, Connection};
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{BannedTokenStore, BannedTokenStoreError};

pub struct RedisBannedTokenStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisBannedTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for RedisBannedTokenStore {
    #[tracing::instrument(name = "Banning session token in Redis", skip_all)]
    async fn ban_token(
        &mut self,
        token: &Secret<String>,
        expires_at: i64,
    ) -> Result<(), BannedTokenStoreError> {
        // Redis rejects a zero expiry.
        let ttl_seconds = u64::try_from(expires_at - Utc::now().timestamp())
            .unwrap_or(1)
            .max(1);

        self.conn
            .write()
            .await
            .set_ex::<_, _, ()>(key_for(token), true, ttl_seconds)
            .wrap_err("failed to set banned token in Redis")
            .map_err(BannedTokenStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Checking Redis for banned token", skip_all)]
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError> {
        let banned: bool = self
            .conn
            .write()
            .await
            .exists(key_for(token))
            .map_err(|e| {
                BannedTokenStoreError::UnexpectedError(
                    eyre!(e).wrap_err("failed to query banned token in Redis"),
                )
            })?;

        if banned {
            return Err(BannedTokenStoreError::BannedToken);
        }
        Ok(())
    }
}

const BANNED_TOKEN_KEY_PREFIX: &str = "shift_requests:banned_token:";

fn key_for(token: &Secret<String>) -> String {
    format!("{BANNED_TOKEN_KEY_PREFIX}{}", token.expose_secret())
}
