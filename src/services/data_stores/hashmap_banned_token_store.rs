use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

use crate::domain::{BannedTokenStore, BannedTokenStoreError};

/// In-memory logout list. Entries are dropped once the token would have
/// expired anyway.
#[derive(Default)]
pub struct HashmapBannedTokenStore {
    banned_tokens: HashMap<String, i64>,
}

#[async_trait::async_trait]
impl BannedTokenStore for HashmapBannedTokenStore {
    async fn ban_token(
        &mut self,
        token: &Secret<String>,
        expires_at: i64,
    ) -> Result<(), BannedTokenStoreError> {
        let now = Utc::now().timestamp();
        self.banned_tokens.retain(|_, expiry| *expiry > now);
        self.banned_tokens
            .insert(token.expose_secret().to_owned(), expires_at);
        Ok(())
    }

    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError> {
        match self.banned_tokens.get(token.expose_secret()) {
            Some(_) => Err(BannedTokenStoreError::BannedToken),
            None => Ok(()),
        }
    }
}
