use super::Password;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash,
    PasswordHasher, PasswordVerifier, Version,
};
use color_eyre::eyre::{eyre, Result, WrapErr};
use secrecy::{ExposeSecret, Secret};

// Well-formed argon2id hash no password is expected to match.
const UNMATCHABLE_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$c2FsdHNhbHQ$J4moa2MM0/6uf3HbY2Tf5Fux8JIBTwIhmhxGRE2gRZ0";

/// Salted argon2id PHC string stored in place of a password.
#[derive(Debug, Clone)]
pub struct CredentialHash(Secret<String>);

impl PartialEq for CredentialHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl CredentialHash {
    /// Wraps a hash read back from storage, checking it is a PHC string.
    pub fn parse(s: Secret<String>) -> Result<Self> {
        PasswordHash::new(s.expose_secret())
            .wrap_err("Failed to parse password hash")?;
        Ok(Self(s))
    }

    pub async fn from_password(password: &Password) -> Result<Self> {
        let hash = compute_password_hash(password.as_ref().to_owned()).await?;
        Ok(Self(hash))
    }

    /// Succeeds only if `candidate` hashes to this value.
    pub async fn verify(&self, candidate: &Password) -> Result<()> {
        verify_password_hash(self.0.to_owned(), candidate.as_ref().to_owned())
            .await
    }

    /// Spends the same hashing work as [`CredentialHash::verify`] for an
    /// account that does not exist. Always fails.
    pub async fn verify_unknown(candidate: &Password) -> Result<()> {
        verify_password_hash(
            Secret::new(UNMATCHABLE_HASH.to_owned()),
            candidate.as_ref().to_owned(),
        )
        .await?;
        Err(eyre!("no such account"))
    }
}

impl AsRef<Secret<String>> for CredentialHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<()> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash =
                PasswordHash::new(expected_password_hash.expose_secret())?;

            Argon2::default()
                .verify_password(
                    password_candidate.expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .wrap_err("failed to verify password hash")
        })
    })
    .await?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(
    password: Secret<String>,
) -> Result<Secret<String>> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let salt = SaltString::generate(&mut rand::thread_rng());
            let password_hash = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None)?,
            )
            .hash_password(password.expose_secret().as_bytes(), &salt)?
            .to_string();

            Ok(Secret::new(password_hash))
        })
    })
    .await?
}
