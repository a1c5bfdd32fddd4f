use super::ValidationError;
use secrecy::{ExposeSecret, Secret};

const MIN_CHARACTERS: usize = 8;
const MAX_CHARACTERS: usize = 128;

/// A plain-text password as typed in by a manager or employee. Only ever
/// held long enough to be hashed or checked against a stored hash.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(s: Secret<String>) -> Result<Password, ValidationError> {
        let char_count = s.expose_secret().chars().count();

        if char_count < MIN_CHARACTERS {
            return Err(ValidationError::new(format!(
                "Password too short. Should be {MIN_CHARACTERS} to {MAX_CHARACTERS} characters."
            )));
        }

        if char_count > MAX_CHARACTERS {
            return Err(ValidationError::new(format!(
                "Password too long. Should be {MIN_CHARACTERS} to {MAX_CHARACTERS} characters."
            )));
        }

        Ok(Self(s))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
