use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref USERNAME_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9._-]{1,64}$").expect("valid username regex");
}

/// Login name of a manager or an employee. Unique per restaurant for
/// employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        if USERNAME_PATTERN.is_match(name) {
            return Ok(Self(name.to_owned()));
        }
        Err(ValidationError::new(String::from(
            "Username must be 1 to 64 letters, digits, '.', '_' or '-'",
        )))
    }
}

impl AsRef<String> for Username {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
