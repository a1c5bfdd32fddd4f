use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        match name.trim().chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name.trim().to_owned())),
        }
    }
}

impl AsRef<String> for PersonName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_person_names() {
    let valid_names = ["a".to_string(), "a".repeat(255), "Ana María".into()];
    for valid_name in valid_names.iter() {
        let parsed = PersonName::parse(valid_name.to_owned())
            .expect("Failed to parse valid name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_empty_person_names() {
    for empty in ["", "   "] {
        let result = PersonName::parse(empty.to_string());
        assert_eq!(result.unwrap_err().as_ref(), "Name cannot be empty");
    }
}

#[test]
fn test_long_person_names() {
    let result = PersonName::parse("a".repeat(256));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max name length is 255 characters"
    );
}
