use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Access code employees and managers type in to pick their restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantCode(String);

impl RestaurantCode {
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        match code.chars().count() {
            0 => Err(ValidationError::new(String::from(
                "Restaurant code cannot be empty",
            ))),
            x if x > 64 => Err(ValidationError::new(String::from(
                "Max restaurant code length is 64 characters",
            ))),
            _ if code.chars().any(char::is_whitespace) => {
                Err(ValidationError::new(String::from(
                    "Restaurant code cannot contain whitespace",
                )))
            }
            _ => Ok(Self(code.to_owned())),
        }
    }
}

impl AsRef<String> for RestaurantCode {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_restaurant_codes() {
    assert_eq!(
        RestaurantCode::parse(" CRAGGY1 ").unwrap().as_ref(),
        "CRAGGY1"
    );
    assert!(RestaurantCode::parse("").is_err());
    assert!(RestaurantCode::parse("two words").is_err());
    assert!(RestaurantCode::parse(&"x".repeat(65)).is_err());
}
