use super::{RestaurantId, Username, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Employee,
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            _ => Err(ValidationError::new(format!("Invalid role: {s}"))),
        }
    }
}

/// Who is calling: established at login and handed explicitly to every
/// operation that needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub restaurant_id: RestaurantId,
    pub role: Role,
    pub username: Username,
}

impl Session {
    pub fn new(
        restaurant_id: RestaurantId,
        role: Role,
        username: Username,
    ) -> Self {
        Self {
            restaurant_id,
            role,
            username,
        }
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}

#[test]
fn test_role_parse() {
    assert_eq!(Role::from_str("manager").unwrap(), Role::Manager);
    assert_eq!(Role::from_str("employee").unwrap(), Role::Employee);
    assert!(Role::from_str("Manager").is_err());
}

#[test]
fn test_session_serializes_boundary_fields() {
    let session = Session::new(
        RestaurantId::default(),
        Role::Employee,
        Username::parse("ted").unwrap(),
    );
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["role"], "employee");
    assert_eq!(json["username"], "ted");
    assert_eq!(
        json["restaurantId"],
        session.restaurant_id.as_ref().to_string()
    );
}
