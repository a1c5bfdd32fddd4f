use super::{CredentialHash, RestaurantCode, RestaurantId, Username};

#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub code: RestaurantCode,
    pub manager: ManagerCredentials,
}

impl Restaurant {
    pub fn new(code: RestaurantCode, manager: ManagerCredentials) -> Self {
        Self {
            id: RestaurantId::default(),
            code,
            manager,
        }
    }
}

/// The single manager login embedded in each restaurant document.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerCredentials {
    pub username: Username,
    pub password_hash: CredentialHash,
}
