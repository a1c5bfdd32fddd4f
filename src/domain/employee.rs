use super::{CredentialHash, EmployeeId, PersonName, Username};

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub username: Username,
    pub password_hash: CredentialHash,
}

impl Employee {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        username: Username,
        password_hash: CredentialHash,
    ) -> Self {
        Self {
            id: EmployeeId::default(),
            first_name,
            last_name,
            username,
            password_hash,
        }
    }

    /// "First Last", as shown in the manager's request queue.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.as_ref(), self.last_name.as_ref())
    }
}
