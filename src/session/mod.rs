mod store;

use serde::{Deserialize, Serialize};
pub use store::SessionStore;

/// The role a logged-in identity holds.
///
/// Persisted role strings are validated at the storage boundary: any value
/// other than `"student"` or `"instructor"` deserializes to the documented
/// default, [`Role::Student`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "instructor" => Role::Instructor,
            // role is user-controlled local data; unknown values fall back
            // to the default rather than failing the parse
            _ => Role::Student,
        })
    }
}

/// The single active identity of the client.
///
/// At most one session exists process-wide: created on successful login,
/// destroyed on logout, overwritten on profile-save. Owned exclusively by
/// [`SessionStore`]; everything else reads it through
/// [`SessionStore::current`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub identity_id: String,
    pub display_name: String,
    #[serde(alias = "Email")]
    pub email: String,
    pub role: Role,
    pub auth_token: String,
}

impl Session {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_instructor(&self) -> bool {
        self.role == Role::Instructor
    }
}

#[cfg(any(test, feature = "mocks"))]
impl Session {
    pub fn mock(role: Role) -> Self {
        Session {
            identity_id: "u1".to_owned(),
            display_name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            role,
            auth_token: "faketoken".to_owned(),
        }
    }
}
