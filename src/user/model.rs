use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    pub fn admin(&self) -> bool {
        self.is_admin || self.role == Role::Admin
    }

    pub fn staff(&self) -> bool {
        self.admin() || matches!(self.role, Role::Support | Role::Agent)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Support,
    Agent,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Support => "support",
            Role::Agent => "agent",
            Role::User => "user",
        }
    }
}

/// A user reference as the backend serializes it: either a bare id or a
/// populated record, depending on whether the endpoint expands the relation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(Id),
    Populated(Box<User>),
}

impl UserRef {
    pub fn id(&self) -> &Id {
        match self {
            UserRef::Id(id) => id,
            UserRef::Populated(user) => &user.id,
        }
    }

    /// Identity comparison; id string equality is the rule everywhere.
    pub fn is(&self, user: &User) -> bool {
        *self.id() == user.id
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        UserRef::Id(user.id.clone())
    }
}
