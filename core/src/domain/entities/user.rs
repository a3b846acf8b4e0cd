//! User entity representing a registered marketplace account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role carried in the access token and checked by handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Member,
    Admin,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Admin => "Admin",
            Role::Staff => "Staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Member" => Ok(Role::Member),
            "Admin" => Ok(Role::Admin),
            "Staff" => Ok(Role::Staff),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountStatus {
    #[default]
    Active,
    Locked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Locked => "Locked",
        }
    }

    /// The opposite status, used by the admin lock toggle
    pub fn toggled(self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Locked,
            AccountStatus::Locked => AccountStatus::Active,
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(AccountStatus::Active),
            "Locked" => Ok(AccountStatus::Locked),
            other => Err(format!("Unknown account status: {}", other)),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,

    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn is_staff_or_admin(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Staff)
    }
}

/// Data needed to persist a new account; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl NewUser {
    /// A regular member account in the active state
    pub fn member(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            role: Role::Member,
            status: AccountStatus::Active,
        }
    }

    pub(crate) fn into_user(self, user_id: i64) -> User {
        User {
            user_id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            status: self.status,
            created_at: Utc::now(),
        }
    }
}
