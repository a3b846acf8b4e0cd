//! Role gates evaluated at the top of each handler.

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;

/// Access level an operation demands from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any valid token
    Authenticated,
    Admin,
    /// Either `Admin` or `Staff`
    AdminOrStaff,
}

/// `true` when the caller holding `claims` satisfies `requirement`
pub fn authorize(claims: &Claims, requirement: RoleRequirement) -> bool {
    match requirement {
        RoleRequirement::Authenticated => true,
        RoleRequirement::Admin => claims.role == Role::Admin,
        RoleRequirement::AdminOrStaff => matches!(claims.role, Role::Admin | Role::Staff),
    }
}
