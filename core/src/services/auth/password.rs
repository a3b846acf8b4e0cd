use crate::errors::{AuthError, DomainError};

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// bcrypt hashing with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::Auth(AuthError::PasswordHash(e.to_string())))
    }

    /// A malformed stored hash counts as a mismatch
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
