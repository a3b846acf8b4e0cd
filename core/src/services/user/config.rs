use am_shared::config::AuthConfig;

#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub min_password_length: usize,
    pub bcrypt_cost: u32,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl From<&AuthConfig> for UserServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            min_password_length: config.min_password_length,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
