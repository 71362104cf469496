use serde::Deserialize;

use drl_core::config::Config;

/// Portal configuration loaded from environment variables.
///
/// | Variable | Default |
/// |----------|---------|
/// | `DATABASE_URL` | required |
/// | `PORTAL_PORT` | `5000` |
/// | `SESSION_SECRET` | required |
/// | `COOKIE_SECURE` | `false` |
/// | `SESSION_TTL_SECS` | `604800` |
/// | `BCRYPT_COST` | `12` |
/// | `DEFAULT_PASSWORD` | `123456` |
/// | `RUN_MIGRATIONS` | `true` |
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    pub database_url: String,
    #[serde(default = "default_port")]
    pub portal_port: u16,
    /// HMAC key for session cookies.
    pub session_secret: String,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Password given to accounts created with an empty password field.
    #[serde(default = "default_password")]
    pub default_password: String,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Config for PortalConfig {}

fn default_port() -> u16 {
    5000
}

fn default_session_ttl() -> u64 {
    drl_auth_types::cookie::SESSION_TTL
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_password() -> String {
    "123456".to_owned()
}

fn default_run_migrations() -> bool {
    true
}
