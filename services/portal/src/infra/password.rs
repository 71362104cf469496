use anyhow::Context as _;
use tokio::task::spawn_blocking;

use crate::domain::repository::PasswordHasher;
use crate::error::PortalError;

/// bcrypt-backed [`PasswordHasher`].
///
/// Hashing runs on tokio's blocking pool; at the default cost one call takes
/// a few hundred milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    pub cost: u32,
}

impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, PortalError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hash = spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("join password hash task")?
            .context("hash password")?;
        Ok(hash)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PortalError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("join password verify task")?
            .context("verify password")?;
        Ok(matches)
    }
}
