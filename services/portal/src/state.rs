use sea_orm::DatabaseConnection;

use drl_auth_types::identity::SessionKey;

use crate::config::PortalConfig;
use crate::infra::db::{
    DbAccountRepository, DbActivityRepository, DbEvaluationRepository, DbRegistrationRepository,
    DbReportRepository,
};
use crate::infra::password::BcryptHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_secret: String,
    pub cookie_secure: bool,
    pub session_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub default_password: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &PortalConfig) -> Self {
        Self {
            db,
            session_secret: config.session_secret.clone(),
            cookie_secure: config.cookie_secure,
            session_ttl_secs: config.session_ttl_secs,
            bcrypt_cost: config.bcrypt_cost,
            default_password: config.default_password.clone(),
        }
    }

    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn activity_repo(&self) -> DbActivityRepository {
        DbActivityRepository {
            db: self.db.clone(),
        }
    }

    pub fn registration_repo(&self) -> DbRegistrationRepository {
        DbRegistrationRepository {
            db: self.db.clone(),
        }
    }

    pub fn evaluation_repo(&self) -> DbEvaluationRepository {
        DbEvaluationRepository {
            db: self.db.clone(),
        }
    }

    pub fn report_repo(&self) -> DbReportRepository {
        DbReportRepository {
            db: self.db.clone(),
        }
    }

    pub fn hasher(&self) -> BcryptHasher {
        BcryptHasher {
            cost: self.bcrypt_cost,
        }
    }
}

impl SessionKey for AppState {
    fn session_secret(&self) -> &str {
        &self.session_secret
    }
}
