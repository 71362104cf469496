use tracing::info;

use drl_domain::role::Role;

use crate::domain::repository::{AccountRepository, PasswordHasher};
use crate::domain::types::{Account, Caller, NewAccount};
use crate::error::PortalError;

/// Blank form fields mean "not provided".
fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_role(raw: &str) -> Result<Role, PortalError> {
    raw.trim().parse().map_err(|_| PortalError::InvalidRole)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<R: AccountRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: AccountRepository, H: PasswordHasher> LoginUseCase<R, H> {
    pub async fn execute(&self, username: &str, password: &str) -> Result<Account, PortalError> {
        let account = self
            .repo
            .find_by_username(username.trim())
            .await?
            .ok_or(PortalError::InvalidCredentials)?;
        if !self.hasher.verify(password, &account.password_hash).await? {
            return Err(PortalError::InvalidCredentials);
        }
        info!(user_id = account.id, role = %account.role, "signed in");
        Ok(account)
    }
}

// ── ResolveCaller ────────────────────────────────────────────────────────────

/// Load the account named by a session. A deleted account ends the session.
pub struct ResolveCallerUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> ResolveCallerUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<Account, PortalError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(PortalError::Unauthenticated)
    }
}

// ── ListAccounts ─────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> ListAccountsUseCase<R> {
    pub async fn execute(&self, caller: Caller) -> Result<Vec<Account>, PortalError> {
        caller.require(Role::Admin)?;
        self.repo.list().await
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> GetAccountUseCase<R> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<Account, PortalError> {
        caller.require(Role::Admin)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PortalError::UserNotFound)
    }
}

// ── CreateAccount ────────────────────────────────────────────────────────────

/// Raw account form. Every field may be blank.
#[derive(Debug, Clone, Default)]
pub struct AccountInput {
    pub username: String,
    pub fullname: String,
    pub password: String,
    pub role: String,
    pub student_id: String,
    pub class_name: String,
}

/// A created account and the plaintext password it was given.
#[derive(Debug, Clone)]
pub struct CreatedAccount {
    pub account: Account,
    pub password: String,
}

pub struct CreateAccountUseCase<R: AccountRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
    /// Used when the form's password field is blank.
    pub default_password: String,
}

impl<R: AccountRepository, H: PasswordHasher> CreateAccountUseCase<R, H> {
    pub async fn execute(
        &self,
        caller: Caller,
        input: AccountInput,
    ) -> Result<CreatedAccount, PortalError> {
        caller.require(Role::Admin)?;
        let role = parse_role(&input.role)?;
        let username = non_blank(&input.username).ok_or(PortalError::MissingData)?;
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(PortalError::UsernameTaken);
        }
        let password = if input.password.is_empty() {
            self.default_password.clone()
        } else {
            input.password
        };
        let new_account = NewAccount {
            username: username.to_owned(),
            fullname: input.fullname.trim().to_owned(),
            password_hash: self.hasher.hash(&password).await?,
            role,
            student_id: non_blank(&input.student_id).map(str::to_owned),
            class_name: non_blank(&input.class_name).map(str::to_owned),
        };
        let account = self.repo.create(&new_account).await?;
        info!(user_id = account.id, role = %account.role, by = caller.user_id, "account created");
        Ok(CreatedAccount { account, password })
    }
}

// ── UpdateAccount ────────────────────────────────────────────────────────────

pub struct UpdateAccountUseCase<R: AccountRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: AccountRepository, H: PasswordHasher> UpdateAccountUseCase<R, H> {
    /// Blank fields keep their current value. The password is re-hashed
    /// only when a new one is given.
    pub async fn execute(
        &self,
        caller: Caller,
        id: i32,
        input: AccountInput,
    ) -> Result<Account, PortalError> {
        caller.require(Role::Admin)?;
        let mut account = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PortalError::UserNotFound)?;

        if let Some(role) = non_blank(&input.role) {
            account.role = parse_role(role)?;
        }
        if let Some(username) = non_blank(&input.username) {
            if username != account.username {
                if self.repo.find_by_username(username).await?.is_some() {
                    return Err(PortalError::UsernameTaken);
                }
                account.username = username.to_owned();
            }
        }
        if let Some(fullname) = non_blank(&input.fullname) {
            account.fullname = fullname.to_owned();
        }
        if let Some(student_id) = non_blank(&input.student_id) {
            account.student_id = Some(student_id.to_owned());
        }
        if let Some(class_name) = non_blank(&input.class_name) {
            account.class_name = Some(class_name.to_owned());
        }
        if !input.password.is_empty() {
            account.password_hash = self.hasher.hash(&input.password).await?;
        }

        self.repo.update(&account).await?;
        info!(user_id = account.id, by = caller.user_id, "account updated");
        Ok(account)
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> DeleteAccountUseCase<R> {
    pub async fn execute(&self, caller: Caller, id: i32) -> Result<(), PortalError> {
        caller.require(Role::Admin)?;
        if !self.repo.delete(id).await? {
            return Err(PortalError::UserNotFound);
        }
        info!(user_id = id, by = caller.user_id, "account deleted");
        Ok(())
    }
}
