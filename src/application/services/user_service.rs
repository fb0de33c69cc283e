//! User Service
//!
//! Account registration.

use std::sync::Arc;

use async_trait::async_trait;
use crate::application::dto::request::RegisterRequest;
use crate::domain::{User, UserRepository};
use crate::infrastructure::metrics;
use crate::shared::error::{AppError, FieldErrors};
use crate::shared::password::PasswordManager;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{field_errors, required};

const PHONE_TAKEN: &str = "user with this phone already exists.";

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account.
    async fn register(&self, request: RegisterRequest) -> Result<User, UserError>;
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Invalid registration: {0:?}")]
    Validation(FieldErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => AppError::Validation(errors),
            UserError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AppError> for UserError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(errors) => UserError::Validation(errors),
            other => UserError::Internal(other.to_string()),
        }
    }
}

fn phone_taken() -> UserError {
    UserError::Validation(FieldErrors::from([(
        "phone".to_string(),
        vec![PHONE_TAKEN.to_string()],
    )]))
}

/// UserService implementation
pub struct UserServiceImpl<U: ?Sized> {
    user_repo: Arc<U>,
    passwords: PasswordManager,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U: UserRepository + ?Sized> UserServiceImpl<U> {
    pub fn new(
        user_repo: Arc<U>,
        passwords: PasswordManager,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            passwords,
            id_generator,
        }
    }
}

#[async_trait]
impl<U: UserRepository + ?Sized + 'static> UserService for UserServiceImpl<U> {
    async fn register(&self, request: RegisterRequest) -> Result<User, UserError> {
        request
            .validate_registration()
            .map_err(|e| UserError::Validation(field_errors(&e)))?;

        let phone = required(request.phone, "phone")?;
        let password = required(request.password, "password")?;

        if self.user_repo.phone_exists(&phone).await? {
            return Err(phone_taken());
        }

        let password_hash = self
            .passwords
            .hash(&password)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        let user = User::new(self.id_generator.generate(), phone, password_hash);
        let created = match self.user_repo.create(&user).await {
            Ok(created) => created,
            // Lost a race with a concurrent registration of the same phone.
            Err(AppError::Conflict(_)) => return Err(phone_taken()),
            Err(e) => return Err(e.into()),
        };

        metrics::record_user_registered();
        tracing::info!(user_id = created.id, "User registered");

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PasswordSettings;
    use crate::infrastructure::memory::MemoryDatabase;

    fn service(db: Arc<MemoryDatabase>) -> UserServiceImpl<MemoryDatabase> {
        let passwords = PasswordManager::new(&PasswordSettings {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        UserServiceImpl::new(db, passwords, Arc::new(SnowflakeGenerator::new(1)))
    }

    fn request(phone: &str, password2: &str) -> RegisterRequest {
        RegisterRequest {
            phone: Some(phone.into()),
            password: Some("password!1".into()),
            password2: Some(password2.into()),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let db = Arc::new(MemoryDatabase::new());
        let user = service(db.clone())
            .register(request("01012345678", "password!1"))
            .await
            .unwrap();

        assert_eq!(user.phone, "01012345678");
        assert_ne!(user.password_hash, "password!1");
        assert!(db.phone_exists("01012345678").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected_on_phone_field() {
        let db = Arc::new(MemoryDatabase::new());
        let users = service(db);
        users.register(request("01012345678", "password!1")).await.unwrap();

        let Err(UserError::Validation(errors)) =
            users.register(request("01012345678", "password!1")).await
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors["phone"], vec![PHONE_TAKEN.to_string()]);
    }

    #[tokio::test]
    async fn test_password_mismatch() {
        let users = service(Arc::new(MemoryDatabase::new()));
        let Err(UserError::Validation(errors)) =
            users.register(request("01012345678", "password!2")).await
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors["password2"], vec!["Password fields didn't match.".to_string()]);
    }
}
