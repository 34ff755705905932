//! User repository and service traits.

use async_trait::async_trait;

use super::users_model::{NewUser, ProfileUpdate, User};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Lookup by email for login and duplicate checks. Returns `None` rather
    /// than NotFound so registration can branch on it.
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn insert(&self, new_user: NewUser) -> Result<User>;

    /// Persists a fully merged user row (profile, password, flags).
    async fn update(&self, user: User) -> Result<User>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;

    fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Registers a new account; a taken email is a constraint violation.
    async fn register(&self, new_user: NewUser) -> Result<User>;

    /// Stamps `last_login_at`, called after a successful credential check.
    async fn record_login(&self, user_id: &str) -> Result<User>;

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User>;

    /// Swaps in a new password hash (already verified and hashed upstream).
    async fn change_password(&self, user_id: &str, password_hash: String) -> Result<User>;

    /// Soft-deactivates the account; the record is kept but authentication
    /// is refused from then on.
    async fn deactivate(&self, user_id: &str) -> Result<()>;
}
