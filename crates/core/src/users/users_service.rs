use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;

use super::users_model::{NewUser, ProfileUpdate, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

/// Service for account management.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(email)
    }

    async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        if self.repository.find_by_email(&new_user.email)?.is_some() {
            return Err(Error::ConstraintViolation(
                "User already exists with this email".to_string(),
            ));
        }
        let user = self.repository.insert(new_user).await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    async fn record_login(&self, user_id: &str) -> Result<User> {
        let mut user = self.repository.get_by_id(user_id)?;
        user.last_login_at = Some(Utc::now().naive_utc());
        self.repository.update(user).await
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        update.validate()?;
        let mut user = self.repository.get_by_id(user_id)?;
        update.apply(&mut user);
        self.repository.update(user).await
    }

    async fn change_password(&self, user_id: &str, password_hash: String) -> Result<User> {
        let mut user = self.repository.get_by_id(user_id)?;
        user.password_hash = password_hash;
        self.repository.update(user).await
    }

    async fn deactivate(&self, user_id: &str) -> Result<()> {
        let mut user = self.repository.get_by_id(user_id)?;
        user.is_active = false;
        self.repository.update(user).await?;
        info!("Deactivated user {}", user_id);
        Ok(())
    }
}
