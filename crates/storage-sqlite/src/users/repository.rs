use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use pocketledger_core::errors::Error;
use pocketledger_core::users::{NewUser, User, UserPreferences, UserRepositoryTrait};
use pocketledger_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("User"))?;
        Ok(User::from(user_db))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users::table
            .filter(users::email.eq(email))
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user_db.map(User::from))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let now = Utc::now().naive_utc();
        let preferences = UserPreferences::default();
        let user_db = UserDB {
            id: Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_active: true,
            currency: preferences.currency,
            date_format: preferences.date_format,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn| {
                let created = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result::<UserDB>(conn)
                    .into_core()?;
                Ok(User::from(created))
            })
            .await
    }

    async fn update(&self, user: User) -> Result<User> {
        let mut user_db = UserDB::from(user);
        user_db.updated_at = Utc::now().naive_utc();
        let user_id = user_db.id.clone();

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(users::table.find(&user_id))
                    .set(&user_db)
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("User"));
                }
                let updated = users::table
                    .find(&user_id)
                    .first::<UserDB>(conn)
                    .into_core()?;
                Ok(User::from(updated))
            })
            .await
    }
}
