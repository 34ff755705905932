//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use pocketledger_core::users::{User, UserPreferences};

/// Database model for users. Preferences are flattened into columns.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub currency: String,
    pub date_format: String,
    pub last_login_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            name: db.name,
            email: db.email,
            password_hash: db.password_hash,
            is_active: db.is_active,
            preferences: UserPreferences {
                currency: db.currency,
                date_format: db.date_format,
            },
            last_login_at: db.last_login_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<User> for UserDB {
    fn from(user: User) -> Self {
        UserDB {
            id: user.id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            is_active: user.is_active,
            currency: user.preferences.currency,
            date_format: user.preferences.date_format,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
