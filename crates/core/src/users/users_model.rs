//! User domain models.
//!
//! Password hashing itself lives in the server layer; core only ever sees
//! the opaque hash string.

use chrono::NaiveDateTime;
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrors, Result};

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 6;

pub const SUPPORTED_CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "CAD", "AUD", "INR"];
pub const SUPPORTED_DATE_FORMATS: &[&str] = &["MM/DD/YYYY", "DD/MM/YYYY", "YYYY-MM-DD"];

/// Display preferences stored per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub currency: String,
    pub date_format: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences {
            currency: "USD".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
        }
    }
}

/// Domain model representing a user account.
///
/// The password hash never serializes; API responses go through
/// [`User::profile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub preferences: UserPreferences,
    pub last_login_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The public view of a user returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub preferences: UserPreferences,
    pub last_login_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            is_active: self.is_active,
            preferences: self.preferences.clone(),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
        }
    }
}

/// Input model for registering a user; the password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_name(&mut errors, &self.name);
        check_email(&mut errors, &self.email);
        errors.into_result()
    }
}

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub preferences: Option<PreferencesUpdate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub currency: Option<String>,
    pub date_format: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_name(&mut errors, name);
        }
        if let Some(preferences) = &self.preferences {
            if let Some(currency) = &preferences.currency {
                if !SUPPORTED_CURRENCIES.contains(&currency.as_str()) {
                    errors.push("preferences.currency", "Invalid currency");
                }
            }
            if let Some(date_format) = &preferences.date_format {
                if !SUPPORTED_DATE_FORMATS.contains(&date_format.as_str()) {
                    errors.push("preferences.dateFormat", "Invalid date format");
                }
            }
        }
        errors.into_result()
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(preferences) = &self.preferences {
            if let Some(currency) = &preferences.currency {
                user.preferences.currency = currency.clone();
            }
            if let Some(date_format) = &preferences.date_format {
                user.preferences.date_format = date_format.clone();
            }
        }
    }
}

/// Registration password policy: at least six characters with one lowercase
/// letter, one uppercase letter, and one digit.
pub fn validate_password(password: &str) -> Result<()> {
    let mut errors = FieldErrors::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 6 characters long");
    } else if !(password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit()))
    {
        errors.push(
            "password",
            "Password must contain at least one lowercase letter, one uppercase letter, and one number",
        );
    }
    errors.into_result()
}

fn check_name(errors: &mut FieldErrors, name: &str) {
    let len = name.trim().chars().count();
    if len < MIN_NAME_LEN || len > MAX_NAME_LEN {
        errors.push("name", "Name must be between 2 and 50 characters");
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.parse::<EmailAddress>().is_err() {
        errors.push("email", "Please provide a valid email");
    }
}
