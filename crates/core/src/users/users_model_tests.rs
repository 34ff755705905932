//! Tests for user models and the registration password policy.

#[cfg(test)]
mod tests {
    use crate::users::users_model::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Avery".to_string(),
            email: "avery@example.com".to_string(),
            password_hash: "$argon2id$dummy".to_string(),
            is_active: true,
            preferences: UserPreferences::default(),
            last_login_at: None,
            created_at: at(2024, 1, 1),
            updated_at: at(2024, 1, 1),
        }
    }

    #[test]
    fn test_profile_never_exposes_password_hash() {
        let user = sample_user();
        let json = serde_json::to_value(user.profile()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "avery@example.com");

        // Serializing the full user also skips the hash
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Abc123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn test_new_user_email_shape() {
        let valid = NewUser {
            name: "Avery".to_string(),
            email: "avery@example.com".to_string(),
            password_hash: "hash".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = NewUser {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_new_user_name_length() {
        let short = NewUser {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            password_hash: "hash".to_string(),
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_profile_update_preference_allow_lists() {
        let update = ProfileUpdate {
            name: None,
            preferences: Some(PreferencesUpdate {
                currency: Some("BTC".to_string()),
                date_format: None,
            }),
        };
        assert!(update.validate().is_err());

        let update = ProfileUpdate {
            name: None,
            preferences: Some(PreferencesUpdate {
                currency: Some("EUR".to_string()),
                date_format: Some("YYYY-MM-DD".to_string()),
            }),
        };
        assert!(update.validate().is_ok());

        let mut user = sample_user();
        update.apply(&mut user);
        assert_eq!(user.preferences.currency, "EUR");
        assert_eq!(user.preferences.date_format, "YYYY-MM-DD");
    }
}
