//! Users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{self, ValidationErrors};

/// Closed interval accepted for a user's age.
const AGE_RANGE: (i64, i64) = (0, 120);

/// A validated user record.
///
/// The display name is stored trimmed and title-cased; the email and
/// optional phone number have passed their format checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserDraft")]
pub struct User {
    /// User identifier
    pub id: i64,

    /// Display name, trimmed and title-cased
    pub name: String,

    /// Email address
    pub email: String,

    /// Optional phone number, digits plus `+ - ( )` and spaces
    pub phone: Option<String>,

    /// Optional age in years
    pub age: Option<i64>,

    /// Whether the account is active
    pub active: bool,
}

impl User {
    /// Copy of this user with the update's supplied fields applied.
    ///
    /// Update fields are already normalised, so the result is valid.
    #[must_use]
    pub fn with_update(mut self, update: &UserUpdate) -> Self {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(active) = update.active {
            self.active = active;
        }

        self
    }

    /// Re-run every field rule after direct field edits.
    ///
    /// # Errors
    ///
    /// Returns every violated rule as a [`ValidationErrors`].
    pub fn revalidated(self) -> Result<Self, ValidationErrors> {
        Self::try_from(UserDraft::from(self))
    }
}

/// Unvalidated user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDraft {
    /// User identifier
    pub id: i64,

    /// Proposed display name
    pub name: String,

    /// Proposed email address
    pub email: String,

    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Optional age in years
    #[serde(default)]
    pub age: Option<i64>,

    /// Whether the account is active
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<User> for UserDraft {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            age: user.age,
            active: user.active,
        }
    }
}

impl TryFrom<UserDraft> for User {
    type Error = ValidationErrors;

    fn try_from(draft: UserDraft) -> Result<Self, Self::Error> {
        let name = fields::person_name("name", &draft.name);
        let email = fields::email_address("email", &draft.email);
        let phone = draft
            .phone
            .as_deref()
            .map(|p| fields::phone_number("phone", p))
            .transpose();
        let age = draft
            .age
            .map(|a| fields::within_range("age", a, AGE_RANGE.0, AGE_RANGE.1))
            .transpose();

        match (name, email, phone, age) {
            (Ok(name), Ok(email), Ok(phone), Ok(age)) => Ok(Self {
                id: draft.id,
                name,
                email,
                phone,
                age,
                active: draft.active,
            }),
            (name, email, phone, age) => {
                Err([name.err(), email.err(), phone.err(), age.err()]
                    .into_iter()
                    .flatten()
                    .collect())
            }
        }
    }
}

/// A partial update to a user.
///
/// Every field is optional; rules run only on the fields that are present.
/// An all-absent update is valid and applies no changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserUpdateDraft")]
pub struct UserUpdate {
    /// Replacement display name, normalised
    pub name: Option<String>,

    /// Replacement email address
    pub email: Option<String>,

    /// Replacement phone number
    pub phone: Option<String>,

    /// Replacement age
    pub age: Option<i64>,

    /// Replacement active flag
    pub active: Option<bool>,
}

/// Unvalidated partial-update input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateDraft {
    /// Replacement display name
    #[serde(default)]
    pub name: Option<String>,

    /// Replacement email address
    #[serde(default)]
    pub email: Option<String>,

    /// Replacement phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Replacement age
    #[serde(default)]
    pub age: Option<i64>,

    /// Replacement active flag
    #[serde(default)]
    pub active: Option<bool>,
}

impl TryFrom<UserUpdateDraft> for UserUpdate {
    type Error = ValidationErrors;

    fn try_from(draft: UserUpdateDraft) -> Result<Self, Self::Error> {
        let name = draft
            .name
            .as_deref()
            .map(|n| fields::person_name("name", n))
            .transpose();
        let email = draft
            .email
            .as_deref()
            .map(|e| fields::email_address("email", e))
            .transpose();
        let phone = draft
            .phone
            .as_deref()
            .map(|p| fields::phone_number("phone", p))
            .transpose();
        let age = draft
            .age
            .map(|a| fields::within_range("age", a, AGE_RANGE.0, AGE_RANGE.1))
            .transpose();

        match (name, email, phone, age) {
            (Ok(name), Ok(email), Ok(phone), Ok(age)) => Ok(Self {
                name,
                email,
                phone,
                age,
                active: draft.active,
            }),
            (name, email, phone, age) => {
                Err([name.err(), email.err(), phone.err(), age.err()]
                    .into_iter()
                    .flatten()
                    .collect())
            }
        }
    }
}

/// A user as held by the persistence layer.
///
/// Carries the storage-managed timestamps (`created_at` set on insert,
/// `updated_at` set on update) and the administrative flag alongside the
/// user's own fields. The timestamps have no rules of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredUserDraft")]
pub struct StoredUser {
    /// User identifier
    pub id: i64,

    /// Display name, trimmed and title-cased
    pub name: String,

    /// Email address
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional age in years
    pub age: Option<i64>,

    /// Whether the account is active
    pub active: bool,

    /// Whether the account has administrative rights
    pub is_admin: bool,

    /// Set by the storage layer on insert
    pub created_at: DateTime<Utc>,

    /// Set by the storage layer on update, absent until the first edit
    pub updated_at: Option<DateTime<Utc>>,
}

/// Unvalidated stored-user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUserDraft {
    /// User identifier
    pub id: i64,

    /// Proposed display name
    pub name: String,

    /// Proposed email address
    pub email: String,

    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Optional age in years
    #[serde(default)]
    pub age: Option<i64>,

    /// Whether the account is active
    #[serde(default = "default_active")]
    pub active: bool,

    /// Whether the account has administrative rights
    #[serde(default)]
    pub is_admin: bool,

    /// Set by the storage layer on insert
    pub created_at: DateTime<Utc>,

    /// Set by the storage layer on update
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<StoredUserDraft> for StoredUser {
    type Error = ValidationErrors;

    fn try_from(draft: StoredUserDraft) -> Result<Self, Self::Error> {
        let user = User::try_from(UserDraft {
            id: draft.id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            age: draft.age,
            active: draft.active,
        })?;

        Ok(Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            age: user.age,
            active: user.active,
            is_admin: draft.is_admin,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            id: 1,
            name: "  juan carlos  ".to_owned(),
            email: "juan@example.com".to_owned(),
            phone: Some("+1 (555) 123-4567".to_owned()),
            age: Some(25),
            active: true,
        }
    }

    #[test]
    fn test_valid_user_normalises_name() -> TestResult {
        let user = User::try_from(draft())?;

        assert_eq!(user.name, "Juan Carlos");
        assert_eq!(user.email, "juan@example.com");
        assert_eq!(user.phone.as_deref(), Some("+1 (555) 123-4567"));

        Ok(())
    }

    #[test]
    fn test_blank_name_fails() {
        let blank = UserDraft {
            name: "   ".to_owned(),
            ..draft()
        };

        assert!(User::try_from(blank).is_err());
    }

    #[test]
    fn test_all_violations_reported_together() {
        let bad = UserDraft {
            name: " ".to_owned(),
            email: "not-an-email".to_owned(),
            phone: Some("abc-123".to_owned()),
            age: Some(150),
            ..draft()
        };

        let errors = User::try_from(bad).err().unwrap_or_default();
        let fields: Vec<&str> = errors.0.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, ["name", "email", "phone", "age"]);
    }

    #[test]
    fn test_update_validates_only_present_fields() -> TestResult {
        let update = UserUpdate::try_from(UserUpdateDraft {
            name: Some("  ana maría  ".to_owned()),
            ..UserUpdateDraft::default()
        })?;

        assert_eq!(update.name.as_deref(), Some("Ana María"));
        assert_eq!(update.email, None);

        Ok(())
    }

    #[test]
    fn test_empty_update_is_valid() -> TestResult {
        let update = UserUpdate::try_from(UserUpdateDraft::default())?;

        assert_eq!(update, UserUpdate::default());

        Ok(())
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let result = UserUpdate::try_from(UserUpdateDraft {
            name: Some("   ".to_owned()),
            ..UserUpdateDraft::default()
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_with_update_applies_supplied_fields() -> TestResult {
        let user = User::try_from(draft())?;
        let update = UserUpdate::try_from(UserUpdateDraft {
            name: Some("maría lópez".to_owned()),
            active: Some(false),
            ..UserUpdateDraft::default()
        })?;

        let updated = user.with_update(&update);

        assert_eq!(updated.name, "María López");
        assert!(!updated.active);
        assert_eq!(updated.email, "juan@example.com");

        Ok(())
    }

    #[test]
    fn test_stored_user_runs_user_rules() {
        let result = StoredUser::try_from(StoredUserDraft {
            id: 1,
            name: " ".to_owned(),
            email: "ana@example.com".to_owned(),
            phone: None,
            age: None,
            active: true,
            is_admin: false,
            created_at: Utc::now(),
            updated_at: None,
        });

        assert!(result.is_err());
    }
}
