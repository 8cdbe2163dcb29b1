//! Console user accounts.
//!
//! [`Identity`] is a directory entry including the sign-in secret.
//! [`UserProfile`] is the sanitized projection carried by sessions and
//! written to the durable session store.

use chrono::{DateTime, Utc};
use guardpost_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::Role;

/// Unique numeric identifier of a console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a user identifier from its numeric value.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
///
/// Case is preserved: directory lookups compare emails exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account may sign in.
    Active,
    /// Account is disabled.
    Inactive,
}

/// Sanitized user projection held by sessions. Never carries the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: NonEmptyString,
    email: EmailAddress,
    phone: String,
    role: Role,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a user profile.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserId,
        name: NonEmptyString,
        email: EmailAddress,
        phone: impl Into<String>,
        role: Role,
        status: AccountStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone: phone.into(),
            role,
            status,
            created_at,
            updated_at,
        }
    }

    /// Returns the user id.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the account status.
    #[must_use]
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy with the patch applied. Role and status are kept.
    #[must_use]
    pub fn patched(&self, patch: &ProfilePatch, updated_at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(email) = &patch.email {
            next.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            next.phone = phone.clone();
        }
        next.updated_at = updated_at;
        next
    }
}

/// Directory entry: a profile plus its sign-in secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    profile: UserProfile,
    secret: String,
}

impl Identity {
    /// Creates a directory entry.
    #[must_use]
    pub fn new(profile: UserProfile, secret: impl Into<String>) -> Self {
        Self {
            profile,
            secret: secret.into(),
        }
    }

    /// Returns the profile without stripping the secret.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns whether this entry matches the credentials exactly and is active.
    #[must_use]
    pub fn accepts(&self, email: &str, secret: &str) -> bool {
        self.profile.status == AccountStatus::Active
            && self.profile.email.as_str() == email
            && self.secret == secret
    }

    /// Drops the secret and returns the sanitized profile.
    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        self.profile
    }
}

/// Partial profile update. Only name, email and phone are patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilePatch {
    /// New display name.
    #[serde(default)]
    pub name: Option<NonEmptyString>,
    /// New email address.
    #[serde(default)]
    pub email: Option<EmailAddress>,
    /// New phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

impl ProfilePatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}
