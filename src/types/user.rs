//! User accounts and the identity claim used to resolve them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{FileId, PaymentId, UserId};
use crate::RusveError;

/// Authorization role of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Integer carried on the wire.
    pub fn wire_value(self) -> i32 {
        match self {
            UserRole::User => 0,
            UserRole::Admin => 1,
        }
    }
}

impl TryFrom<i32> for UserRole {
    type Error = RusveError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UserRole::User),
            1 => Ok(UserRole::Admin),
            other => Err(RusveError::InvalidArgument(format!(
                "unknown user role {other}"
            ))),
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// Subject claim of the external identity provider.
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<FileId>,
    pub payment_id: PaymentId,
    /// Set once the account is deleted. The record and its subject are kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<DateTime<Utc>>,
}

impl User {
    /// A fresh account for a first-time subject.
    pub fn provision(sub: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            created: now,
            updated: now,
            sub: sub.into(),
            email: email.into(),
            role: UserRole::User,
            name: String::new(),
            avatar_id: None,
            payment_id: PaymentId::default(),
            deleted: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }

    /// Check the fields `UpdateUser` requires.
    pub fn validate_for_update(&self) -> crate::Result<()> {
        if self.id.is_empty() {
            return Err(RusveError::InvalidArgument("user id is required".into()));
        }
        if self.email.is_empty() {
            return Err(RusveError::InvalidArgument("user email is required".into()));
        }
        Ok(())
    }
}

/// Subject + email claim pair from the identity provider.
///
/// Neither value is verified here; the caller is trusted to have validated
/// the token they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    pub sub: String,
    pub email: String,
}

impl AuthRequest {
    pub fn new(sub: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisioned_user_has_defaults() {
        let user = User::provision("sub-1", "a@example.com");
        assert!(!user.id.is_empty());
        assert_eq!(user.role, UserRole::User);
        assert!(user.payment_id.is_empty());
        assert_eq!(user.created, user.updated);
        assert!(!user.is_deleted());
    }

    #[test]
    fn update_requires_id_and_email() {
        let mut user = User::provision("sub-1", "a@example.com");
        assert!(user.validate_for_update().is_ok());

        user.email.clear();
        assert!(matches!(
            user.validate_for_update(),
            Err(RusveError::InvalidArgument(_))
        ));

        user.email = "a@example.com".into();
        user.id = UserId::default();
        assert!(user.validate_for_update().is_err());
    }

    #[test]
    fn role_decoding_is_closed() {
        assert_eq!(UserRole::try_from(1).unwrap(), UserRole::Admin);
        assert!(UserRole::try_from(7).is_err());
    }
}
