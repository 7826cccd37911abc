use serde::{Deserialize, Serialize};

use tradefeed_core::{DomainError, DomainResult, Entity, UserId};

/// Minimal email-keyed user record, referenced by sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl User {
    /// Create a regular user. Email is required and normalized to lowercase.
    pub fn create(email: impl Into<String>) -> DomainResult<Self> {
        let email = email.into();
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        Ok(Self {
            id: UserId::new(),
            email: email.to_lowercase(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        })
    }

    /// Create a superuser (staff + superuser flags set).
    pub fn create_superuser(email: impl Into<String>) -> DomainResult<Self> {
        let mut user = Self::create(email)?;
        user.is_staff = true;
        user.is_superuser = true;
        Ok(user)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user() {
        let user = User::create("Simple@User.com").unwrap();
        assert_eq!(user.email, "simple@user.com");
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
    }

    #[test]
    fn create_user_requires_an_email() {
        assert!(User::create("").is_err());
        assert!(User::create("   ").is_err());
        assert!(User::create("no-at-sign").is_err());
    }

    #[test]
    fn create_superuser() {
        let user = User::create_superuser("super@user.com").unwrap();
        assert_eq!(user.email, "super@user.com");
        assert!(user.is_active);
        assert!(user.is_staff);
        assert!(user.is_superuser);
    }
}
