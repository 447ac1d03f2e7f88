//! User domain entity.

use convert::ProtoMapping;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::constants::MAX_EMAIL_LENGTH;
use crate::error::{DomainError, DomainResult};
use crate::personal_details::PersonalDetails;

/// User domain entity
///
/// `id` is assigned by the storage layer on creation and never reassigned.
/// `email` is the natural key and is unique across all users; the storage
/// layer enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Opaque credential digest, never derived or checked here
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_details: Option<PersonalDetails>,
}

impl User {
    /// Create a user with only identity fields set
    pub fn new(id: Uuid, email: String) -> Self {
        Self {
            id,
            email,
            password_hash: None,
            personal_details: None,
        }
    }

    /// Validate an email before it becomes a natural key
    pub fn validate_email(email: &str) -> DomainResult<()> {
        if email.len() > MAX_EMAIL_LENGTH {
            return Err(DomainError::EmailTooLong {
                max: MAX_EMAIL_LENGTH,
            });
        }
        if !email.validate_email() {
            return Err(DomainError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Personal details, created empty if absent
    pub fn personal_details_mut(&mut self) -> &mut PersonalDetails {
        self.personal_details.get_or_insert_with(PersonalDetails::default)
    }
}

impl ProtoMapping for User {
    type Message = proto::User;
    const FIELDS: &'static [&'static str] = &["id", "email", "password_hash", "personal_details"];
}
