//! User transfer object.

use convert::ProtoMapping;
use uuid::Uuid;

use crate::user::User;

/// Immutable transfer snapshot of a `User`.
///
/// `personal_details` is already in wire form, so a `UserDto` marks the
/// boundary where domain values have been converted. Build one with
/// [`UserDto::from_user`] after converting the personal details; the
/// remaining fields are copied as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub personal_details: Option<proto::PersonalDetails>,
}

impl UserDto {
    /// Second stage of the domain → wire mapping.
    pub fn from_user(user: &User, personal_details: Option<proto::PersonalDetails>) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            personal_details,
        }
    }
}

impl ProtoMapping for UserDto {
    type Message = proto::User;
    const FIELDS: &'static [&'static str] = &["id", "email", "password_hash", "personal_details"];
}

impl From<UserDto> for proto::User {
    fn from(dto: UserDto) -> Self {
        proto::User {
            id: dto.id.to_string(),
            email: dto.email,
            password_hash: dto.password_hash,
            personal_details: dto.personal_details,
        }
    }
}
