//! `User` → `user::User` converter.

use convert::{ConvertResult, Converter, ConverterContext, Nested};
use domain::{PersonalDetails, User};
use uuid::Uuid;

/// Write-only converter for users.
///
/// The id goes through the registered `Uuid -> String` converter and personal
/// details through the registered `PersonalDetails` converter; both are
/// resolved on first use.
#[derive(Default)]
pub struct UserConverter {
    uuid: Nested<Uuid, String>,
    personal_details: Nested<PersonalDetails, proto::PersonalDetails>,
}

impl Converter for UserConverter {
    type Domain = User;
    type Proto = proto::User;

    fn to_proto(
        &self,
        user: Option<&User>,
        context: &dyn ConverterContext,
    ) -> ConvertResult<Option<proto::User>> {
        let Some(user) = user else {
            return Ok(None);
        };

        let uuid = self.uuid.get(context)?;
        let personal_details = self.personal_details.get(context)?;

        let mut message = proto::User {
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            ..Default::default()
        };

        if let Some(id) = uuid.to_proto(Some(&user.id), context)? {
            message.id = id;
        }

        if let Some(details) = personal_details.to_proto(user.personal_details.as_ref(), context)? {
            message.personal_details = Some(details);
        }

        Ok(Some(message))
    }

    /// Users are never rebuilt from the wire; storage is the source of truth.
    fn to_domain(
        &self,
        _user: Option<&proto::User>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<User>> {
        Ok(None)
    }
}
