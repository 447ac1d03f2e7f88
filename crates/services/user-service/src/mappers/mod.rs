//! Converters between the user domain model and its wire messages.
//!
//! One converter per type pair; [`default_registry`] wires them all into a
//! shared registry so nested lookups resolve.

mod date_time;
mod human_name;
mod id;
mod personal_details;
mod user;

pub use self::date_time::DateTimeConverter;
pub use self::human_name::HumanNameConverter;
pub use self::id::UuidConverter;
pub use self::personal_details::PersonalDetailsConverter;
pub use self::user::UserConverter;

use convert::{ConvertResult, ConverterContext, ConverterRegistry};
use domain::{PersonalDetails, User, UserDto};

/// Registry with every converter of this service.
pub fn default_registry() -> ConverterRegistry {
    ConverterRegistry::builder()
        .register(|| UuidConverter)
        .register(|| DateTimeConverter)
        .register(|| HumanNameConverter)
        .register(PersonalDetailsConverter::default)
        .register(UserConverter::default)
        .build()
}

/// Snapshot a user for transport, converting its personal details to wire form.
pub fn user_dto(user: &User, context: &dyn ConverterContext) -> ConvertResult<UserDto> {
    let personal_details =
        context.to_proto::<PersonalDetails, proto::PersonalDetails>(user.personal_details.as_ref())?;
    Ok(UserDto::from_user(user, personal_details))
}
