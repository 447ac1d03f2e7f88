//! Domain layer - Core business entities and value objects.
//!
//! This crate contains the user model with no infrastructure dependencies
//! beyond the wire message types, which `UserDto` carries at its conversion
//! boundary.

pub mod changeset;
pub mod constants;
pub mod dto;
pub mod error;
pub mod personal_details;
pub mod user;

pub use changeset::{HumanNameChangeset, Patch, PersonalDetailsChangeset, UserChangeset};
pub use constants::*;
pub use dto::UserDto;
pub use error::{DomainError, DomainResult};
pub use personal_details::{HumanName, PersonalDetails};
pub use user::User;
