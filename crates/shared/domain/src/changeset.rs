//! Partial updates for users.
//!
//! A changeset describes which fields of a user to touch. Leaf fields are a
//! [`Patch`], which distinguishes "leave alone" from "clear" from "set".
//! Collections are replaced wholesale. Nested changesets recurse into the
//! target composite, creating it empty when it is absent.

use chrono::{DateTime, FixedOffset};

use crate::personal_details::{HumanName, PersonalDetails};
use crate::user::User;

/// Tri-state update of an optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the current value untouched
    Keep,
    /// Clear the current value
    Unset,
    /// Replace the current value
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Apply the patch to an optional field.
    pub fn apply(self, target: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Unset => *target = None,
            Patch::Set(value) => *target = Some(value),
        }
    }
}

/// `Some(v)` sets, `None` unsets.
impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Unset,
        }
    }
}

/// Changes to a `HumanName`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanNameChangeset {
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
    /// `Some` replaces the whole list, `None` keeps it
    pub middle_names: Option<Vec<String>>,
}

impl HumanNameChangeset {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_keep() && self.last_name.is_keep() && self.middle_names.is_none()
    }

    pub fn apply_to(self, name: &mut HumanName) {
        self.first_name.apply(&mut name.first_name);
        self.last_name.apply(&mut name.last_name);
        if let Some(middle_names) = self.middle_names {
            name.middle_names = Some(middle_names);
        }
    }
}

/// Changes to `PersonalDetails`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalDetailsChangeset {
    pub name: Option<HumanNameChangeset>,
    pub date_of_birth: Patch<DateTime<FixedOffset>>,
}

impl PersonalDetailsChangeset {
    pub fn is_empty(&self) -> bool {
        self.name.as_ref().map_or(true, HumanNameChangeset::is_empty)
            && self.date_of_birth.is_keep()
    }

    pub fn apply_to(self, details: &mut PersonalDetails) {
        if let Some(name) = self.name {
            if !name.is_empty() {
                name.apply_to(details.name.get_or_insert_with(HumanName::default));
            }
        }
        self.date_of_birth.apply(&mut details.date_of_birth);
    }
}

/// Changes to a `User`.
///
/// `id` and `email` are not part of a changeset: the id is immutable and the
/// email is the natural key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChangeset {
    pub password_hash: Patch<String>,
    pub personal_details: Option<PersonalDetailsChangeset>,
}

impl UserChangeset {
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_keep()
            && self
                .personal_details
                .as_ref()
                .map_or(true, PersonalDetailsChangeset::is_empty)
    }

    pub fn apply_to(self, user: &mut User) {
        self.password_hash.apply(&mut user.password_hash);
        if let Some(details) = self.personal_details {
            if !details.is_empty() {
                details.apply_to(user.personal_details_mut());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn sample_user() -> User {
        let mut user = User::new(Uuid::new_v4(), "user@example.com".to_string());
        user.password_hash = Some("digest".to_string());
        user.personal_details = Some(PersonalDetails::new(
            Some(HumanName::new("Maxi", "Barmetler")),
            None,
        ));
        user
    }

    #[test]
    fn test_patch_nothing() {
        let mut user = sample_user();
        let expected = user.clone();

        UserChangeset::default().apply_to(&mut user);

        assert_eq!(user, expected);
    }

    #[test]
    fn test_patch_all() {
        let mut user = sample_user();
        let dob = FixedOffset::east_opt(7200)
            .unwrap()
            .with_ymd_and_hms(2000, 4, 2, 15, 10, 0)
            .unwrap();

        UserChangeset {
            password_hash: Patch::Set("other".to_string()),
            personal_details: Some(PersonalDetailsChangeset {
                name: Some(HumanNameChangeset {
                    first_name: Patch::Set("Max".to_string()),
                    last_name: Patch::Set("B".to_string()),
                    middle_names: Some(vec!["Erich".to_string()]),
                }),
                date_of_birth: Patch::Set(dob),
            }),
        }
        .apply_to(&mut user);

        assert_eq!(user.password_hash.as_deref(), Some("other"));
        let details = user.personal_details.unwrap();
        assert_eq!(
            details.name,
            Some(HumanName::new("Max", "B").with_middle_names(["Erich"]))
        );
        assert_eq!(details.date_of_birth, Some(dob));
    }

    #[test]
    fn test_patch_partial() {
        let mut user = sample_user();

        UserChangeset {
            personal_details: Some(PersonalDetailsChangeset {
                name: Some(HumanNameChangeset {
                    first_name: Patch::Set("Max".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
        .apply_to(&mut user);

        assert_eq!(user.password_hash.as_deref(), Some("digest"));
        assert_eq!(
            user.personal_details.unwrap().name,
            Some(HumanName::new("Max", "Barmetler"))
        );
    }

    #[test]
    fn test_unset_all() {
        let mut user = sample_user();

        UserChangeset {
            password_hash: Patch::Unset,
            personal_details: Some(PersonalDetailsChangeset {
                name: Some(HumanNameChangeset {
                    first_name: Patch::Unset,
                    last_name: Patch::Unset,
                    middle_names: None,
                }),
                date_of_birth: Patch::Unset,
            }),
        }
        .apply_to(&mut user);

        assert!(user.password_hash.is_none());
        let name = user.personal_details.unwrap().name.unwrap();
        assert!(name.is_empty());
    }

    #[test]
    fn test_unset_partial() {
        let mut user = sample_user();

        UserChangeset {
            password_hash: Patch::Unset,
            ..Default::default()
        }
        .apply_to(&mut user);

        assert!(user.password_hash.is_none());
        assert_eq!(
            user.personal_details.unwrap().name,
            Some(HumanName::new("Maxi", "Barmetler"))
        );
    }

    #[test]
    fn test_nested_changeset_creates_missing_composite() {
        let mut user = User::new(Uuid::new_v4(), "user@example.com".to_string());

        UserChangeset {
            personal_details: Some(PersonalDetailsChangeset {
                name: Some(HumanNameChangeset {
                    last_name: Patch::Set("Barmetler".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
        .apply_to(&mut user);

        let name = user.personal_details.unwrap().name.unwrap();
        assert_eq!(name.last_name.as_deref(), Some("Barmetler"));
        assert!(name.first_name.is_none());
    }

    #[test]
    fn test_empty_nested_changeset_does_not_create_composite() {
        let mut user = User::new(Uuid::new_v4(), "user@example.com".to_string());

        UserChangeset {
            personal_details: Some(PersonalDetailsChangeset::default()),
            ..Default::default()
        }
        .apply_to(&mut user);

        assert!(user.personal_details.is_none());
    }

    #[test]
    fn test_middle_names_replaced_wholesale() {
        let mut name = HumanName::new("Maxi", "Barmetler").with_middle_names(["Erich", "Karl"]);

        HumanNameChangeset {
            middle_names: Some(Vec::new()),
            ..Default::default()
        }
        .apply_to(&mut name);

        assert_eq!(name.middle_names, Some(Vec::new()));
    }

    #[test]
    fn test_patch_from_option() {
        assert_eq!(Patch::from(Some(1)), Patch::Set(1));
        assert_eq!(Patch::<i32>::from(None), Patch::Unset);
    }
}
