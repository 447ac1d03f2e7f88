//! Personal details value objects owned by a user.
//!
//! Neither type has an identity of its own; they live and die with the
//! containing `User`.

use chrono::{DateTime, FixedOffset};
use convert::ProtoMapping;
use serde::{Deserialize, Serialize};

/// A person's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanName {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_names: Option<Vec<String>>,
}

impl HumanName {
    /// Create a name with first and last name and no middle names
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            middle_names: None,
        }
    }

    /// Set middle names (builder style)
    pub fn with_middle_names<I, S>(mut self, middle_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.middle_names = Some(middle_names.into_iter().map(Into::into).collect());
        self
    }

    /// True when no part of the name is known
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.middle_names.is_none()
    }
}

/// Name and date of birth of a user.
///
/// Equality on `date_of_birth` compares instants, so two values with the same
/// instant in different offsets are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub name: Option<HumanName>,
    pub date_of_birth: Option<DateTime<FixedOffset>>,
}

impl PersonalDetails {
    pub fn new(name: Option<HumanName>, date_of_birth: Option<DateTime<FixedOffset>>) -> Self {
        Self {
            name,
            date_of_birth,
        }
    }

    /// True when neither name nor date of birth is known
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.date_of_birth.is_none()
    }
}

impl ProtoMapping for HumanName {
    type Message = proto::HumanName;
    const FIELDS: &'static [&'static str] = &["first_name", "last_name", "middle_names"];
}

impl ProtoMapping for PersonalDetails {
    type Message = proto::PersonalDetails;
    const FIELDS: &'static [&'static str] = &["name", "date_of_birth"];
}
