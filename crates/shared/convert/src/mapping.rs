//! Declarative field mapping metadata.
//!
//! A domain type declares the wire message it corresponds to and which of
//! its fields take part in conversion. Field names are compared with the
//! protobuf uniqueness rule: lowercase, underscores removed. That lets a
//! `camelCase` or `snake_case` domain name match the `snake_case` name in the
//! `.proto` schema.

use proto::WireFields;

/// Links a domain type to its wire message.
pub trait ProtoMapping {
    /// The wire message this type converts to
    type Message: WireFields;

    /// Domain fields that take part in conversion
    const FIELDS: &'static [&'static str];
}

/// Compare a supplied field name with the name declared in the schema.
pub fn proto_field_name_eq(supplied: &str, actual: &str) -> bool {
    let mut supplied = supplied.chars().filter(|c| *c != '_').flat_map(char::to_lowercase);
    let mut actual = actual.chars().filter(|c| *c != '_').flat_map(char::to_lowercase);
    loop {
        match (supplied.next(), actual.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a == b => continue,
            _ => return false,
        }
    }
}

/// Domain fields of `T` with no counterpart in its wire message.
pub fn unmapped_fields<T: ProtoMapping>() -> Vec<&'static str> {
    T::FIELDS
        .iter()
        .copied()
        .filter(|field| {
            !T::Message::FIELD_NAMES
                .iter()
                .any(|actual| proto_field_name_eq(field, actual))
        })
        .collect()
}
