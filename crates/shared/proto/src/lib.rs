//! Wire message definitions.
//!
//! Generated from the `.proto` schemas under `proto/barmetler`:
//! - `barmetler.core`: date-time with UTC offset
//! - `barmetler.person`: human name and personal details
//! - `barmetler.user`: the user record
//!
//! Tags are part of the wire contract and must never be reused.

/// Generated protobuf packages, one module per package.
pub mod barmetler {
    pub mod core {
        tonic::include_proto!("barmetler.core");
    }

    pub mod person {
        tonic::include_proto!("barmetler.person");
    }

    pub mod user {
        tonic::include_proto!("barmetler.user");
    }
}

/// Protobuf field names declared by a message, in declaration order.
///
/// Implemented for every message from the schema at build time. Used to
/// check domain-side field declarations against the wire schema.
pub trait WireFields {
    /// Fully qualified protobuf message name
    const MESSAGE_NAME: &'static str;

    /// Field names as written in the `.proto` schema (`snake_case`)
    const FIELD_NAMES: &'static [&'static str];
}

include!(concat!(env!("OUT_DIR"), "/wire_fields.rs"));

// Re-export commonly used items
pub use barmetler::core::DateTime;
pub use barmetler::person::{HumanName, PersonalDetails};
pub use barmetler::user::User;
