//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

/// Maximum email length (RFC 5321 path limit, also the column width)
pub const MAX_EMAIL_LENGTH: usize = 254;
