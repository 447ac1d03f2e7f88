//! `Uuid` ↔ `String` converter.

use convert::{ConvertError, ConvertResult, Converter, ConverterContext};
use uuid::Uuid;

/// Writes ids in lowercase hyphenated form.
#[derive(Debug, Default)]
pub struct UuidConverter;

impl Converter for UuidConverter {
    type Domain = Uuid;
    type Proto = String;

    fn to_proto(
        &self,
        id: Option<&Uuid>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<String>> {
        Ok(id.map(|id| id.hyphenated().to_string()))
    }

    fn to_domain(
        &self,
        id: Option<&String>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<Uuid>> {
        id.map(|id| {
            Uuid::parse_str(id)
                .map_err(|e| ConvertError::invalid_value(format!("Invalid UUID '{}': {}", id, e)))
        })
        .transpose()
    }
}
