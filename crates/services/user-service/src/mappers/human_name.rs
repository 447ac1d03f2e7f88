//! `HumanName` ↔ `person::HumanName` converter.

use convert::{ConvertResult, Converter, ConverterContext};
use domain::HumanName;

/// Field-wise mapping. The wire list has no presence, so an empty
/// `middle_names` list reads back as unknown.
#[derive(Debug, Default)]
pub struct HumanNameConverter;

impl Converter for HumanNameConverter {
    type Domain = HumanName;
    type Proto = proto::HumanName;

    fn to_proto(
        &self,
        name: Option<&HumanName>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<proto::HumanName>> {
        Ok(name.map(|name| proto::HumanName {
            first_name: name.first_name.clone(),
            last_name: name.last_name.clone(),
            middle_names: name.middle_names.clone().unwrap_or_default(),
        }))
    }

    fn to_domain(
        &self,
        message: Option<&proto::HumanName>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<HumanName>> {
        Ok(message.map(|message| HumanName {
            first_name: message.first_name.clone(),
            last_name: message.last_name.clone(),
            middle_names: if message.middle_names.is_empty() {
                None
            } else {
                Some(message.middle_names.clone())
            },
        }))
    }
}
