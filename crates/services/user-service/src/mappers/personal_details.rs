//! `PersonalDetails` → `person::PersonalDetails` converter.

use chrono::{DateTime, FixedOffset};
use convert::{ConvertResult, Converter, ConverterContext, Nested};
use domain::{HumanName, PersonalDetails};

/// Write-only converter for personal details.
///
/// Nested name and date-of-birth converters are resolved from the context on
/// first use and kept for later calls. Sub-fields whose conversion yields
/// nothing are left unset on the message.
#[derive(Default)]
pub struct PersonalDetailsConverter {
    human_name: Nested<HumanName, proto::HumanName>,
    date_time: Nested<DateTime<FixedOffset>, proto::DateTime>,
}

impl Converter for PersonalDetailsConverter {
    type Domain = PersonalDetails;
    type Proto = proto::PersonalDetails;

    fn to_proto(
        &self,
        personal_details: Option<&PersonalDetails>,
        context: &dyn ConverterContext,
    ) -> ConvertResult<Option<proto::PersonalDetails>> {
        let Some(personal_details) = personal_details else {
            return Ok(None);
        };

        let human_name = self.human_name.get(context)?;
        let date_time = self.date_time.get(context)?;

        let mut message = proto::PersonalDetails::default();

        if let Some(name) = human_name.to_proto(personal_details.name.as_ref(), context)? {
            message.name = Some(name);
        }

        if let Some(date_of_birth) =
            date_time.to_proto(personal_details.date_of_birth.as_ref(), context)?
        {
            message.date_of_birth = Some(date_of_birth);
        }

        Ok(Some(message))
    }

    /// Reading personal details back from the wire is not supported.
    fn to_domain(
        &self,
        _personal_details: Option<&proto::PersonalDetails>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<PersonalDetails>> {
        Ok(None)
    }
}
