//! `DateTime<FixedOffset>` ↔ `core::DateTime` converter.

use chrono::{DateTime, FixedOffset};
use convert::{ConvertError, ConvertResult, Converter, ConverterContext};
use prost_types::Timestamp;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

#[derive(Debug, Default)]
pub struct DateTimeConverter;

impl Converter for DateTimeConverter {
    type Domain = DateTime<FixedOffset>;
    type Proto = proto::DateTime;

    fn to_proto(
        &self,
        date_time: Option<&DateTime<FixedOffset>>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<proto::DateTime>> {
        Ok(date_time.map(|date_time| proto::DateTime {
            timestamp: Some(timestamp_of(date_time)),
            utc_offset_seconds: date_time.offset().local_minus_utc(),
        }))
    }

    fn to_domain(
        &self,
        message: Option<&proto::DateTime>,
        _context: &dyn ConverterContext,
    ) -> ConvertResult<Option<DateTime<FixedOffset>>> {
        let Some(message) = message else {
            return Ok(None);
        };
        let Some(timestamp) = message.timestamp.as_ref() else {
            return Ok(None);
        };

        let offset = FixedOffset::east_opt(message.utc_offset_seconds).ok_or_else(|| {
            ConvertError::invalid_value(format!(
                "UTC offset out of range: {}s",
                message.utc_offset_seconds
            ))
        })?;
        let nanos = u32::try_from(timestamp.nanos)
            .ok()
            .filter(|nanos| *nanos < NANOS_PER_SECOND)
            .ok_or_else(|| {
                ConvertError::invalid_value(format!(
                    "Nanoseconds out of range: {}",
                    timestamp.nanos
                ))
            })?;
        let instant = DateTime::from_timestamp(timestamp.seconds, nanos).ok_or_else(|| {
            ConvertError::invalid_value(format!(
                "Timestamp out of range: {}s {}ns",
                timestamp.seconds, timestamp.nanos
            ))
        })?;

        Ok(Some(instant.with_timezone(&offset)))
    }
}

/// Protobuf timestamps have no leap seconds; a leap second folds into the
/// first second of the next minute.
fn timestamp_of(date_time: &DateTime<FixedOffset>) -> Timestamp {
    let nanos = date_time.timestamp_subsec_nanos();
    let (carry, nanos) = (nanos / NANOS_PER_SECOND, nanos % NANOS_PER_SECOND);

    Timestamp {
        seconds: date_time.timestamp() + i64::from(carry),
        // Below 1e9 after folding
        nanos: nanos as i32,
    }
}
