//! Converter trait and nested-converter memoization.

use std::sync::{Arc, OnceLock};

use crate::context::{ConverterContext, ConverterContextExt};
use crate::error::ConvertResult;

/// Translates between a domain type and its wire message.
///
/// Both directions take optional input and return `Ok(None)` when the input
/// is absent; a converter must never invent a default-valued output for
/// missing input. A converter that only supports one direction returns
/// `Ok(None)` from the other.
pub trait Converter: Send + Sync + 'static {
    type Domain: 'static;
    type Proto: 'static;

    fn to_proto(
        &self,
        domain: Option<&Self::Domain>,
        context: &dyn ConverterContext,
    ) -> ConvertResult<Option<Self::Proto>>;

    fn to_domain(
        &self,
        proto: Option<&Self::Proto>,
        context: &dyn ConverterContext,
    ) -> ConvertResult<Option<Self::Domain>>;
}

/// Shared handle to a converter for `D -> P`.
pub type SharedConverter<D, P> = Arc<dyn Converter<Domain = D, Proto = P>>;

/// A nested converter resolved from the context on first use and kept for
/// later calls.
///
/// Concurrent first calls may each resolve the converter; only one result is
/// stored and every caller gets a converter for the same pair, so resolution
/// has to be idempotent, which [`ConverterContext`] requires anyway.
pub struct Nested<D, P> {
    slot: OnceLock<SharedConverter<D, P>>,
}

impl<D: 'static, P: 'static> Nested<D, P> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    pub fn get(&self, context: &dyn ConverterContext) -> ConvertResult<&SharedConverter<D, P>> {
        if let Some(converter) = self.slot.get() {
            return Ok(converter);
        }
        let resolved = context.get_converter::<D, P>()?;
        Ok(self.slot.get_or_init(|| resolved))
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<D: 'static, P: 'static> Default for Nested<D, P> {
    fn default() -> Self {
        Self::new()
    }
}
