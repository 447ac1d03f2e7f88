//! Converter lookup.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::converter::SharedConverter;
use crate::error::{ConvertError, ConvertResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Type-erased converter handle as stored by a context.
///
/// The value inside is always a `SharedConverter<D, P>` for the pair named
/// by the key it was resolved with.
pub type AnyConverter = Arc<dyn Any + Send + Sync>;

/// Identifies a converter by its domain and wire types.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConverterKey {
    domain: TypeId,
    proto: TypeId,
    domain_name: &'static str,
    proto_name: &'static str,
}

impl ConverterKey {
    pub fn of<D: 'static, P: 'static>() -> Self {
        Self {
            domain: TypeId::of::<D>(),
            proto: TypeId::of::<P>(),
            domain_name: type_name::<D>(),
            proto_name: type_name::<P>(),
        }
    }

    pub fn domain_name(&self) -> &'static str {
        self.domain_name
    }

    pub fn proto_name(&self) -> &'static str {
        self.proto_name
    }
}

impl fmt::Debug for ConverterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConverterKey({})", self)
    }
}

impl fmt::Display for ConverterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.domain_name, self.proto_name)
    }
}

/// Resolves converters for nested types at use time.
///
/// Implementations must return the same converter for repeated lookups of a
/// key, or at least converters that behave identically: callers are free to
/// cache what they resolve.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ConverterContext: Send + Sync {
    /// Look up the converter registered for `key`
    fn resolve(&self, key: ConverterKey) -> ConvertResult<AnyConverter>;
}

/// Typed lookups on top of [`ConverterContext::resolve`].
pub trait ConverterContextExt {
    /// Get the converter for a specific pair of types
    fn get_converter<D: 'static, P: 'static>(&self) -> ConvertResult<SharedConverter<D, P>>;
}

impl<C: ConverterContext + ?Sized> ConverterContextExt for C {
    fn get_converter<D: 'static, P: 'static>(&self) -> ConvertResult<SharedConverter<D, P>> {
        let key = ConverterKey::of::<D, P>();
        self.resolve(key)?
            .downcast_ref::<SharedConverter<D, P>>()
            .cloned()
            .ok_or_else(|| ConvertError::type_mismatch(key))
    }
}

impl<'a> dyn ConverterContext + 'a {
    /// Convert a domain value with the converter registered for `D -> P`
    pub fn to_proto<D: 'static, P: 'static>(&self, domain: Option<&D>) -> ConvertResult<Option<P>> {
        self.get_converter::<D, P>()?.to_proto(domain, self)
    }

    /// Convert a wire value with the converter registered for `D -> P`
    pub fn to_domain<D: 'static, P: 'static>(&self, proto: Option<&P>) -> ConvertResult<Option<D>> {
        self.get_converter::<D, P>()?.to_domain(proto, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_identity() {
        assert_eq!(ConverterKey::of::<u32, String>(), ConverterKey::of::<u32, String>());
        assert_ne!(ConverterKey::of::<u32, String>(), ConverterKey::of::<String, u32>());
    }

    #[test]
    fn test_key_display() {
        let key = ConverterKey::of::<u32, String>();
        let display = key.to_string();
        assert!(display.starts_with("u32 -> "));
        assert!(display.ends_with("String"));
    }

    #[test]
    fn test_get_converter_reports_missing() {
        let mut context = MockConverterContext::new();
        context
            .expect_resolve()
            .returning(|key| Err(ConvertError::missing(key)));

        let result = context.get_converter::<u32, String>();

        assert!(matches!(
            result,
            Err(ConvertError::MissingConverter { domain: "u32", .. })
        ));
    }

    #[test]
    fn test_get_converter_reports_type_mismatch() {
        let mut context = MockConverterContext::new();
        context
            .expect_resolve()
            .returning(|_| Ok(Arc::new(42_u8) as AnyConverter));

        let result = context.get_converter::<u32, String>();

        assert!(matches!(result, Err(ConvertError::TypeMismatch { .. })));
    }
}
