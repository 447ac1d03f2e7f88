//! Typed domain ↔ wire conversion.
//!
//! This crate provides:
//! - The `Converter` trait, one implementation per domain/wire type pair
//! - The `ConverterContext` lookup used by converters to resolve nested ones
//! - `ConverterRegistry`, a context that creates each converter once and
//!   shares it across threads
//! - `ProtoMapping` metadata tying domain fields to wire fields

pub mod context;
pub mod converter;
pub mod error;
pub mod mapping;
pub mod registry;

pub use context::{AnyConverter, ConverterContext, ConverterContextExt, ConverterKey};
pub use converter::{Converter, Nested, SharedConverter};
pub use error::{ConvertError, ConvertResult};
pub use mapping::{proto_field_name_eq, unmapped_fields, ProtoMapping};
pub use registry::{ConverterRegistry, ConverterRegistryBuilder};

#[cfg(any(test, feature = "test-utils"))]
pub use context::MockConverterContext;
