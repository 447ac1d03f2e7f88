//! Converter registry.
//!
//! Converters are registered as factories on a builder. The built registry is
//! immutable; each entry creates its converter on first lookup and hands out
//! the same instance afterwards, including under concurrent first use.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::context::{AnyConverter, ConverterContext, ConverterKey};
use crate::converter::{Converter, SharedConverter};
use crate::error::{ConvertError, ConvertResult};

type Factory = Box<dyn Fn() -> AnyConverter + Send + Sync>;

struct Entry {
    factory: Factory,
    instance: OnceLock<AnyConverter>,
}

/// Builder for [`ConverterRegistry`].
#[derive(Default)]
pub struct ConverterRegistryBuilder {
    factories: HashMap<ConverterKey, Factory>,
}

impl ConverterRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for the converter's type pair.
    ///
    /// A later registration for the same pair replaces the earlier one.
    pub fn register<C, F>(self, factory: F) -> Self
    where
        C: Converter,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.insert(
            ConverterKey::of::<C::Domain, C::Proto>(),
            Box::new(move || {
                let converter: SharedConverter<C::Domain, C::Proto> = Arc::new(factory());
                Arc::new(converter) as AnyConverter
            }),
        )
    }

    /// Register an already constructed converter.
    pub fn register_shared<D: 'static, P: 'static>(
        self,
        converter: SharedConverter<D, P>,
    ) -> Self {
        self.insert(
            ConverterKey::of::<D, P>(),
            Box::new(move || Arc::new(converter.clone()) as AnyConverter),
        )
    }

    fn insert(mut self, key: ConverterKey, factory: Factory) -> Self {
        if self.factories.insert(key, factory).is_some() {
            warn!(converter = %key, "Replacing converter registration");
        }
        self
    }

    pub fn build(self) -> ConverterRegistry {
        let entries = self
            .factories
            .into_iter()
            .map(|(key, factory)| {
                (
                    key,
                    Entry {
                        factory,
                        instance: OnceLock::new(),
                    },
                )
            })
            .collect();
        ConverterRegistry { entries }
    }
}

/// Thread-safe converter context with one lazily created converter per
/// registered type pair.
pub struct ConverterRegistry {
    entries: HashMap<ConverterKey, Entry>,
}

impl ConverterRegistry {
    pub fn builder() -> ConverterRegistryBuilder {
        ConverterRegistryBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains<D: 'static, P: 'static>(&self) -> bool {
        self.entries.contains_key(&ConverterKey::of::<D, P>())
    }

    /// Registered type pairs, sorted by domain then wire type name
    pub fn registered(&self) -> Vec<ConverterKey> {
        let mut keys: Vec<ConverterKey> = self.entries.keys().copied().collect();
        keys.sort_by_key(|key| (key.domain_name(), key.proto_name()));
        keys
    }

    /// Number of converters created so far
    pub fn created(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.instance.get().is_some())
            .count()
    }

    /// Create every registered converter up front.
    pub fn warm_up(&self) -> usize {
        for key in self.entries.keys() {
            self.instance(key);
        }
        self.created()
    }

    /// Convert a domain value with the converter registered for `D -> P`
    pub fn to_proto<D: 'static, P: 'static>(&self, domain: Option<&D>) -> ConvertResult<Option<P>> {
        let context: &dyn ConverterContext = self;
        context.to_proto(domain)
    }

    /// Convert a wire value with the converter registered for `D -> P`
    pub fn to_domain<D: 'static, P: 'static>(&self, proto: Option<&P>) -> ConvertResult<Option<D>> {
        let context: &dyn ConverterContext = self;
        context.to_domain(proto)
    }

    fn instance(&self, key: &ConverterKey) -> Option<AnyConverter> {
        self.entries.get(key).map(|entry| {
            entry
                .instance
                .get_or_init(|| {
                    debug!(converter = %key, "Creating converter");
                    (entry.factory)()
                })
                .clone()
        })
    }
}

impl ConverterContext for ConverterRegistry {
    fn resolve(&self, key: ConverterKey) -> ConvertResult<AnyConverter> {
        self.instance(&key).ok_or_else(|| ConvertError::missing(key))
    }
}
