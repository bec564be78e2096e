//! Converter resolution and caching.
//!
//! [`ParserRegistry`] maps each target [`TypeKey`] to a [`Converter`]. A
//! request for a type that is not cached walks the resolution chain once:
//!
//! 1. explicit registrations (anything already in the cache wins),
//! 2. the [`ConventionProvider`],
//! 3. the [`FactoryDiscovery`] facility.
//!
//! The first success is cached and every later request for that type returns
//! the same converter without touching the providers again. Failures are not
//! cached, so a type becomes resolvable as soon as a converter for it is
//! registered.
//!
//! # Thread Safety
//!
//! The cache sits behind a `RwLock`. Cached lookups only take the read lock.
//! Discovery runs without holding any lock and its result is inserted only if
//! the slot is still empty, so racing first resolutions all observe the same
//! cached converter. Registration checks and inserts under a single write
//! guard, which keeps [`ParseError::AlreadyRegistered`] exact under races.

use crate::convention::{ConventionProvider, StdConventions};
use crate::converter::{Converter, ConverterOrigin, FormatContext, ParsedValue};
use crate::discovery::{FactoryDiscovery, InventoryDiscovery};
use crate::error::{BoxError, ParseError};
use crate::key::TypeKey;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use parking_lot::RwLock;
use std::sync::Arc;

/// Builder for a [`ParserRegistry`] with custom providers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use strparse_core::{ParserRegistry, StdConventions};
///
/// let registry = ParserRegistry::builder()
///     .with_conventions(Arc::new(StdConventions::empty().with::<u8>()))
///     .without_discovery()
///     .build();
///
/// assert_eq!(registry.parse::<u8>("7").unwrap(), 7);
/// assert!(registry.parse::<i64>("7").is_err());
/// ```
pub struct ParserRegistryBuilder {
    conventions: Option<Arc<dyn ConventionProvider>>,
    discovery: Option<Arc<dyn FactoryDiscovery>>,
}

impl Default for ParserRegistryBuilder {
    fn default() -> Self {
        Self {
            conventions: Some(Arc::new(StdConventions::new())),
            discovery: Some(Arc::new(InventoryDiscovery)),
        }
    }
}

impl ParserRegistryBuilder {
    /// Replaces the convention provider.
    #[must_use]
    pub fn with_conventions<P: ConventionProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        self.conventions = Some(provider);
        self
    }

    /// Disables the convention step.
    #[must_use]
    pub fn without_conventions(mut self) -> Self {
        self.conventions = None;
        self
    }

    /// Replaces the factory discovery facility.
    #[must_use]
    pub fn with_discovery<D: FactoryDiscovery + 'static>(mut self, discovery: Arc<D>) -> Self {
        self.discovery = Some(discovery);
        self
    }

    /// Disables the factory discovery step.
    #[must_use]
    pub fn without_discovery(mut self) -> Self {
        self.discovery = None;
        self
    }

    /// Builds an empty registry using the configured providers.
    #[must_use]
    pub fn build(self) -> ParserRegistry {
        ParserRegistry {
            cache: RwLock::new(HashMap::new()),
            conventions: self.conventions,
            discovery: self.discovery,
        }
    }
}

/// Resolves, caches, and invokes text-to-value converters.
///
/// # Example
///
/// ```
/// use strparse_core::{ParseError, ParserRegistry};
///
/// #[derive(Debug, PartialEq)]
/// struct UserId(u64);
///
/// let registry = ParserRegistry::new();
///
/// // Built-in conventions
/// assert!(registry.parse::<bool>("TRUE").unwrap());
/// assert_eq!(registry.parse::<i32>("-123").unwrap(), -123);
///
/// // Explicit registration
/// registry
///     .register(|s: &str| s.trim_start_matches("user-").parse().map(UserId))
///     .unwrap();
/// assert_eq!(registry.parse::<UserId>("user-42").unwrap(), UserId(42));
///
/// // Registration never overwrites
/// let again = registry.register(|s: &str| s.parse().map(UserId));
/// assert!(matches!(again, Err(ParseError::AlreadyRegistered { .. })));
/// ```
pub struct ParserRegistry {
    cache: RwLock<HashMap<TypeKey, Converter>>,
    conventions: Option<Arc<dyn ConventionProvider>>,
    discovery: Option<Arc<dyn FactoryDiscovery>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("cached", &self.registered_types())
            .field("conventions", &self.conventions.is_some())
            .field("discovery", &self.discovery.is_some())
            .finish()
    }
}

impl ParserRegistry {
    /// Creates an empty registry with the standard conventions and
    /// `inventory`-based factory discovery.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for configuring the resolution chain.
    #[must_use]
    pub fn builder() -> ParserRegistryBuilder {
        ParserRegistryBuilder::default()
    }

    /// Returns the converter for `key`, resolving and caching it on first use.
    ///
    /// # Errors
    ///
    /// - [`ParseError::NoConverterFound`] if no step of the chain applies
    /// - [`ParseError::AmbiguousFactory`] if discovery finds several factories
    /// - [`ParseError::TypeMismatch`] if discovery returns a factory for
    ///   another type
    pub fn resolve(&self, key: TypeKey) -> Result<Converter, ParseError> {
        if let Some(converter) = self.cache.read().get(&key) {
            tracing::trace!(type_name = key.type_name(), "converter cache hit");
            return Ok(converter.clone());
        }

        let discovered = self.discover(key)?;

        // Another thread may have cached or registered this type meanwhile.
        let converter = self
            .cache
            .write()
            .entry(key)
            .or_insert(discovered)
            .clone();

        tracing::debug!(
            type_name = key.type_name(),
            origin = %converter.origin(),
            "cached converter"
        );
        Ok(converter)
    }

    /// Typed form of [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_for<T: 'static>(&self) -> Result<Converter, ParseError> {
        self.resolve(TypeKey::of::<T>())
    }

    /// Returns the cached converter for `key` without running discovery.
    #[must_use]
    pub fn cached(&self, key: TypeKey) -> Option<Converter> {
        self.cache.read().get(&key).cloned()
    }

    /// Registers a conversion function for `T`.
    ///
    /// Registered functions take priority over conventions and factories.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::AlreadyRegistered`] if a converter for `T` is
    /// already registered or was cached by an earlier resolution. Call
    /// [`remove_for`](Self::remove_for) first to override it.
    pub fn register<T, F, E>(&self, f: F) -> Result<(), ParseError>
    where
        T: Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.register_converter(Converter::new(ConverterOrigin::Registered, f))
    }

    /// Registers a conversion function for `T` that also receives the
    /// format context.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn register_with_context<T, F, E>(&self, f: F) -> Result<(), ParseError>
    where
        T: Send + Sync + 'static,
        F: Fn(&str, Option<&FormatContext>) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.register_converter(Converter::with_context(ConverterOrigin::Registered, f))
    }

    /// Registers a prebuilt converter under its own key.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn register_converter(&self, converter: Converter) -> Result<(), ParseError> {
        let key = converter.key();

        match self.cache.write().entry(key) {
            Entry::Occupied(_) => Err(ParseError::already_registered(key.type_name())),
            Entry::Vacant(slot) => {
                slot.insert(converter);
                tracing::debug!(type_name = key.type_name(), "registered converter");
                Ok(())
            }
        }
    }

    /// Removes the converter for `key`, returning whether one was present.
    pub fn remove(&self, key: TypeKey) -> bool {
        let removed = self.cache.write().remove(&key).is_some();
        if removed {
            tracing::debug!(type_name = key.type_name(), "removed converter");
        }
        removed
    }

    /// Typed form of [`remove`](Self::remove).
    pub fn remove_for<T: 'static>(&self) -> bool {
        self.remove(TypeKey::of::<T>())
    }

    /// Returns `true` if a converter for `key` is registered or cached.
    #[must_use]
    pub fn is_registered(&self, key: TypeKey) -> bool {
        self.cache.read().contains_key(&key)
    }

    /// Typed form of [`is_registered`](Self::is_registered).
    #[must_use]
    pub fn is_registered_for<T: 'static>(&self) -> bool {
        self.is_registered(TypeKey::of::<T>())
    }

    /// Removes every registered and cached converter.
    pub fn clear(&self) {
        let mut cache = self.cache.write();
        tracing::debug!(count = cache.len(), "clearing converter cache");
        cache.clear();
    }

    /// Returns the number of cached converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Returns `true` if no converters are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Returns the names of all cached types.
    #[must_use]
    pub fn registered_types(&self) -> Vec<&'static str> {
        self.cache.read().keys().map(TypeKey::type_name).collect()
    }

    /// Parses `text` into a `T`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::NoConverterFound`] if `T` cannot be resolved
    /// - [`ParseError::TypeMismatch`] if the cached converter does not produce `T`
    /// - [`ParseError::Conversion`] if the mechanism rejects `text`
    pub fn parse<T: 'static>(&self, text: &str) -> Result<T, ParseError> {
        self.resolve_for::<T>()?.call_as::<T>(text, None)
    }

    /// Parses `text` into a `T`, forwarding `ctx` to the mechanism.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_with_context<T: 'static>(
        &self,
        text: &str,
        ctx: &FormatContext,
    ) -> Result<T, ParseError> {
        self.resolve_for::<T>()?.call_as::<T>(text, Some(ctx))
    }

    /// Parses `text` into the keyed type, returning the untyped value.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_as(&self, text: &str, key: TypeKey) -> Result<ParsedValue, ParseError> {
        self.resolve(key)?.call(text, None)
    }

    /// Runs the convention and factory steps of the chain.
    fn discover(&self, key: TypeKey) -> Result<Converter, ParseError> {
        if let Some(conventions) = &self.conventions
            && conventions.can_convert(key)
        {
            let provider = Arc::clone(conventions);
            return Ok(Converter::from_erased(
                key,
                ConverterOrigin::Convention,
                move |text, ctx| provider.convert(key, text, ctx),
            ));
        }

        if let Some(discovery) = &self.discovery
            && let Some(handle) = discovery.find_factory(key)?
        {
            // The cache slot is keyed by the request, so the handle must agree.
            if handle.key() != key {
                return Err(ParseError::TypeMismatch {
                    expected: key.type_name(),
                    found: handle.key().type_name(),
                });
            }

            let factory = handle.factory();
            return Ok(Converter::from_erased(
                key,
                ConverterOrigin::Factory,
                move |text, _ctx| factory(text),
            ));
        }

        tracing::debug!(type_name = key.type_name(), "no converter found");
        Err(ParseError::no_converter(key.type_name()))
    }
}
