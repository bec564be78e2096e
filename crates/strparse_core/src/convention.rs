//! Convention-based conversion.
//!
//! A [`ConventionProvider`] answers two questions for the resolver: can this
//! type be built from text, and if so, build it. The default provider,
//! [`StdConventions`], covers the standard library types whose
//! [`FromStr`] implementation is the recognized extension point.
//!
//! User types opt in by declaring the convention on the type itself with
//! [`#[derive(ParseConvention)]`](crate::ParseConvention), which submits a
//! [`ConventionEntry`]. `StdConventions::new()` picks those up without any
//! further setup.

use crate::converter::{FormatContext, ParsedValue};
use crate::error::BoxError;
use crate::key::TypeKey;
use core::any::TypeId;
use core::str::FromStr;
use hashbrown::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

/// A source of text conversions for types that declare a recognized
/// extension point.
///
/// The resolver queries [`can_convert`](Self::can_convert) once per type and,
/// on success, caches a converter that forwards every call to
/// [`convert`](Self::convert).
pub trait ConventionProvider: Send + Sync {
    /// Returns whether this provider can convert text into the keyed type.
    fn can_convert(&self, key: TypeKey) -> bool;

    /// Converts `text` into a value of the keyed type.
    ///
    /// # Errors
    ///
    /// Returns the mechanism's own error if `text` is malformed, or
    /// [`UnsupportedType`] if the type is not covered.
    fn convert(
        &self,
        key: TypeKey,
        text: &str,
        ctx: Option<&FormatContext>,
    ) -> Result<ParsedValue, BoxError>;
}

/// The provider was asked to convert a type it does not cover.
#[derive(Debug, thiserror::Error)]
#[error("no text conversion convention for type '{0}'")]
pub struct UnsupportedType(pub &'static str);

/// Input was not a recognized boolean literal.
#[derive(Debug, thiserror::Error)]
#[error("'{input}' is not a valid boolean, expected 'true' or 'false'")]
pub struct InvalidBool {
    /// The rejected input.
    pub input: String,
}

/// Text-to-value function behind a convention.
pub type ConventionFn = fn(&str) -> Result<ParsedValue, BoxError>;

/// Converts through `T`'s [`FromStr`] implementation, input taken verbatim.
fn from_str_fn<T>(text: &str) -> Result<ParsedValue, BoxError>
where
    T: FromStr + Send + Sync + 'static,
    T::Err: Into<BoxError>,
{
    T::from_str(text)
        .map(|value| Box::new(value) as ParsedValue)
        .map_err(Into::into)
}

/// Like [`from_str_fn`], with surrounding whitespace trimmed first.
fn trimmed_from_str_fn<T>(text: &str) -> Result<ParsedValue, BoxError>
where
    T: FromStr + Send + Sync + 'static,
    T::Err: Into<BoxError>,
{
    from_str_fn::<T>(text.trim())
}

/// A [`FromStr`] convention declared by a type.
///
/// Usually submitted by [`#[derive(ParseConvention)]`](crate::ParseConvention).
/// Manual submission goes through the re-exported `inventory` crate:
///
/// ```
/// use strparse_core::{ConventionEntry, ParserRegistry};
///
/// #[derive(Debug, PartialEq)]
/// pub struct Meters(f64);
///
/// impl std::str::FromStr for Meters {
///     type Err = std::num::ParseFloatError;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.trim_end_matches('m').parse().map(Meters)
///     }
/// }
///
/// strparse_core::__private::inventory::submit! {
///     ConventionEntry::of::<Meters>()
/// }
///
/// fn main() {
///     let registry = ParserRegistry::new();
///     assert_eq!(registry.parse::<Meters>("12m").unwrap(), Meters(12.0));
/// }
/// ```
pub struct ConventionEntry {
    type_id: fn() -> TypeId,
    type_name: fn() -> &'static str,
    convert: ConventionFn,
}

impl ConventionEntry {
    /// Declares `T`'s [`FromStr`] implementation as its text conversion.
    #[must_use]
    pub const fn of<T>() -> Self
    where
        T: FromStr + Send + Sync + 'static,
        T::Err: Into<BoxError>,
    {
        Self {
            type_id: TypeId::of::<T>,
            type_name: core::any::type_name::<T>,
            convert: from_str_fn::<T>,
        }
    }

    /// Returns the declaring type.
    #[must_use]
    pub fn key(&self) -> TypeKey {
        TypeKey::from_raw((self.type_id)(), (self.type_name)())
    }
}

impl core::fmt::Debug for ConventionEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConventionEntry")
            .field("type_name", &(self.type_name)())
            .finish_non_exhaustive()
    }
}

inventory::collect!(ConventionEntry);

/// Finds the declared convention for `key`.
///
/// Every entry for a type wraps the same `FromStr` implementation, so the
/// first match is as good as any other.
fn declared(key: TypeKey) -> Option<ConventionFn> {
    inventory::iter::<ConventionEntry>()
        .find(|entry| entry.key() == key)
        .map(|entry| entry.convert)
}

/// Case-insensitive boolean literal, surrounding whitespace ignored.
fn parse_bool(text: &str) -> Result<ParsedValue, BoxError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(Box::new(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(Box::new(false))
    } else {
        Err(InvalidBool {
            input: text.to_owned(),
        }
        .into())
    }
}

/// Convention provider backed by [`FromStr`].
///
/// [`StdConventions::new`] covers `bool`, every integer width, `f32`, `f64`,
/// `char`, `String`, `PathBuf`, and the `std::net` address types, plus every
/// type that declared a [`ConventionEntry`].
///
/// Whitespace policy for the built-in types: booleans, numbers, and
/// addresses ignore surrounding whitespace; `String`, `PathBuf`, and `char`
/// take the text verbatim. Booleans are matched case-insensitively.
/// Declared and [`with`](Self::with) types see the text verbatim and follow
/// their own [`FromStr`] rules.
///
/// The format context is ignored by these conversions.
///
/// # Example
///
/// ```
/// use strparse_core::{ConventionProvider, StdConventions, TypeKey};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
///
/// impl std::str::FromStr for Celsius {
///     type Err = std::num::ParseFloatError;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.trim_end_matches("°C").parse().map(Celsius)
///     }
/// }
///
/// let conventions = StdConventions::new().with::<Celsius>();
/// assert!(conventions.can_convert(TypeKey::of::<Celsius>()));
/// assert!(conventions.can_convert(TypeKey::of::<bool>()));
/// ```
pub struct StdConventions {
    converters: HashMap<TypeKey, ConventionFn>,
    include_declared: bool,
}

impl Default for StdConventions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for StdConventions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StdConventions")
            .field("types", &self.supported_types())
            .field("include_declared", &self.include_declared)
            .finish()
    }
}

impl StdConventions {
    /// Creates a provider covering the standard library types and every
    /// declared convention.
    #[must_use]
    pub fn new() -> Self {
        let mut conventions = Self::empty().with_declared();
        conventions
            .converters
            .insert(TypeKey::of::<bool>(), parse_bool);

        conventions.insert_trimmed::<i8>();
        conventions.insert_trimmed::<i16>();
        conventions.insert_trimmed::<i32>();
        conventions.insert_trimmed::<i64>();
        conventions.insert_trimmed::<i128>();
        conventions.insert_trimmed::<isize>();
        conventions.insert_trimmed::<u8>();
        conventions.insert_trimmed::<u16>();
        conventions.insert_trimmed::<u32>();
        conventions.insert_trimmed::<u64>();
        conventions.insert_trimmed::<u128>();
        conventions.insert_trimmed::<usize>();
        conventions.insert_trimmed::<f32>();
        conventions.insert_trimmed::<f64>();
        conventions.insert_trimmed::<IpAddr>();
        conventions.insert_trimmed::<Ipv4Addr>();
        conventions.insert_trimmed::<Ipv6Addr>();
        conventions.insert_trimmed::<SocketAddr>();

        conventions.insert::<char>();
        conventions.insert::<String>();
        conventions.insert::<PathBuf>();
        conventions
    }

    /// Creates a provider that covers no types, not even declared ones.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
            include_declared: false,
        }
    }

    /// Also covers every type that declared a [`ConventionEntry`].
    #[must_use]
    pub fn with_declared(mut self) -> Self {
        self.include_declared = true;
        self
    }

    /// Ignores declared conventions.
    #[must_use]
    pub fn without_declared(mut self) -> Self {
        self.include_declared = false;
        self
    }

    /// Adds `T`, converted through its [`FromStr`] implementation.
    #[must_use]
    pub fn with<T>(mut self) -> Self
    where
        T: FromStr + Send + Sync + 'static,
        T::Err: Into<BoxError>,
    {
        self.insert::<T>();
        self
    }

    /// Adds `T`, converted through its [`FromStr`] implementation.
    ///
    /// Replaces any existing convention for `T`.
    pub fn insert<T>(&mut self)
    where
        T: FromStr + Send + Sync + 'static,
        T::Err: Into<BoxError>,
    {
        self.converters
            .insert(TypeKey::of::<T>(), from_str_fn::<T> as ConventionFn);
    }

    fn insert_trimmed<T>(&mut self)
    where
        T: FromStr + Send + Sync + 'static,
        T::Err: Into<BoxError>,
    {
        self.converters
            .insert(TypeKey::of::<T>(), trimmed_from_str_fn::<T> as ConventionFn);
    }

    fn lookup(&self, key: TypeKey) -> Option<ConventionFn> {
        if let Some(convert) = self.converters.get(&key) {
            return Some(*convert);
        }
        if self.include_declared {
            declared(key)
        } else {
            None
        }
    }

    /// Returns the names of the explicitly covered types. Declared
    /// conventions are not listed.
    #[must_use]
    pub fn supported_types(&self) -> Vec<&'static str> {
        self.converters.keys().map(TypeKey::type_name).collect()
    }
}

impl ConventionProvider for StdConventions {
    fn can_convert(&self, key: TypeKey) -> bool {
        self.lookup(key).is_some()
    }

    fn convert(
        &self,
        key: TypeKey,
        text: &str,
        _ctx: Option<&FormatContext>,
    ) -> Result<ParsedValue, BoxError> {
        let convert = self
            .lookup(key)
            .ok_or(UnsupportedType(key.type_name()))?;
        convert(text)
    }
}
