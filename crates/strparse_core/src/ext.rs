//! Invocation helpers on string slices.

use crate::converter::ParsedValue;
use crate::error::ParseError;
use crate::key::TypeKey;
use crate::registry::ParserRegistry;

/// Extension methods for parsing a string through a [`ParserRegistry`].
///
/// # Example
///
/// ```
/// use strparse_core::{ParseExt, ParserRegistry};
///
/// let registry = ParserRegistry::new();
///
/// let n: i32 = "123".parse_with(&registry).unwrap();
/// assert_eq!(n, 123);
///
/// let input: Option<&str> = None;
/// let n = input.map_or(Ok(0), |s| s.parse_with::<i32>(&registry)).unwrap();
/// assert_eq!(n, 0);
/// ```
pub trait ParseExt {
    /// Parses `self` into a `T`. See [`ParserRegistry::parse`].
    ///
    /// # Errors
    ///
    /// See [`ParserRegistry::parse`].
    fn parse_with<T: 'static>(&self, registry: &ParserRegistry) -> Result<T, ParseError>;

    /// Parses `self` into the keyed type. See [`ParserRegistry::parse_as`].
    ///
    /// # Errors
    ///
    /// See [`ParserRegistry::parse_as`].
    fn parse_as_key(
        &self,
        key: TypeKey,
        registry: &ParserRegistry,
    ) -> Result<ParsedValue, ParseError>;
}

impl ParseExt for str {
    fn parse_with<T: 'static>(&self, registry: &ParserRegistry) -> Result<T, ParseError> {
        registry.parse::<T>(self)
    }

    fn parse_as_key(
        &self,
        key: TypeKey,
        registry: &ParserRegistry,
    ) -> Result<ParsedValue, ParseError> {
        registry.parse_as(self, key)
    }
}
