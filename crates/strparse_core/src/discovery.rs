//! Factory discovery.
//!
//! The last step of the resolution chain looks for a static factory on the
//! target type: an associated function named [`FACTORY_METHOD`] that takes a
//! single `&str` and returns the type. Rust has no runtime reflection, so the
//! lookup is split in two:
//!
//! 1. At compile time, [`#[parse_factory]`](crate::parse_factory) inspects an
//!    impl block, finds the conventional method, and submits a
//!    [`FactoryEntry`] wrapping a direct call to it.
//! 2. At run time, [`InventoryDiscovery`] scans the submitted entries for the
//!    requested [`TypeKey`].
//!
//! # Example
//!
//! ```
//! use strparse_core::{FactoryDiscovery, InventoryDiscovery, TypeKey, parse_factory};
//!
//! pub struct Hostname(String);
//!
//! #[parse_factory]
//! impl Hostname {
//!     pub fn parse(input: &str) -> Self {
//!         Hostname(input.to_ascii_lowercase())
//!     }
//! }
//!
//! fn main() {
//!     let handle = InventoryDiscovery
//!         .find_factory(TypeKey::of::<Hostname>())
//!         .unwrap()
//!         .expect("factory was submitted");
//!     let value = handle.invoke("Example.COM").unwrap();
//!     assert_eq!(value.downcast_ref::<Hostname>().unwrap().0, "example.com");
//! }
//! ```

use crate::converter::ParsedValue;
use crate::error::{BoxError, ParseError};
use crate::key::TypeKey;
use core::any::TypeId;

/// Name a factory method must carry to be discovered. Case-sensitive.
pub const FACTORY_METHOD: &str = "parse";

/// Direct-call wrapper around a discovered factory method.
pub type FactoryFn = fn(&str) -> Result<ParsedValue, BoxError>;

/// A factory submitted for discovery.
///
/// Entries are usually generated by [`#[parse_factory]`](crate::parse_factory).
/// They can also be submitted by hand through the re-exported `inventory`
/// crate:
///
/// ```
/// use strparse_core::{BoxError, FactoryEntry, ParsedValue};
///
/// pub struct Token(String);
///
/// fn token_factory(input: &str) -> Result<ParsedValue, BoxError> {
///     Ok(Box::new(Token(input.to_owned())))
/// }
///
/// strparse_core::__private::inventory::submit! {
///     FactoryEntry::of::<Token>("parse", token_factory)
/// }
/// # fn main() {}
/// ```
pub struct FactoryEntry {
    type_id: fn() -> TypeId,
    type_name: fn() -> &'static str,
    method: &'static str,
    factory: FactoryFn,
}

impl FactoryEntry {
    /// Describes `factory` as the `method` of type `T`.
    #[must_use]
    pub const fn of<T: 'static>(method: &'static str, factory: FactoryFn) -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_name: core::any::type_name::<T>,
            method,
            factory,
        }
    }

    /// Returns the type this factory produces.
    #[must_use]
    pub fn key(&self) -> TypeKey {
        TypeKey::from_raw((self.type_id)(), (self.type_name)())
    }

    /// Returns the name of the wrapped method.
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Returns a callable handle for this entry.
    #[must_use]
    pub fn handle(&self) -> FactoryHandle {
        FactoryHandle::new(self.key(), self.method, self.factory)
    }
}

impl core::fmt::Debug for FactoryEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FactoryEntry")
            .field("type_name", &(self.type_name)())
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

inventory::collect!(FactoryEntry);

/// A located factory, invocable as `(text) -> value`.
#[derive(Debug, Clone, Copy)]
pub struct FactoryHandle {
    key: TypeKey,
    method: &'static str,
    factory: FactoryFn,
}

impl FactoryHandle {
    /// Creates a handle around a factory function producing the keyed type.
    #[must_use]
    pub fn new(key: TypeKey, method: &'static str, factory: FactoryFn) -> Self {
        Self {
            key,
            method,
            factory,
        }
    }

    /// Returns the type the factory produces.
    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Returns the name of the wrapped method.
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Returns the underlying function pointer.
    #[must_use]
    pub fn factory(&self) -> FactoryFn {
        self.factory
    }

    /// Invokes the factory.
    ///
    /// # Errors
    ///
    /// Returns the factory's own error if it rejects the input.
    pub fn invoke(&self, text: &str) -> Result<ParsedValue, BoxError> {
        (self.factory)(text)
    }
}

/// Locates a static text-to-value factory for a type.
pub trait FactoryDiscovery: Send + Sync {
    /// Returns the factory for the keyed type, if exactly one exists.
    ///
    /// # Errors
    ///
    /// Implementations return [`ParseError::AmbiguousFactory`] when more than
    /// one candidate matches.
    fn find_factory(&self, key: TypeKey) -> Result<Option<FactoryHandle>, ParseError>;
}

/// Discovers factories submitted through `inventory`.
///
/// Only entries whose method is named [`FACTORY_METHOD`] are considered.
/// Several matches for the same type are rejected rather than resolved by
/// link order.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryDiscovery;

impl InventoryDiscovery {
    /// Returns every submitted entry, in no particular order.
    pub fn entries() -> impl Iterator<Item = &'static FactoryEntry> {
        inventory::iter::<FactoryEntry>()
    }
}

impl FactoryDiscovery for InventoryDiscovery {
    fn find_factory(&self, key: TypeKey) -> Result<Option<FactoryHandle>, ParseError> {
        let mut candidates =
            Self::entries().filter(|entry| entry.method == FACTORY_METHOD && entry.key() == key);

        let Some(first) = candidates.next() else {
            return Ok(None);
        };

        let others = candidates.count();
        if others > 0 {
            return Err(ParseError::AmbiguousFactory {
                type_name: key.type_name(),
                candidates: others + 1,
            });
        }

        Ok(Some(first.handle()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(String);
    struct Doubled(String);
    struct WrongName;
    struct Missing;

    fn plain(input: &str) -> Result<ParsedValue, BoxError> {
        Ok(Box::new(Plain(input.to_owned())))
    }

    fn doubled_a(input: &str) -> Result<ParsedValue, BoxError> {
        Ok(Box::new(Doubled(input.to_owned())))
    }

    fn doubled_b(input: &str) -> Result<ParsedValue, BoxError> {
        Ok(Box::new(Doubled(input.repeat(2))))
    }

    fn wrong_name(_: &str) -> Result<ParsedValue, BoxError> {
        Ok(Box::new(WrongName))
    }

    inventory::submit! { FactoryEntry::of::<Plain>("parse", plain) }
    inventory::submit! { FactoryEntry::of::<Doubled>("parse", doubled_a) }
    inventory::submit! { FactoryEntry::of::<Doubled>("parse", doubled_b) }
    inventory::submit! { FactoryEntry::of::<WrongName>("Parse", wrong_name) }

    #[test]
    fn single_entry_is_found() {
        let handle = InventoryDiscovery
            .find_factory(TypeKey::of::<Plain>())
            .unwrap()
            .unwrap();

        assert_eq!(handle.key(), TypeKey::of::<Plain>());
        assert_eq!(handle.method(), FACTORY_METHOD);

        let value = handle.invoke("abc").unwrap();
        assert_eq!(value.downcast_ref::<Plain>().unwrap().0, "abc");
    }

    #[test]
    fn method_name_is_case_sensitive() {
        let found = InventoryDiscovery
            .find_factory(TypeKey::of::<WrongName>())
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn absent_type_is_none() {
        let found = InventoryDiscovery
            .find_factory(TypeKey::of::<Missing>())
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn duplicate_entries_fail_fast() {
        let err = InventoryDiscovery
            .find_factory(TypeKey::of::<Doubled>())
            .unwrap_err();

        assert!(matches!(
            err,
            ParseError::AmbiguousFactory { candidates: 2, .. }
        ));
    }

    #[test]
    fn entry_reports_metadata() {
        let entry = FactoryEntry::of::<Plain>("parse", plain);

        assert_eq!(entry.key(), TypeKey::of::<Plain>());
        assert_eq!(entry.method(), "parse");
        assert!(format!("{entry:?}").contains("Plain"));
    }
}
