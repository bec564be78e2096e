//! Runtime-extensible conversion of text into strongly typed values.
//!
//! `strparse_core` picks a conversion strategy per target type through a
//! prioritized resolution chain and caches the result:
//!
//! - [`registry`] - The [`ParserRegistry`] resolver and cache
//! - [`convention`] - Conversions for types that implement [`FromStr`](core::str::FromStr),
//!   built in or declared with [`derive@ParseConvention`]
//! - [`discovery`] - Static `parse` factories found through [`macro@parse_factory`]
//! - [`converter`] - The uniform [`Converter`] handle stored in the cache
//! - [`key`] - [`TypeKey`] type identities
//! - [`error`] - [`ParseError`] and friends
//!
//! # Example
//!
//! ```
//! use strparse_core::{ParserRegistry, parse_factory};
//!
//! pub struct Slug(String);
//!
//! #[parse_factory]
//! impl Slug {
//!     pub fn parse(input: &str) -> Self {
//!         Slug(input.replace(' ', "-"))
//!     }
//! }
//!
//! fn main() {
//!     let registry = ParserRegistry::new();
//!
//!     assert!(registry.parse::<bool>("FALSE").is_ok());
//!     assert_eq!(registry.parse::<Slug>("hello world").unwrap().0, "hello-world");
//! }
//! ```

// Lets `#[parse_factory]` emit `strparse_core::` paths inside this crate.
extern crate self as strparse_core;

/// Convention-based conversion providers.
pub mod convention;

/// Type-erased converter handles.
pub mod converter;

/// Factory discovery.
pub mod discovery;

/// Error types.
pub mod error;

/// Extension methods on `str`.
pub mod ext;

/// Type identities.
pub mod key;

/// The resolver and cache.
pub mod registry;

pub use convention::{
    ConventionEntry, ConventionFn, ConventionProvider, InvalidBool, StdConventions,
    UnsupportedType,
};
pub use converter::{Converter, ConverterOrigin, FormatContext, ParsedValue};
pub use discovery::{
    FACTORY_METHOD, FactoryDiscovery, FactoryEntry, FactoryFn, FactoryHandle, InventoryDiscovery,
};
pub use error::{BoxError, ParseError};
pub use ext::ParseExt;
pub use key::TypeKey;
pub use registry::{ParserRegistry, ParserRegistryBuilder};

/// Re-export the `#[parse_factory]` attribute and `#[derive(ParseConvention)]`.
pub use strparse_macros::{ParseConvention, parse_factory};

/// Items used by macro-generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::convention::{ConventionProvider, StdConventions};
    pub use crate::converter::{Converter, ConverterOrigin, FormatContext};
    pub use crate::discovery::{FactoryDiscovery, InventoryDiscovery};
    pub use crate::error::ParseError;
    pub use crate::ext::ParseExt;
    pub use crate::key::TypeKey;
    pub use crate::registry::ParserRegistry;
    pub use strparse_macros::{ParseConvention, parse_factory};
}
