//! Procedural macros for `strparse_core`.
//!
//! - `#[parse_factory]` submits a type's conventional `parse` function for
//!   factory discovery.
//! - `#[derive(ParseConvention)]` declares a type's `FromStr` implementation
//!   as its conversion convention.

mod convention;
mod crate_path;
mod factory;

use proc_macro::TokenStream;

/// Submits a type's `parse` function for factory discovery.
///
/// Apply to an inherent impl block that contains a public associated
/// function named `parse` with exactly one `&str` parameter, returning
/// either `Self` or `Result<Self, E>` where `E` converts into
/// `strparse_core::BoxError`. The impl block is emitted unchanged; a direct
/// call wrapper is submitted alongside it so a `ParserRegistry` can find it
/// by type.
///
/// The type must be `Send + Sync + 'static`. The attribute takes no
/// arguments. Generic impl blocks, trait impls, and `async`, `unsafe`, or
/// type-generic factories are rejected.
///
/// # Example
///
/// ```
/// use strparse_core::{ParserRegistry, parse_factory};
///
/// pub struct Version(u32, u32);
///
/// #[parse_factory]
/// impl Version {
///     pub fn parse(input: &str) -> Result<Self, std::num::ParseIntError> {
///         let (major, minor) = input.split_once('.').unwrap_or((input, "0"));
///         Ok(Version(major.parse()?, minor.parse()?))
///     }
/// }
///
/// fn main() {
///     let registry = ParserRegistry::new();
///     let version = registry.parse::<Version>("2.7").unwrap();
///     assert_eq!((version.0, version.1), (2, 7));
/// }
/// ```
#[proc_macro_attribute]
pub fn parse_factory(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemImpl);
    factory::generate_parse_factory(attr.into(), &input).into()
}

/// Declares the type's `FromStr` implementation as its text conversion.
///
/// The default `StdConventions` provider then resolves the type with no
/// registration step. `<T as FromStr>::Err` must convert into
/// `strparse_core::BoxError`. Generic types are rejected.
///
/// # Example
///
/// ```
/// use strparse_core::{ParseConvention, ParserRegistry};
///
/// #[derive(Debug, PartialEq, ParseConvention)]
/// pub struct Percent(u8);
///
/// impl std::str::FromStr for Percent {
///     type Err = std::num::ParseIntError;
///
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.trim_end_matches('%').parse().map(Percent)
///     }
/// }
///
/// fn main() {
///     let registry = ParserRegistry::new();
///     assert_eq!(registry.parse::<Percent>("42%").unwrap(), Percent(42));
/// }
/// ```
#[proc_macro_derive(ParseConvention)]
pub fn derive_parse_convention(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    convention::generate_parse_convention(&input).into()
}
