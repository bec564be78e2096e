//! Locating `strparse_core` from generated code.
//!
//! Generated items refer to the core crate by path. A consumer may depend on
//! `strparse_core` directly, under a rename, or only through the `strparse`
//! umbrella, which re-exports it as `strparse::strparse_core`.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Path to `strparse_core` as seen by the crate being expanded.
pub(crate) fn strparse_core_path() -> TokenStream {
    if let Ok(found) = crate_name("strparse_core") {
        return dependency_root(found, "strparse_core");
    }

    if let Ok(found) = crate_name("strparse") {
        let umbrella = dependency_root(found, "strparse");
        return quote!(#umbrella::strparse_core);
    }

    // Not in the manifest at all; the resulting resolution error names the
    // crate the user is missing.
    quote!(strparse_core)
}

/// `Itself` still resolves by name: `strparse_core` declares
/// `extern crate self as strparse_core`, and its tests link it by name.
fn dependency_root(found: FoundCrate, own_name: &str) -> TokenStream {
    let name = match found {
        FoundCrate::Itself => format_ident!("{}", own_name),
        FoundCrate::Name(name) => format_ident!("{}", name),
    };
    quote!(#name)
}
