//! Code generation for `#[derive(ParseConvention)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::crate_path::strparse_core_path;

/// Generates the convention submission for a type.
pub(crate) fn generate_parse_convention(input: &DeriveInput) -> TokenStream {
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[derive(ParseConvention)] does not support generic types",
        )
        .to_compile_error();
    }

    let core = strparse_core_path();
    let ident = &input.ident;

    quote! {
        #core::__private::inventory::submit! {
            #core::ConventionEntry::of::<#ident>()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn generic_type_is_a_compile_error() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T>(T);
        };
        let tokens = generate_parse_convention(&input).to_string();
        assert!(tokens.contains("compile_error"));
        assert!(tokens.contains("generic types"));
    }

    #[test]
    fn submits_entry_for_type() {
        let input: DeriveInput = parse_quote! {
            struct Celsius(f64);
        };
        let tokens = generate_parse_convention(&input).to_string();
        assert!(tokens.contains("ConventionEntry"));
        assert!(tokens.contains("Celsius"));
        assert!(!tokens.contains("compile_error"));
    }
}
