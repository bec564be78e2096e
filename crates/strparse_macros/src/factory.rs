//! Code generation for `#[parse_factory]` on impl blocks.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    FnArg, GenericArgument, GenericParam, ImplItem, ImplItemFn, ItemImpl, PathArguments,
    ReturnType, Signature, Type, Visibility,
};

use crate::crate_path::strparse_core_path;

/// Name of the conventional factory method. Must match
/// `strparse_core::FACTORY_METHOD`.
const FACTORY_METHOD: &str = "parse";

/// How the factory reports its result.
enum ReturnKind {
    /// `fn parse(&str) -> Self`
    Value,
    /// `fn parse(&str) -> Result<Self, E>`
    Fallible,
}

/// Generates the factory submission for an impl block.
///
/// On error the impl block is still emitted, so the only diagnostic the user
/// sees is the one pointing at the rejected shape.
pub(crate) fn generate_parse_factory(attr: TokenStream, input: &ItemImpl) -> TokenStream {
    match expand(attr, input) {
        Ok(tokens) => tokens,
        Err(err) => {
            let err = err.to_compile_error();
            quote! {
                #input
                #err
            }
        }
    }
}

fn expand(attr: TokenStream, input: &ItemImpl) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "#[parse_factory] takes no arguments",
        ));
    }

    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[parse_factory] must be applied to an inherent impl block, not a trait impl",
        ));
    }

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[parse_factory] does not support generic impl blocks",
        ));
    }

    let self_ty = &input.self_ty;

    let Some(method) = input.items.iter().find_map(|item| match item {
        ImplItem::Fn(method) if method.sig.ident == FACTORY_METHOD => Some(method),
        _ => None,
    }) else {
        return Err(syn::Error::new_spanned(
            self_ty,
            "#[parse_factory] requires a `pub fn parse(input: &str) -> Self` \
             or `pub fn parse(input: &str) -> Result<Self, E>` in this impl block",
        ));
    };

    let kind = validate_factory(method, self_ty)?;

    let core = strparse_core_path();
    let method_ident = &method.sig.ident;

    let body = match kind {
        ReturnKind::Value => quote! {
            ::core::result::Result::Ok(
                ::std::boxed::Box::new(<#self_ty>::#method_ident(input)) as #core::ParsedValue
            )
        },
        ReturnKind::Fallible => quote! {
            <#self_ty>::#method_ident(input)
                .map(|value| ::std::boxed::Box::new(value) as #core::ParsedValue)
                .map_err(::core::convert::Into::into)
        },
    };

    Ok(quote! {
        #input

        const _: () = {
            fn __strparse_factory(
                input: &str,
            ) -> ::core::result::Result<#core::ParsedValue, #core::BoxError> {
                #body
            }

            #core::__private::inventory::submit! {
                #core::FactoryEntry::of::<#self_ty>(#core::FACTORY_METHOD, __strparse_factory)
            }
        };
    })
}

/// Checks the conventional factory shape: public, associated, one `&str`
/// parameter, returning the impl's own type.
fn validate_factory(method: &ImplItemFn, self_ty: &Type) -> syn::Result<ReturnKind> {
    let sig = &method.sig;

    if !matches!(method.vis, Visibility::Public(_)) {
        return Err(syn::Error::new_spanned(
            &sig.ident,
            "#[parse_factory] requires `parse` to be `pub`",
        ));
    }

    validate_modifiers(sig)?;

    let mut inputs = sig.inputs.iter();
    let (Some(first), None) = (inputs.next(), inputs.next()) else {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "`parse` must take exactly one `&str` parameter",
        ));
    };

    match first {
        FnArg::Receiver(receiver) => {
            return Err(syn::Error::new_spanned(
                receiver,
                "`parse` must be an associated function without a `self` receiver",
            ));
        }
        FnArg::Typed(pat_type) if !is_str_ref(&pat_type.ty) => {
            return Err(syn::Error::new_spanned(
                &pat_type.ty,
                "`parse` must take its input as `&str`",
            ));
        }
        FnArg::Typed(_) => {}
    }

    classify_return(&sig.output, self_ty).ok_or_else(|| {
        syn::Error::new_spanned(
            &sig.output,
            "`parse` must return `Self` or `Result<Self, E>`",
        )
    })
}

fn validate_modifiers(sig: &Signature) -> syn::Result<()> {
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "#[parse_factory] does not support async factories",
        ));
    }

    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(
            unsafety,
            "#[parse_factory] does not support unsafe factories",
        ));
    }

    // Lifetimes are fine; the wrapper can only instantiate concrete types.
    if sig
        .generics
        .params
        .iter()
        .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "#[parse_factory] does not support generic factories",
        ));
    }

    Ok(())
}

/// Matches `&str` and `&'a str`.
fn is_str_ref(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => {
            reference.mutability.is_none()
                && matches!(&*reference.elem, Type::Path(path) if path.qself.is_none() && path.path.is_ident("str"))
        }
        Type::Group(group) => is_str_ref(&group.elem),
        _ => false,
    }
}

fn classify_return(output: &ReturnType, self_ty: &Type) -> Option<ReturnKind> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };

    if is_self(ty, self_ty) {
        return Some(ReturnKind::Value);
    }

    let Type::Path(path) = &**ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(ok) if is_self(ok, self_ty) => Some(ReturnKind::Fallible),
        _ => None,
    }
}

/// Matches `Self` or a type spelled exactly like the impl's self type.
fn is_self(ty: &Type, self_ty: &Type) -> bool {
    if let Type::Path(path) = ty
        && path.qself.is_none()
        && path.path.is_ident("Self")
    {
        return true;
    }

    quote!(#ty).to_string() == quote!(#self_ty).to_string()
}
