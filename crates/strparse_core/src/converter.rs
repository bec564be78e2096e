//! Uniform, type-erased conversion functions.
//!
//! Every mechanism in the resolution chain is wrapped in a [`Converter`]: a
//! cheaply cloneable handle around a text-to-value function. The handle
//! carries the [`TypeKey`] of the value it produces, so a typed call can check
//! the tag before downcasting instead of trusting the caller.

use crate::error::{BoxError, ParseError};
use crate::key::TypeKey;
use core::any::Any;
use std::sync::Arc;

/// A type-erased parsed value.
pub type ParsedValue = Box<dyn Any + Send + Sync>;

/// Signature shared by every cached conversion function.
type ConvertFn = dyn Fn(&str, Option<&FormatContext>) -> Result<ParsedValue, BoxError> + Send + Sync;

/// Opaque formatting context forwarded to conversion mechanisms.
///
/// The resolver never inspects the context. Mechanisms that understand a
/// particular context type recover it with [`downcast_ref`](Self::downcast_ref).
///
/// # Example
///
/// ```
/// use strparse_core::FormatContext;
///
/// struct DecimalComma;
///
/// let ctx = FormatContext::new(DecimalComma);
/// assert!(ctx.downcast_ref::<DecimalComma>().is_some());
/// assert!(ctx.downcast_ref::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct FormatContext {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl FormatContext {
    /// Wraps a value as a format context.
    pub fn new<C: Any + Send + Sync>(context: C) -> Self {
        Self {
            inner: Arc::new(context),
            type_name: core::any::type_name::<C>(),
        }
    }

    /// Returns the context as `C` if that is its concrete type.
    #[must_use]
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        self.inner.downcast_ref::<C>()
    }
}

impl core::fmt::Debug for FormatContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("FormatContext").field(&self.type_name).finish()
    }
}

/// Which step of the resolution chain produced a converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterOrigin {
    /// Supplied through an explicit registration call.
    Registered,
    /// Produced by the convention provider.
    Convention,
    /// Wrapped around a discovered `parse` factory.
    Factory,
}

impl core::fmt::Display for ConverterOrigin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Registered => "registered",
            Self::Convention => "convention",
            Self::Factory => "factory",
        };
        f.write_str(label)
    }
}

/// A cached text-to-value conversion function.
///
/// Cloning is cheap and every clone shares the same underlying function, as
/// reported by [`Converter::ptr_eq`].
///
/// # Example
///
/// ```
/// use strparse_core::{Converter, ConverterOrigin};
///
/// let double = Converter::new(ConverterOrigin::Registered, |s: &str| {
///     s.parse::<i64>().map(|n| n * 2)
/// });
///
/// assert_eq!(double.call_as::<i64>("21", None).unwrap(), 42);
/// ```
#[derive(Clone)]
pub struct Converter {
    key: TypeKey,
    origin: ConverterOrigin,
    func: Arc<ConvertFn>,
}

impl Converter {
    /// Wraps a typed, fallible function.
    pub fn new<T, F, E>(origin: ConverterOrigin, f: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::with_context(origin, move |text: &str, _ctx: Option<&FormatContext>| f(text))
    }

    /// Wraps a typed, fallible function that also receives the format context.
    pub fn with_context<T, F, E>(origin: ConverterOrigin, f: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&str, Option<&FormatContext>) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::from_erased(TypeKey::of::<T>(), origin, move |text, ctx| {
            f(text, ctx)
                .map(|value| Box::new(value) as ParsedValue)
                .map_err(Into::into)
        })
    }

    /// Wraps an already type-erased function.
    ///
    /// `key` must name the type the function actually produces; typed calls
    /// report [`ParseError::TypeMismatch`] otherwise.
    pub fn from_erased<F>(key: TypeKey, origin: ConverterOrigin, f: F) -> Self
    where
        F: Fn(&str, Option<&FormatContext>) -> Result<ParsedValue, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            key,
            origin,
            func: Arc::new(f),
        }
    }

    /// Returns the type this converter produces.
    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Returns the resolution step that produced this converter.
    #[must_use]
    pub fn origin(&self) -> ConverterOrigin {
        self.origin
    }

    /// Invokes the converter, returning the untyped value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Conversion`] carrying the mechanism's own error
    /// if the input is rejected.
    pub fn call(&self, text: &str, ctx: Option<&FormatContext>) -> Result<ParsedValue, ParseError> {
        (self.func)(text, ctx).map_err(ParseError::Conversion)
    }

    /// Invokes the converter and downcasts the result to `T`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::TypeMismatch`] if this converter does not produce `T`
    /// - [`ParseError::Conversion`] if the mechanism rejects the input
    pub fn call_as<T: 'static>(
        &self,
        text: &str,
        ctx: Option<&FormatContext>,
    ) -> Result<T, ParseError> {
        let expected = TypeKey::of::<T>();
        let mismatch = || ParseError::TypeMismatch {
            expected: expected.type_name(),
            found: self.key.type_name(),
        };

        if self.key != expected {
            return Err(mismatch());
        }

        self.call(text, ctx)?
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| mismatch())
    }

    /// Returns `true` if both handles share the same underlying function.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.func, &b.func)
    }
}

impl core::fmt::Debug for Converter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Converter")
            .field("key", &self.key.type_name())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Label(String);

    fn label_converter() -> Converter {
        Converter::new(ConverterOrigin::Registered, |s: &str| {
            Ok::<_, BoxError>(Label(s.to_owned()))
        })
    }

    #[test]
    fn typed_call_round_trips() {
        let converter = label_converter();

        assert_eq!(converter.key(), TypeKey::of::<Label>());
        assert_eq!(converter.origin(), ConverterOrigin::Registered);
        assert_eq!(
            converter.call_as::<Label>("hi", None).unwrap(),
            Label("hi".into())
        );
    }

    #[test]
    fn wrong_type_is_reported() {
        let converter = label_converter();

        let err = converter.call_as::<String>("hi", None).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TypeMismatch { expected, .. } if expected == core::any::type_name::<String>()
        ));
    }

    #[test]
    fn mislabelled_erased_function_is_caught() {
        // Claims to produce Label but actually produces u8.
        let converter = Converter::from_erased(
            TypeKey::of::<Label>(),
            ConverterOrigin::Factory,
            |_, _| Ok(Box::new(7_u8) as ParsedValue),
        );

        let err = converter.call_as::<Label>("x", None).unwrap_err();
        assert!(matches!(err, ParseError::TypeMismatch { .. }));
    }

    #[test]
    fn mechanism_error_passes_through() {
        let converter = Converter::new(ConverterOrigin::Convention, str::parse::<u16>);

        let err = converter.call_as::<u16>("70000", None).unwrap_err();
        let inner = err
            .as_conversion()
            .and_then(|e| e.downcast_ref::<core::num::ParseIntError>());
        assert!(inner.is_some());
    }

    #[test]
    fn context_is_forwarded() {
        struct Radix(u32);

        let converter = Converter::with_context(
            ConverterOrigin::Registered,
            |s: &str, ctx: Option<&FormatContext>| {
                let radix = ctx
                    .and_then(|c| c.downcast_ref::<Radix>())
                    .map_or(10, |r| r.0);
                u32::from_str_radix(s, radix)
            },
        );

        let hex = FormatContext::new(Radix(16));
        assert_eq!(converter.call_as::<u32>("ff", Some(&hex)).unwrap(), 255);
        assert_eq!(converter.call_as::<u32>("10", None).unwrap(), 10);
    }

    #[test]
    fn clones_share_function() {
        let a = label_converter();
        let b = a.clone();
        let c = label_converter();

        assert!(Converter::ptr_eq(&a, &b));
        assert!(!Converter::ptr_eq(&a, &c));
    }
}
