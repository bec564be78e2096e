//! Error types for converter resolution and parsing.

/// Boxed error produced by a conversion mechanism.
///
/// Mechanism failures travel through [`ParseError::Conversion`] untouched, so
/// callers can `downcast_ref` back to the concrete error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving or invoking a converter.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No registration, convention, or factory applies to the requested type.
    ///
    /// This outcome is never cached; the next call retries the full chain.
    #[error("no converter found for type '{type_name}'")]
    NoConverterFound {
        /// Name of the requested type.
        type_name: &'static str,
    },

    /// A converter for the type is already cached or registered.
    #[error("a converter for type '{type_name}' is already registered")]
    AlreadyRegistered {
        /// Name of the conflicting type.
        type_name: &'static str,
    },

    /// More than one factory was submitted for the same type.
    #[error("{candidates} factories named 'parse' were found for type '{type_name}'")]
    AmbiguousFactory {
        /// Name of the requested type.
        type_name: &'static str,
        /// Number of matching factory entries.
        candidates: usize,
    },

    /// The converter produced a value of a different type than requested.
    #[error("converter type mismatch: expected '{expected}', found '{found}'")]
    TypeMismatch {
        /// The statically requested type.
        expected: &'static str,
        /// The type the cached converter is declared to produce.
        found: &'static str,
    },

    /// The underlying mechanism rejected the input.
    #[error(transparent)]
    Conversion(BoxError),
}

impl ParseError {
    /// Creates a [`NoConverterFound`](Self::NoConverterFound).
    #[must_use]
    pub fn no_converter(type_name: &'static str) -> Self {
        Self::NoConverterFound { type_name }
    }

    /// Creates an [`AlreadyRegistered`](Self::AlreadyRegistered).
    #[must_use]
    pub fn already_registered(type_name: &'static str) -> Self {
        Self::AlreadyRegistered { type_name }
    }

    /// Creates a [`Conversion`](Self::Conversion) from any mechanism error.
    pub fn conversion(err: impl Into<BoxError>) -> Self {
        Self::Conversion(err.into())
    }

    /// Returns the mechanism error if this is a conversion failure.
    #[must_use]
    pub fn as_conversion(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Conversion(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
