//! Text-to-value conversion for arbitrary types, resolved once and cached.
//!

pub use strparse_core;
pub use strparse_core::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use strparse_core::prelude::*;
}
