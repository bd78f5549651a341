//! GenPairs Core
//!
//! Shared primitives used by the compiler and the CLI: source spans and the
//! interned, namespace-tagged identifiers for categories, choices, and
//! properties.

pub mod ident;
pub mod span;

pub use ident::{CategoryName, ChoiceName, Ident, PropertyName};
pub use span::Span;
