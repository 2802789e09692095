//! Value model for expression evaluation
//!
//! This module provides the tagged result type every expression node produces,
//! together with the type descriptors used in diagnostics and function signatures.

#![warn(missing_docs)]

pub mod types;
pub mod value;

pub use types::TypeInfo;
pub use value::{ExpressionResult, format_double};
