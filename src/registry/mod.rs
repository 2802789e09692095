//! Predefined function registry
//!
//! Per-arity function tables, their catalogue signatures and the function
//! implementations the dispatcher routes to.

#![warn(missing_docs)]

pub mod catalogue;
pub mod function;
pub mod functions;
pub mod signature;

pub use catalogue::FunctionCatalogue;
pub use function::{
    Arity, BinaryFunction, NullaryFunction, SpecialForm, TernaryFunction, UnaryFunction,
};
pub use signature::{FunctionSignature, ParameterInfo};
