//! Expression evaluation
//!
//! Argument evaluation, function dispatch, the context capabilities the function
//! library reaches through, and the evaluation error type.

#![warn(missing_docs)]

mod arguments;
mod context;
mod dispatch;
mod error;

pub use arguments::{ArgumentRole, check_argument, evaluate_arguments};
pub use context::{
    CapabilityCall, ContextError, EvaluationContext, InMemoryContext, RegistryResource,
};
pub use dispatch::evaluate_function;
pub use error::{EvaluationError, EvaluationResult};
