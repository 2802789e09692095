//! Expression tree nodes
//!
//! Only the node contract, a literal node and the predefined function call node
//! live here; operators, paths and the parser that assembles them are provided by
//! the host.

#![warn(missing_docs)]

mod expression;
mod function;

pub use expression::*;
pub use function::*;
