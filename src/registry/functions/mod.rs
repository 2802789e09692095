//! Built-in function implementations
//!
//! Each function receives already evaluated, non-null arguments, except `exists`
//! which receives its argument node.

pub mod charset;
pub mod datetime;
pub mod encoding;
pub mod lookup;
pub mod math;
pub mod string;
pub mod type_conversion;

pub use charset::Charset;
