// Error types for expression evaluation

use crate::evaluator::arguments::ArgumentRole;
use crate::model::ExpressionResult;
use crate::registry::Arity;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur while evaluating an expression.
///
/// Every failure is terminal for the evaluation in progress. The only place a
/// failure is turned back into a value is the `exists` function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// More arguments than any function accepts
    #[error("Invalid number of arguments: {count} provided for the function: {function}")]
    InvalidArgumentCount {
        /// Function name as written
        function: String,
        /// Number of arguments supplied
        count: usize,
    },

    /// Name not defined for the supplied number of arguments
    #[error("Invalid function: {function} with {arity}")]
    UnknownFunction {
        /// Function name as written
        function: String,
        /// Arity bucket that was searched
        arity: Arity,
    },

    /// An argument evaluated to null
    #[error("Null {role} value provided for the function: {function}")]
    NullArgument {
        /// Function name as written
        function: String,
        /// Position of the offending argument
        role: ArgumentRole,
    },

    /// Argument of the wrong variant
    #[error("Invalid argument provided for {function} function{}", describe_operands(.operands))]
    InvalidArgument {
        /// Function name
        function: &'static str,
        /// Rendered operands, by role
        operands: Vec<(ArgumentRole, String)>,
    },

    /// Start index outside the source string
    #[error("Invalid index for substring: {index}, source string length: {length}")]
    InvalidIndex {
        /// Requested start
        index: i64,
        /// Character length of the source
        length: usize,
    },

    /// Slice bounds outside the source string or reversed
    #[error("Invalid substring indices: start={start}, end={end}, string length={length}")]
    InvalidRange {
        /// Requested start
        start: i64,
        /// Requested end
        end: i64,
        /// Character length of the source
        length: usize,
    },

    /// Text could not be read as the requested type
    #[error("Invalid argument provided for {target} conversion")]
    Conversion {
        /// Target type name
        target: &'static str,
    },

    /// Structural conversion of a non-matching value
    #[error("Argument cannot be converted to a JSON {target}")]
    NotConvertible {
        /// `object` or `array`
        target: &'static str,
    },

    /// Charset name is legal but not available
    #[error("Invalid charset provided for {function} function. Charset: {charset}")]
    UnsupportedCharset {
        /// Function name
        function: &'static str,
        /// Charset name as written
        charset: String,
    },

    /// Text could not be encoded
    #[error("Error encoding the string for {function} function")]
    Encoding {
        /// Function name
        function: &'static str,
    },

    /// Input outside the base64 alphabet
    #[error("Invalid base64 input provided for base64Decode function: {reason}")]
    InvalidBase64 {
        /// Decoder diagnostic
        reason: String,
    },

    /// Separator is not a valid regular expression
    #[error("Invalid regular expression provided for split function: {pattern} ({reason})")]
    InvalidPattern {
        /// Pattern as written
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },

    /// Numeric result outside the integer range
    #[error("Numeric overflow in {function} function for value: {value}")]
    Overflow {
        /// Function name
        function: &'static str,
        /// Rendered input value
        value: String,
    },

    /// Registry has no resource under the key
    #[error("Could not find the registry resource: {key}")]
    RegistryResourceNotFound {
        /// Registry key
        key: String,
    },

    /// Resource exists but lacks the property
    #[error("Could not find the property: {property} in the registry resource: {key}")]
    RegistryPropertyNotFound {
        /// Registry key
        key: String,
        /// Property name
        property: String,
    },

    /// Registry lookup itself failed
    #[error("Error retrieving the registry resource: {key}")]
    RegistryAccess {
        /// Registry key
        key: String,
    },

    /// XPath expression rejected by the context
    #[error("Invalid XPATH expression : {expression}")]
    InvalidXPath {
        /// Expression as written
        expression: String,
    },

    /// Vault lookup failed or came back unresolved
    #[error("Error fetching secret value for alias: {alias}")]
    SecretResolution {
        /// Secret alias
        alias: String,
    },

    /// Failure raised by another expression node
    #[error("{0}")]
    Message(String),
}

impl EvaluationError {
    /// Create a free-form evaluation error
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrong-variant failure that lists the offending operands by role.
    ///
    /// Pass an empty slice for the short single-argument form of the message.
    pub fn invalid_argument(function: &'static str, operands: &[&ExpressionResult]) -> Self {
        Self::InvalidArgument {
            function,
            operands: ArgumentRole::ALL
                .iter()
                .copied()
                .zip(operands.iter().map(|value| value.as_string()))
                .collect(),
        }
    }
}

fn describe_operands(operands: &[(ArgumentRole, String)]) -> String {
    if operands.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = operands
        .iter()
        .map(|(role, value)| format!("{role}: {value}"))
        .collect();
    format!(". {}", parts.join(", "))
}
