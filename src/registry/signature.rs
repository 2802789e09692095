//! Function signatures for the predefined catalogue

use crate::model::TypeInfo;
use crate::registry::function::{
    BinaryFunction, NullaryFunction, SpecialForm, TernaryFunction, UnaryFunction,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature of one arity of a catalogue function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Parameters, in call order
    pub parameters: Vec<ParameterInfo>,
    /// Return type
    pub return_type: TypeInfo,
    /// Whether repeated calls with equal arguments always agree
    pub pure: bool,
    /// One-line description
    pub documentation: String,
}

/// Parameter information for functions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub param_type: TypeInfo,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        return_type: TypeInfo,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            pure: true,
            documentation: String::new(),
        }
    }

    /// Mark the function as reading the clock or an external resolver
    pub fn impure(mut self) -> Self {
        self.pure = false;
        self
    }

    /// Attach a description
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Number of arguments this signature takes
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl ParameterInfo {
    /// Create a parameter
    pub fn new(name: impl Into<String>, param_type: TypeInfo) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

fn param(name: &str, param_type: TypeInfo) -> ParameterInfo {
    ParameterInfo::new(name, param_type)
}

fn string_or_array() -> TypeInfo {
    TypeInfo::Union(vec![TypeInfo::String, TypeInfo::Array])
}

impl NullaryFunction {
    /// Catalogue signature
    pub fn signature(&self) -> FunctionSignature {
        let signature = match self {
            NullaryFunction::Now => {
                FunctionSignature::new(self.name(), vec![], TypeInfo::Integer).impure()
            }
        };
        signature.with_documentation(self.documentation())
    }
}

impl UnaryFunction {
    /// Catalogue signature
    pub fn signature(&self) -> FunctionSignature {
        use UnaryFunction as F;

        let source = |param_type: TypeInfo| vec![param("source", param_type)];
        let signature = match self {
            F::Length => {
                FunctionSignature::new(self.name(), source(string_or_array()), TypeInfo::Integer)
            }
            F::ToLower | F::ToUpper | F::String => {
                FunctionSignature::new(self.name(), source(TypeInfo::Any), TypeInfo::String)
            }
            F::Trim | F::Base64Decode | F::UrlDecode | F::Base64Encode | F::UrlEncode => {
                FunctionSignature::new(self.name(), source(TypeInfo::String), TypeInfo::String)
            }
            F::Abs | F::Ceil | F::Floor => {
                FunctionSignature::new(self.name(), source(TypeInfo::Number), TypeInfo::Number)
            }
            F::Round => {
                FunctionSignature::new(self.name(), source(TypeInfo::Number), TypeInfo::Integer)
            }
            F::Sqrt => {
                FunctionSignature::new(self.name(), source(TypeInfo::Number), TypeInfo::Double)
            }
            F::IsString | F::IsNumber | F::IsArray | F::IsObject | F::Boolean | F::Not => {
                FunctionSignature::new(self.name(), source(TypeInfo::Any), TypeInfo::Boolean)
            }
            F::Integer => {
                FunctionSignature::new(self.name(), source(TypeInfo::Any), TypeInfo::Integer)
            }
            F::Float => {
                FunctionSignature::new(self.name(), source(TypeInfo::Any), TypeInfo::Double)
            }
            F::Object => {
                FunctionSignature::new(self.name(), source(TypeInfo::Object), TypeInfo::Object)
            }
            F::Array => {
                FunctionSignature::new(self.name(), source(TypeInfo::Array), TypeInfo::Array)
            }
            F::Registry => FunctionSignature::new(
                self.name(),
                vec![param("key", TypeInfo::String)],
                TypeInfo::String,
            )
            .impure(),
            F::Xpath => FunctionSignature::new(
                self.name(),
                vec![param("expression", TypeInfo::String)],
                TypeInfo::Any,
            )
            .impure(),
            F::Secret => FunctionSignature::new(
                self.name(),
                vec![param("alias", TypeInfo::String)],
                TypeInfo::String,
            )
            .impure(),
        };
        signature.with_documentation(self.documentation())
    }
}

impl SpecialForm {
    /// Catalogue signature
    pub fn signature(&self) -> FunctionSignature {
        let signature = match self {
            SpecialForm::Exists => FunctionSignature::new(
                self.name(),
                vec![param("expression", TypeInfo::Expression)],
                TypeInfo::Boolean,
            )
            .impure(),
        };
        signature.with_documentation(self.documentation())
    }
}

impl BinaryFunction {
    /// Catalogue signature
    pub fn signature(&self) -> FunctionSignature {
        use BinaryFunction as F;

        let signature = match self {
            F::Substring => FunctionSignature::new(
                self.name(),
                vec![param("source", TypeInfo::String), param("start", TypeInfo::Integer)],
                TypeInfo::String,
            ),
            F::StartsWith | F::EndsWith | F::Contains => FunctionSignature::new(
                self.name(),
                vec![param("source", TypeInfo::String), param("fragment", TypeInfo::String)],
                TypeInfo::Boolean,
            ),
            F::Split => FunctionSignature::new(
                self.name(),
                vec![param("source", TypeInfo::String), param("pattern", TypeInfo::String)],
                TypeInfo::Array,
            ),
            F::Pow => FunctionSignature::new(
                self.name(),
                vec![param("source", TypeInfo::Number), param("exponent", TypeInfo::Number)],
                TypeInfo::Double,
            ),
            F::Base64Encode | F::UrlEncode => FunctionSignature::new(
                self.name(),
                vec![param("source", TypeInfo::String), param("charset", TypeInfo::String)],
                TypeInfo::String,
            ),
            F::Registry => FunctionSignature::new(
                self.name(),
                vec![param("key", TypeInfo::String), param("property", TypeInfo::String)],
                TypeInfo::String,
            )
            .impure(),
        };
        signature.with_documentation(self.documentation())
    }
}

impl TernaryFunction {
    /// Catalogue signature
    pub fn signature(&self) -> FunctionSignature {
        let parameters = match self {
            TernaryFunction::Substring => vec![
                param("source", TypeInfo::String),
                param("start", TypeInfo::Integer),
                param("end", TypeInfo::Integer),
            ],
            TernaryFunction::Replace => vec![
                param("source", TypeInfo::String),
                param("target", TypeInfo::String),
                param("replacement", TypeInfo::String),
            ],
        };
        FunctionSignature::new(self.name(), parameters, TypeInfo::String)
            .with_documentation(self.documentation())
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.param_type)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}
