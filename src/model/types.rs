// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Type descriptors for expression values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type information for expression values and function parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeInfo {
    /// The null value
    Null,
    /// Boolean value (true/false)
    Boolean,
    /// 64-bit signed integer
    Integer,
    /// IEEE-754 double
    Double,
    /// Text value
    String,
    /// JSON array
    Array,
    /// JSON object
    Object,

    /// Integer or double
    Number,
    /// Any value (used for polymorphic parameters)
    Any,
    /// An argument that is handed over unevaluated
    Expression,

    /// Union of multiple types
    Union(Vec<TypeInfo>),
}

impl TypeInfo {
    /// Get the name of this type for display
    pub fn type_name(&self) -> String {
        match self {
            TypeInfo::Null => "Null".to_string(),
            TypeInfo::Boolean => "Boolean".to_string(),
            TypeInfo::Integer => "Integer".to_string(),
            TypeInfo::Double => "Double".to_string(),
            TypeInfo::String => "String".to_string(),
            TypeInfo::Array => "Array".to_string(),
            TypeInfo::Object => "Object".to_string(),
            TypeInfo::Number => "Number".to_string(),
            TypeInfo::Any => "Any".to_string(),
            TypeInfo::Expression => "Expression".to_string(),
            TypeInfo::Union(types) => {
                let type_names: Vec<String> = types.iter().map(|t| t.type_name()).collect();
                type_names.join(" | ")
            }
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
