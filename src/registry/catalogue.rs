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

//! Predefined function catalogue
//!
//! Names, arities and coercions listed here are what configuration authors write
//! literally, so changing any of them is a breaking change.

use std::sync::LazyLock;

use serde_json::{Value, json};

use crate::registry::function::{
    Arity, BinaryFunction, NullaryFunction, SpecialForm, TernaryFunction, UnaryFunction,
};
use crate::registry::signature::FunctionSignature;

static SIGNATURES: LazyLock<Vec<FunctionSignature>> = LazyLock::new(|| {
    let mut signatures: Vec<FunctionSignature> = Vec::new();
    signatures.extend(NullaryFunction::ALL.iter().map(|f| f.signature()));
    signatures.extend(UnaryFunction::ALL.iter().map(|f| f.signature()));
    signatures.extend(SpecialForm::ALL.iter().map(|f| f.signature()));
    signatures.extend(BinaryFunction::ALL.iter().map(|f| f.signature()));
    signatures.extend(TernaryFunction::ALL.iter().map(|f| f.signature()));
    signatures.sort_by(|a, b| a.name.cmp(&b.name).then(a.arity().cmp(&b.arity())));
    signatures
});

/// Read-only view over every predefined function signature
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionCatalogue;

impl FunctionCatalogue {
    /// Create a catalogue view
    pub fn new() -> Self {
        Self
    }

    /// All signatures, sorted by name then arity
    pub fn signatures(&self) -> &'static [FunctionSignature] {
        &SIGNATURES
    }

    /// Signatures registered under a name
    pub fn get_signatures(&self, name: &str) -> Vec<&'static FunctionSignature> {
        SIGNATURES.iter().filter(|sig| sig.name == name).collect()
    }

    /// Check if a name is defined for the given arity
    pub fn supports(&self, name: &str, arity: Arity) -> bool {
        match arity {
            Arity::Nullary => NullaryFunction::from_name(name).is_some(),
            Arity::Unary => {
                UnaryFunction::from_name(name).is_some() || SpecialForm::from_name(name).is_some()
            }
            Arity::Binary => BinaryFunction::from_name(name).is_some(),
            Arity::Ternary => TernaryFunction::from_name(name).is_some(),
        }
    }

    /// Distinct function names, sorted
    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = SIGNATURES.iter().map(|sig| sig.name.as_str()).collect();
        names.dedup();
        names
    }

    /// Generate Markdown documentation for every function
    pub fn generate_function_docs(&self) -> String {
        let mut docs = String::new();
        docs.push_str("# Predefined Function Documentation\n\n");

        for name in self.function_names() {
            docs.push_str(&format!("## `{name}`\n\n"));
            for sig in self.get_signatures(name) {
                docs.push_str(&format!("- `{sig}`"));
                if !sig.documentation.is_empty() {
                    docs.push_str(&format!(": {}", sig.documentation));
                }
                docs.push('\n');
            }
            docs.push('\n');
        }

        docs
    }

    /// Generate JSON documentation for every function
    pub fn generate_function_docs_json(&self) -> Value {
        let functions: Vec<Value> = SIGNATURES
            .iter()
            .map(|sig| {
                let params: Vec<Value> = sig
                    .parameters
                    .iter()
                    .map(|p| json!({ "name": p.name, "type": p.param_type.to_string() }))
                    .collect();
                json!({
                    "name": sig.name,
                    "arity": sig.arity(),
                    "parameters": params,
                    "return_type": sig.return_type.to_string(),
                    "pure": sig.pure,
                    "documentation": sig.documentation,
                })
            })
            .collect();

        let total_count = functions.len();
        json!({
            "functions": functions,
            "total_count": total_count,
        })
    }
}
