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

//! Argument evaluation for predefined functions

use std::fmt;

use crate::ast::ExpressionNodeRef;
use crate::evaluator::context::EvaluationContext;
use crate::evaluator::error::{EvaluationError, EvaluationResult};
use crate::model::ExpressionResult;

/// Position of an argument, as named in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentRole {
    /// First argument, the value the function operates on
    Source,
    /// Second argument
    Argument1,
    /// Third argument
    Argument2,
}

impl ArgumentRole {
    /// Roles in argument order
    pub const ALL: [ArgumentRole; 3] = [
        ArgumentRole::Source,
        ArgumentRole::Argument1,
        ArgumentRole::Argument2,
    ];

    /// Name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentRole::Source => "source",
            ArgumentRole::Argument1 => "argument1",
            ArgumentRole::Argument2 => "argument2",
        }
    }
}

impl fmt::Display for ArgumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate exactly `N` argument nodes for `function`.
///
/// Nodes are evaluated strictly left to right and the first failure stops the
/// walk. Only once every argument has a value are they null-checked, in the same
/// order.
pub fn evaluate_arguments<const N: usize>(
    function: &str,
    nodes: &[ExpressionNodeRef],
    context: &mut dyn EvaluationContext,
) -> EvaluationResult<[ExpressionResult; N]> {
    let mut values = Vec::with_capacity(nodes.len());
    for node in nodes {
        values.push(node.evaluate(context)?);
    }

    for (value, role) in values.iter().zip(ArgumentRole::ALL) {
        check_argument(function, value, role)?;
    }

    values
        .try_into()
        .map_err(|values: Vec<ExpressionResult>| EvaluationError::InvalidArgumentCount {
            function: function.to_string(),
            count: values.len(),
        })
}

/// Reject a null argument
pub fn check_argument(
    function: &str,
    value: &ExpressionResult,
    role: ArgumentRole,
) -> EvaluationResult<()> {
    if value.is_null() {
        return Err(EvaluationError::NullArgument {
            function: function.to_string(),
            role,
        });
    }
    Ok(())
}
