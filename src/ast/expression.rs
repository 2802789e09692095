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

//! Expression node contract

use std::fmt;

use crate::evaluator::{EvaluationContext, EvaluationResult};
use crate::model::ExpressionResult;

/// A unit of the parsed expression tree.
///
/// Nodes are immutable once the tree is assembled and may be shared read-only
/// between threads; all per-message state lives in the context.
pub trait ExpressionNode: fmt::Debug + Send + Sync {
    /// Evaluate the node against the current message context
    fn evaluate(&self, context: &mut dyn EvaluationContext) -> EvaluationResult<ExpressionResult>;
}

/// Owned expression node
pub type ExpressionNodeRef = Box<dyn ExpressionNode>;

/// Constant value
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    value: ExpressionResult,
}

impl LiteralNode {
    /// Create a literal node
    pub fn new(value: impl Into<ExpressionResult>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The literal value
    pub fn value(&self) -> &ExpressionResult {
        &self.value
    }
}

impl ExpressionNode for LiteralNode {
    fn evaluate(&self, _context: &mut dyn EvaluationContext) -> EvaluationResult<ExpressionResult> {
        Ok(self.value.clone())
    }
}
