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

//! Predefined function call node, e.g. `toUpper(payload.name)`

use std::sync::Arc;

use super::expression::{ExpressionNode, ExpressionNodeRef};
use crate::config::EngineConfig;
use crate::evaluator::{EvaluationContext, EvaluationResult, evaluate_function};
use crate::model::ExpressionResult;

/// Call of a function from the predefined catalogue.
///
/// The node owns its argument list for its whole life. Argument count and name
/// are only checked when the node is evaluated.
#[derive(Debug)]
pub struct PredefinedFunctionNode {
    function_name: String,
    arguments: Vec<ExpressionNodeRef>,
    config: Arc<EngineConfig>,
}

impl PredefinedFunctionNode {
    /// Create a call node with the default engine configuration
    pub fn new(function_name: impl Into<String>, arguments: Vec<ExpressionNodeRef>) -> Self {
        Self {
            function_name: function_name.into(),
            arguments,
            config: Arc::new(EngineConfig::default()),
        }
    }

    /// Share an engine configuration with this node
    pub fn with_config(mut self, config: Arc<EngineConfig>) -> Self {
        self.config = config;
        self
    }

    /// Function name as written
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Argument nodes, in call order
    pub fn arguments(&self) -> &[ExpressionNodeRef] {
        &self.arguments
    }
}

impl ExpressionNode for PredefinedFunctionNode {
    fn evaluate(&self, context: &mut dyn EvaluationContext) -> EvaluationResult<ExpressionResult> {
        evaluate_function(&self.function_name, &self.arguments, context, &self.config)
    }
}
