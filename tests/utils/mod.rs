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

//! Shared nodes and contexts for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use synapse_expr::*;

/// Literal argument node
pub fn lit(value: impl Into<ExpressionResult>) -> ExpressionNodeRef {
    Box::new(LiteralNode::new(value))
}

/// Box any node as an argument
pub fn boxed(node: impl ExpressionNode + 'static) -> ExpressionNodeRef {
    Box::new(node)
}

/// Evaluate `name` over literal arguments against an empty context
pub fn call(name: &str, arguments: Vec<ExpressionResult>) -> EvaluationResult<ExpressionResult> {
    call_in(name, arguments, &mut InMemoryContext::new())
}

/// Evaluate `name` over literal arguments against `context`
pub fn call_in(
    name: &str,
    arguments: Vec<ExpressionResult>,
    context: &mut dyn EvaluationContext,
) -> EvaluationResult<ExpressionResult> {
    let nodes = arguments.into_iter().map(lit).collect();
    PredefinedFunctionNode::new(name, nodes).evaluate(context)
}

/// Node that always fails with the given message
#[derive(Debug)]
pub struct FailingNode(pub &'static str);

impl ExpressionNode for FailingNode {
    fn evaluate(&self, _context: &mut dyn EvaluationContext) -> EvaluationResult<ExpressionResult> {
        Err(EvaluationError::message(self.0))
    }
}

/// Node that appends its label to a shared journal before yielding its value
#[derive(Debug)]
pub struct RecordingNode {
    label: &'static str,
    value: ExpressionResult,
    journal: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingNode {
    pub fn new(
        label: &'static str,
        value: impl Into<ExpressionResult>,
        journal: &Arc<Mutex<Vec<&'static str>>>,
    ) -> ExpressionNodeRef {
        Box::new(Self {
            label,
            value: value.into(),
            journal: Arc::clone(journal),
        })
    }
}

impl ExpressionNode for RecordingNode {
    fn evaluate(&self, _context: &mut dyn EvaluationContext) -> EvaluationResult<ExpressionResult> {
        self.journal.lock().unwrap().push(self.label);
        Ok(self.value.clone())
    }
}

/// Node that resolves a secret through the context, like a nested `secret()` call
#[derive(Debug)]
pub struct SecretNode(pub &'static str);

impl ExpressionNode for SecretNode {
    fn evaluate(&self, context: &mut dyn EvaluationContext) -> EvaluationResult<ExpressionResult> {
        context
            .fetch_secret_value(self.0)
            .map(ExpressionResult::from)
            .map_err(|e| EvaluationError::message(e.to_string()))
    }
}

/// Context whose every capability fails
pub struct UnavailableContext;

impl EvaluationContext for UnavailableContext {
    fn registry_resource(&mut self, _key: &str) -> Result<Option<String>, ContextError> {
        Err(ContextError::Encoding("malformed resource".to_string()))
    }

    fn registry_resource_property(&mut self, _key: &str, _property: &str) -> Option<String> {
        None
    }

    fn fetch_secret_value(&mut self, _alias: &str) -> Result<String, ContextError> {
        Err(ContextError::Vault("vault sealed".to_string()))
    }

    fn evaluate_xpath(&mut self, expression: &str) -> Result<ExpressionResult, ContextError> {
        Err(ContextError::XPath(format!("cannot compile {expression}")))
    }
}

/// Context fixture with one registry resource, one secret and one XPath result
pub fn fixture_context() -> InMemoryContext {
    InMemoryContext::from_json_str(
        r#"{
            "registry": {
                "conf:/endpoints.xml": {
                    "content": "<endpoints/>",
                    "properties": { "env": "prod" }
                }
            },
            "secrets": { "db-password": "s3cret" },
            "xpath": { "//order/id": 42, "//order/items": ["a", "b"] }
        }"#,
    )
    .unwrap()
}
