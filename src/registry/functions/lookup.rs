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

//! Functions that resolve values through the evaluation context
//!
//! Registry, vault and XPath failures reported by the context are mapped into
//! [`EvaluationError`]. `exists` is the one function that turns a failure back into
//! a value.

use log::{debug, warn};

use crate::ast::ExpressionNode;
use crate::config::EngineConfig;
use crate::evaluator::{EvaluationContext, EvaluationError, EvaluationResult};
use crate::model::ExpressionResult;

/// registry(key) - full content of a registry resource
pub fn registry(
    key: &ExpressionResult,
    context: &mut dyn EvaluationContext,
) -> EvaluationResult<ExpressionResult> {
    let ExpressionResult::String(key) = key else {
        return Err(EvaluationError::invalid_argument("registry", &[key]));
    };

    match context.registry_resource(key) {
        Ok(Some(content)) => Ok(ExpressionResult::String(content)),
        Ok(None) => Err(EvaluationError::RegistryResourceNotFound { key: key.clone() }),
        Err(e) => {
            debug!("registry lookup for {key} failed: {e}");
            Err(EvaluationError::RegistryAccess { key: key.clone() })
        }
    }
}

/// registry(key, property) - named property of a registry resource
pub fn registry_property(
    key: &ExpressionResult,
    property: &ExpressionResult,
    context: &mut dyn EvaluationContext,
) -> EvaluationResult<ExpressionResult> {
    let (ExpressionResult::String(key_name), ExpressionResult::String(property_name)) =
        (key, property)
    else {
        return Err(EvaluationError::invalid_argument("registry", &[key, property]));
    };

    context
        .registry_resource_property(key_name, property_name)
        .map(ExpressionResult::String)
        .ok_or_else(|| EvaluationError::RegistryPropertyNotFound {
            key: key_name.clone(),
            property: property_name.clone(),
        })
}

/// exists(expression) - true when the node evaluates to a non-null value.
///
/// Never fails; an evaluation failure reads as `false`.
pub fn exists(
    node: &dyn ExpressionNode,
    context: &mut dyn EvaluationContext,
) -> ExpressionResult {
    match node.evaluate(context) {
        Ok(value) => ExpressionResult::Boolean(!value.is_null()),
        Err(e) => {
            debug!("exists: argument failed to evaluate: {e}");
            ExpressionResult::Boolean(false)
        }
    }
}

/// xpath(expression) - evaluate against the current message
pub fn xpath(
    expression: &ExpressionResult,
    context: &mut dyn EvaluationContext,
) -> EvaluationResult<ExpressionResult> {
    let expression = expression.as_string();
    context.evaluate_xpath(&expression).map_err(|e| {
        debug!("xpath evaluation failed: {e}");
        EvaluationError::InvalidXPath { expression }
    })
}

/// secret(alias) - resolve through the secure vault.
///
/// A value carrying the configured lookup marker means the vault could not resolve
/// the alias.
pub fn secret(
    alias: &ExpressionResult,
    context: &mut dyn EvaluationContext,
    config: &EngineConfig,
) -> EvaluationResult<ExpressionResult> {
    let alias = alias.as_string();
    match context.fetch_secret_value(&alias) {
        Ok(value) if !value.starts_with(&config.vault_lookup_prefix) => {
            Ok(ExpressionResult::String(value))
        }
        Ok(_) => {
            warn!("secret alias {alias} could not be resolved by the vault");
            Err(EvaluationError::SecretResolution { alias })
        }
        Err(e) => {
            warn!("secret alias {alias} lookup failed: {e}");
            Err(EvaluationError::SecretResolution { alias })
        }
    }
}
