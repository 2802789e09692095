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

//! Predefined function dispatch
//!
//! A call is routed by argument count first and by name second. Arguments of the
//! selected bucket are evaluated and null-checked before the name is resolved, so
//! an unknown name still runs its argument expressions.

use log::trace;

use crate::ast::{ExpressionNode, ExpressionNodeRef};
use crate::config::EngineConfig;
use crate::evaluator::arguments::evaluate_arguments;
use crate::evaluator::context::EvaluationContext;
use crate::evaluator::error::{EvaluationError, EvaluationResult};
use crate::model::ExpressionResult;
use crate::registry::functions::{datetime, encoding, lookup, math, string, type_conversion};
use crate::registry::{
    Arity, BinaryFunction, NullaryFunction, SpecialForm, TernaryFunction, UnaryFunction,
};

/// Evaluate the predefined function `name` over `arguments`
pub fn evaluate_function(
    name: &str,
    arguments: &[ExpressionNodeRef],
    context: &mut dyn EvaluationContext,
    config: &EngineConfig,
) -> EvaluationResult<ExpressionResult> {
    trace!("evaluating {name} with {} argument(s)", arguments.len());

    match arguments {
        [] => evaluate_nullary(name),
        [node] => evaluate_unary(name, node.as_ref(), arguments, context, config),
        [_, _] => evaluate_binary(name, arguments, context),
        [_, _, _] => evaluate_ternary(name, arguments, context),
        _ => Err(EvaluationError::InvalidArgumentCount {
            function: name.to_string(),
            count: arguments.len(),
        }),
    }
}

fn unknown(name: &str, arity: Arity) -> EvaluationError {
    EvaluationError::UnknownFunction {
        function: name.to_string(),
        arity,
    }
}

fn evaluate_nullary(name: &str) -> EvaluationResult<ExpressionResult> {
    let function =
        NullaryFunction::from_name(name).ok_or_else(|| unknown(name, NullaryFunction::ARITY))?;

    match function {
        NullaryFunction::Now => Ok(datetime::now()),
    }
}

fn evaluate_unary(
    name: &str,
    node: &dyn ExpressionNode,
    arguments: &[ExpressionNodeRef],
    context: &mut dyn EvaluationContext,
    config: &EngineConfig,
) -> EvaluationResult<ExpressionResult> {
    if let Some(form) = SpecialForm::from_name(name) {
        return match form {
            SpecialForm::Exists => Ok(lookup::exists(node, context)),
        };
    }

    let [source] = evaluate_arguments::<1>(name, arguments, context)?;
    let function =
        UnaryFunction::from_name(name).ok_or_else(|| unknown(name, UnaryFunction::ARITY))?;
    trace!("{function}: source is {}", source.type_name());

    use UnaryFunction as F;
    match function {
        F::Length => string::length(&source),
        F::ToLower => string::to_lower(&source),
        F::ToUpper => string::to_upper(&source),
        F::Trim => string::trim(&source),
        F::Abs => math::abs(&source),
        F::Ceil => math::ceil(&source),
        F::Floor => math::floor(&source),
        F::Round => math::round(&source, config.round_overflow),
        F::Sqrt => math::sqrt(&source),
        F::Base64Encode => encoding::base64_encode(&source, None),
        F::Base64Decode => encoding::base64_decode(&source),
        F::UrlEncode => encoding::url_encode(&source, None),
        F::UrlDecode => encoding::url_decode(&source),
        F::IsString => Ok(type_conversion::is_string(&source)),
        F::IsNumber => Ok(type_conversion::is_number(&source)),
        F::IsArray => Ok(type_conversion::is_array(&source)),
        F::IsObject => Ok(type_conversion::is_object(&source)),
        F::String => Ok(type_conversion::to_string(&source)),
        F::Integer => type_conversion::to_integer(&source),
        F::Float => type_conversion::to_float(&source),
        F::Boolean => Ok(type_conversion::to_boolean(&source)),
        F::Object => type_conversion::to_object(&source),
        F::Array => type_conversion::to_array(&source),
        F::Not => type_conversion::not(&source),
        F::Registry => lookup::registry(&source, context),
        F::Xpath => lookup::xpath(&source, context),
        F::Secret => lookup::secret(&source, context, config),
    }
}

fn evaluate_binary(
    name: &str,
    arguments: &[ExpressionNodeRef],
    context: &mut dyn EvaluationContext,
) -> EvaluationResult<ExpressionResult> {
    let [source, argument1] = evaluate_arguments::<2>(name, arguments, context)?;
    let function =
        BinaryFunction::from_name(name).ok_or_else(|| unknown(name, BinaryFunction::ARITY))?;

    use BinaryFunction as F;
    match function {
        F::Substring => string::substring_from(&source, &argument1),
        F::StartsWith => string::starts_with(&source, &argument1),
        F::EndsWith => string::ends_with(&source, &argument1),
        F::Contains => string::contains(&source, &argument1),
        F::Split => string::split(&source, &argument1),
        F::Pow => math::pow(&source, &argument1),
        F::Base64Encode => encoding::base64_encode(&source, Some(&argument1)),
        F::UrlEncode => encoding::url_encode(&source, Some(&argument1)),
        F::Registry => lookup::registry_property(&source, &argument1, context),
    }
}

fn evaluate_ternary(
    name: &str,
    arguments: &[ExpressionNodeRef],
    context: &mut dyn EvaluationContext,
) -> EvaluationResult<ExpressionResult> {
    let [source, argument1, argument2] = evaluate_arguments::<3>(name, arguments, context)?;
    let function =
        TernaryFunction::from_name(name).ok_or_else(|| unknown(name, TernaryFunction::ARITY))?;

    match function {
        TernaryFunction::Substring => string::substring_range(&source, &argument1, &argument2),
        TernaryFunction::Replace => string::replace(&source, &argument1, &argument2),
    }
}
