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

//! Type predicates and conversions

use crate::evaluator::{EvaluationError, EvaluationResult};
use crate::model::ExpressionResult;

/// isString()
pub fn is_string(source: &ExpressionResult) -> ExpressionResult {
    ExpressionResult::Boolean(source.is_string())
}

/// isNumber() - integers and doubles
pub fn is_number(source: &ExpressionResult) -> ExpressionResult {
    ExpressionResult::Boolean(source.is_number())
}

/// isArray()
pub fn is_array(source: &ExpressionResult) -> ExpressionResult {
    ExpressionResult::Boolean(source.is_array())
}

/// isObject()
pub fn is_object(source: &ExpressionResult) -> ExpressionResult {
    ExpressionResult::Boolean(source.is_object())
}

/// string() - textual form of any value
pub fn to_string(source: &ExpressionResult) -> ExpressionResult {
    ExpressionResult::String(source.as_string())
}

/// integer() - integers pass through, anything else is parsed from its text
pub fn to_integer(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Integer(_) => Ok(source.clone()),
        other => other
            .as_string()
            .parse::<i64>()
            .map(ExpressionResult::Integer)
            .map_err(|_| EvaluationError::Conversion { target: "integer" }),
    }
}

/// float() - doubles pass through, anything else is parsed from its text
pub fn to_float(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Double(_) => Ok(source.clone()),
        other => other
            .as_string()
            .trim()
            .parse::<f64>()
            .map(ExpressionResult::Double)
            .map_err(|_| EvaluationError::Conversion { target: "float" }),
    }
}

/// boolean() - only text reading `true` (any case) is true; never fails
pub fn to_boolean(source: &ExpressionResult) -> ExpressionResult {
    match source {
        ExpressionResult::Boolean(_) => source.clone(),
        other => ExpressionResult::Boolean(other.as_string().eq_ignore_ascii_case("true")),
    }
}

/// object() - objects pass through
pub fn to_object(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Object(_) => Ok(source.clone()),
        _ => Err(EvaluationError::NotConvertible { target: "object" }),
    }
}

/// array() - arrays pass through
pub fn to_array(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Array(_) => Ok(source.clone()),
        _ => Err(EvaluationError::NotConvertible { target: "array" }),
    }
}

/// not() - negation of the boolean reading of a value
pub fn not(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    source
        .as_boolean()
        .map(|b| ExpressionResult::Boolean(!b))
        .ok_or_else(|| EvaluationError::invalid_argument("not", &[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(value: &str) -> ExpressionResult {
        ExpressionResult::from(value)
    }

    fn b(value: bool) -> ExpressionResult {
        ExpressionResult::Boolean(value)
    }

    #[test]
    fn test_predicates_never_fail() {
        let values = [
            s("x"),
            ExpressionResult::Integer(1),
            ExpressionResult::Double(1.5),
            ExpressionResult::from_json(json!([1])),
            ExpressionResult::from_json(json!({"a": 1})),
            b(true),
        ];
        let numbers: Vec<bool> = values.iter().map(|v| is_number(v) == b(true)).collect();
        assert_eq!(numbers, vec![false, true, true, false, false, false]);
        assert_eq!(is_string(&values[0]), b(true));
        assert_eq!(is_array(&values[3]), b(true));
        assert_eq!(is_object(&values[4]), b(true));
        assert_eq!(is_object(&values[3]), b(false));
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(to_string(&ExpressionResult::Integer(42)), s("42"));
        assert_eq!(to_string(&ExpressionResult::Double(2.0)), s("2.0"));
        assert_eq!(to_string(&ExpressionResult::from_json(json!({"a": 1}))), s(r#"{"a":1}"#));
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(to_integer(&s("-17")).unwrap(), ExpressionResult::Integer(-17));
        assert_eq!(
            to_integer(&ExpressionResult::Integer(3)).unwrap(),
            ExpressionResult::Integer(3)
        );

        let error = to_integer(&s("abc")).unwrap_err();
        assert_eq!(error.to_string(), "Invalid argument provided for integer conversion");
        assert!(to_integer(&s("1.5")).is_err());
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(to_float(&s(" 2.5 ")).unwrap(), ExpressionResult::Double(2.5));
        assert_eq!(to_float(&ExpressionResult::Integer(2)).unwrap(), ExpressionResult::Double(2.0));
        assert!(to_float(&s("two")).is_err());
    }

    #[test]
    fn test_boolean_is_lenient() {
        assert_eq!(to_boolean(&s("TRUE")), b(true));
        assert_eq!(to_boolean(&s("false")), b(false));
        // Unparseable text reads as false instead of failing.
        assert_eq!(to_boolean(&s("yes")), b(false));
        assert_eq!(to_boolean(&b(true)), b(true));
    }

    #[test]
    fn test_structural_conversions() {
        let object = ExpressionResult::from_json(json!({"a": 1}));
        assert_eq!(to_object(&object).unwrap(), object);
        let error = to_object(&s("{}")).unwrap_err();
        assert_eq!(error.to_string(), "Argument cannot be converted to a JSON object");

        let array = ExpressionResult::from_json(json!([1, 2]));
        assert_eq!(to_array(&array).unwrap(), array);
        assert!(to_array(&object).is_err());
    }

    #[test]
    fn test_not() {
        assert_eq!(not(&b(true)).unwrap(), b(false));
        assert_eq!(not(&s("false")).unwrap(), b(true));
        assert_eq!(not(&ExpressionResult::Integer(0)).unwrap(), b(true));
        assert!(not(&ExpressionResult::from_json(json!([]))).is_err());
    }
}
