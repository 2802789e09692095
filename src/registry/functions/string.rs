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

//! String manipulation functions
//!
//! Offsets and lengths are counted in characters, not bytes.

use regex::Regex;
use serde_json::Value;

use crate::evaluator::{EvaluationError, EvaluationResult};
use crate::model::ExpressionResult;

/// length() - characters of a string or elements of an array
pub fn length(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    let count = match source {
        ExpressionResult::String(s) => s.chars().count(),
        ExpressionResult::Array(items) => items.len(),
        _ => return Err(EvaluationError::invalid_argument("length", &[])),
    };
    Ok(ExpressionResult::Integer(count as i64))
}

/// toLower() - lower-case a string or the text of a JSON primitive
pub fn to_lower(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    fold_case(source, "toLower", str::to_lowercase)
}

/// toUpper() - upper-case a string or the text of a JSON primitive
pub fn to_upper(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    fold_case(source, "toUpper", str::to_uppercase)
}

fn fold_case(
    source: &ExpressionResult,
    function: &'static str,
    fold: fn(&str) -> String,
) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::String(s) => Ok(ExpressionResult::String(fold(s))),
        primitive if primitive.is_json_primitive() => {
            Ok(ExpressionResult::String(fold(&primitive.as_string())))
        }
        _ => Err(EvaluationError::invalid_argument(function, &[])),
    }
}

/// trim() - strip leading and trailing whitespace and control characters
pub fn trim(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::String(s) => Ok(ExpressionResult::String(
            s.trim_matches(|c: char| c <= ' ').to_string(),
        )),
        _ => Err(EvaluationError::invalid_argument("trim", &[])),
    }
}

/// substring(source, start) - tail of the string from `start`
pub fn substring_from(
    source: &ExpressionResult,
    start: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    let (ExpressionResult::String(s), ExpressionResult::Integer(start_index)) = (source, start)
    else {
        return Err(EvaluationError::invalid_argument("substring", &[source, start]));
    };

    let length = s.chars().count();
    if *start_index < 0 || *start_index as u64 > length as u64 {
        return Err(EvaluationError::InvalidIndex {
            index: *start_index,
            length,
        });
    }
    Ok(ExpressionResult::String(
        s.chars().skip(*start_index as usize).collect(),
    ))
}

/// substring(source, start, end) - characters in `[start, end)`
pub fn substring_range(
    source: &ExpressionResult,
    start: &ExpressionResult,
    end: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    let (
        ExpressionResult::String(s),
        ExpressionResult::Integer(start_index),
        ExpressionResult::Integer(end_index),
    ) = (source, start, end)
    else {
        return Err(EvaluationError::invalid_argument(
            "substring",
            &[source, start, end],
        ));
    };

    let length = s.chars().count();
    if *end_index < 0
        || *start_index < 0
        || start_index > end_index
        || *end_index as u64 > length as u64
    {
        return Err(EvaluationError::InvalidRange {
            start: *start_index,
            end: *end_index,
            length,
        });
    }
    Ok(ExpressionResult::String(
        s.chars()
            .skip(*start_index as usize)
            .take((end_index - start_index) as usize)
            .collect(),
    ))
}

/// startsWith(source, prefix)
pub fn starts_with(
    source: &ExpressionResult,
    prefix: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    string_predicate("startsWith", source, prefix, |s, p| s.starts_with(p))
}

/// endsWith(source, suffix)
pub fn ends_with(
    source: &ExpressionResult,
    suffix: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    string_predicate("endsWith", source, suffix, |s, p| s.ends_with(p))
}

/// contains(source, fragment)
pub fn contains(
    source: &ExpressionResult,
    fragment: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    string_predicate("contains", source, fragment, |s, p| s.contains(p))
}

fn string_predicate(
    function: &'static str,
    source: &ExpressionResult,
    argument: &ExpressionResult,
    predicate: impl Fn(&str, &str) -> bool,
) -> EvaluationResult<ExpressionResult> {
    match (source, argument) {
        (ExpressionResult::String(s), ExpressionResult::String(a)) => {
            Ok(ExpressionResult::Boolean(predicate(s, a)))
        }
        _ => Err(EvaluationError::invalid_argument(function, &[source, argument])),
    }
}

/// split(source, pattern) - split around regular expression matches.
///
/// Trailing empty strings are dropped, a zero-width match at the very start
/// does not produce a leading empty string, and a source without any match comes
/// back as a one-element array.
pub fn split(
    source: &ExpressionResult,
    pattern: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    let (ExpressionResult::String(s), ExpressionResult::String(p)) = (source, pattern) else {
        return Err(EvaluationError::invalid_argument("split", &[source, pattern]));
    };

    let regex = Regex::new(p).map_err(|e| EvaluationError::InvalidPattern {
        pattern: p.clone(),
        reason: e.to_string(),
    })?;

    let mut parts: Vec<&str> = Vec::new();
    let mut last = 0;
    for found in regex.find_iter(s) {
        if found.end() == 0 {
            continue;
        }
        parts.push(&s[last..found.start()]);
        last = found.end();
    }

    if parts.is_empty() {
        return Ok(ExpressionResult::Array(vec![Value::String(s.clone())]));
    }

    parts.push(&s[last..]);
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }

    Ok(ExpressionResult::Array(
        parts
            .into_iter()
            .map(|part| Value::String(part.to_string()))
            .collect(),
    ))
}

/// replace(source, target, replacement) - literal replace-all
pub fn replace(
    source: &ExpressionResult,
    target: &ExpressionResult,
    replacement: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    match (source, target, replacement) {
        (
            ExpressionResult::String(s),
            ExpressionResult::String(t),
            ExpressionResult::String(r),
        ) => Ok(ExpressionResult::String(s.replace(t.as_str(), r))),
        _ => Err(EvaluationError::invalid_argument(
            "replace",
            &[source, target, replacement],
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn s(value: &str) -> ExpressionResult {
        ExpressionResult::from(value)
    }

    fn i(value: i64) -> ExpressionResult {
        ExpressionResult::Integer(value)
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(length(&s("héllo")).unwrap(), i(5));
        assert_eq!(length(&ExpressionResult::from_json(json!([1, 2, 3]))).unwrap(), i(3));
        assert!(length(&i(5)).is_err());
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(to_upper(&s("abc")).unwrap(), s("ABC"));
        assert_eq!(to_lower(&s("ÀBC")).unwrap(), s("àbc"));
        assert_eq!(to_upper(&ExpressionResult::Boolean(true)).unwrap(), s("TRUE"));
        assert_eq!(to_lower(&i(12)).unwrap(), s("12"));
        let error = to_lower(&ExpressionResult::from_json(json!({"a": 1}))).unwrap_err();
        assert_eq!(error.to_string(), "Invalid argument provided for toLower function");
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(&s("  \t padded \n")).unwrap(), s("padded"));
        assert!(trim(&i(1)).is_err());
    }

    #[test]
    fn test_substring_from() {
        assert_eq!(substring_from(&s("hello"), &i(1)).unwrap(), s("ello"));
        assert_eq!(substring_from(&s("hello"), &i(5)).unwrap(), s(""));
        assert_eq!(substring_from(&s("añb"), &i(1)).unwrap(), s("ñb"));

        let error = substring_from(&s("hello"), &i(10)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid index for substring: 10, source string length: 5"
        );
        assert!(substring_from(&s("hello"), &i(-1)).is_err());
        assert!(substring_from(&s("hello"), &s("1")).is_err());
    }

    #[test]
    fn test_substring_range() {
        assert_eq!(substring_range(&s("hello"), &i(1), &i(3)).unwrap(), s("el"));
        assert_eq!(substring_range(&s("hello"), &i(0), &i(5)).unwrap(), s("hello"));
        assert_eq!(substring_range(&s("hello"), &i(2), &i(2)).unwrap(), s(""));

        let error = substring_range(&s("hello"), &i(3), &i(1)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid substring indices: start=3, end=1, string length=5"
        );
        assert!(substring_range(&s("hello"), &i(0), &i(6)).is_err());
        assert!(substring_range(&s("hello"), &i(-1), &i(2)).is_err());
        assert!(substring_range(&s("hello"), &i(0), &i(-2)).is_err());
    }

    #[test]
    fn test_predicates() {
        assert_eq!(starts_with(&s("hello"), &s("he")).unwrap(), ExpressionResult::Boolean(true));
        assert_eq!(ends_with(&s("hello"), &s("he")).unwrap(), ExpressionResult::Boolean(false));
        assert_eq!(contains(&s("hello"), &s("ll")).unwrap(), ExpressionResult::Boolean(true));

        let error = contains(&s("hello"), &i(1)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid argument provided for contains function. source: hello, argument1: 1"
        );
    }

    #[test]
    fn test_split_keeps_inner_empty_parts() {
        assert_eq!(
            split(&s("a,b,,c"), &s(",")).unwrap(),
            ExpressionResult::from_json(json!(["a", "b", "", "c"]))
        );
    }

    #[test]
    fn test_split_drops_trailing_empty_parts() {
        assert_eq!(
            split(&s("a,b,,"), &s(",")).unwrap(),
            ExpressionResult::from_json(json!(["a", "b"]))
        );
        assert_eq!(split(&s(",,"), &s(",")).unwrap(), ExpressionResult::Array(vec![]));
    }

    #[test]
    fn test_split_edge_cases() {
        assert_eq!(
            split(&s("abc"), &s(",")).unwrap(),
            ExpressionResult::from_json(json!(["abc"]))
        );
        assert_eq!(split(&s(""), &s(",")).unwrap(), ExpressionResult::from_json(json!([""])));
        assert_eq!(
            split(&s(",a"), &s(",")).unwrap(),
            ExpressionResult::from_json(json!(["", "a"]))
        );
        assert_eq!(
            split(&s("abc"), &s("")).unwrap(),
            ExpressionResult::from_json(json!(["a", "b", "c"]))
        );
        assert_eq!(
            split(&s("a1b22c"), &s("[0-9]+")).unwrap(),
            ExpressionResult::from_json(json!(["a", "b", "c"]))
        );
    }

    #[test]
    fn test_split_rejects_bad_pattern() {
        let error = split(&s("abc"), &s("(")).unwrap_err();
        assert!(matches!(error, EvaluationError::InvalidPattern { .. }));

        // no lookaround or backreferences
        let error = split(&s("a1b2"), &s("(?=\\d)")).unwrap_err();
        assert!(matches!(error, EvaluationError::InvalidPattern { .. }));
    }

    #[test]
    fn test_replace_is_literal() {
        assert_eq!(replace(&s("a.b.c"), &s("."), &s("-")).unwrap(), s("a-b-c"));
        assert_eq!(replace(&s("aaa"), &s("a"), &s("bb")).unwrap(), s("bbbbbb"));
        assert!(replace(&s("a"), &s("a"), &i(1)).is_err());
    }
}
