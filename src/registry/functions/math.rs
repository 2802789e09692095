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

//! Math functions
//!
//! Integers stay integers wherever the operation allows it; doubles follow IEEE-754.

use crate::config::OverflowPolicy;
use crate::evaluator::{EvaluationError, EvaluationResult};
use crate::model::ExpressionResult;

/// abs() - absolute value, keeping the numeric type
pub fn abs(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Integer(i) => i
            .checked_abs()
            .map(ExpressionResult::Integer)
            .ok_or_else(|| EvaluationError::Overflow {
                function: "abs",
                value: i.to_string(),
            }),
        ExpressionResult::Double(d) => Ok(ExpressionResult::Double(d.abs())),
        _ => Err(EvaluationError::invalid_argument("abs", &[])),
    }
}

/// ceil() - integers pass through, doubles round toward positive infinity
pub fn ceil(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Integer(_) => Ok(source.clone()),
        ExpressionResult::Double(d) => Ok(ExpressionResult::Double(d.ceil())),
        _ => Err(EvaluationError::invalid_argument("ceil", &[])),
    }
}

/// floor() - integers pass through, doubles round toward negative infinity
pub fn floor(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Integer(_) => Ok(source.clone()),
        ExpressionResult::Double(d) => Ok(ExpressionResult::Double(d.floor())),
        _ => Err(EvaluationError::invalid_argument("floor", &[])),
    }
}

/// round() - nearest integer, ties toward positive infinity.
///
/// Doubles outside the `i64` range, and NaN, are handled by `policy`.
pub fn round(
    source: &ExpressionResult,
    policy: OverflowPolicy,
) -> EvaluationResult<ExpressionResult> {
    match source {
        ExpressionResult::Integer(_) => Ok(source.clone()),
        ExpressionResult::Double(d) => round_half_up(*d, policy).map(ExpressionResult::Integer),
        _ => Err(EvaluationError::invalid_argument("round", &[])),
    }
}

fn round_half_up(value: f64, policy: OverflowPolicy) -> EvaluationResult<i64> {
    let floored = value.floor();
    let rounded = if value - floored >= 0.5 {
        floored + 1.0
    } else {
        floored
    };

    // 2^63 is exactly representable, i64::MAX is not.
    let in_range = rounded >= i64::MIN as f64 && rounded < i64::MAX as f64;
    if in_range {
        return Ok(rounded as i64);
    }

    match policy {
        OverflowPolicy::Fail => Err(EvaluationError::Overflow {
            function: "round",
            value: ExpressionResult::Double(value).as_string(),
        }),
        OverflowPolicy::Saturate => Ok(rounded as i64),
    }
}

/// sqrt() - square root as a double
pub fn sqrt(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    source
        .as_double()
        .map(|d| ExpressionResult::Double(d.sqrt()))
        .ok_or_else(|| EvaluationError::invalid_argument("sqrt", &[]))
}

/// pow(source, exponent) - both operands promoted to double
pub fn pow(
    source: &ExpressionResult,
    exponent: &ExpressionResult,
) -> EvaluationResult<ExpressionResult> {
    match (source.as_double(), exponent.as_double()) {
        (Some(base), Some(power)) => Ok(ExpressionResult::Double(base.powf(power))),
        _ => Err(EvaluationError::invalid_argument("pow", &[source, exponent])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: f64) -> ExpressionResult {
        ExpressionResult::Double(value)
    }

    fn i(value: i64) -> ExpressionResult {
        ExpressionResult::Integer(value)
    }

    #[test]
    fn test_abs_preserves_type() {
        assert_eq!(abs(&i(-4)).unwrap(), i(4));
        assert_eq!(abs(&d(-2.5)).unwrap(), d(2.5));
        assert!(abs(&ExpressionResult::from("-1")).is_err());
    }

    #[test]
    fn test_abs_overflow() {
        let error = abs(&i(i64::MIN)).unwrap_err();
        assert!(matches!(error, EvaluationError::Overflow { function: "abs", .. }));
    }

    #[test]
    fn test_ceil_floor() {
        assert_eq!(ceil(&d(1.2)).unwrap(), d(2.0));
        assert_eq!(floor(&d(-1.2)).unwrap(), d(-2.0));
        assert_eq!(ceil(&i(7)).unwrap(), i(7));
        assert_eq!(floor(&i(7)).unwrap(), i(7));
        assert!(floor(&ExpressionResult::Boolean(true)).is_err());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round(&d(2.5), OverflowPolicy::Fail).unwrap(), i(3));
        assert_eq!(round(&d(-2.5), OverflowPolicy::Fail).unwrap(), i(-2));
        assert_eq!(round(&d(2.4), OverflowPolicy::Fail).unwrap(), i(2));
        assert_eq!(round(&d(-2.6), OverflowPolicy::Fail).unwrap(), i(-3));
        assert_eq!(round(&i(9), OverflowPolicy::Fail).unwrap(), i(9));
    }

    #[test]
    fn test_round_overflow_policies() {
        let error = round(&d(1e300), OverflowPolicy::Fail).unwrap_err();
        assert!(matches!(error, EvaluationError::Overflow { function: "round", .. }));
        assert!(round(&d(f64::NAN), OverflowPolicy::Fail).is_err());

        assert_eq!(round(&d(1e300), OverflowPolicy::Saturate).unwrap(), i(i64::MAX));
        assert_eq!(round(&d(-1e300), OverflowPolicy::Saturate).unwrap(), i(i64::MIN));
        assert_eq!(round(&d(f64::NAN), OverflowPolicy::Saturate).unwrap(), i(0));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(&i(16)).unwrap(), d(4.0));
        let ExpressionResult::Double(negative) = sqrt(&d(-1.0)).unwrap() else {
            panic!("sqrt must return a double");
        };
        assert!(negative.is_nan());
        assert!(sqrt(&ExpressionResult::from("4")).is_err());
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(&i(2), &i(10)).unwrap(), d(1024.0));
        assert_eq!(pow(&d(4.0), &d(0.5)).unwrap(), d(2.0));

        let error = pow(&ExpressionResult::from("x"), &i(2)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid argument provided for pow function. source: x, argument1: 2"
        );
    }
}
