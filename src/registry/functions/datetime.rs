//! Clock functions

use chrono::Utc;

use crate::model::ExpressionResult;

/// now() - current time in epoch milliseconds
pub fn now() -> ExpressionResult {
    ExpressionResult::Integer(Utc::now().timestamp_millis())
}
