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

//! Base64 and URL encoding functions

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{self, GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use percent_encoding::percent_decode_str;
use url::form_urlencoded;

use super::charset::Charset;
use crate::evaluator::{EvaluationError, EvaluationResult};
use crate::model::ExpressionResult;

/// Standard alphabet, padding optional on input
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// base64Encode(source[, charset])
pub fn base64_encode(
    source: &ExpressionResult,
    charset: Option<&ExpressionResult>,
) -> EvaluationResult<ExpressionResult> {
    let bytes = source_bytes("base64Encode", source, charset)?;
    Ok(ExpressionResult::String(general_purpose::STANDARD.encode(bytes)))
}

/// base64Decode(source) - decoded bytes read as UTF-8
pub fn base64_decode(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    let ExpressionResult::String(text) = source else {
        return Err(EvaluationError::invalid_argument("base64Decode", &[]));
    };

    let bytes = LENIENT_STANDARD
        .decode(text)
        .map_err(|e| EvaluationError::InvalidBase64 {
            reason: e.to_string(),
        })?;
    Ok(ExpressionResult::String(
        String::from_utf8_lossy(&bytes).into_owned(),
    ))
}

/// urlEncode(source[, charset]) - `application/x-www-form-urlencoded` form
pub fn url_encode(
    source: &ExpressionResult,
    charset: Option<&ExpressionResult>,
) -> EvaluationResult<ExpressionResult> {
    let bytes = source_bytes("urlEncode", source, charset)?;
    Ok(ExpressionResult::String(
        form_urlencoded::byte_serialize(&bytes).collect(),
    ))
}

/// urlDecode(source) - `+` reads as a space, escapes decode as UTF-8
pub fn url_decode(source: &ExpressionResult) -> EvaluationResult<ExpressionResult> {
    let ExpressionResult::String(text) = source else {
        return Err(EvaluationError::invalid_argument("urlDecode", &[]));
    };

    let spaced = text.replace('+', " ");
    Ok(ExpressionResult::String(
        percent_decode_str(&spaced).decode_utf8_lossy().into_owned(),
    ))
}

fn source_bytes(
    function: &'static str,
    source: &ExpressionResult,
    charset: Option<&ExpressionResult>,
) -> EvaluationResult<Vec<u8>> {
    let ExpressionResult::String(text) = source else {
        let operands: Vec<&ExpressionResult> = std::iter::once(source).chain(charset).collect();
        return Err(EvaluationError::invalid_argument(function, &operands));
    };

    match charset {
        None => Ok(text.as_bytes().to_vec()),
        Some(ExpressionResult::String(name)) => Ok(Charset::resolve(name, function)?.encode(text)),
        Some(other) => Err(EvaluationError::invalid_argument(function, &[source, other])),
    }
}
