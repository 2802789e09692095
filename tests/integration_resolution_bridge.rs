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

//! Integration tests for registry, secret and XPath resolution

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use synapse_expr::evaluator::CapabilityCall;
use synapse_expr::*;

mod utils;
use utils::{UnavailableContext, call_in, fixture_context, lit};

#[test]
fn registry_resource_content() {
    let mut context = fixture_context();
    assert_eq!(
        call_in("registry", vec!["conf:/endpoints.xml".into()], &mut context).unwrap(),
        ExpressionResult::from("<endpoints/>")
    );
}

#[test]
fn registry_resource_not_found() {
    let error = call_in("registry", vec!["conf:/missing.xml".into()], &mut fixture_context())
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Could not find the registry resource: conf:/missing.xml"
    );
}

#[test]
fn registry_property_lookup() {
    let mut context = fixture_context();
    assert_eq!(
        call_in(
            "registry",
            vec!["conf:/endpoints.xml".into(), "env".into()],
            &mut context
        )
        .unwrap(),
        ExpressionResult::from("prod")
    );

    let error = call_in(
        "registry",
        vec!["conf:/endpoints.xml".into(), "region".into()],
        &mut context,
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Could not find the property: region in the registry resource: conf:/endpoints.xml"
    );
}

#[test]
fn registry_key_must_be_text() {
    let error = call_in("registry", vec![7.into()], &mut fixture_context()).unwrap_err();
    assert!(matches!(error, EvaluationError::InvalidArgument { function: "registry", .. }));
}

#[test]
fn registry_retrieval_failure_is_an_evaluation_error() {
    let error = call_in("registry", vec!["conf:/a.xml".into()], &mut UnavailableContext)
        .unwrap_err();
    assert_eq!(
        error,
        EvaluationError::RegistryAccess {
            key: "conf:/a.xml".to_string()
        }
    );
}

#[test]
fn secret_resolution() {
    let mut context = fixture_context();
    assert_eq!(
        call_in("secret", vec!["db-password".into()], &mut context).unwrap(),
        ExpressionResult::from("s3cret")
    );
    assert_eq!(context.calls(), &[CapabilityCall::Secret("db-password".to_string())]);
}

#[test]
fn unresolved_secret_marker_is_a_failure() {
    let error = call_in("secret", vec!["api-key".into()], &mut fixture_context()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Error fetching secret value for alias: api-key"
    );
}

#[test]
fn vault_failure_is_a_failure() {
    let error = call_in("secret", vec!["api-key".into()], &mut UnavailableContext).unwrap_err();
    assert_eq!(
        error,
        EvaluationError::SecretResolution {
            alias: "api-key".to_string()
        }
    );
}

#[test]
fn unknown_alias_fails_under_custom_vault_marker() {
    let config = EngineConfig::default().with_vault_lookup_prefix("vault:");
    let mut context = InMemoryContext::new().with_vault_lookup_prefix("vault:");

    let node = PredefinedFunctionNode::new("secret", vec![lit("missing")])
        .with_config(Arc::new(config));
    let error = node.evaluate(&mut context).unwrap_err();
    assert_eq!(
        error,
        EvaluationError::SecretResolution {
            alias: "missing".to_string()
        }
    );
}

#[test]
fn custom_vault_marker() {
    let config = Arc::new(
        EngineConfig::from_json_str(r#"{ "vault_lookup_prefix": "vault-miss:" }"#).unwrap(),
    );
    let mut context = InMemoryContext::new()
        .with_secret("a", "vault-miss:a")
        .with_secret("b", "wso2:vault-lookup(b)");

    let missing =
        PredefinedFunctionNode::new("secret", vec![lit("a")]).with_config(Arc::clone(&config));
    assert!(missing.evaluate(&mut context).is_err());

    // Only the configured marker counts as unresolved.
    let literal = PredefinedFunctionNode::new("secret", vec![lit("b")]).with_config(config);
    assert_eq!(
        literal.evaluate(&mut context).unwrap(),
        ExpressionResult::from("wso2:vault-lookup(b)")
    );
}

#[test]
fn xpath_results() {
    let mut context = fixture_context();
    assert_eq!(
        call_in("xpath", vec!["//order/id".into()], &mut context).unwrap(),
        ExpressionResult::Integer(42)
    );
    assert_eq!(
        call_in("xpath", vec!["//order/items".into()], &mut context)
            .unwrap()
            .as_json(),
        json!(["a", "b"])
    );
}

#[test]
fn malformed_xpath() {
    let error = call_in("xpath", vec!["//order[".into()], &mut UnavailableContext).unwrap_err();
    assert_eq!(error.to_string(), "Invalid XPATH expression : //order[");
}

#[test]
fn exists_over_failed_lookups() {
    let mut context = fixture_context();
    let lookup = PredefinedFunctionNode::new("registry", vec![lit("conf:/missing.xml")]);
    let node = PredefinedFunctionNode::new("exists", vec![Box::new(lookup) as ExpressionNodeRef]);
    assert_eq!(
        node.evaluate(&mut context).unwrap(),
        ExpressionResult::Boolean(false)
    );
    assert_eq!(
        context.calls(),
        &[CapabilityCall::RegistryResource("conf:/missing.xml".to_string())]
    );
}
