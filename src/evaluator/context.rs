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

//! Evaluation context capabilities
//!
//! The context is the per-message bundle of external resolvers an expression can
//! reach: the registry, the secure vault and the XPath engine bound to the message
//! in flight. The function library only calls through [`EvaluationContext`]; it
//! never stores the context beyond a single evaluation call.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::VAULT_LOOKUP_PREFIX;
use crate::model::ExpressionResult;

/// Failures reported by a context capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    /// Resource content could not be decoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// XPath expression could not be compiled or evaluated
    #[error("XPath error: {0}")]
    XPath(String),

    /// Secure vault failure
    #[error("Vault error: {0}")]
    Vault(String),
}

/// Capabilities an evaluation context supplies to the function library
pub trait EvaluationContext {
    /// Fetch the full content of a registry resource, `None` when absent
    fn registry_resource(&mut self, key: &str) -> Result<Option<String>, ContextError>;

    /// Fetch a named property of a registry resource, `None` when either is absent
    fn registry_resource_property(&mut self, key: &str, property: &str) -> Option<String>;

    /// Resolve a secret alias.
    ///
    /// A vault that cannot resolve an alias may echo a lookup marker instead of
    /// failing; callers must check for it.
    fn fetch_secret_value(&mut self, alias: &str) -> Result<String, ContextError>;

    /// Evaluate an XPath expression against the current message
    fn evaluate_xpath(&mut self, expression: &str) -> Result<ExpressionResult, ContextError>;
}

/// Registry resource held by [`InMemoryContext`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryResource {
    /// Resource content
    pub content: String,
    /// Resource properties
    #[serde(default)]
    pub properties: FxHashMap<String, String>,
}

/// Capability call recorded by [`InMemoryContext`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityCall {
    /// Registry resource lookup
    RegistryResource(String),
    /// Registry property lookup
    RegistryProperty(String, String),
    /// Secret lookup
    Secret(String),
    /// XPath evaluation
    XPath(String),
}

/// Context backed by in-memory maps.
///
/// Unknown secret aliases resolve to the vault lookup marker, the way a secure
/// vault without the alias behaves. XPath expressions answer from a table of
/// canned results; anything else is reported as malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryContext {
    registry: FxHashMap<String, RegistryResource>,
    secrets: FxHashMap<String, String>,
    xpath: FxHashMap<String, Value>,
    vault_lookup_prefix: String,
    #[serde(skip)]
    calls: Vec<CapabilityCall>,
}

impl Default for InMemoryContext {
    fn default() -> Self {
        Self {
            registry: FxHashMap::default(),
            secrets: FxHashMap::default(),
            xpath: FxHashMap::default(),
            vault_lookup_prefix: VAULT_LOOKUP_PREFIX.to_string(),
            calls: Vec::new(),
        }
    }
}

impl InMemoryContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker echoed for aliases the vault cannot resolve
    pub fn with_vault_lookup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vault_lookup_prefix = prefix.into();
        self
    }

    /// Load a context fixture from JSON.
    ///
    /// ```json
    /// {
    ///   "registry": { "conf:/cfg.xml": { "content": "<cfg/>", "properties": { "env": "prod" } } },
    ///   "secrets": { "db-password": "s3cret" },
    ///   "xpath": { "//order/id": "42" }
    /// }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add a registry resource
    pub fn with_resource(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.registry
            .entry(key.into())
            .or_default()
            .content = content.into();
        self
    }

    /// Add a property to a registry resource, creating an empty resource if needed
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.registry
            .entry(key.into())
            .or_default()
            .properties
            .insert(name.into(), value.into());
        self
    }

    /// Add a secret
    pub fn with_secret(mut self, alias: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(alias.into(), value.into());
        self
    }

    /// Add a canned XPath result
    pub fn with_xpath(mut self, expression: impl Into<String>, result: Value) -> Self {
        self.xpath.insert(expression.into(), result);
        self
    }

    /// Capability calls made so far, in order
    pub fn calls(&self) -> &[CapabilityCall] {
        &self.calls
    }
}

impl EvaluationContext for InMemoryContext {
    fn registry_resource(&mut self, key: &str) -> Result<Option<String>, ContextError> {
        self.calls.push(CapabilityCall::RegistryResource(key.to_string()));
        Ok(self.registry.get(key).map(|resource| resource.content.clone()))
    }

    fn registry_resource_property(&mut self, key: &str, property: &str) -> Option<String> {
        self.calls.push(CapabilityCall::RegistryProperty(
            key.to_string(),
            property.to_string(),
        ));
        self.registry
            .get(key)
            .and_then(|resource| resource.properties.get(property))
            .cloned()
    }

    fn fetch_secret_value(&mut self, alias: &str) -> Result<String, ContextError> {
        self.calls.push(CapabilityCall::Secret(alias.to_string()));
        Ok(self
            .secrets
            .get(alias)
            .cloned()
            .unwrap_or_else(|| format!("{}{alias})", self.vault_lookup_prefix)))
    }

    fn evaluate_xpath(&mut self, expression: &str) -> Result<ExpressionResult, ContextError> {
        self.calls.push(CapabilityCall::XPath(expression.to_string()));
        self.xpath
            .get(expression)
            .cloned()
            .map(ExpressionResult::from_json)
            .ok_or_else(|| ContextError::XPath(format!("cannot evaluate '{expression}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_lookups() {
        let mut context = InMemoryContext::new()
            .with_resource("conf:/app.xml", "<app/>")
            .with_property("conf:/app.xml", "env", "prod");

        assert_eq!(
            context.registry_resource("conf:/app.xml").unwrap(),
            Some("<app/>".to_string())
        );
        assert_eq!(context.registry_resource("conf:/missing").unwrap(), None);
        assert_eq!(
            context.registry_resource_property("conf:/app.xml", "env"),
            Some("prod".to_string())
        );
        assert_eq!(context.registry_resource_property("conf:/app.xml", "region"), None);
    }

    #[test]
    fn test_unknown_secret_echoes_lookup_marker() {
        let mut context = InMemoryContext::new().with_secret("known", "value");
        assert_eq!(context.fetch_secret_value("known").unwrap(), "value");
        assert_eq!(
            context.fetch_secret_value("unknown").unwrap(),
            "wso2:vault-lookup(unknown)"
        );
    }

    #[test]
    fn test_unknown_secret_uses_configured_marker() {
        let mut context = InMemoryContext::new().with_vault_lookup_prefix("vault:");
        assert_eq!(context.fetch_secret_value("missing").unwrap(), "vault:missing)");

        let mut context =
            InMemoryContext::from_json_str(r#"{"vault_lookup_prefix": "miss("}"#).unwrap();
        assert_eq!(context.fetch_secret_value("x").unwrap(), "miss(x)");
    }

    #[test]
    fn test_records_calls_in_order() {
        let mut context = InMemoryContext::new().with_xpath("//a", json!("x"));
        let _ = context.fetch_secret_value("s");
        let _ = context.evaluate_xpath("//a");
        let _ = context.registry_resource("r");
        assert_eq!(
            context.calls(),
            &[
                CapabilityCall::Secret("s".to_string()),
                CapabilityCall::XPath("//a".to_string()),
                CapabilityCall::RegistryResource("r".to_string()),
            ]
        );
    }

    #[test]
    fn test_fixture_from_json() {
        let mut context = InMemoryContext::from_json_str(
            r#"{
                "registry": {"gov:/k": {"content": "body", "properties": {"p": "v"}}},
                "secrets": {"alias": "pw"},
                "xpath": {"count(//item)": 3}
            }"#,
        )
        .unwrap();

        assert_eq!(context.registry_resource("gov:/k").unwrap().as_deref(), Some("body"));
        assert_eq!(context.fetch_secret_value("alias").unwrap(), "pw");
        assert_eq!(
            context.evaluate_xpath("count(//item)").unwrap(),
            ExpressionResult::Integer(3)
        );
        assert!(context.evaluate_xpath("//missing").is_err());
    }
}
