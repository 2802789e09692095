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

//! Engine configuration shared by function-call nodes

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Prefix a secure vault echoes back when an alias could not be resolved
pub const VAULT_LOOKUP_PREFIX: &str = "wso2:vault-lookup(";

/// What `round()` does when a double does not fit the integer range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Raise an evaluation error (NaN included)
    #[default]
    Fail,
    /// Clamp to the integer bounds, NaN becomes zero
    Saturate,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Content is not a valid configuration document
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for the predefined-function library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Marker that identifies an unresolved secret lookup
    pub vault_lookup_prefix: String,
    /// Overflow handling for `round()`
    pub round_overflow: OverflowPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vault_lookup_prefix: VAULT_LOOKUP_PREFIX.to_string(),
            round_overflow: OverflowPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Set the unresolved-secret marker
    pub fn with_vault_lookup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vault_lookup_prefix = prefix.into();
        self
    }

    /// Set the `round()` overflow policy
    pub fn with_round_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.round_overflow = policy;
        self
    }
}
