// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use camino::Utf8Path;
use odbg_oidc_flow::types::ClientConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod client;
mod http;

pub use self::{client::ClientSection, http::HttpClientConfig};
use crate::util::ConfigurationSection;

/// Application configuration root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RootConfig {
    /// The relying party being debugged
    pub client: ClientSection,

    /// Configuration of the HTTP client
    #[serde(default, skip_serializing_if = "HttpClientConfig::is_default")]
    pub http: HttpClientConfig,
}

impl ConfigurationSection for RootConfig {
    fn validate(
        &self,
        figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        self.client.validate(figment)?;
        self.http.validate(figment)?;

        Ok(())
    }
}

impl RootConfig {
    /// A configuration for the given client, with default HTTP settings
    #[must_use]
    pub fn new(client: &ClientConfig) -> Self {
        Self {
            client: client.into(),
            http: HttpClientConfig::default(),
        }
    }

    /// Load and validate the configuration from the given files and the
    /// environment
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is missing, malformed or invalid
    pub fn load<P: AsRef<Utf8Path>>(
        files: &[P],
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync + 'static>> {
        Self::extract(&crate::figment(files))
    }

    /// Serialize the configuration to YAML, in a form [`RootConfig::load`]
    /// accepts back
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration could not be serialized
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
