// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::time::Duration;

use odbg_http::{DEFAULT_USER_AGENT, HttpClientOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::Error as _};
use serde_with::serde_as;

use super::ConfigurationSection;
use crate::util::error_on_field;

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn is_default_timeout(value: &Duration) -> bool {
    *value == default_timeout()
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(30)
}

fn is_default_connect_timeout(value: &Duration) -> bool {
    *value == default_connect_timeout()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

fn is_default_user_agent(value: &str) -> bool {
    value == DEFAULT_USER_AGENT
}

/// Configuration of the HTTP client used to talk to the identity provider
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HttpClientConfig {
    /// Total timeout of a request in seconds. Defaults to 60 seconds.
    #[schemars(with = "u64", range(min = 1))]
    #[serde(default = "default_timeout", skip_serializing_if = "is_default_timeout")]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub timeout: Duration,

    /// Timeout for establishing a connection in seconds. Defaults to 30
    /// seconds.
    #[schemars(with = "u64", range(min = 1))]
    #[serde(
        default = "default_connect_timeout",
        skip_serializing_if = "is_default_connect_timeout"
    )]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub connect_timeout: Duration,

    /// The `User-Agent` header sent with every request
    #[serde(
        default = "default_user_agent",
        skip_serializing_if = "is_default_user_agent"
    )]
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    pub(crate) fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The options to build the HTTP client with.
    #[must_use]
    pub fn options(&self) -> HttpClientOptions {
        HttpClientOptions {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl ConfigurationSection for HttpClientConfig {
    const PATH: Option<&'static str> = Some("http");

    fn validate(
        &self,
        figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        let invalid = |field: &'static str, message: &'static str| {
            error_on_field(figment, "http", field, figment::Error::custom(message))
        };

        if self.timeout.is_zero() {
            return Err(invalid("timeout", "the timeout must be at least one second").into());
        }

        if self.connect_timeout.is_zero() {
            return Err(invalid(
                "connect_timeout",
                "the connect timeout must be at least one second",
            )
            .into());
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "the user agent must not be empty").into());
        }

        Ok(())
    }
}
