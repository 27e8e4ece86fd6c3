// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The live state of a login in progress.

use rand::Rng;
use url::Url;

use crate::{
    error::{AuthorizationError, TokenRequestError},
    requests::{
        authorization::{FlowSecrets, build_authorization_url},
        callback::validate_auth_response,
        token::{TokenRequest, build_token_request},
    },
    types::{AuthOutcome, ClientConfig, Prompt},
};

/// A login flow for a single client.
///
/// It holds the secrets of the last authorization request, so that only the
/// callback of that request is accepted. Beginning a new authorization
/// replaces them.
#[derive(Debug, Clone)]
pub struct Flow<'a> {
    config: &'a ClientConfig,
    secrets: Option<FlowSecrets>,
}

impl<'a> Flow<'a> {
    /// Create a flow for the given client, with no authorization in progress.
    #[must_use]
    pub fn new(config: &'a ClientConfig) -> Self {
        Self {
            config,
            secrets: None,
        }
    }

    /// The client this flow runs for.
    #[must_use]
    pub fn config(&self) -> &'a ClientConfig {
        self.config
    }

    /// The secrets of the authorization in progress, if any.
    #[must_use]
    pub fn secrets(&self) -> Option<&FlowSecrets> {
        self.secrets.as_ref()
    }

    /// Start a new authorization, discarding the previous one.
    ///
    /// See [`build_authorization_url`].
    ///
    /// # Errors
    ///
    /// Returns an error if the authorization endpoint is not a valid URL, in
    /// which case the previous secrets are kept.
    pub fn begin_authorization(
        &mut self,
        prompt: Option<&[Prompt]>,
        rng: &mut impl Rng,
    ) -> Result<Url, AuthorizationError> {
        let (url, secrets) = build_authorization_url(self.config, prompt, rng)?;
        self.secrets = Some(secrets);
        Ok(url)
    }

    /// Validate the callback of the authorization in progress.
    ///
    /// See [`validate_auth_response`].
    #[must_use]
    pub fn validate(&self, callback_uri: &str) -> Vec<AuthOutcome> {
        validate_auth_response(self.config, self.secrets.as_ref(), callback_uri)
    }

    /// Build the token request for the code in the callback.
    ///
    /// See [`build_token_request`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request can't be built.
    pub fn token_request(&self, callback_uri: &str) -> Result<TokenRequest, TokenRequestError> {
        build_token_request(self.config, callback_uri)
    }
}
