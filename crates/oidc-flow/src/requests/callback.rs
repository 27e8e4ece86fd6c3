// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Validation of the [authorization response] the identity provider redirects
//! back with.
//!
//! [authorization response]: https://openid.net/specs/openid-connect-core-1_0.html#AuthResponse

use percent_encoding::percent_decode_str;
use url::Url;

use super::authorization::FlowSecrets;
use crate::types::{AuthOutcome, ClientConfig, ResponseType};

/// The parameters of an authorization response, as found in the query of the
/// callback URI.
///
/// Only the first occurrence of each parameter is considered. Values are
/// percent-decoded, but a `+` is kept as is and not read as a space.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuthorizationResponse {
    /// The `state` parameter.
    pub state: Option<String>,

    /// The `code` parameter.
    pub code: Option<String>,

    /// The `token` parameter.
    pub token: Option<String>,

    /// The `id_token` parameter.
    pub id_token: Option<String>,

    /// The `error` parameter.
    pub error: Option<String>,

    /// The `error_description` parameter.
    pub error_description: Option<String>,

    /// The `error_uri` parameter.
    pub error_uri: Option<String>,
}

impl AuthorizationResponse {
    /// Extract the authorization response from the query of the given URL.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let mut response = Self::default();
        let Some(query) = url.query() else {
            return response;
        };

        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = percent_decode_str(key).decode_utf8_lossy();

            let slot = match &*key {
                "state" => &mut response.state,
                "code" => &mut response.code,
                "token" => &mut response.token,
                "id_token" => &mut response.id_token,
                "error" => &mut response.error,
                "error_description" => &mut response.error_description,
                "error_uri" => &mut response.error_uri,
                _ => continue,
            };

            if slot.is_none() {
                *slot = Some(percent_decode_str(value).decode_utf8_lossy().into_owned());
            }
        }

        response
    }

    /// Parse the callback URI and extract the authorization response from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the callback is not a valid URI.
    pub fn from_callback(callback_uri: &str) -> Result<Self, url::ParseError> {
        Ok(Self::from_url(&Url::parse(callback_uri)?))
    }

    /// Whether the parameter corresponding to the given response type is
    /// present.
    #[must_use]
    pub fn has(&self, response_type: ResponseType) -> bool {
        match response_type {
            ResponseType::Code => self.code.is_some(),
            ResponseType::Token => self.token.is_some(),
            ResponseType::IdToken => self.id_token.is_some(),
        }
    }
}

/// Validate an authorization response against the live flow.
///
/// The checks run in order, the first two being exclusive:
///
/// 1. the `state` must be exactly the one of `secrets`, else the result is
///    `[invalid_state]`;
/// 2. an `error` sent by the identity provider is returned on its own;
/// 3. for each requested response type, in the fixed `code`, `token`,
///    `id_token` order, whether its parameter is present.
///
/// A missing flow (`secrets` is `None`) or a callback which is not a valid
/// URI can't match any state.
#[must_use]
pub fn validate_auth_response(
    config: &ClientConfig,
    secrets: Option<&FlowSecrets>,
    callback_uri: &str,
) -> Vec<AuthOutcome> {
    let Ok(response) = AuthorizationResponse::from_callback(callback_uri) else {
        tracing::debug!("Callback is not a valid URI");
        return vec![AuthOutcome::InvalidState];
    };

    let Some(secrets) = secrets else {
        tracing::debug!("No authorization flow in progress");
        return vec![AuthOutcome::InvalidState];
    };

    if response.state.as_deref() != Some(secrets.state.as_str()) {
        tracing::debug!("State mismatch");
        return vec![AuthOutcome::InvalidState];
    }

    if let Some(error) = response.error.as_deref() {
        tracing::debug!(
            %error,
            error_description = response.error_description.as_deref(),
            "Identity provider returned an error"
        );
        return vec![AuthOutcome::from_error_code(error)];
    }

    let outcomes: Vec<_> = ResponseType::ALL
        .into_iter()
        .filter(|response_type| config.requests(*response_type))
        .map(|response_type| {
            AuthOutcome::for_response_type(response_type, response.has(response_type))
        })
        .collect();

    tracing::debug!(?outcomes, "Validated authorization response");

    outcomes
}
