// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Requests for the [Authorization endpoint].
//!
//! [Authorization endpoint]: https://openid.net/specs/openid-connect-core-1_0.html#AuthorizationEndpoint

use std::fmt;

use base64ct::{Base64, Encoding};
use rand::Rng;
use url::Url;

use crate::{
    error::AuthorizationError,
    types::{ClientConfig, Prompt, ResponseType},
};

/// The OpenID Connect scope token, always requested.
pub const OPENID: &str = "openid";

/// The values correlating an authorization request with its callback.
///
/// They live for a single authorize → callback round trip.
#[derive(Clone, PartialEq, Eq)]
pub struct FlowSecrets {
    /// A unique identifier for the request, checked on callback.
    pub state: String,

    /// A string to mitigate replay attacks of the ID Token.
    pub nonce: String,
}

impl FlowSecrets {
    /// Generate a fresh pair of secrets.
    ///
    /// The nonce is made of 32 random bytes and the state of 8, both base64
    /// encoded.
    #[must_use]
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut nonce = [0u8; 32];
        rng.fill(&mut nonce);

        let mut state = [0u8; 8];
        rng.fill(&mut state);

        Self {
            state: Base64::encode_string(&state),
            nonce: Base64::encode_string(&nonce),
        }
    }
}

impl fmt::Debug for FlowSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowSecrets").finish_non_exhaustive()
    }
}

fn scope_parameter(config: &ClientConfig) -> String {
    let mut scope = OPENID.to_owned();
    for token in config.scopes().iter().filter(|token| *token != OPENID) {
        scope.push(' ');
        scope.push_str(token);
    }
    scope
}

fn join<I>(values: I) -> String
where
    I: IntoIterator<Item = &'static str>,
{
    values.into_iter().collect::<Vec<_>>().join(" ")
}

/// Build the URL for authenticating at the authorization endpoint.
///
/// # Arguments
///
/// * `config` - The client to authorize.
///
/// * `prompt` - The prompts to request, if any. The `prompt` parameter is
///   only sent when this is set.
///
/// * `rng` - A random number generator.
///
/// # Returns
///
/// A URL to be opened in a web browser where the end-user will be able to
/// authorize the client, and the fresh [`FlowSecrets`] to validate the
/// callback with. Any previously generated secrets must be discarded.
///
/// The query parameters are appended after the ones already present in the
/// authorization endpoint, in this order: `scope`, `response_type`,
/// `client_id`, `redirect_uri`, `state`, `nonce`, `prompt`.
///
/// # Errors
///
/// Returns an error if the authorization endpoint is not a valid URL.
pub fn build_authorization_url(
    config: &ClientConfig,
    prompt: Option<&[Prompt]>,
    rng: &mut impl Rng,
) -> Result<(Url, FlowSecrets), AuthorizationError> {
    let scope = scope_parameter(config);

    tracing::debug!(
        %scope,
        response_types = ?config.response_types(),
        "Authorizing..."
    );

    let mut authorization_url = Url::parse(config.authorize_uri())?;
    let secrets = FlowSecrets::generate(rng);

    {
        let mut query = authorization_url.query_pairs_mut();
        query
            .append_pair("scope", &scope)
            .append_pair(
                "response_type",
                &join(config.response_types().iter().copied().map(ResponseType::as_str)),
            )
            .append_pair("client_id", config.client_id())
            .append_pair("redirect_uri", config.redirect_uri())
            .append_pair("state", &secrets.state)
            .append_pair("nonce", &secrets.nonce);

        if let Some(prompt) = prompt {
            query.append_pair(
                "prompt",
                &join(prompt.iter().copied().map(Prompt::parameter_value)),
            );
        }
    }

    Ok((authorization_url, secrets))
}
