// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The description of the relying party being debugged.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ClientAuthMethod, ResponseType};
use crate::error::ClientConfigError;

/// An immutable description of an OpenID Connect relying party.
///
/// Its serialized form is what the host application persists between
/// sessions. The per-flow `state` and `nonce` are deliberately not part of
/// it, see [`FlowSecrets`].
///
/// [`FlowSecrets`]: crate::requests::authorization::FlowSecrets
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UncheckedClientConfig")]
pub struct ClientConfig {
    response_types: Vec<ResponseType>,
    scopes: Vec<String>,
    client_id: String,
    redirect_uri: String,
    authorize_uri: String,
    token_uri: String,
    userinfo_uri: String,
    client_secret: String,
    client_auth_method: ClientAuthMethod,
}

impl ClientConfig {
    /// Constructs a new `ClientConfig` with all the required fields.
    ///
    /// The client starts with no extra scope, an empty secret and the `post`
    /// authentication method.
    ///
    /// # Errors
    ///
    /// Returns an error if `response_types` is empty or contains duplicates,
    /// or if one of the string fields is empty.
    pub fn new(
        response_types: Vec<ResponseType>,
        client_id: String,
        redirect_uri: String,
        authorize_uri: String,
        token_uri: String,
        userinfo_uri: String,
    ) -> Result<Self, ClientConfigError> {
        UncheckedClientConfig {
            response_types,
            scopes: Vec::new(),
            client_id,
            redirect_uri,
            authorize_uri,
            token_uri,
            userinfo_uri,
            client_secret: String::new(),
            client_auth_method: ClientAuthMethod::default(),
        }
        .try_into()
    }

    /// Set the extra scopes requested by this client.
    ///
    /// `openid` is always requested and doesn't need to be part of this list.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Set the secret of this client.
    #[must_use]
    pub fn with_client_secret(mut self, client_secret: String) -> Self {
        self.client_secret = client_secret;
        self
    }

    /// Set how this client authenticates at the token endpoint.
    #[must_use]
    pub fn with_client_auth_method(mut self, client_auth_method: ClientAuthMethod) -> Self {
        self.client_auth_method = client_auth_method;
        self
    }

    /// The response types requested at the authorization endpoint, in
    /// request order.
    #[must_use]
    pub fn response_types(&self) -> &[ResponseType] {
        &self.response_types
    }

    /// Whether the given response type is requested.
    #[must_use]
    pub fn requests(&self, response_type: ResponseType) -> bool {
        self.response_types.contains(&response_type)
    }

    /// The extra scopes requested on top of `openid`.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// The ID obtained when registering the client.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The URI the identity provider redirects to after the authorization.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// The URI of the authorization endpoint.
    #[must_use]
    pub fn authorize_uri(&self) -> &str {
        &self.authorize_uri
    }

    /// The URI of the token endpoint.
    #[must_use]
    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// The URI of the user info endpoint.
    #[must_use]
    pub fn userinfo_uri(&self) -> &str {
        &self.userinfo_uri
    }

    /// The secret of the client, empty for public clients.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// How the client authenticates at the token endpoint.
    #[must_use]
    pub fn client_auth_method(&self) -> ClientAuthMethod {
        self.client_auth_method
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("response_types", &self.response_types)
            .field("scopes", &self.scopes)
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("authorize_uri", &self.authorize_uri)
            .field("token_uri", &self.token_uri)
            .field("userinfo_uri", &self.userinfo_uri)
            .field("client_auth_method", &self.client_auth_method)
            .finish_non_exhaustive()
    }
}

// Mirrored by the `client` configuration section, keep the defaults aligned.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedClientConfig {
    response_types: Vec<ResponseType>,
    #[serde(default)]
    scopes: Vec<String>,
    client_id: String,
    redirect_uri: String,
    authorize_uri: String,
    token_uri: String,
    userinfo_uri: String,
    #[serde(default)]
    client_secret: String,
    #[serde(default)]
    client_auth_method: ClientAuthMethod,
}

impl TryFrom<UncheckedClientConfig> for ClientConfig {
    type Error = ClientConfigError;

    fn try_from(value: UncheckedClientConfig) -> Result<Self, Self::Error> {
        if value.response_types.is_empty() {
            return Err(ClientConfigError::NoResponseType);
        }

        for (index, response_type) in value.response_types.iter().enumerate() {
            if value.response_types[..index].contains(response_type) {
                return Err(ClientConfigError::DuplicateResponseType(*response_type));
            }
        }

        for (name, field) in [
            ("clientId", &value.client_id),
            ("redirectUri", &value.redirect_uri),
            ("authorizeUri", &value.authorize_uri),
            ("tokenUri", &value.token_uri),
            ("userinfoUri", &value.userinfo_uri),
        ] {
            if field.is_empty() {
                return Err(ClientConfigError::EmptyField(name));
            }
        }

        Ok(Self {
            response_types: value.response_types,
            scopes: value.scopes,
            client_id: value.client_id,
            redirect_uri: value.redirect_uri,
            authorize_uri: value.authorize_uri,
            token_uri: value.token_uri,
            userinfo_uri: value.userinfo_uri,
            client_secret: value.client_secret,
            client_auth_method: value.client_auth_method,
        })
    }
}
