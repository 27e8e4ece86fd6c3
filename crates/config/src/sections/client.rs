// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::fmt;

use odbg_oidc_flow::{
    error::ClientConfigError,
    types::{ClientAuthMethod, ClientConfig, ResponseType},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::Error as _};

use super::ConfigurationSection;
use crate::util::error_on_field;

/// The relying party being debugged
///
/// Keys are in camel case, like in the persisted form of a client.
// Keep the fields and defaults in sync with the persisted form of
// `ClientConfig`, a persisted client must load as a section unchanged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSection {
    /// Response types requested at the authorization endpoint. At least one
    /// is required, and each can only appear once.
    #[schemars(with = "Vec<crate::schema::ResponseType>")]
    pub response_types: Vec<ResponseType>,

    /// Scopes requested on top of `openid`, which is always requested
    #[serde(default)]
    pub scopes: Vec<String>,

    /// The client ID, as registered at the identity provider
    pub client_id: String,

    /// The URI the identity provider redirects back to
    #[schemars(url)]
    pub redirect_uri: String,

    /// The authorization endpoint
    #[schemars(url)]
    pub authorize_uri: String,

    /// The token endpoint
    #[schemars(url)]
    pub token_uri: String,

    /// The user info endpoint
    #[schemars(url)]
    pub userinfo_uri: String,

    /// The client secret. Not needed by public clients.
    #[serde(default)]
    pub client_secret: String,

    /// How the client authenticates at the token endpoint. Defaults to
    /// `post`.
    #[schemars(with = "crate::schema::ClientAuthMethod")]
    #[serde(default)]
    pub client_auth_method: ClientAuthMethod,
}

impl ClientSection {
    /// Build the client this section describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the section doesn't describe a valid client.
    pub fn client_config(&self) -> Result<ClientConfig, ClientConfigError> {
        let config = ClientConfig::new(
            self.response_types.clone(),
            self.client_id.clone(),
            self.redirect_uri.clone(),
            self.authorize_uri.clone(),
            self.token_uri.clone(),
            self.userinfo_uri.clone(),
        )?
        .with_scopes(self.scopes.clone())
        .with_client_secret(self.client_secret.clone())
        .with_client_auth_method(self.client_auth_method);

        Ok(config)
    }
}

impl From<&ClientConfig> for ClientSection {
    fn from(config: &ClientConfig) -> Self {
        Self {
            response_types: config.response_types().to_vec(),
            scopes: config.scopes().to_vec(),
            client_id: config.client_id().to_owned(),
            redirect_uri: config.redirect_uri().to_owned(),
            authorize_uri: config.authorize_uri().to_owned(),
            token_uri: config.token_uri().to_owned(),
            userinfo_uri: config.userinfo_uri().to_owned(),
            client_secret: config.client_secret().to_owned(),
            client_auth_method: config.client_auth_method(),
        }
    }
}

impl fmt::Debug for ClientSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSection")
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

impl ConfigurationSection for ClientSection {
    const PATH: Option<&'static str> = Some("client");

    fn validate(
        &self,
        figment: &figment::Figment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
        let Err(error) = self.client_config() else {
            return Ok(());
        };

        let field = match error {
            ClientConfigError::NoResponseType | ClientConfigError::DuplicateResponseType(_) => {
                "responseTypes"
            }
            ClientConfigError::EmptyField(field) => field,
        };

        Err(error_on_field(
            figment,
            "client",
            field,
            figment::Error::custom(error),
        )
        .into())
    }
}
