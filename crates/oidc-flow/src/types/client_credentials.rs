// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Types and methods for client credentials.

use std::fmt;

use base64ct::{Base64, Encoding};
use serde::Serialize;

use super::{ClientAuthMethod, ClientConfig};
use crate::error::{CredentialsError, TokenRequestError};

/// The authentication methods this library can apply to a request.
pub const CLIENT_SUPPORTED_AUTH_METHODS: &[ClientAuthMethod] = &[
    ClientAuthMethod::None,
    ClientAuthMethod::Basic,
    ClientAuthMethod::Post,
];

/// The credentials of a client, to authenticate it on endpoints that require
/// it.
#[derive(Clone)]
pub enum ClientCredentials {
    /// No client authentication is used.
    ///
    /// This is used if the client is public.
    None {
        /// The unique ID for the client.
        client_id: String,
    },

    /// The client authentication is sent via the Authorization HTTP header.
    ClientSecretBasic {
        /// The unique ID for the client.
        client_id: String,

        /// The secret of the client.
        client_secret: String,
    },

    /// The client authentication is sent with the body of the request.
    ClientSecretPost {
        /// The unique ID for the client.
        client_id: String,

        /// The secret of the client.
        client_secret: String,
    },
}

impl ClientCredentials {
    /// Get the credentials matching the authentication method of the given
    /// client.
    ///
    /// # Errors
    ///
    /// Returns an error if the authentication method of the client is not
    /// one of [`CLIENT_SUPPORTED_AUTH_METHODS`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, CredentialsError> {
        let client_id = config.client_id().to_owned();
        let client_secret = config.client_secret().to_owned();

        match config.client_auth_method() {
            ClientAuthMethod::None => Ok(Self::None { client_id }),
            ClientAuthMethod::Basic => Ok(Self::ClientSecretBasic {
                client_id,
                client_secret,
            }),
            ClientAuthMethod::Post => Ok(Self::ClientSecretPost {
                client_id,
                client_secret,
            }),
            method @ ClientAuthMethod::Jwt => Err(CredentialsError::UnsupportedMethod(method)),
        }
    }

    /// Get the client ID of these `ClientCredentials`.
    #[must_use]
    pub fn client_id(&self) -> &str {
        match self {
            ClientCredentials::None { client_id }
            | ClientCredentials::ClientSecretBasic { client_id, .. }
            | ClientCredentials::ClientSecretPost { client_id, .. } => client_id,
        }
    }

    /// Apply these [`ClientCredentials`] to the given form.
    ///
    /// Returns the value of the `Authorization` header to send, if any, and
    /// the URL-encoded body.
    pub(crate) fn authenticated_form<T: Serialize>(
        &self,
        form: &T,
    ) -> Result<(Option<String>, String), TokenRequestError> {
        let (authorization, body) = match self {
            ClientCredentials::None { client_id } => (
                None,
                serde_urlencoded::to_string(RequestWithClientCredentials {
                    body: form,
                    client_id: Some(client_id),
                    client_secret: None,
                })?,
            ),

            ClientCredentials::ClientSecretBasic {
                client_id,
                client_secret,
            } => {
                let username =
                    form_urlencoded::byte_serialize(client_id.as_bytes()).collect::<String>();
                let password =
                    form_urlencoded::byte_serialize(client_secret.as_bytes()).collect::<String>();
                let credentials = Base64::encode_string(format!("{username}:{password}").as_bytes());

                (
                    Some(format!("Basic {credentials}")),
                    serde_urlencoded::to_string(RequestWithClientCredentials {
                        body: form,
                        client_id: None,
                        client_secret: None,
                    })?,
                )
            }

            ClientCredentials::ClientSecretPost {
                client_id,
                client_secret,
            } => (
                None,
                serde_urlencoded::to_string(RequestWithClientCredentials {
                    body: form,
                    client_id: Some(client_id),
                    client_secret: Some(client_secret),
                })?,
            ),
        };

        Ok((authorization, body))
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None { client_id } => f
                .debug_struct("None")
                .field("client_id", client_id)
                .finish(),
            Self::ClientSecretBasic { client_id, .. } => f
                .debug_struct("ClientSecretBasic")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
            Self::ClientSecretPost { client_id, .. } => f
                .debug_struct("ClientSecretPost")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

/// A request with client credentials added to it.
#[derive(Clone, Serialize)]
struct RequestWithClientCredentials<'a, T> {
    #[serde(flatten)]
    body: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
}
