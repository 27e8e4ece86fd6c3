// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! OAuth 2.0 and OpenID Connect types.

pub mod client_config;
pub mod client_credentials;
pub mod outcome;
pub mod token;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::{
    client_config::ClientConfig,
    outcome::{AuthErrorCode, AuthOutcome},
    token::{AccessTokenResponse, TokenErrorCode, TokenErrorResponse, TokenResponse},
};

/// A response type that can be requested at the authorization endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// `code`: an authorization code, to exchange at the token endpoint
    Code,

    /// `token`: an access token, returned directly
    Token,

    /// `id_token`: an ID Token, returned directly
    IdToken,
}

impl ResponseType {
    /// All the response types, in the order the callback checks them.
    pub const ALL: [Self; 3] = [Self::Code, Self::Token, Self::IdToken];

    /// The value of this item on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
            Self::IdToken => "id_token",
        }
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned when parsing an unknown response type.
#[derive(Debug, Clone, Error)]
#[error("Invalid response type {0:?}")]
pub struct InvalidResponseTypeError(String);

impl std::str::FromStr for ResponseType {
    type Err = InvalidResponseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "token" => Ok(Self::Token),
            "id_token" => Ok(Self::IdToken),
            s => Err(InvalidResponseTypeError(s.to_owned())),
        }
    }
}

/// Whether the authorization server should prompt the end-user for
/// reauthentication and consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// `none`: no interaction at all
    ///
    /// This is sent as an empty value in the `prompt` parameter.
    None,

    /// `login`: force a reauthentication
    Login,

    /// `consent`: ask for consent again
    Consent,

    /// `select_account`: let the end-user pick an account
    SelectAccount,
}

impl Prompt {
    /// The value of this item on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Login => "login",
            Self::Consent => "consent",
            Self::SelectAccount => "select_account",
        }
    }

    /// The value of this prompt in the `prompt` query parameter.
    #[must_use]
    pub fn parameter_value(self) -> &'static str {
        match self {
            Self::None => "",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned when parsing an unknown prompt.
#[derive(Debug, Clone, Error)]
#[error("Invalid prompt {0:?}")]
pub struct InvalidPromptError(String);

impl std::str::FromStr for Prompt {
    type Err = InvalidPromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "login" => Ok(Self::Login),
            "consent" => Ok(Self::Consent),
            "select_account" => Ok(Self::SelectAccount),
            s => Err(InvalidPromptError(s.to_owned())),
        }
    }
}

/// How the client authenticates at the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientAuthMethod {
    /// `basic`: `client_id` and `client_secret` used as basic authorization
    /// credentials
    Basic,

    /// `post`: `client_id` and `client_secret` sent in the request body
    #[default]
    Post,

    /// `jwt`: a signed `client_assertion` sent in the request body
    Jwt,

    /// `none`: public client, only the `client_id` is sent
    None,
}

impl ClientAuthMethod {
    /// The value of this item on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Post => "post",
            Self::Jwt => "jwt",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for ClientAuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned when parsing an unknown client authentication method.
#[derive(Debug, Clone, Error)]
#[error("Invalid client authentication method {0:?}")]
pub struct InvalidClientAuthMethodError(String);

impl std::str::FromStr for ClientAuthMethod {
    type Err = InvalidClientAuthMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "post" => Ok(Self::Post),
            "jwt" => Ok(Self::Jwt),
            "none" => Ok(Self::None),
            s => Err(InvalidClientAuthMethodError(s.to_owned())),
        }
    }
}

/// The type of an access token, which determines how it is presented to
/// resource servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// `bearer`: [RFC 6750](https://www.rfc-editor.org/rfc/rfc6750)
    Bearer,

    /// `mac`: the message authentication code token draft
    Mac,
}

impl TokenType {
    /// The value of this item on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::Mac => "mac",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned when parsing an unknown token type.
#[derive(Debug, Clone, Error)]
#[error("Invalid token type {0:?}")]
pub struct InvalidTokenTypeError(String);

impl InvalidTokenTypeError {
    /// The raw value that failed to parse.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::str::FromStr for TokenType {
    type Err = InvalidTokenTypeError;

    /// Parses a token type, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "mac" => Ok(Self::Mac),
            _ => Err(InvalidTokenTypeError(s.to_owned())),
        }
    }
}
