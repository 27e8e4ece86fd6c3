// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Normalized responses of the token endpoint.

use std::{convert::Infallible, fmt};

use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay, skip_serializing_none};

use super::TokenType;

/// An error code returned by the token endpoint.
///
/// Parsing one never fails: codes outside of the known vocabulary are kept
/// in [`TokenErrorCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
#[non_exhaustive]
pub enum TokenErrorCode {
    /// `invalid_request`
    InvalidRequest,

    /// `invalid_client`
    InvalidClient,

    /// `invalid_grant`
    InvalidGrant,

    /// `unauthorized_client`
    UnauthorizedClient,

    /// `unsupported_grant_type`
    UnsupportedGrantType,

    /// `invalid_scope`
    InvalidScope,

    /// `bad_state`
    ///
    /// Never sent by a server: hosts use it to report a session mismatch they
    /// detected themselves.
    BadState,

    /// An unknown value.
    Unknown(String),
}

impl TokenErrorCode {
    /// The code as sent by the token endpoint.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::UnsupportedGrantType => "unsupported_grant_type",
            Self::InvalidScope => "invalid_scope",
            Self::BadState => "bad_state",
            Self::Unknown(value) => value,
        }
    }

    /// A human-readable description of the code.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid Token Request",
            Self::InvalidClient => "Invalid Client",
            Self::InvalidGrant => "Invalid Grant",
            Self::UnauthorizedClient => "Unauthorized Client",
            Self::UnsupportedGrantType => "Unsupported Grant Type",
            Self::InvalidScope => "Invalid Scope",
            Self::BadState => "Incorrect Session State",
            Self::Unknown(_) => "Unknown Token Error",
        }
    }
}

impl fmt::Display for TokenErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenErrorCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid_request" => Ok(Self::InvalidRequest),
            "invalid_client" => Ok(Self::InvalidClient),
            "invalid_grant" => Ok(Self::InvalidGrant),
            "unauthorized_client" => Ok(Self::UnauthorizedClient),
            "unsupported_grant_type" => Ok(Self::UnsupportedGrantType),
            "invalid_scope" => Ok(Self::InvalidScope),
            "bad_state" => Ok(Self::BadState),
            value => Ok(Self::Unknown(value.to_owned())),
        }
    }
}

/// An error response from the token endpoint.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenErrorResponse {
    /// The error code.
    pub error: TokenErrorCode,

    /// A human-readable description of the error, as sent by the server.
    pub error_description: Option<String>,

    /// A URI of a web page with more information about the error.
    pub error_uri: Option<String>,
}

impl From<TokenErrorCode> for TokenErrorResponse {
    fn from(error: TokenErrorCode) -> Self {
        Self {
            error,
            error_description: None,
            error_uri: None,
        }
    }
}

/// A successful response from the token endpoint.
#[skip_serializing_none]
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenResponse {
    /// The access token to access the requested scope.
    pub access_token: String,

    /// The type of the access token.
    pub token_type: TokenType,

    /// The ID Token, not verified.
    pub id_token: String,

    /// The duration in seconds for which the access token is valid, as sent by
    /// the server. It can be negative.
    pub expires_in: Option<i64>,

    /// The token to refresh the access token when it expires.
    pub refresh_token: Option<String>,

    /// The duration in seconds for which the refresh token is valid.
    pub refresh_expires_in: Option<i64>,

    /// The scope of the access token, if different from the requested one.
    pub scope: Option<Vec<String>>,
}

impl fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// A normalized response from the token endpoint.
///
/// The two variants are mutually exclusive: a response carrying an `error`
/// is always an [`TokenResponse::Error`], whatever else it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenResponse {
    /// The token endpoint issued tokens.
    Success(AccessTokenResponse),

    /// The token endpoint rejected the request.
    Error(TokenErrorResponse),
}

impl TokenResponse {
    /// The error, if this is an error response.
    #[must_use]
    pub fn error(&self) -> Option<&TokenErrorResponse> {
        match self {
            Self::Error(error) => Some(error),
            Self::Success(_) => None,
        }
    }

    /// The tokens, if this is a successful response.
    #[must_use]
    pub fn success(&self) -> Option<&AccessTokenResponse> {
        match self {
            Self::Success(tokens) => Some(tokens),
            Self::Error(_) => None,
        }
    }
}

impl From<TokenErrorCode> for TokenResponse {
    fn from(error: TokenErrorCode) -> Self {
        Self::Error(error.into())
    }
}
