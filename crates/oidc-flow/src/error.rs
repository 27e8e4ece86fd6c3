// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The error types used in this crate.

use http::StatusCode;
use thiserror::Error;

use crate::types::{ClientAuthMethod, ResponseType, TokenType};

/// All possible errors when using this crate.
#[derive(Debug, Error)]
#[error(transparent)]
pub enum Error {
    /// The client configuration is invalid.
    ClientConfig(#[from] ClientConfigError),

    /// An error occurred building the authorization URL.
    Authorization(#[from] AuthorizationError),

    /// An error occurred building the token request.
    TokenRequest(#[from] TokenRequestError),

    /// The token endpoint response could not be normalized.
    TokenResponse(#[from] TokenResponseError),

    /// An error occurred exchanging an authorization code for an access token.
    TokenExchange(#[from] TokenExchangeError),

    /// An error occurred requesting user info.
    UserInfo(#[from] UserInfoError),
}

/// All possible errors when constructing a [`ClientConfig`].
///
/// [`ClientConfig`]: crate::types::ClientConfig
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientConfigError {
    /// No response type was requested.
    #[error("at least one response type must be requested")]
    NoResponseType,

    /// The same response type was requested more than once.
    #[error("response type {0} is requested more than once")]
    DuplicateResponseType(ResponseType),

    /// A required field is empty.
    #[error("the `{0}` field must not be empty")]
    EmptyField(&'static str),
}

/// All possible errors when building the authorization URL.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// The authorization endpoint is not a valid URL.
    #[error("invalid authorization endpoint")]
    InvalidUrl(#[from] url::ParseError),
}

/// All possible errors when building a request for the Token endpoint.
#[derive(Debug, Error)]
pub enum TokenRequestError {
    /// The client did not request the `code` response type, so there is no
    /// code to exchange.
    #[error("can't exchange a code for a client not requesting a code response type")]
    CodeNotRequested,

    /// The callback does not carry a `code` parameter.
    #[error("no code in the callback URI")]
    MissingCode,

    /// The callback URI could not be parsed.
    #[error("invalid callback URI")]
    InvalidCallback(#[source] url::ParseError),

    /// The token endpoint is not a valid URL.
    #[error("invalid token endpoint")]
    InvalidUrl(#[source] url::ParseError),

    /// Error while injecting the client credentials into the request.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// An error occurred serializing the request body.
    #[error(transparent)]
    UrlEncoded(#[from] serde_urlencoded::ser::Error),
}

/// All errors that can occur when adding client credentials to the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    /// Trying to use an unsupported authentication method.
    #[error("unsupported authentication method {0}")]
    UnsupportedMethod(ClientAuthMethod),
}

/// All possible errors when normalizing a Token endpoint response.
///
/// These are all caused by the server sending something unexpected, and are
/// never raised for a well-formed error response.
#[derive(Debug, Error)]
pub enum TokenResponseError {
    /// The body is not valid JSON, or a field has the wrong type.
    #[error("malformed token response")]
    Json(#[from] serde_json::Error),

    /// The body is valid JSON, but not an object.
    #[error("the token response is not a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("the token response is missing the `{0}` field")]
    MissingField(&'static str),

    /// A lifetime field is not a number.
    #[error("the `{0}` field of the token response is not a number")]
    InvalidField(&'static str),

    /// The `token_type` is not one we know about.
    #[error("unknown token type {0:?}")]
    UnknownTokenType(String),
}

/// All possible errors when exchanging an authorization code for an access
/// token.
#[derive(Debug, Error)]
pub enum TokenExchangeError {
    /// The HTTP client returned an error.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status and a body that is not a
    /// token error response.
    #[error("unexpected status code {status} from the token endpoint")]
    UnexpectedStatus {
        /// The status returned by the server.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The response body could not be normalized.
    #[error(transparent)]
    Response(#[from] TokenResponseError),
}

/// All possible errors when requesting user info.
#[derive(Debug, Error)]
pub enum UserInfoError {
    /// The access token type can't be used to authenticate the request.
    #[error("token type {0} is not supported for user info requests")]
    UnsupportedTokenType(TokenType),

    /// The server answered with an error status.
    #[error("user info request failed with status {status}")]
    Status {
        /// The status returned by the server.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The content-type header is missing from the response.
    #[error("missing response content-type")]
    MissingResponseContentType,

    /// The content-type is not valid.
    #[error("invalid response content-type")]
    InvalidResponseContentTypeValue,

    /// The content-type is not the one that was expected.
    #[error("unexpected response content-type {got:?}, expected {expected:?}")]
    UnexpectedResponseContentType {
        /// The expected content-type.
        expected: String,
        /// The returned content-type.
        got: String,
    },

    /// An error occurred sending the request.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
