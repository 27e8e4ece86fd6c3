// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Requests for the [Token endpoint].
//!
//! [Token endpoint]: https://openid.net/specs/openid-connect-core-1_0.html#TokenEndpoint

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use odbg_http::RequestBuilderExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::callback::AuthorizationResponse;
use crate::{
    error::{TokenExchangeError, TokenRequestError, TokenResponseError},
    types::{
        AccessTokenResponse, ClientConfig, InvalidTokenTypeError, ResponseType, TokenErrorCode,
        TokenErrorResponse, TokenResponse, TokenType, client_credentials::ClientCredentials,
    },
};

/// The content type of the body of a [`TokenRequest`].
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// A request to the token endpoint, ready to be sent by any HTTP client.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
    /// The URL to `POST` the request to.
    pub token_endpoint: Url,

    /// The value of the `Authorization` header, if the client authenticates
    /// with it.
    pub authorization: Option<String>,

    /// The URL-encoded body of the request, see [`FORM_CONTENT_TYPE`].
    pub body: String,
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("token_endpoint", &self.token_endpoint.as_str())
            .field("authorization", &self.authorization.as_ref().map(|_| "..."))
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct AuthorizationCodeGrant<'a> {
    grant_type: &'static str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// Build the request exchanging the authorization code found in the callback
/// for an access token.
///
/// The body contains `grant_type=authorization_code`, the `code` and the
/// `redirect_uri`, followed by the client credentials as required by the
/// authentication method of the client.
///
/// # Errors
///
/// Returns an error if the client doesn't request the `code` response type,
/// if the callback has no `code`, if one of the URIs is invalid or if the
/// authentication method of the client is not supported.
pub fn build_token_request(
    config: &ClientConfig,
    callback_uri: &str,
) -> Result<TokenRequest, TokenRequestError> {
    if !config.requests(ResponseType::Code) {
        return Err(TokenRequestError::CodeNotRequested);
    }

    let response = AuthorizationResponse::from_callback(callback_uri)
        .map_err(TokenRequestError::InvalidCallback)?;
    let code = response.code.ok_or(TokenRequestError::MissingCode)?;

    let token_endpoint =
        Url::parse(config.token_uri()).map_err(TokenRequestError::InvalidUrl)?;

    let credentials = ClientCredentials::from_config(config)?;
    let (authorization, body) = credentials.authenticated_form(&AuthorizationCodeGrant {
        grant_type: "authorization_code",
        code: &code,
        redirect_uri: config.redirect_uri(),
    })?;

    Ok(TokenRequest {
        token_endpoint,
        authorization,
        body,
    })
}

#[derive(Deserialize)]
struct RawErrorResponse {
    error: String,
    error_description: Option<String>,
    error_uri: Option<String>,
}

#[derive(Deserialize)]
struct RawAccessTokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    id_token: Option<String>,
    expires_in: Option<Seconds>,
    refresh_token: Option<String>,
    refresh_expires_in: Option<Seconds>,
    scope: Option<String>,
}

/// A lifetime as sent by the token endpoint: an integer, a float or a numeric
/// string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Integer(i64),
    Float(f64),
    String(String),
}

impl Seconds {
    /// Fractions are truncated.
    #[allow(clippy::cast_possible_truncation)]
    fn into_seconds(self, field: &'static str) -> Result<i64, TokenResponseError> {
        let seconds = match self {
            Self::Integer(seconds) => return Ok(seconds),
            Self::Float(seconds) => seconds,
            Self::String(seconds) => {
                let seconds = seconds.trim();
                if let Ok(seconds) = seconds.parse::<i64>() {
                    return Ok(seconds);
                }

                seconds
                    .parse::<f64>()
                    .map_err(|_| TokenResponseError::InvalidField(field))?
            }
        };

        if seconds.is_finite() {
            Ok(seconds as i64)
        } else {
            Err(TokenResponseError::InvalidField(field))
        }
    }
}

impl TokenResponse {
    /// Normalize a JSON value returned by the token endpoint.
    ///
    /// If the object has an `error` field, only the error fields are looked
    /// at.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object, if a required field is
    /// missing or has the wrong type, or if the token type is unknown.
    pub fn from_json(value: Value) -> Result<Self, TokenResponseError> {
        let Value::Object(object) = value else {
            return Err(TokenResponseError::NotAnObject);
        };

        if object.contains_key("error") {
            let raw: RawErrorResponse = serde_json::from_value(Value::Object(object))?;
            let error: TokenErrorCode = match raw.error.parse() {
                Ok(error) => error,
                Err(infallible) => match infallible {},
            };

            return Ok(Self::Error(TokenErrorResponse {
                error,
                error_description: raw.error_description,
                error_uri: raw.error_uri,
            }));
        }

        let raw: RawAccessTokenResponse = serde_json::from_value(Value::Object(object))?;

        let access_token = raw
            .access_token
            .ok_or(TokenResponseError::MissingField("access_token"))?;
        let token_type = raw
            .token_type
            .ok_or(TokenResponseError::MissingField("token_type"))?;
        let id_token = raw
            .id_token
            .ok_or(TokenResponseError::MissingField("id_token"))?;

        let token_type: TokenType = token_type
            .parse()
            .map_err(|e: InvalidTokenTypeError| TokenResponseError::UnknownTokenType(e.into_inner()))?;

        let expires_in = raw
            .expires_in
            .map(|seconds| seconds.into_seconds("expires_in"))
            .transpose()?;
        let refresh_expires_in = raw
            .refresh_expires_in
            .map(|seconds| seconds.into_seconds("refresh_expires_in"))
            .transpose()?;

        let scope = raw
            .scope
            .map(|scope| scope.split(' ').map(ToOwned::to_owned).collect());

        Ok(Self::Success(AccessTokenResponse {
            access_token,
            token_type,
            id_token,
            expires_in,
            refresh_token: raw.refresh_token,
            refresh_expires_in,
            scope,
        }))
    }
}

/// Normalize the raw body of a token endpoint response.
///
/// # Errors
///
/// Returns an error if the body is not a JSON object or doesn't have the
/// shape of a token response, see [`TokenResponse::from_json`].
pub fn parse_token_response(body: &[u8]) -> Result<TokenResponse, TokenResponseError> {
    let value: Value = serde_json::from_slice(body)?;
    TokenResponse::from_json(value)
}

/// Exchange an authorization code for an access token.
///
/// The request is sent as is, without any retry. Error responses from the
/// token endpoint are normalized like successful ones, usually into
/// [`TokenResponse::Error`].
///
/// # Arguments
///
/// * `http_client` - The reqwest client to use for making HTTP requests.
///
/// * `request` - The request built with [`build_token_request`].
///
/// # Errors
///
/// Returns an error if the request fails, or if the response can't be
/// normalized.
#[tracing::instrument(skip_all, fields(token_endpoint = %request.token_endpoint))]
pub async fn exchange_authorization_code(
    http_client: &reqwest::Client,
    request: TokenRequest,
) -> Result<TokenResponse, TokenExchangeError> {
    tracing::debug!("Exchanging authorization code for access token...");

    let mut token_request = http_client
        .post(request.token_endpoint)
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
        .body(request.body);

    if let Some(authorization) = request.authorization {
        token_request = token_request.header(AUTHORIZATION, authorization);
    }

    let token_response = token_request.send_traced().await?;
    let status = token_response.status();
    let body = token_response.bytes().await?;

    match parse_token_response(&body) {
        Ok(response) => {
            if let TokenResponse::Error(error) = &response {
                tracing::debug!(%status, error = %error.error, "Token endpoint returned an error");
            }
            Ok(response)
        }

        Err(_) if !status.is_success() => Err(TokenExchangeError::UnexpectedStatus {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }),

        Err(e) => Err(e.into()),
    }
}
