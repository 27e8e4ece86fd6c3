// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Requests for obtaining [Claims] about an end-user.
//!
//! [Claims]: https://openid.net/specs/openid-connect-core-1_0.html#Claims

use std::collections::HashMap;

use headers::{ContentType, HeaderMapExt};
use http::header::ACCEPT;
use mime::Mime;
use odbg_http::RequestBuilderExt;
use serde_json::Value;
use url::Url;

use crate::{
    error::UserInfoError,
    types::{AccessTokenResponse, TokenType},
};

/// Obtain information about an authenticated end-user.
///
/// Returns the claims exactly as sent by the server. Taking the token
/// response ensures this is only ever called after a successful token
/// exchange.
///
/// # Arguments
///
/// * `http_client` - The reqwest client to use for making HTTP requests.
///
/// * `userinfo_endpoint` - The URL of the issuer's User Info endpoint.
///
/// * `tokens` - The successful response of the token endpoint.
///
/// # Errors
///
/// Returns an error if the token type is not supported, if the request fails
/// or if the response is not a JSON object. Nothing is retried.
#[tracing::instrument(skip_all, fields(userinfo_endpoint = %userinfo_endpoint))]
pub async fn fetch_userinfo(
    http_client: &reqwest::Client,
    userinfo_endpoint: &Url,
    tokens: &AccessTokenResponse,
) -> Result<HashMap<String, Value>, UserInfoError> {
    tracing::debug!("Obtaining user info…");

    let userinfo_request = match tokens.token_type {
        TokenType::Bearer => http_client
            .get(userinfo_endpoint.as_str())
            .bearer_auth(&tokens.access_token),
        token_type @ TokenType::Mac => {
            return Err(UserInfoError::UnsupportedTokenType(token_type));
        }
    };

    let expected_content_type = mime::APPLICATION_JSON.as_ref();

    let userinfo_response = userinfo_request
        .header(ACCEPT, expected_content_type)
        .send_traced()
        .await?;

    let status = userinfo_response.status();
    if !status.is_success() {
        let body = userinfo_response.text().await?;
        return Err(UserInfoError::Status { status, body });
    }

    let content_type: Mime = userinfo_response
        .headers()
        .typed_try_get::<ContentType>()
        .map_err(|_| UserInfoError::InvalidResponseContentTypeValue)?
        .ok_or(UserInfoError::MissingResponseContentType)?
        .into();

    if content_type.essence_str() != expected_content_type {
        return Err(UserInfoError::UnexpectedResponseContentType {
            expected: expected_content_type.to_owned(),
            got: content_type.to_string(),
        });
    }

    let claims: HashMap<String, Value> = userinfo_response.json().await?;

    tracing::debug!(claims = claims.len(), "Obtained user info");

    Ok(claims)
}
