// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use assert_matches::assert_matches;
use http::StatusCode;
use odbg_oidc_flow::{
    error::UserInfoError,
    requests::userinfo::fetch_userinfo,
    types::{AccessTokenResponse, TokenType},
};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{header, method, path},
};

use crate::{ACCESS_TOKEN, ID_TOKEN, init_test};

fn tokens(token_type: TokenType) -> AccessTokenResponse {
    AccessTokenResponse {
        access_token: ACCESS_TOKEN.to_owned(),
        token_type,
        id_token: ID_TOKEN.to_owned(),
        expires_in: Some(300),
        refresh_token: None,
        refresh_expires_in: None,
        scope: None,
    }
}

#[tokio::test]
async fn pass_fetch_userinfo() {
    let (http_client, mock_server, issuer) = init_test().await;
    let userinfo_endpoint = issuer.join("userinfo").unwrap();

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header(
            "authorization",
            format!("Bearer {ACCESS_TOKEN}").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "SubjectID",
            "email": "janedoe@example.com",
            "email_verified": true,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let claims = fetch_userinfo(&http_client, &userinfo_endpoint, &tokens(TokenType::Bearer))
        .await
        .unwrap();

    assert_eq!(claims.get("sub").unwrap(), "SubjectID");
    assert_eq!(claims.get("email").unwrap(), "janedoe@example.com");
    assert_eq!(claims.get("email_verified").unwrap(), true);
}

#[tokio::test]
async fn fail_mac_token_type() {
    let (http_client, mock_server, issuer) = init_test().await;
    let userinfo_endpoint = issuer.join("userinfo").unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let error = fetch_userinfo(&http_client, &userinfo_endpoint, &tokens(TokenType::Mac))
        .await
        .unwrap_err();

    assert_matches!(error, UserInfoError::UnsupportedTokenType(TokenType::Mac));
}

#[tokio::test]
async fn fail_error_status() {
    let (http_client, mock_server, issuer) = init_test().await;
    let userinfo_endpoint = issuer.join("userinfo").unwrap();

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_token"))
        .mount(&mock_server)
        .await;

    let error = fetch_userinfo(&http_client, &userinfo_endpoint, &tokens(TokenType::Bearer))
        .await
        .unwrap_err();

    assert_matches!(
        error,
        UserInfoError::Status { status, body }
            if status == StatusCode::UNAUTHORIZED && body == "invalid_token"
    );
}

#[tokio::test]
async fn fail_unexpected_content_type() {
    let (http_client, mock_server, issuer) = init_test().await;
    let userinfo_endpoint = issuer.join("userinfo").unwrap();

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("header.payload.signature", "application/jwt"),
        )
        .mount(&mock_server)
        .await;

    let error = fetch_userinfo(&http_client, &userinfo_endpoint, &tokens(TokenType::Bearer))
        .await
        .unwrap_err();

    assert_matches!(
        error,
        UserInfoError::UnexpectedResponseContentType { expected, got }
            if expected == "application/json" && got == "application/jwt"
    );
}
