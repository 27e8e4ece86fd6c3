// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use odbg_http::HttpClientOptions;
use odbg_oidc_flow::{
    requests::authorization::FlowSecrets,
    types::{ClientAuthMethod, ClientConfig, ResponseType},
};
use url::Url;
use wiremock::MockServer;

mod requests;

const REDIRECT_URI: &str = "http://localhost/callback";
const CLIENT_ID: &str = "client!+ID";
const CLIENT_SECRET: &str = "SECRET?%Gclient";
const AUTHORIZATION_CODE: &str = "authC0D3";
const ACCESS_TOKEN: &str = "AccessToken1";
const REFRESH_TOKEN: &str = "RefreshToken1";
const ID_TOKEN: &str = "header.payload.signature";

async fn init_test() -> (reqwest::Client, MockServer, Url) {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let client = odbg_http::client(&HttpClientOptions::default()).unwrap();
    let mock_server = MockServer::start().await;
    let issuer = Url::parse(&mock_server.uri()).expect("Couldn't parse URL");

    (client, mock_server, issuer)
}

/// A client requesting the given response types from an identity provider
/// living at `issuer`.
fn client_config(
    issuer: &Url,
    response_types: &[ResponseType],
    auth_method: ClientAuthMethod,
) -> ClientConfig {
    ClientConfig::new(
        response_types.to_vec(),
        CLIENT_ID.to_owned(),
        REDIRECT_URI.to_owned(),
        issuer.join("authorize").unwrap().into(),
        issuer.join("token").unwrap().into(),
        issuer.join("userinfo").unwrap().into(),
    )
    .unwrap()
    .with_client_secret(CLIENT_SECRET.to_owned())
    .with_client_auth_method(auth_method)
}

/// Build a callback URI carrying the given parameters, correctly encoded.
fn callback(params: &[(&str, &str)]) -> String {
    let mut url = Url::parse(REDIRECT_URI).unwrap();
    url.query_pairs_mut().extend_pairs(params);
    url.into()
}

/// Build a callback URI for the given secrets, with extra parameters.
fn callback_for(secrets: &FlowSecrets, params: &[(&str, &str)]) -> String {
    let mut all = vec![("state", secrets.state.as_str())];
    all.extend_from_slice(params);
    callback(&all)
}
