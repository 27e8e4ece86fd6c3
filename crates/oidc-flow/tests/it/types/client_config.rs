// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use assert_matches::assert_matches;
use odbg_oidc_flow::{
    error::ClientConfigError,
    types::{ClientAuthMethod, ClientConfig, ResponseType},
};
use url::Url;

use crate::client_config;

fn config() -> ClientConfig {
    client_config(
        &Url::parse("https://idp.example.com/").unwrap(),
        &[ResponseType::Code, ResponseType::Token],
        ClientAuthMethod::Basic,
    )
    .with_scopes(vec!["profile".to_owned()])
}

#[test]
fn pass_json_round_trip() {
    let config = config();

    let json = serde_json::to_string(&config).unwrap();
    let back: ClientConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
}

#[test]
fn pass_yaml_round_trip() {
    let config = config();

    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(yaml.contains("clientAuthMethod: basic"), "{yaml}");
    assert!(yaml.contains("- token"), "{yaml}");

    let back: ClientConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, config);
}

#[test]
fn fail_invalid_persisted_config() {
    let error = serde_yaml::from_str::<ClientConfig>(
        r"
            responseTypes: [code]
            clientId: ''
            redirectUri: app:/callback
            authorizeUri: https://idp.example.com/authorize
            tokenUri: https://idp.example.com/token
            userinfoUri: https://idp.example.com/userinfo
        ",
    )
    .unwrap_err();
    assert!(error.to_string().contains("clientId"), "{error}");

    assert!(
        serde_yaml::from_str::<ClientConfig>(
            r"
                responseTypes: [code, code_id_token]
                clientId: client
                redirectUri: app:/callback
                authorizeUri: https://idp.example.com/authorize
                tokenUri: https://idp.example.com/token
                userinfoUri: https://idp.example.com/userinfo
            ",
        )
        .is_err()
    );
}

#[test]
fn fail_duplicate_response_types() {
    assert_matches!(
        ClientConfig::new(
            vec![ResponseType::Token, ResponseType::Token],
            "client".to_owned(),
            "app:/callback".to_owned(),
            "https://idp.example.com/authorize".to_owned(),
            "https://idp.example.com/token".to_owned(),
            "https://idp.example.com/userinfo".to_owned(),
        ),
        Err(ClientConfigError::DuplicateResponseType(ResponseType::Token))
    );
}
