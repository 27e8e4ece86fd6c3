// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::collections::HashMap;

use assert_matches::assert_matches;
use odbg_oidc_flow::{
    error::AuthorizationError,
    requests::authorization::build_authorization_url,
    types::{ClientAuthMethod, ClientConfig, Prompt, ResponseType},
};
use rand::SeedableRng;
use url::Url;

use crate::{CLIENT_ID, REDIRECT_URI, client_config};

fn issuer() -> Url {
    Url::parse("https://idp.example.com/").unwrap()
}

#[test]
fn pass_authorization_url() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let config = client_config(
        &issuer(),
        &[ResponseType::Code, ResponseType::IdToken],
        ClientAuthMethod::Post,
    )
    .with_scopes(vec!["profile".to_owned(), "email".to_owned()]);

    let (url, secrets) =
        build_authorization_url(&config, Some(&[Prompt::Login, Prompt::Consent]), &mut rng)
            .unwrap();

    assert_eq!(url.path(), "/authorize");

    let keys: Vec<_> = url.query_pairs().map(|(key, _)| key.into_owned()).collect();
    assert_eq!(
        keys,
        [
            "scope",
            "response_type",
            "client_id",
            "redirect_uri",
            "state",
            "nonce",
            "prompt"
        ]
    );

    let query_pairs = url.query_pairs().collect::<HashMap<_, _>>();
    assert_eq!(query_pairs.get("scope").unwrap(), "openid profile email");
    assert_eq!(query_pairs.get("response_type").unwrap(), "code id_token");
    assert_eq!(query_pairs.get("client_id").unwrap(), CLIENT_ID);
    assert_eq!(query_pairs.get("redirect_uri").unwrap(), REDIRECT_URI);
    assert_eq!(*query_pairs.get("state").unwrap(), secrets.state);
    assert_eq!(*query_pairs.get("nonce").unwrap(), secrets.nonce);
    assert_eq!(query_pairs.get("prompt").unwrap(), "login consent");
}

#[test]
fn pass_prompt_parameter() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);

    let (url, _) = build_authorization_url(&config, None, &mut rng).unwrap();
    assert!(url.query_pairs().all(|(key, _)| key != "prompt"));

    let (url, _) = build_authorization_url(&config, Some(&[Prompt::None]), &mut rng).unwrap();
    let query_pairs = url.query_pairs().collect::<HashMap<_, _>>();
    assert_eq!(query_pairs.get("prompt").unwrap(), "");

    let (url, _) =
        build_authorization_url(&config, Some(&[Prompt::SelectAccount]), &mut rng).unwrap();
    let query_pairs = url.query_pairs().collect::<HashMap<_, _>>();
    assert_eq!(query_pairs.get("prompt").unwrap(), "select_account");
}

#[test]
fn pass_openid_always_requested() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);

    for scopes in [
        vec![],
        vec!["openid".to_owned()],
        vec!["email".to_owned(), "openid".to_owned()],
    ] {
        let config = client_config(&issuer(), &[ResponseType::Token], ClientAuthMethod::Post)
            .with_scopes(scopes);

        let (url, _) = build_authorization_url(&config, None, &mut rng).unwrap();
        let query_pairs = url.query_pairs().collect::<HashMap<_, _>>();
        let scope = query_pairs.get("scope").unwrap();

        assert_eq!(
            scope.split(' ').filter(|token| *token == "openid").count(),
            1,
            "{scope}"
        );
    }
}

#[test]
fn pass_keep_existing_query() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let config = ClientConfig::new(
        vec![ResponseType::Code],
        CLIENT_ID.to_owned(),
        REDIRECT_URI.to_owned(),
        "https://idp.example.com/authorize?tenant=debug".to_owned(),
        "https://idp.example.com/token".to_owned(),
        "https://idp.example.com/userinfo".to_owned(),
    )
    .unwrap();

    let (url, _) = build_authorization_url(&config, None, &mut rng).unwrap();

    let first = url.query_pairs().next().unwrap();
    assert_eq!(first.0, "tenant");
    assert_eq!(first.1, "debug");
}

#[test]
fn pass_fresh_secrets() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);

    let (_, first) = build_authorization_url(&config, None, &mut rng).unwrap();
    let (_, second) = build_authorization_url(&config, None, &mut rng).unwrap();

    assert_ne!(first.state, second.state);
    assert_ne!(first.nonce, second.nonce);
}

#[test]
fn fail_invalid_authorization_endpoint() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let config = ClientConfig::new(
        vec![ResponseType::Code],
        CLIENT_ID.to_owned(),
        REDIRECT_URI.to_owned(),
        "/authorize".to_owned(),
        "https://idp.example.com/token".to_owned(),
        "https://idp.example.com/userinfo".to_owned(),
    )
    .unwrap();

    assert_matches!(
        build_authorization_url(&config, None, &mut rng),
        Err(AuthorizationError::InvalidUrl(_))
    );
}
