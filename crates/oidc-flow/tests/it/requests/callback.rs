// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use odbg_oidc_flow::{
    Flow,
    requests::{
        authorization::{FlowSecrets, build_authorization_url},
        callback::validate_auth_response,
    },
    types::{AuthErrorCode, AuthOutcome, ClientAuthMethod, ResponseType},
};
use rand::SeedableRng;
use url::Url;

use crate::{ACCESS_TOKEN, AUTHORIZATION_CODE, ID_TOKEN, callback, callback_for, client_config};

fn issuer() -> Url {
    Url::parse("https://idp.example.com/").unwrap()
}

fn secrets() -> FlowSecrets {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    FlowSecrets::generate(&mut rng)
}

#[test]
fn pass_code() {
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let secrets = secrets();

    let outcomes = validate_auth_response(
        &config,
        Some(&secrets),
        &callback_for(&secrets, &[("code", AUTHORIZATION_CODE)]),
    );

    assert_eq!(outcomes, vec![AuthOutcome::CodeOk]);
    assert!(outcomes.iter().all(AuthOutcome::is_success));
}

#[test]
fn pass_all_response_types_in_fixed_order() {
    // Requested in a different order than the one outcomes are reported in
    let config = client_config(
        &issuer(),
        &[ResponseType::IdToken, ResponseType::Token, ResponseType::Code],
        ClientAuthMethod::Post,
    );
    let secrets = secrets();

    let outcomes = validate_auth_response(
        &config,
        Some(&secrets),
        &callback_for(
            &secrets,
            &[("code", AUTHORIZATION_CODE), ("id_token", ID_TOKEN)],
        ),
    );

    assert_eq!(
        outcomes,
        vec![
            AuthOutcome::CodeOk,
            AuthOutcome::TokenFail,
            AuthOutcome::IdTokenOk
        ]
    );
    assert_eq!(
        outcomes.iter().map(AuthOutcome::code).collect::<Vec<_>>(),
        ["code_ok", "token_fail", "id_token_ok"]
    );
}

#[test]
fn pass_only_requested_response_types() {
    let config = client_config(&issuer(), &[ResponseType::Token], ClientAuthMethod::Post);
    let secrets = secrets();

    let outcomes = validate_auth_response(
        &config,
        Some(&secrets),
        &callback_for(
            &secrets,
            &[("code", AUTHORIZATION_CODE), ("token", ACCESS_TOKEN)],
        ),
    );

    assert_eq!(outcomes, vec![AuthOutcome::TokenOk]);
}

#[test]
fn pass_error_takes_precedence() {
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let secrets = secrets();

    let outcomes = validate_auth_response(
        &config,
        Some(&secrets),
        &callback_for(
            &secrets,
            &[("error", "consent_required"), ("code", AUTHORIZATION_CODE)],
        ),
    );

    assert_eq!(
        outcomes,
        vec![AuthOutcome::Error(AuthErrorCode::ConsentRequired)]
    );
    assert_eq!(outcomes[0].code(), "consent_required");
    assert_eq!(outcomes[0].message(), "IdP Consent Required");
}

#[test]
fn pass_unknown_error_code() {
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let secrets = secrets();

    let outcomes = validate_auth_response(
        &config,
        Some(&secrets),
        &callback_for(&secrets, &[("error", "something_new")]),
    );

    assert_eq!(
        outcomes,
        vec![AuthOutcome::Error(AuthErrorCode::Unknown(
            "something_new".to_owned()
        ))]
    );
    assert_eq!(outcomes[0].code(), "something_new");
}

#[test]
fn fail_wrong_state() {
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let secrets = secrets();

    for callback_uri in [
        callback(&[("state", "wrong"), ("code", AUTHORIZATION_CODE)]),
        callback(&[("code", AUTHORIZATION_CODE)]),
        // An error doesn't bypass the state check
        callback(&[("state", "wrong"), ("error", "access_denied")]),
    ] {
        assert_eq!(
            validate_auth_response(&config, Some(&secrets), &callback_uri),
            vec![AuthOutcome::InvalidState],
            "{callback_uri}"
        );
    }
}

#[test]
fn fail_no_flow_in_progress() {
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let secrets = secrets();

    assert_eq!(
        validate_auth_response(
            &config,
            None,
            &callback_for(&secrets, &[("code", AUTHORIZATION_CODE)])
        ),
        vec![AuthOutcome::InvalidState]
    );
}

#[test]
fn fail_malformed_callback() {
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let secrets = secrets();

    assert_eq!(
        validate_auth_response(&config, Some(&secrets), "not a callback"),
        vec![AuthOutcome::InvalidState]
    );
}

#[test]
fn fail_stale_state_after_new_authorization() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let mut flow = Flow::new(&config);

    flow.begin_authorization(None, &mut rng).unwrap();
    let stale = flow.secrets().unwrap().clone();
    flow.begin_authorization(None, &mut rng).unwrap();

    assert_eq!(
        flow.validate(&callback_for(&stale, &[("code", AUTHORIZATION_CODE)])),
        vec![AuthOutcome::InvalidState]
    );

    let live = flow.secrets().unwrap().clone();
    assert_eq!(
        flow.validate(&callback_for(&live, &[("code", AUTHORIZATION_CODE)])),
        vec![AuthOutcome::CodeOk]
    );
}

#[test]
fn pass_state_from_authorization_url() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);

    let (url, secrets) = build_authorization_url(&config, None, &mut rng).unwrap();

    // Echo the state exactly as the identity provider received it
    let state = url
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .unwrap();

    assert_eq!(
        validate_auth_response(
            &config,
            Some(&secrets),
            &callback(&[("state", state.as_str()), ("code", AUTHORIZATION_CODE)])
        ),
        vec![AuthOutcome::CodeOk]
    );
}

#[test]
fn pass_state_with_raw_plus() {
    let config = client_config(&issuer(), &[ResponseType::Code], ClientAuthMethod::Post);
    let secrets = FlowSecrets {
        state: "ab+c/d==".to_owned(),
        nonce: "nonce".to_owned(),
    };

    // Echoed without form encoding
    let raw = "http://localhost/callback?state=ab+c/d==&code=x";
    assert_eq!(
        validate_auth_response(&config, Some(&secrets), raw),
        vec![AuthOutcome::CodeOk]
    );

    let encoded = "http://localhost/callback?state=ab%2Bc%2Fd%3D%3D&code=x";
    assert_eq!(
        validate_auth_response(&config, Some(&secrets), encoded),
        vec![AuthOutcome::CodeOk]
    );
}
