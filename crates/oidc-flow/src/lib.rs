// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The [OpenID Connect] flow engine behind the OIDC debugger.
//!
//! It drives a single relying-party login end to end while keeping every
//! intermediate value inspectable:
//!
//! 1. [build the authorization URL] from an immutable [`ClientConfig`],
//!    generating fresh [`FlowSecrets`];
//! 2. [validate the callback] the identity provider redirects back to;
//! 3. [build the token request] for the returned authorization code and
//!    [normalize the token response];
//! 4. [fetch the user info] with the resulting access token.
//!
//! Network calls go through a caller-supplied [`reqwest::Client`], see the
//! `odbg-http` crate. Everything else is pure and synchronous.
//!
//! # Scope
//!
//! This is not a complete OIDC client: there is no token refresh, no PKCE,
//! no discovery and no ID Token signature verification.
//!
//! [OpenID Connect]: https://openid.net/connect/
//! [build the authorization URL]: requests::authorization::build_authorization_url
//! [validate the callback]: requests::callback::validate_auth_response
//! [build the token request]: requests::token::build_token_request
//! [normalize the token response]: requests::token::parse_token_response
//! [fetch the user info]: requests::userinfo::fetch_userinfo
//! [`ClientConfig`]: types::ClientConfig
//! [`FlowSecrets`]: requests::authorization::FlowSecrets

#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod flow;
pub mod requests;
pub mod types;

pub use self::flow::Flow;
