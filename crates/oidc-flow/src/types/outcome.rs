// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Outcomes of validating an authorization response.

use std::{convert::Infallible, fmt};

use serde_with::{DeserializeFromStr, SerializeDisplay};

use super::ResponseType;

/// An error code returned by the identity provider in the `error` parameter
/// of the authorization response.
///
/// Parsing one never fails: codes outside of the known vocabulary are kept
/// in [`AuthErrorCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
#[non_exhaustive]
pub enum AuthErrorCode {
    /// `invalid_request`
    InvalidRequest,

    /// `unauthorized_client`
    UnauthorizedClient,

    /// `access_denied`
    AccessDenied,

    /// `unsupported_response_type`
    UnsupportedResponseType,

    /// `invalid_scope`
    InvalidScope,

    /// `server_error`
    ServerError,

    /// `temporarily_unavailable`
    TemporarilyUnavailable,

    /// `interaction_required`
    InteractionRequired,

    /// `login_required`
    LoginRequired,

    /// `account_selection_required`
    AccountSelectionRequired,

    /// `consent_required`
    ConsentRequired,

    /// `invalid_request_uri`
    InvalidRequestUri,

    /// `invalid_request_object`
    InvalidRequestObject,

    /// `request_not_supported`
    RequestNotSupported,

    /// `request_uri_not_supported`
    RequestUriNotSupported,

    /// `registration_not_supported`
    RegistrationNotSupported,

    /// An unknown value.
    Unknown(String),
}

impl AuthErrorCode {
    /// The code as sent by the identity provider.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::AccessDenied => "access_denied",
            Self::UnsupportedResponseType => "unsupported_response_type",
            Self::InvalidScope => "invalid_scope",
            Self::ServerError => "server_error",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
            Self::InteractionRequired => "interaction_required",
            Self::LoginRequired => "login_required",
            Self::AccountSelectionRequired => "account_selection_required",
            Self::ConsentRequired => "consent_required",
            Self::InvalidRequestUri => "invalid_request_uri",
            Self::InvalidRequestObject => "invalid_request_object",
            Self::RequestNotSupported => "request_not_supported",
            Self::RequestUriNotSupported => "request_uri_not_supported",
            Self::RegistrationNotSupported => "registration_not_supported",
            Self::Unknown(value) => value,
        }
    }

    /// A human-readable description of the code.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid Authorization Request",
            Self::UnauthorizedClient => "Unauthorized Client",
            Self::AccessDenied => "Access Denied",
            Self::UnsupportedResponseType => "Unsupported Response Type",
            Self::InvalidScope => "Invalid Scope",
            Self::ServerError => "IdP Server Error",
            Self::TemporarilyUnavailable => "IdP Temporarily Unavailable",
            Self::InteractionRequired => "IdP Interaction Required",
            Self::LoginRequired => "IdP Login Required",
            Self::AccountSelectionRequired => "IdP Account Selection Required",
            Self::ConsentRequired => "IdP Consent Required",
            Self::InvalidRequestUri => "Invalid Request URI",
            Self::InvalidRequestObject => "Invalid Request Object",
            Self::RequestNotSupported => "Request Not Supported",
            Self::RequestUriNotSupported => "Request URI Not Supported",
            Self::RegistrationNotSupported => "Registration Not Supported",
            Self::Unknown(_) => "Unknown IdP Error",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuthErrorCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid_request" => Ok(Self::InvalidRequest),
            "unauthorized_client" => Ok(Self::UnauthorizedClient),
            "access_denied" => Ok(Self::AccessDenied),
            "unsupported_response_type" => Ok(Self::UnsupportedResponseType),
            "invalid_scope" => Ok(Self::InvalidScope),
            "server_error" => Ok(Self::ServerError),
            "temporarily_unavailable" => Ok(Self::TemporarilyUnavailable),
            "interaction_required" => Ok(Self::InteractionRequired),
            "login_required" => Ok(Self::LoginRequired),
            "account_selection_required" => Ok(Self::AccountSelectionRequired),
            "consent_required" => Ok(Self::ConsentRequired),
            "invalid_request_uri" => Ok(Self::InvalidRequestUri),
            "invalid_request_object" => Ok(Self::InvalidRequestObject),
            "request_not_supported" => Ok(Self::RequestNotSupported),
            "request_uri_not_supported" => Ok(Self::RequestUriNotSupported),
            "registration_not_supported" => Ok(Self::RegistrationNotSupported),
            value => Ok(Self::Unknown(value.to_owned())),
        }
    }
}

/// One entry of the result of validating an authorization response.
///
/// It serializes as its [code](AuthOutcome::code). An identity provider error
/// whose code is also the code of another outcome is written with an
/// `error:` prefix, so that it reads back as the same error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum AuthOutcome {
    /// `code_ok`: the requested authorization code is present
    CodeOk,

    /// `code_fail`: the requested authorization code is missing
    CodeFail,

    /// `token_ok`: the requested access token is present
    TokenOk,

    /// `token_fail`: the requested access token is missing
    TokenFail,

    /// `id_token_ok`: the requested ID Token is present
    IdTokenOk,

    /// `id_token_fail`: the requested ID Token is missing
    IdTokenFail,

    /// `invalid_state`: the `state` doesn't match the live flow
    InvalidState,

    /// The identity provider reported an error.
    Error(AuthErrorCode),
}

impl AuthOutcome {
    /// The outcome of checking for the presence of a response type.
    #[must_use]
    pub fn for_response_type(response_type: ResponseType, present: bool) -> Self {
        match (response_type, present) {
            (ResponseType::Code, true) => Self::CodeOk,
            (ResponseType::Code, false) => Self::CodeFail,
            (ResponseType::Token, true) => Self::TokenOk,
            (ResponseType::Token, false) => Self::TokenFail,
            (ResponseType::IdToken, true) => Self::IdTokenOk,
            (ResponseType::IdToken, false) => Self::IdTokenFail,
        }
    }

    /// The outcome for an `error` parameter sent by the identity provider.
    #[must_use]
    pub fn from_error_code(code: &str) -> Self {
        if code == "invalid_state" {
            return Self::InvalidState;
        }

        match code.parse() {
            Ok(code) => Self::Error(code),
            Err(infallible) => match infallible {},
        }
    }

    /// The short machine-readable code of this outcome.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::CodeOk => "code_ok",
            Self::CodeFail => "code_fail",
            Self::TokenOk => "token_ok",
            Self::TokenFail => "token_fail",
            Self::IdTokenOk => "id_token_ok",
            Self::IdTokenFail => "id_token_fail",
            Self::InvalidState => "invalid_state",
            Self::Error(code) => code.as_str(),
        }
    }

    /// A human-readable description of this outcome.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::CodeOk => "Authorization Code OK",
            Self::CodeFail => "Authorization Code FAIL",
            Self::TokenOk => "Token OK",
            Self::TokenFail => "Token FAIL",
            Self::IdTokenOk => "ID Token OK",
            Self::IdTokenFail => "ID Token FAIL",
            Self::InvalidState => "Invalid State Parameter",
            Self::Error(code) => code.message(),
        }
    }

    fn from_outcome_code(code: &str) -> Option<Self> {
        let outcome = match code {
            "code_ok" => Self::CodeOk,
            "code_fail" => Self::CodeFail,
            "token_ok" => Self::TokenOk,
            "token_fail" => Self::TokenFail,
            "id_token_ok" => Self::IdTokenOk,
            "id_token_fail" => Self::IdTokenFail,
            "invalid_state" => Self::InvalidState,
            _ => return None,
        };

        Some(outcome)
    }

    /// Whether this outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::CodeOk | Self::TokenOk | Self::IdTokenOk)
    }
}

impl fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(code) if Self::from_outcome_code(code.as_str()).is_some() => {
                write!(f, "error:{code}")
            }
            outcome => f.write_str(outcome.code()),
        }
    }
}

impl std::str::FromStr for AuthOutcome {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(code) = s.strip_prefix("error:") {
            let code = match code.parse() {
                Ok(code) => code,
                Err(infallible) => match infallible {},
            };
            return Ok(Self::Error(code));
        }

        Ok(Self::from_outcome_code(s).unwrap_or_else(|| Self::from_error_code(s)))
    }
}
