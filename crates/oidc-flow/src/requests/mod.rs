// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Methods to build the requests of an OpenID Connect login and to interpret
//! the responses.

pub mod authorization;
pub mod callback;
pub mod token;
pub mod userinfo;
