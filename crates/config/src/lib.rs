// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

#![deny(missing_docs, rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]
// derive(JSONSchema) uses &str.to_string()
#![allow(clippy::str_to_string)]

//! Configuration of the OIDC debugger
//!
//! The configuration is read from YAML files merged in order, then from
//! environment variables prefixed with `ODBG_`, nested keys being separated
//! by `__`. Keys are case sensitive, e.g. `ODBG_http__timeout=10` or
//! `ODBG_client__clientSecret=...`.

mod load;
pub(crate) mod schema;
mod sections;
pub(crate) mod util;

pub use self::{
    load::figment,
    sections::*,
    util::{ConfigurationSection, ConfigurationSectionExt},
};
