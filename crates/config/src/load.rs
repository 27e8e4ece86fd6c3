// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};

/// Build the [`Figment`] the configuration sections are extracted from.
///
/// The files are merged in order, later ones overriding earlier ones, then
/// the `ODBG_`-prefixed environment variables on top. Environment keys keep
/// their case, as the client section uses camel case keys.
#[must_use]
pub fn figment<P: AsRef<Utf8Path>>(files: &[P]) -> Figment {
    let mut figment = Figment::new();

    for file in files {
        let file = file.as_ref();
        tracing::debug!(%file, "Loading configuration file");
        figment = figment.merge(Yaml::file(file));
    }

    figment.merge(Env::prefixed("ODBG_").split("__").lowercase(false))
}
