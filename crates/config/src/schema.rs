// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! JSON Schema definitions for types of the flow engine

use odbg_oidc_flow::types;
use schemars::{
    JsonSchema,
    r#gen::SchemaGenerator,
    schema::{InstanceType, Schema, SchemaObject},
};

fn string_enum(values: impl IntoIterator<Item = &'static str>) -> Schema {
    Schema::Object(SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        enum_values: Some(values.into_iter().map(Into::into).collect()),
        ..SchemaObject::default()
    })
}

/// A response type requested at the authorization endpoint
pub struct ResponseType;

impl JsonSchema for ResponseType {
    fn schema_name() -> String {
        "ResponseType".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        string_enum(types::ResponseType::ALL.map(types::ResponseType::as_str))
    }
}

/// How the client authenticates at the token endpoint
pub struct ClientAuthMethod;

impl JsonSchema for ClientAuthMethod {
    fn schema_name() -> String {
        "ClientAuthMethod".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        string_enum(
            [
                types::ClientAuthMethod::Basic,
                types::ClientAuthMethod::Post,
                types::ClientAuthMethod::Jwt,
                types::ClientAuthMethod::None,
            ]
            .map(types::ClientAuthMethod::as_str),
        )
    }
}
