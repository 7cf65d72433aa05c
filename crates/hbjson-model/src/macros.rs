// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative helpers for `type` discriminator fields

/// Define a zero-sized tag that serializes as one exact string
///
/// Deserialization rejects any other value, so a record whose `type` does
/// not match the target struct fails with a schema error.
macro_rules! type_tag {
    ($(#[$meta:meta])* $tag:ident => $value:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $tag;

        impl $tag {
            /// Discriminator value
            pub const VALUE: &'static str = $value;
        }

        impl ::serde::Serialize for $tag {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str($value)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $tag {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                if raw == $value {
                    Ok($tag)
                } else {
                    Err(::serde::de::Error::invalid_value(
                        ::serde::de::Unexpected::Str(&raw),
                        &$value,
                    ))
                }
            }
        }

        impl ::schemars::JsonSchema for $tag {
            fn is_referenceable() -> bool {
                false
            }

            fn schema_name() -> String {
                concat!($value, "Tag").to_string()
            }

            fn json_schema(_: &mut ::schemars::gen::SchemaGenerator) -> ::schemars::schema::Schema {
                ::schemars::schema::SchemaObject {
                    instance_type: Some(::schemars::schema::InstanceType::String.into()),
                    const_value: Some(::serde_json::Value::from($value)),
                    ..Default::default()
                }
                .into()
            }
        }
    };
}
