// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extension property envelopes
//!
//! Every entity carries one envelope holding optional per-engine payloads.
//! The envelope itself is mandatory and type-checked; payloads are opaque
//! JSON owned by the engine extensions and pass through untouched, including
//! keys for engines this crate does not know about.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Read access to the payloads of an envelope
pub trait ExtensionProperties {
    /// Energy simulation payload
    fn energy(&self) -> Option<&Value>;

    /// Payloads of engines other than energy, keyed by engine name
    fn extensions(&self) -> &BTreeMap<String, Value>;

    /// Get the payload of an engine by name
    fn engine(&self, engine: &str) -> Option<&Value> {
        match engine {
            "energy" => self.energy(),
            other => self.extensions().get(other),
        }
    }

    /// Names of the engines with a payload present
    fn engines(&self) -> Vec<&str> {
        let mut engines: Vec<&str> = Vec::new();
        if self.energy().is_some() {
            engines.push("energy");
        }
        engines.extend(self.extensions().keys().map(String::as_str));
        engines
    }

    /// Check if no engine payload is present
    fn is_bare(&self) -> bool {
        self.energy().is_none() && self.extensions().is_empty()
    }
}

macro_rules! properties_envelope {
    ($(#[$meta:meta])* $name:ident, $tag:ident => $value:literal) => {
        type_tag!(
            /// `type` discriminator of the matching envelope
            $tag => $value
        );

        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
        pub struct $name {
            #[serde(rename = "type")]
            pub type_tag: $tag,
            /// Energy simulation payload
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub energy: Option<Value>,
            /// Payloads of other engines, keyed by engine name
            #[serde(flatten)]
            pub extensions: BTreeMap<String, Value>,
        }

        impl $name {
            /// Create an envelope without payloads
            pub fn new() -> Self {
                Self::default()
            }

            /// Set the energy payload
            pub fn with_energy(mut self, payload: Value) -> Self {
                self.energy = Some(payload);
                self
            }

            /// Attach a payload for another engine
            pub fn with_extension(mut self, engine: impl Into<String>, payload: Value) -> Self {
                self.extensions.insert(engine.into(), payload);
                self
            }
        }

        impl ExtensionProperties for $name {
            fn energy(&self) -> Option<&Value> {
                self.energy.as_ref()
            }

            fn extensions(&self) -> &BTreeMap<String, Value> {
                &self.extensions
            }
        }
    };
}

properties_envelope!(
    /// Extension properties of a [`crate::Shade`]
    ShadePropertiesAbridged, ShadePropertiesAbridgedTag => "ShadePropertiesAbridged"
);
properties_envelope!(
    /// Extension properties of a [`crate::Door`]
    DoorPropertiesAbridged, DoorPropertiesAbridgedTag => "DoorPropertiesAbridged"
);
properties_envelope!(
    /// Extension properties of an [`crate::Aperture`]
    AperturePropertiesAbridged, AperturePropertiesAbridgedTag => "AperturePropertiesAbridged"
);
properties_envelope!(
    /// Extension properties of a [`crate::Face`]
    FacePropertiesAbridged, FacePropertiesAbridgedTag => "FacePropertiesAbridged"
);
properties_envelope!(
    /// Extension properties of a [`crate::Room`]
    RoomPropertiesAbridged, RoomPropertiesAbridgedTag => "RoomPropertiesAbridged"
);
properties_envelope!(
    /// Extension properties of a [`crate::Model`]
    ModelProperties, ModelPropertiesTag => "ModelProperties"
);
