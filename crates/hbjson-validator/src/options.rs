// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validator configuration

use hbjson_model::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Switches controlling model-level validation
///
/// Loadable from TOML; missing keys take their default value.
///
/// ```toml
/// parallel = false
/// case_insensitive_names = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Validate rooms on the rayon thread pool
    pub parallel: bool,
    /// Warn about Surface references to names absent from the model
    pub check_references: bool,
    /// Warn when a model carries orphaned faces, apertures or doors
    pub report_orphans: bool,
    /// Treat names differing only by ASCII case as duplicates
    pub case_insensitive_names: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            check_references: true,
            report_orphans: true,
            case_insensitive_names: false,
        }
    }
}

impl ValidatorOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for single-threaded validation
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Set whether rooms are validated in parallel
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Set whether dangling Surface references are reported
    pub fn with_reference_check(mut self, enabled: bool) -> Self {
        self.check_references = enabled;
        self
    }

    /// Set whether orphan advisories are reported
    pub fn with_orphan_report(mut self, enabled: bool) -> Self {
        self.report_orphans = enabled;
        self
    }

    /// Set whether name comparison ignores ASCII case
    pub fn with_case_insensitive_names(mut self, enabled: bool) -> Self {
        self.case_insensitive_names = enabled;
        self
    }

    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ValidationError::Config(format!("invalid validator options: {e}")))
    }

    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ValidationError::Config(msg) => {
                ValidationError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbjson_model::ErrorKind;

    #[test]
    fn test_missing_keys_take_defaults() {
        let options = ValidatorOptions::from_toml_str("parallel = false").unwrap();
        assert_eq!(options, ValidatorOptions::sequential());

        let options = ValidatorOptions::from_toml_str("").unwrap();
        assert_eq!(options, ValidatorOptions::default());
    }

    #[test]
    fn test_full_options_file() {
        let options = ValidatorOptions::from_toml_str(
            r#"
            parallel = true
            check_references = false
            report_orphans = false
            case_insensitive_names = true
            "#,
        )
        .unwrap();
        assert_eq!(
            options,
            ValidatorOptions::new()
                .with_reference_check(false)
                .with_orphan_report(false)
                .with_case_insensitive_names(true)
        );
    }

    #[test]
    fn test_bad_options_are_config_errors() {
        let err = ValidatorOptions::from_toml_str("parallel = \"yes\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = ValidatorOptions::from_toml_str("paralel = true").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ValidatorOptions::from_file("/nonexistent/hbjson-validator.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
