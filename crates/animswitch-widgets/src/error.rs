//! Error types for switch style loading.

use animswitch_core::ColorParseError;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while reading a [`crate::SwitchStyle`] from configuration.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The YAML document could not be parsed or had a bad field.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A color attribute was not a valid hex color.
    #[error("invalid color `{value}` for '{name}': {source}")]
    Color {
        /// Attribute name as given
        name: String,
        /// Raw value as given
        value: String,
        /// Underlying parse failure
        source: ColorParseError,
    },

    /// The duration attribute was not a non-negative integer.
    #[error("invalid duration `{value}`: {source}")]
    Duration {
        /// Raw value as given
        value: String,
        /// Underlying parse failure
        source: ParseIntError,
    },
}
