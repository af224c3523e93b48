//! Switch styling: colors and transition duration.
//!
//! A [`SwitchStyle`] can be built in code, read from YAML, or read from a list
//! of `(name, value)` attribute pairs as a layout inflater would supply them.
//!
//! ```yaml
//! thumb_color: "#F0F5FF"
//! track_color: "#121F3A"
//! duration_ms: 500
//! ```

use crate::error::StyleError;
use animswitch_core::Color;
use serde::{Deserialize, Serialize};

/// Visual style of an [`crate::AnimSwitch`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchStyle {
    /// Thumb fill color
    #[serde(with = "animswitch_core::color::hex", alias = "thumbColor")]
    pub thumb_color: Color,
    /// Track fill color, drawn under the animated track opacity
    #[serde(
        with = "animswitch_core::color::hex",
        alias = "switchBackgroundColor"
    )]
    pub track_color: Color,
    /// Length of a smooth transition in milliseconds
    #[serde(alias = "duration")]
    pub duration_ms: u32,
}

impl Default for SwitchStyle {
    fn default() -> Self {
        Self {
            thumb_color: Self::DEFAULT_THUMB_COLOR,
            track_color: Self::DEFAULT_TRACK_COLOR,
            duration_ms: Self::DEFAULT_DURATION_MS,
        }
    }
}

impl SwitchStyle {
    /// `#F0F5FF`
    pub const DEFAULT_THUMB_COLOR: Color = Color {
        r: 240.0 / 255.0,
        g: 245.0 / 255.0,
        b: 1.0,
        a: 1.0,
    };

    /// `#121F3A`
    pub const DEFAULT_TRACK_COLOR: Color = Color {
        r: 18.0 / 255.0,
        g: 31.0 / 255.0,
        b: 58.0 / 255.0,
        a: 1.0,
    };

    /// Default transition length.
    pub const DEFAULT_DURATION_MS: u32 = 500;

    /// Create the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the thumb color.
    #[must_use]
    pub const fn with_thumb_color(mut self, color: Color) -> Self {
        self.thumb_color = color;
        self
    }

    /// Set the track color.
    #[must_use]
    pub const fn with_track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Set the transition duration.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Transition duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.duration_ms) / 1000.0
    }

    /// Parse a style from YAML. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Yaml`] if the document is malformed or a field
    /// has the wrong shape.
    pub fn from_yaml(yaml: &str) -> Result<Self, StyleError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse a style from YAML, falling back to the defaults on any error.
    #[must_use]
    pub fn from_yaml_or_default(yaml: &str) -> Self {
        Self::from_yaml(yaml).unwrap_or_else(|e| {
            log::warn!("switch style rejected, using defaults: {e}");
            Self::default()
        })
    }

    /// Serialize the style to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Yaml`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, StyleError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Build a style from `(name, value)` attribute pairs.
    ///
    /// Both the field names and the `thumbColor` / `switchBackgroundColor` /
    /// `duration` spellings are accepted. Unknown names are ignored and
    /// absent ones keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Color`] or [`StyleError::Duration`] for the
    /// first value that does not parse.
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, StyleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut style = Self::default();
        for (name, value) in attrs {
            match name {
                "thumb_color" | "thumbColor" => style.thumb_color = parse_color(name, value)?,
                "track_color" | "switchBackgroundColor" => {
                    style.track_color = parse_color(name, value)?;
                }
                "duration_ms" | "duration" => {
                    style.duration_ms =
                        value
                            .trim()
                            .parse()
                            .map_err(|source| StyleError::Duration {
                                value: value.to_string(),
                                source,
                            })?;
                }
                _ => log::debug!("ignoring unknown switch attribute '{name}'"),
            }
        }
        Ok(style)
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color, StyleError> {
    Color::from_hex(value).map_err(|source| StyleError::Color {
        name: name.to_string(),
        value: value.to_string(),
        source,
    })
}
