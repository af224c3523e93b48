//! Animated switch widget for animswitch.
//!
//! [`AnimSwitch`] is a two-state toggle whose thumb slides and whose track
//! fades between states. Its colors and transition length come from a
//! [`SwitchStyle`], which can also be loaded from YAML.

pub mod anim_switch;
mod error;
pub mod style;

pub use anim_switch::{
    AnimSwitch, CheckedChangeFn, Geometry, NotifyMode, SwitchChanged, SwitchState, Transition,
    TRACK_OPACITY_OFF, TRACK_OPACITY_ON,
};
pub use error::StyleError;
pub use style::SwitchStyle;
