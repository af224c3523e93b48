//! Core types and host contracts for animswitch.
//!
//! This crate provides the foundation the switch widget is built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`CornerRadius`]
//! - Color representation: [`Color`] with hex parsing
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`] and the [`TapRecognizer`]
//! - Rendering: the [`Canvas`] trait, [`DrawCommand`] and [`RecordingCanvas`]
//! - Animation: [`ease`], [`CubicBezier`], [`EasedValue`] and
//!   [`AnimationController`]

pub mod animation;
mod canvas;
pub mod color;
mod constraints;
pub mod draw;
mod event;
mod gesture;
mod geometry;
pub mod widget;

pub use animation::{
    ease, AnimationController, AnimationHandle, CubicBezier, EasedValue, Easing,
};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand};
pub use event::{Event, MouseButton, TouchId};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use gesture::{GestureConfig, TapRecognizer};
pub use widget::{Canvas, LayoutResult, TypeId, Widget};
