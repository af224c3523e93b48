//! Draw commands recorded by widgets.
//!
//! A rendering backend only has to understand these primitives.

use crate::{Color, CornerRadius, Rect};
use serde::{Deserialize, Serialize};

/// Box style for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self { fill: Some(color) }
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Apply opacity
    Opacity {
        /// Alpha value (0.0 - 1.0)
        alpha: f32,
        /// Child command
        child: Box<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a rounded rectangle.
    #[must_use]
    pub const fn rounded_rect(bounds: Rect, radius: f32, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style: BoxStyle::fill(color),
        }
    }

    /// Wrap with opacity.
    #[must_use]
    pub fn with_opacity(self, alpha: f32) -> Self {
        Self::Opacity {
            alpha,
            child: Box::new(self),
        }
    }

    /// Innermost shape, skipping opacity wrappers.
    #[must_use]
    pub fn shape(&self) -> &Self {
        match self {
            Self::Opacity { child, .. } => child.shape(),
            Self::Rect { .. } => self,
        }
    }

    /// Product of every opacity wrapper around the shape.
    #[must_use]
    pub fn effective_opacity(&self) -> f32 {
        match self {
            Self::Opacity { alpha, child } => alpha * child.effective_opacity(),
            Self::Rect { .. } => 1.0,
        }
    }

    /// Bounds of the innermost shape.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self.shape() {
            Self::Rect { bounds, .. } => *bounds,
            Self::Opacity { .. } => Rect::default(),
        }
    }
}
