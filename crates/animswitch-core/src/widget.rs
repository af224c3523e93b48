//! Widget trait and the host-facing contracts around it.
//!
//! # Widget Lifecycle
//!
//! The host drives every widget through the same cycle, all on one thread:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: accept the final bounds chosen by the parent
//! 3. **Event**: react to input, optionally emitting a message
//! 4. **Tick**: advance animations by the frame delta
//! 5. **Paint**: emit draw commands onto a [`Canvas`]
//!
//! # Examples
//!
//! ```
//! use animswitch_core::TypeId;
//!
//! let string_type = TypeId::of::<String>();
//! let i32_type = TypeId::of::<i32>();
//! assert_ne!(string_type, i32_type);
//! ```

use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Rect, Size};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Accept the bounds allocated by the parent.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Generate draw commands for rendering.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events. A returned message is forwarded to the app.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Advance animations by `dt` seconds.
    ///
    /// Returns `true` while the widget still needs frames.
    fn tick(&mut self, _dt: f64) -> bool {
        false
    }

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: crate::Color);

    /// Draw a filled rectangle with uniformly rounded corners.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: crate::Color);

    /// Multiply the opacity of everything drawn until the matching
    /// [`Canvas::pop_opacity`].
    fn push_opacity(&mut self, alpha: f32);

    /// Pop the opacity group.
    fn pop_opacity(&mut self);
}
