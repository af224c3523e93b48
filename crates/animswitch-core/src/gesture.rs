//! Tap recognition from raw mouse and touch events.
//!
//! A tap is a press that starts inside a widget's bounds and is released
//! without the pointer ever leaving those bounds (grown by a slop margin).
//! This mirrors the click semantics of touch toolkits: dragging off the
//! control aborts the tap, wobbling a few pixels does not.

use crate::event::{Event, MouseButton, TouchId};
use crate::geometry::{Point, Rect};

/// Configuration for tap recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Distance the pointer may stray outside the bounds before the tap is
    /// abandoned (in pixels).
    pub tap_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { tap_slop: 10.0 }
    }
}

/// Which pointer owns the press in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressSource {
    Mouse,
    Touch(TouchId),
}

#[derive(Debug, Clone, Copy)]
struct Press {
    source: PressSource,
    start: Point,
}

/// Single-pointer tap recognizer.
#[derive(Debug, Default)]
pub struct TapRecognizer {
    config: GestureConfig,
    press: Option<Press>,
}

impl TapRecognizer {
    /// Create a recognizer with the default slop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recognizer with custom config.
    #[must_use]
    pub const fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a press is being tracked.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Feed an event. Returns `Event::GestureTap` when a tap completes.
    pub fn process(&mut self, event: &Event, bounds: Rect) -> Option<Event> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                self.begin(PressSource::Mouse, *position, bounds);
                None
            }
            Event::TouchStart { id, position } => {
                self.begin(PressSource::Touch(*id), *position, bounds);
                None
            }
            Event::MouseMove { position } => {
                self.track(PressSource::Mouse, *position, bounds);
                None
            }
            Event::TouchMove { id, position } => {
                self.track(PressSource::Touch(*id), *position, bounds);
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => self.finish(PressSource::Mouse, *position, bounds),
            Event::TouchEnd { id, position } => {
                self.finish(PressSource::Touch(*id), *position, bounds)
            }
            Event::TouchCancel { id } => {
                if self.owned_by(PressSource::Touch(*id)) {
                    self.press = None;
                }
                None
            }
            _ => None,
        }
    }

    /// Drop any press in progress.
    pub fn reset(&mut self) {
        self.press = None;
    }

    fn begin(&mut self, source: PressSource, position: Point, bounds: Rect) {
        // Extra pointers while one is down do not restart the press.
        if self.press.is_none() && bounds.contains_point(&position) {
            self.press = Some(Press {
                source,
                start: position,
            });
        }
    }

    fn track(&mut self, source: PressSource, position: Point, bounds: Rect) {
        if self.owned_by(source) && !self.within_slop(position, bounds) {
            self.press = None;
        }
    }

    fn finish(&mut self, source: PressSource, position: Point, bounds: Rect) -> Option<Event> {
        if !self.owned_by(source) {
            return None;
        }
        let press = self.press.take()?;
        if self.within_slop(position, bounds) {
            Some(Event::GestureTap {
                position: press.start,
            })
        } else {
            None
        }
    }

    fn owned_by(&self, source: PressSource) -> bool {
        self.press.is_some_and(|p| p.source == source)
    }

    fn within_slop(&self, position: Point, bounds: Rect) -> bool {
        let slop = self.config.tap_slop;
        let grown = Rect::new(
            bounds.x - slop,
            bounds.y - slop,
            2.0f32.mul_add(slop, bounds.width),
            2.0f32.mul_add(slop, bounds.height),
        );
        grown.contains_point(&position)
    }
}
