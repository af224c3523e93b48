//! Animated on/off switch.
//!
//! The switch draws a pill-shaped track and a round thumb. Changing the
//! checked state slides the thumb to the opposite end and fades the track
//! between 20% and full opacity, both along the [`CubicBezier::SWITCH`]
//! curve.
//!
//! Geometry comes from the first layout: the thumb is two thirds of the
//! track height and sits a quarter of its own size from the track edge.

use crate::style::SwitchStyle;
use animswitch_core::{
    AnimationController, Canvas, Color, Constraints, CubicBezier, Easing, Event, LayoutResult,
    Rect, Size, TapRecognizer, TypeId, Widget,
};
use std::any::Any;
use std::fmt;

/// Track opacity while unchecked.
pub const TRACK_OPACITY_OFF: f32 = 0.2;
/// Track opacity while checked.
pub const TRACK_OPACITY_ON: f32 = 1.0;

/// Message emitted when a tap changes the checked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchChanged {
    /// The new checked state
    pub checked: bool,
}

/// Checked-change listener.
pub type CheckedChangeFn = Box<dyn FnMut(bool) + Send + Sync>;

/// When the checked-change listener is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// As soon as the state flips, before any animation frame.
    #[default]
    Immediate,
    /// Once the transition's animations finish. Rapid flips coalesce, and a
    /// settled value equal to the last one delivered is not reported.
    OnSettle,
}

/// Logical switch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Unchecked
    Closed,
    /// Checked
    Open,
}

impl SwitchState {
    /// Whether this is the checked state.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<bool> for SwitchState {
    fn from(checked: bool) -> Self {
        if checked {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

/// A move between the two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Closed to open
    Open,
    /// Open to closed
    Close,
}

impl Transition {
    /// The transition from `from` to `to`, or `None` when they are equal.
    #[must_use]
    pub const fn between(from: SwitchState, to: SwitchState) -> Option<Self> {
        match (from, to) {
            (SwitchState::Closed, SwitchState::Open) => Some(Self::Open),
            (SwitchState::Open, SwitchState::Closed) => Some(Self::Close),
            _ => None,
        }
    }

    /// State reached at the end of the transition.
    #[must_use]
    pub const fn target(self) -> SwitchState {
        match self {
            Self::Open => SwitchState::Open,
            Self::Close => SwitchState::Closed,
        }
    }

    /// Track opacity at the end of the transition.
    #[must_use]
    pub const fn target_opacity(self) -> f32 {
        match self {
            Self::Open => TRACK_OPACITY_ON,
            Self::Close => TRACK_OPACITY_OFF,
        }
    }
}

/// Sizes derived from the laid-out bounds, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Thumb diameter: `floor(height / 3 * 2)`
    pub thumb_size: u32,
    /// Gap between thumb and track edge: `floor(thumb_size / 4)`
    pub left_margin: u32,
    /// Track width
    pub track_width: u32,
    /// Track height
    pub track_height: u32,
}

impl Geometry {
    /// Derive geometry from a track size. Negative sizes resolve to zero.
    #[must_use]
    pub fn resolve(width: f32, height: f32) -> Self {
        let thumb_size = (f64::from(height) / 3.0 * 2.0) as u32;
        Self {
            thumb_size,
            left_margin: thumb_size / 4,
            track_width: width as u32,
            track_height: height as u32,
        }
    }

    /// Thumb offset from the track's left edge when resting in `state`.
    #[must_use]
    pub fn rest_offset(&self, state: SwitchState) -> f32 {
        match state {
            SwitchState::Open => {
                self.track_width as f32 - self.thumb_size as f32 - self.left_margin as f32
            }
            SwitchState::Closed => self.left_margin as f32,
        }
    }

    /// Corner radius of the thumb.
    #[must_use]
    pub fn thumb_radius(&self) -> f32 {
        self.thumb_size as f32 / 2.0
    }

    /// Corner radius of the track.
    #[must_use]
    pub fn track_radius(&self) -> f32 {
        self.track_height as f32 / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchProperty {
    ThumbOffset,
    TrackOpacity,
}

/// Animated two-state switch.
pub struct AnimSwitch {
    checked: bool,
    style: SwitchStyle,
    notify_mode: NotifyMode,
    preferred_size: Size,
    bounds: Rect,
    geometry: Option<Geometry>,
    thumb_offset: f32,
    track_opacity: f32,
    animations: AnimationController<SwitchProperty>,
    tap: TapRecognizer,
    on_change: Option<CheckedChangeFn>,
    /// Value waiting for the current transition to settle (`OnSettle` only)
    pending: Option<bool>,
    last_notified: bool,
    test_id_value: Option<String>,
}

impl Default for AnimSwitch {
    fn default() -> Self {
        Self::with_style(SwitchStyle::default())
    }
}

impl fmt::Debug for AnimSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimSwitch")
            .field("checked", &self.checked)
            .field("style", &self.style)
            .field("notify_mode", &self.notify_mode)
            .field("bounds", &self.bounds)
            .field("geometry", &self.geometry)
            .field("thumb_offset", &self.thumb_offset)
            .field("track_opacity", &self.track_opacity)
            .field("animating", &self.animations.is_animating())
            .field("has_listener", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

impl AnimSwitch {
    /// Preferred size used by `measure` unless overridden.
    pub const DEFAULT_SIZE: Size = Size::new(52.0, 32.0);

    /// Create an unchecked switch with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unchecked switch with the given style.
    #[must_use]
    pub fn with_style(style: SwitchStyle) -> Self {
        Self {
            checked: false,
            style,
            notify_mode: NotifyMode::default(),
            preferred_size: Self::DEFAULT_SIZE,
            bounds: Rect::default(),
            geometry: None,
            thumb_offset: 0.0,
            track_opacity: TRACK_OPACITY_OFF,
            animations: AnimationController::new(),
            tap: TapRecognizer::new(),
            on_change: None,
            pending: None,
            last_notified: false,
            test_id_value: None,
        }
    }

    // ----- builders -----

    /// Set the initial checked state without animating or notifying.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self.last_notified = checked;
        self.track_opacity = if checked {
            TRACK_OPACITY_ON
        } else {
            TRACK_OPACITY_OFF
        };
        if let Some(geometry) = self.geometry {
            self.thumb_offset = geometry.rest_offset(self.state());
        }
        self
    }

    /// Set the thumb color.
    #[must_use]
    pub const fn thumb_color(mut self, color: Color) -> Self {
        self.style.thumb_color = color;
        self
    }

    /// Set the track color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.style.track_color = color;
        self
    }

    /// Set the transition duration in milliseconds.
    #[must_use]
    pub const fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.style.duration_ms = duration_ms;
        self
    }

    /// Set when the listener is invoked.
    #[must_use]
    pub const fn notify_mode(mut self, mode: NotifyMode) -> Self {
        self.notify_mode = mode;
        self
    }

    /// Set the size requested from layout.
    #[must_use]
    pub fn preferred_size(mut self, width: f32, height: f32) -> Self {
        self.preferred_size = Size::new(width.max(0.0), height.max(0.0));
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set the checked-change listener.
    #[must_use]
    pub fn on_checked_change(mut self, listener: impl FnMut(bool) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    // ----- setters -----

    /// Change the thumb color. Takes effect at the next paint.
    pub fn set_thumb_color(&mut self, color: Color) {
        self.style.thumb_color = color;
    }

    /// Change the track color. Takes effect at the next paint.
    pub fn set_track_color(&mut self, color: Color) {
        self.style.track_color = color;
    }

    /// Change the transition duration. Transitions already running keep
    /// their original duration.
    pub fn set_animation_duration(&mut self, duration_ms: u32) {
        self.style.duration_ms = duration_ms;
    }

    /// Change when the listener is invoked. A value still waiting to settle
    /// is delivered right away when switching to [`NotifyMode::Immediate`].
    pub fn set_notify_mode(&mut self, mode: NotifyMode) {
        self.notify_mode = mode;
        if mode == NotifyMode::Immediate {
            if let Some(checked) = self.pending.take() {
                self.deliver(checked);
            }
        }
    }

    /// Replace the checked-change listener.
    pub fn set_on_checked_change(&mut self, listener: impl FnMut(bool) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Remove the checked-change listener.
    pub fn clear_on_checked_change(&mut self) {
        self.on_change = None;
    }

    // ----- state -----

    /// Get the checked state.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Get the logical state.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        SwitchState::from(self.checked)
    }

    /// Set the checked state without a smooth transition.
    pub fn set_checked(&mut self, checked: bool) {
        self.set_checked_with(checked, false);
    }

    /// Set the checked state.
    ///
    /// Does nothing when `checked` equals the current state. Otherwise the
    /// state flips at once, the listener is notified (per [`NotifyMode`]),
    /// and the thumb and track animate over the configured duration when
    /// `smooth` is set, or jump to their resting values when it is not.
    pub fn set_checked_with(&mut self, checked: bool, smooth: bool) {
        let Some(transition) = Transition::between(self.state(), SwitchState::from(checked))
        else {
            return;
        };
        let duration_ms = if smooth { self.style.duration_ms } else { 0 };
        log::debug!("switch {transition:?} over {duration_ms} ms");

        self.checked = checked;
        match self.notify_mode {
            NotifyMode::Immediate => self.deliver(checked),
            NotifyMode::OnSettle => self.pending = Some(checked),
        }
        self.start_transition(transition, duration_ms);
    }

    /// Flip the checked state with a smooth transition.
    pub fn toggle(&mut self) {
        self.set_checked_with(!self.checked, true);
    }

    // ----- geometry -----

    /// Resolve geometry from the first known size. Later calls are ignored.
    pub fn on_bounds_resolved(&mut self, width: f32, height: f32) {
        if let Some(geometry) = self.geometry {
            log::debug!("switch geometry already resolved as {geometry:?}");
            return;
        }
        let geometry = Geometry::resolve(width, height);
        log::debug!("switch geometry resolved: {geometry:?}");
        self.thumb_offset = geometry.rest_offset(self.state());
        self.geometry = Some(geometry);
    }

    /// Resolved geometry, once laid out.
    #[must_use]
    pub const fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Current thumb offset from the track's left edge.
    #[must_use]
    pub const fn thumb_offset(&self) -> f32 {
        self.thumb_offset
    }

    /// Current track opacity.
    #[must_use]
    pub const fn track_opacity(&self) -> f32 {
        self.track_opacity
    }

    /// Where the thumb is drawn, once laid out.
    #[must_use]
    pub fn thumb_rect(&self) -> Option<Rect> {
        let geometry = self.geometry?;
        let size = geometry.thumb_size as f32;
        Some(Rect::new(
            self.bounds.x + self.thumb_offset,
            self.bounds.y + (self.bounds.height - size) / 2.0,
            size,
            size,
        ))
    }

    /// Whether a transition is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    /// Get the style.
    #[must_use]
    pub const fn style(&self) -> &SwitchStyle {
        &self.style
    }

    /// Get the notify mode.
    #[must_use]
    pub const fn get_notify_mode(&self) -> NotifyMode {
        self.notify_mode
    }

    // ----- internals -----

    fn start_transition(&mut self, transition: Transition, duration_ms: u32) {
        let duration = f64::from(duration_ms) / 1000.0;
        let easing = Easing::Bezier(CubicBezier::SWITCH);

        self.animations.animate(
            SwitchProperty::TrackOpacity,
            f64::from(self.track_opacity),
            f64::from(transition.target_opacity()),
            duration,
            easing,
        );
        if let Some(geometry) = self.geometry {
            self.animations.animate(
                SwitchProperty::ThumbOffset,
                f64::from(self.thumb_offset),
                f64::from(geometry.rest_offset(transition.target())),
                duration,
                easing,
            );
        } else {
            self.animations.cancel_key(SwitchProperty::ThumbOffset);
        }

        // First frame right away; a zero-length transition finishes here.
        self.advance(0.0);
    }

    fn advance(&mut self, dt: f64) -> bool {
        let thumb_offset = &mut self.thumb_offset;
        let track_opacity = &mut self.track_opacity;
        let running = self.animations.update(dt, |property, value| match property {
            SwitchProperty::ThumbOffset => *thumb_offset = value as f32,
            SwitchProperty::TrackOpacity => *track_opacity = value as f32,
        });
        if running == 0 {
            if let Some(checked) = self.pending.take() {
                self.deliver(checked);
            }
        }
        running > 0
    }

    fn deliver(&mut self, checked: bool) {
        if self.notify_mode == NotifyMode::OnSettle && checked == self.last_notified {
            log::trace!("switch settled on already reported value {checked}");
            return;
        }
        self.last_notified = checked;
        if let Some(listener) = self.on_change.as_mut() {
            listener(checked);
        }
    }
}

impl Widget for AnimSwitch {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.preferred_size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        if self.geometry.is_none() {
            self.on_bounds_resolved(bounds.width, bounds.height);
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let Some(geometry) = self.geometry else {
            return;
        };

        canvas.push_opacity(self.track_opacity);
        canvas.fill_rounded_rect(self.bounds, geometry.track_radius(), self.style.track_color);
        canvas.pop_opacity();

        if let Some(thumb) = self.thumb_rect() {
            canvas.fill_rounded_rect(thumb, geometry.thumb_radius(), self.style.thumb_color);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let tapped = match event {
            Event::GestureTap { position } => self.bounds.contains_point(position),
            other => self.tap.process(other, self.bounds).is_some(),
        };
        if !tapped {
            return None;
        }
        self.toggle();
        Some(Box::new(SwitchChanged {
            checked: self.checked,
        }))
    }

    fn tick(&mut self, dt: f64) -> bool {
        if !self.animations.is_animating() {
            return false;
        }
        self.advance(dt)
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
