//! Animation system: cubic Bezier easing, eased values and a frame-driven
//! controller.
//!
//! The controller owns at most one animation per property key. Starting a new
//! animation for a key cancels whatever was in flight for it, so two
//! transitions never fight over the same property.

use std::fmt;

// =============================================================================
// Cubic Bezier easing
// =============================================================================

/// Tolerance of the x-axis solve.
const SOLVE_EPSILON: f64 = 1e-9;
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;

/// Evaluate the cubic Bezier timing curve through `(0, 0)`, `(x1, y1)`,
/// `(x2, y2)`, `(1, 1)` at progress `t`.
///
/// The curve is parametrized by `s`; this solves `x(s) = t` numerically and
/// returns `y(s)`. `t` is clamped to `[0, 1]`.
///
/// ```
/// use animswitch_core::ease;
///
/// assert_eq!(ease(0.0, 1.0, 0.0, 1.0, 0.0), 0.0);
/// assert_eq!(ease(0.0, 1.0, 0.0, 1.0, 1.0), 1.0);
/// assert!((ease(0.0, 1.0, 0.0, 1.0, 0.125) - 0.875).abs() < 1e-6);
/// ```
#[must_use]
pub fn ease(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    CubicBezier::new(x1, y1, x2, y2).solve(t)
}

/// Cubic Bezier timing curve with fixed end points `(0, 0)` and `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Fast start, long gentle settle. Used by the animated switch.
    pub const SWITCH: Self = Self {
        x1: 0.0,
        y1: 1.0,
        x2: 0.0,
        y2: 1.0,
    };

    /// CSS `ease`.
    pub const EASE: Self = Self {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// CSS `ease-in-out`.
    pub const EASE_IN_OUT: Self = Self {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Create a curve from its two inner control points.
    ///
    /// The x coordinates are clamped to `[0, 1]` so the curve stays a
    /// function of time.
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Control points as `(x1, y1, x2, y2)`.
    #[must_use]
    pub const fn control_points(&self) -> (f64, f64, f64, f64) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Eased output for progress `t` in `[0, 1]`.
    #[must_use]
    pub fn solve(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_parameter(t))
    }

    /// Find the curve parameter `s` with `x(s) == x`.
    fn solve_parameter(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let slope = Self::slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
            if !(0.0..=1.0).contains(&s) {
                break;
            }
        }

        // x(s) is monotone for x1, x2 in [0, 1].
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    /// One axis of the curve at parameter `s`, in Horner form.
    fn sample(p1: f64, p2: f64, s: f64) -> f64 {
        let c = 3.0 * p1;
        let b = 3.0f64.mul_add(p2 - p1, -c);
        let a = 1.0 - c - b;
        (a.mul_add(s, b).mul_add(s, c)) * s
    }

    /// Derivative of one axis at parameter `s`.
    fn slope(p1: f64, p2: f64, s: f64) -> f64 {
        let c = 3.0 * p1;
        let b = 3.0f64.mul_add(p2 - p1, -c);
        let a = 1.0 - c - b;
        (3.0 * a).mul_add(s * s, (2.0 * b).mul_add(s, c))
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::SWITCH
    }
}

// =============================================================================
// Easing
// =============================================================================

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Cubic Bezier timing curve
    Bezier(CubicBezier),
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Bezier(curve) => curve.solve(t),
        }
    }
}

impl From<CubicBezier> for Easing {
    fn from(curve: CubicBezier) -> Self {
        Self::Bezier(curve)
    }
}

// =============================================================================
// EasedValue
// =============================================================================

/// A value interpolated from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct EasedValue {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl EasedValue {
    /// Create new eased animation.
    ///
    /// A non-positive duration finishes immediately at `to`.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Set easing function.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get current value. Returns the end points exactly at rest.
    #[must_use]
    pub fn value(&self) -> f64 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        if t <= 0.0 {
            return self.from;
        }
        (self.to - self.from).mul_add(self.easing.apply(t), self.from)
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Update animation.
    pub fn update(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

// =============================================================================
// AnimationController
// =============================================================================

/// Identifies one started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    /// Raw identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Track<K> {
    key: K,
    handle: AnimationHandle,
    value: EasedValue,
}

/// Frame-driven controller holding at most one animation per key.
#[derive(Debug)]
pub struct AnimationController<K> {
    tracks: Vec<Track<K>>,
    next_handle: u64,
}

impl<K> Default for AnimationController<K> {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            next_handle: 1,
        }
    }
}

impl<K: Copy + PartialEq + fmt::Debug> AnimationController<K> {
    /// Create new controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating `key`, cancelling any animation already running on it.
    pub fn start(&mut self, key: K, value: EasedValue) -> AnimationHandle {
        if let Some(previous) = self.cancel_key(key) {
            log::trace!("animation {previous:?} on {key:?} superseded");
        }
        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.tracks.push(Track { key, handle, value });
        handle
    }

    /// Shorthand for [`AnimationController::start`] with an [`EasedValue`]
    /// built from the arguments.
    pub fn animate(
        &mut self,
        key: K,
        from: f64,
        to: f64,
        duration: f64,
        easing: Easing,
    ) -> AnimationHandle {
        self.start(key, EasedValue::new(from, to, duration).with_easing(easing))
    }

    /// Cancel a specific animation. Returns `false` if it already finished
    /// or was superseded.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.handle != handle);
        self.tracks.len() != before
    }

    /// Cancel whatever is animating `key`.
    pub fn cancel_key(&mut self, key: K) -> Option<AnimationHandle> {
        let index = self.tracks.iter().position(|t| t.key == key)?;
        Some(self.tracks.remove(index).handle)
    }

    /// Whether the animation behind `handle` is still in flight.
    #[must_use]
    pub fn is_running(&self, handle: AnimationHandle) -> bool {
        self.tracks.iter().any(|t| t.handle == handle)
    }

    /// Current value of the animation on `key`.
    #[must_use]
    pub fn get(&self, key: K) -> Option<f64> {
        self.tracks
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.value())
    }

    /// Advance every animation by `dt` seconds and hand each new value to
    /// `apply`. Finished animations deliver their end value once and are then
    /// dropped. Returns the number still running.
    pub fn update(&mut self, dt: f64, mut apply: impl FnMut(K, f64)) -> usize {
        for track in &mut self.tracks {
            track.value.update(dt);
            apply(track.key, track.value.value());
        }
        self.tracks.retain(|t| !t.value.is_complete());
        self.tracks.len()
    }

    /// Whether any animations are active.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Number of active animations.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tracks.len()
    }

    /// Clear all animations.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -------------------------------------------------------------------------
    // Bezier tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_switch_curve_end_points() {
        assert_eq!(ease(0.0, 1.0, 0.0, 1.0, 0.0), 0.0);
        assert_eq!(ease(0.0, 1.0, 0.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_switch_curve_known_values() {
        // With x1 = x2 = 0 the x axis is s^3, so t = 0.125 means s = 0.5.
        assert!((CubicBezier::SWITCH.solve(0.125) - 0.875).abs() < 1e-6);
        // t = 0.001 means s = 0.1: y = 0.271
        assert!((CubicBezier::SWITCH.solve(0.001) - 0.271).abs() < 1e-5);
    }

    #[test]
    fn test_switch_curve_front_loaded() {
        assert!(CubicBezier::SWITCH.solve(0.1) > 0.8);
    }

    #[test]
    fn test_diagonal_curve_is_linear() {
        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            assert!((ease(0.0, 0.0, 1.0, 1.0, t) - t).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = CubicBezier::EASE_IN_OUT;
        assert!((curve.solve(0.5) - 0.5).abs() < 1e-5);
        let a = curve.solve(0.3);
        let b = curve.solve(0.7);
        assert!((a + b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_solve_clamps_input() {
        let curve = CubicBezier::EASE;
        assert_eq!(curve.solve(-1.0), 0.0);
        assert_eq!(curve.solve(2.0), 1.0);
        assert_eq!(curve.solve(f64::NAN), 0.0);
    }

    #[test]
    fn test_new_clamps_x() {
        let curve = CubicBezier::new(-1.0, 2.0, 3.0, -0.5);
        assert_eq!(curve.control_points(), (0.0, 2.0, 1.0, -0.5));
        assert_eq!(CubicBezier::default(), CubicBezier::SWITCH);
    }

    #[test]
    fn test_overshooting_curve() {
        // y may leave [0, 1] between the end points
        let curve = CubicBezier::new(0.3, 1.6, 0.6, 1.4);
        assert!(curve.solve(0.6) > 1.0);
    }

    proptest! {
        #[test]
        fn prop_switch_curve_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(CubicBezier::SWITCH.solve(lo) <= CubicBezier::SWITCH.solve(hi) + 1e-9);
        }

        #[test]
        fn prop_solve_hits_x_target(
            x1 in 0.0f64..=1.0, y1 in -1.0f64..2.0,
            x2 in 0.0f64..=1.0, y2 in -1.0f64..2.0,
            t in 0.001f64..0.999,
        ) {
            let curve = CubicBezier::new(x1, y1, x2, y2);
            let s = curve.solve_parameter(t);
            prop_assert!((CubicBezier::sample(x1, x2, s) - t).abs() < 1e-4);
        }

        #[test]
        fn prop_monotone_controls_give_bounded_output(
            x1 in 0.0f64..=1.0, y1 in 0.0f64..=1.0,
            x2 in 0.0f64..=1.0, y2 in 0.0f64..=1.0,
            t in 0.0f64..=1.0,
        ) {
            let y = ease(x1, y1, x2, y2, t);
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&y));
        }
    }

    // -------------------------------------------------------------------------
    // Easing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_easing_linear() {
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < 0.001);
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_from_bezier() {
        let easing: Easing = CubicBezier::SWITCH.into();
        assert!((easing.apply(0.125) - 0.875).abs() < 1e-6);
    }

    // -------------------------------------------------------------------------
    // EasedValue tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_eased_value_new() {
        let eased = EasedValue::new(0.0, 100.0, 1.0);
        assert!((eased.value() - 0.0).abs() < 0.001);
        assert!(!eased.is_complete());
    }

    #[test]
    fn test_eased_value_update() {
        let mut eased = EasedValue::new(0.0, 100.0, 1.0);
        eased.update(0.5);
        assert!((eased.value() - 50.0).abs() < 0.001);
        assert!((eased.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_eased_value_complete_is_exact() {
        let mut eased = EasedValue::new(0.2, 1.0, 0.5).with_easing(CubicBezier::SWITCH.into());
        eased.update(2.0);
        assert!(eased.is_complete());
        assert_eq!(eased.value(), 1.0);
    }

    #[test]
    fn test_eased_value_zero_duration_jumps() {
        let eased = EasedValue::new(10.0, 70.0, 0.0);
        assert!(eased.is_complete());
        assert_eq!(eased.progress(), 1.0);
        assert_eq!(eased.value(), 70.0);
    }

    #[test]
    fn test_eased_value_ignores_negative_dt() {
        let mut eased = EasedValue::new(0.0, 1.0, 1.0);
        eased.update(-5.0);
        assert_eq!(eased.elapsed, 0.0);
    }

    // -------------------------------------------------------------------------
    // AnimationController tests
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Prop {
        X,
        Alpha,
    }

    #[test]
    fn test_controller_new() {
        let controller: AnimationController<Prop> = AnimationController::new();
        assert!(!controller.is_animating());
        assert_eq!(controller.active_count(), 0);
        assert!(controller.get(Prop::X).is_none());
    }

    #[test]
    fn test_controller_update_applies_values() {
        let mut controller = AnimationController::new();
        controller.animate(Prop::X, 0.0, 100.0, 1.0, Easing::Linear);
        controller.animate(Prop::Alpha, 0.2, 1.0, 1.0, Easing::Linear);

        let mut seen = Vec::new();
        let remaining = controller.update(0.25, |k, v| seen.push((k, v)));
        assert_eq!(remaining, 2);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, Prop::X);
        assert!((seen[0].1 - 25.0).abs() < 1e-9);
        assert!((seen[1].1 - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_controller_finishes_with_end_value() {
        let mut controller = AnimationController::new();
        let handle = controller.animate(Prop::X, 10.0, 70.0, 0.5, CubicBezier::SWITCH.into());

        let mut last = None;
        for _ in 0..40 {
            controller.update(1.0 / 60.0, |_, v| last = Some(v));
        }
        assert_eq!(last, Some(70.0));
        assert!(!controller.is_animating());
        assert!(!controller.is_running(handle));
    }

    #[test]
    fn test_controller_zero_duration_single_jump() {
        let mut controller = AnimationController::new();
        controller.animate(Prop::X, 10.0, 70.0, 0.0, Easing::Linear);
        assert_eq!(controller.get(Prop::X), Some(70.0));

        let mut calls = 0;
        let remaining = controller.update(1.0 / 60.0, |_, v| {
            calls += 1;
            assert_eq!(v, 70.0);
        });
        assert_eq!(calls, 1);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_controller_start_supersedes_same_key() {
        let mut controller = AnimationController::new();
        let first = controller.animate(Prop::X, 0.0, 100.0, 1.0, Easing::Linear);
        let second = controller.animate(Prop::X, 100.0, 0.0, 1.0, Easing::Linear);

        assert_ne!(first, second);
        assert!(!controller.is_running(first));
        assert!(controller.is_running(second));
        assert_eq!(controller.active_count(), 1);

        let mut writes = 0;
        controller.update(0.5, |_, _| writes += 1);
        assert_eq!(writes, 1);
    }

    #[test]
    fn test_controller_keys_are_independent() {
        let mut controller = AnimationController::new();
        let x = controller.animate(Prop::X, 0.0, 1.0, 1.0, Easing::Linear);
        controller.animate(Prop::Alpha, 0.0, 1.0, 1.0, Easing::Linear);
        assert!(controller.is_running(x));
        assert_eq!(controller.active_count(), 2);
    }

    #[test]
    fn test_controller_cancel() {
        let mut controller = AnimationController::new();
        let handle = controller.animate(Prop::X, 0.0, 1.0, 1.0, Easing::Linear);
        assert!(controller.cancel(handle));
        assert!(!controller.cancel(handle));
        assert!(controller.get(Prop::X).is_none());
    }

    #[test]
    fn test_controller_cancel_key_and_clear() {
        let mut controller = AnimationController::new();
        let handle = controller.animate(Prop::X, 0.0, 1.0, 1.0, Easing::Linear);
        assert_eq!(controller.cancel_key(Prop::X), Some(handle));
        assert_eq!(controller.cancel_key(Prop::X), None);

        controller.animate(Prop::X, 0.0, 1.0, 1.0, Easing::Linear);
        controller.animate(Prop::Alpha, 0.0, 1.0, 1.0, Easing::Linear);
        controller.clear();
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_handles_are_unique() {
        let mut controller = AnimationController::new();
        let a = controller.animate(Prop::X, 0.0, 1.0, 1.0, Easing::Linear);
        let b = controller.animate(Prop::Alpha, 0.0, 1.0, 1.0, Easing::Linear);
        assert!(b.id() > a.id());
    }
}
