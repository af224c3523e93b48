//! Test harness driving a single widget the way a host would.
//!
//! The harness owns the widget, lays it out on first use, turns pointer
//! gestures into event sequences, and advances time in whole frames.

use animswitch_core::{
    Constraints, Event, MouseButton, Point, Rect, RecordingCanvas, TouchId, Widget,
};
use std::any::Any;
use std::collections::VecDeque;

/// Frame length used by [`Harness::tick`], in milliseconds.
pub const FRAME_MS: u64 = 16;

/// Upper bound on frames run by [`Harness::settle`].
pub const MAX_SETTLE_FRAMES: u64 = 10_000;

/// Test harness for interacting with a widget.
pub struct Harness<W: Widget> {
    /// Widget under test
    root: W,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Current viewport
    viewport: Rect,
    laid_out: bool,
    /// Messages returned by the widget, in order
    messages: Vec<Box<dyn Any + Send>>,
    elapsed_ms: u64,
    next_touch: u32,
}

impl<W: Widget> Harness<W> {
    /// Create a new harness around `root`.
    pub fn new(root: W) -> Self {
        Self {
            root,
            event_queue: VecDeque::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
            laid_out: false,
            messages: Vec::new(),
            elapsed_ms: 0,
            next_touch: 1,
        }
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.laid_out = false;
        self
    }

    // === Access ===

    /// The widget under test.
    pub fn widget(&mut self) -> &W {
        self.ensure_layout();
        &self.root
    }

    /// Mutable access to the widget under test.
    pub fn widget_mut(&mut self) -> &mut W {
        self.ensure_layout();
        &mut self.root
    }

    /// Bounds the widget was laid out with.
    pub fn bounds(&mut self) -> Rect {
        self.ensure_layout();
        self.root.bounds()
    }

    /// Simulated time since the harness was created.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    // === Event Simulation ===

    /// Deliver a raw event.
    pub fn send(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    /// Simulate a left click at a point.
    pub fn click_at(&mut self, x: f32, y: f32) -> &mut Self {
        let position = Point::new(x, y);
        self.event_queue.push_back(Event::MouseMove { position });
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Simulate a left click at the widget's center.
    pub fn click_center(&mut self) -> &mut Self {
        let center = self.bounds().center();
        self.click_at(center.x, center.y)
    }

    /// Simulate a single-finger tap at a point.
    pub fn tap_at(&mut self, x: f32, y: f32) -> &mut Self {
        let id = self.touch_id();
        let position = Point::new(x, y);
        self.event_queue
            .push_back(Event::TouchStart { id, position });
        self.event_queue.push_back(Event::TouchEnd { id, position });
        self.process_events();
        self
    }

    /// Simulate a touch that starts at `from` and lifts at `to`.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) -> &mut Self {
        let id = self.touch_id();
        let start = Point::new(from.0, from.1);
        let end = Point::new(to.0, to.1);
        self.event_queue.push_back(Event::TouchStart {
            id,
            position: start,
        });
        self.event_queue
            .push_back(Event::TouchMove { id, position: end });
        self.event_queue
            .push_back(Event::TouchEnd { id, position: end });
        self.process_events();
        self
    }

    // === Time ===

    /// Advance simulated time by `ms`, in [`FRAME_MS`] frames. A trailing
    /// partial frame is delivered as a shorter tick.
    pub fn tick(&mut self, ms: u64) -> &mut Self {
        self.ensure_layout();
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(FRAME_MS);
            self.frame(step);
            remaining -= step;
        }
        self
    }

    /// Run frames until the widget stops asking for them.
    ///
    /// # Panics
    ///
    /// Panics if the widget is still animating after [`MAX_SETTLE_FRAMES`].
    pub fn settle(&mut self) -> &mut Self {
        self.ensure_layout();
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.frame(FRAME_MS) {
                return self;
            }
        }
        panic!("widget still animating after {MAX_SETTLE_FRAMES} frames");
    }

    // === Rendering ===

    /// Paint the widget into a fresh recording canvas.
    pub fn paint(&mut self) -> RecordingCanvas {
        self.ensure_layout();
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    // === Messages ===

    /// All messages the widget has returned so far.
    #[must_use]
    pub fn messages(&self) -> &[Box<dyn Any + Send>] {
        &self.messages
    }

    /// Messages of type `M`, in order.
    #[must_use]
    pub fn messages_of<M: Any + Clone>(&self) -> Vec<M> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<M>())
            .cloned()
            .collect()
    }

    /// Drain the collected messages.
    pub fn take_messages(&mut self) -> Vec<Box<dyn Any + Send>> {
        std::mem::take(&mut self.messages)
    }

    // === Assertions ===

    /// Assert the number of messages collected so far.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_message_count(&self, expected: usize) -> &Self {
        let actual = self.messages.len();
        assert_eq!(
            actual, expected,
            "Expected {expected} messages but found {actual}"
        );
        self
    }

    // === Internal ===

    fn ensure_layout(&mut self) {
        if self.laid_out {
            return;
        }
        let size = self
            .root
            .measure(Constraints::loose(self.viewport.size()));
        self.root
            .layout(Rect::from_origin_size(self.viewport.origin(), size));
        self.laid_out = true;
    }

    fn process_events(&mut self) {
        self.ensure_layout();
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.root.event(&event) {
                self.messages.push(message);
            }
        }
    }

    fn frame(&mut self, ms: u64) -> bool {
        self.elapsed_ms += ms;
        self.root.tick(ms as f64 / 1000.0)
    }

    fn touch_id(&mut self) -> TouchId {
        let id = TouchId::new(self.next_touch);
        self.next_touch += 1;
        id
    }
}
