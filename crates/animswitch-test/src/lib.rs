//! Testing harness for animswitch widgets.
//!
//! [`Harness`] owns a widget, lays it out inside a viewport, simulates
//! clicks and taps, and steps time in 16 ms frames:
//!
//! ```ignore
//! let mut harness = Harness::new(AnimSwitch::new()).viewport(400.0, 300.0);
//! harness.click_center().settle();
//! assert!(harness.widget().is_checked());
//! ```

mod harness;

pub use harness::{Harness, FRAME_MS, MAX_SETTLE_FRAMES};
