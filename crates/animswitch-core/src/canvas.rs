//! Canvas implementations for rendering.

use crate::draw::DrawCommand;
use crate::widget::Canvas;
use crate::{Color, Rect};

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (send commands to a real backend)
///
/// Commands issued inside an opacity group are wrapped in a single
/// [`DrawCommand::Opacity`] carrying the product of all open groups.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    opacity_stack: Vec<f32>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.opacity_stack.clear();
    }

    /// Current combined opacity (1.0 outside any group).
    #[must_use]
    pub fn current_opacity(&self) -> f32 {
        self.opacity_stack.iter().product()
    }

    /// Get the opacity stack depth.
    #[must_use]
    pub fn opacity_depth(&self) -> usize {
        self.opacity_stack.len()
    }

    /// Add a raw draw command, applying the open opacity groups.
    pub fn add_command(&mut self, command: DrawCommand) {
        let alpha = self.current_opacity();
        if self.opacity_stack.is_empty() {
            self.commands.push(command);
        } else {
            self.commands.push(command.with_opacity(alpha));
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.add_command(DrawCommand::filled_rect(rect, color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.add_command(DrawCommand::rounded_rect(rect, radius, color));
    }

    fn push_opacity(&mut self, alpha: f32) {
        self.opacity_stack.push(alpha.clamp(0.0, 1.0));
    }

    fn pop_opacity(&mut self) {
        self.opacity_stack.pop();
    }
}
