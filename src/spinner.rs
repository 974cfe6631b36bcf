use crate::messages::{ColoredMessage, get_push_message};
use colored::Color;
use unicode_width::UnicodeWidthStr;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone)]
pub struct SpinnerState {
    current_frame: usize,
    message: ColoredMessage,
}

impl Default for SpinnerState {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerState {
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            message: get_push_message().clone(),
        }
    }

    /// Advance one frame; returns the frame, the message, its color and the
    /// display width of the whole line.
    pub fn tick(&mut self) -> (String, String, Color, usize) {
        let frame = FRAMES.get(self.current_frame).copied().unwrap_or("-");
        self.current_frame = (self.current_frame + 1) % FRAMES.len();

        let spinner_with_space = format!("{frame} ");
        let width = spinner_with_space.width() + self.message.text.width();

        (
            spinner_with_space,
            self.message.text.clone(),
            self.message.color,
            width,
        )
    }
}
