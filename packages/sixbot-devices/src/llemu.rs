//! Brain screen console (LLEMU).
//!
//! The legacy LCD emulator draws eight lines of text on the brain's screen along with three
//! touchable buttons underneath them.

use bitflags::bitflags;
use snafu::{Snafu, ensure};

/// Number of text lines on the console.
pub const LINES: u8 = 8;

/// Maximum number of characters drawn on one text line.
pub const MAX_LINE_LENGTH: usize = 32;

bitflags! {
    /// Console buttons held at the time of a read.
    ///
    /// The bit layout matches the PROS `lcd_read_buttons` mask.
    #[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
    pub struct LcdButtons: u8 {
        /// Left button.
        const LEFT = 1 << 2;
        /// Center button.
        const CENTER = 1 << 1;
        /// Right button.
        const RIGHT = 1 << 0;
    }
}

/// A text console with three buttons.
pub trait Llemu {
    /// Replaces the contents of `line` with `text`.
    ///
    /// # Errors
    ///
    /// - A [`LlemuError::InvalidLine`] error is returned if `line` is not less than [`LINES`].
    /// - A [`LlemuError::LineTooLong`] error is returned if `text` is longer than
    ///   [`MAX_LINE_LENGTH`].
    fn set_text(&mut self, line: u8, text: &str) -> Result<(), LlemuError>;

    /// Clears the contents of `line`.
    ///
    /// # Errors
    ///
    /// A [`LlemuError::InvalidLine`] error is returned if `line` is not less than [`LINES`].
    fn clear_line(&mut self, line: u8) -> Result<(), LlemuError>;

    /// Returns the set of buttons currently held.
    fn read_buttons(&self) -> LcdButtons;
}

/// Checks that a write to `line` of `text` fits on the console.
///
/// # Errors
///
/// See [`Llemu::set_text`].
pub fn validate_write(line: u8, text: &str) -> Result<(), LlemuError> {
    ensure!(line < LINES, InvalidLineSnafu { line });
    ensure!(
        text.chars().count() <= MAX_LINE_LENGTH,
        LineTooLongSnafu { line }
    );
    Ok(())
}

/// Tracks console buttons across reads to detect presses.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct LcdButtonState {
    prev: LcdButtons,
    current: LcdButtons,
}

impl LcdButtonState {
    /// Creates a tracker that has seen no buttons held.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prev: LcdButtons::empty(),
            current: LcdButtons::empty(),
        }
    }

    /// Records a new sample, shifting the current sample into the previous slot.
    pub const fn update(&mut self, sample: LcdButtons) {
        self.prev = self.current;
        self.current = sample;
    }

    /// Returns the most recent sample.
    #[must_use]
    pub const fn current(&self) -> LcdButtons {
        self.current
    }

    /// Returns `true` if `button` was released in the previous sample, but is now held.
    #[must_use]
    pub const fn is_now_pressed(&self, button: LcdButtons) -> bool {
        !self.prev.contains(button) && self.current.contains(button)
    }
}

#[derive(Debug, Snafu)]
/// Errors that can occur when writing to the console.
pub enum LlemuError {
    /// The line index is past the bottom of the console.
    #[snafu(display("line {line} does not exist on the console"))]
    InvalidLine {
        /// The rejected line index.
        line: u8,
    },

    /// The text does not fit on one line.
    #[snafu(display("text for line {line} is wider than the console"))]
    LineTooLong {
        /// The line that was being written.
        line: u8,
    },
}
