//! Brain screen status.
//!
//! Line 0 mirrors the three console buttons, line 1 carries a greeting, and the center button
//! toggles a message on line 2.

use alloc::format;

use sixbot_devices::llemu::{LcdButtonState, LcdButtons, Llemu, LlemuError};

/// Line showing which console buttons are held.
pub const BUTTON_STATUS_LINE: u8 = 0;
/// Line holding the greeting written during initialization.
pub const GREETING_LINE: u8 = 1;
/// Line toggled by the center button.
pub const TOGGLE_LINE: u8 = 2;

/// Text written to [`GREETING_LINE`].
pub const GREETING: &str = "Hello PROS User!";
/// Text shown on [`TOGGLE_LINE`] while the toggle is on.
pub const PRESSED_MESSAGE: &str = "I was pressed!";

/// Toggle state behind the center console button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CenterToggle {
    pressed: bool,
}

impl CenterToggle {
    /// Whether the message is currently shown.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.pressed
    }

    /// Flips the toggle and redraws [`TOGGLE_LINE`].
    ///
    /// # Errors
    ///
    /// Returns an error if the console rejects the write.
    pub fn toggle(&mut self, lcd: &mut impl Llemu) -> Result<(), LlemuError> {
        self.pressed = !self.pressed;

        if self.pressed {
            lcd.set_text(TOGGLE_LINE, PRESSED_MESSAGE)
        } else {
            lcd.clear_line(TOGGLE_LINE)
        }
    }
}

/// Formats the console buttons as `"{left} {center} {right}"`, each `0` or `1`.
#[must_use]
pub fn button_status(buttons: LcdButtons) -> alloc::string::String {
    let bit = |button| u8::from(buttons.contains(button));

    format!(
        "{} {} {}",
        bit(LcdButtons::LEFT),
        bit(LcdButtons::CENTER),
        bit(LcdButtons::RIGHT)
    )
}

/// The brain screen and everything drawn on it.
#[derive(Debug)]
pub struct StatusDisplay<L> {
    lcd: L,
    buttons: LcdButtonState,
    toggle: CenterToggle,
}

impl<L: Llemu> StatusDisplay<L> {
    /// Wraps a console.
    pub const fn new(lcd: L) -> Self {
        Self {
            lcd,
            buttons: LcdButtonState::new(),
            toggle: CenterToggle { pressed: false },
        }
    }

    /// Writes the greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the console rejects the write.
    pub fn greet(&mut self) -> Result<(), LlemuError> {
        self.lcd.set_text(GREETING_LINE, GREETING)
    }

    /// Samples the console buttons, redraws the status line, and services the center button.
    ///
    /// # Errors
    ///
    /// Returns the first error the console reports. The center button is still serviced if the
    /// status line fails to draw.
    pub fn refresh(&mut self) -> Result<(), LlemuError> {
        self.buttons.update(self.lcd.read_buttons());

        let status = self
            .lcd
            .set_text(BUTTON_STATUS_LINE, &button_status(self.buttons.current()));

        self.toggle_on_center_press()?;
        status
    }

    /// Samples the console buttons and services the center button, leaving the status line
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the console rejects the toggle redraw.
    pub fn service_center_button(&mut self) -> Result<(), LlemuError> {
        self.buttons.update(self.lcd.read_buttons());
        self.toggle_on_center_press()
    }

    fn toggle_on_center_press(&mut self) -> Result<(), LlemuError> {
        if self.buttons.is_now_pressed(LcdButtons::CENTER) {
            self.toggle.toggle(&mut self.lcd)?;
        }
        Ok(())
    }

    /// The center button toggle.
    pub const fn toggle(&self) -> CenterToggle {
        self.toggle
    }
}
