//! V5 Controller
//!
//! This module allows you to read from the buttons and joysticks on the controller.
//!
//! Reads are per-channel: [`ControllerInput::analog`] returns the latest sampled deflection of a
//! single joystick axis, and [`ControllerInput::digital`] returns whether a single button is
//! currently held. No state is retained between reads.

use bitflags::bitflags;
use snafu::Snafu;

/// One of the four analog joystick channels on the controller.
///
/// On the x axis left is negative, and right is positive.
/// On the y axis down is negative, and up is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoystickAxis {
    /// Left joystick, horizontal (SDK `Axis4`).
    LeftX,
    /// Left joystick, vertical (SDK `Axis3`).
    LeftY,
    /// Right joystick, horizontal (SDK `Axis1`).
    RightX,
    /// Right joystick, vertical (SDK `Axis2`).
    RightY,
}

impl JoystickAxis {
    /// Every axis, in SDK channel order.
    pub const ALL: [Self; 4] = [Self::RightX, Self::RightY, Self::LeftY, Self::LeftX];

    /// Largest magnitude a raw axis reading can take.
    pub const MAX_RAW: i8 = 127;

    /// Index of this axis into a four-element axis table.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::RightX => 0,
            Self::RightY => 1,
            Self::LeftY => 2,
            Self::LeftX => 3,
        }
    }
}

/// One of the twelve digital buttons on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    /// Button A
    A,
    /// Button B
    B,
    /// Button X
    X,
    /// Button Y
    Y,
    /// Button Up
    Up,
    /// Button Down
    Down,
    /// Button Left
    Left,
    /// Button Right
    Right,
    /// Front Left Trigger
    L1,
    /// Back Left Trigger
    L2,
    /// Front Right Trigger
    R1,
    /// Back Right Trigger
    R2,
}

impl ControllerButton {
    /// The [`ButtonMask`] bit corresponding to this button.
    #[must_use]
    pub const fn mask(self) -> ButtonMask {
        match self {
            Self::A => ButtonMask::A,
            Self::B => ButtonMask::B,
            Self::X => ButtonMask::X,
            Self::Y => ButtonMask::Y,
            Self::Up => ButtonMask::UP,
            Self::Down => ButtonMask::DOWN,
            Self::Left => ButtonMask::LEFT,
            Self::Right => ButtonMask::RIGHT,
            Self::L1 => ButtonMask::L1,
            Self::L2 => ButtonMask::L2,
            Self::R1 => ButtonMask::R1,
            Self::R2 => ButtonMask::R2,
        }
    }
}

bitflags! {
    /// A set of held controller buttons.
    #[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
    pub struct ButtonMask: u16 {
        /// Button A
        const A = 1 << 0;
        /// Button B
        const B = 1 << 1;
        /// Button X
        const X = 1 << 2;
        /// Button Y
        const Y = 1 << 3;
        /// Button Up
        const UP = 1 << 4;
        /// Button Down
        const DOWN = 1 << 5;
        /// Button Left
        const LEFT = 1 << 6;
        /// Button Right
        const RIGHT = 1 << 7;
        /// Front Left Trigger
        const L1 = 1 << 8;
        /// Back Left Trigger
        const L2 = 1 << 9;
        /// Front Right Trigger
        const R1 = 1 << 10;
        /// Back Right Trigger
        const R2 = 1 << 11;
    }
}

impl ButtonMask {
    /// Returns `true` if `button` is in this set.
    #[must_use]
    pub const fn is_pressed(&self, button: ControllerButton) -> bool {
        self.contains(button.mask())
    }
}

/// A source of controller input samples.
pub trait ControllerInput {
    /// Returns the raw deflection of a joystick axis, from -127 to 127.
    ///
    /// # Errors
    ///
    /// - A [`ControllerError::Offline`] error is returned if the controller is not connected.
    /// - A [`ControllerError::CompetitionControl`] error is returned if access to the controller
    ///   data is being restricted by competition control.
    fn analog(&self, axis: JoystickAxis) -> Result<i8, ControllerError>;

    /// Returns `true` if `button` is currently being pressed.
    ///
    /// # Errors
    ///
    /// Same as [`ControllerInput::analog`].
    fn digital(&self, button: ControllerButton) -> Result<bool, ControllerError>;
}

impl<T: ControllerInput + ?Sized> ControllerInput for &T {
    fn analog(&self, axis: JoystickAxis) -> Result<i8, ControllerError> {
        (**self).analog(axis)
    }

    fn digital(&self, button: ControllerButton) -> Result<bool, ControllerError> {
        (**self).digital(button)
    }
}

#[derive(Debug, Snafu)]
/// Errors that can occur when interacting with the controller.
pub enum ControllerError {
    /// The controller is not connected to the brain.
    Offline,

    /// Access to controller data is restricted by competition control.
    ///
    /// When this error occurs, the requested data is not available outside of driver control mode.
    CompetitionControl,
}
