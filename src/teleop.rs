//! Operator control.
//!
//! The control law maps controller readings straight to motor setpoints. There is no filtering,
//! ramping or deadband: each tank stick scales into its side of the drivetrain, and each arm
//! follows whichever of its buttons is held. Drive sticks and arm buttons are sampled
//! separately so the drivetrain can be commanded before the buttons are read.

use sixbot_devices::controller::{ControllerButton, ControllerInput};

use crate::config::ControlBindings;

/// The up/down button pair for one arm.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArmButtons {
    /// The "up" button is held.
    pub up: bool,
    /// The "down" button is held.
    pub down: bool,
}

impl ArmButtons {
    /// Velocity to command for this button state, or [`None`] to leave the arm alone.
    ///
    /// "Up" wins when both buttons are held. Releasing both buttons does not stop the arm; its
    /// previous command stays in effect.
    #[must_use]
    pub const fn command(self, velocity: i32) -> Option<i32> {
        if self.up {
            Some(velocity)
        } else if self.down {
            Some(-velocity)
        } else {
            None
        }
    }
}

/// The two tank drive sticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DriveSticks {
    /// Raw left drive stick, -127..=127.
    pub left: i8,
    /// Raw right drive stick, -127..=127.
    pub right: i8,
}

impl DriveSticks {
    /// Reads the bound drive axes from `controller`.
    ///
    /// An axis that cannot be read is treated as centered.
    pub fn sample(controller: &impl ControllerInput, bindings: &ControlBindings) -> Self {
        Self {
            left: controller.analog(bindings.left_drive).unwrap_or_default(),
            right: controller.analog(bindings.right_drive).unwrap_or_default(),
        }
    }

    /// Scales both sticks into drivetrain velocities.
    #[must_use]
    pub const fn command(self, gain: i32) -> DriveCommand {
        DriveCommand {
            left: drive_velocity(self.left, gain),
            right: drive_velocity(self.right, gain),
        }
    }
}

/// Button pairs for both arms.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArmInputs {
    /// Right arm buttons.
    pub right: ArmButtons,
    /// Left arm buttons.
    pub left: ArmButtons,
}

impl ArmInputs {
    /// Reads the bound arm buttons from `controller`.
    ///
    /// A button that cannot be read is treated as released.
    pub fn sample(controller: &impl ControllerInput, bindings: &ControlBindings) -> Self {
        let button = |button: ControllerButton| controller.digital(button).unwrap_or_default();

        Self {
            right: ArmButtons {
                up: button(bindings.right_arm_up),
                down: button(bindings.right_arm_down),
            },
            left: ArmButtons {
                up: button(bindings.left_arm_up),
                down: button(bindings.left_arm_down),
            },
        }
    }

    /// Arm velocities for these button states.
    #[must_use]
    pub const fn command(self, velocity: i32) -> ArmCommand {
        ArmCommand {
            right: self.right.command(velocity),
            left: self.left.command(velocity),
        }
    }
}

/// Velocity for every motor on each side of the drivetrain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DriveCommand {
    /// Left drivetrain velocity.
    pub left: i32,
    /// Right drivetrain velocity.
    pub right: i32,
}

/// New arm velocities. [`None`] leaves that arm on its previous command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArmCommand {
    /// New right arm velocity, if any.
    pub right: Option<i32>,
    /// New left arm velocity, if any.
    pub left: Option<i32>,
}

/// Everything one operator control iteration commanded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TeleopOutputs {
    /// Drivetrain setpoints.
    pub drive: DriveCommand,
    /// Arm setpoints.
    pub arms: ArmCommand,
}

/// Scales a raw stick reading into a drivetrain velocity.
#[must_use]
pub const fn drive_velocity(axis: i8, gain: i32) -> i32 {
    (axis as i32).saturating_mul(gain)
}
