//! Motor groups.
//!
//! A [`MotorGroup`] is a fixed, ordered set of motors that always receive the same target, such as
//! all of the motors on one side of a tank drivetrain.

use super::motor::{MotorControl, MotorError, SmartMotor};

/// A fixed set of motors commanded together.
#[derive(Debug)]
pub struct MotorGroup<M, const N: usize> {
    motors: [M; N],
}

impl<M: SmartMotor, const N: usize> MotorGroup<M, N> {
    /// Creates a group from an ordered array of motors.
    pub const fn new(motors: [M; N]) -> Self {
        Self { motors }
    }

    /// Sends `target` to every motor in the group.
    ///
    /// Every motor is commanded even if an earlier one fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`MotorError`] encountered, if any.
    pub fn set_target(&mut self, target: MotorControl) -> Result<(), MotorError> {
        let mut result = Ok(());

        for motor in &mut self.motors {
            if let Err(err) = motor.set_target(target) {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }

        result
    }

    /// Spins every motor in the group at `rpm`.
    ///
    /// # Errors
    ///
    /// See [`MotorGroup::set_target`].
    pub fn set_velocity(&mut self, rpm: i32) -> Result<(), MotorError> {
        self.set_target(MotorControl::Velocity(rpm))
    }

    /// Returns the motors in the group, in order.
    pub const fn motors(&self) -> &[M; N] {
        &self.motors
    }
}
