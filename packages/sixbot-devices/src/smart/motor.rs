//! V5 Smart Motors

use snafu::Snafu;

use super::SmartPort;
use crate::PortError;

/// Represents a possible target for a [`SmartMotor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotorControl {
    /// Motor is braking using a [`BrakeMode`].
    Brake(BrakeMode),

    /// Motor is outputting a raw voltage.
    Voltage(f64),

    /// Motor is attempting to hold a velocity using internal PID control.
    Velocity(i32),
}

impl MotorControl {
    /// Returns the commanded velocity if this target is a velocity setpoint.
    #[must_use]
    pub const fn velocity(&self) -> Option<i32> {
        match self {
            Self::Velocity(rpm) => Some(*rpm),
            _ => None,
        }
    }
}

impl Default for MotorControl {
    /// A freshly constructed motor outputs zero volts.
    fn default() -> Self {
        Self::Voltage(0.0)
    }
}

/// Represents a possible direction that a motor can be configured as.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    /// Motor rotates in the forward direction.
    Forward,

    /// Motor rotates in the reverse direction.
    Reverse,
}

/// Determines how a motor should act when braking.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BrakeMode {
    /// Motor never brakes.
    Coast,

    /// Motor uses regenerative braking to slow down faster.
    Brake,

    /// Motor exerts force to hold the same position.
    Hold,
}

/// Internal gearset used by VEX smart motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gearset {
    /// 36:1 gear ratio
    Red,
    /// 18:1 gear ratio
    Green,
    /// 6:1 gear ratio
    Blue,
}

impl Gearset {
    /// Rated max speed for a smart motor with a [`Red`](Gearset::Red) gearset.
    pub const MAX_RED_RPM: i32 = 100;
    /// Rated speed for a smart motor with a [`Green`](Gearset::Green) gearset.
    pub const MAX_GREEN_RPM: i32 = 200;
    /// Rated speed for a smart motor with a [`Blue`](Gearset::Blue) gearset.
    pub const MAX_BLUE_RPM: i32 = 600;

    /// Get the rated maximum speed for this motor gearset.
    #[must_use]
    pub const fn max_rpm(&self) -> i32 {
        match self {
            Self::Red => Self::MAX_RED_RPM,
            Self::Green => Self::MAX_GREEN_RPM,
            Self::Blue => Self::MAX_BLUE_RPM,
        }
    }
}

/// How a motor is wired to the brain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorConfig {
    /// Smart Port number the motor is plugged into.
    pub port: u8,
    /// Cartridge installed in the motor.
    pub gearset: Gearset,
    /// Whether positive commands spin the motor forwards or backwards.
    pub direction: Direction,
}

impl MotorConfig {
    /// Creates a new motor configuration.
    #[must_use]
    pub const fn new(port: u8, gearset: Gearset, direction: Direction) -> Self {
        Self {
            port,
            gearset,
            direction,
        }
    }

    /// Returns the validated Smart Port for this motor.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidPortError`](super::InvalidPortError) if the port number is out of
    /// range.
    pub const fn smart_port(&self) -> Result<SmartPort, super::InvalidPortError> {
        SmartPort::new(self.port)
    }
}

/// A V5 smart motor that accepts targets from its onboard controller.
pub trait SmartMotor {
    /// Sets the target that the motor should attempt to reach.
    ///
    /// This could be a voltage, velocity, or brake mode.
    ///
    /// # Errors
    ///
    /// A [`MotorError`] is returned if the motor could not be reached.
    fn set_target(&mut self, target: MotorControl) -> Result<(), MotorError>;

    /// Returns the last target the motor was commanded to.
    fn target(&self) -> MotorControl;

    /// Spins the motor at a target velocity.
    ///
    /// This velocity corresponds to different actual speeds in RPM depending on the gearset used for the motor.
    /// Velocity is held with an internal PID controller to ensure consistent speed, as opposed to setting the
    /// motor's voltage.
    ///
    /// # Errors
    ///
    /// See [`SmartMotor::set_target`].
    fn set_velocity(&mut self, rpm: i32) -> Result<(), MotorError> {
        self.set_target(MotorControl::Velocity(rpm))
    }

    /// Sets the motor's output voltage.
    ///
    /// This voltage value spans from -12 (fully spinning reverse) to +12 (fully spinning forwards) volts, and
    /// controls the raw output of the motor.
    ///
    /// # Errors
    ///
    /// See [`SmartMotor::set_target`].
    fn set_voltage(&mut self, volts: f64) -> Result<(), MotorError> {
        self.set_target(MotorControl::Voltage(volts))
    }
}

#[derive(Debug, Snafu)]
/// Errors that can occur when using a motor.
pub enum MotorError {
    /// Failed to communicate with the motor.
    Busy,

    /// Generic port related error.
    #[snafu(display("{source}"), context(false))]
    Port {
        /// The source of the error.
        source: PortError,
    },
}
