//! Robot wiring and tuning.
//!
//! Everything that depends on how this particular robot is built lives in [`RobotConfig`]. The
//! program ships with [`RobotConfig::DEFAULT`], which matches the competition robot.

use core::time::Duration;

use sixbot_devices::{
    controller::{ControllerButton, JoystickAxis},
    smart::{
        SmartPort,
        motor::{Direction, Gearset, MotorConfig},
    },
};
use snafu::{Snafu, ensure};

/// Number of motors on each side of the drivetrain.
pub const MOTORS_PER_SIDE: usize = 3;

/// Motors on both sides of the tank drivetrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrivetrainConfig {
    /// Left side, front to back.
    pub left: [MotorConfig; MOTORS_PER_SIDE],
    /// Right side, front to back.
    pub right: [MotorConfig; MOTORS_PER_SIDE],
}

/// Which controller channels drive which mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBindings {
    /// Axis controlling the left side of the drivetrain.
    pub left_drive: JoystickAxis,
    /// Axis controlling the right side of the drivetrain.
    pub right_drive: JoystickAxis,
    /// Raises the right arm while held.
    pub right_arm_up: ControllerButton,
    /// Lowers the right arm while held.
    pub right_arm_down: ControllerButton,
    /// Raises the left arm while held.
    pub left_arm_up: ControllerButton,
    /// Lowers the left arm while held.
    pub left_arm_down: ControllerButton,
}

/// Complete description of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotConfig {
    /// Drivetrain wiring.
    pub drivetrain: DrivetrainConfig,
    /// Left arm motor.
    pub left_arm: MotorConfig,
    /// Right arm motor.
    pub right_arm: MotorConfig,
    /// Controller layout.
    pub bindings: ControlBindings,
    /// Multiplier from a raw joystick reading to a drivetrain velocity command.
    ///
    /// This is a tuning constant rather than a unit conversion. At full deflection it asks for far
    /// more than any gearset's rated speed, and the motor firmware clamps the setpoint, so the
    /// drivetrain reaches full speed at a small fraction of stick travel.
    pub drive_gain: i32,
    /// Velocity sent to an arm motor while one of its buttons is held.
    pub arm_velocity: i32,
    /// Time between operator control iterations.
    pub tick: Duration,
}

impl RobotConfig {
    /// The competition robot.
    pub const DEFAULT: Self = Self {
        drivetrain: DrivetrainConfig {
            left: [
                MotorConfig::new(11, Gearset::Blue, Direction::Forward),
                MotorConfig::new(12, Gearset::Blue, Direction::Forward),
                MotorConfig::new(13, Gearset::Blue, Direction::Forward),
            ],
            right: [
                MotorConfig::new(1, Gearset::Blue, Direction::Reverse),
                MotorConfig::new(2, Gearset::Blue, Direction::Reverse),
                MotorConfig::new(3, Gearset::Blue, Direction::Reverse),
            ],
        },
        left_arm: MotorConfig::new(5, Gearset::Green, Direction::Forward),
        right_arm: MotorConfig::new(4, Gearset::Green, Direction::Reverse),
        bindings: ControlBindings {
            left_drive: JoystickAxis::LeftY,
            right_drive: JoystickAxis::RightY,
            right_arm_up: ControllerButton::R1,
            right_arm_down: ControllerButton::R2,
            left_arm_up: ControllerButton::L1,
            left_arm_down: ControllerButton::L2,
        },
        drive_gain: 600,
        arm_velocity: 100,
        tick: Duration::from_millis(20),
    };

    /// Every motor on the robot: left drive, right drive, left arm, right arm.
    pub fn motors(&self) -> impl Iterator<Item = &MotorConfig> {
        self.drivetrain
            .left
            .iter()
            .chain(&self.drivetrain.right)
            .chain([&self.left_arm, &self.right_arm])
    }

    /// Checks that the configuration describes a robot that can be built.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPort`] if a motor is on a port the brain does not have.
    /// - [`ConfigError::DuplicatePort`] if two motors share a port.
    /// - [`ConfigError::ZeroTick`] if the control loop would never yield.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut used = [false; SmartPort::COUNT as usize];

        for motor in self.motors() {
            let port = motor
                .smart_port()
                .map_err(|_| ConfigError::InvalidPort { port: motor.port })?;

            let slot = &mut used[port.index() as usize];
            ensure!(!*slot, DuplicatePortSnafu { port: motor.port });
            *slot = true;
        }

        ensure!(!self.tick.is_zero(), ZeroTickSnafu);

        Ok(())
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Snafu)]
/// Errors that make a [`RobotConfig`] unusable.
pub enum ConfigError {
    /// A motor is assigned to a port outside of 1..=21.
    #[snafu(display("motor configured on nonexistent smart port {port}"))]
    InvalidPort {
        /// The offending port number.
        port: u8,
    },

    /// Two motors are assigned to the same port.
    #[snafu(display("smart port {port} is assigned to more than one motor"))]
    DuplicatePort {
        /// The shared port number.
        port: u8,
    },

    /// The control loop period is zero.
    #[snafu(display("operator control tick must be longer than zero"))]
    ZeroTick,
}
