//! Hardware seams for the sixbot competition robot.
//!
//! # Overview
//!
//! The robot program never talks to hardware directly. Every device it touches is reached
//! through one of the traits in this crate:
//!
//! - [`ControllerInput`](controller::ControllerInput) for joystick axes and buttons,
//! - [`SmartMotor`](smart::motor::SmartMotor) for a single V5 smart motor, along with
//!   [`MotorGroup`](smart::group::MotorGroup) for motors driven by one shared setpoint,
//! - [`Llemu`](llemu::Llemu) for the eight-line brain screen console and its three buttons,
//! - [`CompetitionSource`](competition::CompetitionSource) for field control status.
//!
//! The [`sim`] module provides in-memory implementations of each trait for desktop
//! simulation and tests. On the V5 brain the same traits are implemented over `vexide`.

#![no_std]

extern crate alloc;

pub mod competition;
pub mod controller;
pub mod llemu;
pub mod sim;
pub mod smart;

use snafu::Snafu;

#[derive(Debug, Snafu)]
/// Generic errors that can take place when using ports on the V5 Brain.
pub enum PortError {
    /// No device is plugged into the port.
    Disconnected,

    /// The incorrect device type is plugged into the port.
    IncorrectDevice,
}
