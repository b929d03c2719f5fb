//! Competition program for a six-motor tank drive robot with two arms.
//!
//! # Overview
//!
//! During driver control the robot runs a fixed-period loop. Each iteration reads the drive
//! sticks and commands the drivetrain through [`teleop::DriveSticks`], then does the same for
//! the arms through [`teleop::ArmInputs`]. The brain screen shows the console buttons during
//! driver control, and the center button toggles a message in every mode.
//!
//! The rest of the match is driven by [`competition::compete`], which runs the
//! [`Compete`](competition::Compete) hook for whatever mode field control reports.
//!
//! All device access goes through the traits in [`sixbot_devices`], so the same [`Robot`] runs
//! on the V5 brain and in the desktop simulator (`cargo run --bin sim`).

#![no_std]

extern crate alloc;

pub mod competition;
pub mod config;
pub mod delay;
pub mod display;
pub mod robot;
pub mod teleop;

#[cfg(target_os = "vexos")]
pub mod v5;

pub use config::RobotConfig;
pub use robot::Robot;
