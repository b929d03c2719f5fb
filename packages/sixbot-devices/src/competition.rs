//! Utilities for getting competition control state.

use bitflags::bitflags;

bitflags! {
    /// The status bits reported by field control or a competition switch.
    ///
    /// The bit layout matches the value returned by `vexCompetitionStatus`.
    #[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
    pub struct CompetitionStatus: u32 {
        /// Robot is disabled by field control.
        const DISABLED = 1 << 0;

        /// Robot is in autonomous mode.
        const AUTONOMOUS = 1 << 1;

        /// Robot is connected to competition control (either competition switch or field control).
        const CONNECTED = 1 << 2;

        /// Robot is connected to field control (NOT competition switch)
        const SYSTEM = 1 << 3;
    }
}

/// Represents a possible mode that robots can be set in during the competition lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetitionMode {
    /// The Disabled competition mode.
    ///
    /// When in disabled mode, voltage commands to motors are disabled. Motors are forcibly
    /// locked to the "coast" brake mode and cannot be moved.
    Disabled,

    /// The Autonomous competition mode.
    ///
    /// When in autonomous mode, all motors and sensors may be accessed, however user
    /// input from controller buttons and joysticks is not available to be read.
    Autonomous,

    /// The drivercontrol competition mode.
    ///
    /// When in opcontrol mode, all device access is available including access to
    /// controller joystick values for reading user-input from drive team members.
    Driver,
}

impl CompetitionStatus {
    /// Decodes a raw `vexCompetitionStatus` value, ignoring unknown bits.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self::from_bits_truncate(raw)
    }

    /// Gets the current competition mode, or phase.
    #[must_use]
    pub const fn mode(&self) -> CompetitionMode {
        if self.contains(Self::DISABLED) {
            CompetitionMode::Disabled
        } else if self.contains(Self::AUTONOMOUS) {
            CompetitionMode::Autonomous
        } else {
            CompetitionMode::Driver
        }
    }

    /// Checks if the robot is connected to a competition control system.
    #[must_use]
    pub const fn connected(&self) -> bool {
        self.contains(Self::CONNECTED)
    }
}

/// A source of competition status samples.
pub trait CompetitionSource {
    /// Returns the current competition status flags.
    ///
    /// Returns [`None`] once the source has no further status to report, which ends the match.
    /// Sources backed by real field control never end.
    fn status(&mut self) -> Option<CompetitionStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_precedence() {
        assert_eq!(CompetitionStatus::empty().mode(), CompetitionMode::Driver);
        assert_eq!(
            CompetitionStatus::AUTONOMOUS.mode(),
            CompetitionMode::Autonomous
        );
        assert_eq!(
            (CompetitionStatus::DISABLED | CompetitionStatus::AUTONOMOUS).mode(),
            CompetitionMode::Disabled
        );
    }

    #[test]
    fn raw_status_decoding() {
        let disabled = CompetitionStatus::from_raw(0b0101);
        assert_eq!(disabled.mode(), CompetitionMode::Disabled);
        assert!(disabled.connected());

        let autonomous = CompetitionStatus::from_raw(0b1110);
        assert_eq!(autonomous.mode(), CompetitionMode::Autonomous);
        assert!(autonomous.contains(CompetitionStatus::SYSTEM));

        assert_eq!(
            CompetitionStatus::from_raw(0b0100).mode(),
            CompetitionMode::Driver
        );
        assert_eq!(
            CompetitionStatus::from_raw(1 << 7),
            CompetitionStatus::empty()
        );
    }
}
