//! Smart ports and devices.
//!
//! The V5 Brain features 21 RJ9 ports known as "Smart Ports" for connecting newer V5 devices to the
//! Brain. Motors are the only Smart devices this robot uses.

pub mod group;
pub mod motor;

use snafu::Snafu;

/// A validated Smart Port number, from 1 to 21.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SmartPort {
    number: u8,
}

impl SmartPort {
    /// The number of Smart Ports on the brain.
    pub const COUNT: u8 = 21;

    /// Creates a port handle for the given 1-indexed port number.
    ///
    /// # Errors
    ///
    /// An [`InvalidPortError`] is returned if `number` is outside of `1..=21`.
    pub const fn new(number: u8) -> Result<Self, InvalidPortError> {
        if number == 0 || number > Self::COUNT {
            return Err(InvalidPortError { number });
        }

        Ok(Self { number })
    }

    /// Returns the number of the port.
    ///
    /// Ports are numbered starting from 1.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Returns the 0-indexed SDK device index of the port.
    #[must_use]
    pub const fn index(&self) -> u32 {
        (self.number - 1) as u32
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("smart port {number} does not exist on the brain"))]
/// A port number that is not one of the brain's 21 Smart Ports.
pub struct InvalidPortError {
    /// The rejected port number.
    pub number: u8,
}
