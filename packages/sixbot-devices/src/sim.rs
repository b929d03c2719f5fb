//! In-memory device backend.
//!
//! Every simulated device is split into the device itself, which is handed to the robot, and a
//! cloneable handle that a test or a simulation script keeps to drive inputs and inspect outputs.
//! Devices and handles share state through `Rc<RefCell<_>>`, so they are confined to one thread.

use alloc::{
    rc::Rc,
    string::{String, ToString},
};
use core::cell::RefCell;

use crate::{
    PortError,
    competition::{CompetitionSource, CompetitionStatus},
    controller::{ButtonMask, ControllerButton, ControllerError, ControllerInput, JoystickAxis},
    llemu::{self, LcdButtons, Llemu, LlemuError},
    smart::motor::{MotorConfig, MotorControl, MotorError, SmartMotor},
};

#[derive(Debug)]
struct ControllerState {
    axes: [i8; 4],
    buttons: ButtonMask,
    connected: bool,
    reads: usize,
}

/// A simulated controller.
#[derive(Debug)]
pub struct SimController {
    state: Rc<RefCell<ControllerState>>,
}

/// Drives the inputs of a [`SimController`].
#[derive(Debug, Clone)]
pub struct SimControllerHandle {
    state: Rc<RefCell<ControllerState>>,
}

impl SimController {
    /// Creates a connected controller with centered sticks and no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ControllerState {
                axes: [0; 4],
                buttons: ButtonMask::empty(),
                connected: true,
                reads: 0,
            })),
        }
    }

    /// Returns a handle for driving this controller's inputs.
    #[must_use]
    pub fn handle(&self) -> SimControllerHandle {
        SimControllerHandle {
            state: self.state.clone(),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&ControllerState) -> T) -> Result<T, ControllerError> {
        let mut state = self.state.borrow_mut();
        if !state.connected {
            return Err(ControllerError::Offline);
        }
        state.reads += 1;
        Ok(f(&state))
    }
}

impl Default for SimController {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerInput for SimController {
    fn analog(&self, axis: JoystickAxis) -> Result<i8, ControllerError> {
        self.read(|state| state.axes[axis.index()])
    }

    fn digital(&self, button: ControllerButton) -> Result<bool, ControllerError> {
        self.read(|state| state.buttons.is_pressed(button))
    }
}

impl SimControllerHandle {
    /// Deflects `axis` to `value`, clamped to the controller's -127..=127 range.
    pub fn set_axis(&self, axis: JoystickAxis, value: i8) {
        self.state.borrow_mut().axes[axis.index()] =
            value.clamp(-JoystickAxis::MAX_RAW, JoystickAxis::MAX_RAW);
    }

    /// Holds `button` down.
    pub fn press(&self, button: ControllerButton) {
        self.state.borrow_mut().buttons.insert(button.mask());
    }

    /// Lets go of `button`.
    pub fn release(&self, button: ControllerButton) {
        self.state.borrow_mut().buttons.remove(button.mask());
    }

    /// Replaces the full set of held buttons.
    pub fn set_buttons(&self, buttons: ButtonMask) {
        self.state.borrow_mut().buttons = buttons;
    }

    /// Plugs or unplugs the controller.
    pub fn set_connected(&self, connected: bool) {
        self.state.borrow_mut().connected = connected;
    }

    /// Number of successful channel reads so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }
}

#[derive(Debug)]
struct MotorState {
    config: MotorConfig,
    target: MotorControl,
    connected: bool,
    commands: usize,
}

/// A simulated smart motor that records every target it accepts.
#[derive(Debug)]
pub struct SimMotor {
    state: Rc<RefCell<MotorState>>,
}

/// Inspects a [`SimMotor`].
#[derive(Debug, Clone)]
pub struct SimMotorHandle {
    state: Rc<RefCell<MotorState>>,
}

impl SimMotor {
    /// Creates a connected motor that is outputting zero volts.
    #[must_use]
    pub fn new(config: MotorConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(MotorState {
                config,
                target: MotorControl::default(),
                connected: true,
                commands: 0,
            })),
        }
    }

    /// Returns a handle for inspecting this motor.
    #[must_use]
    pub fn handle(&self) -> SimMotorHandle {
        SimMotorHandle {
            state: self.state.clone(),
        }
    }
}

impl SmartMotor for SimMotor {
    fn set_target(&mut self, target: MotorControl) -> Result<(), MotorError> {
        let mut state = self.state.borrow_mut();
        if !state.connected {
            return Err(PortError::Disconnected.into());
        }

        state.target = target;
        state.commands += 1;
        Ok(())
    }

    fn target(&self) -> MotorControl {
        self.state.borrow().target
    }
}

impl SimMotorHandle {
    /// Returns the wiring this motor was created with.
    #[must_use]
    pub fn config(&self) -> MotorConfig {
        self.state.borrow().config
    }

    /// Returns the last accepted target.
    #[must_use]
    pub fn target(&self) -> MotorControl {
        self.state.borrow().target
    }

    /// Number of targets accepted so far.
    #[must_use]
    pub fn commands(&self) -> usize {
        self.state.borrow().commands
    }

    /// The velocity the motor would actually hold for its current target.
    ///
    /// Velocity setpoints are clamped to the rated speed of the motor's gearset, which is what the
    /// motor firmware does with out-of-range commands.
    #[must_use]
    pub fn effective_rpm(&self) -> Option<i32> {
        let state = self.state.borrow();
        let max = state.config.gearset.max_rpm();
        state.target.velocity().map(|rpm| rpm.clamp(-max, max))
    }

    /// Plugs or unplugs the motor.
    pub fn set_connected(&self, connected: bool) {
        self.state.borrow_mut().connected = connected;
    }
}

#[derive(Debug, Default)]
struct LlemuState {
    lines: [String; llemu::LINES as usize],
    buttons: LcdButtons,
}

/// A simulated brain screen console.
#[derive(Debug, Default)]
pub struct SimLlemu {
    state: Rc<RefCell<LlemuState>>,
}

/// Drives the buttons of and reads the text on a [`SimLlemu`].
#[derive(Debug, Clone)]
pub struct SimLlemuHandle {
    state: Rc<RefCell<LlemuState>>,
}

impl SimLlemu {
    /// Creates a blank console with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle for this console.
    #[must_use]
    pub fn handle(&self) -> SimLlemuHandle {
        SimLlemuHandle {
            state: self.state.clone(),
        }
    }
}

impl Llemu for SimLlemu {
    fn set_text(&mut self, line: u8, text: &str) -> Result<(), LlemuError> {
        llemu::validate_write(line, text)?;
        self.state.borrow_mut().lines[usize::from(line)] = text.to_string();
        Ok(())
    }

    fn clear_line(&mut self, line: u8) -> Result<(), LlemuError> {
        llemu::validate_write(line, "")?;
        self.state.borrow_mut().lines[usize::from(line)].clear();
        Ok(())
    }

    fn read_buttons(&self) -> LcdButtons {
        self.state.borrow().buttons
    }
}

impl SimLlemuHandle {
    /// Returns the text currently on `line`, or an empty string past the bottom of the console.
    #[must_use]
    pub fn line(&self, line: u8) -> String {
        self.state
            .borrow()
            .lines
            .get(usize::from(line))
            .cloned()
            .unwrap_or_default()
    }

    /// Replaces the set of held console buttons.
    pub fn set_buttons(&self, buttons: LcdButtons) {
        self.state.borrow_mut().buttons = buttons;
    }
}

#[derive(Debug)]
struct CompetitionState {
    status: CompetitionStatus,
    ended: bool,
}

/// A simulated competition switch.
#[derive(Debug)]
pub struct SimCompetition {
    state: Rc<RefCell<CompetitionState>>,
}

/// Flips a [`SimCompetition`] between modes.
#[derive(Debug, Clone)]
pub struct SimCompetitionHandle {
    state: Rc<RefCell<CompetitionState>>,
}

impl SimCompetition {
    /// Creates a switch reporting `status`.
    #[must_use]
    pub fn new(status: CompetitionStatus) -> Self {
        Self {
            state: Rc::new(RefCell::new(CompetitionState {
                status,
                ended: false,
            })),
        }
    }

    /// Returns a handle for this switch.
    #[must_use]
    pub fn handle(&self) -> SimCompetitionHandle {
        SimCompetitionHandle {
            state: self.state.clone(),
        }
    }
}

impl CompetitionSource for SimCompetition {
    fn status(&mut self) -> Option<CompetitionStatus> {
        let state = self.state.borrow();
        (!state.ended).then_some(state.status)
    }
}

impl SimCompetitionHandle {
    /// Reports `status` from now on.
    pub fn set_status(&self, status: CompetitionStatus) {
        self.state.borrow_mut().status = status;
    }

    /// Ends the match. The source reports no further status.
    pub fn end(&self) {
        self.state.borrow_mut().ended = true;
    }
}
