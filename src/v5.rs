//! V5 brain backend.
//!
//! Adapts the vexide device types to the traits the robot is written against and wires up the
//! competition robot from the brain's peripherals.

use alloc::format;

use log::{LevelFilter, Log, Metadata, Record, error, info};
use sixbot_devices::{
    PortError,
    competition::{CompetitionSource, CompetitionStatus},
    controller::{ControllerButton, ControllerError, ControllerInput, JoystickAxis},
    llemu::{self, LcdButtons, Llemu, LlemuError},
    smart::motor::{BrakeMode, Direction, Gearset, MotorConfig, MotorControl, MotorError, SmartMotor},
};
use vexide::{
    color::Rgb,
    controller::{Controller, ControllerError as V5ControllerError, ControllerState},
    display::{Display, Rect, Text, TextSize, TouchState},
    math::Direction as V5Direction,
    peripherals::{DynamicPeripherals, Peripherals},
    smart::motor::{BrakeMode as V5BrakeMode, Gearset as V5Gearset, Motor, MotorError as V5MotorError},
};

use crate::{
    competition::compete,
    config::{ConfigError, RobotConfig},
    delay::SleepDelay,
    robot::Robot,
};

const STDIO_CHANNEL: u32 = 1;

/// Writes log records to the brain's serial console.
#[derive(Debug)]
pub struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}: {}\n", record.level(), record.target(), record.args());

        // SAFETY: The buffer outlives the call and its length is passed alongside it.
        unsafe {
            vex_sdk::vexSerialWriteBuffer(STDIO_CHANNEL, line.as_ptr(), line.len() as u32);
        }
    }

    fn flush(&self) {}
}

/// Installs [`SerialLogger`] as the global logger.
///
/// Does nothing if a logger is already installed.
pub fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// The primary controller.
#[derive(Debug)]
pub struct V5Controller(pub Controller);

impl V5Controller {
    fn state(&self) -> Result<ControllerState, ControllerError> {
        self.0.state().map_err(|err| match err {
            V5ControllerError::CompetitionControl => ControllerError::CompetitionControl,
            _ => ControllerError::Offline,
        })
    }
}

impl ControllerInput for V5Controller {
    fn analog(&self, axis: JoystickAxis) -> Result<i8, ControllerError> {
        let state = self.state()?;

        Ok(match axis {
            JoystickAxis::LeftX => state.left_stick.x_raw(),
            JoystickAxis::LeftY => state.left_stick.y_raw(),
            JoystickAxis::RightX => state.right_stick.x_raw(),
            JoystickAxis::RightY => state.right_stick.y_raw(),
        })
    }

    fn digital(&self, button: ControllerButton) -> Result<bool, ControllerError> {
        let state = self.state()?;

        let button = match button {
            ControllerButton::A => state.button_a,
            ControllerButton::B => state.button_b,
            ControllerButton::X => state.button_x,
            ControllerButton::Y => state.button_y,
            ControllerButton::Up => state.button_up,
            ControllerButton::Down => state.button_down,
            ControllerButton::Left => state.button_left,
            ControllerButton::Right => state.button_right,
            ControllerButton::L1 => state.front_left_trigger,
            ControllerButton::L2 => state.back_left_trigger,
            ControllerButton::R1 => state.front_right_trigger,
            ControllerButton::R2 => state.back_right_trigger,
        };

        Ok(button.is_pressed())
    }
}

/// A smart motor.
#[derive(Debug)]
pub struct V5Motor {
    motor: Motor,
    target: MotorControl,
}

impl V5Motor {
    /// Opens the motor described by `config`, taking its port from `peripherals`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if the port does not exist or has already been taken.
    pub fn open(
        peripherals: &mut DynamicPeripherals,
        config: MotorConfig,
    ) -> Result<Self, ConfigError> {
        config
            .smart_port()
            .map_err(|_| ConfigError::InvalidPort { port: config.port })?;
        let port = peripherals
            .take_smart_port(config.port)
            .ok_or(ConfigError::InvalidPort { port: config.port })?;

        let gearset = match config.gearset {
            Gearset::Red => V5Gearset::Red,
            Gearset::Green => V5Gearset::Green,
            Gearset::Blue => V5Gearset::Blue,
        };
        let direction = match config.direction {
            Direction::Forward => V5Direction::Forward,
            Direction::Reverse => V5Direction::Reverse,
        };

        Ok(Self {
            motor: Motor::new(port, gearset, direction),
            target: MotorControl::default(),
        })
    }
}

impl SmartMotor for V5Motor {
    fn set_target(&mut self, target: MotorControl) -> Result<(), MotorError> {
        let result = match target {
            MotorControl::Brake(mode) => self.motor.brake(match mode {
                BrakeMode::Coast => V5BrakeMode::Coast,
                BrakeMode::Brake => V5BrakeMode::Brake,
                BrakeMode::Hold => V5BrakeMode::Hold,
            }),
            MotorControl::Voltage(volts) => self.motor.set_voltage(volts),
            MotorControl::Velocity(rpm) => self.motor.set_velocity(rpm),
        };

        result.map_err(|err| match err {
            V5MotorError::Busy => MotorError::Busy,
            _ => PortError::Disconnected.into(),
        })?;

        self.target = target;
        Ok(())
    }

    fn target(&self) -> MotorControl {
        self.target
    }
}

/// The brain screen, laid out as an eight-line console with three buttons along the bottom.
#[derive(Debug)]
pub struct V5Llemu {
    display: Display,
}

impl V5Llemu {
    const LINE_HEIGHT: i16 = 20;
    const BUTTON_TOP: i16 = Display::VERTICAL_RESOLUTION - 40;

    /// Takes over the brain screen.
    pub fn new(mut display: Display) -> Self {
        display.erase(Rgb::new(0, 0, 0));
        Self { display }
    }

    fn clear(&mut self, line: u8) {
        let rect = Rect::from_dimensions(
            [0, i16::from(line) * Self::LINE_HEIGHT],
            Display::HORIZONTAL_RESOLUTION as u16,
            Self::LINE_HEIGHT as u16,
        );
        self.display.fill(&rect, Rgb::new(0, 0, 0));
    }
}

impl Llemu for V5Llemu {
    fn set_text(&mut self, line: u8, text: &str) -> Result<(), LlemuError> {
        llemu::validate_write(line, text)?;
        self.clear(line);

        let text = Text::new(
            text,
            TextSize::Medium,
            [0, i16::from(line) * Self::LINE_HEIGHT],
        );
        self.display.fill(&text, Rgb::new(255, 255, 255));
        Ok(())
    }

    fn clear_line(&mut self, line: u8) -> Result<(), LlemuError> {
        llemu::validate_write(line, "")?;
        self.clear(line);
        Ok(())
    }

    fn read_buttons(&self) -> LcdButtons {
        let touch = self.display.touch_status();
        if touch.state == TouchState::Released || touch.y < Self::BUTTON_TOP {
            return LcdButtons::empty();
        }

        match touch.x / (Display::HORIZONTAL_RESOLUTION / 3) {
            0 => LcdButtons::LEFT,
            1 => LcdButtons::CENTER,
            _ => LcdButtons::RIGHT,
        }
    }
}

/// Competition status as reported by VEXos.
#[derive(Debug, Default)]
pub struct FieldControl;

impl CompetitionSource for FieldControl {
    fn status(&mut self) -> Option<CompetitionStatus> {
        Some(CompetitionStatus::from_raw(
            vexide::competition::status().bits(),
        ))
    }
}

/// Builds the competition robot from the brain's peripherals and runs it for the rest of the
/// program.
pub async fn run(peripherals: Peripherals) {
    init_logger(LevelFilter::Info);

    let mut peripherals = DynamicPeripherals::new(peripherals);
    let (Some(controller), Some(display)) = (
        peripherals.take_primary_controller(),
        peripherals.take_display(),
    ) else {
        error!("controller or display already taken");
        return;
    };

    let robot = Robot::new(
        RobotConfig::DEFAULT,
        V5Controller(controller),
        V5Llemu::new(display),
        SleepDelay,
        |config| V5Motor::open(&mut peripherals, config),
    );

    match robot {
        Ok(mut robot) => {
            info!("robot ready");
            compete(&mut robot, &mut FieldControl, &SleepDelay).await;
        }
        Err(err) => error!("invalid robot configuration: {err}"),
    }
}
