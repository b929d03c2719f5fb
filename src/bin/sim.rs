//! Desktop match simulation.
//!
//! Runs the competition robot against simulated devices while a scripted field controller and
//! driver walk it through a short match, then prints where every motor ended up.
//!
//! Set `SIXBOT_LOG` to a log level (`trace`, `debug`, `info`, ...) to change verbosity.

use std::{
    env,
    process::ExitCode,
    time::{Duration, Instant},
};

use log::{LevelFilter, error, info};
use sixbot::{RobotConfig, competition::compete, delay::SleepDelay, robot::Robot};
use sixbot_async::time::sleep;
use sixbot_devices::{
    competition::CompetitionStatus,
    controller::{ControllerButton, JoystickAxis},
    llemu::LcdButtons,
    sim::{
        SimCompetition, SimCompetitionHandle, SimController, SimControllerHandle, SimLlemu,
        SimLlemuHandle, SimMotor, SimMotorHandle,
    },
};

/// Time between scripted events.
const STEP: Duration = Duration::from_millis(200);

fn init_logger() -> Result<(), log::SetLoggerError> {
    let level = env::var("SIXBOT_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let epoch = Instant::now();

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{:8.3} {:5}] {}: {}",
                epoch.elapsed().as_secs_f64(),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
}

/// Plays the field controller and the driver.
async fn script(field: SimCompetitionHandle, pad: SimControllerHandle, screen: SimLlemuHandle) {
    let connected = CompetitionStatus::CONNECTED;

    sleep(STEP).await;
    info!("field: autonomous");
    field.set_status(connected | CompetitionStatus::AUTONOMOUS);

    sleep(STEP).await;
    info!("field: disabled");
    field.set_status(connected | CompetitionStatus::DISABLED);

    sleep(STEP).await;
    info!("field: driver control");
    field.set_status(connected);

    pad.set_axis(JoystickAxis::LeftY, 50);
    pad.set_axis(JoystickAxis::RightY, -30);
    pad.press(ControllerButton::R1);
    sleep(STEP).await;

    pad.release(ControllerButton::R1);
    pad.press(ControllerButton::L2);
    sleep(STEP).await;

    pad.release(ControllerButton::L2);
    screen.set_buttons(LcdButtons::CENTER);
    sleep(STEP).await;

    screen.set_buttons(LcdButtons::empty());
    sleep(STEP).await;

    info!("field: match over");
    field.end();
}

fn report(name: &str, motor: &SimMotorHandle) {
    let config = motor.config();
    println!(
        "{name:>12} (port {:>2}): target {:?}, effective {:?} rpm, {} commands",
        config.port,
        motor.target(),
        motor.effective_rpm(),
        motor.commands()
    );
}

fn main() -> ExitCode {
    if let Err(err) = init_logger() {
        eprintln!("failed to install logger: {err}");
    }

    let controller = SimController::new();
    let lcd = SimLlemu::new();
    let switch = SimCompetition::new(CompetitionStatus::CONNECTED | CompetitionStatus::DISABLED);

    let pad = controller.handle();
    let screen = lcd.handle();
    let field = switch.handle();
    let mut motors = Vec::new();

    let robot = Robot::new(RobotConfig::DEFAULT, controller, lcd, SleepDelay, |config| {
        let motor = SimMotor::new(config);
        motors.push(motor.handle());
        Ok(motor)
    });
    let mut robot = match robot {
        Ok(robot) => robot,
        Err(err) => {
            error!("invalid robot configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let _script = sixbot_async::spawn(script(field, pad, screen.clone()));

    sixbot_async::block_on(async move {
        let mut switch = switch;
        compete(&mut robot, &mut switch, &SleepDelay).await;
    });

    let names = [
        "front left",
        "middle left",
        "back left",
        "front right",
        "middle right",
        "back right",
        "left arm",
        "right arm",
    ];
    for (name, motor) in names.iter().zip(&motors) {
        report(name, motor);
    }

    for line in 0..3 {
        println!("screen line {line}: {:?}", screen.line(line));
    }

    ExitCode::SUCCESS
}
