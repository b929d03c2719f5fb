//! The competition robot.

use log::{info, trace, warn};
use sixbot_devices::{
    controller::ControllerInput,
    llemu::Llemu,
    smart::{
        group::MotorGroup,
        motor::{MotorConfig, SmartMotor},
    },
};

use crate::{
    competition::Compete,
    config::{ConfigError, MOTORS_PER_SIDE, RobotConfig},
    delay::Delay,
    display::StatusDisplay,
    teleop::{ArmInputs, DriveSticks, TeleopOutputs},
};

/// One side of the drivetrain.
pub type DriveSide<M> = MotorGroup<M, MOTORS_PER_SIDE>;

/// A six-motor tank drive robot with two arms.
#[derive(Debug)]
pub struct Robot<C, M, L, D> {
    config: RobotConfig,
    controller: C,
    left_drive: DriveSide<M>,
    right_drive: DriveSide<M>,
    left_arm: M,
    right_arm: M,
    display: StatusDisplay<L>,
    delay: D,
}

fn build_side<M: SmartMotor>(
    side: [MotorConfig; MOTORS_PER_SIDE],
    make_motor: &mut impl FnMut(MotorConfig) -> Result<M, ConfigError>,
) -> Result<DriveSide<M>, ConfigError> {
    let [front, middle, back] = side;
    Ok(MotorGroup::new([
        make_motor(front)?,
        make_motor(middle)?,
        make_motor(back)?,
    ]))
}

impl<C, M, L, D> Robot<C, M, L, D>
where
    C: ControllerInput,
    M: SmartMotor,
    L: Llemu,
    D: Delay,
{
    /// Builds the robot described by `config`.
    ///
    /// `make_motor` is called once for every motor, left drive first, then right drive, then the
    /// left and right arms.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not pass [`RobotConfig::validate`], or if `make_motor`
    /// fails.
    pub fn new(
        config: RobotConfig,
        controller: C,
        lcd: L,
        delay: D,
        mut make_motor: impl FnMut(MotorConfig) -> Result<M, ConfigError>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            left_drive: build_side(config.drivetrain.left, &mut make_motor)?,
            right_drive: build_side(config.drivetrain.right, &mut make_motor)?,
            left_arm: make_motor(config.left_arm)?,
            right_arm: make_motor(config.right_arm)?,
            config,
            controller,
            display: StatusDisplay::new(lcd),
            delay,
        })
    }

    /// Runs one operator control iteration without waiting.
    ///
    /// Services the brain screen, reads the drive sticks and commands the drivetrain, then reads
    /// the arm buttons and commands the arms. Device failures are logged and do not stop the
    /// iteration.
    pub fn teleop_tick(&mut self) -> TeleopOutputs {
        if let Err(err) = self.display.refresh() {
            warn!("failed to update brain screen: {err}");
        }

        let sticks = DriveSticks::sample(&self.controller, &self.config.bindings);
        let drive = sticks.command(self.config.drive_gain);
        trace!("{sticks:?} -> {drive:?}");

        if let Err(err) = self.left_drive.set_velocity(drive.left) {
            warn!("left drive: {err}");
        }
        if let Err(err) = self.right_drive.set_velocity(drive.right) {
            warn!("right drive: {err}");
        }

        let buttons = ArmInputs::sample(&self.controller, &self.config.bindings);
        let arms = buttons.command(self.config.arm_velocity);
        trace!("{buttons:?} -> {arms:?}");

        if let Some(velocity) = arms.right
            && let Err(err) = self.right_arm.set_velocity(velocity)
        {
            warn!("right arm: {err}");
        }
        if let Some(velocity) = arms.left
            && let Err(err) = self.left_arm.set_velocity(velocity)
        {
            warn!("left arm: {err}");
        }

        TeleopOutputs { drive, arms }
    }

    /// Watches the center console button until the running hook is preempted.
    async fn idle(&mut self) {
        loop {
            if let Err(err) = self.display.service_center_button() {
                warn!("failed to update brain screen: {err}");
            }
            self.delay.delay(self.config.tick).await;
        }
    }

    /// Brain screen.
    pub const fn display(&self) -> &StatusDisplay<L> {
        &self.display
    }
}

impl<C, M, L, D> Compete for Robot<C, M, L, D>
where
    C: ControllerInput,
    M: SmartMotor,
    L: Llemu,
    D: Delay,
{
    async fn initialize(&mut self) {
        info!("initializing");

        if let Err(err) = self.display.greet() {
            warn!("failed to write greeting: {err}");
        }
    }

    async fn disabled(&mut self) {
        info!("disabled");
        self.idle().await;
    }

    async fn competition_initialize(&mut self) {
        info!("connected to competition control");
        self.idle().await;
    }

    async fn autonomous(&mut self) {
        info!("autonomous");
        self.idle().await;
    }

    async fn opcontrol(&mut self) {
        info!("driver control");

        loop {
            self.teleop_tick();
            self.delay.delay(self.config.tick).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, vec::Vec};
    use core::{cell::RefCell, pin::pin, task::Poll, time::Duration};

    use sixbot_devices::{
        controller::{ControllerButton, ControllerError, JoystickAxis},
        llemu::LcdButtons,
        sim::{
            SimController, SimControllerHandle, SimLlemu, SimLlemuHandle, SimMotor, SimMotorHandle,
        },
        smart::motor::MotorControl,
    };

    use super::*;
    use crate::{
        delay::testing::{StepDelay, poll_once},
        display::{BUTTON_STATUS_LINE, GREETING, GREETING_LINE, PRESSED_MESSAGE, TOGGLE_LINE},
    };

    type SimRobot<'a> = Robot<SimController, SimMotor, SimLlemu, &'a StepDelay>;

    struct Bench {
        pad: SimControllerHandle,
        screen: SimLlemuHandle,
        motors: Vec<SimMotorHandle>,
    }

    impl Bench {
        fn left_drive(&self) -> &[SimMotorHandle] {
            &self.motors[0..3]
        }

        fn right_drive(&self) -> &[SimMotorHandle] {
            &self.motors[3..6]
        }

        fn left_arm(&self) -> &SimMotorHandle {
            &self.motors[6]
        }

        fn right_arm(&self) -> &SimMotorHandle {
            &self.motors[7]
        }
    }

    fn build(delay: &StepDelay) -> (SimRobot<'_>, Bench) {
        let controller = SimController::new();
        let lcd = SimLlemu::new();
        let pad = controller.handle();
        let screen = lcd.handle();
        let mut motors = Vec::new();

        let robot = Robot::new(RobotConfig::DEFAULT, controller, lcd, delay, |config| {
            let motor = SimMotor::new(config);
            motors.push(motor.handle());
            Ok(motor)
        })
        .unwrap();

        (
            robot,
            Bench {
                pad,
                screen,
                motors,
            },
        )
    }

    #[test]
    fn motors_follow_config_order() {
        let delay = StepDelay::default();
        let (_robot, bench) = build(&delay);

        let ports: Vec<u8> = bench.motors.iter().map(|m| m.config().port).collect();
        assert_eq!(ports, [11, 12, 13, 1, 2, 3, 5, 4]);
    }

    #[test]
    fn rejects_invalid_config() {
        let delay = StepDelay::default();
        let mut config = RobotConfig::DEFAULT;
        config.right_arm.port = 0;

        let result: Result<SimRobot<'_>, _> = Robot::new(
            config,
            SimController::new(),
            SimLlemu::new(),
            &delay,
            |config| Ok(SimMotor::new(config)),
        );
        assert!(matches!(result, Err(ConfigError::InvalidPort { port: 0 })));
    }

    #[test]
    fn tank_drive_reaches_every_motor() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        bench.pad.set_axis(JoystickAxis::LeftY, 50);
        bench.pad.set_axis(JoystickAxis::RightY, -30);
        robot.teleop_tick();

        for motor in bench.left_drive() {
            assert_eq!(motor.target(), MotorControl::Velocity(30_000));
        }
        for motor in bench.right_drive() {
            assert_eq!(motor.target(), MotorControl::Velocity(-18_000));
        }
        assert_eq!(bench.left_arm().commands(), 0);
        assert_eq!(bench.right_arm().commands(), 0);
    }

    #[test]
    fn arm_holds_last_command_after_release() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        bench.pad.press(ControllerButton::R1);
        robot.teleop_tick();
        assert_eq!(bench.right_arm().target(), MotorControl::Velocity(100));

        bench.pad.release(ControllerButton::R1);
        robot.teleop_tick();
        robot.teleop_tick();
        assert_eq!(bench.right_arm().target(), MotorControl::Velocity(100));
        assert_eq!(bench.right_arm().commands(), 1);

        bench.pad.press(ControllerButton::L2);
        robot.teleop_tick();
        assert_eq!(bench.left_arm().target(), MotorControl::Velocity(-100));
        assert_eq!(bench.right_arm().commands(), 1);
    }

    #[test]
    fn up_wins_when_both_arm_buttons_held() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        bench.pad.press(ControllerButton::L1);
        bench.pad.press(ControllerButton::L2);
        robot.teleop_tick();

        assert_eq!(bench.left_arm().target(), MotorControl::Velocity(100));
    }

    #[test]
    fn offline_controller_stops_drive() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        bench.pad.set_axis(JoystickAxis::LeftY, 127);
        robot.teleop_tick();
        assert_eq!(
            bench.left_drive()[0].target(),
            MotorControl::Velocity(127 * 600)
        );

        bench.pad.set_connected(false);
        robot.teleop_tick();
        for motor in bench.left_drive().iter().chain(bench.right_drive()) {
            assert_eq!(motor.target(), MotorControl::Velocity(0));
        }
    }

    #[test]
    fn unplugged_motor_does_not_stop_the_rest() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        bench.right_drive()[1].set_connected(false);
        bench.pad.set_axis(JoystickAxis::RightY, 10);
        bench.pad.press(ControllerButton::R2);
        robot.teleop_tick();

        assert_eq!(bench.right_drive()[0].target(), MotorControl::Velocity(6000));
        assert_eq!(bench.right_drive()[1].commands(), 0);
        assert_eq!(bench.right_drive()[2].target(), MotorControl::Velocity(6000));
        assert_eq!(bench.right_arm().target(), MotorControl::Velocity(-100));
    }

    #[test]
    fn initialize_greets() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        let mut init = pin!(robot.initialize());
        assert_eq!(poll_once(init.as_mut()), Poll::Ready(()));
        assert_eq!(bench.screen.line(GREETING_LINE), GREETING);
    }

    #[test]
    fn opcontrol_waits_one_tick_per_iteration() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        bench.pad.set_axis(JoystickAxis::LeftY, 50);
        {
            let mut run = pin!(robot.opcontrol());
            for _ in 0..4 {
                assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            }
        }

        assert_eq!(delay.durations(), [Duration::from_millis(20); 4]);
        assert_eq!(bench.left_drive()[2].commands(), 4);
    }

    #[test]
    fn opcontrol_services_brain_screen() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        let mut run = pin!(robot.opcontrol());
        assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        assert_eq!(bench.screen.line(BUTTON_STATUS_LINE), "0 0 0");

        bench.screen.set_buttons(LcdButtons::CENTER);
        assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        assert_eq!(bench.screen.line(BUTTON_STATUS_LINE), "0 1 0");
        assert_eq!(bench.screen.line(TOGGLE_LINE), PRESSED_MESSAGE);

        assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        assert_eq!(bench.screen.line(TOGGLE_LINE), PRESSED_MESSAGE);

        bench.screen.set_buttons(LcdButtons::empty());
        assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        bench.screen.set_buttons(LcdButtons::CENTER);
        assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        assert_eq!(bench.screen.line(TOGGLE_LINE), "");
    }

    #[test]
    fn center_button_toggles_outside_driver_control() {
        let delay = StepDelay::default();
        let (mut robot, bench) = build(&delay);

        {
            let mut run = pin!(robot.disabled());
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            bench.screen.set_buttons(LcdButtons::CENTER);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        }
        assert_eq!(bench.screen.line(TOGGLE_LINE), PRESSED_MESSAGE);
        assert_eq!(bench.screen.line(BUTTON_STATUS_LINE), "");
        assert!(robot.display().toggle().is_on());

        bench.screen.set_buttons(LcdButtons::empty());
        {
            let mut run = pin!(robot.competition_initialize());
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            bench.screen.set_buttons(LcdButtons::CENTER);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        }
        assert_eq!(bench.screen.line(TOGGLE_LINE), "");

        bench.screen.set_buttons(LcdButtons::empty());
        {
            let mut run = pin!(robot.autonomous());
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            bench.screen.set_buttons(LcdButtons::CENTER);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        }
        assert_eq!(bench.screen.line(TOGGLE_LINE), PRESSED_MESSAGE);

        assert!(delay.durations().iter().all(|&d| d == Duration::from_millis(20)));
        for motor in &bench.motors {
            assert_eq!(motor.commands(), 0);
        }
    }

    /// Records how many commands the drivetrain had received each time a button was read.
    #[derive(Debug, Default)]
    struct OrderingController {
        drive: Rc<RefCell<Option<SimMotorHandle>>>,
        commands_at_button_read: Rc<RefCell<Vec<usize>>>,
    }

    impl ControllerInput for OrderingController {
        fn analog(&self, _axis: JoystickAxis) -> Result<i8, ControllerError> {
            Ok(10)
        }

        fn digital(&self, _button: ControllerButton) -> Result<bool, ControllerError> {
            if let Some(motor) = self.drive.borrow().as_ref() {
                self.commands_at_button_read
                    .borrow_mut()
                    .push(motor.commands());
            }
            Ok(false)
        }
    }

    #[test]
    fn drive_is_commanded_before_buttons_are_read() {
        let delay = StepDelay::default();
        let controller = OrderingController::default();
        let drive = controller.drive.clone();
        let seen = controller.commands_at_button_read.clone();
        let mut motors = Vec::new();

        let mut robot = Robot::new(
            RobotConfig::DEFAULT,
            controller,
            SimLlemu::new(),
            &delay,
            |config| {
                let motor = SimMotor::new(config);
                motors.push(motor.handle());
                Ok(motor)
            },
        )
        .unwrap();
        *drive.borrow_mut() = Some(motors[5].clone());

        robot.teleop_tick();
        assert_eq!(*seen.borrow(), [1, 1, 1, 1]);

        robot.teleop_tick();
        assert_eq!(seen.borrow()[4..], [2, 2, 2, 2]);
    }
}
