//! Competition lifecycle.
//!
//! A competition program is a set of hooks, one per [`Phase`] of a match, driven by the status
//! reported from field control or a competition switch. [`compete`] runs the hook for the current
//! phase and cancels it as soon as the status changes, so a hook that loops forever (such as
//! operator control) ends at the next mode change and is started fresh the next time its phase
//! comes around.

use core::{pin::pin, time::Duration};

use futures_util::future::{Either, select};
use log::debug;
use sixbot_devices::competition::{CompetitionMode, CompetitionSource, CompetitionStatus};

use crate::delay::Delay;

/// How often the competition status is sampled while a hook runs.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A set of tasks to run when the competition is in a particular mode.
#[allow(async_fn_in_trait)]
pub trait Compete: Sized {
    /// Runs once when the program starts, before any other hook.
    async fn initialize(&mut self) {}
    /// Runs while the robot is disabled.
    async fn disabled(&mut self) {}
    /// Runs when the robot connects to competition control while disabled.
    async fn competition_initialize(&mut self) {}
    /// Runs when the robot is put into autonomous mode.
    async fn autonomous(&mut self) {}
    /// Runs when the robot is put into driver control mode, or immediately after
    /// [`initialize`](Compete::initialize) when no competition control is connected.
    async fn opcontrol(&mut self) {}
}

/// The hook that should be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// [`Compete::disabled`]
    Disabled,
    /// [`Compete::competition_initialize`]
    CompetitionInitialize,
    /// [`Compete::autonomous`]
    Autonomous,
    /// [`Compete::opcontrol`]
    Opcontrol,
}

impl Phase {
    /// Picks the phase for a status change from `previous` to `current`.
    ///
    /// `previous` is [`None`] for the first status sample of the program.
    #[must_use]
    pub fn from_transition(previous: Option<CompetitionStatus>, current: CompetitionStatus) -> Self {
        match current.mode() {
            CompetitionMode::Disabled => {
                let was_connected = previous.is_some_and(|status| status.connected());
                if current.connected() && !was_connected {
                    Self::CompetitionInitialize
                } else {
                    Self::Disabled
                }
            }
            CompetitionMode::Autonomous => Self::Autonomous,
            CompetitionMode::Driver => Self::Opcontrol,
        }
    }
}

async fn run_phase<R: Compete>(robot: &mut R, phase: Phase) {
    match phase {
        Phase::Disabled => robot.disabled().await,
        Phase::CompetitionInitialize => robot.competition_initialize().await,
        Phase::Autonomous => robot.autonomous().await,
        Phase::Opcontrol => robot.opcontrol().await,
    }
}

/// Resolves with the next status that differs from `last`, or [`None`] when the source ends.
async fn next_change<S: CompetitionSource, D: Delay>(
    source: &mut S,
    delay: &D,
    last: CompetitionStatus,
) -> Option<CompetitionStatus> {
    loop {
        delay.delay(STATUS_POLL_INTERVAL).await;

        match source.status() {
            None => return None,
            Some(status) if status != last => return Some(status),
            Some(_) => {}
        }
    }
}

/// Runs `robot` through the competition lifecycle reported by `source`.
///
/// [`Compete::initialize`] runs to completion first. After that, the hook for the current phase
/// runs until either it returns or the status changes. A status change drops the running hook.
///
/// Returns once `source` reports that the match is over, dropping whatever hook was running.
pub async fn compete<R, S, D>(robot: &mut R, source: &mut S, delay: &D)
where
    R: Compete,
    S: CompetitionSource,
    D: Delay,
{
    robot.initialize().await;

    let Some(mut status) = source.status() else {
        return;
    };
    let mut phase = Phase::from_transition(None, status);

    loop {
        debug!("entering {phase:?} ({status:?})");

        let next = {
            let hook = pin!(run_phase(robot, phase));
            let change = pin!(next_change(source, delay, status));

            match select(hook, change).await {
                Either::Left(((), change)) => {
                    debug!("{phase:?} finished");
                    change.await
                }
                Either::Right((next, _)) => {
                    debug!("{phase:?} preempted");
                    next
                }
            }
        };

        let Some(next) = next else {
            debug!("competition status source ended");
            return;
        };

        phase = Phase::from_transition(Some(status), next);
        status = next;
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};
    use core::task::Poll;

    use sixbot_devices::sim::SimCompetition;

    use super::*;
    use crate::delay::testing::{StepDelay, poll_once};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Initialize,
        Disabled,
        CompetitionInitialize,
        Autonomous,
        OpcontrolTick,
    }

    struct Recorder<'a> {
        events: Vec<Event>,
        delay: &'a StepDelay,
    }

    impl Compete for Recorder<'_> {
        async fn initialize(&mut self) {
            self.events.push(Event::Initialize);
        }

        async fn disabled(&mut self) {
            self.events.push(Event::Disabled);
        }

        async fn competition_initialize(&mut self) {
            self.events.push(Event::CompetitionInitialize);
        }

        async fn autonomous(&mut self) {
            self.events.push(Event::Autonomous);
        }

        async fn opcontrol(&mut self) {
            loop {
                self.events.push(Event::OpcontrolTick);
                self.delay.delay(Duration::from_millis(20)).await;
            }
        }
    }

    #[test]
    fn phase_selection() {
        let connected_disabled = CompetitionStatus::CONNECTED | CompetitionStatus::DISABLED;

        assert_eq!(
            Phase::from_transition(None, CompetitionStatus::empty()),
            Phase::Opcontrol
        );
        assert_eq!(
            Phase::from_transition(None, connected_disabled),
            Phase::CompetitionInitialize
        );
        assert_eq!(
            Phase::from_transition(Some(CompetitionStatus::CONNECTED), connected_disabled),
            Phase::Disabled
        );
        assert_eq!(
            Phase::from_transition(
                Some(connected_disabled),
                CompetitionStatus::CONNECTED | CompetitionStatus::AUTONOMOUS
            ),
            Phase::Autonomous
        );
        assert_eq!(
            Phase::from_transition(None, CompetitionStatus::DISABLED),
            Phase::Disabled
        );
    }

    #[test]
    fn opcontrol_runs_immediately_without_field_control() {
        let tick_delay = StepDelay::default();
        let poll_delay = StepDelay::default();
        let mut robot = Recorder {
            events: Vec::new(),
            delay: &tick_delay,
        };
        let mut switch = SimCompetition::new(CompetitionStatus::empty());

        {
            let mut run = pin!(compete(&mut robot, &mut switch, &poll_delay));
            for _ in 0..3 {
                assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            }
        }

        assert_eq!(
            robot.events,
            vec![
                Event::Initialize,
                Event::OpcontrolTick,
                Event::OpcontrolTick,
                Event::OpcontrolTick,
            ]
        );
        assert_eq!(tick_delay.calls(), 3);
    }

    #[test]
    fn mode_change_preempts_opcontrol() {
        let tick_delay = StepDelay::default();
        let poll_delay = StepDelay::default();
        let mut robot = Recorder {
            events: Vec::new(),
            delay: &tick_delay,
        };
        let mut switch = SimCompetition::new(CompetitionStatus::empty());
        let field = switch.handle();

        {
            let mut run = pin!(compete(&mut robot, &mut switch, &poll_delay));
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);

            field.set_status(CompetitionStatus::CONNECTED | CompetitionStatus::DISABLED);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);

            field.set_status(CompetitionStatus::CONNECTED | CompetitionStatus::AUTONOMOUS);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);

            field.end();
            assert_eq!(poll_once(run.as_mut()), Poll::Ready(()));
        }

        assert_eq!(
            robot.events,
            vec![
                Event::Initialize,
                Event::OpcontrolTick,
                Event::OpcontrolTick,
                // The tick in flight when the switch flipped still runs before the status poll
                // observes the change.
                Event::OpcontrolTick,
                Event::CompetitionInitialize,
                Event::Autonomous,
            ]
        );
    }

    #[test]
    fn reconnecting_reruns_competition_initialize() {
        let tick_delay = StepDelay::default();
        let poll_delay = StepDelay::default();
        let mut robot = Recorder {
            events: Vec::new(),
            delay: &tick_delay,
        };
        let disabled = CompetitionStatus::CONNECTED | CompetitionStatus::DISABLED;
        let mut switch = SimCompetition::new(disabled);
        let field = switch.handle();

        {
            let mut run = pin!(compete(&mut robot, &mut switch, &poll_delay));
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);

            field.set_status(CompetitionStatus::DISABLED);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);

            field.set_status(disabled);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
            assert_eq!(poll_once(run.as_mut()), Poll::Pending);
        }

        assert_eq!(
            robot.events,
            vec![
                Event::Initialize,
                Event::CompetitionInitialize,
                Event::Disabled,
                Event::CompetitionInitialize,
            ]
        );
    }

    #[test]
    fn ended_source_skips_every_phase() {
        let delay = StepDelay::default();
        let mut robot = Recorder {
            events: Vec::new(),
            delay: &delay,
        };
        let mut switch = SimCompetition::new(CompetitionStatus::empty());
        switch.handle().end();

        {
            let mut run = pin!(compete(&mut robot, &mut switch, &delay));
            assert_eq!(poll_once(run.as_mut()), Poll::Ready(()));
        }

        assert_eq!(robot.events, vec![Event::Initialize]);
    }
}
