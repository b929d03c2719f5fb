//! Yielding to the scheduler.
//!
//! Every loop in the program suspends only through a [`Delay`]. On the brain and on a desktop
//! host this is [`SleepDelay`], which parks the task on the runtime's timer.

use core::{future::Future, time::Duration};

/// Something that can suspend the current task for a period of time.
pub trait Delay {
    /// Returns a future that completes once `duration` has passed.
    fn delay(&self, duration: Duration) -> impl Future<Output = ()>;
}

impl<D: Delay + ?Sized> Delay for &D {
    fn delay(&self, duration: Duration) -> impl Future<Output = ()> {
        (**self).delay(duration)
    }
}

/// Sleeps on the async runtime's timer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SleepDelay;

impl Delay for SleepDelay {
    fn delay(&self, duration: Duration) -> impl Future<Output = ()> {
        #[cfg(target_os = "vexos")]
        {
            vexide::prelude::sleep(duration)
        }
        #[cfg(not(target_os = "vexos"))]
        {
            sixbot_async::time::sleep(duration)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use core::{
        cell::{Cell, RefCell},
        future::Future,
        pin::Pin,
        task::{Context, Poll},
        time::Duration,
    };

    use alloc::vec::Vec;
    use futures_util::task::noop_waker_ref;

    use super::Delay;

    /// A delay that yields exactly once, so every poll of a loop runs exactly one iteration.
    #[derive(Debug, Default)]
    pub struct StepDelay {
        calls: Cell<usize>,
        durations: RefCell<Vec<Duration>>,
    }

    impl StepDelay {
        pub fn calls(&self) -> usize {
            self.calls.get()
        }

        pub fn durations(&self) -> Vec<Duration> {
            self.durations.borrow().clone()
        }
    }

    impl Delay for StepDelay {
        fn delay(&self, duration: Duration) -> impl Future<Output = ()> {
            self.calls.set(self.calls.get() + 1);
            self.durations.borrow_mut().push(duration);
            YieldOnce { yielded: false }
        }
    }

    pub struct YieldOnce {
        yielded: bool,
    }

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.yielded {
                Poll::Ready(())
            } else {
                self.yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    /// Polls `future` once with a waker that does nothing.
    pub fn poll_once<F: Future + ?Sized>(future: Pin<&mut F>) -> Poll<F::Output> {
        future.poll(&mut Context::from_waker(noop_waker_ref()))
    }
}
