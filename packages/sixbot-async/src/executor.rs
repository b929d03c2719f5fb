use std::{
    cell::RefCell,
    collections::VecDeque,
    future::Future,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    task::{Context, Poll},
    thread,
    time::Instant,
};

use async_task::Runnable;
use waker_fn::waker_fn;

use super::reactor::Reactor;
use crate::task::Task;

thread_local! {
    pub(crate) static EXECUTOR: Executor = const { Executor::new() };
}

pub(crate) struct Executor {
    queue: RefCell<VecDeque<Runnable>>,
    reactor: RefCell<Reactor>,
}

impl Executor {
    pub const fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            reactor: RefCell::new(Reactor::new()),
        }
    }

    pub fn spawn<T: 'static>(&self, future: impl Future<Output = T> + 'static) -> Task<T> {
        // `spawn_local` panics if the runnable is ever woken from another thread, so the
        // schedule function only has to reach this thread's queue.
        let (runnable, task) = async_task::spawn_local(future, |runnable| {
            EXECUTOR.with(|ex| ex.queue.borrow_mut().push_back(runnable));
        });

        runnable.schedule();

        task
    }

    /// Run the provided closure with the reactor.
    pub(crate) fn with_reactor<R>(&self, f: impl FnOnce(&mut Reactor) -> R) -> R {
        f(&mut self.reactor.borrow_mut())
    }

    /// Wakes expired sleepers and runs at most one queued task.
    ///
    /// Returns `false` if there was nothing to run.
    pub(crate) fn tick(&self) -> bool {
        self.reactor.borrow_mut().tick(Instant::now());

        let runnable = self.queue.borrow_mut().pop_front();

        if let Some(runnable) = runnable {
            runnable.run();
            true
        } else {
            false
        }
    }

    /// Parks the thread until the earliest sleeper is due or the root task is woken.
    fn park(&self) {
        let deadline = self.reactor.borrow().next_deadline();

        match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if deadline > now {
                    thread::park_timeout(deadline - now);
                }
            }
            None => thread::park(),
        }
    }

    pub fn block_on<R>(&self, mut task: Task<R>) -> R {
        let woken = Arc::new(AtomicBool::new(true));

        let waker = waker_fn({
            let woken = woken.clone();
            let thread = thread::current();
            move || {
                woken.store(true, Ordering::Relaxed);
                thread.unpark();
            }
        });
        let mut cx = Context::from_waker(&waker);

        loop {
            if woken.swap(false, Ordering::Relaxed) {
                if let Poll::Ready(output) = Pin::new(&mut task).poll(&mut cx) {
                    return output;
                }
            }

            if !self.tick() && !woken.load(Ordering::Relaxed) {
                self.park();
            }
        }
    }
}
