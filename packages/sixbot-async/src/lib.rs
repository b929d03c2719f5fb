//! Tiny async runtime for running `sixbot` on a desktop host.
//!
//! The async executor supports spawning tasks and blocking on futures.
//! It has a reactor to wake sleeping tasks at their deadlines.
//!
//! The executor is thread-local: every thread that calls [`block_on`] drives its own queue, and
//! tasks never leave the thread that spawned them.

mod executor;
mod reactor;

pub mod task;
pub mod time;

use core::future::Future;

use executor::EXECUTOR;
pub use task::spawn;

/// Blocks the current thread until a return value can be extracted from the provided future.
///
/// Tasks spawned onto this thread keep running while the future is pending. They are not polled
/// to completion once it resolves.
pub fn block_on<F: Future + 'static>(future: F) -> F::Output {
    let task = spawn(future);
    EXECUTOR.with(|ex| ex.block_on(task))
}
