//! Asynchronous tasks.

use core::future::Future;

use crate::executor::EXECUTOR;

/// A spawned task.
///
/// A [`Task`] can be awaited to retrieve the output of its future.
///
/// Dropping a [`Task`] cancels it, which means its future won't be polled again. To drop the
/// [`Task`] handle without canceling it, use [`detach()`][`Task::detach()`] instead.
///
/// # Examples
///
/// ```
/// use sixbot_async::{block_on, spawn};
///
/// let sum = block_on(async {
///     // Spawn a future onto the executor.
///     let task = spawn(async { 1 + 2 });
///
///     // Wait for the task's output.
///     task.await
/// });
///
/// assert_eq!(sum, 3);
/// ```
pub type Task<T> = async_task::Task<T>;

/// Spawns a new async task that can be controlled with the returned task handle.
///
/// The task runs on the calling thread's executor while that thread is inside
/// [`block_on`](crate::block_on).
pub fn spawn<T: 'static>(future: impl Future<Output = T> + 'static) -> Task<T> {
    EXECUTOR.with(|ex| ex.spawn(future))
}
