//! This module contains the task spawning trait used to dispatch requests.
//!
//! The [`Runtime`] trait is used by [`Request::send_async`] to run the send
//! task without blocking the caller.
//!
//! [`Request::send_async`]: ../../dx/request/struct.Request.html#method.send_async

use futures::future::BoxFuture;

/// Async tasks runtime.
///
/// The spawned future must be polled to completion by the runtime's event
/// loop. Callbacks of dispatched requests run on whatever thread the runtime
/// polls the future on.
///
/// # Examples
/// ```
/// use futures::future::BoxFuture;
/// use restcall::core::Runtime;
///
/// struct MyRuntime;
///
/// impl Runtime for MyRuntime {
///    fn spawn(&self, future: BoxFuture<'static, ()>) {
///       // spawn the Future
///       // e.g. tokio::spawn(future);
///    }
/// }
/// ```
pub trait Runtime: Send + Sync {
    /// Spawn a task.
    fn spawn(&self, future: BoxFuture<'static, ()>);
}
