//! # Callback module
//!
//! This module contains the [`Callback`] trait which receives the outcome of
//! a dispatched request, and closure based implementations of it.
//!
//! # Synchronization
//!
//! Callbacks are invoked on the thread the runtime uses to poll the send task,
//! never on the thread that called [`Request::send_async`]. Exactly one of
//! [`Callback::on_success`] and [`Callback::on_failed`] is invoked per
//! request; both consume the callback.
//!
//! [`Request::send_async`]: ../../dx/request/struct.Request.html#method.send_async

use super::{Failure, RestCallError};

/// Two-branch result sink of a request.
///
/// # Examples
/// ```
/// use restcall::core::{Callback, RestCallError};
///
/// struct PrintToken;
///
/// impl Callback<String> for PrintToken {
///     fn on_success(self: Box<Self>, token: String) {
///         println!("token: {token}");
///     }
///
///     fn on_failed(self: Box<Self>, code: u16, message: String, cause: RestCallError) {
///         println!("request failed: {code} {message} ({cause})");
///     }
/// }
/// ```
pub trait Callback<T>: Send {
    /// Called with the decoded result of a `200` response.
    fn on_success(self: Box<Self>, response: T);

    /// Called with the failure triple of any other outcome.
    fn on_failed(self: Box<Self>, code: u16, message: String, cause: RestCallError);
}

/// Callback made of two closures.
///
/// Created with [`callback`].
///
/// [`callback`]: fn.callback.html
pub struct FnCallback<S, F> {
    on_success: S,
    on_failed: F,
}

impl<T, S, F> Callback<T> for FnCallback<S, F>
where
    S: FnOnce(T) + Send,
    F: FnOnce(u16, String, RestCallError) + Send,
{
    fn on_success(self: Box<Self>, response: T) {
        (self.on_success)(response)
    }

    fn on_failed(self: Box<Self>, code: u16, message: String, cause: RestCallError) {
        (self.on_failed)(code, message, cause)
    }
}

/// Create a callback from a success closure and a failure closure.
///
/// # Examples
/// ```
/// use restcall::core::{callback, Callback, RestCallError};
///
/// let cb = callback(
///     |token: String| println!("token: {token}"),
///     |code: u16, message: String, _cause: RestCallError| println!("failed: {code} {message}"),
/// );
/// # fn accepts<C: Callback<String>>(_: C) {}
/// # accepts(cb);
/// ```
pub fn callback<S, F>(on_success: S, on_failed: F) -> FnCallback<S, F> {
    FnCallback {
        on_success,
        on_failed,
    }
}

/// Callback made of one closure receiving a `Result`.
///
/// Created with [`on_complete`].
///
/// [`on_complete`]: fn.on_complete.html
pub struct OutcomeCallback<F> {
    on_complete: F,
}

impl<T, F> Callback<T> for OutcomeCallback<F>
where
    F: FnOnce(Result<T, Failure>) + Send,
{
    fn on_success(self: Box<Self>, response: T) {
        (self.on_complete)(Ok(response))
    }

    fn on_failed(self: Box<Self>, code: u16, message: String, cause: RestCallError) {
        (self.on_complete)(Err(Failure::new(code, message, cause)))
    }
}

/// Create a callback from a closure receiving the request outcome.
pub fn on_complete<F>(on_complete: F) -> OutcomeCallback<F> {
    OutcomeCallback { on_complete }
}
