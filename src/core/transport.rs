//! # Transport module
//!
//! This module contains the [`Transport`] trait.
//!
//! You can implement this trait for your own types, or use one of the provided
//! features to use a transport library.

use super::{RestCallError, TransportRequest, TransportResponse};

/// This trait is used to send requests built by the binder.
///
/// A transport connects to the host and port of the request URI, writes the
/// request and returns the complete response. It must not decode the body; it
/// reports malformed response framing through
/// [`TransportResponse::malformed`].
///
/// Connection errors should be reported as [`RestCallError::Connect`], a
/// transport-side timeout as [`RestCallError::Timeout`] and anything else as
/// [`RestCallError::Transport`].
///
/// # Examples
/// ```
/// use restcall::core::{Transport, TransportRequest, TransportResponse, RestCallError};
///
/// struct MyTransport;
///
/// #[async_trait::async_trait]
/// impl Transport for MyTransport {
///    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, RestCallError> {
///         // Send your request here
///
///         Ok(TransportResponse::default())
///    }
/// }
/// ```
///
/// [`TransportResponse::malformed`]: ../transport_response/struct.TransportResponse.html#structfield.malformed
/// [`RestCallError::Connect`]: ../enum.RestCallError.html#variant.Connect
/// [`RestCallError::Timeout`]: ../enum.RestCallError.html#variant.Timeout
/// [`RestCallError::Transport`]: ../enum.RestCallError.html#variant.Transport
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the complete response.
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, RestCallError>;
}
