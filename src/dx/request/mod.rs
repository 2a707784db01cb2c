//! # Request descriptor
//!
//! This module contains the [`Request`] type produced by every call on a bound
//! interface. A request holds everything needed to talk to the remote side:
//! target URI, verb, headers and body, together with the codec, transport and
//! runtime it will be dispatched with.
//!
//! A request is sent with [`Request::send_async`], which reports the outcome
//! through a [`Callback`], or awaited with [`Request::execute`]. Both consume
//! the request.
//!
//! [`Callback`]: ../../core/callback/trait.Callback.html

pub use multipart::{MultipartEncoder, Part, DEFAULT_BOUNDARY};
pub mod multipart;

pub use response_handler::{HandlerState, ResponseHandler};
pub mod response_handler;

use crate::core::{
    utils::headers::{ACCEPT, APPLICATION_JSON, CONTENT_LENGTH, CONTENT_TYPE},
    Callback, Failure, Headers, HttpMethod, JsonCodec, RestCallError, Runtime, Transport,
    TransportRequest,
};
use http::Uri;
use log::debug;
use serde::de::DeserializeOwned;
use std::{fmt::Debug, marker::PhantomData, sync::Arc};
use uuid::Uuid;

/// Body of a request.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Body {
    /// JSON text, or nothing.
    Plain(Option<Vec<u8>>),

    /// Ordered multipart parts, encoded when the request is sent.
    Multipart(Vec<Part>),
}

/// Fully populated, not yet sent HTTP request.
///
/// `T` is the type the `200` response body is decoded into.
///
/// # Examples
/// ```no_run
/// use restcall::{interface, BinderBuilder};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct LoginForm {
///     account: String,
///     password: String,
/// }
///
/// #[derive(Deserialize, Debug)]
/// struct LoginResponse {
///     code: i32,
/// }
///
/// interface! {
///     pub struct UserService at "/user" {
///         POST "/login" => fn login(body model: &LoginForm) -> LoginResponse;
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let users = BinderBuilder::new()
///     .base_url("http://localhost:8080")
///     .bind::<UserService>()?;
///
/// let form = LoginForm {
///     account: "111".into(),
///     password: "123".into(),
/// };
/// let response = users.login(&form)?.execute().await?;
/// println!("{response:?}");
/// # Ok(())
/// # }
/// ```
pub struct Request<T> {
    pub(crate) id: Uuid,
    pub(crate) uri: Uri,
    pub(crate) method: HttpMethod,
    pub(crate) headers: Headers,
    pub(crate) body: Body,
    pub(crate) boundary: String,
    pub(crate) max_body_size: Option<u64>,
    pub(crate) codec: Arc<dyn JsonCodec>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) runtime: Arc<dyn Runtime>,
    pub(crate) _result: PhantomData<fn() -> T>,
}

impl<T> Request<T> {
    /// Request id used in logs.
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// Target URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// HTTP verb.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Headers collected from the binder, the interface and the method.
    ///
    /// `Accept`, `Content-Type` and `Content-Length` are added when the
    /// request is sent.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Request body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Whether the body is sent as `multipart/form-data`.
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, Body::Multipart(_))
    }

    /// Build the wire-ready request.
    ///
    /// Multipart bodies are encoded here, upload files are read by this call.
    pub fn transport_request(&self) -> Result<TransportRequest, RestCallError> {
        let mut headers = self.headers.clone();
        if !headers.contains(ACCEPT) {
            headers.add(ACCEPT, APPLICATION_JSON);
        }

        let (content_type, body) = match &self.body {
            Body::Plain(body) => {
                self.check_size(body.as_ref().map_or(0, Vec::len) as u64)?;
                (APPLICATION_JSON.to_string(), body.clone())
            }
            Body::Multipart(parts) => {
                let encoder = MultipartEncoder::new(&self.boundary);
                self.check_size(encoder.encoded_len(parts)?)?;
                (encoder.content_type(), Some(encoder.encode(parts)?))
            }
        };

        headers.set(CONTENT_TYPE, content_type);
        headers.set(
            CONTENT_LENGTH,
            body.as_ref().map_or(0, Vec::len).to_string(),
        );

        Ok(TransportRequest {
            uri: self.uri.clone(),
            method: self.method,
            headers,
            body,
        })
    }

    fn check_size(&self, len: u64) -> Result<(), RestCallError> {
        match self.max_body_size {
            Some(limit) if len > limit => Err(RestCallError::param(format!(
                "request body of {len} bytes exceeds the limit of {limit} bytes"
            ))),
            _ => Ok(()),
        }
    }
}

impl<T> Request<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Dispatch the request and return immediately.
    ///
    /// The send runs on the configured runtime. Exactly one method of
    /// `callback` is invoked with the outcome, on a runtime thread.
    ///
    /// A request which can't be built (for example because an upload file is
    /// missing) is reported as `on_failed(400, "invalid request", cause)`
    /// without anything being sent.
    pub fn send_async<C>(self, callback: C)
    where
        C: Callback<T> + 'static,
    {
        let handler = ResponseHandler::new(self.codec.clone(), callback);
        let runtime = self.runtime.clone();

        runtime.spawn(Box::pin(async move {
            match self.prepare() {
                Ok(request) => {
                    handler.handle(self.transport.send(request).await);
                }
                Err(failure) => {
                    handler.complete(Err(failure));
                }
            }
        }));
    }

    /// Send the request and wait for the decoded response.
    ///
    /// Failures carry the same `(code, message, cause)` triple the callback
    /// of [`Request::send_async`] would receive.
    pub async fn execute(self) -> Result<T, Failure> {
        let request = self.prepare()?;
        let outcome = self.transport.send(request).await;

        response_handler::classify(self.codec.as_ref(), outcome)
    }

    fn prepare(&self) -> Result<TransportRequest, Failure> {
        let request = self
            .transport_request()
            .map_err(|cause| Failure::new(400, "invalid request", cause))?;

        debug!(
            "Request {}: {} {} ({} body bytes)",
            self.id,
            request.method,
            request.uri,
            request.body.as_ref().map_or(0, Vec::len)
        );

        Ok(request)
    }
}

impl<T> Debug for Request<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("id", &self.id)
            .field("uri", &self.uri)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}
