//! # Error types
//!
//! This module contains the error types for the [`restcall`] crate.
//!
//! [`restcall`]: ../index.html

/// Restcall error type
///
/// This type is used to represent errors that can occur while binding an
/// interface, building a request from call arguments, sending it or decoding
/// its response.
///
/// Bind and argument errors ([`Binding`] and [`Param`]) are returned
/// synchronously by the call that produced them. Everything that happens after
/// a request has been handed to the transport is reported through the
/// request's callback as the `cause` of a [`Failure`].
///
/// # Examples
/// ```
/// use restcall::core::RestCallError;
///
/// fn foo() -> Result<(), RestCallError> {
///   Ok(())
/// }
///
/// foo().map_err(|e| match e {
///   RestCallError::Binding { .. } => println!("Binding error"),
///   RestCallError::Param { .. } => println!("Param error"),
///   _ => println!("Other error"),
/// });
/// ```
///
/// [`Binding`]: #variant.Binding
/// [`Param`]: #variant.Param
/// [`Failure`]: struct.Failure.html
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RestCallError {
    /// this error is returned when the declarative metadata is missing or
    /// malformed
    #[error("Binding error: {details}")]
    Binding {
        /// Error details
        details: String,
    },

    /// this error is returned when call arguments don't match the parameter
    /// metadata
    #[error("Param error: {details}")]
    Param {
        /// Error details
        details: String,
    },

    /// this error is returned when the codec can't encode a value
    #[error("Serialization error: {details}")]
    Serialization {
        /// Error details
        details: String,
    },

    /// this error is returned when the codec can't decode a response body
    #[error("Deserialization error: {details}")]
    Deserialization {
        /// Error details
        details: String,
    },

    /// this error is returned when the transport can't establish a connection
    #[error("Connect error: {details}")]
    Connect {
        /// Error details
        details: String,
    },

    /// this error is returned when the transport layer fails after the
    /// connection has been established
    #[error("Transport error: {details}")]
    Transport {
        /// Error details
        details: String,
    },

    /// this error is returned when the transport gave up waiting for a
    /// response
    #[error("Timeout error: {details}")]
    Timeout {
        /// Error details
        details: String,
    },

    /// this error is returned when the response framing is malformed
    #[error("Decode error: {details}")]
    Decode {
        /// Error details
        details: String,
    },

    /// this error is returned when the remote side answers with a non-200
    /// status
    #[error("Remote error: {status} {reason}")]
    Remote {
        /// HTTP status code
        status: u16,

        /// HTTP reason phrase
        reason: String,
    },

    /// this error is returned when an upload file can't be read
    #[error("I/O error: {details}")]
    Io {
        /// Error details
        details: String,
    },
}

impl RestCallError {
    pub(crate) fn binding<S: Into<String>>(details: S) -> Self {
        Self::Binding {
            details: details.into(),
        }
    }

    pub(crate) fn param<S: Into<String>>(details: S) -> Self {
        Self::Param {
            details: details.into(),
        }
    }
}

impl From<std::io::Error> for RestCallError {
    fn from(value: std::io::Error) -> Self {
        Self::Io {
            details: value.to_string(),
        }
    }
}

/// Failed request outcome.
///
/// The `(code, message, cause)` triple delivered to
/// [`Callback::on_failed`] and returned by [`Request::execute`].
///
/// [`Callback::on_failed`]: ../callback/trait.Callback.html#tymethod.on_failed
/// [`Request::execute`]: ../../dx/request/struct.Request.html#method.execute
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{code} {message}: {cause}")]
pub struct Failure {
    /// HTTP status code, or the synthetic code of a local failure.
    pub code: u16,

    /// Reason phrase or short description.
    pub message: String,

    /// Underlying error.
    #[source]
    pub cause: RestCallError,
}

impl Failure {
    /// Create failure from its parts.
    pub fn new<S: Into<String>>(code: u16, message: S, cause: RestCallError) -> Self {
        Self {
            code,
            message: message.into(),
            cause,
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn format_remote_error() {
        let error = RestCallError::Remote {
            status: 404,
            reason: "Not Found".into(),
        };

        assert_eq!(error.to_string(), "Remote error: 404 Not Found");
    }

    #[test]
    fn convert_io_error() {
        let error: RestCallError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();

        assert!(matches!(error, RestCallError::Io { details } if details == "no such file"));
    }

    #[test]
    fn format_failure() {
        let failure = Failure::new(
            404,
            "can not connect",
            RestCallError::Connect {
                details: "refused".into(),
            },
        );

        assert_eq!(
            failure.to_string(),
            "404 can not connect: Connect error: refused"
        );
    }
}
