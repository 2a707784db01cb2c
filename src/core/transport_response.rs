//! This module contains the `TransportResponse` struct.
//!
//! This struct is used to represent the response delivered by a
//! [`Transport`]. It is consumed by the [`ResponseHandler`].
//!
//! [`Transport`]: ../transport/trait.Transport.html
//! [`ResponseHandler`]: ../../dx/request/struct.ResponseHandler.html

use super::Headers;

/// This struct is used to represent the response to a [`TransportRequest`].
///
/// [`TransportRequest`]: ../transport_request/struct.TransportRequest.html
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TransportResponse {
    /// status code of the response
    pub status: u16,

    /// reason phrase of the status line, if the transport has one
    pub reason: Option<String>,

    /// headers of the response
    pub headers: Headers,

    /// body of the response
    pub body: Option<Vec<u8>>,

    /// description of a framing problem found while parsing the response
    pub malformed: Option<String>,
}

impl TransportResponse {
    /// Reason phrase of the response.
    ///
    /// Uses the canonical phrase of the status code when the transport didn't
    /// deliver one.
    pub fn reason_phrase(&self) -> String {
        self.reason.clone().unwrap_or_else(|| {
            http::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or_default()
                .to_string()
        })
    }
}
