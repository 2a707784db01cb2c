//! # Transport Request
//!
//! This module contains the `TransportRequest` struct.
//!
//! A `TransportRequest` is the wire-ready form of a [`Request`]: every header
//! is final and the body is fully encoded. It is handed to a [`Transport`]
//! which writes it to the connection.
//!
//! [`Request`]: ../../dx/request/struct.Request.html
//! [`Transport`]: ../transport/trait.Transport.html

use super::{metadata::HttpMethod, Headers};
use http::Uri;

/// This struct represents a request ready to be written to the wire.
///
/// All fields are representing certain parts of the request. The transport
/// connects to the host and port of `uri` and writes `method`, the path and
/// query of `uri`, `headers` and `body` as they are.
///
/// [`Transport`]: ../transport/trait.Transport.html
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TransportRequest {
    /// absolute target URI
    pub uri: Uri,

    /// method to use for the request
    pub method: HttpMethod,

    /// headers to be sent with the request, in order
    pub headers: Headers,

    /// body to be sent with the request
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Host the transport should connect to.
    pub fn host(&self) -> Option<&str> {
        self.uri.host()
    }

    /// Port the transport should connect to.
    ///
    /// Falls back to the default port of the URI scheme.
    pub fn port(&self) -> u16 {
        self.uri
            .port_u16()
            .unwrap_or(match self.uri.scheme_str() {
                Some("https") => 443,
                _ => 80,
            })
    }

    /// Path and query written on the request line.
    pub fn path_and_query(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use test_case::test_case;

    #[test_case("http://localhost:8080/user/login?a=1" => ("localhost".to_string(), 8080, "/user/login?a=1".to_string()) ; "explicit port")]
    #[test_case("http://example.com/user" => ("example.com".to_string(), 80, "/user".to_string()) ; "http default port")]
    #[test_case("https://example.com" => ("example.com".to_string(), 443, "/".to_string()) ; "https default port")]
    fn resolve_connection_target(uri: &str) -> (String, u16, String) {
        let request = TransportRequest {
            uri: uri.parse().unwrap(),
            ..Default::default()
        };

        (
            request.host().unwrap().to_string(),
            request.port(),
            request.path_and_query().to_string(),
        )
    }
}
