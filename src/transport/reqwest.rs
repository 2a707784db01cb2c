//! # Reqwest Transport Implementation
//!
//! This module contains the [`TransportReqwest`] struct.
//! It is used to send requests built by bound interfaces using the
//! [`reqwest`] crate.
//!
//! It requires the [`reqwest` feature] to be enabled.
//!
//! [`TransportReqwest`]: ./struct.TransportReqwest.html
//! [`reqwest`]: https://docs.rs/reqwest
//! [`reqwest` feature]: ../index.html#features

use crate::core::{Headers, RestCallError, Transport, TransportRequest, TransportResponse};
use bytes::Bytes;
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    StatusCode,
};
use std::time::Duration;

/// This struct is used to send requests using the [`reqwest`] crate.
///
/// It is the default transport of [`BinderBuilder`]. The target host and
/// port are taken from the request URI, so one instance serves any number of
/// bound interfaces.
///
/// [`reqwest`]: https://docs.rs/reqwest
/// [`BinderBuilder`]: ../../dx/binder/struct.BinderBuilder.html
#[derive(Clone, Debug, Default)]
pub struct TransportReqwest {
    reqwest_client: reqwest::Client,
}

#[async_trait::async_trait]
impl Transport for TransportReqwest {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, RestCallError> {
        debug!("{} {}", request.method, request.uri);
        let headers = prepare_headers(&request.headers)?;

        let mut builder = self
            .reqwest_client
            .request(request.method.into(), request.uri.to_string())
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let result = builder.send().await.map_err(map_error)?;

        let status = result.status();
        let response_headers = collect_headers(result.headers());
        result
            .bytes()
            .await
            .map_err(map_error)
            .map(|bytes| create_result(status, response_headers, bytes))
    }
}

impl TransportReqwest {
    /// Create a new [`TransportReqwest`] instance.
    ///
    /// It provides a default [`reqwest`] client using
    /// [`reqwest::Client::default()`].
    ///
    /// # Example
    /// ```
    /// use restcall::transport::TransportReqwest;
    ///
    /// let transport = TransportReqwest::new();
    /// ```
    ///
    /// [`TransportReqwest`]: ./struct.TransportReqwest.html
    /// [`reqwest`]: https://docs.rs/reqwest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create transport giving up on requests which take longer than
    /// `timeout`.
    ///
    /// Requests which time out are reported with status `408`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, RestCallError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map(|reqwest_client| Self { reqwest_client })
            .map_err(|e| RestCallError::Transport {
                details: e.to_string(),
            })
    }

    /// Use a preconfigured [`reqwest::Client`].
    pub fn with_client(reqwest_client: reqwest::Client) -> Self {
        Self { reqwest_client }
    }
}

fn prepare_headers(request_headers: &Headers) -> Result<HeaderMap, RestCallError> {
    request_headers
        .iter()
        .try_fold(HeaderMap::new(), |mut headers, (key, value)| {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                RestCallError::Transport {
                    details: format!("invalid header name `{key}`: {e}"),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| RestCallError::Transport {
                details: format!("invalid value of header `{key}`: {e}"),
            })?;
            headers.append(name, value);
            Ok(headers)
        })
}

fn collect_headers(response_headers: &HeaderMap) -> Headers {
    response_headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

fn map_error(error: reqwest::Error) -> RestCallError {
    let details = error.to_string();

    if error.is_connect() {
        RestCallError::Connect { details }
    } else if error.is_timeout() {
        RestCallError::Timeout { details }
    } else {
        RestCallError::Transport { details }
    }
}

fn create_result(status: StatusCode, headers: Headers, body: Bytes) -> TransportResponse {
    TransportResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().map(Into::into),
        headers,
        body: (!body.is_empty()).then(|| body.to_vec()),
        ..Default::default()
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::core::HttpMethod;
    use test_case::test_case;
    use wiremock::matchers::{body_string, header, method, path as path_matcher, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(uri: String, method: HttpMethod) -> TransportRequest {
        TransportRequest {
            uri: uri.parse().unwrap(),
            method,
            ..Default::default()
        }
    }

    #[test_case("GET" , HttpMethod::Get ; "get")]
    #[test_case("PUT" , HttpMethod::Put ; "put")]
    #[test_case("DELETE" , HttpMethod::Delete ; "delete")]
    #[tokio::test]
    async fn send_with_declared_verb(verb: &str, http_method: HttpMethod) {
        let server = MockServer::start().await;

        Mock::given(method(verb))
            .and(path_matcher("/user/a%20b"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let response = TransportReqwest::new()
            .send(request(
                format!("{}/user/a%20b?page=2", server.uri()),
                http_method,
            ))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(b"{}".to_vec()));
    }

    #[tokio::test]
    async fn send_via_post_method() {
        let message = "{\"account\":\"111\",\"password\":\"123\"}";
        let path = "/user/login";

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_matcher(path))
            .and(body_string(message.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("{\"code\":0,\"entity\":{\"token\":\"abc\"}}"),
            )
            .mount(&server)
            .await;

        let mut request = request(format!("{}{}", server.uri(), path), HttpMethod::Post);
        request.body = Some(message.as_bytes().to_vec());

        let response = TransportReqwest::new().send(request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.reason.as_deref(), Some("OK"));
    }

    #[tokio::test]
    async fn send_headers() {
        let path = "/user/profile";

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_matcher(path))
            .and(header("X-Client", "tests"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-Request", "42"))
            .mount(&server)
            .await;

        let mut request = request(format!("{}{}", server.uri(), path), HttpMethod::Get);
        request.headers = [("X-Client", "tests"), ("Accept", "application/json")]
            .into_iter()
            .collect();

        let response = TransportReqwest::new().send(request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.headers.get("x-request"), Some("42"));
        assert_eq!(response.body, None);
    }

    #[tokio::test]
    async fn deliver_non_200_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = TransportReqwest::new()
            .send(request(format!("{}/missing", server.uri()), HttpMethod::Get))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.reason_phrase(), "Not Found");
    }

    #[tokio::test]
    async fn report_refused_connection() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = TransportReqwest::new()
            .send(request(format!("http://127.0.0.1:{port}/"), HttpMethod::Get))
            .await;

        assert!(matches!(result, Err(RestCallError::Connect { .. })));
    }

    #[tokio::test]
    async fn report_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let result = TransportReqwest::with_timeout(Duration::from_millis(50))
            .unwrap()
            .send(request(format!("{}/slow", server.uri()), HttpMethod::Get))
            .await;

        assert!(matches!(result, Err(RestCallError::Timeout { .. })));
    }

    #[tokio::test]
    async fn reject_invalid_header() {
        let mut request = request("http://127.0.0.1:1/".into(), HttpMethod::Get);
        request.headers.add("X-Bad", "line\nbreak");

        let result = TransportReqwest::new().send(request).await;

        assert!(matches!(result, Err(RestCallError::Transport { .. })));
    }
}
