//! # Response handler
//!
//! This module contains the [`ResponseHandler`] which turns the outcome of a
//! transport call into exactly one invocation of the request callback.

use crate::core::{
    Callback, Failure, JsonCodec, JsonCodecExt, RestCallError, TransportResponse,
};
use log::warn;
use serde::de::DeserializeOwned;
use spin::Mutex;
use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

const AWAITING: u8 = 0;
const SUCCEEDED: u8 = 1;
const FAILED: u8 = 2;

/// Handler lifecycle state.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum HandlerState {
    /// No event has been handled yet.
    Awaiting,

    /// The success callback has been invoked.
    Succeeded,

    /// The failure callback has been invoked.
    Failed,
}

/// Exactly-once sink for the outcome of one request.
///
/// The first handled event moves the handler out of
/// [`HandlerState::Awaiting`] and invokes the callback. Every later event is
/// dropped.
pub struct ResponseHandler<T> {
    codec: Arc<dyn JsonCodec>,
    callback: Mutex<Option<Box<dyn Callback<T>>>>,
    state: AtomicU8,
}

impl<T> ResponseHandler<T>
where
    T: DeserializeOwned,
{
    /// Create handler which decodes with `codec` and reports to `callback`.
    pub fn new<C>(codec: Arc<dyn JsonCodec>, callback: C) -> Self
    where
        C: Callback<T> + 'static,
    {
        Self {
            codec,
            callback: Mutex::new(Some(Box::new(callback))),
            state: AtomicU8::new(AWAITING),
        }
    }

    /// Current state.
    pub fn state(&self) -> HandlerState {
        match self.state.load(Ordering::Acquire) {
            AWAITING => HandlerState::Awaiting,
            SUCCEEDED => HandlerState::Succeeded,
            _ => HandlerState::Failed,
        }
    }

    /// Handle the outcome of a transport call.
    ///
    /// Returns `false` if the event was dropped because an earlier event has
    /// already been handled.
    pub fn handle(&self, outcome: Result<TransportResponse, RestCallError>) -> bool {
        if self.state() != HandlerState::Awaiting {
            warn!("Response event after completion dropped");
            return false;
        }

        self.complete(classify(self.codec.as_ref(), outcome))
    }

    /// Report an already classified outcome.
    pub fn complete(&self, outcome: Result<T, Failure>) -> bool {
        let next = match outcome {
            Ok(_) => SUCCEEDED,
            Err(_) => FAILED,
        };

        if self
            .state
            .compare_exchange(AWAITING, next, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Response event after completion dropped");
            return false;
        }

        let Some(callback) = self.callback.lock().take() else {
            return false;
        };

        match outcome {
            Ok(response) => callback.on_success(response),
            Err(Failure {
                code,
                message,
                cause,
            }) => callback.on_failed(code, message, cause),
        }

        true
    }
}

/// Classify a transport outcome and decode the body of a `200` response.
pub(crate) fn classify<T>(
    codec: &dyn JsonCodec,
    outcome: Result<TransportResponse, RestCallError>,
) -> Result<T, Failure>
where
    T: DeserializeOwned,
{
    let response = outcome.map_err(|cause| match cause {
        RestCallError::Connect { .. } => Failure::new(404, "can not connect", cause),
        RestCallError::Timeout { .. } => Failure::new(408, "request timed out", cause),
        _ => Failure::new(404, "connect error", cause),
    })?;

    let status = response.status;
    let reason = response.reason_phrase();

    if let Some(details) = response.malformed {
        return Err(Failure::new(
            status,
            reason,
            RestCallError::Decode { details },
        ));
    }

    if status != 200 {
        return Err(Failure::new(
            status,
            reason.clone(),
            RestCallError::Remote { status, reason },
        ));
    }

    let body = response.body.unwrap_or_default();
    let text = std::str::from_utf8(&body).map_err(|e| {
        Failure::new(
            200,
            "response decode failed",
            RestCallError::Deserialization {
                details: e.to_string(),
            },
        )
    })?;

    let text = match text.trim().is_empty() {
        true => "null",
        false => text,
    };

    codec
        .decode_as::<T>(text)
        .map_err(|cause| Failure::new(200, "response decode failed", cause))
}
