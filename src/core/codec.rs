//! JSON codec module
//!
//! This module contains the [`JsonCodec`] trait which is used to turn call
//! arguments into request bodies and response bodies into typed results.
//!
//! The trait works on [`serde_json::Value`] so it can be stored as a trait
//! object and replaced on the binder. The typed ends of the conversion are
//! provided by [`JsonCodecExt`].
//!
//! [`JsonCodec`]: trait.JsonCodec.html
//! [`JsonCodecExt`]: trait.JsonCodecExt.html

use super::RestCallError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Trait for JSON codecs.
///
/// To implement this trait, you must provide an `encode` method that turns a
/// JSON value into its text representation and a `decode` method that parses
/// text into a JSON value.
///
/// The default implementation is [`SerdeJsonCodec`].
///
/// # Examples
/// ```
/// use restcall::core::{JsonCodec, RestCallError};
/// use serde_json::Value;
///
/// struct PrettyCodec;
///
/// impl JsonCodec for PrettyCodec {
///     fn encode(&self, value: &Value) -> Result<String, RestCallError> {
///         serde_json::to_string_pretty(value).map_err(|e| RestCallError::Serialization {
///             details: e.to_string(),
///         })
///     }
///
///     fn decode(&self, json: &str) -> Result<Value, RestCallError> {
///         serde_json::from_str(json).map_err(|e| RestCallError::Deserialization {
///             details: e.to_string(),
///         })
///     }
/// }
/// ```
///
/// [`SerdeJsonCodec`]: ../../providers/codec_serde/struct.SerdeJsonCodec.html
pub trait JsonCodec: Send + Sync {
    /// Encode `value` into JSON text.
    ///
    /// # Errors
    ///
    /// This method should return [`RestCallError::Serialization`] if the
    /// value can't be encoded.
    ///
    /// [`RestCallError::Serialization`]: ../enum.RestCallError.html#variant.Serialization
    fn encode(&self, value: &Value) -> Result<String, RestCallError>;

    /// Decode JSON text into a value.
    ///
    /// # Errors
    ///
    /// This method should return [`RestCallError::Deserialization`] if the
    /// text can't be decoded.
    ///
    /// [`RestCallError::Deserialization`]: ../enum.RestCallError.html#variant.Deserialization
    fn decode(&self, json: &str) -> Result<Value, RestCallError>;
}

/// Typed conversions on top of any [`JsonCodec`].
pub trait JsonCodecExt: JsonCodec {
    /// Encode any serializable object.
    fn encode_object<S>(&self, object: &S) -> Result<String, RestCallError>
    where
        S: Serialize + ?Sized,
    {
        serde_json::to_value(object)
            .map_err(|e| RestCallError::Serialization {
                details: e.to_string(),
            })
            .and_then(|value| self.encode(&value))
    }

    /// Decode JSON text into the declared result type `T`.
    fn decode_as<T>(&self, json: &str) -> Result<T, RestCallError>
    where
        T: DeserializeOwned,
    {
        self.decode(json).and_then(|value| {
            serde_json::from_value(value).map_err(|e| RestCallError::Deserialization {
                details: e.to_string(),
            })
        })
    }
}

impl<C: JsonCodec + ?Sized> JsonCodecExt for C {}
