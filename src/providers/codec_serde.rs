//! Serde implementation for the [`JsonCodec`] trait.
//!
//! This module provides a `serde_json` based codec. It is the codec every
//! binder uses unless another one is configured.
//!
//! # Examples
//! ```
//! use restcall::core::JsonCodecExt as _;
//! use restcall::providers::codec_serde::SerdeJsonCodec;
//!
//! #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
//! struct Foo {
//!    bar: String,
//! }
//!
//! let foo = Foo { bar: "baz".to_string() };
//! let json = SerdeJsonCodec.encode_object(&foo).unwrap();
//! assert_eq!(json, "{\"bar\":\"baz\"}");
//! assert_eq!(SerdeJsonCodec.decode_as::<Foo>(&json).unwrap(), foo);
//! ```
//!
//! [`JsonCodec`]: ../../core/codec/trait.JsonCodec.html

use crate::core::{JsonCodec, RestCallError};
use serde_json::Value;

/// Serde implementation for the [`JsonCodec`] trait.
///
/// [`JsonCodec`]: ../../core/codec/trait.JsonCodec.html
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn encode(&self, value: &Value) -> Result<String, RestCallError> {
        serde_json::to_string(value).map_err(|e| RestCallError::Serialization {
            details: e.to_string(),
        })
    }

    fn decode(&self, json: &str) -> Result<Value, RestCallError> {
        serde_json::from_str(json).map_err(|e| RestCallError::Deserialization {
            details: e.to_string(),
        })
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::core::JsonCodecExt;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Entity {
        token: String,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Response {
        code: i32,
        entity: Entity,
    }

    #[test]
    fn decode_structured_response() {
        let result: Response = SerdeJsonCodec
            .decode_as("{\"code\":0,\"entity\":{\"token\":\"abc\"}}")
            .unwrap();

        assert_eq!(
            result,
            Response {
                code: 0,
                entity: Entity {
                    token: "abc".into()
                }
            }
        );
    }

    #[test]
    fn decode_what_it_encoded() {
        let value = Response {
            code: 3,
            entity: Entity {
                token: "\"quoted\" ünïcode".into(),
            },
        };

        let json = SerdeJsonCodec.encode_object(&value).unwrap();

        assert_eq!(SerdeJsonCodec.decode_as::<Response>(&json).unwrap(), value);
    }

    #[test]
    fn report_malformed_json() {
        let result = SerdeJsonCodec.decode_as::<Response>("{\"code\":");

        assert!(matches!(result, Err(RestCallError::Deserialization { .. })));
    }

    #[test]
    fn report_type_mismatch() {
        let result = SerdeJsonCodec.decode_as::<Response>("{\"code\":\"zero\"}");

        assert!(matches!(result, Err(RestCallError::Deserialization { .. })));
    }
}
