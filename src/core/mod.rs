//! # Restcall Core
//!
//! Core functionality of the restcall crate.
//!
//! The `core` module contains the declarative metadata model, the error
//! types and the traits for the external collaborators: [`Transport`],
//! [`Runtime`], [`JsonCodec`] and the response [`Callback`].
//!
//! [`Transport`]: transport/trait.Transport.html
//! [`Runtime`]: runtime/trait.Runtime.html
//! [`JsonCodec`]: codec/trait.JsonCodec.html
//! [`Callback`]: callback/trait.Callback.html

pub use error::{Failure, RestCallError};
pub mod error;

pub use metadata::{
    EndpointMetadata, HttpMethod, InterfaceDescriptor, MethodMetadata, ParamRole, Returns,
};
pub mod metadata;

pub use codec::{JsonCodec, JsonCodecExt};
pub mod codec;

pub use callback::{callback, on_complete, Callback, FnCallback, OutcomeCallback};
pub mod callback;

pub use transport::Transport;
pub mod transport;

pub use transport_request::TransportRequest;
pub mod transport_request;

pub use transport_response::TransportResponse;
pub mod transport_response;

pub use runtime::Runtime;
pub mod runtime;

pub use utils::headers::Headers;
pub(crate) mod utils;
