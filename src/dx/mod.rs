//! # Restcall Developer Experience
//!
//! This module provides the structures turning declared interfaces into
//! requests: the [`binder`] which binds an interface and builds a request
//! per call, and the [`request`] descriptor which is sent and decoded.
//!
//! [`binder`]: binder/index.html
//! [`request`]: request/index.html

pub use binder::{Argument, BinderBuilder, BoundInterface, FileSource, Interface};
pub mod binder;

pub use request::{Body, Request};
pub mod request;

mod macros;
