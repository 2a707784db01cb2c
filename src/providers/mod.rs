//! # Providers module
//!
//! This module contains the default implementations of the collaborator
//! traits used by the [`BinderBuilder`].
//! It is intended to be used by the [`restcall`] crate.
//!
//! [`BinderBuilder`]: ../dx/binder/struct.BinderBuilder.html
//! [`restcall`]: ../index.html

pub mod codec_serde;

#[cfg(feature = "tokio")]
pub mod futures_tokio;
