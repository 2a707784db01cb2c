//! # Transport Providers Module
//!
//! This module contains the Transport Providers that can be used by
//! [`BinderBuilder`].
//!
//! [`BinderBuilder`]: ../dx/binder/struct.BinderBuilder.html

pub use self::reqwest::TransportReqwest;
pub mod reqwest;
