//! # restcall
//!
//! Declarative HTTP interfaces. Describe a remote API once, as a typed
//! interface with a base path, verbs, headers and parameter roles, and call
//! its methods to get ready-to-send requests. Requests are dispatched on a
//! runtime and their JSON responses are decoded into typed results delivered
//! to a callback, or awaited directly.
//!
//! ## Example
//!
//! ```no_run
//! use restcall::{core::on_complete, interface, BinderBuilder, Failure};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct LoginForm {
//!     account: String,
//!     password: String,
//! }
//!
//! #[derive(Deserialize, Debug)]
//! struct Token {
//!     token: String,
//! }
//!
//! #[derive(Deserialize, Debug)]
//! struct Envelope {
//!     code: i32,
//!     entity: Token,
//! }
//!
//! interface! {
//!     pub struct UserService at "/user" {
//!         POST "/login" => fn login(body form: &LoginForm) -> Envelope;
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let users = BinderBuilder::new()
//!     .base_url("http://localhost:8080")
//!     .header("X-Client", "restcall")
//!     .bind::<UserService>()?;
//!
//! let form = LoginForm {
//!     account: "111".into(),
//!     password: "123".into(),
//! };
//!
//! // Fire and forget, the outcome is delivered on a runtime thread.
//! users.login(&form)?.send_async(on_complete(|outcome: Result<Envelope, Failure>| match outcome {
//!     Ok(envelope) => println!("token: {}", envelope.entity.token),
//!     Err(failure) => println!("login failed: {failure}"),
//! }));
//!
//! // Or wait for it.
//! let envelope = users.login(&form)?.execute().await?;
//! println!("code: {}", envelope.code);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! The `restcall` crate is split into multiple features. You can enable or
//! disable them in the `Cargo.toml` file, like so:
//!
//! ```toml
//! # only reqwest transport, bring your own runtime
//! [dependencies]
//! restcall = { version = "0.1.0", default-features = false, features = ["reqwest"] }
//! ```
//!
//! ### Available features
//!
//! * `full` - enables all non-conflicting features
//! * `reqwest` - uses [`reqwest`](https://docs.rs/reqwest) as the default transport
//! * `tokio` - uses [`tokio`](https://docs.rs/tokio) as the default runtime
//! * `default` - default features that include:
//!   * `reqwest`
//!   * `tokio`
//!
//! Without a default transport or runtime they have to be passed to
//! [`BinderBuilder::transport`] and [`BinderBuilder::runtime`], otherwise
//! binding fails.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[doc(inline)]
pub use dx::{Argument, BinderBuilder, BoundInterface, FileSource, Interface, Request};

#[doc(inline)]
pub use crate::core::{callback, on_complete, Callback, Failure, RestCallError};

pub mod core;
pub mod dx;
pub mod providers;

#[cfg(feature = "reqwest")]
pub mod transport;
