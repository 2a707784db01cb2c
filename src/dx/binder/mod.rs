//! # Interface binder
//!
//! This module contains the [`BinderBuilder`] which binds a declared
//! interface to a base URL, a codec, a transport and a runtime, and the
//! [`BoundInterface`] which turns method calls into [`Request`]s.
//!
//! Interfaces are usually declared with the [`interface!`] macro, which
//! generates a typed wrapper implementing [`Interface`]. The untyped
//! [`BoundInterface::invoke`] is what every generated method calls.
//!
//! [`Request`]: ../request/struct.Request.html
//! [`interface!`]: ../../macro.interface.html

pub use arguments::{Argument, FileSource};
pub mod arguments;

mod invocation;

#[cfg(feature = "tokio")]
use crate::providers::futures_tokio::RuntimeTokio;
#[cfg(feature = "reqwest")]
use crate::transport::TransportReqwest;
use crate::{
    core::{
        Headers, InterfaceDescriptor, JsonCodec, RestCallError, Runtime, Transport,
    },
    dx::request::{Request, DEFAULT_BOUNDARY},
    providers::codec_serde::SerdeJsonCodec,
};
use derive_builder::Builder;
use invocation::{default_headers, Invocation};
use log::info;
use std::{collections::HashMap, fmt::Debug, sync::Arc};

/// Interface declared with metadata.
///
/// Implemented by the types generated with [`interface!`].
///
/// [`interface!`]: ../../macro.interface.html
pub trait Interface: Sized {
    /// Method table and endpoint metadata of the interface.
    fn descriptor() -> InterfaceDescriptor;

    /// Wrap the bound instance.
    fn from_bound(bound: BoundInterface) -> Self;
}

/// Binder configuration.
///
/// Created with [`BinderBuilder`].
#[derive(Builder)]
#[builder(
    pattern = "owned",
    name = "BinderBuilder",
    build_fn(private, name = "build_internal")
)]
pub struct BinderConfig {
    /// Scheme, host and port prepended to every request path,
    /// e.g. `http://localhost:8080`.
    #[builder(setter(into), default)]
    pub(crate) base_url: String,

    /// Codec for request bodies and responses.
    #[builder(setter(custom), default = "Arc::new(SerdeJsonCodec)")]
    pub(crate) codec: Arc<dyn JsonCodec>,

    /// Headers sent with every request, before the interface headers.
    #[builder(setter(custom), default)]
    pub(crate) headers: Headers,

    /// Explicit multipart toggle.
    ///
    /// When it isn't set, `POST` methods declared as multipart are sent as
    /// multipart and everything else as JSON.
    #[builder(setter(strip_option), default)]
    pub(crate) multipart: Option<bool>,

    /// Multipart boundary token.
    #[builder(setter(into), default = "DEFAULT_BOUNDARY.into()")]
    pub(crate) boundary: String,

    /// Upper bound of the encoded request body size.
    ///
    /// The encoded body, upload file content included, is held in memory
    /// while the request is sent. The size is computed from file metadata and
    /// checked before any file is opened, so set a limit when interfaces
    /// upload files of unknown size. No limit is applied by default.
    #[builder(setter(strip_option), default)]
    pub(crate) max_body_size: Option<u64>,

    /// Transport layer.
    #[builder(setter(custom), default = "default_transport()")]
    pub(crate) transport: Option<Arc<dyn Transport>>,

    /// Runtime the requests are dispatched on.
    #[builder(setter(custom), default = "default_runtime()")]
    pub(crate) runtime: Option<Arc<dyn Runtime>>,
}

impl BinderBuilder {
    /// Create builder with the default codec, transport and runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `codec` for request bodies and responses.
    pub fn codec<C>(mut self, codec: C) -> Self
    where
        C: JsonCodec + 'static,
    {
        self.codec = Some(Arc::new(codec));
        self
    }

    /// Add a header sent with every request.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.get_or_insert_with(Headers::new).add(key, value);
        self
    }

    /// Add headers sent with every request.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.get_or_insert_with(Headers::new).extend(headers);
        self
    }

    /// Use `transport` to send requests.
    pub fn transport<T>(mut self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.transport = Some(Some(Arc::new(transport)));
        self
    }

    /// Dispatch requests on `runtime`.
    pub fn runtime<R>(mut self, runtime: R) -> Self
    where
        R: Runtime + 'static,
    {
        self.runtime = Some(Some(Arc::new(runtime)));
        self
    }

    /// Bind interface `I`.
    ///
    /// # Errors
    ///
    /// Returns [`RestCallError::Binding`] if the interface has no endpoint
    /// metadata, declares the same method name twice, or no transport or
    /// runtime is available.
    pub fn bind<I: Interface>(self) -> Result<I, RestCallError> {
        self.bind_descriptor(I::descriptor()).map(I::from_bound)
    }

    /// Bind the interface described by `descriptor`.
    pub fn bind_descriptor(
        self,
        descriptor: InterfaceDescriptor,
    ) -> Result<BoundInterface, RestCallError> {
        let endpoint = descriptor.endpoint.clone().ok_or_else(|| {
            RestCallError::binding(format!(
                "interface `{}` has no endpoint metadata",
                descriptor.name
            ))
        })?;

        let mut methods = HashMap::with_capacity(descriptor.methods.len());
        for (idx, method) in descriptor.methods.iter().enumerate() {
            if methods.insert(method.name.clone(), idx).is_some() {
                return Err(RestCallError::binding(format!(
                    "interface `{}` declares method `{}` more than once",
                    descriptor.name, method.name
                )));
            }
        }

        let config = self
            .build_internal()
            .map_err(|err| RestCallError::binding(err.to_string()))?;

        let transport = config
            .transport
            .ok_or_else(|| RestCallError::binding("no transport configured"))?;
        let runtime = config
            .runtime
            .ok_or_else(|| RestCallError::binding("no runtime configured"))?;

        info!(
            "Bound interface {}: \n base_url: {}\n endpoint: {}\n methods: {}",
            descriptor.name,
            config.base_url,
            endpoint.path,
            descriptor.methods.len()
        );

        Ok(BoundInterface {
            inner: Arc::new(BoundInner {
                headers: default_headers(&config.headers, &endpoint.headers),
                endpoint_path: endpoint.path,
                base_url: config.base_url,
                codec: config.codec,
                multipart: config.multipart,
                boundary: config.boundary,
                max_body_size: config.max_body_size,
                transport,
                runtime,
                methods,
                descriptor,
            }),
        })
    }
}

#[cfg(feature = "reqwest")]
fn default_transport() -> Option<Arc<dyn Transport>> {
    Some(Arc::new(TransportReqwest::new()))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport() -> Option<Arc<dyn Transport>> {
    None
}

#[cfg(feature = "tokio")]
fn default_runtime() -> Option<Arc<dyn Runtime>> {
    Some(Arc::new(RuntimeTokio))
}

#[cfg(not(feature = "tokio"))]
fn default_runtime() -> Option<Arc<dyn Runtime>> {
    None
}

pub(crate) struct BoundInner {
    pub(crate) descriptor: InterfaceDescriptor,
    pub(crate) methods: HashMap<String, usize>,
    pub(crate) base_url: String,
    pub(crate) endpoint_path: String,
    pub(crate) headers: Headers,
    pub(crate) codec: Arc<dyn JsonCodec>,
    pub(crate) multipart: Option<bool>,
    pub(crate) boundary: String,
    pub(crate) max_body_size: Option<u64>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) runtime: Arc<dyn Runtime>,
}

/// Runtime object behind a bound interface.
///
/// Holds read-only configuration only, so clones can be used from any number
/// of threads at once. Every call produces an independent [`Request`].
///
/// # Examples
/// ```
/// use restcall::{
///     core::{EndpointMetadata, InterfaceDescriptor, MethodMetadata, ParamRole},
///     Argument, BinderBuilder,
/// };
///
/// # fn main() -> Result<(), restcall::core::RestCallError> {
/// let descriptor = InterfaceDescriptor::new("UserService")
///     .endpoint(EndpointMetadata::new("/user"))
///     .method(
///         MethodMetadata::get("profile", "/{account}")
///             .param(ParamRole::path_variable("account"))
///             .returns::<serde_json::Value>(),
///     );
///
/// let users = BinderBuilder::new()
///     .base_url("http://localhost:8080")
///     .bind_descriptor(descriptor)?;
///
/// let request = users.invoke::<serde_json::Value>("profile", vec![Argument::from("a b")])?;
/// assert_eq!(request.uri(), "http://localhost:8080/user/a%20b");
/// # Ok(())
/// # }
/// ```
///
/// [`Request`]: ../request/struct.Request.html
#[derive(Clone)]
pub struct BoundInterface {
    inner: Arc<BoundInner>,
}

impl BoundInterface {
    /// Interface name.
    pub fn name(&self) -> &str {
        &self.inner.descriptor.name
    }

    /// Descriptor the interface was bound with.
    pub fn descriptor(&self) -> &InterfaceDescriptor {
        &self.inner.descriptor
    }

    /// Build the request for one call of `method`.
    ///
    /// `args` are matched with the declared parameters by position. `T` must
    /// be the declared result type of the method.
    ///
    /// # Errors
    ///
    /// [`RestCallError::Binding`] if the method is unknown, isn't declared as
    /// returning `Request<T>` or the URL isn't absolute.
    /// [`RestCallError::Param`] if the arguments don't match the parameter
    /// metadata.
    pub fn invoke<T>(&self, method: &str, args: Vec<Argument>) -> Result<Request<T>, RestCallError> {
        let metadata = self
            .inner
            .methods
            .get(method)
            .and_then(|idx| self.inner.descriptor.methods.get(*idx))
            .ok_or_else(|| {
                RestCallError::binding(format!(
                    "interface `{}` has no method `{method}`",
                    self.name()
                ))
            })?;

        Invocation::new(&self.inner, metadata).build(args)
    }
}

impl Debug for BoundInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundInterface")
            .field("name", &self.inner.descriptor.name)
            .field("base_url", &self.inner.base_url)
            .field("endpoint_path", &self.inner.endpoint_path)
            .field("headers", &self.inner.headers)
            .field("multipart", &self.inner.multipart)
            .finish()
    }
}
