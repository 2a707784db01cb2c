//! # Declarative metadata
//!
//! This module contains the types describing a remote HTTP API: the
//! [`InterfaceDescriptor`] of one interface, its [`EndpointMetadata`], the
//! [`MethodMetadata`] of every declared method and the [`ParamRole`] of every
//! method parameter.
//!
//! The metadata is pure data. It is assembled once, when the interface is
//! declared, and read by the binder on every call.
//!
//! # Examples
//! ```
//! use restcall::core::metadata::{EndpointMetadata, InterfaceDescriptor, MethodMetadata, ParamRole};
//!
//! #[derive(serde::Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! let descriptor = InterfaceDescriptor::new("UserService")
//!     .endpoint(EndpointMetadata::new("/user").header("X-Client", "demo"))
//!     .method(
//!         MethodMetadata::get("profile", "/{account}")
//!             .param(ParamRole::path_variable("account"))
//!             .returns::<User>(),
//!     );
//!
//! assert!(descriptor.find_method("profile").is_some());
//! ```

use std::{any::type_name, fmt::Display};

/// The HTTP verb of a declared method.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,

    /// `PUT`
    Put,

    /// `POST`
    Post,

    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Textual representation used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

/// Metadata attached to an interface.
///
/// Every request produced for the interface starts with `path` and carries
/// `headers`.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct EndpointMetadata {
    /// Base path of every method of the interface. May be empty.
    pub path: String,

    /// Default headers, in declaration order.
    pub headers: Vec<(String, String)>,
}

impl EndpointMetadata {
    /// Create endpoint metadata with base `path`.
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            headers: Vec::new(),
        }
    }

    /// Add default header.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.push((key.into(), value.into()));
        self
    }
}

/// The declared purpose of one method parameter.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParamRole {
    /// Argument is encoded with the codec and sent as request body.
    ///
    /// In multipart mode the encoded JSON becomes a field part called `name`.
    Body {
        /// Multipart field name.
        name: String,
    },

    /// Argument replaces every `{name}` placeholder of the path.
    PathVariable {
        /// Placeholder name.
        name: String,
    },

    /// Argument is appended to the query string as `name=value`.
    QueryParam {
        /// Query key.
        name: String,
    },

    /// Argument is a single file attached as multipart file part `name`.
    Upload {
        /// Multipart field name.
        name: String,
    },

    /// Argument is a list of files attached as multipart file parts.
    ///
    /// File `i` gets field name `names[i]`. With an empty list every file is
    /// attached with an empty field name.
    UploadMany {
        /// Multipart field names.
        names: Vec<String>,
    },

    /// Argument is accepted and ignored.
    Unannotated,
}

impl ParamRole {
    /// Shortcut for [`ParamRole::Body`].
    pub fn body<S: Into<String>>(name: S) -> Self {
        Self::Body { name: name.into() }
    }

    /// Shortcut for [`ParamRole::PathVariable`].
    pub fn path_variable<S: Into<String>>(name: S) -> Self {
        Self::PathVariable { name: name.into() }
    }

    /// Shortcut for [`ParamRole::QueryParam`].
    pub fn query<S: Into<String>>(name: S) -> Self {
        Self::QueryParam { name: name.into() }
    }

    /// Shortcut for [`ParamRole::Upload`].
    pub fn upload<S: Into<String>>(name: S) -> Self {
        Self::Upload { name: name.into() }
    }

    /// Shortcut for [`ParamRole::UploadMany`].
    pub fn upload_many<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UploadMany {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// Declared return shape of a method.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Returns {
    /// The method returns "Request-of-T", `T` identified by its type name.
    Request(&'static str),

    /// The method returns anything else.
    Other(&'static str),
}

impl Returns {
    /// Return shape for "Request-of-T".
    pub fn request<T>() -> Self {
        Self::Request(type_name::<T>())
    }
}

impl Default for Returns {
    fn default() -> Self {
        Self::Other(type_name::<()>())
    }
}

/// Metadata attached to one declared method.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct MethodMetadata {
    /// Method name, unique inside an interface.
    pub name: String,

    /// HTTP verb.
    pub verb: HttpMethod,

    /// Path suffix. May contain `{name}` placeholders.
    pub path: String,

    /// Send the request as `multipart/form-data`. Only honoured for `POST`.
    pub multipart: bool,

    /// Method-level headers, added after the interface headers.
    pub headers: Vec<(String, String)>,

    /// Parameter roles in declaration order.
    pub params: Vec<ParamRole>,

    /// Declared return shape.
    pub returns: Returns,
}

impl MethodMetadata {
    /// Create metadata of a method called `name`.
    pub fn new<N, P>(name: N, verb: HttpMethod, path: P) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            verb,
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create `GET` method metadata.
    pub fn get<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, HttpMethod::Get, path)
    }

    /// Create `PUT` method metadata.
    pub fn put<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, HttpMethod::Put, path)
    }

    /// Create `POST` method metadata.
    pub fn post<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, HttpMethod::Post, path)
    }

    /// Create `DELETE` method metadata.
    pub fn delete<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self::new(name, HttpMethod::Delete, path)
    }

    /// Set the multipart default of the method.
    pub fn multipart(mut self, multipart: bool) -> Self {
        self.multipart = multipart;
        self
    }

    /// Add method-level header.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Append the next parameter.
    pub fn param(mut self, role: ParamRole) -> Self {
        self.params.push(role);
        self
    }

    /// Declare the method as returning "Request-of-T".
    pub fn returns<T>(mut self) -> Self {
        self.returns = Returns::request::<T>();
        self
    }

    /// Declare any other return shape.
    ///
    /// Methods declared this way are rejected when invoked.
    pub fn returns_other(mut self, description: &'static str) -> Self {
        self.returns = Returns::Other(description);
        self
    }

    /// Whether the method is sent as multipart when the binder has no
    /// explicit multipart toggle.
    pub(crate) fn multipart_default(&self) -> bool {
        self.multipart && self.verb == HttpMethod::Post
    }
}

/// Complete, immutable description of one interface.
///
/// This is the method table the binder reads on every call.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct InterfaceDescriptor {
    /// Interface name, used in logs and errors.
    pub name: String,

    /// Interface level metadata.
    ///
    /// An interface without endpoint metadata can't be bound.
    pub endpoint: Option<EndpointMetadata>,

    /// Declared methods.
    pub methods: Vec<MethodMetadata>,
}

impl InterfaceDescriptor {
    /// Create an empty descriptor for interface `name`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach endpoint metadata.
    pub fn endpoint(mut self, endpoint: EndpointMetadata) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Declare a method.
    pub fn method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }

    /// Find a declared method by name.
    pub fn find_method(&self, name: &str) -> Option<&MethodMetadata> {
        self.methods.iter().find(|method| method.name == name)
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use test_case::test_case;

    #[test_case(HttpMethod::Get => "GET")]
    #[test_case(HttpMethod::Put => "PUT")]
    #[test_case(HttpMethod::Post => "POST")]
    #[test_case(HttpMethod::Delete => "DELETE")]
    fn display_verb(verb: HttpMethod) -> String {
        verb.to_string()
    }

    #[test_case(HttpMethod::Post, true => true ; "multipart post")]
    #[test_case(HttpMethod::Put, true => false ; "multipart ignored for put")]
    #[test_case(HttpMethod::Post, false => false ; "plain post")]
    fn honour_multipart_only_for_post(verb: HttpMethod, multipart: bool) -> bool {
        MethodMetadata::new("m", verb, "/")
            .multipart(multipart)
            .multipart_default()
    }

    #[test]
    fn record_request_return_shape() {
        let method = MethodMetadata::get("list", "/").returns::<Vec<String>>();

        assert_eq!(method.returns, Returns::request::<Vec<String>>());
        assert_ne!(method.returns, Returns::request::<String>());
    }

    #[test]
    fn default_to_non_request_return_shape() {
        let method = MethodMetadata::get("list", "/");

        assert!(matches!(method.returns, Returns::Other(_)));
    }

    #[test]
    fn keep_parameter_declaration_order() {
        let method = MethodMetadata::post("upload", "/files")
            .param(ParamRole::body("meta"))
            .param(ParamRole::upload_many(["a", "b"]))
            .param(ParamRole::Unannotated);

        assert_eq!(
            method.params,
            vec![
                ParamRole::body("meta"),
                ParamRole::UploadMany {
                    names: vec!["a".into(), "b".into()]
                },
                ParamRole::Unannotated
            ]
        );
    }
}
