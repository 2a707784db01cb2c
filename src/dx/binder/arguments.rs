//! Call arguments module.
//!
//! This module contains the [`Argument`] values passed to
//! [`BoundInterface::invoke`] and the [`FileSource`] used by upload
//! parameters.
//!
//! [`BoundInterface::invoke`]: ../struct.BoundInterface.html#method.invoke

use crate::core::{utils::headers::APPLICATION_OCTET_STREAM, RestCallError};
use serde::Serialize;
use serde_json::Value;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// A file attached to a multipart request.
///
/// Only the path is stored. The file is opened, read and closed while the
/// multipart body is encoded.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FileSource {
    path: PathBuf,
    content_type: Option<String>,
}

impl FileSource {
    /// Create file source for `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            content_type: None,
        }
    }

    /// Override the MIME type sent with the file.
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name sent in the `Content-Disposition` header.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// MIME type sent in the part `Content-Type` header.
    ///
    /// Defaults to `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(APPLICATION_OCTET_STREAM)
    }
}

impl From<PathBuf> for FileSource {
    fn from(value: PathBuf) -> Self {
        Self::new(value)
    }
}

impl From<&Path> for FileSource {
    fn from(value: &Path) -> Self {
        Self::new(value)
    }
}

impl From<&PathBuf> for FileSource {
    fn from(value: &PathBuf) -> Self {
        Self::new(value.clone())
    }
}

/// Actual argument of one call.
///
/// Arguments are matched with the method parameters by position.
#[derive(Clone, PartialEq, Debug)]
pub enum Argument {
    /// Any serializable object.
    Value(Value),

    /// Plain text.
    Text(String),

    /// Single file, for upload parameters.
    File(FileSource),

    /// List of files, for multi-file upload parameters.
    Files(Vec<FileSource>),

    /// Argument of an unannotated parameter.
    Ignored,
}

impl Argument {
    /// Capture a serializable object.
    pub fn json<S>(object: &S) -> Result<Self, RestCallError>
    where
        S: Serialize + ?Sized,
    {
        serde_json::to_value(object)
            .map(Self::Value)
            .map_err(|e| RestCallError::Serialization {
                details: e.to_string(),
            })
    }

    /// Capture the textual form of `value`.
    pub fn display<D: Display + ?Sized>(value: &D) -> Self {
        Self::Text(value.to_string())
    }

    /// Capture a file.
    pub fn file<F: Into<FileSource>>(file: F) -> Self {
        Self::File(file.into())
    }

    /// Capture a list of files.
    pub fn files<I, F>(files: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FileSource>,
    {
        Self::Files(files.into_iter().map(Into::into).collect())
    }

    /// Textual form used for path placeholders and query values.
    pub(crate) fn stringify(&self) -> Result<String, RestCallError> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Value(Value::String(text)) => Ok(text.clone()),
            Self::Value(value) => Ok(value.to_string()),
            Self::File(_) | Self::Files(_) => Err(RestCallError::param(
                "the parameter is a file, expected a plain value",
            )),
            Self::Ignored => Err(RestCallError::param("the parameter has no value")),
        }
    }

    /// JSON value used for request bodies.
    pub(crate) fn into_json(self) -> Result<Value, RestCallError> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Text(text) => Ok(Value::String(text)),
            Self::File(_) | Self::Files(_) => Err(RestCallError::param(
                "the parameter is a file, expected a serializable value",
            )),
            Self::Ignored => Err(RestCallError::param("the parameter has no value")),
        }
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<FileSource> for Argument {
    fn from(value: FileSource) -> Self {
        Self::File(value)
    }
}

impl From<Vec<FileSource>> for Argument {
    fn from(value: Vec<FileSource>) -> Self {
        Self::Files(value)
    }
}

macro_rules! argument_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Self::display(&value)
                }
            }
        )*
    };
}

argument_from_display!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);
