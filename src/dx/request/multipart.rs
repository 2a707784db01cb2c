//! # Multipart encoder
//!
//! This module contains the [`Part`] type and the [`MultipartEncoder`] which
//! serializes an ordered part list into a `multipart/form-data` body.
//!
//! The body layout is:
//!
//! ```text
//! --<boundary>\r\n
//! Content-Disposition: form-data; name="<field>"; filename="<file-name>"\r\n
//! Content-Type: <mime>\r\n
//! \r\n
//! <file bytes>\r\n
//! --<boundary>\r\n
//! Content-Disposition: form-data; name="<field>"\r\n
//! Content-Type: application/json\r\n
//! \r\n
//! <json text>\r\n
//! --<boundary>--\r\n
//! ```
//!
//! File content is copied straight from the opened file into the output sink.

use crate::{
    core::{utils::headers::APPLICATION_JSON, RestCallError},
    dx::binder::FileSource,
};
use std::{fs::File, io::Write};

/// Default boundary token.
pub const DEFAULT_BOUNDARY: &str = "RestCallFormBoundary7MA4YWxkTrZu0gW";

/// One part of a multipart body.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Part {
    /// Content of a file.
    File {
        /// Form field name.
        name: String,

        /// File to read.
        source: FileSource,
    },

    /// JSON encoded value.
    Field {
        /// Form field name.
        name: String,

        /// JSON text.
        json: String,
    },
}

impl Part {
    /// Form field name of the part.
    pub fn name(&self) -> &str {
        match self {
            Part::File { name, .. } | Part::Field { name, .. } => name,
        }
    }

    fn head(&self) -> String {
        match self {
            Part::File { name, source } => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                escape_quoted(name),
                escape_quoted(&source.file_name()),
                source.content_type()
            ),
            Part::Field { name, .. } => format!(
                "Content-Disposition: form-data; name=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                escape_quoted(name),
                APPLICATION_JSON
            ),
        }
    }

    fn content_len(&self) -> Result<u64, RestCallError> {
        match self {
            Part::File { source, .. } => std::fs::metadata(source.path())
                .map(|metadata| metadata.len())
                .map_err(|e| RestCallError::Io {
                    details: format!("{}: {}", source.path().display(), e),
                }),
            Part::Field { json, .. } => Ok(json.len() as u64),
        }
    }
}

/// Serializer of multipart bodies with a fixed boundary token.
#[derive(Clone, Copy, Debug)]
pub struct MultipartEncoder<'a> {
    boundary: &'a str,
}

impl Default for MultipartEncoder<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY)
    }
}

impl<'a> MultipartEncoder<'a> {
    /// Create encoder using `boundary`.
    pub fn new(boundary: &'a str) -> Self {
        Self { boundary }
    }

    /// Boundary token.
    pub fn boundary(&self) -> &str {
        self.boundary
    }

    /// Value of the request `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Length of the encoded body.
    ///
    /// File sizes are taken from the file system, nothing is read.
    pub fn encoded_len(&self, parts: &[Part]) -> Result<u64, RestCallError> {
        parts
            .iter()
            .enumerate()
            .try_fold(self.closing(parts).len() as u64, |total, (idx, part)| {
                let content = part.content_len()?;
                Ok(total + self.opening(idx).len() as u64 + part.head().len() as u64 + content)
            })
    }

    /// Encode `parts` into `sink` and return the number of written bytes.
    pub fn encode_to<W: Write>(&self, parts: &[Part], sink: &mut W) -> Result<u64, RestCallError> {
        let mut written = 0u64;

        for (idx, part) in parts.iter().enumerate() {
            written += write_str(sink, &self.opening(idx))?;
            written += write_str(sink, &part.head())?;
            written += match part {
                Part::File { source, .. } => {
                    let mut file = File::open(source.path()).map_err(|e| RestCallError::Io {
                        details: format!("{}: {}", source.path().display(), e),
                    })?;
                    std::io::copy(&mut file, sink)?
                }
                Part::Field { json, .. } => write_str(sink, json)?,
            };
        }

        written += write_str(sink, &self.closing(parts))?;
        Ok(written)
    }

    /// Encode `parts` into a new buffer.
    pub fn encode(&self, parts: &[Part]) -> Result<Vec<u8>, RestCallError> {
        let capacity = self.encoded_len(parts).unwrap_or_default();
        let mut body = Vec::with_capacity(capacity as usize);
        self.encode_to(parts, &mut body)?;
        Ok(body)
    }

    fn opening(&self, idx: usize) -> String {
        match idx {
            0 => format!("--{}\r\n", self.boundary),
            _ => format!("\r\n--{}\r\n", self.boundary),
        }
    }

    fn closing(&self, parts: &[Part]) -> String {
        match parts.is_empty() {
            true => format!("--{}--\r\n", self.boundary),
            false => format!("\r\n--{}--\r\n", self.boundary),
        }
    }
}

/// Percent-escape characters which would end a quoted `Content-Disposition`
/// parameter or the header line.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn write_str<W: Write>(sink: &mut W, value: &str) -> Result<u64, RestCallError> {
    sink.write_all(value.as_bytes())?;
    Ok(value.len() as u64)
}

#[cfg(test)]
mod should {
    use super::*;
    use std::io::Write as _;

    fn temp_file(content: &[u8], name: &str) -> (tempfile::TempDir, FileSource) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        File::create(&path).unwrap().write_all(content).unwrap();
        (dir, FileSource::new(path))
    }

    #[test]
    fn encode_field_part() {
        let parts = vec![Part::Field {
            name: "model".into(),
            json: "{\"account\":\"qaz\"}".into(),
        }];

        let body = MultipartEncoder::new("XyZ").encode(&parts).unwrap();

        assert_eq!(
            String::from_utf8(body).unwrap(),
            "--XyZ\r\n\
             Content-Disposition: form-data; name=\"model\"\r\n\
             Content-Type: application/json\r\n\
             \r\n\
             {\"account\":\"qaz\"}\
             \r\n--XyZ--\r\n"
        );
    }

    #[test]
    fn encode_parts_in_declaration_order() {
        let (_dir, source) = temp_file(b"\x89PNG raw", "avatar.png");
        let parts = vec![
            Part::Field {
                name: "meta".into(),
                json: "1".into(),
            },
            Part::File {
                name: "avatar".into(),
                source: source.with_content_type("image/png"),
            },
        ];

        let body = MultipartEncoder::new("XyZ").encode(&parts).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(
            b"--XyZ\r\n\
              Content-Disposition: form-data; name=\"meta\"\r\n\
              Content-Type: application/json\r\n\
              \r\n\
              1\
              \r\n--XyZ\r\n\
              Content-Disposition: form-data; name=\"avatar\"; filename=\"avatar.png\"\r\n\
              Content-Type: image/png\r\n\
              \r\n",
        );
        expected.extend_from_slice(b"\x89PNG raw");
        expected.extend_from_slice(b"\r\n--XyZ--\r\n");
        assert_eq!(body, expected);
    }

    #[test]
    fn escape_quotes_and_line_breaks_in_names() {
        let (_dir, source) = temp_file(b"x", "a\"\r\nX-Evil: 1\r\n\r\n.png");
        let parts = vec![
            Part::File {
                name: "up\"load".into(),
                source,
            },
            Part::Field {
                name: "me\nta".into(),
                json: "1".into(),
            },
        ];
        let encoder = MultipartEncoder::new("XyZ");

        let body = String::from_utf8(encoder.encode(&parts).unwrap()).unwrap();

        assert!(body.contains(
            "Content-Disposition: form-data; name=\"up%22load\"; \
             filename=\"a%22%0D%0AX-Evil: 1%0D%0A%0D%0A.png\"\r\n"
        ));
        assert!(body.contains("Content-Disposition: form-data; name=\"me%0Ata\"\r\n"));
        assert!(!body.contains("\r\nX-Evil"));
        assert_eq!(encoder.encoded_len(&parts).unwrap(), body.len() as u64);
    }

    #[test]
    fn encode_empty_part_list() {
        let body = MultipartEncoder::new("XyZ").encode(&[]).unwrap();

        assert_eq!(body, b"--XyZ--\r\n");
    }

    #[test]
    fn produce_identical_bytes_for_same_parts() {
        let (_dir, source) = temp_file(&[0u8, 1, 2, 3, 255], "blob.bin");
        let parts = vec![
            Part::File {
                name: "a".into(),
                source: source.clone(),
            },
            Part::File {
                name: "a".into(),
                source,
            },
        ];
        let encoder = MultipartEncoder::default();

        assert_eq!(
            encoder.encode(&parts).unwrap(),
            encoder.encode(&parts).unwrap()
        );
    }

    #[test]
    fn predict_encoded_length() {
        let (_dir, source) = temp_file(&[7u8; 70_000], "big.bin");
        let parts = vec![
            Part::File {
                name: "file".into(),
                source,
            },
            Part::Field {
                name: "body".into(),
                json: "{}".into(),
            },
        ];
        let encoder = MultipartEncoder::default();

        let mut sink = Vec::new();
        let written = encoder.encode_to(&parts, &mut sink).unwrap();

        assert_eq!(written, sink.len() as u64);
        assert_eq!(encoder.encoded_len(&parts).unwrap(), written);
    }

    #[test]
    fn report_missing_file() {
        let parts = vec![Part::File {
            name: "file".into(),
            source: FileSource::new("/definitely/not/here.bin"),
        }];

        assert!(matches!(
            MultipartEncoder::default().encode(&parts),
            Err(RestCallError::Io { .. })
        ));
    }

    #[test]
    fn expose_content_type() {
        assert_eq!(
            MultipartEncoder::new("XyZ").content_type(),
            "multipart/form-data; boundary=XyZ"
        );
    }
}
