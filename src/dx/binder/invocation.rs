//! Per-call request assembly.
//!
//! An [`Invocation`] walks the parameter list of one method together with
//! the call arguments and collects path, query, headers and body of the
//! resulting [`Request`].
//!
//! [`Request`]: crate::dx::request::Request

use super::{arguments::Argument, BoundInner};
use crate::{
    core::{
        utils::encoding::url_encode, Headers, MethodMetadata, ParamRole, RestCallError, Returns,
    },
    dx::request::{Body, Part, Request},
};
use http::Uri;
use log::debug;
use std::{any::type_name, marker::PhantomData};
use uuid::Uuid;

pub(super) struct Invocation<'a> {
    bound: &'a BoundInner,
    method: &'a MethodMetadata,
    multipart: bool,
    template: String,
    query: Vec<String>,
    body: Option<Vec<u8>>,
    parts: Vec<Part>,
}

impl<'a> Invocation<'a> {
    pub(super) fn new(bound: &'a BoundInner, method: &'a MethodMetadata) -> Self {
        Self {
            bound,
            method,
            multipart: bound
                .multipart
                .unwrap_or_else(|| method.multipart_default()),
            template: format!("{}{}", bound.endpoint_path, method.path),
            query: Vec::new(),
            body: None,
            parts: Vec::new(),
        }
    }

    pub(super) fn build<T>(mut self, args: Vec<Argument>) -> Result<Request<T>, RestCallError> {
        self.check_return_shape::<T>()?;

        if args.len() != self.method.params.len() {
            return Err(RestCallError::param(format!(
                "`{}` expects {} arguments, got {}",
                self.method.name,
                self.method.params.len(),
                args.len()
            )));
        }

        let method = self.method;
        for (role, arg) in method.params.iter().zip(args) {
            self.apply(role, arg)?;
        }

        self.check_placeholders()?;

        let url = self.url();
        let uri = parse_uri(&url)?;

        let mut headers = self.bound.headers.clone();
        headers.extend(self.method.headers.iter().cloned());

        let body = match self.multipart {
            true => Body::Multipart(self.parts),
            false => Body::Plain(self.body),
        };

        let request = Request {
            id: Uuid::new_v4(),
            uri,
            method: self.method.verb,
            headers,
            body,
            boundary: self.bound.boundary.clone(),
            max_body_size: self.bound.max_body_size,
            codec: self.bound.codec.clone(),
            transport: self.bound.transport.clone(),
            runtime: self.bound.runtime.clone(),
            _result: PhantomData,
        };

        debug!(
            "Request {} created by {}::{}: {} {}",
            request.id,
            self.bound.descriptor.name,
            self.method.name,
            request.method,
            request.uri
        );

        Ok(request)
    }

    fn check_return_shape<T>(&self) -> Result<(), RestCallError> {
        match &self.method.returns {
            Returns::Request(name) if *name == type_name::<T>() => Ok(()),
            _ => Err(RestCallError::binding(format!(
                "return type of `{}` is not Request<{}>",
                self.method.name,
                type_name::<T>()
            ))),
        }
    }

    fn apply(&mut self, role: &ParamRole, arg: Argument) -> Result<(), RestCallError> {
        match role {
            ParamRole::PathVariable { name } => {
                let placeholder = format!("{{{name}}}");
                if !self.template.contains(&placeholder) {
                    return Err(RestCallError::param(format!(
                        "path variable `{name}` not found in `{}`",
                        self.template
                    )));
                }
                let value = url_encode(arg.stringify()?.as_bytes());
                self.template = self.template.replace(&placeholder, &value);
            }
            ParamRole::QueryParam { name } => {
                let value = url_encode(arg.stringify()?.as_bytes());
                self.query.push(format!("{name}={value}"));
            }
            ParamRole::Body { name } => {
                let json = self.bound.codec.encode(&arg.into_json()?)?;
                match self.multipart {
                    true => self.parts.push(Part::Field {
                        name: name.clone(),
                        json,
                    }),
                    false if self.body.is_some() => {
                        return Err(RestCallError::param(format!(
                            "`{}` declares more than one body parameter",
                            self.method.name
                        )))
                    }
                    false => self.body = Some(json.into_bytes()),
                }
            }
            ParamRole::Upload { name } => {
                self.require_multipart()?;
                let Argument::File(source) = arg else {
                    return Err(RestCallError::param("the parameter is not a file"));
                };
                self.parts.push(Part::File {
                    name: name.clone(),
                    source,
                });
            }
            ParamRole::UploadMany { names } => {
                self.require_multipart()?;
                let Argument::Files(sources) = arg else {
                    return Err(RestCallError::param("the parameter is not a file list"));
                };
                if !names.is_empty() && names.len() < sources.len() {
                    return Err(RestCallError::param("missing request parameters"));
                }
                for (idx, source) in sources.into_iter().enumerate() {
                    self.parts.push(Part::File {
                        name: names.get(idx).cloned().unwrap_or_default(),
                        source,
                    });
                }
            }
            ParamRole::Unannotated => {}
        }

        Ok(())
    }

    fn require_multipart(&self) -> Result<(), RestCallError> {
        match self.multipart {
            true => Ok(()),
            false => Err(RestCallError::param(
                "file parameters require multipart mode",
            )),
        }
    }

    fn check_placeholders(&self) -> Result<(), RestCallError> {
        let path = self.template.split('?').next().unwrap_or_default();
        let unresolved = path
            .find('{')
            .map_or(false, |start| path[start..].contains('}'));

        match unresolved {
            true => Err(RestCallError::param(format!(
                "unresolved path placeholder in `{path}`"
            ))),
            false => Ok(()),
        }
    }

    fn url(&self) -> String {
        let mut url = format!("{}{}", self.bound.base_url, self.template);

        if !self.query.is_empty() {
            let separator = match url.find('?') {
                None => "?",
                Some(_) if url.ends_with('?') || url.ends_with('&') => "",
                Some(_) => "&",
            };
            url = format!("{url}{separator}{}", self.query.join("&"));
        }

        if url.ends_with('&') {
            url.pop();
        }
        if url.ends_with('?') {
            url.pop();
        }

        url
    }
}

fn parse_uri(url: &str) -> Result<Uri, RestCallError> {
    let uri = url
        .parse::<Uri>()
        .map_err(|e| RestCallError::binding(format!("invalid request URL `{url}`: {e}")))?;

    match uri.scheme().is_some() && uri.authority().is_some() {
        true => Ok(uri),
        false => Err(RestCallError::binding(format!(
            "request URL `{url}` is not absolute"
        ))),
    }
}

/// Headers shared by every call of a bound interface.
pub(super) fn default_headers(binder: &Headers, endpoint: &[(String, String)]) -> Headers {
    let mut headers = binder.clone();
    headers.extend(endpoint.iter().cloned());
    headers
}
