// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Addressing of Onshape resources.
//!
//! Most endpoints follow the same convention:
//!
//! ```text
//! /api/{resource}/d/{documentId}[/{w|v|m}/{id}][/e/{elementId}][/{subresource}]
//! ```
//!
//! [`ApiRequest`] describes one call in those terms, [`build_path`] and
//! [`build_query_string`] turn it into what goes on the wire.

use std::fmt::Write;
use std::path::PathBuf;

use http::{HeaderMap, HeaderName, HeaderValue};
use onsign_core::{Error, Result};

/// The version context a document is addressed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionContext {
    /// A mutable workspace.
    Workspace(String),
    /// An immutable version.
    Version(String),
    /// An immutable microversion.
    Microversion(String),
}

impl VersionContext {
    /// The single letter used in paths: `w`, `v` or `m`.
    pub fn prefix(&self) -> &'static str {
        match self {
            VersionContext::Workspace(_) => "w",
            VersionContext::Version(_) => "v",
            VersionContext::Microversion(_) => "m",
        }
    }

    /// The workspace, version or microversion id.
    pub fn id(&self) -> &str {
        match self {
            VersionContext::Workspace(id)
            | VersionContext::Version(id)
            | VersionContext::Microversion(id) => id,
        }
    }
}

/// A local file to send as a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Path of the file on local storage.
    pub file_path: PathBuf,
    /// Mime type declared for the file part.
    pub mime_type: String,
    /// Extra form fields written before the file.
    pub fields: Vec<(String, String)>,
}

impl Upload {
    /// Create an upload of `file_path` with the given mime type.
    pub fn new(file_path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            mime_type: mime_type.into(),
            fields: Vec::new(),
        }
    }

    /// Add an extra form field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

/// Describes one call against the Onshape API.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// Resource name, e.g. `partstudios`.
    pub resource: String,
    /// Trailing path segment after the element, e.g. `massproperties`.
    pub subresource: Option<String>,
    /// Document id.
    pub document_id: Option<String>,
    /// Workspace, version or microversion.
    pub version: Option<VersionContext>,
    /// Element id.
    pub element_id: Option<String>,
    /// Explicit path. Overrides every structured field above.
    pub path: Option<String>,
    /// Query pairs.
    pub query: Vec<(String, String)>,
    /// Extra headers, they win over the defaults.
    pub headers: HeaderMap,
    /// Base url to send to instead of the credential's one.
    pub base_url: Option<String>,
    /// JSON body for POST.
    pub body: Option<serde_json::Value>,
    /// File to upload.
    pub upload: Option<Upload>,
}

impl ApiRequest {
    /// Address `resource` with the document based convention.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Default::default()
        }
    }

    /// Address an absolute or origin-relative url, such as a redirect target
    /// or the `next` link of a paged response.
    ///
    /// The path is used verbatim, the query is decoded into pairs so it can be
    /// signed again, and the scheme and authority (if any) become the base url.
    pub fn from_url(url: &str) -> Result<Self> {
        let uri: http::Uri = url.parse()?;

        let mut req = Self::with_path(uri.path());
        if let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) {
            req.base_url = Some(format!("{scheme}://{authority}"));
        }
        if let Some(query) = uri.query() {
            req.query = form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect();
        }

        Ok(req)
    }

    /// Address an endpoint by its explicit path, e.g. `/api/documents`.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Set the document id.
    pub fn document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Set the version context, replacing any previous one.
    pub fn context(mut self, version: VersionContext) -> Self {
        self.version = Some(version);
        self
    }

    /// Address a workspace.
    pub fn workspace(self, workspace_id: impl Into<String>) -> Self {
        self.context(VersionContext::Workspace(workspace_id.into()))
    }

    /// Address a version.
    pub fn version(self, version_id: impl Into<String>) -> Self {
        self.context(VersionContext::Version(version_id.into()))
    }

    /// Address a microversion.
    pub fn microversion(self, microversion_id: impl Into<String>) -> Self {
        self.context(VersionContext::Microversion(microversion_id.into()))
    }

    /// Set the element id.
    pub fn element(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    /// Set the subresource.
    pub fn subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = Some(subresource.into());
        self
    }

    /// Append a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a query parameter, replacing every earlier value of `key`.
    pub fn set_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.query.retain(|(k, _)| *k != key);
        self.query.push((key, value.into()));
        self
    }

    /// Insert an extra header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Send to `base_url` instead of the credential's base url.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the JSON body.
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a file upload.
    pub fn upload(mut self, upload: Upload) -> Self {
        self.upload = Some(upload);
        self
    }
}

/// Build the request path of `req`.
///
/// An explicit path is returned verbatim. Otherwise the path is assembled from
/// the structured fields, which needs at least a resource and a document id.
pub fn build_path(req: &ApiRequest) -> Result<String> {
    if let Some(path) = &req.path {
        return Ok(path.clone());
    }

    if req.resource.is_empty() {
        return Err(Error::request_invalid(
            "request has neither an explicit path nor a resource",
        ));
    }
    let document_id = req.document_id.as_deref().ok_or_else(|| {
        Error::request_invalid(format!(
            "request for resource {} has no document id",
            req.resource
        ))
    })?;

    let mut path = String::with_capacity(96);
    write!(path, "/api/{}/d/{document_id}", req.resource)?;
    if let Some(version) = &req.version {
        write!(path, "/{}/{}", version.prefix(), version.id())?;
    }
    if let Some(element_id) = &req.element_id {
        write!(path, "/e/{element_id}")?;
    }
    if let Some(subresource) = &req.subresource {
        write!(path, "/{subresource}")?;
    }

    Ok(path)
}

/// Build the url encoded query string for `query`, keeping its order.
///
/// Returns an empty string for no pairs.
pub fn build_query_string(query: &[(String, String)]) -> String {
    if query.is_empty() {
        return String::new();
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish()
}
