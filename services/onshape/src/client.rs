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

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, LOCATION, USER_AGENT};
use http::{HeaderValue, Method, StatusCode};
use log::{debug, warn};
use onsign_core::{Context, Error, ProvideCredential, Result, SignRequest};

use crate::config::{Config, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};
use crate::constants;
use crate::multipart::MultipartForm;
use crate::path::{build_path, build_query_string, ApiRequest};
use crate::provide_credential::DefaultCredentialProvider;
use crate::{Credential, RequestSigner};

/// Client sends signed requests to the Onshape API.
///
/// Every request is built from an [`ApiRequest`], signed right before it is
/// sent and its body read to the end. A status other than `200 OK` is an
/// [`ErrorKind::UnexpectedStatus`](onsign_core::ErrorKind::UnexpectedStatus)
/// error carrying the response, except for `307` on GET which is followed
/// and signed again for its new destination.
///
/// Cloning is cheap, the credential is shared.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    credential: Arc<Credential>,
    signer: Arc<RequestSigner>,
    timeout: Option<Duration>,
    max_redirects: usize,
}

impl Client {
    /// Create a new client for `credential`.
    ///
    /// The credential is validated here, so a bad base url or a missing key
    /// fails before any request is attempted.
    pub fn new(ctx: Context, credential: Credential) -> Result<Self> {
        credential.validate()?;

        Ok(Self {
            ctx,
            credential: Arc::new(credential),
            signer: Arc::new(RequestSigner::new()),
            timeout: Some(DEFAULT_TIMEOUT),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        })
    }

    /// Create a client from `config`, loading the credential through
    /// [`DefaultCredentialProvider::from_config`].
    pub async fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let credential = DefaultCredentialProvider::from_config(&config)
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| {
                Error::config_invalid("no onshape credential found in config, env or creds file")
            })?;

        Ok(Self::new(ctx, credential)?
            .with_timeout(config.effective_timeout())
            .with_max_redirects(config.max_redirects))
    }

    /// Set the timeout of a single request, `None` or zero disables it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Set how many redirects a GET follows.
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Replace the request signer.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// The credential requests are signed with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The context all io goes through.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Send a GET and return the body, following `307` redirects.
    ///
    /// A redirect is re-issued as a fresh GET to the `Location` target with
    /// the query taken from that url only. A relative target keeps the
    /// current base url. The caller's extra headers are carried over.
    pub async fn get(&self, req: &ApiRequest) -> Result<Bytes> {
        let (mut uri, mut resp) = self.send(Method::GET, req, Bytes::new(), None).await?;
        let mut base_url = req.base_url.clone();
        let mut hops = 0;

        while resp.status() == StatusCode::TEMPORARY_REDIRECT {
            if hops >= self.max_redirects {
                warn!("GET {uri} redirected more than {} times", self.max_redirects);
                return Err(failed(Method::GET, uri, resp));
            }

            let Some(location) = resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
            else {
                warn!("GET {uri} redirected without a usable location");
                return Err(failed(Method::GET, uri, resp));
            };
            let mut next = match ApiRequest::from_url(&location) {
                Ok(next) => next,
                Err(err) => {
                    warn!("GET {uri} redirected to invalid location {location}: {err}");
                    return Err(failed(Method::GET, uri, resp));
                }
            };
            hops += 1;
            warn!("GET {uri} redirected to {location}");

            if next.base_url.is_none() {
                next.base_url = base_url.clone();
            }
            next.headers = req.headers.clone();
            base_url = next.base_url.clone();

            (uri, resp) = self.send(Method::GET, &next, Bytes::new(), None).await?;
        }

        expect_ok(Method::GET, uri, resp)
    }

    /// Send a POST with the JSON body of `req`, or `{}` when it has none.
    pub async fn post(&self, req: &ApiRequest) -> Result<Bytes> {
        let body = match &req.body {
            Some(body) => Bytes::from(serde_json::to_vec(body)?),
            None => Bytes::from_static(b"{}"),
        };

        let (uri, resp) = self.send(Method::POST, req, body, None).await?;
        expect_ok(Method::POST, uri, resp)
    }

    /// Send a DELETE with an empty body.
    pub async fn delete(&self, req: &ApiRequest) -> Result<Bytes> {
        let (uri, resp) = self.send(Method::DELETE, req, Bytes::new(), None).await?;
        expect_ok(Method::DELETE, uri, resp)
    }

    /// Send the upload of `req` as a multipart/form-data POST.
    ///
    /// The file is stat'ed and read completely before anything goes on the
    /// wire. The form holds the caller's fields, `encodedFilename`,
    /// `fileContentLength` and finally the file itself.
    pub async fn upload(&self, req: &ApiRequest) -> Result<Bytes> {
        let upload = req
            .upload
            .as_ref()
            .ok_or_else(|| Error::request_invalid("upload request has no file"))?;
        let filename = upload
            .file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                Error::request_invalid(format!(
                    "upload path {} has no file name",
                    upload.file_path.display()
                ))
            })?;
        let path = upload.file_path.to_string_lossy();

        let len = self.ctx.file_len(&path).await?;
        let content = self.ctx.file_read(&path).await?;
        debug!("read {} bytes of {len} from {path}", content.len());

        let mut form = MultipartForm::new();
        for (name, value) in &upload.fields {
            form = form.field(name, value);
        }
        let form = form
            .field("encodedFilename", &filename)
            .field("fileContentLength", len.to_string());
        let body = form.encode(&filename, &upload.mime_type, content);

        let (uri, resp) = self
            .send(Method::POST, req, body, Some(form.content_type()))
            .await?;
        expect_ok(Method::POST, uri, resp)
    }

    /// Build, sign and send one request, returning the full uri and response.
    async fn send(
        &self,
        method: Method,
        req: &ApiRequest,
        body: Bytes,
        content_type: Option<String>,
    ) -> Result<(String, http::Response<Bytes>)> {
        let base_url = req
            .base_url
            .as_deref()
            .unwrap_or(&self.credential.base_url)
            .trim_end_matches('/');
        let path = build_path(req)?;
        let query = build_query_string(&req.query);
        let uri = if query.is_empty() {
            format!("{base_url}{path}")
        } else {
            format!("{base_url}{path}?{query}")
        };

        let (mut parts, body) = http::Request::builder()
            .method(method.clone())
            .uri(&uri)
            .body(body)?
            .into_parts();
        parts.headers.extend(req.headers.clone());
        if let Some(content_type) = content_type {
            parts.headers.insert(CONTENT_TYPE, content_type.parse()?);
        }
        if !parts.headers.contains_key(USER_AGENT) {
            parts
                .headers
                .insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        }

        self.signer
            .sign_request(&self.ctx, &mut parts, Some(self.credential.as_ref()), None)
            .await?;
        let req = http::Request::from_parts(parts, body);

        debug!("sending {method} {uri}");
        let fut = self.ctx.http_send(req);
        let resp = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, fut).await.map_err(|_| {
                Error::transport(format!("{method} {uri} timed out after {timeout:?}"))
            })??,
            None => fut.await?,
        };
        debug!("{method} {uri} returned {}", resp.status());

        Ok((uri, resp))
    }
}

fn expect_ok(method: Method, uri: String, resp: http::Response<Bytes>) -> Result<Bytes> {
    if resp.status() != StatusCode::OK {
        return Err(failed(method, uri, resp));
    }

    Ok(resp.into_body())
}

fn failed(method: Method, uri: String, resp: http::Response<Bytes>) -> Error {
    let status = resp.status();
    let body = String::from_utf8_lossy(resp.body()).to_string();

    Error::unexpected_status(method, uri, status, body)
}
