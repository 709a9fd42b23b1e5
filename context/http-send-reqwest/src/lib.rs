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

//! Reqwest-based HTTP sending implementation for onsign.
//!
//! `ReqwestHttpSend` implements `HttpSend` from `onsign_core`. It never follows
//! redirects on its own: a redirected Onshape request has to be signed again
//! for its new destination, which only the caller can do.
//!
//! ## Example
//!
//! ```no_run
//! use onsign_core::Context;
//! use onsign_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use log::debug;
use onsign_core::{Error, HttpSend, Result};
use reqwest::redirect::Policy;
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("reqwest client with default settings and no redirects must build");

        Self { client }
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// The client should be built with `redirect(Policy::none())`, otherwise
    /// redirects are followed without being re-signed.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let url = req.url().to_string();

        let mut resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport(format!("failed to send request to {url}")).with_source(e))?;

        let mut builder = http::Response::builder()
            .status(resp.status())
            .version(resp.version());
        if let Some(headers) = builder.headers_mut() {
            *headers = resp.headers().clone();
        }

        // Keep pulling until the stream ends; one chunk is never the whole body.
        let mut buf = BytesMut::new();
        let mut chunks = 0usize;
        while let Some(chunk) = resp.chunk().await.map_err(|e| {
            Error::transport(format!("failed to read response body from {url}")).with_source(e)
        })? {
            chunks += 1;
            buf.extend_from_slice(&chunk);
        }
        debug!(
            "received {} bytes in {chunks} chunks from {url}",
            buf.len()
        );

        Ok(builder.body(buf.freeze())?)
    }
}
