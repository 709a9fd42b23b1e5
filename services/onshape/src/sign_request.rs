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

//! Onshape API key request signer.
use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, DATE};
use http::{HeaderName, HeaderValue};
use log::debug;
use onsign_core::hash::base64_hmac_sha256;
use onsign_core::time::{format_http_date, now, DateTime};
use onsign_core::{Context, Error, Result, SignRequest};

use crate::constants::*;
use crate::credential::Credential;
use crate::nonce::make_nonce;

/// RequestSigner that implements Onshape API key authentication.
///
/// Signing writes `Date`, `On-Nonce` and `Authorization`, and fills in
/// `Content-Type` and `Accept` when the request does not carry them yet. The
/// signature covers the path and query of the request uri, so it must run
/// after the uri is final and right before the request is sent.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests: the server only
    /// accepts a date within five minutes of its own clock.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "onshape api key requests can't be presigned",
            ));
        }

        let date = format_http_date(self.time.unwrap_or_else(now));
        let nonce = self.nonce.clone().unwrap_or_else(make_nonce);

        if !parts.headers.contains_key(CONTENT_TYPE) {
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }
        if !parts.headers.contains_key(ACCEPT) {
            parts
                .headers
                .insert(ACCEPT, HeaderValue::from_static(ONSHAPE_JSON));
        }

        let string_to_sign = {
            let content_type = parts
                .headers
                .get(CONTENT_TYPE)
                .map(|v| v.to_str())
                .transpose()?
                .unwrap_or_default();

            canonical_request(
                parts.method.as_str(),
                &nonce,
                &date,
                content_type,
                parts.uri.path(),
                parts.uri.query().unwrap_or_default(),
            )
        };
        debug!("string to sign: {string_to_sign:?}");

        let signature = base64_hmac_sha256(cred.secret_key.as_bytes(), string_to_sign.as_bytes());

        parts.headers.insert(DATE, date.parse()?);
        parts
            .headers
            .insert(HeaderName::from_static(ON_NONCE), nonce.parse()?);
        parts.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = format!(
                "{AUTH_SCHEME} {}:{HMAC_ALGORITHM}:{signature}",
                cred.access_key
            )
            .parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}

/// Construct the canonical string to sign.
///
/// ## Format
///
/// ```text
/// lowercase(
///     Method + "\n" +
///     Nonce + "\n" +
///     Date + "\n" +
///     Content-Type + "\n" +
///     Path + "\n" +
///     QueryString + "\n"
/// )
/// ```
pub fn canonical_request(
    method: &str,
    nonce: &str,
    date: &str,
    content_type: &str,
    path: &str,
    query: &str,
) -> String {
    format!("{method}\n{nonce}\n{date}\n{content_type}\n{path}\n{query}\n").to_lowercase()
}
