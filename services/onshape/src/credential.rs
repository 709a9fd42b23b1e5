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

use std::fmt::{Debug, Formatter};

use onsign_core::utils::Redact;
use onsign_core::{Error, Result, SigningCredential};

/// Credential for the Onshape API.
///
/// A credential is bound to one stack: the keys are only accepted by the
/// `base_url` they were issued for.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Base url of the stack, e.g. `https://cad.onshape.com`.
    pub base_url: String,
    /// Access key of the API key pair.
    pub access_key: String,
    /// Secret key of the API key pair.
    pub secret_key: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// A trailing `/` on the base url is dropped so that paths can be appended
    /// directly.
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Check the credential before any request is attempted.
    ///
    /// Every field must be present and the base url must use `http://` or
    /// `https://`.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config_invalid("credential base url is missing"));
        }
        if self.access_key.is_empty() {
            return Err(Error::config_invalid("credential access key is missing"));
        }
        if self.secret_key.is_empty() {
            return Err(Error::config_invalid("credential secret key is missing"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::config_invalid(format!(
                "base url {} is invalid: must begin with http:// or https://",
                self.base_url
            )));
        }
        self.base_url.parse::<http::Uri>().map_err(|e| {
            Error::config_invalid(format!("base url {} is invalid", self.base_url)).with_source(e)
        })?;

        Ok(())
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("base_url", &self.base_url)
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
