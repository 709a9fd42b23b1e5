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
use std::time::Duration;

use log::warn;
use onsign_core::utils::Redact;
use onsign_core::Context;

use crate::constants::*;

/// Default timeout for one request, redirects are timed separately.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of redirects a GET will follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Config carries all the configuration for an Onshape client.
#[derive(Clone)]
pub struct Config {
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ONSHAPE_BASE_URL`]
    pub base_url: Option<String>,
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ONSHAPE_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ONSHAPE_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `credentials_file` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ONSHAPE_CREDENTIALS_FILE`]
    /// - default to `./creds.json`
    pub credentials_file: Option<String>,
    /// `stack` selects an entry of the credentials file, either a stack url
    /// or a stack name. It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ONSHAPE_STACK`]
    /// - default to `https://cad.onshape.com`
    pub stack: Option<String>,
    /// `timeout` of a single request will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ONSHAPE_TIMEOUT`] in seconds
    /// - default to [`DEFAULT_TIMEOUT`]
    ///
    /// A zero duration disables the timeout.
    pub timeout: Option<Duration>,
    /// Maximum number of redirects a GET follows.
    pub max_redirects: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            access_key: None,
            secret_key: None,
            credentials_file: None,
            stack: None,
            timeout: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set credentials_file
    pub fn with_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Set stack
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max_redirects
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ONSHAPE_BASE_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ONSHAPE_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ONSHAPE_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ONSHAPE_CREDENTIALS_FILE) {
            self.credentials_file.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ONSHAPE_STACK) {
            self.stack.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ONSHAPE_TIMEOUT) {
            match v.trim().parse::<u64>() {
                Ok(secs) => {
                    self.timeout.get_or_insert(Duration::from_secs(secs));
                }
                Err(err) => warn!("ignoring invalid {ONSHAPE_TIMEOUT} {v:?}: {err}"),
            }
        }

        self
    }

    /// The timeout to apply, `None` when disabled.
    pub fn effective_timeout(&self) -> Option<Duration> {
        match self.timeout {
            None => Some(DEFAULT_TIMEOUT),
            Some(t) if t.is_zero() => None,
            Some(t) => Some(t),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("credentials_file", &self.credentials_file)
            .field("stack", &self.stack)
            .field("timeout", &self.timeout)
            .field("max_redirects", &self.max_redirects)
            .finish()
    }
}
