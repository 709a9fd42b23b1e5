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

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use onsign_core::{Context, Error, ProvideCredential, Result};
use serde::Deserialize;

use crate::{constants::*, Credential};

/// FileCredentialProvider loads an Onshape API key from a JSON creds file.
///
/// The file path is determined by:
/// 1. The path specified via `with_path()`
/// 2. The `ONSHAPE_CREDENTIALS_FILE` environment variable
/// 3. Default to `./creds.json`
///
/// Three layouts are accepted:
///
/// ```json
/// { "baseUrl": "https://cad.onshape.com", "accessKey": "...", "secretKey": "..." }
/// ```
///
/// ```json
/// { "https://cad.onshape.com": { "access_key": "...", "secret_key": "..." } }
/// ```
///
/// ```json
/// { "prod": { "baseUrl": "https://cad.onshape.com", "accessKey": "...", "secretKey": "..." } }
/// ```
///
/// For the keyed layouts the entry is selected by the stack, which is either
/// the key itself or the `baseUrl` of an entry. The stack comes from
/// `with_stack()`, then `ONSHAPE_STACK`, then `https://cad.onshape.com`.
///
/// A file that can't be read yields no credential; a file that can be read but
/// doesn't hold the requested stack is a configuration error.
#[derive(Debug, Default, Clone)]
pub struct FileCredentialProvider {
    path: Option<String>,
    stack: Option<String>,
}

impl FileCredentialProvider {
    /// Create a new FileCredentialProvider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the creds file.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the stack to select.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default, alias = "baseUrl")]
    base_url: Option<String>,
    #[serde(alias = "accessKey")]
    access_key: String,
    #[serde(alias = "secretKey")]
    secret_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CredsFile {
    Single(Entry),
    Stacks(HashMap<String, Entry>),
}

#[async_trait]
impl ProvideCredential for FileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => ctx
                .env_var(ONSHAPE_CREDENTIALS_FILE)
                .unwrap_or_else(|| DEFAULT_CREDENTIALS_FILE.to_string()),
        };
        let Some(path) = ctx.expand_home_dir(&path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(None);
        };

        let content = match ctx.file_read(&path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read creds file {path}: {err:?}");
                return Ok(None);
            }
        };

        let file: CredsFile = serde_json::from_slice(&content).map_err(|e| {
            Error::config_invalid(format!("creds file {path} is malformed")).with_source(e)
        })?;

        let stack = match &self.stack {
            Some(stack) => stack.clone(),
            None => ctx
                .env_var(ONSHAPE_STACK)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };

        let cred = match file {
            CredsFile::Single(entry) => Credential::new(
                entry.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
                entry.access_key,
                entry.secret_key,
            ),
            CredsFile::Stacks(stacks) => select_stack(stacks, &stack).ok_or_else(|| {
                Error::config_invalid(format!("stack {stack} not found in creds file {path}"))
            })??,
        };
        debug!("loaded credential for {} from {path}", cred.base_url);

        Ok(Some(cred))
    }
}

/// Pick the entry for `stack`, by key first and by `baseUrl` second.
///
/// Returns `None` when no entry matches.
fn select_stack(mut stacks: HashMap<String, Entry>, stack: &str) -> Option<Result<Credential>> {
    let stack = stack.trim_end_matches('/');

    let key = stacks
        .keys()
        .find(|k| k.trim_end_matches('/') == stack)
        .or_else(|| {
            stacks.iter().find_map(|(k, e)| {
                e.base_url
                    .as_deref()
                    .filter(|u| u.trim_end_matches('/') == stack)
                    .map(|_| k)
            })
        })?
        .clone();
    let entry = stacks.remove(&key)?;

    let base_url = match entry.base_url {
        Some(base_url) => base_url,
        None if key.starts_with("http://") || key.starts_with("https://") => key,
        None => {
            return Some(Err(Error::config_invalid(format!(
                "stack {key} in creds file has no baseUrl"
            ))))
        }
    };

    Some(Ok(Credential::new(
        base_url,
        entry.access_key,
        entry.secret_key,
    )))
}
