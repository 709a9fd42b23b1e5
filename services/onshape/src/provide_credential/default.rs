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

use async_trait::async_trait;
use onsign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use crate::constants::DEFAULT_BASE_URL;
use crate::provide_credential::{
    EnvCredentialProvider, FileCredentialProvider, StaticCredentialProvider,
};
use crate::{Config, Credential};

/// DefaultCredentialProvider will try to load credential from different sources.
///
/// Resolution order:
///
/// 1. Environment variables
/// 2. Creds file
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(FileCredentialProvider::new());

        Self { chain }
    }

    /// Create a DefaultCredentialProvider that honours `config`.
    ///
    /// Keys set on the config win over every other source. The creds file path
    /// and stack of the config are passed on to the file provider.
    pub fn from_config(config: &Config) -> Self {
        let mut chain = ProvideCredentialChain::new();

        if let (Some(ak), Some(sk)) = (&config.access_key, &config.secret_key) {
            chain = chain.push(StaticCredentialProvider::new(
                config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
                ak,
                sk,
            ));
        }
        chain = chain.push(EnvCredentialProvider::new());

        let mut file = FileCredentialProvider::new();
        if let Some(path) = &config.credentials_file {
            file = file.with_path(path);
        }
        if let Some(stack) = &config.stack {
            file = file.with_stack(stack);
        }

        Self {
            chain: chain.push(file),
        }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// This allows adding a high-priority credential source that will be tried
    /// before all other providers in the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use onsign_onshape::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new().push_front(
    ///     StaticCredentialProvider::new("https://cad.onshape.com", "access_key", "secret_key"),
    /// );
    /// ```
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
