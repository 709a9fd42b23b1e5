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
use onsign_core::{Context, ProvideCredential, Result};

use crate::{constants::*, Credential};

/// EnvCredentialProvider loads an Onshape API key from environment variables.
///
/// This provider looks for the following environment variables:
/// - `ONSHAPE_ACCESS_KEY`: The access key
/// - `ONSHAPE_SECRET_KEY`: The secret key
/// - `ONSHAPE_BASE_URL`: The stack to talk to (optional, defaults to `https://cad.onshape.com`)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let access_key = envs.get(ONSHAPE_ACCESS_KEY);
        let secret_key = envs.get(ONSHAPE_SECRET_KEY);

        match (access_key, secret_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(
                envs.get(ONSHAPE_BASE_URL)
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_BASE_URL),
                ak.as_str(),
                sk.as_str(),
            ))),
            _ => Ok(None),
        }
    }
}
