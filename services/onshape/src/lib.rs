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

//! Signed HTTP client for the Onshape REST API.
//!
//! Every request is authenticated with an Onshape API key: the method, a fresh
//! nonce, the date, the content type, the path and the query are joined,
//! lower-cased and signed with HMAC-SHA256. [`Client`] builds, signs and sends
//! requests described by an [`ApiRequest`], follows redirects for GET and
//! uploads files as multipart forms.
//!
//! ## Example
//!
//! ```no_run
//! use onsign_core::{Context, OsEnv, Result};
//! use onsign_file_read_tokio::TokioFileRead;
//! use onsign_http_send_reqwest::ReqwestHttpSend;
//! use onsign_onshape::{Client, Config, VersionContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!     let client = Client::from_config(ctx, Config::new()).await?;
//!
//!     let mass = client
//!         .mass_by_material("did", VersionContext::Workspace("wid".into()), "eid")
//!         .await?;
//!     println!("total mass: {}", mass.total);
//!     Ok(())
//! }
//! ```

mod constants;

mod config;
pub use config::{Config, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};

mod credential;
pub use credential::Credential;

mod nonce;
pub use nonce::{make_nonce, make_nonce_with};

mod sign_request;
pub use sign_request::{canonical_request, RequestSigner};

mod path;
pub use path::{build_path, build_query_string, ApiRequest, Upload, VersionContext};

mod multipart;
pub use multipart::MultipartForm;

mod client;
pub use client::Client;

mod api;
pub use api::{AssemblyDefinitionOptions, BomOptions, ElementFilter, OwnerType};

mod model;
pub use model::{MassBody, MassProperties, Material, Part};

mod mass;
pub use mass::{tally, MassByMaterial};

mod provide_credential;
pub use provide_credential::*;
