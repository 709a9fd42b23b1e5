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

//! Core components for signed Onshape API clients.
//!
//! This crate provides the foundational types and traits shared by the onsign
//! crates. It has no knowledge of a particular signing scheme; it defines the
//! seams that the signing client is built on.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending and
//!   environment access. Every piece of io a client performs goes through it, so tests can swap
//!   any of them out.
//! - **Traits**: Abstract interfaces for credential loading ([`ProvideCredential`]) and request
//!   signing ([`SignRequest`]).
//! - **Error**: A single [`Error`] type whose [`ErrorKind`] tells configuration, transport,
//!   protocol and local io failures apart.
//!
//! ## Example
//!
//! ```no_run
//! use onsign_core::{Context, ProvideCredential, Result, SigningCredential};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(ctx.env_var("MY_KEY").map(|key| MyCredential { key }))
//!     }
//! }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`time`]: HTTP-date helpers
//! - [`utils`]: General utilities including secret redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, FailedResponse, Result};

mod context;
pub use context::Context;
mod fs;
pub use fs::FileRead;
mod http;
pub use self::http::HttpSend;
mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
