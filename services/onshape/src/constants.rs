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

// Env values used by the onshape credential providers and config.
pub const ONSHAPE_BASE_URL: &str = "ONSHAPE_BASE_URL";
pub const ONSHAPE_ACCESS_KEY: &str = "ONSHAPE_ACCESS_KEY";
pub const ONSHAPE_SECRET_KEY: &str = "ONSHAPE_SECRET_KEY";
pub const ONSHAPE_CREDENTIALS_FILE: &str = "ONSHAPE_CREDENTIALS_FILE";
pub const ONSHAPE_STACK: &str = "ONSHAPE_STACK";
pub const ONSHAPE_TIMEOUT: &str = "ONSHAPE_TIMEOUT";

pub const DEFAULT_BASE_URL: &str = "https://cad.onshape.com";
pub const DEFAULT_CREDENTIALS_FILE: &str = "./creds.json";

// Headers and media types.
pub const ON_NONCE: &str = "on-nonce";
pub const APPLICATION_JSON: &str = "application/json";
pub const ONSHAPE_JSON: &str = "application/vnd.onshape.v1+json";
pub const ONSHAPE_OCTET_STREAM: &str = "application/vnd.onshape.v1+octet-stream";
pub const USER_AGENT: &str = concat!("onsign/", env!("CARGO_PKG_VERSION"));

// Signing.
pub const AUTH_SCHEME: &str = "On";
pub const HMAC_ALGORITHM: &str = "HmacSHA256";
pub const NONCE_LENGTH: usize = 25;
