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

//! Per-request nonce for the `On-Nonce` header.

use rand::Rng;

use crate::constants::NONCE_LENGTH;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a 25 character nonce from `[A-Z0-9]` with the thread-local rng.
///
/// The nonce identifies a request for replay tracking; it is not a secret.
pub fn make_nonce() -> String {
    make_nonce_with(&mut rand::thread_rng())
}

/// Generate a nonce from the given random source.
pub fn make_nonce_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..NONCE_LENGTH)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
