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

//! multipart/form-data encoding for blob uploads.

use bytes::{BufMut, Bytes, BytesMut};
use rand::distributions::Alphanumeric;
use rand::Rng;

const BOUNDARY_LENGTH: usize = 32;

/// A multipart/form-data body with text fields followed by exactly one file.
///
/// Fields are written in insertion order; the file part always comes last,
/// followed by the closing boundary.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    fields: Vec<(String, String)>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// Create a form with a random alphanumeric boundary.
    pub fn new() -> Self {
        let boundary: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(BOUNDARY_LENGTH)
            .map(char::from)
            .collect();

        Self::with_boundary(boundary)
    }

    /// Create a form with a fixed boundary.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            fields: Vec::new(),
        }
    }

    /// The boundary token.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the `Content-Type` header, which is part of the signature.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary=\"{}\"", self.boundary)
    }

    /// Append a text field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Encode all fields, then the file part holding `content`, then the
    /// closing boundary.
    ///
    /// `content` is reused as the body buffer, so the file bytes are held in
    /// memory only once.
    pub fn encode(&self, filename: &str, mime_type: &str, content: Vec<u8>) -> Bytes {
        let mut head = BytesMut::with_capacity(256 * (self.fields.len() + 1));
        for (name, value) in &self.fields {
            head.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
            head.put_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
            head.put_slice(value.as_bytes());
            head.put_slice(b"\r\n");
        }
        head.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
        head.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        head.put_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
        let tail = format!("\r\n--{}--\r\n", self.boundary);

        let mut body = content;
        body.reserve_exact(head.len() + tail.len());
        body.splice(0..0, head.iter().copied());
        body.extend_from_slice(tail.as_bytes());

        Bytes::from(body)
    }
}
