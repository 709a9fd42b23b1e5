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

use onsign_core::ErrorKind;
use onsign_onshape::{ApiRequest, Upload};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{assert_signed, create_test_client};

fn find(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

#[tokio::test]
async fn test_upload_multipart_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/blobelements/d/D1/w/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":\"E9\"}"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bracket.stl");
    let content: Vec<u8> = b"solid bracket\n"
        .iter()
        .copied()
        .chain((0..4096).map(|i| (i % 200) as u8 + 1))
        .collect();
    std::fs::write(&file, &content).unwrap();

    let req = ApiRequest::new("blobelements")
        .document("D1")
        .workspace("W1")
        .upload(Upload::new(&file, "application/sla").with_field("storeInDocument", "true"));
    let got = create_test_client(&server).upload(&req).await.unwrap();
    assert_eq!(got, "{\"id\":\"E9\"}");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_signed(req);

    let content_type = req.headers.get("content-type").unwrap().to_str().unwrap();
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=\"")
        .and_then(|s| s.strip_suffix('"'))
        .expect("multipart content type");
    assert_eq!(boundary.len(), 32);

    let body = &req.body;
    let length_field = format!(
        "Content-Disposition: form-data; name=\"fileContentLength\"\r\n\r\n{}\r\n",
        content.len()
    );
    let name_field = "Content-Disposition: form-data; name=\"encodedFilename\"\r\n\r\nbracket.stl\r\n";
    let extra_field = "Content-Disposition: form-data; name=\"storeInDocument\"\r\n\r\ntrue\r\n";
    let file_part = "Content-Disposition: form-data; name=\"file\"; filename=\"bracket.stl\"\r\nContent-Type: application/sla\r\n\r\n";

    let extra_at = find(body, extra_field.as_bytes());
    let name_at = find(body, name_field.as_bytes());
    let length_at = find(body, length_field.as_bytes());
    let file_part_at = find(body, file_part.as_bytes());
    let content_at = find(body, &content);
    assert_eq!(extra_at.len(), 1);
    assert_eq!(name_at.len(), 1);
    assert_eq!(length_at.len(), 1);
    assert_eq!(file_part_at.len(), 1);
    assert_eq!(content_at.len(), 1, "file bytes must be sent exactly once");

    assert!(extra_at[0] < name_at[0]);
    assert!(name_at[0] < length_at[0]);
    assert!(length_at[0] < file_part_at[0]);
    assert_eq!(content_at[0], file_part_at[0] + file_part.len());

    let closing = format!("\r\n--{boundary}--\r\n");
    assert_eq!(
        &body[content_at[0] + content.len()..],
        closing.as_bytes(),
        "closing boundary must follow the file bytes"
    );
}

#[tokio::test]
async fn test_upload_missing_file() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let req = ApiRequest::new("blobelements")
        .document("D1")
        .workspace("W1")
        .upload(Upload::new(dir.path().join("missing.stl"), "application/sla"));

    let err = create_test_client(&server).upload(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(server.received_requests().await.unwrap().is_empty());
}
