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

use std::time::Duration;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use http::StatusCode;
use onsign_core::ErrorKind;
use onsign_onshape::{ApiRequest, Client, Credential};
use pretty_assertions::assert_eq;
use sha2::Sha256;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{assert_signed, create_test_client, create_test_context, ACCESS_KEY, SECRET_KEY};

#[tokio::test]
async fn test_get_reads_whole_body() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0..1024 * 1024).map(|i| (i % 251) as u8).collect();

    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let got = create_test_client(&server)
        .get(&ApiRequest::with_path("/api/documents"))
        .await
        .unwrap();
    assert_eq!(got.len(), body.len());
    assert!(got == body);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_signed(&requests[0]);
}

#[tokio::test]
async fn test_get_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/documents/D1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let got = create_test_client(&server)
        .get(&ApiRequest::with_path("/api/documents/D1"))
        .await
        .unwrap();
    assert!(got.is_empty());
}

#[tokio::test]
async fn test_get_follows_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/partstudios/d/D1/w/W1/e/E1/massproperties"))
        .respond_with(
            ResponseTemplate::new(307)
                .insert_header("location", format!("{}/api/x?q=1", server.uri()).as_str())
                .set_body_string("first"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/x"))
        .and(query_param("q", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("second"))
        .mount(&server)
        .await;

    let req = ApiRequest::new("partstudios")
        .document("D1")
        .workspace("W1")
        .element("E1")
        .subresource("massproperties");
    let got = create_test_client(&server).get(&req).await.unwrap();
    assert_eq!(got, "second");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url.path(), "/api/x");
    assert_eq!(requests[1].url.query(), Some("q=1"));
    assert_signed(&requests[1]);
    assert_ne!(
        requests[0].headers.get("on-nonce"),
        requests[1].headers.get("on-nonce")
    );
}

#[tokio::test]
async fn test_get_redirect_to_other_host_is_signed_for_that_host() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/documents/D1"))
        .respond_with(
            ResponseTemplate::new(307)
                .insert_header("location", format!("{}/api/x?q=1", second.uri()).as_str()),
        )
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/x"))
        .and(query_param("q", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
        .mount(&second)
        .await;

    let got = create_test_client(&first)
        .get(&ApiRequest::with_path("/api/documents/D1"))
        .await
        .unwrap();
    assert_eq!(got, "moved");

    let redirected = second.received_requests().await.unwrap();
    assert_eq!(redirected.len(), 1);
    let req = &redirected[0];
    assert_signed(req);

    let header = |name: &str| req.headers.get(name).unwrap().to_str().unwrap().to_string();
    let string_to_sign = format!(
        "get\n{}\n{}\n{}\n/api/x\nq=1\n",
        header("on-nonce"),
        header("date"),
        header("content-type"),
    )
    .to_lowercase();
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET_KEY.as_bytes()).unwrap();
    mac.update(string_to_sign.as_bytes());
    let expected = format!(
        "On {ACCESS_KEY}:HmacSHA256:{}",
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    );
    assert_eq!(header("authorization"), expected);
}

#[tokio::test]
async fn test_get_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/documents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("document not found"))
        .mount(&server)
        .await;

    let err = create_test_client(&server)
        .get(&ApiRequest::with_path("/api/documents/missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let resp = err.response().unwrap();
    assert_eq!(resp.body, "document not found");
    assert_eq!(resp.uri, format!("{}/api/documents/missing", server.uri()));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_get_transport_error() {
    // Nothing listens on the discard port.
    let client = Client::new(
        create_test_context(),
        Credential::new("http://127.0.0.1:9", ACCESS_KEY, SECRET_KEY),
    )
    .unwrap();

    let err = client
        .get(&ApiRequest::with_path("/api/documents"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_get_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let err = create_test_client(&server)
        .with_timeout(Some(Duration::from_millis(100)))
        .get(&ApiRequest::with_path("/api/documents"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_invalid_credential_sends_nothing() {
    let server = MockServer::start().await;

    let err = Client::new(
        create_test_context(),
        Credential::new(server.uri().replace("http://", "ftp://"), ACCESS_KEY, SECRET_KEY),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

    let err = Client::new(
        create_test_context(),
        Credential::new(server.uri(), ACCESS_KEY, ""),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

    assert!(server.received_requests().await.unwrap().is_empty());
}
