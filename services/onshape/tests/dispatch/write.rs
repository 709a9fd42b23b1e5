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

use http::StatusCode;
use onsign_onshape::ApiRequest;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{assert_signed, create_test_client};

#[tokio::test]
async fn test_post_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/partstudios/d/D1/w/W1"))
        .and(header("content-type", "application/json"))
        .and(body_string("{}"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":\"E1\"}"))
        .mount(&server)
        .await;

    let req = ApiRequest::new("partstudios").document("D1").workspace("W1");
    let got = create_test_client(&server).post(&req).await.unwrap();
    assert_eq!(got, "{\"id\":\"E1\"}");

    let requests = server.received_requests().await.unwrap();
    assert_signed(&requests[0]);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_post_json_body_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/documents/D1"))
        .and(query_param("force", "true"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let req = ApiRequest::with_path("/api/documents/D1")
        .query("force", "true")
        .body(json!({"name": "renamed"}));
    create_test_client(&server).post(&req).await.unwrap();
}

#[tokio::test]
async fn test_post_does_not_follow_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/documents"))
        .respond_with(
            ResponseTemplate::new(307)
                .insert_header("location", format!("{}/api/elsewhere", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    let err = create_test_client(&server)
        .post(&ApiRequest::with_path("/api/documents"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::TEMPORARY_REDIRECT));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/elements/d/D1/w/W1/e/E1"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let req = ApiRequest::new("elements")
        .document("D1")
        .workspace("W1")
        .element("E1");
    let got = create_test_client(&server).delete(&req).await.unwrap();
    assert!(got.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_signed(&requests[0]);
}

#[tokio::test]
async fn test_delete_forbidden() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/documents/D1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = create_test_client(&server)
        .delete(&ApiRequest::with_path("/api/documents/D1"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.response().unwrap().method, http::Method::DELETE);
}
