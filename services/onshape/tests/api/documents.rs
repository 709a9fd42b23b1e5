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

use onsign_onshape::{ElementFilter, OwnerType, VersionContext};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::create_test_client;

#[tokio::test]
async fn test_list_documents_and_next_page() {
    let server = MockServer::start().await;
    let next = format!("{}/api/documents?offset=20&limit=20", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .and(query_param("offset", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": "D21"}], "next": null})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .and(query_param("limit", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": "D1"}], "next": next})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let page = client.list_documents(&[("limit", "20")]).await.unwrap();
    assert_eq!(page["items"][0]["id"], "D1");

    let next = page["next"].as_str().unwrap();
    let page = client.next_page(next).await.unwrap();
    assert_eq!(page["items"][0]["id"], "D21");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("limit=20"));
    assert_eq!(requests[1].url.query(), Some("offset=20&limit=20"));
}

#[tokio::test]
async fn test_document_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/documents"))
        .and(body_json(json!({"name": "Bracket", "ownerType": 0, "isPublic": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "D1",
            "name": "Bracket",
            "defaultWorkspace": {"id": "W1"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/documents/D1"))
        .and(body_json(json!({"name": "Bracket v2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "D1", "name": "Bracket v2"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/D1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "D1", "name": "Bracket v2"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/d/D1/w/W1/elements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "E1", "elementType": "PARTSTUDIO"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/documents/D1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = create_test_client(&server);

    let doc = client
        .create_document("Bracket", OwnerType::User, false)
        .await
        .unwrap();
    assert_eq!(doc["defaultWorkspace"]["id"], "W1");

    let doc = client.rename_document("D1", "Bracket v2").await.unwrap();
    assert_eq!(doc["name"], "Bracket v2");

    let doc = client.get_document("D1").await.unwrap();
    assert_eq!(doc["name"], "Bracket v2");

    let elements = client
        .list_elements("D1", VersionContext::Workspace("W1".into()))
        .await
        .unwrap();
    assert_eq!(elements[0]["elementType"], "PARTSTUDIO");

    client.delete_document("D1").await.unwrap();
}

#[tokio::test]
async fn test_get_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/endpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"group": "Documents", "endpoints": []}
        ])))
        .mount(&server)
        .await;

    let endpoints = create_test_client(&server).get_endpoints().await.unwrap();
    assert_eq!(endpoints[0]["group"], "Documents");
}

#[tokio::test]
async fn test_next_page_with_overrides_offset_and_limit() {
    let server = MockServer::start().await;
    let next = format!("{}/api/teams?offset=20&limit=20&q=eng", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .and(query_param("offset", "40"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": "T3"}]})))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let page = client.next_page_with(&next, Some(40), Some(5)).await.unwrap();
    assert_eq!(page["items"][0]["id"], "T3");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("q=eng&offset=40&limit=5"));
}

#[tokio::test]
async fn test_list_teams() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "T1", "name": "Design"}],
            "next": null
        })))
        .mount(&server)
        .await;

    let teams = create_test_client(&server).list_teams().await.unwrap();
    assert_eq!(teams["items"][0]["name"], "Design");
}

#[tokio::test]
async fn test_get_workspaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/documents/d/D1/workspaces"))
        .and(query_param("noreadonly", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "W1", "name": "Main", "isReadOnly": false}
        ])))
        .mount(&server)
        .await;

    let workspaces = create_test_client(&server)
        .get_workspaces("D1", true)
        .await
        .unwrap();
    assert_eq!(workspaces[0]["id"], "W1");
}

#[tokio::test]
async fn test_list_elements_with_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/documents/d/D1/w/W1/elements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "E2", "elementType": "ASSEMBLY"}
        ])))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let filter = ElementFilter {
        element_type: Some("ASSEMBLY".to_string()),
        element_id: Some("E2".to_string()),
        with_thumbnails: true,
    };
    let elements = client
        .list_elements_with("D1", VersionContext::Workspace("W1".into()), &filter)
        .await
        .unwrap();
    assert_eq!(elements[0]["id"], "E2");

    client
        .list_elements("D1", VersionContext::Workspace("W1".into()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("elementType=ASSEMBLY&elementId=E2&withThumbnails=true")
    );
    assert_eq!(requests[1].url.query(), None);
}
