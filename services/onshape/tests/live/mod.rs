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

use std::env;

use log::warn;
use onsign_core::{Context, OsEnv};
use onsign_file_read_tokio::TokioFileRead;
use onsign_http_send_reqwest::ReqwestHttpSend;
use onsign_onshape::{Client, Config};

async fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("ONSIGN_ONSHAPE_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    Some(
        Client::from_config(ctx, Config::new())
            .await
            .expect("live credential must be configured"),
    )
}

#[tokio::test]
async fn test_live_list_documents() -> anyhow::Result<()> {
    let Some(client) = init_live_client().await else {
        warn!("ONSIGN_ONSHAPE_TEST is not set, skipped");
        return Ok(());
    };

    let page = client.list_documents(&[("limit", "1")]).await?;
    assert!(page["items"].is_array());

    Ok(())
}

#[tokio::test]
async fn test_live_wrong_secret_is_rejected() -> anyhow::Result<()> {
    let Some(client) = init_live_client().await else {
        warn!("ONSIGN_ONSHAPE_TEST is not set, skipped");
        return Ok(());
    };

    let cred = client.credential();
    let client = Client::new(
        client.context().clone(),
        onsign_onshape::Credential::new(&cred.base_url, &cred.access_key, "not-the-secret"),
    )?;

    let err = client.list_documents(&[("limit", "1")]).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));

    Ok(())
}
