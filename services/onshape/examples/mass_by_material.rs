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

use anyhow::{bail, Result};
use onsign_core::{Context, OsEnv};
use onsign_file_read_tokio::TokioFileRead;
use onsign_http_send_reqwest::ReqwestHttpSend;
use onsign_onshape::{Client, Config, VersionContext};

const USAGE: &str = "usage: mass_by_material <documentId> <w|v|m> <wvmId> <elementId>";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [document_id, wvm, wvm_id, element_id] = args.as_slice() else {
        bail!(USAGE);
    };
    let context = match wvm.as_str() {
        "w" => VersionContext::Workspace(wvm_id.clone()),
        "v" => VersionContext::Version(wvm_id.clone()),
        "m" => VersionContext::Microversion(wvm_id.clone()),
        _ => bail!(USAGE),
    };

    // Credentials come from ONSHAPE_* env values or ./creds.json
    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_config(ctx, Config::new()).await?;

    let mass = client
        .mass_by_material(document_id, context, element_id)
        .await?;
    for (material, kg) in &mass.materials {
        println!("{material}: {kg}");
    }
    println!("------------------------------");
    println!("Total mass: {}", mass.total);

    Ok(())
}
