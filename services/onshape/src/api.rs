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

//! Convenience wrappers for commonly used endpoints.

use std::path::Path;

use bytes::Bytes;
use http::header::ACCEPT;
use http::HeaderValue;
use log::debug;
use onsign_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::constants::ONSHAPE_OCTET_STREAM;
use crate::model::{MassProperties, Part};
use crate::path::{ApiRequest, Upload};
use crate::{Client, VersionContext};

/// Owner of a newly created document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerType {
    /// Owned by the calling user.
    #[default]
    User,
    /// Owned by a company.
    Company,
    /// Owned by a team.
    Team,
}

impl OwnerType {
    fn code(self) -> u8 {
        match self {
            OwnerType::User => 0,
            OwnerType::Company => 1,
            OwnerType::Team => 2,
        }
    }
}

/// Filters for [`Client::list_elements_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFilter {
    /// Only elements of this type, e.g. `PARTSTUDIO` or `ASSEMBLY`.
    pub element_type: Option<String>,
    /// Only the element with this id.
    pub element_id: Option<String>,
    /// Include thumbnail info.
    pub with_thumbnails: bool,
}

/// Options for [`Client::get_assembly_definition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyDefinitionOptions {
    /// Include mate connectors, only honoured together with mate features.
    pub include_mate_connectors: bool,
    /// Include mate features.
    pub include_mate_features: bool,
    /// Include surfaces, sketches and other non-solid occurrences.
    pub include_non_solids: bool,
    /// Document that links to the assembly, only allowed for versions.
    pub link_document_id: Option<String>,
}

/// Options for [`Client::get_assembly_bom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomOptions {
    pub indented: bool,
    pub multi_level: bool,
    /// Create the BOM when the assembly has none yet.
    pub generate_if_absent: bool,
}

impl Default for BomOptions {
    fn default() -> Self {
        Self {
            indented: false,
            multi_level: false,
            generate_if_absent: true,
        }
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        Error::unexpected("failed to decode onshape response").with_source(e)
    })
}

/// Address an element, e.g. a part studio or an assembly.
fn element_request(
    resource: &str,
    document_id: &str,
    context: VersionContext,
    element_id: &str,
) -> ApiRequest {
    ApiRequest::new(resource)
        .document(document_id)
        .context(context)
        .element(element_id)
}

impl Client {
    /// GET and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<T> {
        decode(&self.get(req).await?)
    }

    /// POST and decode the JSON body.
    pub async fn post_json<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<T> {
        decode(&self.post(req).await?)
    }

    /// List the documents visible to the caller.
    ///
    /// `query` is passed through, e.g. `q`, `filter`, `offset` and `limit`.
    pub async fn list_documents(&self, query: &[(&str, &str)]) -> Result<Value> {
        let mut req = ApiRequest::with_path("/api/documents");
        for (k, v) in query {
            req = req.query(*k, *v);
        }

        self.get_json(&req).await
    }

    /// Get a document.
    pub async fn get_document(&self, document_id: &str) -> Result<Value> {
        self.get_json(&ApiRequest::with_path(format!(
            "/api/documents/{document_id}"
        )))
        .await
    }

    /// Create a new document.
    pub async fn create_document(
        &self,
        name: &str,
        owner_type: OwnerType,
        public: bool,
    ) -> Result<Value> {
        let req = ApiRequest::with_path("/api/documents").body(json!({
            "name": name,
            "ownerType": owner_type.code(),
            "isPublic": public,
        }));

        self.post_json(&req).await
    }

    /// Rename a document.
    pub async fn rename_document(&self, document_id: &str, name: &str) -> Result<Value> {
        let req = ApiRequest::with_path(format!("/api/documents/{document_id}"))
            .body(json!({ "name": name }));

        self.post_json(&req).await
    }

    /// Delete a document.
    pub async fn delete_document(&self, document_id: &str) -> Result<()> {
        self.delete(&ApiRequest::with_path(format!(
            "/api/documents/{document_id}"
        )))
        .await?;

        Ok(())
    }

    /// List the elements of a document.
    pub async fn list_elements(&self, document_id: &str, context: VersionContext) -> Result<Value> {
        self.list_elements_with(document_id, context, &ElementFilter::default())
            .await
    }

    /// List the elements of a document matching `filter`.
    pub async fn list_elements_with(
        &self,
        document_id: &str,
        context: VersionContext,
        filter: &ElementFilter,
    ) -> Result<Value> {
        let mut req = ApiRequest::new("documents")
            .document(document_id)
            .context(context)
            .subresource("elements");
        if let Some(element_type) = &filter.element_type {
            req = req.query("elementType", element_type);
        }
        if let Some(element_id) = &filter.element_id {
            req = req.query("elementId", element_id);
        }
        if filter.with_thumbnails {
            req = req.query("withThumbnails", "true");
        }

        self.get_json(&req).await
    }

    /// List the workspaces of a document.
    pub async fn get_workspaces(&self, document_id: &str, no_read_only: bool) -> Result<Value> {
        let req = ApiRequest::new("documents")
            .document(document_id)
            .subresource("workspaces")
            .query("noreadonly", no_read_only.to_string());

        self.get_json(&req).await
    }

    /// List the teams of the calling user.
    pub async fn list_teams(&self) -> Result<Value> {
        self.get_json(&ApiRequest::with_path("/api/teams")).await
    }

    /// Create a part studio in a workspace.
    pub async fn create_part_studio(
        &self,
        document_id: &str,
        workspace_id: &str,
        name: &str,
    ) -> Result<Value> {
        let req = ApiRequest::new("partstudios")
            .document(document_id)
            .workspace(workspace_id)
            .body(json!({ "name": name }));

        self.post_json(&req).await
    }

    /// Create an assembly in a workspace.
    pub async fn create_assembly(
        &self,
        document_id: &str,
        workspace_id: &str,
        name: &str,
    ) -> Result<Value> {
        let req = ApiRequest::new("assemblies")
            .document(document_id)
            .workspace(workspace_id)
            .body(json!({ "name": name }));

        self.post_json(&req).await
    }

    /// Get the definition of an assembly.
    pub async fn get_assembly_definition(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
        options: &AssemblyDefinitionOptions,
    ) -> Result<Value> {
        let mut req = element_request("assemblies", document_id, context, element_id)
            .query(
                "includeMateConnectors",
                options.include_mate_connectors.to_string(),
            )
            .query("includeMateFeatures", options.include_mate_features.to_string())
            .query("includeNonSolids", options.include_non_solids.to_string());
        if let Some(link) = &options.link_document_id {
            req = req.query("linkDocumentId", link);
        }

        self.get_json(&req).await
    }

    /// Get the bill of materials of an assembly.
    pub async fn get_assembly_bom(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
        options: &BomOptions,
    ) -> Result<Value> {
        let req = element_request("assemblies", document_id, context, element_id)
            .subresource("bom")
            .query("indented", options.indented.to_string())
            .query("generateIfAbsent", options.generate_if_absent.to_string())
            .query("multiLevel", options.multi_level.to_string());

        self.get_json(&req).await
    }

    /// Get the feature list of a part studio.
    pub async fn get_features(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
    ) -> Result<Value> {
        let req =
            element_request("partstudios", document_id, context, element_id).subresource("features");

        self.get_json(&req).await
    }

    /// Get the parts of a part studio.
    pub async fn get_parts(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
    ) -> Result<Vec<Part>> {
        self.get_json(&element_request("parts", document_id, context, element_id))
            .await
    }

    /// Get the mass properties of every part in a part studio.
    pub async fn get_mass_properties(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
    ) -> Result<MassProperties> {
        let req = element_request("partstudios", document_id, context, element_id)
            .subresource("massproperties")
            .query("massAsGroup", "false");

        self.get_json(&req).await
    }

    /// Get the tessellated edges of every part in a part studio.
    pub async fn get_tessellated_edges(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
    ) -> Result<Value> {
        let req = element_request("partstudios", document_id, context, element_id)
            .subresource("tessellatededges");

        self.get_json(&req).await
    }

    /// Export a part studio as STL.
    ///
    /// The export is usually answered with a redirect to a download host,
    /// which is followed.
    pub async fn part_studio_stl(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
    ) -> Result<Bytes> {
        let req = element_request("partstudios", document_id, context, element_id)
            .subresource("stl")
            .header(ACCEPT, HeaderValue::from_static(ONSHAPE_OCTET_STREAM));

        let body = self.get(&req).await?;
        debug!("downloaded {} bytes of stl", body.len());
        Ok(body)
    }

    /// Upload a local file as a new blob element.
    pub async fn upload_blob_element(
        &self,
        document_id: &str,
        workspace_id: &str,
        file_path: impl AsRef<Path>,
        mime_type: &str,
    ) -> Result<Value> {
        let req = ApiRequest::new("blobelements")
            .document(document_id)
            .workspace(workspace_id)
            .upload(Upload::new(file_path.as_ref(), mime_type));

        decode(&self.upload(&req).await?)
    }

    /// Delete an element of a workspace.
    pub async fn delete_element(
        &self,
        document_id: &str,
        workspace_id: &str,
        element_id: &str,
    ) -> Result<()> {
        let req = ApiRequest::new("elements")
            .document(document_id)
            .workspace(workspace_id)
            .element(element_id);
        self.delete(&req).await?;

        Ok(())
    }

    /// List every endpoint of the API.
    pub async fn get_endpoints(&self) -> Result<Value> {
        self.get_json(&ApiRequest::with_path("/api/endpoints"))
            .await
    }

    /// Follow the `next` link of a paged response.
    pub async fn next_page(&self, url: &str) -> Result<Value> {
        self.get_json(&ApiRequest::from_url(url)?).await
    }

    /// Follow a `next` link, overriding its `offset` and `limit` when given.
    pub async fn next_page_with(
        &self,
        url: &str,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Value> {
        let mut req = ApiRequest::from_url(url)?;
        if let Some(offset) = offset {
            req = req.set_query("offset", offset.to_string());
        }
        if let Some(limit) = limit {
            req = req.set_query("limit", limit.to_string());
        }

        self.get_json(&req).await
    }
}
