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

//! Typed views of the few response bodies the client interprets itself.

use std::collections::HashMap;

use serde::Deserialize;

/// A part of a part studio.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Id of the part, also the key of its body in [`MassProperties`].
    pub part_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Assigned material, absent for parts without one.
    #[serde(default)]
    pub material: Option<Material>,
}

/// Material assigned to a part.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Material id, e.g. `Steel`.
    pub id: String,
    /// Human readable name.
    #[serde(default)]
    pub display_name: String,
}

/// Mass properties of a part studio, computed per part.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassProperties {
    /// Bodies keyed by part id.
    #[serde(default)]
    pub bodies: HashMap<String, MassBody>,
}

/// Mass properties of one body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassBody {
    /// Whether the body has a material with a density.
    #[serde(default)]
    pub has_mass: bool,
    /// `[nominal, min, max]` in kilograms.
    #[serde(default)]
    pub mass: Vec<f64>,
    /// `[nominal, min, max]` in cubic meters.
    #[serde(default)]
    pub volume: Vec<f64>,
}

impl MassBody {
    /// The nominal mass, `None` when the body has no mass.
    pub fn nominal_mass(&self) -> Option<f64> {
        if !self.has_mass {
            return None;
        }
        self.mass.first().copied()
    }
}
