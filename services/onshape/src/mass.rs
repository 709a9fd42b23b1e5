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

//! Total mass of a part studio, grouped by material.

use std::collections::BTreeMap;

use log::{debug, warn};
use onsign_core::Result;

use crate::model::{MassProperties, Part};
use crate::{Client, VersionContext};

/// Mass of a part studio per material id, in kilograms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassByMaterial {
    /// Summed nominal mass keyed by material id. Every material that is
    /// assigned to a part is listed, even when none of its bodies has mass.
    pub materials: BTreeMap<String, f64>,
    /// Sum over all materials.
    pub total: f64,
}

/// Join `parts` with `mass` on the part id and sum per material.
///
/// Parts without a material are skipped. Bodies without mass keep their
/// material listed but add nothing.
pub fn tally(parts: &[Part], mass: &MassProperties) -> MassByMaterial {
    let mut out = MassByMaterial::default();

    for part in parts {
        let Some(material) = &part.material else {
            debug!("part {} has no material, skipping", part.part_id);
            continue;
        };
        let sum = out.materials.entry(material.id.clone()).or_insert(0.0);

        match mass.bodies.get(&part.part_id) {
            Some(body) => {
                if let Some(m) = body.nominal_mass() {
                    *sum += m;
                    out.total += m;
                }
            }
            None => warn!("part {} has no mass properties", part.part_id),
        }
    }

    out
}

impl Client {
    /// Tally the mass of every material used in a part studio.
    ///
    /// Loads the parts first and the mass properties second, then joins them
    /// with [`tally`].
    pub async fn mass_by_material(
        &self,
        document_id: &str,
        context: VersionContext,
        element_id: &str,
    ) -> Result<MassByMaterial> {
        let parts = self
            .get_parts(document_id, context.clone(), element_id)
            .await?;
        let mass = self
            .get_mass_properties(document_id, context, element_id)
            .await?;

        Ok(tally(&parts, &mass))
    }
}
