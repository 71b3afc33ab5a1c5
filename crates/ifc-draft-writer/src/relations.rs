// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relationship aggregation pass
//!
//! Runs once after the shape loop. Containment, type, and material
//! relationships are batched so the file carries the minimal relationship
//! count: one containment per occupied storey, one type relationship per
//! type group, one material association per distinct material. Property
//! relationships stay one-per-set because each set belongs to one element.

use crate::export::Exporter;
use crate::guid;
use ifc_draft_model::EntityId;
use std::mem::take;

impl Exporter<'_> {
    /// Emit all deferred relationships
    pub(crate) fn emit_relationships(&mut self) {
        // Storey containment, in hierarchy order
        let storeys: Vec<EntityId> = self.hierarchy.storeys.iter().map(|s| s.entity).collect();
        for storey in storeys {
            let Some(elements) = self.containment.remove(&storey.0) else {
                continue;
            };
            if elements.is_empty() {
                continue;
            }
            self.graph.rel_contained_in_spatial_structure(
                &guid::random_guid(),
                self.owner_history,
                &elements,
                storey,
            );
        }

        // Type groups (wall, slab, beam), in creation order
        let groups = take(&mut self.wall_type_groups)
            .into_iter()
            .chain(take(&mut self.slab_type_groups))
            .chain(take(&mut self.beam_type_groups));
        for group in groups {
            if group.elements.is_empty() {
                continue;
            }
            self.graph.rel_defines_by_type(
                &guid::random_guid(),
                self.owner_history,
                &group.elements,
                group.type_entity,
            );
        }

        // Direct material associations, grouped by material entity
        for (material, elements) in take(&mut self.material_groups) {
            self.graph.rel_associates_material(
                &guid::random_guid(),
                self.owner_history,
                &elements,
                material,
            );
        }

        // Property and quantity sets, one relationship per set
        for (property_set, element) in take(&mut self.property_links) {
            self.graph.rel_defines_by_properties(
                &guid::random_guid(),
                self.owner_history,
                &[element],
                property_set,
            );
        }
    }
}
