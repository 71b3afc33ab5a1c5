// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial structure emission
//!
//! Builds the site → building → storey hierarchy once per generation call,
//! synthesizing a default structure when the project tree is empty. Every
//! physical element later resolves to one of the storeys created here.

use crate::graph::EntityGraph;
use crate::guid;
use ifc_draft_model::{EntityId, ProjectStructure};

/// One emitted building storey
#[derive(Clone, Debug)]
pub(crate) struct StoreyRecord {
    /// Stable id from the project structure, `None` for the synthesized
    /// ground floor
    pub source_id: Option<String>,
    pub entity: EntityId,
    pub placement: EntityId,
    pub elevation: f64,
}

/// The emitted spatial hierarchy
#[derive(Debug)]
pub(crate) struct SpatialHierarchy {
    pub storeys: Vec<StoreyRecord>,
    /// Index into `storeys` used when a shape cannot be routed by drawing
    pub default_storey: usize,
}

impl SpatialHierarchy {
    /// Find a storey by its project-structure id
    pub fn storey_by_source_id(&self, id: &str) -> Option<&StoreyRecord> {
        self.storeys
            .iter()
            .find(|s| s.source_id.as_deref() == Some(id))
    }

    /// The fallback storey record
    pub fn fallback(&self) -> &StoreyRecord {
        &self.storeys[self.default_storey]
    }
}

/// Emit the spatial hierarchy and its aggregation relationships
///
/// The project entity must already exist; this emits the site, all buildings
/// and storeys, and the `IFCRELAGGREGATES` chain binding them together.
pub(crate) fn emit_hierarchy(
    graph: &mut EntityGraph,
    owner_history: EntityId,
    project: EntityId,
    structure: Option<&ProjectStructure>,
) -> SpatialHierarchy {
    let synthesized;
    let structure = match structure {
        Some(s) if !s.is_empty() => s,
        _ => {
            synthesized = default_structure();
            &synthesized
        }
    };

    let site_name = structure.site_name.as_deref().unwrap_or("Default Site");
    let site_placement = origin_placement(graph, None);
    let site = graph.site(
        &guid::stable_guid("project-site", site_name),
        owner_history,
        site_name,
        site_placement,
    );
    graph.rel_aggregates(&guid::random_guid(), owner_history, project, &[site]);

    let mut storeys = Vec::new();
    let mut buildings = Vec::new();
    let mut building_placements = Vec::new();
    for building in &structure.buildings {
        let building_placement = origin_placement(graph, Some(site_placement));
        building_placements.push(building_placement);
        let building_entity = graph.building(
            &guid::stable_guid(&building.id, "building"),
            owner_history,
            &building.name,
            building_placement,
        );
        buildings.push(building_entity);

        let mut building_storeys = Vec::new();
        for storey in &building.storeys {
            let placement = storey_placement(graph, building_placement, storey.elevation);
            let entity = graph.building_storey(
                &guid::stable_guid(&storey.id, "storey"),
                owner_history,
                &storey.name,
                placement,
                storey.elevation,
            );
            building_storeys.push(entity);
            storeys.push(StoreyRecord {
                source_id: Some(storey.id.clone()),
                entity,
                placement,
                elevation: storey.elevation,
            });
        }
        if !building_storeys.is_empty() {
            graph.rel_aggregates(
                &guid::random_guid(),
                owner_history,
                building_entity,
                &building_storeys,
            );
        }
    }
    graph.rel_aggregates(&guid::random_guid(), owner_history, site, &buildings);

    // A structure with buildings but no storeys still needs one container
    if storeys.is_empty() {
        let building = buildings[0];
        let placement = storey_placement(graph, building_placements[0], 0.0);
        let entity = graph.building_storey(
            &guid::stable_guid("default-storey", "storey"),
            owner_history,
            "Ground Floor",
            placement,
            0.0,
        );
        graph.rel_aggregates(&guid::random_guid(), owner_history, building, &[entity]);
        storeys.push(StoreyRecord {
            source_id: None,
            entity,
            placement,
            elevation: 0.0,
        });
    }

    // Default container is the storey closest to elevation zero
    let default_storey = storeys
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.elevation
                .abs()
                .partial_cmp(&b.elevation.abs())
                .expect("storey elevations are finite")
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    SpatialHierarchy {
        storeys,
        default_storey,
    }
}

/// The synthesized fallback structure for drawings without a project tree
fn default_structure() -> ProjectStructure {
    use ifc_draft_model::{Building, Storey};
    ProjectStructure {
        site_name: Some("Default Site".into()),
        buildings: vec![Building {
            id: "default-building".into(),
            name: "Default Building".into(),
            storeys: vec![Storey {
                id: "default-storey".into(),
                name: "Ground Floor".into(),
                elevation: 0.0,
            }],
        }],
    }
}

/// Local placement at the world origin
fn origin_placement(graph: &mut EntityGraph, relative_to: Option<EntityId>) -> EntityId {
    let origin = graph.cartesian_point_3d(0.0, 0.0, 0.0);
    let axis = graph.axis2_placement_3d(origin, None, None);
    graph.local_placement(relative_to, axis)
}

/// Local placement at a storey elevation
fn storey_placement(graph: &mut EntityGraph, relative_to: EntityId, elevation: f64) -> EntityId {
    let origin = graph.cartesian_point_3d(0.0, 0.0, elevation);
    let axis = graph.axis2_placement_3d(origin, None, None);
    graph.local_placement(Some(relative_to), axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_draft_model::{Building, Storey};

    fn graph_with_project() -> (EntityGraph, EntityId, EntityId) {
        let mut graph = EntityGraph::new();
        let person = graph.person(None);
        let org = graph.organization("Test");
        let pao = graph.person_and_organization(person, org);
        let app = graph.application(org, "1.0", "Test", "test");
        let oh = graph.owner_history(pao, app, 0);
        let units = crate::units::emit_unit_assignment(&mut graph);
        let project = graph.project("0000000000000000000000", oh, "Project", &[], units);
        (graph, oh, project)
    }

    #[test]
    fn test_synthesized_hierarchy() {
        let (mut graph, oh, project) = graph_with_project();
        let hierarchy = emit_hierarchy(&mut graph, oh, project, None);

        assert_eq!(hierarchy.storeys.len(), 1);
        assert_eq!(hierarchy.fallback().elevation, 0.0);
        assert!(hierarchy.fallback().source_id.is_some());

        let names: Vec<&str> = graph.entities().iter().map(|e| e.type_name).collect();
        assert!(names.contains(&"IFCSITE"));
        assert!(names.contains(&"IFCBUILDING"));
        assert!(names.contains(&"IFCBUILDINGSTOREY"));
    }

    #[test]
    fn test_default_storey_closest_to_zero() {
        let (mut graph, oh, project) = graph_with_project();
        let structure = ProjectStructure {
            site_name: None,
            buildings: vec![Building {
                id: "b1".into(),
                name: "Main".into(),
                storeys: vec![
                    Storey {
                        id: "s-1".into(),
                        name: "Basement".into(),
                        elevation: -3000.0,
                    },
                    Storey {
                        id: "s0".into(),
                        name: "Ground".into(),
                        elevation: 0.0,
                    },
                    Storey {
                        id: "s1".into(),
                        name: "First".into(),
                        elevation: 3000.0,
                    },
                ],
            }],
        };
        let hierarchy = emit_hierarchy(&mut graph, oh, project, Some(&structure));
        assert_eq!(hierarchy.storeys.len(), 3);
        assert_eq!(hierarchy.fallback().source_id.as_deref(), Some("s0"));
        assert!(hierarchy.storey_by_source_id("s1").is_some());
        assert!(hierarchy.storey_by_source_id("missing").is_none());
    }

    #[test]
    fn test_storeys_are_referenced_backwards() {
        let (mut graph, oh, project) = graph_with_project();
        let hierarchy = emit_hierarchy(&mut graph, oh, project, None);
        for storey in &hierarchy.storeys {
            assert!(storey.placement.0 < storey.entity.0);
        }
    }
}
