// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export orchestration
//!
//! [`Exporter`] sequences one generation call: ownership boilerplate, unit
//! system, representation context, spatial hierarchy, one pass over every
//! shape, then the relationship aggregation pass and file assembly. All
//! tracking maps live here and are re-created per call, so `generate` is pure
//! up to relationship GlobalId randomness.

use crate::document;
use crate::graph::EntityGraph;
use crate::guid;
use crate::spatial::{self, SpatialHierarchy, StoreyRecord};
use crate::units;
use crate::WriterOptions;
use ifc_draft_model::{
    Drawing, EntityId, GenerationResult, ProjectStructure, Shape, SlabType, WallType,
};
use rustc_hash::FxHashMap;

/// Shapes shorter than this are degenerate and skipped
pub(crate) const MIN_LENGTH: f64 = 0.001;

/// A type object and the elements that share it
pub(crate) struct TypeGroup {
    pub type_entity: EntityId,
    pub elements: Vec<EntityId>,
}

/// One gridline axis awaiting grid assembly
pub(crate) struct GridAxisRecord {
    pub axis: EntityId,
    pub curve: EntityId,
    pub is_u: bool,
}

/// State for one generation call
pub(crate) struct Exporter<'a> {
    pub(crate) graph: EntityGraph,
    pub(crate) options: &'a WriterOptions,
    pub(crate) wall_types: &'a [WallType],
    pub(crate) slab_types: &'a [SlabType],
    pub(crate) drawings: &'a [Drawing],

    pub(crate) owner_history: EntityId,
    pub(crate) context: EntityId,
    pub(crate) hierarchy: SpatialHierarchy,

    // Per-call tracking state, consumed by the aggregation pass
    pub(crate) materials: FxHashMap<String, EntityId>,
    pub(crate) material_groups: Vec<(EntityId, Vec<EntityId>)>,
    pub(crate) material_group_index: FxHashMap<u32, usize>,
    pub(crate) containment: FxHashMap<u32, Vec<EntityId>>,
    pub(crate) wall_type_groups: Vec<TypeGroup>,
    pub(crate) wall_type_index: FxHashMap<String, usize>,
    pub(crate) slab_type_groups: Vec<TypeGroup>,
    pub(crate) slab_type_index: FxHashMap<String, usize>,
    pub(crate) beam_type_groups: Vec<TypeGroup>,
    pub(crate) beam_type_index: FxHashMap<String, usize>,
    pub(crate) property_links: Vec<(EntityId, EntityId)>,
    pub(crate) grid_axes: Vec<GridAxisRecord>,
}

impl<'a> Exporter<'a> {
    /// Run one full generation
    pub(crate) fn generate(
        options: &'a WriterOptions,
        shapes: &[Shape],
        wall_types: &'a [WallType],
        slab_types: &'a [SlabType],
        structure: Option<&ProjectStructure>,
        drawings: &'a [Drawing],
    ) -> GenerationResult {
        let mut graph = EntityGraph::new();

        // Ownership boilerplate, once
        let person = graph.person(Some(&options.author));
        let organization = graph.organization(&options.organization);
        let owning_user = graph.person_and_organization(person, organization);
        let application = graph.application(
            organization,
            &options.application_version,
            &options.application_name,
            &options.application_identifier,
        );
        let owner_history =
            graph.owner_history(owning_user, application, options.creation_epoch());

        // Unit system and representation context, once
        let unit_assignment = units::emit_unit_assignment(&mut graph);
        let wcs_origin = graph.cartesian_point_3d(0.0, 0.0, 0.0);
        let wcs = graph.axis2_placement_3d(wcs_origin, None, None);
        let context = graph.geometric_representation_context("Model", 3, 1.0e-5, wcs);

        let project = graph.project(
            &guid::stable_guid(&options.project_name, "project"),
            owner_history,
            &options.project_name,
            &[context],
            unit_assignment,
        );

        let hierarchy = spatial::emit_hierarchy(&mut graph, owner_history, project, structure);

        let mut exporter = Exporter {
            graph,
            options,
            wall_types,
            slab_types,
            drawings,
            owner_history,
            context,
            hierarchy,
            materials: FxHashMap::default(),
            material_groups: Vec::new(),
            material_group_index: FxHashMap::default(),
            containment: FxHashMap::default(),
            wall_type_groups: Vec::new(),
            wall_type_index: FxHashMap::default(),
            slab_type_groups: Vec::new(),
            slab_type_index: FxHashMap::default(),
            beam_type_groups: Vec::new(),
            beam_type_index: FxHashMap::default(),
            property_links: Vec::new(),
            grid_axes: Vec::new(),
        };

        for shape in shapes {
            exporter.map_shape(shape);
        }
        exporter.finalize_grid();
        exporter.emit_relationships();

        document::assemble(&exporter.graph, options)
    }

    /// Dispatch one shape to its mapping rule
    ///
    /// Kinds with no IFC mapping fall through without error; the generated
    /// file is always structurally complete for the shapes that could be
    /// mapped.
    fn map_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Wall(wall) => self.map_wall(wall),
            Shape::Beam(beam) => self.map_beam(beam),
            Shape::Slab(slab) => self.map_slab(slab),
            Shape::Pile(pile) => self.map_pile(pile),
            Shape::Gridline(gridline) => self.map_gridline(gridline),
            Shape::Level(level) => self.map_level(level),
            Shape::Line(line) => self.map_line(line),
            Shape::Arc(arc) => self.map_arc(arc),
            Shape::Circle(circle) => self.map_circle(circle),
            Shape::Polyline(polyline) => self.map_polyline(polyline),
            Shape::Rectangle(rectangle) => self.map_rectangle(rectangle),
            Shape::Dimension(dimension) => self.map_dimension(dimension),
            Shape::Text(text) => self.map_text(text),
            Shape::SectionCallout(callout) => self.map_section_callout(callout),
            Shape::Hatch(_)
            | Shape::Image(_)
            | Shape::Space(_)
            | Shape::Spline(_)
            | Shape::Point(_)
            | Shape::Ellipse(_) => {
                log::debug!("skipping unmapped shape kind '{}'", shape.kind_name());
            }
        }
    }

    // ========================================================================
    // Shared lookups
    // ========================================================================

    /// Drawing metadata for a shape's owning drawing
    pub(crate) fn drawing(&self, drawing_id: &str) -> Option<&Drawing> {
        self.drawings.iter().find(|d| d.id == drawing_id)
    }

    /// Whether a shape's owning drawing is a plan drawing
    ///
    /// Documents exported without drawing metadata route everything as if
    /// drawn on a plan.
    pub(crate) fn is_plan_drawing(&self, drawing_id: &str) -> bool {
        self.drawing(drawing_id).map(|d| d.is_plan()).unwrap_or(true)
    }

    /// Resolve the storey containing a shape
    ///
    /// A shape on a plan drawing linked to a storey lands in that storey;
    /// everything else lands in the default storey (elevation closest to
    /// zero, or the synthesized ground floor).
    pub(crate) fn resolve_storey(&self, drawing_id: &str) -> StoreyRecord {
        if let Some(drawing) = self.drawing(drawing_id) {
            if drawing.is_plan() {
                if let Some(storey_id) = drawing.storey_id.as_deref() {
                    if let Some(record) = self.hierarchy.storey_by_source_id(storey_id) {
                        return record.clone();
                    }
                }
            }
        }
        self.hierarchy.fallback().clone()
    }

    /// Record an element in its storey's containment accumulator
    pub(crate) fn contain(&mut self, storey: EntityId, element: EntityId) {
        self.containment.entry(storey.0).or_default().push(element);
    }

    /// Material entity for a display name, de-duplicated per call
    pub(crate) fn material_id(&mut self, name: &str) -> EntityId {
        if let Some(id) = self.materials.get(name) {
            return *id;
        }
        let id = self.graph.material(name);
        self.materials.insert(name.to_string(), id);
        id
    }

    /// Register an element for the batched by-material association
    pub(crate) fn associate_material(&mut self, material: EntityId, element: EntityId) {
        match self.material_group_index.get(&material.0) {
            Some(&index) => self.material_groups[index].1.push(element),
            None => {
                self.material_group_index
                    .insert(material.0, self.material_groups.len());
                self.material_groups.push((material, vec![element]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_generation_has_boilerplate() {
        let options = WriterOptions::default();
        let result = Exporter::generate(&options, &[], &[], &[], None, &[]);
        assert!(result.entity_count > 0);
        assert!(result.content.contains("IFCPROJECT"));
        assert!(result.content.contains("IFCSITE"));
        assert!(result.content.contains("IFCBUILDINGSTOREY"));
        assert_eq!(result.file_size, result.content.len());
    }

    #[test]
    fn test_unknown_kind_changes_nothing() {
        use ifc_draft_model::{HatchShape, Point2};
        let options = WriterOptions::default();
        let empty = Exporter::generate(&options, &[], &[], &[], None, &[]);
        let hatch = Shape::Hatch(HatchShape {
            id: "h1".into(),
            drawing_id: "d1".into(),
            points: vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            pattern: None,
        });
        let with_hatch = Exporter::generate(&options, &[hatch], &[], &[], None, &[]);
        assert_eq!(with_hatch.entity_count, empty.entity_count);
    }
}
