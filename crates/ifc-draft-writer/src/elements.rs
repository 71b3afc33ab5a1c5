// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building element mapping
//!
//! One method per physical element kind. Each emits the element's placement,
//! geometry, the element entity itself, its material association and property
//! sets, and records the element for the later aggregation pass. Degenerate
//! shapes are skipped without touching the graph.

use crate::export::{Exporter, TypeGroup, MIN_LENGTH};
use crate::graph::PropertyValue;
use crate::guid;
use crate::properties::Quantity;
use ifc_draft_model::{BeamShape, EntityId, PileShape, Point2, SlabShape, ViewMode, WallShape};

/// Fallback diameter for piles drawn with a zero radius
const DEFAULT_PILE_DIAMETER: f64 = 600.0;

impl Exporter<'_> {
    /// Local placement under `parent`, optionally rotated about Z
    pub(crate) fn element_placement(
        &mut self,
        parent: EntityId,
        x: f64,
        y: f64,
        z: f64,
        rotation: Option<f64>,
    ) -> EntityId {
        let location = self.graph.cartesian_point_3d(x, y, z);
        let position = match rotation {
            Some(angle) => {
                let axis = self.graph.direction_3d(0.0, 0.0, 1.0);
                let ref_direction = self.graph.direction_3d(angle.cos(), angle.sin(), 0.0);
                self.graph
                    .axis2_placement_3d(location, Some(axis), Some(ref_direction))
            }
            None => self.graph.axis2_placement_3d(location, None, None),
        };
        self.graph.local_placement(Some(parent), position)
    }

    // ========================================================================
    // Walls
    // ========================================================================

    pub(crate) fn map_wall(&mut self, wall: &WallShape) {
        let length = wall.length();
        if length < MIN_LENGTH {
            log::debug!("skipping degenerate wall '{}'", wall.id);
            return;
        }

        let wall_types = self.wall_types;
        let wall_type = wall
            .wall_type_id
            .as_deref()
            .and_then(|id| wall_types.iter().find(|t| t.id == id));
        let name = wall_type.map(|t| t.name.as_str()).unwrap_or("Wall");

        let storey = self.resolve_storey(&wall.drawing_id);
        let angle = wall.start.angle_to(&wall.end);
        let height = self.options.wall_height;
        let placement =
            self.element_placement(storey.placement, wall.start.x, wall.start.y, 0.0, Some(angle));

        // Axis: 2-point polyline along local X
        let axis_start = self.graph.cartesian_point_2d(0.0, 0.0);
        let axis_end = self.graph.cartesian_point_2d(length, 0.0);
        let axis_curve = self.graph.polyline(&[axis_start, axis_end]);
        let axis_rep =
            self.graph
                .shape_representation(self.context, "Axis", "Curve2D", &[axis_curve]);

        // Body: centered rectangle spanning [0,length] x [-t/2,t/2], extruded up
        let profile_center = self.graph.cartesian_point_2d(length / 2.0, 0.0);
        let profile_position = self.graph.axis2_placement_2d(profile_center, None);
        let profile =
            self.graph
                .rectangle_profile(None, profile_position, length, wall.thickness);
        let solid_origin = self.graph.cartesian_point_3d(0.0, 0.0, 0.0);
        let solid_position = self.graph.axis2_placement_3d(solid_origin, None, None);
        let up = self.graph.direction_3d(0.0, 0.0, 1.0);
        let solid = self.graph.extruded_area_solid(profile, solid_position, up, height);
        let body_rep = self
            .graph
            .shape_representation(self.context, "Body", "SweptSolid", &[solid]);

        let shape_def = self.graph.product_definition_shape(&[axis_rep, body_rep]);
        let element = self.graph.wall(
            &guid::stable_guid(&wall.id, "element"),
            self.owner_history,
            name,
            placement,
            shape_def,
        );

        // Single-layer material with justification offset
        let material_name = wall
            .material
            .as_deref()
            .or_else(|| wall_type.and_then(|t| t.material.as_deref()))
            .unwrap_or("Concrete")
            .to_string();
        let material = self.material_id(&material_name);
        let layer = self.graph.material_layer(material, wall.thickness);
        let layer_set = self.graph.material_layer_set(&[layer], &material_name);
        let offset = justification_offset(wall);
        let usage = self.graph.material_layer_set_usage(layer_set, offset);
        self.graph.rel_associates_material(
            &guid::random_guid(),
            self.owner_history,
            &[element],
            usage,
        );

        self.emit_property_set(
            &wall.id,
            "pset",
            "Pset_WallCommon",
            &[
                ("Reference", PropertyValue::Label(name.to_string())),
                ("LoadBearing", PropertyValue::Boolean(true)),
                ("IsExternal", PropertyValue::Boolean(false)),
            ],
            element,
        );
        self.emit_quantity_set(
            &wall.id,
            "qto",
            "Qto_WallBaseQuantities",
            &[
                Quantity::Length("Length", length),
                Quantity::Length("Width", wall.thickness),
                Quantity::Length("Height", height),
                Quantity::Volume("GrossVolume", length * wall.thickness * height / 1.0e9),
                Quantity::Area("GrossSideArea", length * height / 1.0e6),
            ],
            element,
        );

        if let Some(wall_type) = wall_type {
            self.record_wall_type(wall_type, element);
        }
        self.contain(storey.entity, element);
    }

    fn record_wall_type(&mut self, wall_type: &ifc_draft_model::WallType, element: EntityId) {
        if let Some(&index) = self.wall_type_index.get(&wall_type.id) {
            self.wall_type_groups[index].elements.push(element);
            return;
        }
        let type_entity = self.graph.wall_type(
            &guid::stable_guid(&wall_type.id, "type"),
            self.owner_history,
            &wall_type.name,
        );
        self.wall_type_index
            .insert(wall_type.id.clone(), self.wall_type_groups.len());
        self.wall_type_groups.push(TypeGroup {
            type_entity,
            elements: vec![element],
        });
    }

    // ========================================================================
    // Beams and columns
    // ========================================================================

    pub(crate) fn map_beam(&mut self, beam: &BeamShape) {
        let length = beam.length();
        if length < MIN_LENGTH {
            log::debug!("skipping degenerate beam '{}'", beam.id);
            return;
        }

        let storey = self.resolve_storey(&beam.drawing_id);
        let angle = beam.start.angle_to(&beam.end);
        let depth = beam.section_depth();
        let name = beam
            .preset_name
            .as_deref()
            .unwrap_or(&beam.profile_type)
            .to_string();

        // Local Z points along the beam axis so the solid extrudes over the
        // full length
        let location = self
            .graph
            .cartesian_point_3d(beam.start.x, beam.start.y, 0.0);
        let axis = self.graph.direction_3d(angle.cos(), angle.sin(), 0.0);
        let ref_direction = self.graph.direction_3d(0.0, 0.0, 1.0);
        let position =
            self.graph
                .axis2_placement_3d(location, Some(axis), Some(ref_direction));
        let placement = self.graph.local_placement(Some(storey.placement), position);

        let profile_origin = self.graph.cartesian_point_2d(0.0, 0.0);
        let profile_position = self.graph.axis2_placement_2d(profile_origin, None);
        let profile =
            self.graph
                .rectangle_profile(Some(&name), profile_position, beam.flange_width, depth);
        let solid_origin = self.graph.cartesian_point_3d(0.0, 0.0, 0.0);
        let solid_position = self.graph.axis2_placement_3d(solid_origin, None, None);
        let direction = self.graph.direction_3d(0.0, 0.0, 1.0);
        let solid = self
            .graph
            .extruded_area_solid(profile, solid_position, direction, length);
        let body_rep = self
            .graph
            .shape_representation(self.context, "Body", "SweptSolid", &[solid]);
        let shape_def = self.graph.product_definition_shape(&[body_rep]);

        // Beams drawn in section view represent vertical members
        let element_guid = guid::stable_guid(&beam.id, "element");
        let element = match beam.view_mode {
            ViewMode::Section => {
                self.graph
                    .column(&element_guid, self.owner_history, &name, placement, shape_def)
            }
            ViewMode::Plan => {
                self.graph
                    .beam(&element_guid, self.owner_history, &name, placement, shape_def)
            }
        };

        let material_name = beam.material.as_deref().unwrap_or("Steel").to_string();
        let material = self.material_id(&material_name);
        self.associate_material(material, element);

        self.emit_property_set(
            &beam.id,
            "pset",
            "Pset_BeamCommon",
            &[
                ("Reference", PropertyValue::Label(name.clone())),
                ("LoadBearing", PropertyValue::Boolean(true)),
                ("IsExternal", PropertyValue::Boolean(false)),
            ],
            element,
        );
        let mut dimensions = vec![
            (
                "ProfileType",
                PropertyValue::Label(beam.profile_type.clone()),
            ),
            ("FlangeWidth", PropertyValue::Real(beam.flange_width)),
            ("Depth", PropertyValue::Real(depth)),
            ("Material", PropertyValue::Label(material_name)),
        ];
        if let Some(preset_name) = &beam.preset_name {
            dimensions.push(("PresetName", PropertyValue::Label(preset_name.clone())));
        }
        self.emit_property_set(&beam.id, "dims", "Pset_BeamDimensions", &dimensions, element);

        self.record_beam_type(beam, &name, element);
        self.contain(storey.entity, element);
    }

    /// Beams sharing a profile share one type object
    fn record_beam_type(&mut self, beam: &BeamShape, name: &str, element: EntityId) {
        let key = beam.profile_key().to_string();
        if let Some(&index) = self.beam_type_index.get(&key) {
            self.beam_type_groups[index].elements.push(element);
            return;
        }
        let type_entity = self.graph.beam_type(
            &guid::stable_guid(&key, "beam-type"),
            self.owner_history,
            name,
        );
        self.beam_type_index.insert(key, self.beam_type_groups.len());
        self.beam_type_groups.push(TypeGroup {
            type_entity,
            elements: vec![element],
        });
    }

    // ========================================================================
    // Slabs
    // ========================================================================

    pub(crate) fn map_slab(&mut self, slab: &SlabShape) {
        if slab.points.len() < 3 {
            log::debug!("skipping degenerate slab '{}'", slab.id);
            return;
        }

        let storey = self.resolve_storey(&slab.drawing_id);
        let placement = self.element_placement(storey.placement, 0.0, 0.0, slab.elevation, None);

        // Closed boundary loop; the first point is reused to close the curve
        let mut boundary = Vec::with_capacity(slab.points.len() + 1);
        for point in &slab.points {
            boundary.push(self.graph.cartesian_point_2d(point.x, point.y));
        }
        boundary.push(boundary[0]);
        let outer_curve = self.graph.polyline(&boundary);
        let profile = self.graph.arbitrary_closed_profile(outer_curve);

        let solid_origin = self.graph.cartesian_point_3d(0.0, 0.0, 0.0);
        let solid_position = self.graph.axis2_placement_3d(solid_origin, None, None);
        let up = self.graph.direction_3d(0.0, 0.0, 1.0);
        let solid = self
            .graph
            .extruded_area_solid(profile, solid_position, up, slab.thickness);
        let body_rep = self
            .graph
            .shape_representation(self.context, "Body", "SweptSolid", &[solid]);
        let shape_def = self.graph.product_definition_shape(&[body_rep]);

        let element = self.graph.slab(
            &guid::stable_guid(&slab.id, "element"),
            self.owner_history,
            "Slab",
            placement,
            shape_def,
        );

        let material_name = slab.material.as_deref().unwrap_or("Concrete").to_string();
        let material = self.material_id(&material_name);
        let layer = self.graph.material_layer(material, slab.thickness);
        let layer_set = self.graph.material_layer_set(&[layer], &material_name);
        let usage = self.graph.material_layer_set_usage(layer_set, 0.0);
        self.graph.rel_associates_material(
            &guid::random_guid(),
            self.owner_history,
            &[element],
            usage,
        );

        let area = polygon_area(&slab.points) / 1.0e6;
        let volume = area * slab.thickness / 1.0e3;
        self.emit_property_set(
            &slab.id,
            "pset",
            "Pset_SlabCommon",
            &[
                ("Reference", PropertyValue::Label("Slab".into())),
                ("LoadBearing", PropertyValue::Boolean(true)),
                ("IsExternal", PropertyValue::Boolean(false)),
            ],
            element,
        );
        self.emit_quantity_set(
            &slab.id,
            "qto",
            "Qto_SlabBaseQuantities",
            &[
                Quantity::Length("Width", slab.thickness),
                Quantity::Area("GrossArea", area),
                Quantity::Volume("GrossVolume", volume),
            ],
            element,
        );

        let slab_types = self.slab_types;
        if let Some(slab_type) = slab_types
            .iter()
            .find(|t| t.matches(slab.thickness, slab.material.as_deref()))
        {
            self.record_slab_type(slab_type, element);
        }
        self.contain(storey.entity, element);
    }

    fn record_slab_type(&mut self, slab_type: &ifc_draft_model::SlabType, element: EntityId) {
        if let Some(&index) = self.slab_type_index.get(&slab_type.id) {
            self.slab_type_groups[index].elements.push(element);
            return;
        }
        let type_entity = self.graph.slab_type(
            &guid::stable_guid(&slab_type.id, "type"),
            self.owner_history,
            &slab_type.name,
        );
        self.slab_type_index
            .insert(slab_type.id.clone(), self.slab_type_groups.len());
        self.slab_type_groups.push(TypeGroup {
            type_entity,
            elements: vec![element],
        });
    }

    // ========================================================================
    // Piles
    // ========================================================================

    pub(crate) fn map_pile(&mut self, pile: &PileShape) {
        let diameter = if pile.diameter > 0.0 {
            pile.diameter
        } else {
            DEFAULT_PILE_DIAMETER
        };
        let radius = diameter / 2.0;
        let depth = self.options.pile_depth;

        let storey = self.resolve_storey(&pile.drawing_id);
        let placement =
            self.element_placement(storey.placement, pile.position.x, pile.position.y, 0.0, None);

        let profile_origin = self.graph.cartesian_point_2d(0.0, 0.0);
        let profile_position = self.graph.axis2_placement_2d(profile_origin, None);
        let profile = self.graph.circle_profile(None, profile_position, radius);
        let solid_origin = self.graph.cartesian_point_3d(0.0, 0.0, 0.0);
        let solid_position = self.graph.axis2_placement_3d(solid_origin, None, None);
        let down = self.graph.direction_3d(0.0, 0.0, -1.0);
        let solid = self
            .graph
            .extruded_area_solid(profile, solid_position, down, depth);
        let body_rep = self
            .graph
            .shape_representation(self.context, "Body", "SweptSolid", &[solid]);
        let shape_def = self.graph.product_definition_shape(&[body_rep]);

        let name = pile.label.as_deref().unwrap_or("Pile").to_string();
        let element = self.graph.pile(
            &guid::stable_guid(&pile.id, "element"),
            self.owner_history,
            &name,
            placement,
            shape_def,
        );

        // Piles are concrete by convention
        let material = self.material_id("Concrete");
        self.associate_material(material, element);

        self.emit_property_set(
            &pile.id,
            "pset",
            "Pset_PileCommon",
            &[("Reference", PropertyValue::Label(name))],
            element,
        );
        self.emit_property_set(
            &pile.id,
            "dims",
            "Pset_PileDimensions",
            &[
                ("Diameter", PropertyValue::Real(diameter)),
                ("Length", PropertyValue::Real(depth)),
                (
                    "CrossSectionArea",
                    PropertyValue::Real(std::f64::consts::PI * radius * radius / 1.0e6),
                ),
            ],
            element,
        );

        self.contain(storey.entity, element);
    }
}

/// Wall reference-line offset from the layer set origin
fn justification_offset(wall: &WallShape) -> f64 {
    use ifc_draft_model::WallJustification;
    match wall.justification {
        WallJustification::Center => -wall.thickness / 2.0,
        WallJustification::Left => -wall.thickness,
        WallJustification::Right => 0.0,
    }
}

/// Unsigned polygon area via the shoelace formula, square millimeters
pub(crate) fn polygon_area(points: &[Point2]) -> f64 {
    let mut doubled = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        doubled += a.x * b.y - b.x * a.y;
    }
    (doubled / 2.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polygon_area_square() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1000.0, 0.0),
            Point2::new(1000.0, 1000.0),
            Point2::new(0.0, 1000.0),
        ];
        assert_relative_eq!(polygon_area(&points), 1_000_000.0);
    }

    #[test]
    fn test_polygon_area_winding_independent() {
        let clockwise = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1000.0),
            Point2::new(1000.0, 1000.0),
            Point2::new(1000.0, 0.0),
        ];
        assert_relative_eq!(polygon_area(&clockwise), 1_000_000.0);
    }

    #[test]
    fn test_justification_offsets() {
        use ifc_draft_model::WallJustification;
        let mut wall = WallShape {
            id: "w".into(),
            drawing_id: "d".into(),
            start: Point2::new(0.0, 0.0),
            end: Point2::new(1000.0, 0.0),
            thickness: 200.0,
            justification: WallJustification::Center,
            wall_type_id: None,
            material: None,
        };
        assert_eq!(justification_offset(&wall), -100.0);
        wall.justification = WallJustification::Left;
        assert_eq!(justification_offset(&wall), -200.0);
        wall.justification = WallJustification::Right;
        assert_eq!(justification_offset(&wall), 0.0);
    }
}
