// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gridline, level, and annotation mapping
//!
//! Gridlines and levels are routed by their owning drawing: copies living in
//! section drawings are derived data and are not re-exported. The simple
//! annotation kinds each become one `IFCANNOTATION` with a 2D curve
//! representation and a property set describing the source shape.

use crate::export::{Exporter, GridAxisRecord};
use crate::graph::PropertyValue;
use crate::guid;
use crate::spatial::StoreyRecord;
use ifc_draft_model::{
    ArcShape, CircleShape, DimensionShape, EntityId, GridlineShape, LevelShape, LineShape,
    PolylineShape, RectangleShape, SectionCalloutShape, TextShape,
};

impl Exporter<'_> {
    /// Wrap a 2D curve into an annotation entity contained in `storey`
    fn emit_annotation(
        &mut self,
        shape_id: &str,
        name: &str,
        storey: &StoreyRecord,
        curve: EntityId,
    ) -> EntityId {
        let representation =
            self.graph
                .shape_representation(self.context, "Annotation", "Curve2D", &[curve]);
        let shape_def = self.graph.product_definition_shape(&[representation]);
        let placement = self.element_placement(storey.placement, 0.0, 0.0, 0.0, None);
        let element = self.graph.annotation(
            &guid::stable_guid(shape_id, "element"),
            self.owner_history,
            name,
            placement,
            shape_def,
        );
        self.contain(storey.entity, element);
        element
    }

    /// Polyline through drawing-space points
    fn curve_through(&mut self, points: &[(f64, f64)]) -> EntityId {
        let mut ids = Vec::with_capacity(points.len());
        for (x, y) in points {
            ids.push(self.graph.cartesian_point_2d(*x, *y));
        }
        self.graph.polyline(&ids)
    }

    // ========================================================================
    // Gridlines
    // ========================================================================

    pub(crate) fn map_gridline(&mut self, gridline: &GridlineShape) {
        // Gridlines copied into section drawings are derived, never re-exported
        if !self.is_plan_drawing(&gridline.drawing_id) {
            return;
        }

        let start = self
            .graph
            .cartesian_point_3d(gridline.start.x, gridline.start.y, 0.0);
        let end = self
            .graph
            .cartesian_point_3d(gridline.end.x, gridline.end.y, 0.0);
        let curve = self.graph.polyline(&[start, end]);

        let dx = (gridline.end.x - gridline.start.x).abs();
        let dy = (gridline.end.y - gridline.start.y).abs();
        let is_u = dx >= dy;

        let fallback_tag = (self.grid_axes.len() + 1).to_string();
        let tag = gridline.label.as_deref().unwrap_or(&fallback_tag);
        let axis = self.graph.grid_axis(tag, curve, true);

        self.grid_axes.push(GridAxisRecord { axis, curve, is_u });
    }

    /// Emit the single grid entity once all gridlines are processed
    ///
    /// IFC requires both axis lists to be non-empty, so a drawing whose
    /// gridlines all run one way donates one axis to the other list.
    pub(crate) fn finalize_grid(&mut self) {
        if self.grid_axes.is_empty() {
            return;
        }

        let mut u_axes: Vec<EntityId> = Vec::new();
        let mut v_axes: Vec<EntityId> = Vec::new();
        let mut curves: Vec<EntityId> = Vec::with_capacity(self.grid_axes.len());
        for record in &self.grid_axes {
            if record.is_u {
                u_axes.push(record.axis);
            } else {
                v_axes.push(record.axis);
            }
            curves.push(record.curve);
        }
        if u_axes.is_empty() {
            u_axes.push(v_axes.remove(0));
        } else if v_axes.is_empty() {
            v_axes.push(u_axes.remove(0));
        }

        // Footprint lets viewers render the grid lines themselves
        let curve_set = self.graph.geometric_curve_set(&curves);
        let footprint = self.graph.shape_representation(
            self.context,
            "FootPrint",
            "GeometricCurveSet",
            &[curve_set],
        );
        let shape_def = self.graph.product_definition_shape(&[footprint]);

        let storey = self.hierarchy.fallback().clone();
        let placement = self.element_placement(storey.placement, 0.0, 0.0, 0.0, None);
        let grid = self.graph.grid(
            &guid::stable_guid("plan-grid", "grid"),
            self.owner_history,
            "Plan Grid",
            placement,
            shape_def,
            &u_axes,
            &v_axes,
        );
        self.contain(storey.entity, grid);
    }

    // ========================================================================
    // Levels
    // ========================================================================

    pub(crate) fn map_level(&mut self, level: &LevelShape) {
        // The storey hierarchy already consumed levels; only plan-drawing
        // levels come back as annotations
        if !self.is_plan_drawing(&level.drawing_id) {
            return;
        }

        let storey = self.resolve_storey(&level.drawing_id);
        let curve = self.curve_through(&[
            (level.start.x, level.start.y),
            (level.end.x, level.end.y),
        ]);
        let element = self.emit_annotation(&level.id, &level.label, &storey, curve);

        let mut properties = vec![
            ("ShapeType", PropertyValue::Label("level".into())),
            ("Elevation", PropertyValue::Real(level.elevation)),
            ("Label", PropertyValue::Label(level.label.clone())),
        ];
        if let Some(description) = &level.description {
            properties.push(("Description", PropertyValue::Text(description.clone())));
        }
        self.emit_property_set(&level.id, "pset", "Pset_Annotation", &properties, element);
    }

    // ========================================================================
    // Simple annotation shapes
    // ========================================================================

    pub(crate) fn map_line(&mut self, line: &LineShape) {
        let storey = self.resolve_storey(&line.drawing_id);
        let curve = self.curve_through(&[
            (line.start.x, line.start.y),
            (line.end.x, line.end.y),
        ]);
        let element = self.emit_annotation(&line.id, "Line", &storey, curve);
        self.emit_property_set(
            &line.id,
            "pset",
            "Pset_Annotation",
            &[("ShapeType", PropertyValue::Label("line".into()))],
            element,
        );
    }

    pub(crate) fn map_arc(&mut self, arc: &ArcShape) {
        let storey = self.resolve_storey(&arc.drawing_id);
        let center = self.graph.cartesian_point_2d(arc.center.x, arc.center.y);
        let position = self.graph.axis2_placement_2d(center, None);
        let circle = self.graph.circle(position, arc.radius);
        let curve = self
            .graph
            .trimmed_curve(circle, arc.start_angle, arc.end_angle);
        let element = self.emit_annotation(&arc.id, "Arc", &storey, curve);
        self.emit_property_set(
            &arc.id,
            "pset",
            "Pset_Annotation",
            &[
                ("ShapeType", PropertyValue::Label("arc".into())),
                ("Radius", PropertyValue::Real(arc.radius)),
            ],
            element,
        );
    }

    pub(crate) fn map_circle(&mut self, circle: &CircleShape) {
        let storey = self.resolve_storey(&circle.drawing_id);
        let center = self
            .graph
            .cartesian_point_2d(circle.center.x, circle.center.y);
        let position = self.graph.axis2_placement_2d(center, None);
        let curve = self.graph.circle(position, circle.radius);
        let element = self.emit_annotation(&circle.id, "Circle", &storey, curve);
        self.emit_property_set(
            &circle.id,
            "pset",
            "Pset_Annotation",
            &[
                ("ShapeType", PropertyValue::Label("circle".into())),
                ("Radius", PropertyValue::Real(circle.radius)),
            ],
            element,
        );
    }

    pub(crate) fn map_polyline(&mut self, polyline: &PolylineShape) {
        if polyline.points.len() < 2 {
            log::debug!("skipping degenerate polyline '{}'", polyline.id);
            return;
        }
        let storey = self.resolve_storey(&polyline.drawing_id);
        let points: Vec<(f64, f64)> = polyline.points.iter().map(|p| (p.x, p.y)).collect();
        let curve = self.curve_through(&points);
        let element = self.emit_annotation(&polyline.id, "Polyline", &storey, curve);
        self.emit_property_set(
            &polyline.id,
            "pset",
            "Pset_Annotation",
            &[("ShapeType", PropertyValue::Label("polyline".into()))],
            element,
        );
    }

    pub(crate) fn map_rectangle(&mut self, rectangle: &RectangleShape) {
        let storey = self.resolve_storey(&rectangle.drawing_id);
        let corners = rectangle.corners();
        let points: Vec<(f64, f64)> = corners
            .iter()
            .chain(std::iter::once(&corners[0]))
            .map(|p| (p.x, p.y))
            .collect();
        let curve = self.curve_through(&points);
        let element = self.emit_annotation(&rectangle.id, "Rectangle", &storey, curve);
        self.emit_property_set(
            &rectangle.id,
            "pset",
            "Pset_Annotation",
            &[
                ("ShapeType", PropertyValue::Label("rectangle".into())),
                ("Width", PropertyValue::Real(rectangle.width)),
                ("Height", PropertyValue::Real(rectangle.height)),
            ],
            element,
        );
    }

    pub(crate) fn map_dimension(&mut self, dimension: &DimensionShape) {
        let storey = self.resolve_storey(&dimension.drawing_id);
        let curve = self.curve_through(&[
            (dimension.start.x, dimension.start.y),
            (dimension.end.x, dimension.end.y),
        ]);
        let element = self.emit_annotation(&dimension.id, "Dimension", &storey, curve);

        let value = dimension
            .value
            .unwrap_or_else(|| dimension.start.distance_to(&dimension.end));
        let mut properties = vec![
            ("ShapeType", PropertyValue::Label("dimension".into())),
            ("Value", PropertyValue::Real(value)),
        ];
        if let Some(prefix) = &dimension.prefix {
            properties.push(("Prefix", PropertyValue::Label(prefix.clone())));
        }
        if let Some(suffix) = &dimension.suffix {
            properties.push(("Suffix", PropertyValue::Label(suffix.clone())));
        }
        self.emit_property_set(&dimension.id, "pset", "Pset_Annotation", &properties, element);
    }

    pub(crate) fn map_text(&mut self, text: &TextShape) {
        let storey = self.resolve_storey(&text.drawing_id);
        // Zero-length polyline anchors the annotation at the insertion point
        let curve = self.curve_through(&[
            (text.position.x, text.position.y),
            (text.position.x, text.position.y),
        ]);
        let element = self.emit_annotation(&text.id, "Text", &storey, curve);

        let mut properties = vec![
            ("ShapeType", PropertyValue::Label("text".into())),
            ("Content", PropertyValue::Text(text.content.clone())),
        ];
        if let Some(font) = &text.font {
            properties.push(("Font", PropertyValue::Label(font.clone())));
        }
        self.emit_property_set(&text.id, "pset", "Pset_Annotation", &properties, element);
    }

    pub(crate) fn map_section_callout(&mut self, callout: &SectionCalloutShape) {
        let storey = self.resolve_storey(&callout.drawing_id);
        let curve = self.curve_through(&[
            (callout.start.x, callout.start.y),
            (callout.end.x, callout.end.y),
        ]);
        let element = self.emit_annotation(&callout.id, "Section Callout", &storey, curve);

        let mut properties = vec![(
            "ShapeType",
            PropertyValue::Label("sectionCallout".into()),
        )];
        if let Some(label) = &callout.label {
            properties.push(("Label", PropertyValue::Label(label.clone())));
        }
        if let Some(callout_type) = &callout.callout_type {
            properties.push(("CalloutType", PropertyValue::Label(callout_type.clone())));
        }
        let in_section = self
            .drawing(&callout.drawing_id)
            .map(|d| d.is_section())
            .unwrap_or(false);
        if in_section {
            properties.push(("DrawingType", PropertyValue::Label("section".into())));
        }
        self.emit_property_set(&callout.id, "pset", "Pset_Annotation", &properties, element);
    }
}
