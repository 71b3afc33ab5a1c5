// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing shape variants
//!
//! Every entity the drawing editor can place is one variant of [`Shape`].
//! Shapes are read-only input to the IFC writer: each carries a stable
//! identifier (assigned when the shape is first created and preserved across
//! saves) and the id of its owning drawing, plus kind-specific geometry and
//! attributes. Coordinates and lengths are in millimeters, angles in radians.

use crate::types::Point2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wall reference-line justification
///
/// Controls how the material layer set is offset from the wall centerline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WallJustification {
    #[default]
    Center,
    Left,
    Right,
}

/// View mode a beam was drawn in
///
/// Beams drawn in section view are exported as columns; this is the drawing
/// convention of the source application, not a geometric property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Plan,
    Section,
}

/// A load-bearing or partition wall along a centerline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallShape {
    pub id: String,
    pub drawing_id: String,
    pub start: Point2,
    pub end: Point2,
    pub thickness: f64,
    #[serde(default)]
    pub justification: WallJustification,
    #[serde(default)]
    pub wall_type_id: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
}

impl WallShape {
    /// Centerline length
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A beam (or column, when drawn in section view)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamShape {
    pub id: String,
    pub drawing_id: String,
    pub start: Point2,
    pub end: Point2,
    /// Profile family name, e.g. "IPE" or "rectangular"
    pub profile_type: String,
    pub flange_width: f64,
    #[serde(default)]
    pub depth: Option<f64>,
    /// Free-form profile parameters from the preset editor
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub preset_id: Option<String>,
    #[serde(default)]
    pub preset_name: Option<String>,
    #[serde(default)]
    pub view_mode: ViewMode,
}

impl BeamShape {
    /// Axis length
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Cross-section depth: explicit depth, else a `depth`/`h` parameter,
    /// else the flange width
    pub fn section_depth(&self) -> f64 {
        self.depth
            .or_else(|| self.parameters.get("depth").copied())
            .or_else(|| self.parameters.get("h").copied())
            .unwrap_or(self.flange_width)
    }

    /// Key used to share one type object between beams with the same profile
    pub fn profile_key(&self) -> &str {
        self.preset_id
            .as_deref()
            .or(self.preset_name.as_deref())
            .unwrap_or(&self.profile_type)
    }
}

/// A floor slab bounded by a closed point loop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabShape {
    pub id: String,
    pub drawing_id: String,
    pub points: Vec<Point2>,
    pub thickness: f64,
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub material: Option<String>,
}

/// A bored pile at a plan position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PileShape {
    pub id: String,
    pub drawing_id: String,
    pub position: Point2,
    pub diameter: f64,
    #[serde(default)]
    pub label: Option<String>,
}

/// A structural gridline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridlineShape {
    pub id: String,
    pub drawing_id: String,
    pub start: Point2,
    pub end: Point2,
    #[serde(default)]
    pub label: Option<String>,
}

/// A level marker (storey datum line)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelShape {
    pub id: String,
    pub drawing_id: String,
    pub start: Point2,
    pub end: Point2,
    pub elevation: f64,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A plain line annotation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineShape {
    pub id: String,
    pub drawing_id: String,
    pub start: Point2,
    pub end: Point2,
}

/// A circular arc annotation (angles in radians, counterclockwise)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcShape {
    pub id: String,
    pub drawing_id: String,
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// A full circle annotation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleShape {
    pub id: String,
    pub drawing_id: String,
    pub center: Point2,
    pub radius: f64,
}

/// An open polyline annotation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineShape {
    pub id: String,
    pub drawing_id: String,
    pub points: Vec<Point2>,
}

/// An axis-aligned rectangle, optionally rotated about its anchor corner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleShape {
    pub id: String,
    pub drawing_id: String,
    pub position: Point2,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl RectangleShape {
    /// The four corners, rotated about the anchor position
    pub fn corners(&self) -> [Point2; 4] {
        let (sin, cos) = self.rotation.sin_cos();
        let rotate = |dx: f64, dy: f64| Point2 {
            x: self.position.x + dx * cos - dy * sin,
            y: self.position.y + dx * sin + dy * cos,
        };
        [
            rotate(0.0, 0.0),
            rotate(self.width, 0.0),
            rotate(self.width, self.height),
            rotate(0.0, self.height),
        ]
    }
}

/// A linear dimension annotation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionShape {
    pub id: String,
    pub drawing_id: String,
    pub start: Point2,
    pub end: Point2,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

/// A text annotation at an insertion point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShape {
    pub id: String,
    pub drawing_id: String,
    pub position: Point2,
    pub content: String,
    #[serde(default)]
    pub font: Option<String>,
}

/// A section callout line linking plan and section drawings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCalloutShape {
    pub id: String,
    pub drawing_id: String,
    pub start: Point2,
    pub end: Point2,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub callout_type: Option<String>,
}

/// A hatch region (not exported to IFC)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HatchShape {
    pub id: String,
    pub drawing_id: String,
    pub points: Vec<Point2>,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// An embedded raster image (not exported to IFC)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageShape {
    pub id: String,
    pub drawing_id: String,
    pub position: Point2,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub source: Option<String>,
}

/// A named space region (not exported to IFC)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceShape {
    pub id: String,
    pub drawing_id: String,
    pub points: Vec<Point2>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A freehand spline (not exported to IFC)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplineShape {
    pub id: String,
    pub drawing_id: String,
    pub points: Vec<Point2>,
}

/// A point marker (not exported to IFC)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointShape {
    pub id: String,
    pub drawing_id: String,
    pub position: Point2,
}

/// An ellipse (not exported to IFC)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseShape {
    pub id: String,
    pub drawing_id: String,
    pub center: Point2,
    pub radius_x: f64,
    pub radius_y: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// A drawing entity, tagged by kind
///
/// The writer dispatches on this enum; kinds with no IFC mapping are skipped
/// without aborting generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shapeType", rename_all = "camelCase")]
pub enum Shape {
    Wall(WallShape),
    Beam(BeamShape),
    Slab(SlabShape),
    Pile(PileShape),
    Gridline(GridlineShape),
    Level(LevelShape),
    Line(LineShape),
    Arc(ArcShape),
    Circle(CircleShape),
    Polyline(PolylineShape),
    Rectangle(RectangleShape),
    Dimension(DimensionShape),
    Text(TextShape),
    SectionCallout(SectionCalloutShape),
    Hatch(HatchShape),
    Image(ImageShape),
    Space(SpaceShape),
    Spline(SplineShape),
    Point(PointShape),
    Ellipse(EllipseShape),
}

impl Shape {
    /// Stable shape identifier
    pub fn id(&self) -> &str {
        match self {
            Shape::Wall(s) => &s.id,
            Shape::Beam(s) => &s.id,
            Shape::Slab(s) => &s.id,
            Shape::Pile(s) => &s.id,
            Shape::Gridline(s) => &s.id,
            Shape::Level(s) => &s.id,
            Shape::Line(s) => &s.id,
            Shape::Arc(s) => &s.id,
            Shape::Circle(s) => &s.id,
            Shape::Polyline(s) => &s.id,
            Shape::Rectangle(s) => &s.id,
            Shape::Dimension(s) => &s.id,
            Shape::Text(s) => &s.id,
            Shape::SectionCallout(s) => &s.id,
            Shape::Hatch(s) => &s.id,
            Shape::Image(s) => &s.id,
            Shape::Space(s) => &s.id,
            Shape::Spline(s) => &s.id,
            Shape::Point(s) => &s.id,
            Shape::Ellipse(s) => &s.id,
        }
    }

    /// Id of the drawing that owns this shape
    pub fn drawing_id(&self) -> &str {
        match self {
            Shape::Wall(s) => &s.drawing_id,
            Shape::Beam(s) => &s.drawing_id,
            Shape::Slab(s) => &s.drawing_id,
            Shape::Pile(s) => &s.drawing_id,
            Shape::Gridline(s) => &s.drawing_id,
            Shape::Level(s) => &s.drawing_id,
            Shape::Line(s) => &s.drawing_id,
            Shape::Arc(s) => &s.drawing_id,
            Shape::Circle(s) => &s.drawing_id,
            Shape::Polyline(s) => &s.drawing_id,
            Shape::Rectangle(s) => &s.drawing_id,
            Shape::Dimension(s) => &s.drawing_id,
            Shape::Text(s) => &s.drawing_id,
            Shape::SectionCallout(s) => &s.drawing_id,
            Shape::Hatch(s) => &s.drawing_id,
            Shape::Image(s) => &s.drawing_id,
            Shape::Space(s) => &s.drawing_id,
            Shape::Spline(s) => &s.drawing_id,
            Shape::Point(s) => &s.drawing_id,
            Shape::Ellipse(s) => &s.drawing_id,
        }
    }

    /// Kind name as written into annotation property sets
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Wall(_) => "wall",
            Shape::Beam(_) => "beam",
            Shape::Slab(_) => "slab",
            Shape::Pile(_) => "pile",
            Shape::Gridline(_) => "gridline",
            Shape::Level(_) => "level",
            Shape::Line(_) => "line",
            Shape::Arc(_) => "arc",
            Shape::Circle(_) => "circle",
            Shape::Polyline(_) => "polyline",
            Shape::Rectangle(_) => "rectangle",
            Shape::Dimension(_) => "dimension",
            Shape::Text(_) => "text",
            Shape::SectionCallout(_) => "sectionCallout",
            Shape::Hatch(_) => "hatch",
            Shape::Image(_) => "image",
            Shape::Space(_) => "space",
            Shape::Spline(_) => "spline",
            Shape::Point(_) => "point",
            Shape::Ellipse(_) => "ellipse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beam_section_depth_fallbacks() {
        let mut beam = BeamShape {
            id: "b1".into(),
            drawing_id: "d1".into(),
            start: Point2::new(0.0, 0.0),
            end: Point2::new(1000.0, 0.0),
            profile_type: "IPE".into(),
            flange_width: 120.0,
            depth: None,
            parameters: BTreeMap::new(),
            material: None,
            preset_id: None,
            preset_name: None,
            view_mode: ViewMode::Plan,
        };
        assert_eq!(beam.section_depth(), 120.0);

        beam.parameters.insert("h".into(), 240.0);
        assert_eq!(beam.section_depth(), 240.0);

        beam.parameters.insert("depth".into(), 260.0);
        assert_eq!(beam.section_depth(), 260.0);

        beam.depth = Some(300.0);
        assert_eq!(beam.section_depth(), 300.0);
    }

    #[test]
    fn test_beam_profile_key() {
        let mut beam = BeamShape {
            id: "b1".into(),
            drawing_id: "d1".into(),
            start: Point2::new(0.0, 0.0),
            end: Point2::new(1000.0, 0.0),
            profile_type: "IPE".into(),
            flange_width: 120.0,
            depth: None,
            parameters: BTreeMap::new(),
            material: None,
            preset_id: None,
            preset_name: None,
            view_mode: ViewMode::Plan,
        };
        assert_eq!(beam.profile_key(), "IPE");
        beam.preset_name = Some("IPE 240".into());
        assert_eq!(beam.profile_key(), "IPE 240");
        beam.preset_id = Some("preset-7".into());
        assert_eq!(beam.profile_key(), "preset-7");
    }

    #[test]
    fn test_rectangle_corners_unrotated() {
        let rect = RectangleShape {
            id: "r1".into(),
            drawing_id: "d1".into(),
            position: Point2::new(10.0, 20.0),
            width: 100.0,
            height: 50.0,
            rotation: 0.0,
        };
        let corners = rect.corners();
        assert_eq!(corners[0], Point2::new(10.0, 20.0));
        assert_eq!(corners[2], Point2::new(110.0, 70.0));
    }

    #[test]
    fn test_shape_json_roundtrip() {
        let shape = Shape::Wall(WallShape {
            id: "w1".into(),
            drawing_id: "d1".into(),
            start: Point2::new(0.0, 0.0),
            end: Point2::new(5000.0, 0.0),
            thickness: 200.0,
            justification: WallJustification::Center,
            wall_type_id: Some("wt-1".into()),
            material: None,
        });
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"shapeType\":\"wall\""));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }
}
