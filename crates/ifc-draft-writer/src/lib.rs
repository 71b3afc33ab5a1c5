// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Draft Writer - IFC4 STEP file generation
//!
//! This crate converts a drawing document (shapes, type catalogs, project
//! structure, drawing metadata) into a single ISO-10303-21 physical file
//! conforming to the IFC4 schema.
//!
//! # Features
//!
//! - **Append-only entity graph** - sequential ids, backward references only
//! - **Stable GlobalIds** for domain objects, so re-export is idempotent
//! - **Batched relationships** - one containment per storey, one association
//!   per material, one type relationship per type group
//! - **Degenerate-input tolerance** - malformed shapes are skipped, never
//!   abort a generation
//! - **Parse-back verification** via [`verify::check`]
//!
//! # Example
//!
//! ```ignore
//! use ifc_draft_writer::generate;
//!
//! let result = generate(&shapes, &wall_types, &slab_types, Some(&structure), &drawings);
//! std::fs::write("model.ifc", &result.content)?;
//! println!("wrote {} entities ({} bytes)", result.entity_count, result.file_size);
//! ```

mod annotations;
mod document;
mod elements;
mod export;
mod properties;
mod relations;
mod spatial;
mod units;

pub mod encode;
pub mod graph;
pub mod guid;
pub mod verify;

pub use graph::{EntityGraph, IdAllocator, PropertyValue, StepEntity};
pub use guid::{random_guid, stable_guid};
pub use verify::{check, FileCheck};

use chrono::{DateTime, Utc};
use export::Exporter;
use ifc_draft_model::{Drawing, GenerationResult, ProjectStructure, Shape, SlabType, WallType};
use serde::{Deserialize, Serialize};

/// Options controlling header identity and modeling defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriterOptions {
    /// Author written into FILE_NAME and the owning person
    pub author: String,
    /// Organization written into FILE_NAME and the owning organization
    pub organization: String,
    pub application_name: String,
    pub application_version: String,
    pub application_identifier: String,
    /// Project name; also names the generated file in the header
    pub project_name: String,
    /// Extrusion height for walls, millimeters
    pub wall_height: f64,
    /// Extrusion depth for piles, millimeters
    pub pile_depth: f64,
    /// Pinned timestamp for reproducible output; wall clock when unset
    #[serde(skip)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            author: "IFC-Draft".to_string(),
            organization: "IFC-Draft".to_string(),
            application_name: "IFC-Draft".to_string(),
            application_version: env!("CARGO_PKG_VERSION").to_string(),
            application_identifier: "ifc-draft".to_string(),
            project_name: "IFC-Draft Project".to_string(),
            wall_height: 3000.0,
            pile_depth: 10000.0,
            timestamp: None,
        }
    }
}

impl WriterOptions {
    /// Creation date for the owner history, epoch seconds
    pub(crate) fn creation_epoch(&self) -> i64 {
        self.timestamp.unwrap_or_else(Utc::now).timestamp()
    }

    /// ISO-8601 seconds timestamp for the file header
    pub(crate) fn header_timestamp(&self) -> String {
        self.timestamp
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }
}

/// IFC file writer carrying its options
///
/// This is the entry point for generation. The writer holds no state between
/// calls; every call builds a fresh entity graph and tracking maps, so it is
/// safe to reuse one writer for repeated (debounced) exports.
#[derive(Default)]
pub struct IfcWriter {
    pub options: WriterOptions,
}

impl IfcWriter {
    /// Create a writer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with explicit options
    pub fn with_options(options: WriterOptions) -> Self {
        Self { options }
    }

    /// Generate one IFC file from a drawing document
    pub fn generate(
        &self,
        shapes: &[Shape],
        wall_types: &[WallType],
        slab_types: &[SlabType],
        structure: Option<&ProjectStructure>,
        drawings: &[Drawing],
    ) -> GenerationResult {
        Exporter::generate(
            &self.options,
            shapes,
            wall_types,
            slab_types,
            structure,
            drawings,
        )
    }
}

/// Quick generation with default options
pub fn generate(
    shapes: &[Shape],
    wall_types: &[WallType],
    slab_types: &[SlabType],
    structure: Option<&ProjectStructure>,
    drawings: &[Drawing],
) -> GenerationResult {
    IfcWriter::new().generate(shapes, wall_types, slab_types, structure, drawings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_draft_model::{
        BeamShape, Building, DimensionShape, DrawingKind, GridlineShape, LineShape, PileShape,
        Point2, SlabShape, Storey, TextShape, ViewMode, WallJustification, WallShape,
    };

    fn wall(id: &str, end: Point2) -> Shape {
        Shape::Wall(WallShape {
            id: id.into(),
            drawing_id: "d1".into(),
            start: Point2::new(0.0, 0.0),
            end,
            thickness: 200.0,
            justification: WallJustification::Center,
            wall_type_id: None,
            material: None,
        })
    }

    /// First `#id=TYPE(...)` line of the given type
    fn find_line<'a>(content: &'a str, type_name: &str) -> Option<&'a str> {
        let needle = format!("={}(", type_name);
        content.lines().find(|line| line.contains(&needle))
    }

    fn lines_of<'a>(content: &'a str, type_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let needle = format!("={}(", type_name);
        content
            .lines()
            .filter(move |line| line.contains(&needle))
    }

    fn entity_id_of(line: &str) -> u32 {
        line[1..line.find('=').unwrap()].parse().unwrap()
    }

    #[test]
    fn test_wall_round_trip() {
        let shapes = [wall("w1", Point2::new(5000.0, 0.0))];
        let result = generate(&shapes, &[], &[], None, &[]);
        verify::check(&result.content).unwrap();

        assert_eq!(lines_of(&result.content, "IFCWALL").count(), 1);

        let usage = find_line(&result.content, "IFCMATERIALLAYERSETUSAGE").unwrap();
        assert!(usage.contains(",-100.0,"));

        assert!(result
            .content
            .contains("IFCQUANTITYLENGTH('Length',$,$,5000.0,$)"));
        assert!(result
            .content
            .contains("IFCQUANTITYLENGTH('Width',$,$,200.0,$)"));

        let wall_id = entity_id_of(find_line(&result.content, "IFCWALL").unwrap());
        let wall_ref = format!("#{}", wall_id);
        let containing: Vec<&str> = lines_of(&result.content, "IFCRELCONTAINEDINSPATIALSTRUCTURE")
            .filter(|line| {
                line.contains(&format!("{},", wall_ref))
                    || line.contains(&format!("{})", wall_ref))
            })
            .collect();
        assert_eq!(containing.len(), 1);
    }

    #[test]
    fn test_degenerate_wall_skipped() {
        let empty = generate(&[], &[], &[], None, &[]);
        let shapes = [wall("w1", Point2::new(0.0, 0.0))];
        let result = generate(&shapes, &[], &[], None, &[]);

        assert!(find_line(&result.content, "IFCWALL").is_none());
        assert_eq!(result.entity_count, empty.entity_count);
    }

    #[test]
    fn test_slab_quantities() {
        let shapes = [Shape::Slab(SlabShape {
            id: "s1".into(),
            drawing_id: "d1".into(),
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1000.0, 0.0),
                Point2::new(1000.0, 1000.0),
                Point2::new(0.0, 1000.0),
            ],
            thickness: 300.0,
            elevation: 0.0,
            material: None,
        })];
        let result = generate(&shapes, &[], &[], None, &[]);
        verify::check(&result.content).unwrap();

        assert!(result
            .content
            .contains("IFCQUANTITYAREA('GrossArea',$,$,1.0,$)"));
        assert!(result
            .content
            .contains("IFCQUANTITYVOLUME('GrossVolume',$,$,0.3,$)"));
    }

    #[test]
    fn test_grid_axes_never_empty() {
        let gridline = |id: &str, y: f64| {
            Shape::Gridline(GridlineShape {
                id: id.into(),
                drawing_id: "d1".into(),
                start: Point2::new(0.0, y),
                end: Point2::new(10000.0, y),
                label: None,
            })
        };
        let shapes = [
            gridline("g1", 0.0),
            gridline("g2", 3000.0),
            gridline("g3", 6000.0),
        ];
        let result = generate(&shapes, &[], &[], None, &[]);
        verify::check(&result.content).unwrap();

        let grid = find_line(&result.content, "IFCGRID").unwrap();
        assert!(!grid.contains("()"), "grid axis list is empty: {grid}");
        assert_eq!(lines_of(&result.content, "IFCGRIDAXIS").count(), 3);
    }

    #[test]
    fn test_section_beam_becomes_column() {
        let beam = |id: &str, mode: ViewMode| {
            Shape::Beam(BeamShape {
                id: id.into(),
                drawing_id: "d1".into(),
                start: Point2::new(0.0, 0.0),
                end: Point2::new(4000.0, 0.0),
                profile_type: "IPE".into(),
                flange_width: 120.0,
                depth: Some(240.0),
                parameters: Default::default(),
                material: None,
                preset_id: Some("ipe-240".into()),
                preset_name: Some("IPE 240".into()),
                view_mode: mode,
            })
        };
        let shapes = [beam("b1", ViewMode::Plan), beam("b2", ViewMode::Section)];
        let result = generate(&shapes, &[], &[], None, &[]);
        verify::check(&result.content).unwrap();

        assert_eq!(lines_of(&result.content, "IFCBEAM").count(), 1);
        assert_eq!(lines_of(&result.content, "IFCCOLUMN").count(), 1);
        // One shared profile key produces one type object and one grouping
        assert_eq!(lines_of(&result.content, "IFCBEAMTYPE").count(), 1);
        assert_eq!(lines_of(&result.content, "IFCRELDEFINESBYTYPE").count(), 1);
    }

    #[test]
    fn test_gridline_in_section_drawing_not_exported() {
        let drawings = [Drawing {
            id: "sec1".into(),
            name: "Section A".into(),
            kind: DrawingKind::Section,
            storey_id: None,
        }];
        let shapes = [Shape::Gridline(GridlineShape {
            id: "g1".into(),
            drawing_id: "sec1".into(),
            start: Point2::new(0.0, 0.0),
            end: Point2::new(10000.0, 0.0),
            label: Some("A".into()),
        })];
        let result = generate(&shapes, &[], &[], None, &drawings);
        assert!(find_line(&result.content, "IFCGRID").is_none());
        assert!(find_line(&result.content, "IFCGRIDAXIS").is_none());
    }

    #[test]
    fn test_level_only_exported_from_plan_drawings() {
        use ifc_draft_model::LevelShape;
        let drawings = [
            Drawing {
                id: "p1".into(),
                name: "Plan".into(),
                kind: DrawingKind::Plan,
                storey_id: None,
            },
            Drawing {
                id: "sec1".into(),
                name: "Section".into(),
                kind: DrawingKind::Section,
                storey_id: None,
            },
        ];
        let level = |id: &str, drawing: &str| {
            Shape::Level(LevelShape {
                id: id.into(),
                drawing_id: drawing.into(),
                start: Point2::new(0.0, 0.0),
                end: Point2::new(10000.0, 0.0),
                elevation: 3000.0,
                label: "Level 1".into(),
                description: None,
            })
        };
        let shapes = [level("lv1", "p1"), level("lv2", "sec1")];
        let result = generate(&shapes, &[], &[], None, &drawings);
        verify::check(&result.content).unwrap();

        // Only the plan-drawing level becomes an annotation
        assert_eq!(lines_of(&result.content, "IFCANNOTATION").count(), 1);
        assert!(result.content.contains("('Elevation',$,IFCREAL(3000.0),$)"));
        assert!(result.content.contains("('Label',$,IFCLABEL('Level 1'),$)"));
    }

    #[test]
    fn test_storey_routing_by_drawing() {
        let structure = ProjectStructure {
            site_name: Some("Site".into()),
            buildings: vec![Building {
                id: "b1".into(),
                name: "Main".into(),
                storeys: vec![
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
        let drawings = [Drawing {
            id: "p1".into(),
            name: "First Floor Plan".into(),
            kind: DrawingKind::Plan,
            storey_id: Some("s1".into()),
        }];
        let shapes = [Shape::Wall(WallShape {
            id: "w1".into(),
            drawing_id: "p1".into(),
            start: Point2::new(0.0, 0.0),
            end: Point2::new(5000.0, 0.0),
            thickness: 200.0,
            justification: WallJustification::Center,
            wall_type_id: None,
            material: None,
        })];
        let result = generate(&shapes, &[], &[], Some(&structure), &drawings);
        verify::check(&result.content).unwrap();

        let first_floor = lines_of(&result.content, "IFCBUILDINGSTOREY")
            .find(|line| line.contains("'First'"))
            .unwrap();
        let storey_ref = format!(",#{})", entity_id_of(first_floor));
        let containment = find_line(&result.content, "IFCRELCONTAINEDINSPATIALSTRUCTURE").unwrap();
        assert!(containment.ends_with(&format!("{};", storey_ref)));
    }

    #[test]
    fn test_stable_element_line_across_runs() {
        use chrono::TimeZone;
        let options = WriterOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            ..WriterOptions::default()
        };
        let writer = IfcWriter::with_options(options);
        let shapes = [wall("w1", Point2::new(5000.0, 0.0))];

        let first = writer.generate(&shapes, &[], &[], None, &[]);
        let second = writer.generate(&shapes, &[], &[], None, &[]);

        assert_eq!(first.entity_count, second.entity_count);
        assert_eq!(
            find_line(&first.content, "IFCWALL"),
            find_line(&second.content, "IFCWALL")
        );
    }

    #[test]
    fn test_full_document_integrity() {
        let drawings = [
            Drawing {
                id: "p1".into(),
                name: "Plan".into(),
                kind: DrawingKind::Plan,
                storey_id: None,
            },
            Drawing {
                id: "sec1".into(),
                name: "Section".into(),
                kind: DrawingKind::Section,
                storey_id: None,
            },
        ];
        let shapes = [
            wall("w1", Point2::new(5000.0, 0.0)),
            Shape::Slab(SlabShape {
                id: "s1".into(),
                drawing_id: "p1".into(),
                points: vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(8000.0, 0.0),
                    Point2::new(8000.0, 6000.0),
                    Point2::new(0.0, 6000.0),
                ],
                thickness: 250.0,
                elevation: 0.0,
                material: Some("Concrete".into()),
            }),
            Shape::Pile(PileShape {
                id: "pl1".into(),
                drawing_id: "p1".into(),
                position: Point2::new(500.0, 500.0),
                diameter: 900.0,
                label: Some("P1".into()),
            }),
            Shape::Gridline(GridlineShape {
                id: "g1".into(),
                drawing_id: "p1".into(),
                start: Point2::new(0.0, 0.0),
                end: Point2::new(0.0, 9000.0),
                label: Some("1".into()),
            }),
            Shape::Line(LineShape {
                id: "ln1".into(),
                drawing_id: "p1".into(),
                start: Point2::new(0.0, 0.0),
                end: Point2::new(100.0, 100.0),
            }),
            Shape::Dimension(DimensionShape {
                id: "dim1".into(),
                drawing_id: "p1".into(),
                start: Point2::new(0.0, 0.0),
                end: Point2::new(5000.0, 0.0),
                value: None,
                prefix: None,
                suffix: Some("mm".into()),
            }),
            Shape::Text(TextShape {
                id: "t1".into(),
                drawing_id: "sec1".into(),
                position: Point2::new(200.0, 300.0),
                content: "It's a note".into(),
                font: Some("Arial".into()),
            }),
        ];
        let result = generate(&shapes, &[], &[], None, &drawings);
        let stats = verify::check(&result.content).unwrap();
        assert_eq!(stats.entity_count, result.entity_count);
        assert!(stats.reference_count > 0);

        // Escaped quote survives the round trip
        assert!(result.content.contains("IFCTEXT('It''s a note')"));
        // Measured dimension value
        assert!(result.content.contains("('Value',$,IFCREAL(5000.0),$)"));
    }
}
