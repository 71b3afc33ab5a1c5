// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Draft Model - Drawing document types for IFC export
//!
//! This crate defines the in-memory drawing model consumed by the IFC-Draft
//! writer: the tagged shape variants produced by the drawing editor, the
//! wall/slab type catalogs, the project spatial structure, and per-drawing
//! metadata. The writer walks these types and emits an ISO-10303-21 (STEP)
//! physical file conforming to the IFC4 schema.
//!
//! All types are plain data with serde support because the source application
//! persists its document as JSON.
//!
//! # Example
//!
//! ```ignore
//! use ifc_draft_model::{Shape, WallShape, Point2, WallJustification};
//!
//! let wall = Shape::Wall(WallShape {
//!     id: "wall-1".into(),
//!     drawing_id: "plan-0".into(),
//!     start: Point2::new(0.0, 0.0),
//!     end: Point2::new(5000.0, 0.0),
//!     thickness: 200.0,
//!     justification: WallJustification::Center,
//!     wall_type_id: None,
//!     material: None,
//! });
//! assert_eq!(wall.id(), "wall-1");
//! ```

pub mod catalog;
pub mod drawing;
pub mod error;
pub mod project;
pub mod result;
pub mod shapes;
pub mod types;

// Re-export all public types
pub use catalog::*;
pub use drawing::*;
pub use error::*;
pub use project::*;
pub use result::*;
pub use shapes::*;
pub use types::*;
