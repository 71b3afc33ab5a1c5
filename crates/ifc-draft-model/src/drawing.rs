// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing metadata
//!
//! Shapes belong to drawings; a drawing's kind decides how its shapes are
//! routed on export. Plan drawings link to a storey; gridlines and levels
//! copied into section drawings are derived data and are not re-exported.

use serde::{Deserialize, Serialize};

/// Kind of drawing sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawingKind {
    #[default]
    Plan,
    Section,
    Standalone,
}

/// Metadata for one drawing sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    /// Stable id referenced by `Shape::drawing_id`
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: DrawingKind,
    /// Linked storey for plan drawings
    #[serde(default)]
    pub storey_id: Option<String>,
}

impl Drawing {
    /// Whether this is a plan drawing
    pub fn is_plan(&self) -> bool {
        self.kind == DrawingKind::Plan
    }

    /// Whether this is a section drawing
    pub fn is_section(&self) -> bool {
        self.kind == DrawingKind::Section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_kind_json() {
        let drawing = Drawing {
            id: "d1".into(),
            name: "Sheet 1".into(),
            kind: DrawingKind::Section,
            storey_id: None,
        };
        let json = serde_json::to_string(&drawing).unwrap();
        assert!(json.contains("\"kind\":\"section\""));
    }
}
