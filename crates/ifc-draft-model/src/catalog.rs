// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall and slab type catalogs
//!
//! The drawing application maintains small catalogs of reusable construction
//! types. Elements referencing a catalog entry are grouped under one IFC type
//! object on export.

use serde::{Deserialize, Serialize};

/// A reusable wall construction type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallType {
    /// Stable catalog id referenced by `WallShape::wall_type_id`
    pub id: String,
    /// Display name, e.g. "Concrete 200"
    pub name: String,
    pub thickness: f64,
    #[serde(default)]
    pub material: Option<String>,
}

/// A reusable slab construction type
///
/// Slabs carry no explicit type reference; a slab is matched against the
/// catalog by `(thickness, material)` equality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabType {
    pub id: String,
    pub name: String,
    pub thickness: f64,
    #[serde(default)]
    pub material: Option<String>,
}

impl SlabType {
    /// Whether a slab with the given thickness and material uses this type
    pub fn matches(&self, thickness: f64, material: Option<&str>) -> bool {
        (self.thickness - thickness).abs() < f64::EPSILON && self.material.as_deref() == material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_type_match() {
        let ty = SlabType {
            id: "st-1".into(),
            name: "RC 300".into(),
            thickness: 300.0,
            material: Some("Concrete".into()),
        };
        assert!(ty.matches(300.0, Some("Concrete")));
        assert!(!ty.matches(300.0, None));
        assert!(!ty.matches(250.0, Some("Concrete")));
    }
}
