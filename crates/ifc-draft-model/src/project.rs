// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project spatial structure
//!
//! A small tree describing the spatial containment hierarchy the IFC file
//! must express: one site, one or more buildings, zero or more storeys each.
//! Storey identity links plan drawings to their spatial container.

use serde::{Deserialize, Serialize};

/// A building storey with an elevation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storey {
    /// Stable id referenced by `Drawing::storey_id`
    pub id: String,
    pub name: String,
    /// Elevation above project zero, millimeters
    pub elevation: f64,
}

/// A building containing storeys
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub storeys: Vec<Storey>,
}

/// The project structure tree: site → buildings → storeys
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub buildings: Vec<Building>,
}

impl ProjectStructure {
    /// Whether the structure has no buildings at all
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Iterate all storeys in document order
    pub fn storeys(&self) -> impl Iterator<Item = &Storey> {
        self.buildings.iter().flat_map(|b| b.storeys.iter())
    }

    /// Find a storey by its stable id
    pub fn find_storey(&self, id: &str) -> Option<&Storey> {
        self.storeys().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectStructure {
        ProjectStructure {
            site_name: Some("Site A".into()),
            buildings: vec![Building {
                id: "b1".into(),
                name: "Main".into(),
                storeys: vec![
                    Storey {
                        id: "s0".into(),
                        name: "Ground Floor".into(),
                        elevation: 0.0,
                    },
                    Storey {
                        id: "s1".into(),
                        name: "Level 1".into(),
                        elevation: 3000.0,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_find_storey() {
        let project = sample();
        assert_eq!(project.find_storey("s1").unwrap().elevation, 3000.0);
        assert!(project.find_storey("nope").is_none());
    }

    #[test]
    fn test_storeys_order() {
        let project = sample();
        let names: Vec<_> = project.storeys().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ground Floor", "Level 1"]);
    }
}
