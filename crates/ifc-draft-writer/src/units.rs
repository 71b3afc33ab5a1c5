// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project unit system
//!
//! Every generated file measures lengths in millimeters, areas in square
//! meters, volumes in cubic meters, and plane angles in radians with an
//! additional degree conversion unit for consumers that prefer degrees.

use crate::graph::EntityGraph;
use ifc_draft_model::EntityId;

/// Radians per degree, written into the degree conversion unit
const RADIANS_PER_DEGREE: f64 = 0.017453292519943295;

/// Emit the fixed unit block and return the unit assignment id
pub(crate) fn emit_unit_assignment(graph: &mut EntityGraph) -> EntityId {
    let length = graph.si_unit("LENGTHUNIT", Some("MILLI"), "METRE");
    let area = graph.si_unit("AREAUNIT", None, "SQUARE_METRE");
    let volume = graph.si_unit("VOLUMEUNIT", None, "CUBIC_METRE");
    let radian = graph.si_unit("PLANEANGLEUNIT", None, "RADIAN");

    let exponents = graph.dimensional_exponents([0, 0, 0, 0, 0, 0, 0]);
    let factor = graph.measure_with_unit("IFCPLANEANGLEMEASURE", RADIANS_PER_DEGREE, radian);
    let degree = graph.conversion_based_unit(exponents, "PLANEANGLEUNIT", "DEGREE", factor);

    graph.unit_assignment(&[length, area, volume, radian, degree])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_block() {
        let mut graph = EntityGraph::new();
        let assignment = emit_unit_assignment(&mut graph);

        assert_eq!(graph.len(), 8);
        assert_eq!(assignment, EntityId(8));

        let types: Vec<&str> = graph.entities().iter().map(|e| e.type_name).collect();
        assert_eq!(types.iter().filter(|t| **t == "IFCSIUNIT").count(), 4);
        assert!(types.contains(&"IFCCONVERSIONBASEDUNIT"));

        // The assignment references the four SI units plus the degree unit
        let assignment_entity = graph.entities().last().unwrap();
        assert_eq!(assignment_entity.attributes, "(#1,#2,#3,#4,#7)");
    }

    #[test]
    fn test_millimetre_length_unit() {
        let mut graph = EntityGraph::new();
        emit_unit_assignment(&mut graph);
        assert_eq!(
            graph.entities()[0].attributes,
            "*,.LENGTHUNIT.,.MILLI.,.METRE."
        );
    }
}
