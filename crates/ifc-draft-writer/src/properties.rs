// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property and quantity set emission
//!
//! Helpers shared by the element and annotation mappers. Property sets carry
//! stable GlobalIds derived from the owning shape's persistent id, so a
//! re-export of the same drawing reproduces them; the relationship binding a
//! set to its element is emitted later by the aggregation pass.

use crate::export::Exporter;
use crate::graph::PropertyValue;
use crate::guid;
use ifc_draft_model::EntityId;

/// A named base quantity
pub(crate) enum Quantity {
    Length(&'static str, f64),
    Area(&'static str, f64),
    Volume(&'static str, f64),
}

impl Exporter<'_> {
    /// Emit a property set for an element and queue its defining relationship
    pub(crate) fn emit_property_set(
        &mut self,
        shape_id: &str,
        suffix: &str,
        name: &str,
        properties: &[(&str, PropertyValue)],
        element: EntityId,
    ) {
        let mut ids = Vec::with_capacity(properties.len());
        for (prop_name, value) in properties {
            ids.push(self.graph.property_single_value(prop_name, value));
        }
        let pset = self.graph.property_set(
            &guid::stable_guid(shape_id, suffix),
            self.owner_history,
            name,
            &ids,
        );
        self.property_links.push((pset, element));
    }

    /// Emit a base-quantity set for an element and queue its relationship
    pub(crate) fn emit_quantity_set(
        &mut self,
        shape_id: &str,
        suffix: &str,
        name: &str,
        quantities: &[Quantity],
        element: EntityId,
    ) {
        let mut ids = Vec::with_capacity(quantities.len());
        for quantity in quantities {
            let id = match quantity {
                Quantity::Length(name, value) => self.graph.quantity_length(name, *value),
                Quantity::Area(name, value) => self.graph.quantity_area(name, *value),
                Quantity::Volume(name, value) => self.graph.quantity_volume(name, *value),
            };
            ids.push(id);
        }
        let quantity_set = self.graph.element_quantity(
            &guid::stable_guid(shape_id, suffix),
            self.owner_history,
            name,
            &ids,
        );
        self.property_links.push((quantity_set, element));
    }
}
