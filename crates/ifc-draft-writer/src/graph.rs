// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Append-only STEP entity graph
//!
//! [`EntityGraph`] owns the entity list and the id allocator; it is the only
//! place entities are created. One factory method per IFC entity kind formats
//! the attribute list through [`crate::encode`], allocates the next id, and
//! appends the record. Factories return the new id so later entities can
//! reference it. Arguments are always built before the call that uses them,
//! which is what makes every reference in the output a backward reference.

use crate::encode;
use ifc_draft_model::EntityId;

/// One serialized entity awaiting assembly
#[derive(Clone, Debug, PartialEq)]
pub struct StepEntity {
    pub id: EntityId,
    pub type_name: &'static str,
    /// Attribute list, formatted, without the surrounding parentheses
    pub attributes: String,
}

/// Sequential entity id allocator
///
/// Ids start at 1 and never repeat within one graph. The allocator is owned
/// by exactly one [`EntityGraph`]; all calls are sequential by construction.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u32,
}

impl IdAllocator {
    /// Allocate the next id
    pub fn next(&mut self) -> EntityId {
        self.last += 1;
        EntityId(self.last)
    }

    /// The most recently issued id (0 before the first allocation)
    pub fn current(&self) -> u32 {
        self.last
    }
}

/// A typed property value for `IFCPROPERTYSINGLEVALUE`
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Label(String),
    Text(String),
    Real(f64),
    Boolean(bool),
}

impl PropertyValue {
    fn encode(&self) -> String {
        match self {
            PropertyValue::Label(v) => encode::typed_string("IFCLABEL", v),
            PropertyValue::Text(v) => encode::typed_string("IFCTEXT", v),
            PropertyValue::Real(v) => encode::typed_real("IFCREAL", *v),
            PropertyValue::Boolean(v) => format!("IFCBOOLEAN({})", encode::boolean(*v)),
        }
    }
}

/// The append-only entity arena
#[derive(Debug, Default)]
pub struct EntityGraph {
    entities: Vec<StepEntity>,
    ids: IdAllocator,
}

impl EntityGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities created so far
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the graph is still empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in creation order
    pub fn entities(&self) -> &[StepEntity] {
        &self.entities
    }

    /// Append an entity and return its id
    fn push(&mut self, type_name: &'static str, attributes: String) -> EntityId {
        let id = self.ids.next();
        self.entities.push(StepEntity {
            id,
            type_name,
            attributes,
        });
        id
    }

    // ========================================================================
    // Geometry resources
    // ========================================================================

    pub fn cartesian_point_2d(&mut self, x: f64, y: f64) -> EntityId {
        self.push("IFCCARTESIANPOINT", encode::real_list(&[x, y]))
    }

    pub fn cartesian_point_3d(&mut self, x: f64, y: f64, z: f64) -> EntityId {
        self.push("IFCCARTESIANPOINT", encode::real_list(&[x, y, z]))
    }

    pub fn direction_2d(&mut self, x: f64, y: f64) -> EntityId {
        self.push("IFCDIRECTION", encode::real_list(&[x, y]))
    }

    pub fn direction_3d(&mut self, x: f64, y: f64, z: f64) -> EntityId {
        self.push("IFCDIRECTION", encode::real_list(&[x, y, z]))
    }

    pub fn axis2_placement_2d(
        &mut self,
        location: EntityId,
        ref_direction: Option<EntityId>,
    ) -> EntityId {
        self.push(
            "IFCAXIS2PLACEMENT2D",
            format!(
                "{},{}",
                encode::reference(location),
                encode::opt_reference(ref_direction)
            ),
        )
    }

    pub fn axis2_placement_3d(
        &mut self,
        location: EntityId,
        axis: Option<EntityId>,
        ref_direction: Option<EntityId>,
    ) -> EntityId {
        self.push(
            "IFCAXIS2PLACEMENT3D",
            format!(
                "{},{},{}",
                encode::reference(location),
                encode::opt_reference(axis),
                encode::opt_reference(ref_direction)
            ),
        )
    }

    pub fn local_placement(
        &mut self,
        placement_rel_to: Option<EntityId>,
        relative_placement: EntityId,
    ) -> EntityId {
        self.push(
            "IFCLOCALPLACEMENT",
            format!(
                "{},{}",
                encode::opt_reference(placement_rel_to),
                encode::reference(relative_placement)
            ),
        )
    }

    pub fn polyline(&mut self, points: &[EntityId]) -> EntityId {
        self.push("IFCPOLYLINE", encode::ref_list(points))
    }

    pub fn circle(&mut self, position: EntityId, radius: f64) -> EntityId {
        self.push(
            "IFCCIRCLE",
            format!("{},{}", encode::reference(position), encode::real(radius)),
        )
    }

    /// Trimmed curve over a basis curve, trimmed by parameter values
    ///
    /// For circles the parameters are angles in the project plane-angle unit
    /// (radians).
    pub fn trimmed_curve(&mut self, basis: EntityId, start: f64, end: f64) -> EntityId {
        self.push(
            "IFCTRIMMEDCURVE",
            format!(
                "{},({}),({}),.T.,.PARAMETER.",
                encode::reference(basis),
                encode::typed_real("IFCPARAMETERVALUE", start),
                encode::typed_real("IFCPARAMETERVALUE", end)
            ),
        )
    }

    // ========================================================================
    // Profiles and solids
    // ========================================================================

    pub fn rectangle_profile(
        &mut self,
        name: Option<&str>,
        position: EntityId,
        x_dim: f64,
        y_dim: f64,
    ) -> EntityId {
        self.push(
            "IFCRECTANGLEPROFILEDEF",
            format!(
                ".AREA.,{},{},{},{}",
                encode::opt_string(name),
                encode::reference(position),
                encode::real(x_dim),
                encode::real(y_dim)
            ),
        )
    }

    pub fn circle_profile(
        &mut self,
        name: Option<&str>,
        position: EntityId,
        radius: f64,
    ) -> EntityId {
        self.push(
            "IFCCIRCLEPROFILEDEF",
            format!(
                ".AREA.,{},{},{}",
                encode::opt_string(name),
                encode::reference(position),
                encode::real(radius)
            ),
        )
    }

    pub fn arbitrary_closed_profile(&mut self, outer_curve: EntityId) -> EntityId {
        self.push(
            "IFCARBITRARYCLOSEDPROFILEDEF",
            format!(".AREA.,$,{}", encode::reference(outer_curve)),
        )
    }

    pub fn extruded_area_solid(
        &mut self,
        profile: EntityId,
        position: EntityId,
        direction: EntityId,
        depth: f64,
    ) -> EntityId {
        self.push(
            "IFCEXTRUDEDAREASOLID",
            format!(
                "{},{},{},{}",
                encode::reference(profile),
                encode::reference(position),
                encode::reference(direction),
                encode::real(depth)
            ),
        )
    }

    // ========================================================================
    // Representations
    // ========================================================================

    pub fn geometric_representation_context(
        &mut self,
        context_type: &str,
        dimensions: u32,
        precision: f64,
        world_coordinate_system: EntityId,
    ) -> EntityId {
        self.push(
            "IFCGEOMETRICREPRESENTATIONCONTEXT",
            format!(
                "$,{},{},{},{},$",
                encode::string(context_type),
                encode::integer(dimensions as i64),
                encode::real(precision),
                encode::reference(world_coordinate_system)
            ),
        )
    }

    pub fn shape_representation(
        &mut self,
        context: EntityId,
        identifier: &str,
        representation_type: &str,
        items: &[EntityId],
    ) -> EntityId {
        self.push(
            "IFCSHAPEREPRESENTATION",
            format!(
                "{},{},{},{}",
                encode::reference(context),
                encode::string(identifier),
                encode::string(representation_type),
                encode::ref_list(items)
            ),
        )
    }

    pub fn product_definition_shape(&mut self, representations: &[EntityId]) -> EntityId {
        self.push(
            "IFCPRODUCTDEFINITIONSHAPE",
            format!("$,$,{}", encode::ref_list(representations)),
        )
    }

    pub fn geometric_curve_set(&mut self, elements: &[EntityId]) -> EntityId {
        self.push("IFCGEOMETRICCURVESET", encode::ref_list(elements))
    }

    // ========================================================================
    // Units
    // ========================================================================

    pub fn si_unit(&mut self, unit_type: &str, prefix: Option<&str>, name: &str) -> EntityId {
        let prefix = match prefix {
            Some(p) => encode::enumeration(p),
            None => encode::NULL.to_string(),
        };
        self.push(
            "IFCSIUNIT",
            format!(
                "{},{},{},{}",
                encode::DERIVED,
                encode::enumeration(unit_type),
                prefix,
                encode::enumeration(name)
            ),
        )
    }

    pub fn dimensional_exponents(&mut self, exponents: [i64; 7]) -> EntityId {
        let parts: Vec<String> = exponents.iter().map(|e| encode::integer(*e)).collect();
        self.push("IFCDIMENSIONALEXPONENTS", parts.join(","))
    }

    pub fn measure_with_unit(
        &mut self,
        measure_type: &str,
        value: f64,
        unit: EntityId,
    ) -> EntityId {
        self.push(
            "IFCMEASUREWITHUNIT",
            format!(
                "{},{}",
                encode::typed_real(measure_type, value),
                encode::reference(unit)
            ),
        )
    }

    pub fn conversion_based_unit(
        &mut self,
        dimensions: EntityId,
        unit_type: &str,
        name: &str,
        conversion_factor: EntityId,
    ) -> EntityId {
        self.push(
            "IFCCONVERSIONBASEDUNIT",
            format!(
                "{},{},{},{}",
                encode::reference(dimensions),
                encode::enumeration(unit_type),
                encode::string(name),
                encode::reference(conversion_factor)
            ),
        )
    }

    pub fn unit_assignment(&mut self, units: &[EntityId]) -> EntityId {
        self.push("IFCUNITASSIGNMENT", encode::ref_list(units))
    }

    // ========================================================================
    // Ownership boilerplate
    // ========================================================================

    pub fn person(&mut self, family_name: Option<&str>) -> EntityId {
        self.push(
            "IFCPERSON",
            format!("$,{},$,$,$,$,$,$", encode::opt_string(family_name)),
        )
    }

    pub fn organization(&mut self, name: &str) -> EntityId {
        self.push("IFCORGANIZATION", format!("$,{},$,$,$", encode::string(name)))
    }

    pub fn person_and_organization(
        &mut self,
        person: EntityId,
        organization: EntityId,
    ) -> EntityId {
        self.push(
            "IFCPERSONANDORGANIZATION",
            format!(
                "{},{},$",
                encode::reference(person),
                encode::reference(organization)
            ),
        )
    }

    pub fn application(
        &mut self,
        developer: EntityId,
        version: &str,
        full_name: &str,
        identifier: &str,
    ) -> EntityId {
        self.push(
            "IFCAPPLICATION",
            format!(
                "{},{},{},{}",
                encode::reference(developer),
                encode::string(version),
                encode::string(full_name),
                encode::string(identifier)
            ),
        )
    }

    pub fn owner_history(
        &mut self,
        owning_user: EntityId,
        owning_application: EntityId,
        creation_date: i64,
    ) -> EntityId {
        self.push(
            "IFCOWNERHISTORY",
            format!(
                "{},{},$,.ADDED.,$,$,$,{}",
                encode::reference(owning_user),
                encode::reference(owning_application),
                encode::integer(creation_date)
            ),
        )
    }

    // ========================================================================
    // Spatial structure
    // ========================================================================

    pub fn project(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        contexts: &[EntityId],
        units: EntityId,
    ) -> EntityId {
        self.push(
            "IFCPROJECT",
            format!(
                "{},{},{},$,$,$,$,{},{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::ref_list(contexts),
                encode::reference(units)
            ),
        )
    }

    pub fn site(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
    ) -> EntityId {
        self.push(
            "IFCSITE",
            format!(
                "{},{},{},$,$,{},$,$,.ELEMENT.,$,$,$,$,$",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::reference(placement)
            ),
        )
    }

    pub fn building(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
    ) -> EntityId {
        self.push(
            "IFCBUILDING",
            format!(
                "{},{},{},$,$,{},$,$,.ELEMENT.,$,$,$",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::reference(placement)
            ),
        )
    }

    pub fn building_storey(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        elevation: f64,
    ) -> EntityId {
        self.push(
            "IFCBUILDINGSTOREY",
            format!(
                "{},{},{},$,$,{},$,$,.ELEMENT.,{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::reference(placement),
                encode::real(elevation)
            ),
        )
    }

    // ========================================================================
    // Building elements
    // ========================================================================

    /// Shared attribute layout of the 9-attribute element family
    fn element_attrs(
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
        predefined_type: &str,
    ) -> String {
        format!(
            "{},{},{},$,$,{},{},$,{}",
            encode::string(guid),
            encode::reference(owner_history),
            encode::string(name),
            encode::reference(placement),
            encode::reference(shape),
            encode::enumeration(predefined_type)
        )
    }

    pub fn wall(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
    ) -> EntityId {
        let attrs = Self::element_attrs(guid, owner_history, name, placement, shape, "STANDARD");
        self.push("IFCWALL", attrs)
    }

    pub fn beam(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
    ) -> EntityId {
        let attrs = Self::element_attrs(guid, owner_history, name, placement, shape, "BEAM");
        self.push("IFCBEAM", attrs)
    }

    pub fn column(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
    ) -> EntityId {
        let attrs = Self::element_attrs(guid, owner_history, name, placement, shape, "COLUMN");
        self.push("IFCCOLUMN", attrs)
    }

    pub fn slab(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
    ) -> EntityId {
        let attrs = Self::element_attrs(guid, owner_history, name, placement, shape, "FLOOR");
        self.push("IFCSLAB", attrs)
    }

    pub fn pile(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
    ) -> EntityId {
        // IfcPile carries a trailing ConstructionType attribute
        let attrs = Self::element_attrs(guid, owner_history, name, placement, shape, "BORED");
        self.push("IFCPILE", format!("{},$", attrs))
    }

    pub fn grid(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
        u_axes: &[EntityId],
        v_axes: &[EntityId],
    ) -> EntityId {
        self.push(
            "IFCGRID",
            format!(
                "{},{},{},$,$,{},{},{},{},$,$",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::reference(placement),
                encode::reference(shape),
                encode::ref_list(u_axes),
                encode::ref_list(v_axes)
            ),
        )
    }

    pub fn grid_axis(&mut self, tag: &str, curve: EntityId, same_sense: bool) -> EntityId {
        self.push(
            "IFCGRIDAXIS",
            format!(
                "{},{},{}",
                encode::string(tag),
                encode::reference(curve),
                encode::boolean(same_sense)
            ),
        )
    }

    pub fn annotation(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        placement: EntityId,
        shape: EntityId,
    ) -> EntityId {
        self.push(
            "IFCANNOTATION",
            format!(
                "{},{},{},$,$,{},{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::reference(placement),
                encode::reference(shape)
            ),
        )
    }

    // ========================================================================
    // Type objects
    // ========================================================================

    /// Shared attribute layout of the 10-attribute element type family
    fn element_type_attrs(
        guid: &str,
        owner_history: EntityId,
        name: &str,
        predefined_type: &str,
    ) -> String {
        format!(
            "{},{},{},$,$,$,$,$,$,{}",
            encode::string(guid),
            encode::reference(owner_history),
            encode::string(name),
            encode::enumeration(predefined_type)
        )
    }

    pub fn wall_type(&mut self, guid: &str, owner_history: EntityId, name: &str) -> EntityId {
        let attrs = Self::element_type_attrs(guid, owner_history, name, "STANDARD");
        self.push("IFCWALLTYPE", attrs)
    }

    pub fn beam_type(&mut self, guid: &str, owner_history: EntityId, name: &str) -> EntityId {
        let attrs = Self::element_type_attrs(guid, owner_history, name, "BEAM");
        self.push("IFCBEAMTYPE", attrs)
    }

    pub fn slab_type(&mut self, guid: &str, owner_history: EntityId, name: &str) -> EntityId {
        let attrs = Self::element_type_attrs(guid, owner_history, name, "FLOOR");
        self.push("IFCSLABTYPE", attrs)
    }

    // ========================================================================
    // Materials
    // ========================================================================

    pub fn material(&mut self, name: &str) -> EntityId {
        self.push("IFCMATERIAL", format!("{},$,$", encode::string(name)))
    }

    pub fn material_layer(&mut self, material: EntityId, thickness: f64) -> EntityId {
        self.push(
            "IFCMATERIALLAYER",
            format!(
                "{},{},$,$,$,$,$",
                encode::reference(material),
                encode::real(thickness)
            ),
        )
    }

    pub fn material_layer_set(&mut self, layers: &[EntityId], name: &str) -> EntityId {
        self.push(
            "IFCMATERIALLAYERSET",
            format!("{},{},$", encode::ref_list(layers), encode::string(name)),
        )
    }

    pub fn material_layer_set_usage(&mut self, layer_set: EntityId, offset: f64) -> EntityId {
        self.push(
            "IFCMATERIALLAYERSETUSAGE",
            format!(
                "{},.AXIS2.,.POSITIVE.,{},$",
                encode::reference(layer_set),
                encode::real(offset)
            ),
        )
    }

    // ========================================================================
    // Properties and quantities
    // ========================================================================

    pub fn property_single_value(&mut self, name: &str, value: &PropertyValue) -> EntityId {
        self.push(
            "IFCPROPERTYSINGLEVALUE",
            format!("{},$,{},$", encode::string(name), value.encode()),
        )
    }

    pub fn property_set(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        properties: &[EntityId],
    ) -> EntityId {
        self.push(
            "IFCPROPERTYSET",
            format!(
                "{},{},{},$,{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::ref_list(properties)
            ),
        )
    }

    pub fn quantity_length(&mut self, name: &str, value: f64) -> EntityId {
        self.push(
            "IFCQUANTITYLENGTH",
            format!("{},$,$,{},$", encode::string(name), encode::real(value)),
        )
    }

    pub fn quantity_area(&mut self, name: &str, value: f64) -> EntityId {
        self.push(
            "IFCQUANTITYAREA",
            format!("{},$,$,{},$", encode::string(name), encode::real(value)),
        )
    }

    pub fn quantity_volume(&mut self, name: &str, value: f64) -> EntityId {
        self.push(
            "IFCQUANTITYVOLUME",
            format!("{},$,$,{},$", encode::string(name), encode::real(value)),
        )
    }

    pub fn element_quantity(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        name: &str,
        quantities: &[EntityId],
    ) -> EntityId {
        self.push(
            "IFCELEMENTQUANTITY",
            format!(
                "{},{},{},$,$,{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::string(name),
                encode::ref_list(quantities)
            ),
        )
    }

    // ========================================================================
    // Relationships
    // ========================================================================

    pub fn rel_aggregates(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        relating: EntityId,
        related: &[EntityId],
    ) -> EntityId {
        self.push(
            "IFCRELAGGREGATES",
            format!(
                "{},{},$,$,{},{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::reference(relating),
                encode::ref_list(related)
            ),
        )
    }

    pub fn rel_contained_in_spatial_structure(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        elements: &[EntityId],
        structure: EntityId,
    ) -> EntityId {
        self.push(
            "IFCRELCONTAINEDINSPATIALSTRUCTURE",
            format!(
                "{},{},$,$,{},{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::ref_list(elements),
                encode::reference(structure)
            ),
        )
    }

    pub fn rel_defines_by_type(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        objects: &[EntityId],
        relating_type: EntityId,
    ) -> EntityId {
        self.push(
            "IFCRELDEFINESBYTYPE",
            format!(
                "{},{},$,$,{},{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::ref_list(objects),
                encode::reference(relating_type)
            ),
        )
    }

    pub fn rel_defines_by_properties(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        objects: &[EntityId],
        property_set: EntityId,
    ) -> EntityId {
        self.push(
            "IFCRELDEFINESBYPROPERTIES",
            format!(
                "{},{},$,$,{},{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::ref_list(objects),
                encode::reference(property_set)
            ),
        )
    }

    pub fn rel_associates_material(
        &mut self,
        guid: &str,
        owner_history: EntityId,
        objects: &[EntityId],
        material: EntityId,
    ) -> EntityId {
        self.push(
            "IFCRELASSOCIATESMATERIAL",
            format!(
                "{},{},$,$,{},{}",
                encode::string(guid),
                encode::reference(owner_history),
                encode::ref_list(objects),
                encode::reference(material)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_monotonic() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.current(), 0);
        assert_eq!(ids.next(), EntityId(1));
        assert_eq!(ids.next(), EntityId(2));
        assert_eq!(ids.current(), 2);
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let mut graph = EntityGraph::new();
        let p1 = graph.cartesian_point_2d(0.0, 0.0);
        let p2 = graph.cartesian_point_2d(1.0, 1.0);
        let line = graph.polyline(&[p1, p2]);
        assert_eq!(p1, EntityId(1));
        assert_eq!(p2, EntityId(2));
        assert_eq!(line, EntityId(3));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_point_formatting() {
        let mut graph = EntityGraph::new();
        graph.cartesian_point_3d(0.0, 5000.0, -2.5);
        let entity = &graph.entities()[0];
        assert_eq!(entity.type_name, "IFCCARTESIANPOINT");
        assert_eq!(entity.attributes, "(0.0,5000.0,-2.5)");
    }

    #[test]
    fn test_polyline_references_points() {
        let mut graph = EntityGraph::new();
        let a = graph.cartesian_point_2d(0.0, 0.0);
        let b = graph.cartesian_point_2d(100.0, 0.0);
        graph.polyline(&[a, b]);
        assert_eq!(graph.entities()[2].attributes, "(#1,#2)");
    }

    #[test]
    fn test_si_unit_prefix() {
        let mut graph = EntityGraph::new();
        graph.si_unit("LENGTHUNIT", Some("MILLI"), "METRE");
        graph.si_unit("AREAUNIT", None, "SQUARE_METRE");
        assert_eq!(graph.entities()[0].attributes, "*,.LENGTHUNIT.,.MILLI.,.METRE.");
        assert_eq!(graph.entities()[1].attributes, "*,.AREAUNIT.,$,.SQUARE_METRE.");
    }

    #[test]
    fn test_wall_attribute_layout() {
        let mut graph = EntityGraph::new();
        let origin = graph.cartesian_point_3d(0.0, 0.0, 0.0);
        let axis = graph.axis2_placement_3d(origin, None, None);
        let placement = graph.local_placement(None, axis);
        let shape = graph.product_definition_shape(&[]);
        let wall = graph.wall("guid22chars0000000000a", EntityId(1000), "Wall", placement, shape);
        let entity = &graph.entities()[wall.0 as usize - 1];
        assert_eq!(entity.type_name, "IFCWALL");
        assert!(entity.attributes.ends_with(",$,.STANDARD."));
        assert!(entity.attributes.starts_with("'guid22chars0000000000a',#1000,'Wall'"));
    }

    #[test]
    fn test_property_value_encoding() {
        assert_eq!(
            PropertyValue::Label("x".into()).encode(),
            "IFCLABEL('x')"
        );
        assert_eq!(PropertyValue::Real(1.0).encode(), "IFCREAL(1.0)");
        assert_eq!(PropertyValue::Boolean(true).encode(), "IFCBOOLEAN(.T.)");
    }

    #[test]
    fn test_trimmed_curve_parameters() {
        let mut graph = EntityGraph::new();
        let center = graph.cartesian_point_2d(0.0, 0.0);
        let position = graph.axis2_placement_2d(center, None);
        let circle = graph.circle(position, 500.0);
        graph.trimmed_curve(circle, 0.0, 1.5707963267948966);
        let entity = &graph.entities()[3];
        assert!(entity
            .attributes
            .contains("(IFCPARAMETERVALUE(0.0)),(IFCPARAMETERVALUE(1.5707963267948966))"));
    }
}
