// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP physical file assembly
//!
//! Emits the fixed ISO-10303-21 frame around the entity list: header with
//! file description, name/timestamp/authorship, and the IFC4 schema
//! declaration, then every entity in creation order, then the footer.

use crate::encode;
use crate::graph::EntityGraph;
use crate::WriterOptions;
use ifc_draft_model::GenerationResult;
use std::fmt::Write;

/// Assemble the final file text
pub(crate) fn assemble(graph: &EntityGraph, options: &WriterOptions) -> GenerationResult {
    let mut content = String::with_capacity(graph.len() * 64 + 512);

    let file_name = format!("{}.ifc", options.project_name);
    let preprocessor = format!(
        "{} {}",
        options.application_name, options.application_version
    );

    content.push_str("ISO-10303-21;\n");
    content.push_str("HEADER;\n");
    content.push_str(
        "FILE_DESCRIPTION(('ViewDefinition [DesignTransferView]','ExchangeRequirement [Architecture]'),'2;1');\n",
    );
    let _ = writeln!(
        content,
        "FILE_NAME({},{},{},{},{},{},'');",
        encode::string(&file_name),
        encode::string(&options.header_timestamp()),
        encode::string_list(&[options.author.as_str()]),
        encode::string_list(&[options.organization.as_str()]),
        encode::string(&preprocessor),
        encode::string(&options.application_name),
    );
    content.push_str("FILE_SCHEMA(('IFC4'));\n");
    content.push_str("ENDSEC;\n");
    content.push_str("DATA;\n");

    for entity in graph.entities() {
        let _ = writeln!(
            content,
            "#{}={}({});",
            entity.id.0, entity.type_name, entity.attributes
        );
    }

    content.push_str("ENDSEC;\n");
    content.push_str("END-ISO-10303-21;\n");

    GenerationResult::new(content, graph.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing() {
        let graph = EntityGraph::new();
        let options = WriterOptions::default();
        let result = assemble(&graph, &options);

        assert!(result.content.starts_with("ISO-10303-21;\n"));
        assert!(result.content.contains("HEADER;"));
        assert!(result.content.contains("FILE_SCHEMA(('IFC4'));"));
        assert!(result.content.contains("DATA;"));
        assert!(result.content.ends_with("END-ISO-10303-21;\n"));
        assert_eq!(result.entity_count, 0);
        assert_eq!(result.file_size, result.content.len());
    }

    #[test]
    fn test_entity_lines() {
        let mut graph = EntityGraph::new();
        graph.cartesian_point_2d(0.0, 0.0);
        let options = WriterOptions::default();
        let result = assemble(&graph, &options);
        assert!(result.content.contains("#1=IFCCARTESIANPOINT((0.0,0.0));\n"));
        assert_eq!(result.entity_count, 1);
    }

    #[test]
    fn test_pinned_timestamp_in_header() {
        use chrono::{TimeZone, Utc};
        let graph = EntityGraph::new();
        let options = WriterOptions {
            timestamp: Some(Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()),
            ..WriterOptions::default()
        };
        let result = assemble(&graph, &options);
        assert!(result.content.contains("'2026-03-14T09:26:53'"));
    }
}
