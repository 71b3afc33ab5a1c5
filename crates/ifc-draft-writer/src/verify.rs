// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parse-back verification of generated files
//!
//! Re-scans a generated file and proves the structural invariants the writer
//! relies on: ISO-10303-21 framing, contiguous entity ids starting at 1, no
//! dangling references, strictly backward references, and lexically valid
//! numeric tokens. Generation is infallible by design, so a verification
//! failure always means a writer defect; the test-suite runs every scenario
//! through here.

use ifc_draft_model::{EntityId, VerifyError};
use memchr::memchr;
use nom::{
    character::complete::{char, multispace0},
    bytes::complete::take_while1,
    IResult, Parser,
};
use rustc_hash::FxHashSet;

/// Statistics from a successful verification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileCheck {
    /// Entities found in the DATA section
    pub entity_count: usize,
    /// Total `#N` references across all attribute lists
    pub reference_count: usize,
}

/// Verify a generated file
pub fn check(content: &str) -> Result<FileCheck, VerifyError> {
    if !content.trim_start().starts_with("ISO-10303-21;") {
        return Err(VerifyError::framing("missing ISO-10303-21 prologue"));
    }
    if !content.trim_end().ends_with("END-ISO-10303-21;") {
        return Err(VerifyError::framing("missing END-ISO-10303-21 epilogue"));
    }
    for marker in ["HEADER;", "FILE_SCHEMA", "ENDSEC;", "DATA;"] {
        if !content.contains(marker) {
            return Err(VerifyError::framing(format!("missing {marker} section")));
        }
    }

    let data_start = content.find("DATA;").expect("checked above") + "DATA;".len();
    let data_end = content[data_start..]
        .find("ENDSEC;")
        .map(|p| data_start + p)
        .ok_or_else(|| VerifyError::framing("DATA section is not closed"))?;

    let mut entities: Vec<(u32, Vec<u32>)> = Vec::new();
    let mut reference_count = 0usize;
    let mut scanner = EntityScanner::new(&content[data_start..data_end]);
    while let Some((line, slice)) = scanner.next_entity() {
        let (id, attrs) = parse_entity_line(slice)
            .map_err(|message| VerifyError::malformed(line, message))?;
        let refs = scan_attributes(EntityId(id), attrs)?;
        reference_count += refs.len();
        entities.push((id, refs));
    }

    // Id contiguity: exactly {1..=count}, no repeats
    let mut seen = FxHashSet::default();
    let mut highest = 0u32;
    for (id, _) in &entities {
        if !seen.insert(*id) {
            return Err(VerifyError::DuplicateId(EntityId(*id)));
        }
        highest = highest.max(*id);
    }
    if highest as usize != entities.len() {
        return Err(VerifyError::NonContiguousIds {
            expected: entities.len(),
            highest,
        });
    }

    // Every reference resolves, strictly backwards
    for (id, refs) in &entities {
        for reference in refs {
            if !seen.contains(reference) {
                return Err(VerifyError::DanglingReference {
                    entity: EntityId(*id),
                    reference: EntityId(*reference),
                });
            }
            if reference >= id {
                return Err(VerifyError::ForwardReference {
                    entity: EntityId(*id),
                    reference: EntityId(*reference),
                });
            }
        }
    }

    Ok(FileCheck {
        entity_count: entities.len(),
        reference_count,
    })
}

// ============================================================================
// Entity scanning
// ============================================================================

/// Walks `#id=TYPE(...);` records inside the DATA section
///
/// Uses `memchr` to hop between `#` characters and tracks string state so
/// semicolons inside quoted text do not terminate an entity early.
struct EntityScanner<'a> {
    content: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> EntityScanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            pos: 0,
            line: 0,
        }
    }

    /// Next entity as (ordinal, full `#...;` slice without the semicolon)
    fn next_entity(&mut self) -> Option<(usize, &'a str)> {
        let bytes = self.content.as_bytes();
        while self.pos < bytes.len() {
            let hash = memchr(b'#', &bytes[self.pos..])?;
            self.pos += hash;

            let at_line_start = self.pos == 0
                || bytes[self.pos - 1] == b'\n'
                || bytes[self.pos - 1] == b'\r'
                || bytes[self.pos - 1] == b';';
            if !at_line_start {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            let end = self.find_entity_end()?;
            self.line += 1;
            return Some((self.line, &self.content[start..end]));
        }
        None
    }

    /// Find the terminating semicolon, skipping quoted strings
    fn find_entity_end(&mut self) -> Option<usize> {
        let bytes = self.content.as_bytes();
        let mut in_string = false;
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\'' => in_string = !in_string,
                b';' if !in_string => {
                    let end = self.pos;
                    self.pos += 1;
                    return Some(end);
                }
                _ => {}
            }
            self.pos += 1;
        }
        None
    }
}

/// Parse `#id=TYPE(attrs)` and return the id plus the attribute slice
fn parse_entity_line(slice: &str) -> Result<(u32, &str), String> {
    let (rest, id) = entity_header(slice).map_err(|_| "expected #id=TYPE(".to_string())?;
    if !rest.ends_with(')') {
        return Err("attribute list is not closed".to_string());
    }
    Ok((id, &rest[..rest.len() - 1]))
}

/// nom parser for the `#id=TYPE(` prefix
fn entity_header(input: &str) -> IResult<&str, u32> {
    let (input, _) = char('#')(input)?;
    let (input, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    let (input, _) = (multispace0, char('='), multispace0).parse(input)?;
    let (input, _type_name) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('(')(input)?;
    Ok((input, digits.parse().unwrap_or(0)))
}

/// Extract references and validate numeric tokens in an attribute list
fn scan_attributes(entity: EntityId, attrs: &str) -> Result<Vec<u32>, VerifyError> {
    let bytes = attrs.as_bytes();
    let mut refs = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\'' => {
                // Skip the string body; doubled quotes stay inside it
                pos += 1;
                while pos < bytes.len() {
                    if bytes[pos] == b'\'' {
                        if pos + 1 < bytes.len() && bytes[pos + 1] == b'\'' {
                            pos += 2;
                            continue;
                        }
                        break;
                    }
                    pos += 1;
                }
                pos += 1;
            }
            b'#' => {
                pos += 1;
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                let id: u32 = attrs[start..pos].parse().unwrap_or(0);
                refs.push(id);
            }
            b'-' | b'0'..=b'9' => {
                let start = pos;
                pos += 1;
                while pos < bytes.len() && is_numeric_byte(bytes[pos]) {
                    pos += 1;
                }
                // Enum names may carry digits (".AXIS2." scans as "2."), so a
                // trailing period alone is not an error
                let token = attrs[start..pos].trim_end_matches('.');
                if !token.is_empty() && lexical_core::parse::<f64>(token.as_bytes()).is_err() {
                    return Err(VerifyError::InvalidReal {
                        entity,
                        token: token.to_string(),
                    });
                }
            }
            _ => pos += 1,
        }
    }
    Ok(refs)
}

fn is_numeric_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'.' | b'e' | b'E' | b'+' | b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(data: &str) -> String {
        format!(
            "ISO-10303-21;\nHEADER;\nFILE_SCHEMA(('IFC4'));\nENDSEC;\nDATA;\n{}ENDSEC;\nEND-ISO-10303-21;\n",
            data
        )
    }

    #[test]
    fn test_valid_file() {
        let content = wrap(
            "#1=IFCCARTESIANPOINT((0.0,0.0));\n#2=IFCCARTESIANPOINT((1.0,0.0));\n#3=IFCPOLYLINE((#1,#2));\n",
        );
        let stats = check(&content).unwrap();
        assert_eq!(stats.entity_count, 3);
        assert_eq!(stats.reference_count, 2);
    }

    #[test]
    fn test_missing_prologue() {
        let result = check("DATA;\nENDSEC;\n");
        assert!(matches!(result, Err(VerifyError::InvalidFraming(_))));
    }

    #[test]
    fn test_forward_reference() {
        let content = wrap("#1=IFCPOLYLINE((#2));\n#2=IFCCARTESIANPOINT((0.0,0.0));\n");
        assert!(matches!(
            check(&content),
            Err(VerifyError::ForwardReference { .. })
        ));
    }

    #[test]
    fn test_dangling_reference() {
        let content = wrap("#1=IFCCARTESIANPOINT((0.0,0.0));\n#2=IFCPOLYLINE((#1,#9));\n");
        assert!(matches!(
            check(&content),
            Err(VerifyError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let content = wrap("#1=IFCCARTESIANPOINT((0.0,0.0));\n#1=IFCCARTESIANPOINT((1.0,0.0));\n");
        assert!(matches!(check(&content), Err(VerifyError::DuplicateId(_))));
    }

    #[test]
    fn test_gap_in_ids() {
        let content = wrap("#1=IFCCARTESIANPOINT((0.0,0.0));\n#3=IFCCARTESIANPOINT((1.0,0.0));\n");
        assert!(matches!(
            check(&content),
            Err(VerifyError::NonContiguousIds { .. })
        ));
    }

    #[test]
    fn test_invalid_real_token() {
        let content = wrap("#1=IFCCARTESIANPOINT((1.2.3,0.0));\n");
        assert!(matches!(check(&content), Err(VerifyError::InvalidReal { .. })));
    }

    #[test]
    fn test_references_inside_strings_ignored() {
        let content = wrap("#1=IFCORGANIZATION($,'see #99 for details',$,$,$);\n");
        let stats = check(&content).unwrap();
        assert_eq!(stats.entity_count, 1);
        assert_eq!(stats.reference_count, 0);
    }

    #[test]
    fn test_semicolon_inside_string() {
        let content = wrap("#1=IFCORGANIZATION($,'a;b',$,$,$);\n#2=IFCPERSONANDORGANIZATION(#1,#1,$);\n");
        let stats = check(&content).unwrap();
        assert_eq!(stats.entity_count, 2);
        assert_eq!(stats.reference_count, 2);
    }
}
