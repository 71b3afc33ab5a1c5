// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ISO-10303-21 lexical encoding primitives
//!
//! Pure formatting of typed values into STEP tokens. These are total
//! functions: any finite input produces a valid token, and no primitive
//! performs validation beyond what its signature enforces.

use ifc_draft_model::EntityId;

/// The unset attribute token
pub const NULL: &str = "$";

/// The derived attribute token
pub const DERIVED: &str = "*";

/// Encode a string: single-quoted, embedded quotes doubled
pub fn string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Encode an optional string, `$` when absent
pub fn opt_string(value: Option<&str>) -> String {
    match value {
        Some(s) => string(s),
        None => NULL.to_string(),
    }
}

/// Encode a real number
///
/// STEP requires reals to be lexically distinguishable from integers, so
/// integral values are rendered with a trailing `.0`.
pub fn real(value: f64) -> String {
    let mut out = format!("{}", value);
    if !out.contains('.') && !out.contains('e') && !out.contains('E') {
        out.push_str(".0");
    }
    out
}

/// Encode an integer
pub fn integer(value: i64) -> String {
    value.to_string()
}

/// Encode a boolean as `.T.` / `.F.`
pub fn boolean(value: bool) -> &'static str {
    if value {
        ".T."
    } else {
        ".F."
    }
}

/// Encode an enumeration value, wrapping in dots
///
/// Idempotent: a value already wrapped is returned unchanged.
pub fn enumeration(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('.') && value.ends_with('.') {
        value.to_string()
    } else {
        format!(".{}.", value)
    }
}

/// Encode an entity reference
pub fn reference(id: EntityId) -> String {
    format!("#{}", id.0)
}

/// Encode an optional entity reference, `$` when absent
pub fn opt_reference(id: Option<EntityId>) -> String {
    match id {
        Some(id) => reference(id),
        None => NULL.to_string(),
    }
}

/// Encode a parenthesized list of entity references
pub fn ref_list(ids: &[EntityId]) -> String {
    let refs: Vec<String> = ids.iter().map(|id| reference(*id)).collect();
    format!("({})", refs.join(","))
}

/// Encode a parenthesized list of reals
pub fn real_list(values: &[f64]) -> String {
    let reals: Vec<String> = values.iter().map(|v| real(*v)).collect();
    format!("({})", reals.join(","))
}

/// Encode a parenthesized list of strings
pub fn string_list(values: &[&str]) -> String {
    let strings: Vec<String> = values.iter().map(|v| string(v)).collect();
    format!("({})", strings.join(","))
}

/// Encode a typed measure value, e.g. `IFCPARAMETERVALUE(1.5)`
pub fn typed_real(type_name: &str, value: f64) -> String {
    format!("{}({})", type_name, real(value))
}

/// Encode a typed string value, e.g. `IFCLABEL('Wall')`
pub fn typed_string(type_name: &str, value: &str) -> String {
    format!("{}({})", type_name, string(value))
}
