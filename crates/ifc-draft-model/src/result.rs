// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation result returned by the writer

use serde::{Deserialize, Serialize};

/// Result of one IFC generation call
///
/// The caller persists `content` to disk (or hands it to a download); the
/// counts are surfaced in the UI after export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Complete ISO-10303-21 file text
    pub content: String,
    /// Number of entities in the DATA section
    pub entity_count: usize,
    /// Size of `content` in bytes
    pub file_size: usize,
}

impl GenerationResult {
    /// Wrap generated file text, deriving the byte size
    pub fn new(content: String, entity_count: usize) -> Self {
        let file_size = content.len();
        Self {
            content,
            entity_count,
            file_size,
        }
    }
}
