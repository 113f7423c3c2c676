//! Source position spans.

use serde::{Deserialize, Serialize};

/// A character span in a source file, with line information.
///
/// Spans are presentation data: the model carries them through so the
/// visualization can highlight entities, and the metrics engine reads the
/// line fields for size metrics. Offsets are character-based, as reported by
/// the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Character offset of the first character of the entity
    pub offset: u32,
    /// Number of characters covered
    pub length: u32,
    /// 1-based line of the first character
    pub start_line: u32,
    /// 1-based line of the last character
    pub end_line: u32,
}

impl SourceSpan {
    /// Create a span from offset/length and line bounds.
    pub fn new(offset: u32, length: u32, start_line: u32, end_line: u32) -> Self {
        Self {
            offset,
            length,
            start_line,
            end_line,
        }
    }

    /// Create a span covering a line range, without character offsets.
    pub fn lines(start_line: u32, end_line: u32) -> Self {
        Self {
            offset: 0,
            length: 0,
            start_line,
            end_line,
        }
    }

    /// Number of source lines covered: `end_line - start_line + 1`.
    pub fn line_count(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}
