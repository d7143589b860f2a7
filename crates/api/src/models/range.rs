use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A position in source text. Lines and columns are both 0-based;
/// columns count bytes.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, JsonSchema,
)]
pub struct SourcePoint {
    pub line: usize,
    pub column: usize,
}

impl SourcePoint {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Half-open span `[start, end)` in source text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
pub struct SourceRange {
    pub start: SourcePoint,
    pub end: SourcePoint,
}

impl SourceRange {
    pub fn new(start: SourcePoint, end: SourcePoint) -> Self {
        Self { start, end }
    }

    pub fn from_coords(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: SourcePoint::new(start_line, start_col),
            end: SourcePoint::new(end_line, end_col),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when `other` lies entirely within this range.
    pub fn encloses(&self, other: &SourceRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_point(&self, point: SourcePoint) -> bool {
        self.start <= point && point < self.end
    }

    /// Number of lines spanned, counting a partially covered last line.
    pub fn line_span(&self) -> usize {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}
