//! Core data structures for line statistics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Classification of a single physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Whitespace only, outside any comment
    Blank,
    /// Only comment text (and whitespace)
    Comment,
    /// At least one byte of code
    Code,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LineKind::Blank => "blank",
            LineKind::Comment => "comment",
            LineKind::Code => "code",
        };
        f.write_str(s)
    }
}

/// Line counts for a single file, or a sum of files.
///
/// `lines` is the raw number of physical lines seen. Every line is recorded
/// under exactly one kind, so `lines == blank + comment + code` holds for any
/// tally built through [`FileTally::record`] or addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTally {
    /// Physical lines
    pub lines: u64,
    /// Whitespace-only lines
    pub blank: u64,
    /// Comment-only lines
    pub comment: u64,
    /// Lines carrying code
    pub code: u64,
}

impl FileTally {
    /// Create a tally with all zeros
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more line of the given kind.
    pub fn record(&mut self, kind: LineKind) {
        self.lines += 1;
        match kind {
            LineKind::Blank => self.blank += 1,
            LineKind::Comment => self.comment += 1,
            LineKind::Code => self.code += 1,
        }
    }

    /// Sum of the three classified counts
    pub fn total(&self) -> u64 {
        self.blank + self.comment + self.code
    }
}

impl Add for FileTally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            lines: self.lines + other.lines,
            blank: self.blank + other.blank,
            comment: self.comment + other.comment,
            code: self.code + other.code,
        }
    }
}

impl AddAssign for FileTally {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.blank += other.blank;
        self.comment += other.comment;
        self.code += other.code;
    }
}

/// Aggregated statistics for one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Number of files that were opened and classified
    pub file_count: u64,
    /// Sum of the per-file tallies
    pub totals: FileTally,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's tally into the aggregate.
    pub fn add_file(&mut self, tally: FileTally) {
        self.file_count += 1;
        self.totals += tally;
    }

    /// Total physical lines across all files
    pub fn lines(&self) -> u64 {
        self.totals.lines
    }

    /// Total code lines
    pub fn code(&self) -> u64 {
        self.totals.code
    }

    /// Total comment lines
    pub fn comment(&self) -> u64 {
        self.totals.comment
    }

    /// Total blank lines
    pub fn blank(&self) -> u64 {
        self.totals.blank
    }
}

impl Add for CountResult {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            file_count: self.file_count + other.file_count,
            totals: self.totals + other.totals,
        }
    }
}

impl AddAssign for CountResult {
    fn add_assign(&mut self, other: Self) {
        self.file_count += other.file_count;
        self.totals += other.totals;
    }
}
