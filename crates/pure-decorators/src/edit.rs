//! Text splices against an immutable source buffer.
//!
//! Edits are recorded with offsets into the original text and applied in
//! descending offset order, so no edit ever has to account for the length
//! changes introduced by another.

use std::ops::Range;

use anyhow::{Result, bail};

/// Replaces `range` of the original text with `replacement`.
///
/// Deletion is an empty replacement, insertion an empty range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            replacement: String::new(),
        }
    }

    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }

    fn conflicts_with(&self, other: &TextEdit) -> bool {
        self.range.start == other.range.start
            || (self.range.start < other.range.end && other.range.start < self.range.end)
    }
}

/// A set of non-overlapping edits.
#[derive(Debug, Default)]
pub struct EditSet {
    edits: Vec<TextEdit>,
}

impl EditSet {
    pub fn push(&mut self, edit: TextEdit) -> Result<()> {
        if edit.range.start > edit.range.end {
            bail!("invalid edit range {:?}", edit.range);
        }
        if let Some(existing) = self.edits.iter().find(|e| e.conflicts_with(&edit)) {
            bail!(
                "edit at {:?} overlaps edit at {:?}",
                edit.range,
                existing.range
            );
        }
        self.edits.push(edit);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every edit to a copy of `source`.
    pub fn apply(mut self, source: &str) -> Result<String> {
        self.edits
            .sort_unstable_by(|a, b| b.range.start.cmp(&a.range.start));

        let mut output = source.to_string();
        for edit in self.edits {
            let Range { start, end } = edit.range;
            if end > source.len() || !source.is_char_boundary(start) || !source.is_char_boundary(end)
            {
                bail!("edit range {start}..{end} is not valid for the source");
            }
            output.replace_range(start..end, &edit.replacement);
        }
        Ok(output)
    }
}
