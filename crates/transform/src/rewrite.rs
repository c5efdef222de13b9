// Rewrite buffer
//
// A per-file text buffer addressed by ORIGINAL byte offsets. Committed
// edits shift the underlying text, so the buffer maps original offsets
// through the accumulated deltas on every operation. A new edit may
// fully contain earlier edits (a post-order parent replacing a span whose
// children were already rewritten) but partial overlap is a conflict,
// reported as an error and never applied.

use parser::ast::Span;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// The requested range partially overlaps a committed edit.
    Conflict { span: Span },
    /// The requested range does not lie inside the original text.
    OutOfBounds { span: Span },
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::Conflict { span } => {
                write!(f, "edit {}..{} conflicts with a previous edit", span.start, span.end)
            }
            RewriteError::OutOfBounds { span } => {
                write!(f, "edit {}..{} is outside the source text", span.start, span.end)
            }
        }
    }
}

impl std::error::Error for RewriteError {}

#[derive(Debug, Clone)]
struct Edit {
    start: usize,
    end: usize,
    new_len: usize,
}

impl Edit {
    fn delta(&self) -> isize {
        self.new_len as isize - (self.end - self.start) as isize
    }
}

#[derive(Debug, Clone)]
pub struct RewriteBuffer {
    original: String,
    text: String,
    /// Committed edits in original coordinates, sorted by start,
    /// pairwise disjoint.
    edits: Vec<Edit>,
}

impl RewriteBuffer {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let text = original.clone();
        Self {
            original,
            text,
            edits: Vec::new(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn has_changes(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Map an original offset into the current text. None if the offset
    /// falls strictly inside a committed edit.
    fn map_offset(&self, offset: usize) -> Option<usize> {
        let mut delta: isize = 0;
        for e in &self.edits {
            if e.end <= offset {
                delta += e.delta();
            } else if e.start < offset {
                return None;
            }
        }
        Some((offset as isize + delta) as usize)
    }

    /// Current text spanned by an original range, with any contained
    /// edits already applied. This is how a post-order parent observes
    /// the rewritten text of its operands.
    pub fn text_for(&self, span: &Span) -> Option<&str> {
        if span.end > self.original.len() || span.start > span.end {
            return None;
        }
        let start = self.map_offset(span.start)?;
        let end = self.map_offset(span.end)?;
        self.text.get(start..end)
    }

    /// Replace an original byte range with new text. Fails without
    /// modifying anything when the range partially overlaps a committed
    /// edit or leaves the original text.
    pub fn replace(&mut self, span: Span, replacement: &str) -> Result<(), RewriteError> {
        if span.end > self.original.len()
            || span.start > span.end
            || self.original.get(span.clone()).is_none()
        {
            return Err(RewriteError::OutOfBounds { span });
        }

        // Every committed edit must be disjoint from, or contained in,
        // the incoming range
        for e in &self.edits {
            let disjoint = e.end <= span.start || e.start >= span.end;
            let contained = span.start <= e.start && e.end <= span.end;
            if !disjoint && !contained {
                return Err(RewriteError::Conflict { span });
            }
        }

        let start = self
            .map_offset(span.start)
            .ok_or(RewriteError::Conflict { span: span.clone() })?;
        let end = self
            .map_offset(span.end)
            .ok_or(RewriteError::Conflict { span: span.clone() })?;

        self.text.replace_range(start..end, replacement);

        // Contained edits are superseded by the new one; edits that are
        // merely adjacent (including insertions at the boundary) survive
        self.edits.retain(|e| {
            let disjoint = e.end <= span.start || e.start >= span.end;
            let contained = span.start <= e.start && e.end <= span.end;
            disjoint || !contained
        });
        let insert_at = self
            .edits
            .iter()
            .position(|e| e.start >= span.end)
            .unwrap_or(self.edits.len());
        self.edits.insert(
            insert_at,
            Edit {
                start: span.start,
                end: span.end,
                new_len: replacement.len(),
            },
        );
        Ok(())
    }

    /// Insert text before an original offset without replacing anything.
    pub fn insert_before(&mut self, offset: usize, text: &str) -> Result<(), RewriteError> {
        self.replace(offset..offset, text)
    }
}
