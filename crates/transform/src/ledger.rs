// Range deduplication ledger
//
// At most one rewrite per exact source span per run. Keys are exact
// (begin, end) byte offsets: partial overlap is deliberately NOT merged,
// because an overlapping rewrite is an upstream logic error that must
// surface as a commit conflict rather than be silently absorbed.

use parser::ast::Span;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct RangeLedger {
    ranges: HashSet<(usize, usize)>,
}

impl RangeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_processed(&self, span: &Span) -> bool {
        self.ranges.contains(&(span.start, span.end))
    }

    /// Record a span as rewritten. Call only after a successful commit:
    /// a failed edit must stay retryable.
    pub fn mark_processed(&mut self, span: &Span) {
        self.ranges.insert((span.start, span.end));
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}
