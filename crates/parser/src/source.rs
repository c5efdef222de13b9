// Source file handle: exact text slicing by byte span, line/column
// mapping for diagnostics, and system-header region bookkeeping.
//
// Header membership is a property of byte regions registered on the file.
// A plain single-file run registers none; a driver that inlines library
// headers (or a test) registers the inlined region so the engine can skip
// it, mirroring a compiler source manager's is-in-system-header query.

use crate::ast::Span;

#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    text: String,
    system_regions: Vec<Span>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            system_regions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Exact source text for a byte span, None if out of bounds.
    pub fn text_for(&self, span: &Span) -> Option<&str> {
        self.text.get(span.clone())
    }

    /// Register a byte region that belongs to a library/system header.
    pub fn mark_system_region(&mut self, span: Span) {
        self.system_regions.push(span);
    }

    pub fn is_in_system_header(&self, offset: usize) -> bool {
        self.system_regions
            .iter()
            .any(|r| r.start <= offset && offset < r.end)
    }

    /// 1-based (line, column) of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let before = &self.text[..offset];
        let line = before.matches('\n').count() + 1;
        let col = offset - before.rfind('\n').map(|p| p + 1).unwrap_or(0) + 1;
        (line, col)
    }

    /// The full text of the line containing a byte offset, without its
    /// newline; used for diagnostic snippets.
    pub fn line_text(&self, offset: usize) -> &str {
        let offset = offset.min(self.text.len());
        let start = self.text[..offset].rfind('\n').map(|p| p + 1).unwrap_or(0);
        let end = self.text[offset..]
            .find('\n')
            .map(|p| offset + p)
            .unwrap_or(self.text.len());
        &self.text[start..end]
    }

    /// "file:line:col" rendering of a byte offset.
    pub fn format_location(&self, offset: usize) -> String {
        let (line, col) = self.line_col(offset);
        format!("{}:{}:{}", self.name, line, col)
    }
}
