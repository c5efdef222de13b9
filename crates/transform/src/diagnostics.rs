// Diagnostics sink
//
// Structured messages keyed by source location. Components create
// diagnostics; the sink owns them after append and never mutates them.
// Plain-text rendering follows the compiler convention
// "file:line:col: level: message"; the ariadne renderer in error_report
// produces the colored variant for the CLI.

use parser::ast::Span;
use parser::source::SourceFile;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Note,
    Warning,
    Error,
    Fatal,
}

impl DiagnosticLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticLevel::Note => "note",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Fatal => "fatal error",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub span: Option<Span>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: None,
            hints: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level >= DiagnosticLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == DiagnosticLevel::Warning
    }

    /// Plain one-block rendering: location prefix, message, the source
    /// line with a caret, then any hints.
    pub fn format(&self, source: &SourceFile) -> String {
        let mut out = String::new();
        match &self.span {
            Some(span) => {
                out.push_str(&source.format_location(span.start));
                out.push_str(": ");
            }
            None => {}
        }
        out.push_str(self.level.as_str());
        out.push_str(": ");
        out.push_str(&self.message);

        if let Some(span) = &self.span {
            let line = source.line_text(span.start);
            let (_, col) = source.line_col(span.start);
            out.push('\n');
            out.push_str(line);
            out.push('\n');
            out.push_str(&" ".repeat(col.saturating_sub(1)));
            out.push('^');
        }
        for hint in &self.hints {
            out.push('\n');
            out.push_str("  note: ");
            out.push_str(hint);
        }
        out
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn note(&mut self, message: impl Into<String>, span: Option<Span>) {
        let mut d = Diagnostic::new(DiagnosticLevel::Note, message);
        d.span = span;
        self.push(d);
    }

    pub fn warning(&mut self, message: impl Into<String>, span: Option<Span>) {
        let mut d = Diagnostic::new(DiagnosticLevel::Warning, message);
        d.span = span;
        self.push(d);
    }

    pub fn error(&mut self, message: impl Into<String>, span: Option<Span>) {
        let mut d = Diagnostic::new(DiagnosticLevel::Error, message);
        d.span = span;
        self.push(d);
    }

    pub fn fatal(&mut self, message: impl Into<String>, span: Option<Span>) {
        let mut d = Diagnostic::new(DiagnosticLevel::Fatal, message);
        d.span = span;
        self.push(d);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// "N error(s), M warning(s) generated" or "No issues found".
    pub fn summary(&self) -> String {
        let errors = self.error_count();
        let warnings = self.warning_count();
        if errors > 0 || warnings > 0 {
            format!("{} error(s), {} warning(s) generated", errors, warnings)
        } else {
            "No issues found".to_string()
        }
    }

    /// All diagnostics rendered as plain text, one block per message.
    pub fn render_all(&self, source: &SourceFile) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.format(source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
