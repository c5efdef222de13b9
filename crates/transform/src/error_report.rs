// Error reporting with Ariadne for the transformation engine
//
// Renders the engine's collected diagnostics as colored reports. The
// plain-text rendering in diagnostics.rs stays available for logs and
// tests; this is the human-facing variant the CLI prints.

use crate::diagnostics::{DiagnosticLevel, DiagnosticSink};
use ariadne::{Color, Label, Report, ReportKind, Source};
use parser::source::SourceFile;

/// Print every collected diagnostic as an Ariadne report on stderr.
pub fn report_diagnostics(sink: &DiagnosticSink, source: &SourceFile) {
    let filename = source.name();
    for diagnostic in sink.iter() {
        let (code, color) = match diagnostic.level {
            DiagnosticLevel::Note => ("E200", Color::Cyan),
            DiagnosticLevel::Warning => ("E201", Color::Yellow),
            DiagnosticLevel::Error => ("E202", Color::Red),
            DiagnosticLevel::Fatal => ("E203", Color::Red),
        };
        let kind = match diagnostic.level {
            DiagnosticLevel::Note => ReportKind::Advice,
            DiagnosticLevel::Warning => ReportKind::Warning,
            DiagnosticLevel::Error | DiagnosticLevel::Fatal => ReportKind::Error,
        };
        let offset = diagnostic.span.as_ref().map(|s| s.start).unwrap_or(0);

        let report = Report::build(kind, filename, offset)
            .with_code(code)
            .with_message(diagnostic.message.clone());

        let report = if let Some(span) = &diagnostic.span {
            report.with_label(
                Label::new((filename, span.clone()))
                    .with_message(diagnostic.message.clone())
                    .with_color(color),
            )
        } else {
            report
        };

        let report = diagnostic
            .hints
            .iter()
            .fold(report, |r, hint| r.with_help(hint.clone()));

        report
            .finish()
            .eprint((filename, Source::from(source.text())))
            .unwrap();
    }
}
