//! opcheck_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Rules produce plain message strings from the templates in [`messages`];
//! the checker wraps them into [`Diagnostic`] values carrying a file, a span
//! and the message code, and accumulates them in a [`DiagnosticCollection`].

use opcheck_core::text::TextSpan;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 2001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Expand this template with positional arguments.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The source text span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info (global diagnostic).
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self::from_text(message, message.format(args))
    }

    /// Wrap already-resolved message text produced from `message`.
    pub fn from_text(message: &DiagnosticMessage, message_text: String) -> Self {
        Self {
            file: None,
            span: None,
            message_text,
            code: message.code,
            category: message.category,
        }
    }

    /// Attach the source span the diagnostic points at.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach the file the diagnostic belongs to.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Whether the diagnostic's category is `Error`.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} OC{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
///
/// Substitution is single-pass: argument text is copied verbatim, so an
/// argument containing `{1}` is never expanded again.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// A collection of diagnostics accumulated during analysis.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Whether any collected diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Number of collected errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Move all of `other`'s diagnostics into this collection.
    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort diagnostics by file and position. The sort is stable, so
    /// diagnostics at the same position keep their reporting order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            let a_pos = a.span.map(|s| s.start).unwrap_or(0);
            let b_pos = b.span.map(|s| s.start).unwrap_or(0);
            a_pos.cmp(&b_pos)
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Operator rules (2000-2099)
    // ========================================================================
    pub const BINARY_OPERATION_0_BETWEEN_1_AND_2_RESULTS_IN_AN_ERROR: DiagnosticMessage =
        diag!(2001, Error, "Binary operation \"{0}\" between {1} and {2} results in an error.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' expected.", &[";"]), "';' expected.");
        assert_eq!(format_message("{1} and {0}", &["a", "b"]), "b and a");
    }

    #[test]
    fn test_format_message_does_not_expand_arguments() {
        let text = format_message("{0} / {1}", &["'{1}'", "int"]);
        assert_eq!(text, "'{1}' / int");
    }

    #[test]
    fn test_format_message_keeps_unmatched_braces() {
        assert_eq!(format_message("array{x} {5}", &["a"]), "array{x} {5}");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(
            &messages::BINARY_OPERATION_0_BETWEEN_1_AND_2_RESULTS_IN_AN_ERROR,
            &["+", "array", "int"],
        )
        .with_file("unit.php")
        .with_span(TextSpan::new(4, 9));
        assert_eq!(
            diag.to_string(),
            "unit.php(4): error OC2001: Binary operation \"+\" between array and int results in an error."
        );
    }

    #[test]
    fn test_sort_by_file_then_position() {
        let msg = &messages::BINARY_OPERATION_0_BETWEEN_1_AND_2_RESULTS_IN_AN_ERROR;
        let mut collection = DiagnosticCollection::new();
        assert!(!collection.has_errors());
        collection.add(Diagnostic::new(msg, &[]).with_file("b").with_span(TextSpan::new(1, 1)));
        collection.add(Diagnostic::new(msg, &[]).with_file("a").with_span(TextSpan::new(9, 1)));
        collection.add(Diagnostic::new(msg, &[]).with_file("a").with_span(TextSpan::new(2, 1)));
        collection.sort();
        let order: Vec<_> = collection
            .diagnostics()
            .iter()
            .map(|d| (d.file.clone().unwrap_or_default(), d.span.map(|s| s.start)))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a".to_string(), Some(2)),
                ("a".to_string(), Some(9)),
                ("b".to_string(), Some(1)),
            ]
        );
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 3);
    }
}
