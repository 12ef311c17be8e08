//! Error rendering using ariadne
//!
//! Renders [`ProgramError`]s with source snippets and a label pointing
//! at the offending token.

use crate::{ProgramError, ProgramErrorKind};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render a program error with an annotated snippet to stderr
///
/// # Example
/// ```ignore
/// use revpol::{Program, render_error};
///
/// match Program::parse("1 2 bogus +") {
///     Err(e) => render_error(&e),
///     Ok(_) => {}
/// }
/// ```
pub fn render_error(error: &ProgramError) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render a program error to a specific writer
///
/// This is useful when you want to control where the error is written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_error_to(error: &ProgramError, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render a program error to a String (useful for tests, web UIs, etc.)
pub fn render_error_to_string(error: &ProgramError) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render a program error to a String without color codes
///
/// This is the same as `render_error_to_string` but without ANSI color
/// codes, making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &ProgramError) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &ProgramError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    // Errors without a span (empty program, leftover operands) have no
    // token to point at; report against the whole source.
    let range = match &error.span {
        Some(span) => span.0.clone(),
        None => 0..error.source.len(),
    };

    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let message = error.kind.to_string();
    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, range.clone()))
        .with_message(&message)
        .with_config(ariadne::Config::default().with_color(use_color));

    let color = colors.next();
    report = report.with_label(
        Label::new((SOURCE_ID, range))
            .with_message(&message)
            .with_color(color),
    );

    if let Some(help) = help_for(&error.kind) {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(error.source.as_str())), &mut *writer)
}

fn help_for(kind: &ProgramErrorKind) -> Option<&'static str> {
    match kind {
        ProgramErrorKind::UnknownToken => {
            Some("expected a number or one of the operators + - * /")
        }
        ProgramErrorKind::Arithmetic { .. } => None,
        ProgramErrorKind::EmptyProgram => Some("type a postfix expression, e.g. `3 4 +`"),
        ProgramErrorKind::LeftoverOperands { .. } => {
            Some("a program must reduce to a single value; add operators or remove operands")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Program, eval_str};

    #[test]
    fn test_render_unknown_token() {
        let result = Program::parse("1 2 bogus +");

        assert!(result.is_err());
        if let Err(e) = result {
            let output = render_error_to_string_no_color(&e);

            // Should contain error indicator
            assert!(output.contains("Error") || output.contains("error"));
            // Should show the source
            assert!(output.contains("1 2 bogus +"));
        }
    }

    #[test]
    fn test_render_division_by_zero() {
        let result = eval_str("1 0 /");

        assert!(result.is_err());
        if let Err(e) = result {
            let output = render_error_to_string_no_color(&e);

            assert!(output.contains("division by zero"));
            assert!(output.contains("1 0 /"));
        }
    }

    #[test]
    fn test_render_spanless_error() {
        let result = eval_str("1 2 3 +");

        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.span.is_none());
            let output = render_error_to_string_no_color(&e);

            // Output should not be empty
            assert!(!output.is_empty());
            // Should be multi-line (ariadne adds formatting)
            assert!(output.lines().count() > 1);
        }
    }
}
