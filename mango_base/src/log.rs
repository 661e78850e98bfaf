//! Provides the functions related to logging/printing messages to the console.

use std::fmt::{Display, Write};

use derive_new::new;
use formatting::{Ansi, Color, Style};

use crate::source_file::{Buffer, Span};

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
            Severity::Info => Color::Green.with("[info]:"),
            Severity::Warning => Color::Yellow.with("[warning]:"),
        });

        let message_part = Style::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(number: usize) -> usize { number.checked_ilog10().map_or(1, |x| x as usize + 1) }

/// Writes a single source byte the way it is shown in a snippet.
///
/// Tabs expand to four spaces, line terminators are dropped, and anything that is not printable
/// ASCII is escaped.
fn write_byte(f: &mut impl Write, byte: u8) -> std::fmt::Result {
    match byte {
        b'\t' => f.write_str("    "),
        b'\n' | b'\r' => Ok(()),
        b' '..=b'~' => f.write_char(char::from(byte)),
        _ => write!(f, "{}", std::ascii::escape_default(byte)),
    }
}

/// Gets the number of columns [`write_byte`] occupies for the given byte.
fn byte_width(byte: u8) -> usize {
    match byte {
        b'\t' => 4,
        b'\n' | b'\r' => 0,
        b' '..=b'~' => 1,
        _ => std::ascii::escape_default(byte).len(),
    }
}

/// Structure implementing [`Display`] that prints the particular span of the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed.
    pub help_display: Option<T>,
}

impl<'a, T: Display> SourceCodeDisplay<'a, T> {
    fn buffer(&self) -> &'a Buffer { self.span.buffer() }

    fn write_gutter(f: &mut std::fmt::Formatter<'_>, width: usize, mark: &str) -> std::fmt::Result {
        write!(f, "{:width$} {} ", "", Style::Bold.with(Color::Cyan.with(mark)))
    }

    fn write_line_number(
        f: &mut std::fmt::Formatter<'_>,
        width: usize,
        line_number: usize,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {} ",
            Style::Bold.with(Color::Cyan.with(format!("{line_number:>width$}"))),
            Style::Bold.with(Color::Cyan.with("┃")),
        )
    }

    fn write_context_line(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        width: usize,
        line_number: usize,
    ) -> std::fmt::Result {
        let Some(line) = self.buffer().get_line(line_number) else {
            return Ok(());
        };

        Self::write_line_number(f, width, line_number)?;

        for byte in line {
            write_byte(f, *byte)?;
        }

        writeln!(f)
    }

    fn write_spanned_line(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        width: usize,
        line_number: usize,
    ) -> std::fmt::Result {
        let Some(range) = self.buffer().line_range(line_number) else {
            return Ok(());
        };

        Self::write_line_number(f, width, line_number)?;

        for index in range {
            let byte = self.buffer().content()[index];

            if (self.span.start()..self.span.end()).contains(&index) {
                let mut rendered = String::new();
                write_byte(&mut rendered, byte)?;

                write!(
                    f,
                    "{}",
                    Style::Underline.with(Style::Bold.with(Color::Red.with(rendered)))
                )?;
            } else {
                write_byte(f, byte)?;
            }
        }

        writeln!(f)
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start_location = self.span.start_location();
        let start_line = start_location.line;
        let end_line = self.span.last_location().line;
        let is_multiline = start_line != end_line;

        // when printing the source code, show the line before the span and the line after the span
        let width = get_digit(end_line + 1);

        // prints the source location
        writeln!(
            f,
            "{:width$}{} {}:{}:{}",
            "",
            Style::Bold.with(Color::Cyan.with("-->")),
            self.buffer()
                .full_path()
                .map_or_else(|| "<memory>".to_owned(), |path| path.display().to_string()),
            start_location.line,
            start_location.column
        )?;

        Self::write_gutter(f, width, "┃")?;
        writeln!(f)?;

        if start_line > 1 {
            self.write_context_line(f, width, start_line - 1)?;
        }

        for line_number in start_line..=end_line {
            self.write_spanned_line(f, width, line_number)?;
        }

        if let (Some(help), false) = (&self.help_display, is_multiline) {
            Self::write_gutter(f, width, "┃")?;

            // aligns the help message with the start of the span
            let line = self.buffer().get_line(start_line).unwrap_or_default();
            let indent: usize = line
                .iter()
                .take(start_location.column - 1)
                .map(|byte| byte_width(*byte))
                .sum();

            writeln!(f, "{:indent$}{}: {help}", "", Style::Bold.with("help"))?;
        }

        self.write_context_line(f, width, end_line + 1)?;

        Self::write_gutter(f, width, "┃")?;
        writeln!(f)?;

        if let (Some(help), true) = (&self.help_display, is_multiline) {
            Self::write_gutter(f, width, "=")?;
            writeln!(f, "{}: {help}", Style::Bold.with("help"))?;
        }

        Ok(())
    }
}
