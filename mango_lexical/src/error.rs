//! Contains all kinds of lexical diagnostics that can be reported while tokenizing the source
//! code.
//!
//! None of these stop the lexer: the offending bytes are still emitted as
//! [`crate::token::TokenKind::Error`] tokens, the diagnostics only describe them.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use mango_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

/// The source code contains a byte that does not start any token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnrecognizedCharacter {
    /// The span of the unrecognized byte.
    pub span: Span,
}

impl Display for UnrecognizedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!(
                    "found an unrecognized character `{}`",
                    self.span.bytes().escape_ascii()
                )
            ),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// The source code contains a `"` that is never closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnterminatedString {
    /// The span from the opening `"` to the end of the source code.
    pub span: Span,
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unterminated string literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some("this string literal is missing its closing `\"`")
            )
        )
    }
}

/// Is an enumeration containing all kinds of lexical diagnostics that can be reported while
/// tokenizing the source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnrecognizedCharacter(UnrecognizedCharacter),
    UnterminatedString(UnterminatedString),
}

impl Error {
    /// Gets the span of the source code the diagnostic points at.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnrecognizedCharacter(err) => &err.span,
            Self::UnterminatedString(err) => &err.span,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCharacter(err) => write!(f, "{err}"),
            Self::UnterminatedString(err) => write!(f, "{err}"),
        }
    }
}
