//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr, sync::Arc};

use derive_new::new;
use lazy_static::lazy_static;
use mango_base::{
    diagnostic::Handler,
    source_file::{self, Buffer, ByteIndex, Span},
};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};
use thiserror::Error;

use crate::error::{self, UnrecognizedCharacter, UnterminatedString};

/// Is an enumeration representing the reserved keywords of the Mango language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Let,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_bytes(s.as_bytes()) }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Let => "let",
        }
    }

    /// Looks up the keyword whose spelling is exactly the given bytes.
    ///
    /// The comparison is case-sensitive and covers the whole slice, so `letx` or `Let` are not
    /// keywords.
    ///
    /// # Errors
    /// - [`KeywordParseError`]: the bytes do not spell any keyword.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeywordParseError> {
        lazy_static! {
            static ref BYTES_KEYWORD_MAP: HashMap<&'static [u8], KeywordKind> = {
                let mut map = HashMap::new();

                for keyword in KeywordKind::iter() {
                    map.insert(keyword.as_str().as_bytes(), keyword);
                }

                map
            };
        }
        BYTES_KEYWORD_MAP
            .get(bytes)
            .copied()
            .ok_or(KeywordParseError)
    }
}

/// Is an enumeration of every kind of token the lexer produces.
///
/// The [`Display`] implementation prints the upper-case name of the kind, e.g. `LEFT_PAREN`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// The `let` keyword.
    Let,

    /// A run of one or more space (`' '`) characters.
    Whitespace,

    /// A byte that does not start any token, or an unterminated string literal.
    Error,

    /// The zero-width token at the end of the buffer.
    Eof,

    /// `+`
    Plus,

    /// `-`
    Minus,

    /// `=`
    Eq,

    /// `*`
    Star,

    /// `/`
    Slash,

    /// `.`
    Dot,

    /// `%`
    Mod,

    /// An ASCII letter or `_` followed by ASCII letters, digits, or `_`.
    Name,

    /// A run of ASCII digits.
    Number,

    /// A single `\n`.
    Line,

    /// Everything from an opening `"` up to and including the next `"`.
    String,

    /// `(`
    LeftParen,

    /// `)`
    RightParen,

    /// `;`, reserved for the statement separator. The lexer does not produce it.
    Semicolon,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

impl From<KeywordKind> for TokenKind {
    fn from(keyword: KeywordKind) -> Self {
        match keyword {
            KeywordKind::Let => Self::Let,
        }
    }
}

impl TokenKind {
    /// Gets the kind of the single-byte operator or punctuation token the byte stands for.
    #[must_use]
    pub fn from_punctuation(byte: u8) -> Option<Self> {
        match byte {
            b'(' => Some(Self::LeftParen),
            b')' => Some(Self::RightParen),
            b'%' => Some(Self::Mod),
            b'.' => Some(Self::Dot),
            b'/' => Some(Self::Slash),
            b'*' => Some(Self::Star),
            b'=' => Some(Self::Eq),
            b'-' => Some(Self::Minus),
            b'+' => Some(Self::Plus),
            _ => None,
        }
    }
}

/// Represents a classified range of bytes in a [`Buffer`].
///
/// A token never owns its text; use [`Token::text`] with the buffer it was produced from to get
/// the lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Token {
    /// The kind of the token.
    pub kind: TokenKind,

    /// The byte index the token starts at.
    pub start: ByteIndex,

    /// The byte index right after the last byte of the token (exclusive).
    pub end: ByteIndex,

    /// The line of the token's first byte (starts at 1), counting every `\n` before it, including
    /// those inside string literals.
    pub line: usize,
}

/// Gets the lexeme of the given token, the `[start, end)` bytes of the buffer.
///
/// # Panics
/// The token was not produced from this buffer and its range lies outside of it.
#[must_use]
pub fn text<'a>(buffer: &'a Buffer, token: &Token) -> &'a [u8] {
    &buffer.content()[token.start..token.end]
}

impl Token {
    /// Gets the number of bytes the token covers.
    #[must_use]
    pub fn len(&self) -> usize { self.end - self.start }

    /// Returns `true` if the token covers no bytes, which only holds for
    /// [`TokenKind::Eof`].
    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }

    /// Gets the lexeme of the token. See [`text`].
    #[must_use]
    pub fn text<'a>(&self, buffer: &'a Buffer) -> &'a [u8] { text(buffer, self) }

    /// Gets the [`Span`] of the token in the given buffer.
    ///
    /// Returns [`None`] if the token's range does not fit in the buffer.
    #[must_use]
    pub fn span(&self, buffer: &Arc<Buffer>) -> Option<Span> {
        Span::new(buffer.clone(), self.start, self.end)
    }
}

/// Is an error that can occur when invoking the [`Token::lex`] method.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error,
)]
#[allow(missing_docs)]
pub enum Error {
    #[error("the iterator argument is at the end of the source code.")]
    EndOfSourceCodeIteratorArgument,
}

impl Token {
    /// Increments the iterator until the predicate returns false.
    fn walk_iter(iter: &mut source_file::Iterator, predicate: impl Fn(u8) -> bool) {
        while let Some((_, byte)) = iter.peek() {
            if !predicate(byte) {
                break;
            }

            iter.next();
        }
    }

    /// Creates a token from the given start index to the current position of the iterator.
    fn create(kind: TokenKind, start: ByteIndex, line: usize, iter: &source_file::Iterator) -> Self {
        Self::new(kind, start, iter.offset(), line)
    }

    /// Checks if the given byte is a valid first byte of a name.
    fn is_first_name_byte(byte: u8) -> bool { byte.is_ascii_alphabetic() || byte == b'_' }

    /// Checks if the given byte is a valid byte of a name.
    fn is_name_byte(byte: u8) -> bool { byte.is_ascii_alphanumeric() || byte == b'_' }

    fn handle_name_and_keyword(
        iter: &mut source_file::Iterator,
        start: ByteIndex,
        line: usize,
    ) -> Self {
        Self::walk_iter(iter, Self::is_name_byte);

        let word = &iter.buffer().content()[start..iter.offset()];

        // Checks if the word is a keyword
        let kind = KeywordKind::from_bytes(word).map_or(TokenKind::Name, TokenKind::from);

        Self::create(kind, start, line, iter)
    }

    fn handle_string(
        iter: &mut source_file::Iterator,
        start: ByteIndex,
        line: usize,
        handler: &dyn Handler<error::Error>,
    ) -> Self {
        // stops right after the closing quote, or at the end of the buffer
        let is_terminated = iter.any(|(_, byte)| byte == b'"');

        if is_terminated {
            Self::create(TokenKind::String, start, line, iter)
        } else {
            if let Some(span) = Span::to_end(iter.buffer().clone(), start) {
                handler.receive(UnterminatedString { span }.into());
            }

            Self::create(TokenKind::Error, start, line, iter)
        }
    }

    fn handle_unrecognized(
        iter: &mut source_file::Iterator,
        start: ByteIndex,
        line: usize,
        handler: &dyn Handler<error::Error>,
    ) -> Self {
        if let Some(span) = Span::new(iter.buffer().clone(), start, iter.offset()) {
            handler.receive(UnrecognizedCharacter { span }.into());
        }

        Self::create(TokenKind::Error, start, line, iter)
    }

    /// Lexes the source code from the given iterator.
    ///
    /// The tokenization starts at the current location of the iterator. The function moves the
    /// iterator at least once and forwards it until it makes a token. After the token is made, the
    /// iterator is left at the next byte that is not part of the token.
    ///
    /// Malformed input never fails: an unrecognized byte or an unterminated string literal is
    /// returned as a [`TokenKind::Error`] token and reported to the `handler`.
    ///
    /// # Errors
    /// - [`Error::EndOfSourceCodeIteratorArgument`] - The iterator argument is at the end of the
    ///   source code.
    pub fn lex(
        iter: &mut source_file::Iterator,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Self, Error> {
        // the token belongs to the line its first byte is on
        let line = iter.line();

        // Gets the first byte
        let (start, byte) = iter.next().ok_or(Error::EndOfSourceCodeIteratorArgument)?;

        // Found a single-byte operator/punctuation
        if let Some(kind) = TokenKind::from_punctuation(byte) {
            Ok(Self::create(kind, start, line, iter))
        }
        // Found a line break
        else if byte == b'\n' {
            Ok(Self::create(TokenKind::Line, start, line, iter))
        }
        // Found white spaces
        else if byte == b' ' {
            Self::walk_iter(iter, |byte| byte == b' ');
            Ok(Self::create(TokenKind::Whitespace, start, line, iter))
        }
        // Found string literal
        else if byte == b'"' {
            Ok(Self::handle_string(iter, start, line, handler))
        }
        // Found name/keyword
        else if Self::is_first_name_byte(byte) {
            Ok(Self::handle_name_and_keyword(iter, start, line))
        }
        // Found numeric literal
        else if byte.is_ascii_digit() {
            Self::walk_iter(iter, |byte| byte.is_ascii_digit());
            Ok(Self::create(TokenKind::Number, start, line, iter))
        } else {
            Ok(Self::handle_unrecognized(iter, start, line, handler))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
