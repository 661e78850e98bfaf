//! Contains the [`TokenStream`] struct, the output of the lexical analysis phase.

use std::{collections::TryReserveError, ops::Index, sync::Arc};

use derive_more::Deref;
use mango_base::{diagnostic::Handler, source_file::Buffer};

use crate::{
    error,
    token::{self, Token, TokenKind},
};

/// The number of tokens the stream reserves room for when it first grows.
const INITIAL_CAPACITY: usize = 16;

/// Is an error that aborts [`TokenStream::tokenize`].
///
/// Malformed source code is never one of them; it is represented by [`TokenKind::Error`] tokens
/// in the stream instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("failed to allocate storage for the token stream: {0}")]
    AllocationFailure(#[from] TryReserveError),
}

/// Is an ordered list of the [`Token`]s of a buffer.
///
/// The tokens are contiguous: the first one starts at byte 0, each following one starts where the
/// previous one ends, and the last one is always a zero-width [`TokenKind::Eof`] token at the end
/// of the buffer. Concatenating the lexemes of all tokens yields the buffer content back.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the given buffer.
    ///
    /// This function tokenizes the buffer by calling the [`Token::lex()`] repeatedly until the
    /// buffer is exhausted, then appends the [`TokenKind::Eof`] token. Every
    /// [`TokenKind::Error`] token produced along the way is also reported to the `handler`.
    ///
    /// # Errors
    /// - [`Error::AllocationFailure`]: the token storage could not be grown.
    pub fn tokenize(
        buffer: &Arc<Buffer>,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Self, Error> {
        // list of tokens to return
        let mut tokens = Vec::new();
        let mut iterator = buffer.iter();

        loop {
            // Tokenizes the next token
            match Token::lex(&mut iterator, handler) {
                Ok(token) => Self::push(&mut tokens, token)?,
                Err(token::Error::EndOfSourceCodeIteratorArgument) => break,
            }
        }

        let end = iterator.offset();
        Self::push(
            &mut tokens,
            Token::new(TokenKind::Eof, end, end, iterator.line()),
        )?;

        Ok(Self { tokens })
    }

    fn push(tokens: &mut Vec<Token>, token: Token) -> Result<(), Error> {
        if tokens.len() == tokens.capacity() {
            tokens.try_reserve(tokens.len().max(INITIAL_CAPACITY))?;
        }

        tokens.push(token);
        Ok(())
    }

    /// Gets the kinds of the tokens, in order.
    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|token| token.kind)
    }

    /// Dissolves this struct into the underlying list of tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output { &self.tokens[index] }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter { self.tokens.iter() }
}
