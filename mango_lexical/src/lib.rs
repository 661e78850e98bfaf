//! This crate implements the lexical analysis phase of the Mango front end. This phase is
//! responsible for tokenizing a source [`Buffer`] into a flat sequence of tokens.
//!
//! The final output of this phase is a [`token_stream::TokenStream`]: every byte of the buffer is
//! covered by exactly one token, and the stream always ends with a zero-width
//! [`token::TokenKind::Eof`] token.
//!
//! [`Buffer`]: mango_base::source_file::Buffer

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

use std::sync::Arc;

use mango_base::{diagnostic::Dummy, source_file::Buffer};

pub mod error;
pub mod token;
pub mod token_stream;

pub use token::text;

/// Tokenizes the given buffer, discarding the lexical diagnostics.
///
/// Unrecognized input is still represented in the stream as [`token::TokenKind::Error`] tokens.
/// Use [`token_stream::TokenStream::tokenize`] to receive the diagnostics as well.
///
/// # Errors
/// - [`token_stream::Error::AllocationFailure`]: the token storage could not be grown.
pub fn tokenize(buffer: &Arc<Buffer>) -> Result<token_stream::TokenStream, token_stream::Error> {
    token_stream::TokenStream::tokenize(buffer, &Dummy)
}
