//! Contains the code shared by every phase of the Mango front end: the source [`Buffer`], spans,
//! diagnostics handling, and console log output.
//!
//! [`Buffer`]: source_file::Buffer

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod diagnostic;
pub mod log;
pub mod source_file;
