//! Contains the command line entry point of the Mango lexer.

use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

pub use clap::Parser;
use mango_base::{
    diagnostic::Printer,
    log::{Message, Severity},
    source_file::{self, Buffer},
};
use mango_lexical::token_stream::TokenStream;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "mango",
    about = "Mango language lexer.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The input file to tokenize.
    pub file: PathBuf,

    /// Prints out every token of the file, one per line.
    #[clap(long = "dump-tokens")]
    pub dump_tokens: bool,
}

fn report(argument: &Argument, error: impl std::fmt::Display) -> ExitCode {
    let msg = Message::new(
        Severity::Error,
        format!("{}: {error}", argument.file.display()),
    );

    eprintln!("{msg}");
    ExitCode::FAILURE
}

/// Writes one line per token: its line, byte range, kind, and escaped lexeme.
fn dump(out: &mut impl Write, buffer: &Buffer, token_stream: &TokenStream) -> io::Result<()> {
    for token in token_stream {
        writeln!(
            out,
            "{}:{}..{} {} \"{}\"",
            token.line,
            token.start,
            token.end,
            token.kind,
            token.text(buffer).escape_ascii()
        )?;
    }

    Ok(())
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Argument) -> ExitCode {
    let file = match File::open(&argument.file) {
        Ok(file) => file,
        Err(error) => return report(&argument, error),
    };

    let buffer = match Buffer::load(file, argument.file.clone()) {
        Ok(buffer) => buffer,
        Err(source_file::Error::IoError(error)) => return report(&argument, error),
    };

    let printer = Printer::new();

    let token_stream = match TokenStream::tokenize(&buffer, &printer) {
        Ok(token_stream) => token_stream,
        Err(error) => return report(&argument, error),
    };

    if argument.dump_tokens {
        if let Err(error) = dump(&mut io::stdout().lock(), &buffer, &token_stream) {
            return report(&argument, error);
        }
    }

    if printer.has_printed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
