//! Contains the [`Buffer`] type, the immutable source text that the lexer scans.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    fs::File,
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use memmap::{Mmap, MmapOptions};
use thiserror::Error;

/// Represents an error that occurs when loading/creating a [`Buffer`].
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

enum Content {
    Mapped(Mmap),
    Owned(Box<[u8]>),
}

impl Content {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Mapped(mapped) => &mapped[..],
            Self::Owned(owned) => &owned[..],
        }
    }
}

/// Represents an immutable, fixed-length sequence of bytes holding source text.
///
/// The buffer is shared through an [`Arc`]; tokens and spans refer into it by byte offsets and
/// never copy its content. Any byte sequence is accepted, no particular encoding is required.
pub struct Buffer {
    content: Content,
    full_path: Option<PathBuf>,

    /// Byte ranges of every line, each one including its terminating `\n`.
    lines: Vec<Range<usize>>,
}

impl Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("full_path", &self.full_path)
            .field("len", &self.len())
            .field("lines", &self.lines)
            .finish()
    }
}

impl Buffer {
    fn from_content(content: Content, full_path: Option<PathBuf>) -> Arc<Self> {
        let lines = get_line_byte_positions(content.bytes());
        Arc::new(Self {
            content,
            full_path,
            lines,
        })
    }

    /// Creates an in-memory buffer holding the given bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Arc<Self> {
        Self::from_content(Content::Owned(bytes.into().into_boxed_slice()), None)
    }

    /// Loads the buffer from the given file by mapping it to memory.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when reading the metadata of or mapping the file.
    pub fn load(file: File, path: PathBuf) -> Result<Arc<Self>, Error> {
        // mapping a zero-length file fails on most platforms
        let content = if file.metadata()?.len() == 0 {
            Content::Owned(Box::default())
        } else {
            Content::Mapped(unsafe { MmapOptions::new().map(&file)? })
        };

        Ok(Self::from_content(content, Some(path)))
    }

    /// Creates a temporary file, writes the given displayable object to it, and loads it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("mango")
            .suffix(".mango")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        let path = tempfile.path().to_owned();

        Self::load(tempfile.into_file(), path)
    }

    /// Gets the bytes that the buffer contains.
    #[must_use]
    pub fn content(&self) -> &[u8] { self.content.bytes() }

    /// Gets the number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize { self.content().len() }

    /// Returns `true` if the buffer contains no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.content().is_empty() }

    /// Gets the path of the file the buffer was loaded from, if any.
    #[must_use]
    pub fn full_path(&self) -> Option<&Path> { self.full_path.as_deref() }

    /// Gets the byte range of the line at the given line number (starts at 1).
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .cloned()
    }

    /// Gets the bytes of the line at the given line number (starts at 1), including the
    /// terminating `\n` if there is one.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&[u8]> {
        self.line_range(line).map(|range| &self.content()[range])
    }

    /// Gets the number of lines in the buffer.
    ///
    /// A buffer always has at least one (possibly empty) line.
    #[must_use]
    pub fn line_number(&self) -> usize { self.lines.len() }

    /// Gets the [`Iterator`] over the bytes of the buffer.
    #[must_use]
    pub fn iter<'a>(self: &'a Arc<Self>) -> Iterator<'a> {
        Iterator {
            buffer: self,
            offset: 0,
            line: 1,
        }
    }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// The index equal to the buffer length is valid and resolves to the position just past the
    /// last byte. Returns [`None`] for any index beyond that.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if byte_index > self.len() {
            return None;
        }

        // the last line is the only one allowed to end at the buffer length
        let line = if byte_index == self.len() {
            self.lines.len() - 1
        } else {
            self.lines
                .binary_search_by(|range| {
                    if range.contains(&byte_index) {
                        Ordering::Equal
                    } else if byte_index < range.start {
                        Ordering::Greater
                    } else {
                        Ordering::Less
                    }
                })
                .ok()?
        };

        Some(Location {
            line: line + 1,
            column: byte_index - self.lines[line].start + 1,
        })
    }
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Is a struct pointing to a particular location in a [`Buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The byte column of the location (starts at 1).
    pub column: usize,
}

/// Represents a half-open range of bytes in a [`Buffer`].
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the start byte index of the span.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: ByteIndex,

    /// Gets the buffer that the span is located in.
    #[get = "pub"]
    buffer: Arc<Buffer>,
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.bytes().escape_ascii().to_string())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_ptr_value = Arc::as_ptr(&self.buffer) as usize;
        let other_ptr_value = Arc::as_ptr(&other.buffer) as usize;

        self_ptr_value
            .cmp(&other_ptr_value)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.buffer).hash(state);
    }
}

impl Span {
    /// Creates a span from the given start and end byte indices in the buffer.
    ///
    /// Returns [`None`] if `start > end` or `end` lies beyond the end of the buffer.
    #[must_use]
    pub fn new(buffer: Arc<Buffer>, start: ByteIndex, end: ByteIndex) -> Option<Self> {
        if start > end || end > buffer.len() {
            return None;
        }

        Some(Self { start, end, buffer })
    }

    /// Creates a span from the given start byte index to the end of the buffer.
    #[must_use]
    pub fn to_end(buffer: Arc<Buffer>, start: ByteIndex) -> Option<Self> {
        let end = buffer.len();
        Self::new(buffer, start, end)
    }

    /// Gets the bytes of the buffer that the span covers.
    #[must_use]
    pub fn bytes(&self) -> &[u8] { &self.buffer.content()[self.start..self.end] }

    /// Gets the starting [`Location`] of the span.
    #[must_use]
    pub fn start_location(&self) -> Location {
        self.buffer
            .get_location(self.start)
            .expect("span start is validated on construction")
    }

    /// Gets the [`Location`] of the last byte the span covers, or of its start if it is empty.
    #[must_use]
    pub fn last_location(&self) -> Location {
        self.buffer
            .get_location(self.end.saturating_sub(1).max(self.start))
            .expect("span end is validated on construction")
    }
}

/// Is a cursor over the bytes of a [`Buffer`] that can be peeked at.
///
/// The cursor counts the lines it has walked through: the line number starts at 1 and increases
/// after every `\n` byte it yields.
#[derive(Debug, Clone, CopyGetters)]
pub struct Iterator<'a> {
    /// Gets the buffer that the iterator is iterating over.
    #[get_copy = "pub"]
    buffer: &'a Arc<Buffer>,

    /// Gets the byte index of the next byte to be yielded.
    #[get_copy = "pub"]
    offset: ByteIndex,

    /// Gets the line number that the next byte is located on.
    #[get_copy = "pub"]
    line: usize,
}

impl Iterator<'_> {
    /// Peeks at the next byte in the buffer.
    #[must_use]
    pub fn peek(&self) -> Option<(ByteIndex, u8)> {
        self.buffer
            .content()
            .get(self.offset)
            .map(|byte| (self.offset, *byte))
    }

    /// Returns `true` if every byte of the buffer has been yielded.
    #[must_use]
    pub fn is_end(&self) -> bool { self.offset >= self.buffer.len() }
}

impl std::iter::Iterator for Iterator<'_> {
    type Item = (ByteIndex, u8);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, byte) = self.peek()?;

        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
        }

        Some((index, byte))
    }
}

fn get_line_byte_positions(bytes: &[u8]) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    for (index, byte) in bytes.iter().enumerate() {
        if *byte == b'\n' {
            #[allow(clippy::range_plus_one)]
            results.push(current_position..index + 1);
            current_position = index + 1;
        }
    }

    results.push(current_position..bytes.len());

    results
}
