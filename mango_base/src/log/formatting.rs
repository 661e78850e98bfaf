//! Contains the ANSI escape codes used to style text printed to the terminal.

use std::fmt::Display;

/// Is implemented by everything that maps to a single SGR (Select Graphic Rendition) parameter.
pub trait Ansi: Copy {
    /// Gets the SGR parameter of the attribute.
    fn code(self) -> &'static str;

    /// Applies the attribute to the given displayable object.
    fn with<T>(self, display: T) -> Styled<T> {
        Styled {
            code: self.code(),
            display,
        }
    }
}

/// Represents a style that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Underline,
}

impl Ansi for Style {
    fn code(self) -> &'static str {
        match self {
            Self::Bold => "1",
            Self::Underline => "4",
        }
    }
}

/// Represents a foreground color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Cyan,
}

impl Ansi for Color {
    fn code(self) -> &'static str {
        match self {
            Self::Red => "31",
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Cyan => "36",
        }
    }
}

/// Is a displayable object wrapped in an ANSI attribute, reset right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Styled<T> {
    code: &'static str,
    display: T,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1B[{}m{}\x1B[0m", self.code, self.display)
    }
}
