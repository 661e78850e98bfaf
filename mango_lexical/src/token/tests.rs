use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use lazy_static::lazy_static;
use mango_base::{
    diagnostic::{Counter, Storage},
    source_file::Buffer,
};
use mango_test::input::{assert_lexeme, Input};
use proptest::{
    prelude::Arbitrary,
    prop_assert, prop_assert_eq, prop_oneof, proptest,
    strategy::{BoxedStrategy, Just, Strategy},
    test_runner::{TestCaseError, TestCaseResult},
};
use strum::IntoEnumIterator;

use super::{KeywordKind, TokenKind};

/// Represents an input for a [`TokenKind::Name`] token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    /// The valid name string.
    pub string: String,
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.string) }
}

impl Arbitrary for Name {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[A-Za-z_][A-Za-z0-9_]{0,12}"
            .prop_filter_map("filter out names that are spelled as a keyword", |x| {
                if KeywordKind::from_str(x.as_ref()).is_ok() {
                    None
                } else {
                    Some(Self { string: x })
                }
            })
            .boxed()
    }
}

/// Represents an input for a [`TokenKind::Let`] token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword {
    /// The kind of keyword.
    pub keyword: KeywordKind,
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword.as_str())
    }
}

impl Arbitrary for Keyword {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        lazy_static! {
            static ref KEYWORDS: Vec<KeywordKind> = KeywordKind::iter().collect();
        }

        proptest::sample::select(KEYWORDS.as_slice())
            .prop_map(|kind| Self { keyword: kind })
            .boxed()
    }
}

/// Represents an input for a [`TokenKind::Number`] token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number {
    /// The digit run, possibly with leading zeroes.
    pub digits: String,
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.digits) }
}

impl Arbitrary for Number {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            proptest::num::u64::ANY.prop_map(|x| x.to_string()),
            "[0-9]{1,30}",
        ]
        .prop_map(|digits| Self { digits })
        .boxed()
    }
}

/// Represents an input for a terminated [`TokenKind::String`] token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringLiteral {
    /// The content of the literal (without the quotes).
    pub body: String,
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('"')?;
        f.write_str(&self.body)?;
        f.write_char('"')
    }
}

impl Arbitrary for StringLiteral {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        "[^\"]{0,16}".prop_map(|body| Self { body }).boxed()
    }
}

/// Represents an input for a single-byte operator/punctuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuation {
    /// The punctuation character.
    pub punctuation: char,
}

impl Display for Punctuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.punctuation)
    }
}

impl Arbitrary for Punctuation {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        const PUNCTUATIONS: &[char] = &['(', ')', '%', '.', '/', '*', '=', '-', '+'];

        proptest::sample::select(PUNCTUATIONS)
            .prop_map(|punctuation| Self { punctuation })
            .boxed()
    }
}

/// Represents an input for a single-byte [`TokenKind::Error`] token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unrecognized {
    /// The ASCII character that does not start any token.
    pub character: char,
}

impl Display for Unrecognized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.character)
    }
}

impl Arbitrary for Unrecognized {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::char::range('\0', '\x7f')
            .prop_filter_map("allows only bytes that start no token", |x| {
                let is_recognized = x.is_ascii_alphanumeric()
                    || matches!(x, '_' | ' ' | '\n' | '"')
                    || TokenKind::from_punctuation(x as u8).is_some();

                (!is_recognized).then_some(Self { character: x })
            })
            .boxed()
    }
}

/// Represents an input for a [`TokenKind::Whitespace`] token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Whitespace {
    /// The number of spaces.
    pub count: u8,
}

impl Display for Whitespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.count {
            f.write_char(' ')?;
        }

        Ok(())
    }
}

impl Arbitrary for Whitespace {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1u8..8).prop_map(|count| Self { count }).boxed()
    }
}

/// Represents an input for a [`super::Token`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Token {
    Name(Name),
    Keyword(Keyword),
    Number(Number),
    String(StringLiteral),
    Punctuation(Punctuation),
    Unrecognized(Unrecognized),
    Whitespace(Whitespace),
    Line,
}

impl Token {
    /// Gets the kind of token this input is expected to lex into.
    pub fn expected_kind(&self) -> TokenKind {
        match self {
            Self::Name(_) => TokenKind::Name,
            Self::Keyword(k) => k.keyword.into(),
            Self::Number(_) => TokenKind::Number,
            Self::String(_) => TokenKind::String,
            Self::Punctuation(p) => TokenKind::from_punctuation(p.punctuation as u8)
                .expect("generated from the punctuation set"),
            Self::Unrecognized(_) => TokenKind::Error,
            Self::Whitespace(_) => TokenKind::Whitespace,
            Self::Line => TokenKind::Line,
        }
    }
}

impl Arbitrary for Token {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Name::arbitrary().prop_map(Self::Name),
            Keyword::arbitrary().prop_map(Self::Keyword),
            Number::arbitrary().prop_map(Self::Number),
            StringLiteral::arbitrary().prop_map(Self::String),
            Punctuation::arbitrary().prop_map(Self::Punctuation),
            Unrecognized::arbitrary().prop_map(Self::Unrecognized),
            Whitespace::arbitrary().prop_map(Self::Whitespace),
            Just(Self::Line),
        ]
        .boxed()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(x) => Display::fmt(x, f),
            Self::Keyword(x) => Display::fmt(x, f),
            Self::Number(x) => Display::fmt(x, f),
            Self::String(x) => Display::fmt(x, f),
            Self::Punctuation(x) => Display::fmt(x, f),
            Self::Unrecognized(x) => Display::fmt(x, f),
            Self::Whitespace(x) => Display::fmt(x, f),
            Self::Line => f.write_char('\n'),
        }
    }
}

impl Input<&super::Token> for &Token {
    /// Verifies that the given [`super::Token`] has the expected kind and covers exactly the text
    /// of this input.
    fn assert(self, output: &super::Token, source: &[u8]) -> TestCaseResult {
        if output.kind != self.expected_kind() {
            return Err(TestCaseError::fail(format!(
                "expected {self:?} got {output:?}",
            )));
        }

        assert_lexeme(source, output.start, output.end, self.to_string().as_bytes())
    }
}

fn lex_single(source: &[u8]) -> Result<(super::Token, usize), TestCaseError> {
    let buffer = Buffer::new(source);
    let mut iterator = buffer.iter();

    let counter = Counter::default();
    let token = super::Token::lex(&mut iterator, &counter)?;

    // the whole input makes up a single token
    prop_assert!(iterator.is_end());

    Ok((token, counter.count()))
}

proptest! {
    #[test]
    fn token_test(
        input in Token::arbitrary()
    ) {
        let source = input.to_string();
        let (token, diagnostics) = lex_single(source.as_bytes())?;

        input.assert(&token, source.as_bytes())?;
        prop_assert_eq!(token.line, 1);
        prop_assert_eq!(diagnostics, usize::from(token.kind == TokenKind::Error));
    }

    #[test]
    fn unterminated_string_test(
        body in "[^\"]{0,16}"
    ) {
        let source = format!("\"{body}");
        let (token, diagnostics) = lex_single(source.as_bytes())?;

        prop_assert_eq!(token.kind, TokenKind::Error);
        prop_assert_eq!(token.start, 0);
        prop_assert_eq!(token.end, source.len());
        prop_assert_eq!(diagnostics, 1);
    }

    #[test]
    fn non_ascii_byte_test(
        byte in 0x80u8..=0xff
    ) {
        let (token, diagnostics) = lex_single(&[byte])?;

        prop_assert_eq!(token.kind, TokenKind::Error);
        prop_assert_eq!(token.len(), 1);
        prop_assert_eq!(diagnostics, 1);
    }
}

#[test]
fn keyword_precision() {
    for (source, kind) in [
        ("let", TokenKind::Let),
        ("lett", TokenKind::Name),
        ("Let", TokenKind::Name),
        ("_let", TokenKind::Name),
        ("letx", TokenKind::Name),
        ("let_", TokenKind::Name),
        ("let1", TokenKind::Name),
    ] {
        let (token, _) = lex_single(source.as_bytes()).unwrap();
        assert_eq!(token.kind, kind, "{source}");
        assert_eq!(token.len(), source.len());
    }
}

#[test]
fn lex_stops_at_the_end_of_the_iterator() {
    let buffer = Buffer::new("");
    let mut iterator = buffer.iter();

    assert_eq!(
        super::Token::lex(&mut iterator, &Counter::default()),
        Err(super::Error::EndOfSourceCodeIteratorArgument)
    );
}

#[test]
fn unrecognized_character_is_reported() {
    let buffer = Buffer::new("\t");
    let mut iterator = buffer.iter();

    let storage: Storage<crate::error::Error> = Storage::new();
    let token = super::Token::lex(&mut iterator, &storage).unwrap();
    assert_eq!(token.kind, TokenKind::Error);

    let diagnostics = storage.into_vec();
    assert_eq!(diagnostics.len(), 1);

    let diagnostic = diagnostics[0].as_unrecognized_character().unwrap();
    assert_eq!(diagnostic.span.bytes(), b"\t");
    assert!(diagnostic.to_string().contains("`\\t`"));
}

#[test]
fn line_token_belongs_to_the_line_it_ends() {
    let buffer = Buffer::new("\n\nx");
    let mut iterator = buffer.iter();
    let counter = Counter::default();

    let lines: Vec<_> = std::iter::from_fn(|| super::Token::lex(&mut iterator, &counter).ok())
        .map(|token| (token.kind, token.line))
        .collect();

    assert_eq!(
        lines,
        vec![
            (TokenKind::Line, 1),
            (TokenKind::Line, 2),
            (TokenKind::Name, 3)
        ]
    );
}

#[test]
fn token_kind_display() {
    assert_eq!(TokenKind::LeftParen.to_string(), "LEFT_PAREN");
    assert_eq!(TokenKind::Eof.to_string(), "EOF");
    assert_eq!(TokenKind::Whitespace.to_string(), "WHITESPACE");
    assert_eq!(TokenKind::from(KeywordKind::Let).to_string(), "LET");
}

#[test]
fn semicolon_is_not_punctuation() {
    assert_eq!(TokenKind::from_punctuation(b';'), None);
    assert_eq!(TokenKind::from_punctuation(b'#'), None);
    assert_eq!(TokenKind::from_punctuation(b'+'), Some(TokenKind::Plus));
}

#[test]
fn text_and_span() {
    let buffer = Buffer::new("let x");
    let token = super::Token::new(TokenKind::Name, 4, 5, 1);

    assert_eq!(super::text(&buffer, &token), b"x");
    assert_eq!(token.text(&buffer), b"x");

    let span = token.span(&buffer).unwrap();
    assert_eq!(span.bytes(), b"x");

    let foreign = super::Token::new(TokenKind::Name, 4, 9, 1);
    assert!(foreign.span(&buffer).is_none());
}
