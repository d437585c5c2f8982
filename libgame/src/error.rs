use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleFormatError {
    #[error("rule {0:?} is missing the '/' between birth and survival conditions")]
    MissingSeparator(String),

    #[error("rule {rule:?}: expected '{expected}', found {found:?}")]
    UnexpectedPrefix {
        rule: String,
        expected: char,
        found: Option<char>,
    },

    #[error("rule {rule:?}: {character:?} is not a neighbour count digit")]
    InvalidDigit { rule: String, character: char },
}

/// Malformed pattern content. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternFormatError {
    #[error("pattern contains no live cells")]
    Empty,

    #[error("line {line}: expected two integer coordinates, got {content:?}")]
    InvalidCoordinates { line: usize, content: String },

    #[error("line {line}: invalid RLE header {content:?}")]
    InvalidHeader { line: usize, content: String },

    #[error("missing RLE header")]
    MissingHeader,

    #[error("line {line}: unexpected character {character:?}")]
    UnexpectedCharacter { line: usize, character: char },

    #[error("line {line}: run count without a cell tag")]
    DanglingCount { line: usize },

    #[error("RLE data is not terminated by '!'")]
    MissingTerminator,

    #[error("live cell ({x}, {y}) lies outside the declared {width}x{height} extent")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("pattern bounding box exceeds {max} cells per side")]
    TooLarge { max: usize },

    #[error("invalid rule in pattern header")]
    InvalidRule(#[from] RuleFormatError),
}

#[derive(Debug, Error)]
pub enum PatternReadError {
    #[error("couldn't read pattern file")]
    Io(#[from] io::Error),

    #[error("unsupported pattern file extension {0:?}")]
    UnsupportedFormat(String),

    #[error("malformed pattern file")]
    Format(#[from] PatternFormatError),
}
