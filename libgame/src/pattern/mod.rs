//! Pattern file import.
//!
//! Every format parses into the same dense [`Pattern`], cropped to the
//! bounding box of its live cells.

use std::{fs, path::Path, str::FromStr};

use strum::{Display, EnumString};

use crate::{
    board::TileState,
    error::{PatternFormatError, PatternReadError},
    pos::Position,
    rule::Rule,
};

mod common;
mod life106;
mod plaintext;
mod rle;

pub use common::MAX_PATTERN_SIDE;

/// Supported formats, named after their file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum PatternFormat {
    /// Life 1.06 coordinate list.
    #[strum(to_string = "life", serialize = "lif")]
    Life106,

    /// Run-length encoded.
    #[strum(to_string = "rle")]
    Rle,

    /// Plaintext character grid.
    #[strum(to_string = "cells")]
    Plaintext,
}

impl PatternFormat {
    pub fn from_path<P>(path: P) -> Result<Self, PatternReadError>
    where
        P: AsRef<Path>,
    {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();

        Self::from_str(extension)
            .map_err(|_| PatternReadError::UnsupportedFormat(extension.to_owned()))
    }
}

/// An imported shape. `(0, 0)` is the top-left corner of its bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,
    tiles: Vec<TileState>,
    rule: Option<Rule>,
}

impl Pattern {
    pub fn parse(format: PatternFormat, text: &str) -> Result<Self, PatternFormatError> {
        match format {
            PatternFormat::Life106 => life106::parse(text),
            PatternFormat::Rle => rle::parse(text),
            PatternFormat::Plaintext => plaintext::parse(text),
        }
    }

    /// Reads a pattern file, choosing the format by its extension.
    pub fn read<P>(path: P) -> Result<Self, PatternReadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = PatternFormat::from_path(path)?;
        let text = fs::read_to_string(path)?;

        Ok(Self::parse(format, &text)?)
    }

    /// Builds a pattern from the absolute coordinates of its live cells.
    pub fn from_coordinates<I>(coordinates: I) -> Result<Self, PatternFormatError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        common::normalize(coordinates)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The rule declared by the pattern file, if its format carries one.
    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    pub fn is_alive<P>(&self, pos: P) -> bool
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();
        x < self.width && y < self.height && self.tiles[x + y * self.width] == TileState::Alive
    }

    pub fn enumerate_tiles(&self) -> impl Iterator<Item = (Position, TileState)> {
        self.tiles.iter().enumerate().map(|(index, tile)| {
            let pos = Position::new(index % self.width, index / self.width);
            (pos, *tile)
        })
    }

    pub fn alive_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| **tile == TileState::Alive)
            .count()
    }

    fn with_rule(mut self, rule: Option<Rule>) -> Self {
        self.rule = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extensions() {
        assert_eq!(
            PatternFormat::from_path("glider.life").unwrap(),
            PatternFormat::Life106
        );
        assert_eq!(
            PatternFormat::from_path("dir/glider.LIF").unwrap(),
            PatternFormat::Life106
        );
        assert_eq!(
            PatternFormat::from_path("gun.rle").unwrap(),
            PatternFormat::Rle
        );
        assert_eq!(
            PatternFormat::from_path("pulsar.cells").unwrap(),
            PatternFormat::Plaintext
        );

        assert!(matches!(
            PatternFormat::from_path("notes.txt"),
            Err(PatternReadError::UnsupportedFormat(extension)) if extension == "txt"
        ));
        assert!(matches!(
            PatternFormat::from_path("no_extension"),
            Err(PatternReadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn format_names_are_extensions() {
        assert_eq!(PatternFormat::Life106.to_string(), "life");
        assert_eq!(PatternFormat::Plaintext.to_string(), "cells");
    }

    #[test]
    fn from_coordinates_translates_to_origin() {
        let pattern = Pattern::from_coordinates([(-3, 10), (-1, 12), (-2, 11)]).unwrap();

        assert_eq!((pattern.width(), pattern.height()), (3, 3));
        assert!(pattern.is_alive((0, 0)));
        assert!(pattern.is_alive((1, 1)));
        assert!(pattern.is_alive((2, 2)));
        assert!(!pattern.is_alive((2, 0)));
        assert!(!pattern.is_alive((3, 3)));
        assert_eq!(pattern.alive_count(), 3);
        assert_eq!(pattern.rule(), None);
    }

    #[test]
    fn each_format_parses_the_same_glider() {
        let life = "#Life 1.06\n1 0\n2 1\n0 2\n1 2\n2 2\n";
        let rle = "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";
        let cells = "!Name: Glider\n.O.\n..O\nOOO\n";

        let from_life = Pattern::parse(PatternFormat::Life106, life).unwrap();
        let from_rle = Pattern::parse(PatternFormat::Rle, rle).unwrap();
        let from_cells = Pattern::parse(PatternFormat::Plaintext, cells).unwrap();

        assert_eq!(from_rle.rule(), Some(&Rule::default()));
        assert_eq!(from_life, from_cells);
        assert_eq!(
            from_life.enumerate_tiles().collect::<Vec<_>>(),
            from_rle.enumerate_tiles().collect::<Vec<_>>()
        );
    }
}
