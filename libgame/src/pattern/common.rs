use itertools::Itertools;

use crate::{board::TileState, error::PatternFormatError};

use super::Pattern;

/// Largest accepted bounding box side, in cells.
pub const MAX_PATTERN_SIDE: usize = 4096;

/// Non-blank lines not starting with `comment_prefix`, trimmed, with their
/// 1-based line numbers.
pub(super) fn content_lines(
    text: &str,
    comment_prefix: char,
) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(move |(_, line)| !line.is_empty() && !line.starts_with(comment_prefix))
}

/// Exactly two whitespace-separated integers.
pub(super) fn parse_coordinates(
    line_number: usize,
    line: &str,
) -> Result<(i64, i64), PatternFormatError> {
    let mut values = line.split_whitespace().map(str::parse::<i64>);

    match (values.next(), values.next(), values.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Ok((x, y)),
        _ => Err(PatternFormatError::InvalidCoordinates {
            line: line_number,
            content: line.to_owned(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct BoundingBox {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl BoundingBox {
    pub fn seed(x: i64, y: i64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    pub fn extend(mut self, x: i64, y: i64) -> Self {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self
    }

    pub fn width(&self) -> Result<usize, PatternFormatError> {
        side(self.min_x, self.max_x)
    }

    pub fn height(&self) -> Result<usize, PatternFormatError> {
        side(self.min_y, self.max_y)
    }

    /// Offset of `(x, y)` from the top-left corner. Only meaningful for
    /// coordinates inside the box.
    pub fn relative(&self, x: i64, y: i64) -> (usize, usize) {
        (
            x.abs_diff(self.min_x) as usize,
            y.abs_diff(self.min_y) as usize,
        )
    }
}

fn side(min: i64, max: i64) -> Result<usize, PatternFormatError> {
    max.abs_diff(min)
        .checked_add(1)
        .and_then(|side| usize::try_from(side).ok())
        .filter(|side| *side <= MAX_PATTERN_SIDE)
        .ok_or(PatternFormatError::TooLarge {
            max: MAX_PATTERN_SIDE,
        })
}

/// Dense pattern cropped to the bounding box of `coordinates`.
pub(super) fn normalize<I>(coordinates: I) -> Result<Pattern, PatternFormatError>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let coordinates = coordinates.into_iter().collect_vec();

    let (&(seed_x, seed_y), rest) = coordinates
        .split_first()
        .ok_or(PatternFormatError::Empty)?;

    let bounding_box = rest
        .iter()
        .fold(BoundingBox::seed(seed_x, seed_y), |bounding_box, &(x, y)| {
            bounding_box.extend(x, y)
        });

    let width = bounding_box.width()?;
    let height = bounding_box.height()?;

    let mut tiles = vec![TileState::Dead; width * height];
    for (x, y) in coordinates {
        let (x, y) = bounding_box.relative(x, y);
        tiles[x + y * width] = TileState::Alive;
    }

    Ok(Pattern {
        width,
        height,
        tiles,
        rule: None,
    })
}
