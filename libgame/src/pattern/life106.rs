use crate::error::PatternFormatError;

use super::{
    Pattern,
    common::{self, content_lines, parse_coordinates},
};

/// Life 1.06: one `x y` pair per line, `#` starts a comment line.
pub(super) fn parse(text: &str) -> Result<Pattern, PatternFormatError> {
    let coordinates = content_lines(text, '#')
        .map(|(line_number, line)| parse_coordinates(line_number, line))
        .collect::<Result<Vec<_>, _>>()?;

    common::normalize(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_coordinates() {
        let pattern = parse("#Life 1.06\n#D R-pentomino\n0 -1\n1 -1\n-1 0\n0 0\n0 1\n").unwrap();

        assert_eq!((pattern.width(), pattern.height()), (3, 3));

        let alive = pattern
            .enumerate_tiles()
            .filter(|(_, tile)| *tile == crate::board::TileState::Alive)
            .map(|(pos, _)| (pos.x, pos.y))
            .collect::<Vec<_>>();
        assert_eq!(alive, vec![(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn duplicate_coordinates_are_idempotent() {
        let pattern = parse("5 5\n5 5\n6 5\n").unwrap();

        assert_eq!((pattern.width(), pattern.height()), (2, 1));
        assert_eq!(pattern.alive_count(), 2);
    }

    #[test]
    fn malformed_line_fails_the_whole_file() {
        let err = parse("#Life 1.06\n0 0\n1 one\n2 2\n").unwrap_err();

        assert_eq!(
            err,
            PatternFormatError::InvalidCoordinates {
                line: 3,
                content: "1 one".to_owned()
            }
        );
    }

    #[test]
    fn comments_only_is_empty() {
        assert_eq!(parse("#Life 1.06\n#N nothing\n"), Err(PatternFormatError::Empty));
        assert_eq!(parse(""), Err(PatternFormatError::Empty));
    }

    #[test]
    fn life_105_blocks_are_rejected() {
        let err = parse("#Life 1.05\n#P -1 -1\n.*.\n").unwrap_err();

        assert!(matches!(err, PatternFormatError::InvalidCoordinates { line: 3, .. }));
    }
}
