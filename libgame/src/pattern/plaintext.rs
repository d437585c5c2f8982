use crate::error::PatternFormatError;

use super::{Pattern, common};

/// Plaintext (`.cells`): `!` starts a comment line, `.` is dead and `O` is
/// alive. Blank lines are all-dead rows.
pub(super) fn parse(text: &str) -> Result<Pattern, PatternFormatError> {
    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with('!'));

    let mut coordinates = Vec::new();

    for (y, (index, line)) in rows.enumerate() {
        for (x, character) in line.trim_end().chars().enumerate() {
            match character {
                '.' => {}
                'O' | 'o' | '*' => coordinates.push((x as i64, y as i64)),
                _ => {
                    return Err(PatternFormatError::UnexpectedCharacter {
                        line: index + 1,
                        character,
                    });
                }
            }
        }
    }

    common::normalize(coordinates)
}
