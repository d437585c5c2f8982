use crate::{error::PatternFormatError, rule::Rule};

use super::{
    Pattern,
    common::{self, MAX_PATTERN_SIDE, content_lines},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Header {
    width: usize,
    height: usize,
    rule: Option<Rule>,
}

/// Run-length encoded: `#` comment lines, an `x = .., y = ..[, rule = ..]`
/// header line, then `<count><tag>` runs where `b` is dead, `o` alive and
/// `$` ends a row, terminated by `!`.
pub(super) fn parse(text: &str) -> Result<Pattern, PatternFormatError> {
    let mut lines = content_lines(text, '#');

    let (header_line_number, header_line) =
        lines.next().ok_or(PatternFormatError::MissingHeader)?;
    let header = parse_header(header_line_number, header_line)?;

    let mut coordinates = Vec::new();
    let (mut x, mut y) = (0usize, 0usize);
    let mut count: Option<usize> = None;
    let mut terminated = false;

    'lines: for (line_number, line) in lines {
        for character in line.chars() {
            if let Some(digit) = character.to_digit(10) {
                let pending = count.unwrap_or(0);
                count = Some(pending.saturating_mul(10).saturating_add(digit as usize));
                continue;
            }

            let run = count.take();

            match character {
                'b' => x = x.saturating_add(run.unwrap_or(1)),
                'o' => {
                    for _ in 0..run.unwrap_or(1) {
                        if x >= header.width || y >= header.height {
                            return Err(PatternFormatError::OutOfBounds {
                                x,
                                y,
                                width: header.width,
                                height: header.height,
                            });
                        }

                        coordinates.push((x as i64, y as i64));
                        x += 1;
                    }
                }
                '$' => {
                    y = y.saturating_add(run.unwrap_or(1));
                    x = 0;
                }
                '!' if run.is_none() => {
                    terminated = true;
                    break 'lines;
                }
                _ if run.is_some() => {
                    return Err(PatternFormatError::DanglingCount { line: line_number });
                }
                c if c.is_whitespace() => {}
                _ => {
                    return Err(PatternFormatError::UnexpectedCharacter {
                        line: line_number,
                        character,
                    });
                }
            }
        }
    }

    if !terminated {
        return Err(PatternFormatError::MissingTerminator);
    }

    Ok(common::normalize(coordinates)?.with_rule(header.rule))
}

fn parse_header(line_number: usize, line: &str) -> Result<Header, PatternFormatError> {
    let invalid = || PatternFormatError::InvalidHeader {
        line: line_number,
        content: line.to_owned(),
    };

    let mut width = None;
    let mut height = None;
    let mut rule = None;

    for part in line.split(',') {
        let (key, value) = part.split_once('=').ok_or_else(invalid)?;
        let value = value.trim();

        match key.trim() {
            "x" if width.is_none() => {
                width = Some(value.parse::<usize>().map_err(|_| invalid())?);
            }
            "y" if height.is_none() => {
                height = Some(value.parse::<usize>().map_err(|_| invalid())?);
            }
            "rule" if rule.is_none() => {
                rule = Some(value.parse::<Rule>()?);
            }
            _ => return Err(invalid()),
        }
    }

    let (Some(width), Some(height)) = (width, height) else {
        return Err(invalid());
    };

    if width > MAX_PATTERN_SIDE || height > MAX_PATTERN_SIDE {
        return Err(PatternFormatError::TooLarge {
            max: MAX_PATTERN_SIDE,
        });
    }

    Ok(Header {
        width,
        height,
        rule,
    })
}
