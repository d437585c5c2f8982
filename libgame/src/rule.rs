use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::RuleFormatError;

/// Birth/survival rule in B/S notation, e.g. `B3/S23`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Rule {
    pub fn new<B, S>(birth: B, survive: S) -> Self
    where
        B: IntoIterator<Item = usize>,
        S: IntoIterator<Item = usize>,
    {
        Self {
            birth: birth.into_iter().sorted().dedup().collect(),
            survive: survive.into_iter().sorted().dedup().collect(),
        }
    }

    pub fn is_birth(&self, neighbour_count: usize) -> bool {
        self.birth.contains(&neighbour_count)
    }

    pub fn is_survival(&self, neighbour_count: usize) -> bool {
        self.survive.contains(&neighbour_count)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}

impl FromStr for Rule {
    type Err = RuleFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule_string = s.trim();

        let (birth_part, survive_part) = rule_string
            .split_once('/')
            .ok_or_else(|| RuleFormatError::MissingSeparator(rule_string.to_owned()))?;

        let birth = parse_conditions(birth_part, 'B', rule_string)?;
        let survive = parse_conditions(survive_part, 'S', rule_string)?;

        Ok(Self::new(birth, survive))
    }
}

fn parse_conditions(
    part: &str,
    prefix: char,
    rule_string: &str,
) -> Result<Vec<usize>, RuleFormatError> {
    let mut chars = part.chars();

    match chars.next() {
        Some(letter) if letter.eq_ignore_ascii_case(&prefix) => {}
        found => {
            return Err(RuleFormatError::UnexpectedPrefix {
                rule: rule_string.to_owned(),
                expected: prefix,
                found,
            });
        }
    }

    chars
        .map(|c| {
            c.to_digit(10)
                .map(|digit| digit as usize)
                .ok_or_else(|| RuleFormatError::InvalidDigit {
                    rule: rule_string.to_owned(),
                    character: c,
                })
        })
        .collect()
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.birth.iter().join(""),
            self.survive.iter().join("")
        )
    }
}

impl TryFrom<String> for Rule {
    type Error = RuleFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(value: Rule) -> Self {
        value.to_string()
    }
}
