use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position in a text file, ordered by line first and column second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct Position {
    line: usize,
    column: usize,
}

impl Position {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Moves the position by `delta` lines, keeping the column
    ///
    /// Lines never go below zero.
    pub fn shift_lines(&self, delta: i64) -> Self {
        let line = (self.line as i64 + delta).max(0) as usize;
        Self::new(line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position '{0}', expected LINE,COLUMN")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, column) = s
            .split_once(',')
            .ok_or_else(|| ParsePositionError(s.to_string()))?;
        let line = line
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;
        let column = column
            .trim()
            .parse()
            .map_err(|_| ParsePositionError(s.to_string()))?;

        Ok(Self::new(line, column))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1,0", Position::new(1, 0))]
    #[case("12,7", Position::new(12, 7))]
    #[case(" 3 , 4 ", Position::new(3, 4))]
    fn parses_line_and_column(#[case] input: &str, #[case] expected: Position) {
        assert_eq!(input.parse::<Position>(), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("12")]
    #[case("a,b")]
    #[case("-1,2")]
    fn rejects_malformed_positions(#[case] input: &str) {
        assert!(input.parse::<Position>().is_err());
    }

    #[test]
    fn orders_by_line_then_column() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
    }
}
