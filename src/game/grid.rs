use std::fmt;

use thiserror::Error;

pub const MIN_GRID_SIZE: u8 = 2;
pub const MAX_GRID_SIZE: u8 = 10;
pub const DEFAULT_GRID_SIZE: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridSizeError {
    #[error("grid size {input:?} is not a number")]
    NotANumber { input: String },
    #[error("grid size {value} is outside 2..=10")]
    OutOfRange { value: i64 },
}

/// Side length of the square board. Always within 2..=10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridSize(u8);

impl GridSize {
    pub fn new(value: i64) -> Result<Self, GridSizeError> {
        if (MIN_GRID_SIZE as i64..=MAX_GRID_SIZE as i64).contains(&value) {
            Ok(GridSize(value as u8))
        } else {
            Err(GridSizeError::OutOfRange { value })
        }
    }

    /// Parses the text of the grid-size field.
    ///
    /// Reads an optional sign and the leading run of digits after any
    /// whitespace, so `"6"`, `" 6 "` and `"6.5"` all give 6. Text without
    /// leading digits is `NotANumber`.
    pub fn parse(raw: &str) -> Result<Self, GridSizeError> {
        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Err(GridSizeError::NotANumber {
                input: raw.trim().to_string(),
            });
        }
        // Anything too long for an i64 is out of range anyway.
        let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
        Self::new(if negative { -magnitude } else { magnitude })
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn total_cards(self) -> usize {
        let side = self.0 as usize;
        side * side
    }

    pub fn pair_count(self) -> usize {
        self.total_cards() / 2
    }

    /// Countdown budget for a fresh game on this board.
    pub fn time_limit_secs(self) -> u32 {
        match self.0 {
            2 => 10,
            3 => 40,
            4 => 60,
            5 => 80,
            6 => 100,
            7 => 120,
            8 => 150,
            9 => 180,
            _ => 240,
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        GridSize(DEFAULT_GRID_SIZE)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

impl TryFrom<i64> for GridSize {
    type Error = GridSizeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        GridSize::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(GridSize::new(2).map(GridSize::get), Ok(2));
        assert_eq!(GridSize::new(10).map(GridSize::get), Ok(10));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            GridSize::new(1),
            Err(GridSizeError::OutOfRange { value: 1 })
        );
        assert_eq!(
            GridSize::new(11),
            Err(GridSizeError::OutOfRange { value: 11 })
        );
        assert!(GridSize::new(-4).is_err());
    }

    #[test]
    fn parse_handles_user_text() {
        assert_eq!(GridSize::parse(" 6 ").map(GridSize::get), Ok(6));
        assert!(matches!(
            GridSize::parse("six"),
            Err(GridSizeError::NotANumber { .. })
        ));
        assert!(matches!(
            GridSize::parse(""),
            Err(GridSizeError::NotANumber { .. })
        ));
        assert_eq!(GridSize::parse("4.5").map(GridSize::get), Ok(4));
        assert_eq!(GridSize::parse("7px").map(GridSize::get), Ok(7));
        assert!(matches!(
            GridSize::parse("x7"),
            Err(GridSizeError::NotANumber { .. })
        ));
        assert!(matches!(
            GridSize::parse("-"),
            Err(GridSizeError::NotANumber { .. })
        ));
        assert!(matches!(
            GridSize::parse("-3"),
            Err(GridSizeError::OutOfRange { value: -3 })
        ));
        assert!(matches!(
            GridSize::parse("99999999999999999999"),
            Err(GridSizeError::OutOfRange { .. })
        ));
        assert!(matches!(
            GridSize::parse("12"),
            Err(GridSizeError::OutOfRange { value: 12 })
        ));
    }

    #[test]
    fn time_table_matches_board_sizes() {
        let expected = [
            (2, 10),
            (3, 40),
            (4, 60),
            (5, 80),
            (6, 100),
            (7, 120),
            (8, 150),
            (9, 180),
            (10, 240),
        ];
        for (side, secs) in expected {
            let size = GridSize::new(side).unwrap();
            assert_eq!(size.time_limit_secs(), secs, "grid {side}");
        }
    }

    #[test]
    fn card_counts() {
        let size = GridSize::new(3).unwrap();
        assert_eq!(size.total_cards(), 9);
        assert_eq!(size.pair_count(), 4);
        assert_eq!(GridSize::default().get(), 4);
        assert_eq!(GridSize::default().to_string(), "4x4");
    }
}
