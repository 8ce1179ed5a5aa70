//! US tile grid
//! One square per state on a 12 x 8 grid, roughly in geographic position.

/// Grid width in tiles.
pub const GRID_COLS: usize = 12;
/// Grid height in tiles.
pub const GRID_ROWS: usize = 8;

/// (state code, row, column)
const US_TILES: [(&str, usize, usize); 52] = [
    ("AK", 0, 0),
    ("ME", 0, 11),
    ("VT", 1, 10),
    ("NH", 1, 11),
    ("WA", 2, 1),
    ("ID", 2, 2),
    ("MT", 2, 3),
    ("ND", 2, 4),
    ("MN", 2, 5),
    ("IL", 2, 6),
    ("WI", 2, 7),
    ("MI", 2, 8),
    ("NY", 2, 9),
    ("RI", 2, 10),
    ("MA", 2, 11),
    ("OR", 3, 1),
    ("NV", 3, 2),
    ("WY", 3, 3),
    ("SD", 3, 4),
    ("IA", 3, 5),
    ("IN", 3, 6),
    ("OH", 3, 7),
    ("PA", 3, 8),
    ("NJ", 3, 9),
    ("CT", 3, 10),
    ("CA", 4, 1),
    ("UT", 4, 2),
    ("CO", 4, 3),
    ("NE", 4, 4),
    ("MO", 4, 5),
    ("KY", 4, 6),
    ("WV", 4, 7),
    ("VA", 4, 8),
    ("MD", 4, 9),
    ("DE", 4, 10),
    ("AZ", 5, 2),
    ("NM", 5, 3),
    ("KS", 5, 4),
    ("AR", 5, 5),
    ("TN", 5, 6),
    ("NC", 5, 7),
    ("SC", 5, 8),
    ("DC", 5, 9),
    ("OK", 6, 4),
    ("LA", 6, 5),
    ("MS", 6, 6),
    ("AL", 6, 7),
    ("GA", 6, 8),
    ("HI", 7, 0),
    ("TX", 7, 4),
    ("FL", 7, 9),
    ("PR", 7, 11),
];

/// Grid position `(row, col)` of a state code, case-insensitive.
pub fn tile_position(state_code: &str) -> Option<(usize, usize)> {
    let code = state_code.trim();
    US_TILES
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map(|&(_, row, col)| (row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_positions_unique_and_in_bounds() {
        let mut seen = HashSet::new();
        for (code, row, col) in US_TILES {
            assert!(row < GRID_ROWS && col < GRID_COLS, "{} out of bounds", code);
            assert!(seen.insert((row, col)), "{} overlaps another tile", code);
        }
    }

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<&str> = US_TILES.iter().map(|(c, _, _)| *c).collect();
        assert_eq!(codes.len(), US_TILES.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(tile_position("CA"), Some((4, 1)));
        assert_eq!(tile_position("ca"), Some((4, 1)));
        assert_eq!(tile_position(" ME "), Some((0, 11)));
        assert_eq!(tile_position("XX"), None);
    }
}
