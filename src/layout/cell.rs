//! Integer cell coordinates on the overlay grid.

/// Cardinal direction on the grid; +y is up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    pub fn rotate_clockwise(&self) -> Direction {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    pub fn rotate_counterclockwise(&self) -> Direction {
        match self {
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
        }
    }
}

/// A grid cell, addressed by its bottom-left corner in cell units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub x: i64,
    pub y: i64,
}

impl CellPosition {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The cell `amount` steps away in `direction`.
    pub fn offset(&self, direction: Direction, amount: i64) -> CellPosition {
        match direction {
            Direction::Right => CellPosition::new(self.x + amount, self.y),
            Direction::Up => CellPosition::new(self.x, self.y + amount),
            Direction::Left => CellPosition::new(self.x - amount, self.y),
            Direction::Down => CellPosition::new(self.x, self.y - amount),
        }
    }

    /// The four edge-adjacent cells, tagged with the direction they lie in.
    pub fn neighbours(&self) -> [(Direction, CellPosition); 4] {
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down]
            .map(|d| (d, self.offset(d, 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    #[test]
    fn test_rotation_round_trips() {
        for d in ALL {
            assert_eq!(d.rotate_clockwise().rotate_counterclockwise(), d);
            assert_eq!(d.rotate_clockwise().rotate_clockwise(), d.opposite());
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_offset() {
        let p = CellPosition::new(2, -1);
        assert_eq!(p.offset(Direction::Right, 3), CellPosition::new(5, -1));
        assert_eq!(p.offset(Direction::Down, 2), CellPosition::new(2, -3));
        assert_eq!(p.offset(Direction::Left, 1).offset(Direction::Right, 1), p);
    }

    #[test]
    fn test_neighbours() {
        let p = CellPosition::new(0, 0);
        let n = p.neighbours();
        assert!(n.contains(&(Direction::Left, CellPosition::new(-1, 0))));
        assert!(n.contains(&(Direction::Right, CellPosition::new(1, 0))));
        assert!(n.contains(&(Direction::Up, CellPosition::new(0, 1))));
        assert!(n.contains(&(Direction::Down, CellPosition::new(0, -1))));
        for (d, cell) in n {
            assert_eq!(cell.offset(d.opposite(), 1), p);
        }
    }
}
