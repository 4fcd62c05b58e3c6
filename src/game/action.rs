/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Held-direction signals for one frame, sampled once per update.
///
/// Level-triggered: a flag is true if the key was down at any point since the
/// previous sample. The engine applies the flags in a fixed sequence (right,
/// left, up, down), each gated by reversal rejection, so when several are held
/// the last applied wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    /// Snapshot with a single direction held
    pub fn pressing(direction: Direction) -> Self {
        let mut snapshot = Self::default();
        match direction {
            Direction::Up => snapshot.up = true,
            Direction::Down => snapshot.down = true,
            Direction::Left => snapshot.left = true,
            Direction::Right => snapshot.right = true,
        }
        snapshot
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}
