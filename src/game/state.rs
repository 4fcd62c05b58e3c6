use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::GameConfig;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Visible display size in pixels, queried fresh from the host every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamp so the inner play area holds at least `min_cells` cells per axis.
    /// Degenerate (zero or tiny) sizes would otherwise yield an empty grid.
    pub fn clamped(self, config: &GameConfig, min_cells: u32) -> Self {
        let floor = min_cells * config.cell_size + 2 * config.border_thickness;
        Self {
            width: self.width.max(floor),
            height: self.height.max(floor),
        }
    }
}

/// The inner play boundary in grid coordinates, derived from the live
/// viewport minus the border strips. Recomputed on every use, never cached,
/// so resizing the viewport takes effect immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayArea {
    /// First legal cell column / row (inclusive)
    pub min_x: i32,
    pub min_y: i32,
    /// One past the last legal cell column / row (exclusive)
    pub max_x: i32,
    pub max_y: i32,
}

impl PlayArea {
    pub fn from_viewport(viewport: Viewport, config: &GameConfig) -> Self {
        let border = config.border_cells();
        Self {
            min_x: border,
            min_y: border,
            max_x: (viewport.width / config.cell_size) as i32 - border,
            max_y: (viewport.height / config.cell_size) as i32 - border,
        }
    }

    /// Check if a position lies inside the inner play boundary
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min_x && pos.x < self.max_x && pos.y >= self.min_y && pos.y < self.max_y
    }

    /// Pull a position inside the boundary, for seeding on small viewports
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(self.min_x, self.max_x - 1),
            pos.y.clamp(self.min_y, self.max_y - 1),
        )
    }

    /// All cells inside the boundary, row-major
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min_y..self.max_y)
            .flat_map(move |y| (self.min_x..self.max_x).map(move |x| Position::new(x, y)))
    }
}

/// The snake: body segments with the head at index 0, insertion order is
/// body order. Length is at least 1 at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a single-cell snake at the given starting position
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if a position collides with the body, excluding the current
    /// head. The exclusion is by contract, not by index arithmetic: the head
    /// cell itself is never a self-collision even right after a move.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, occupies the position
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance one cell in the current direction, growing if `grow` is true,
    /// otherwise sliding (tail cell removed). Returns the new head.
    pub fn advance(&mut self, grow: bool) -> Position {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }

        new_head
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake crossed the inner play boundary
    Wall,
    /// Snake hit its own body
    SelfCollision,
}

/// Complete game state
///
/// Created once at startup and mutated in place; a collision resets it to
/// initial values on the same frame rather than terminating anything.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub berry: Position,
    pub score: u32,
    /// Score of the previous run, shown alongside the live score
    pub last_score: u32,
    /// Seconds between move steps at the current score
    pub move_interval: f64,
    /// Elapsed-time accumulator; zeroed (not decremented) on each step
    pub time_since_last_move: f64,
}

impl GameState {
    pub fn new(snake: Snake, berry: Position, move_interval: f64) -> Self {
        Self {
            snake,
            berry,
            score: 0,
            last_score: 0,
            move_interval,
            time_since_last_move: 0.0,
        }
    }
}
