use rand::seq::SliceRandom;

use super::{
    action::{Direction, InputSnapshot},
    config::GameConfig,
    state::{CollisionType, GameState, PlayArea, Position, Snake, Viewport},
};

/// Smallest inner grid the engine will accept per axis; smaller viewports
/// are clamped up so berry placement always has free cells to choose from.
const MIN_INNER_CELLS: u32 = 8;

const INITIAL_DIRECTION: Direction = Direction::Right;

/// Information about a move step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate the berry this step
    pub ate_berry: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
}

/// Result of one update call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    /// Whether the accumulator crossed the move interval and a step ran
    pub stepped: bool,
    pub info: StepInfo,
}

impl UpdateResult {
    fn idle() -> Self {
        Self {
            stepped: false,
            info: StepInfo {
                ate_berry: false,
                collision: None,
            },
        }
    }
}

/// The game engine that handles all game logic.
///
/// The host calls `reset` once, then `update` every frame with the elapsed
/// time, the sampled input and the live viewport size. The engine never
/// terminates: a collision resets the state in place on the same frame.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reject degenerate viewport sizes by clamping them up to the smallest
    /// workable play area
    pub fn clamp_viewport(&self, viewport: Viewport) -> Viewport {
        viewport.clamped(&self.config, MIN_INNER_CELLS)
    }

    /// Inner play boundary for a viewport, after degenerate-size clamping
    pub fn play_area(&self, viewport: Viewport) -> PlayArea {
        PlayArea::from_viewport(self.clamp_viewport(viewport), &self.config)
    }

    /// Build the initial state: a single-cell snake at the start position
    /// and a berry somewhere free.
    pub fn reset(&mut self, viewport: Viewport) -> GameState {
        let area = self.play_area(viewport);
        let snake = Snake::new(area.clamp(self.config.start_cell), INITIAL_DIRECTION);
        let berry = self.place_berry(area, &snake);

        GameState::new(snake, berry, self.config.initial_move_interval)
    }

    /// Advance the game by one frame: sample input, accumulate time, and run
    /// one discrete move step once the accumulator crosses the move interval.
    pub fn update(
        &mut self,
        state: &mut GameState,
        delta: f64,
        input: &InputSnapshot,
        viewport: Viewport,
    ) -> UpdateResult {
        self.apply_input(state, input);

        state.time_since_last_move += delta;
        if state.time_since_last_move < state.move_interval {
            return UpdateResult::idle();
        }

        // Full reset, not a decrement: steady overshoot is absorbed
        state.time_since_last_move = 0.0;

        UpdateResult {
            stepped: true,
            info: self.step(state, viewport),
        }
    }

    /// Apply held-direction input. The checks run in a fixed sequence (right,
    /// left, up, down) and each one rejects a 180-degree turn against the
    /// direction as already updated this frame, so the last applied wins.
    fn apply_input(&self, state: &mut GameState, input: &InputSnapshot) {
        let snake = &mut state.snake;

        if input.right && !snake.direction.is_opposite(Direction::Right) {
            snake.direction = Direction::Right;
        }
        if input.left && !snake.direction.is_opposite(Direction::Left) {
            snake.direction = Direction::Left;
        }
        if input.up && !snake.direction.is_opposite(Direction::Up) {
            snake.direction = Direction::Up;
        }
        if input.down && !snake.direction.is_opposite(Direction::Down) {
            snake.direction = Direction::Down;
        }
    }

    /// One discrete move step. The body is mutated first, the collision check
    /// runs on the already-moved snake, against the boundary and against the
    /// body excluding the new head.
    pub fn step(&mut self, state: &mut GameState, viewport: Viewport) -> StepInfo {
        let area = self.play_area(viewport);

        let next_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_berry = next_head == state.berry;

        let new_head = state.snake.advance(ate_berry);

        if ate_berry {
            state.score += 1;
            state.move_interval = self.config.move_interval_for_score(state.score);
            state.berry = self.place_berry(area, &state.snake);
        }

        let collision = self.check_collision(state, area, new_head);
        if collision.is_some() {
            self.reset_in_place(state, area);
        }

        StepInfo {
            ate_berry,
            collision,
        }
    }

    fn check_collision(
        &self,
        state: &GameState,
        area: PlayArea,
        head: Position,
    ) -> Option<CollisionType> {
        if !area.contains(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Same-frame reset after a collision: the previous score is kept as
    /// `last_score`, everything else returns to initial values.
    fn reset_in_place(&mut self, state: &mut GameState, area: PlayArea) {
        state.last_score = state.score;
        state.score = 0;
        state.snake = Snake::new(area.clamp(self.config.start_cell), INITIAL_DIRECTION);
        state.move_interval = self.config.initial_move_interval;
        state.berry = self.place_berry(area, &state.snake);
    }

    /// Put the berry on a uniformly chosen free inner cell. Choosing from the
    /// explicit free-cell list guarantees termination even on crowded grids,
    /// unlike rejection sampling.
    fn place_berry(&mut self, area: PlayArea, snake: &Snake) -> Position {
        let free: Vec<Position> = area.cells().filter(|cell| !snake.occupies(*cell)).collect();

        // A snake filling the whole interior leaves nowhere legal; park the
        // berry on the start cell rather than panic.
        free.choose(&mut self.rng)
            .copied()
            .unwrap_or(area.clamp(self.config.start_cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 400,
        height: 400,
    };

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::default())
    }

    /// Snake occupying the given cells, head first
    fn snake_at(cells: &[(i32, i32)], direction: Direction) -> Snake {
        Snake {
            body: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
        }
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset(VIEWPORT);

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(5, 5));
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.last_score, 0);
        assert_eq!(state.move_interval, 0.3);
        assert!(!state.snake.occupies(state.berry));
    }

    #[test]
    fn test_single_step_slides() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.berry = Position::new(15, 15); // out of the way

        let info = engine.step(&mut state, VIEWPORT);

        assert!(!info.ate_berry);
        assert_eq!(info.collision, None);
        assert_eq!(state.snake.body, vec![Position::new(6, 5)]);
    }

    #[test]
    fn test_accumulator_triggers_step() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.berry = Position::new(15, 15);
        let input = InputSnapshot::default();

        let result = engine.update(&mut state, 0.1, &input, VIEWPORT);
        assert!(!result.stepped);
        assert_eq!(state.snake.head(), Position::new(5, 5));

        // 0.1 + 0.25 crosses the 0.3 interval; accumulator fully resets
        let result = engine.update(&mut state, 0.25, &input, VIEWPORT);
        assert!(result.stepped);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.time_since_last_move, 0.0);
    }

    #[test]
    fn test_berry_consumption() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.berry = Position::new(6, 5); // directly in front

        let info = engine.step(&mut state, VIEWPORT);

        assert!(info.ate_berry);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert!(!state.snake.occupies(state.berry));
    }

    #[test]
    fn test_interval_drops_on_threshold() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);

        // Feed the snake by always parking the berry in front of it
        let mut previous = state.move_interval;
        for expected_score in 1..=10 {
            state.berry = state.snake.head().moved_in_direction(state.snake.direction);
            engine.step(&mut state, VIEWPORT);
            assert_eq!(state.score, expected_score);
            assert!(state.move_interval <= previous);
            previous = state.move_interval;
        }

        // Two thresholds crossed: 0.3 minus two decrements, within float noise
        assert!((state.move_interval - 0.26).abs() < 1e-9);
    }

    #[test]
    fn test_wall_collision_resets_in_place() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.score = 7;
        state.move_interval = 0.28;
        state.snake = snake_at(&[(18, 5)], Direction::Right);
        state.berry = Position::new(10, 10);

        // Head moves to x == 19, on the border strip
        let info = engine.step(&mut state, VIEWPORT);

        assert_eq!(info.collision, Some(CollisionType::Wall));
        assert_eq!(state.last_score, 7);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.body, vec![Position::new(5, 5)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.move_interval, 0.3);
        assert!(!state.snake.occupies(state.berry));
    }

    #[test]
    fn test_self_collision_resets_in_place() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.score = 3;
        state.berry = Position::new(15, 15);

        // Hook shape: head at (5,6) moving up into (5,5), which stays
        // occupied by the body after the move
        state.snake = snake_at(&[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)], Direction::Up);

        let info = engine.step(&mut state, VIEWPORT);

        assert_eq!(info.collision, Some(CollisionType::SelfCollision));
        assert_eq!(state.last_score, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.body, vec![Position::new(5, 5)]);
        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_moving_onto_vacated_tail_is_not_fatal() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.berry = Position::new(15, 15);

        // 2x2 loop: head (5,5) turning up into (5,4)... use a 4-cell ring
        // where the head moves onto the cell the tail just vacated
        state.snake = snake_at(&[(5, 5), (6, 5), (6, 4), (5, 4)], Direction::Up);

        let info = engine.step(&mut state, VIEWPORT);

        // (5,4) was the tail; it slides away in the same step
        assert_eq!(info.collision, None);
        assert_eq!(state.snake.head(), Position::new(5, 4));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.berry = Position::new(15, 15);

        let input = InputSnapshot::pressing(Direction::Left);
        engine.update(&mut state, 0.0, &input, VIEWPORT);
        assert_eq!(state.snake.direction, Direction::Right);

        let input = InputSnapshot::pressing(Direction::Down);
        engine.update(&mut state, 0.0, &input, VIEWPORT);
        assert_eq!(state.snake.direction, Direction::Down);

        let input = InputSnapshot::pressing(Direction::Up);
        engine.update(&mut state, 0.0, &input, VIEWPORT);
        assert_eq!(state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_multiple_held_directions_last_applied_wins() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.berry = Position::new(15, 15);

        // Right and down both held while moving right: the down check runs
        // after the right check, so down wins
        let input = InputSnapshot {
            right: true,
            down: true,
            ..Default::default()
        };
        engine.update(&mut state, 0.0, &input, VIEWPORT);
        assert_eq!(state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_berry_never_spawns_on_snake() {
        let mut engine = engine();
        // Tiny viewport: 8x8 inner cells after clamping
        let viewport = Viewport::new(0, 0);
        let mut state = engine.reset(viewport);

        // Grow a decent snake, then respawn the berry many times
        state.snake = snake_at(
            &[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (6, 1)],
            Direction::Left,
        );

        for _ in 0..200 {
            let area = engine.play_area(viewport);
            let berry = engine.place_berry(area, &state.snake);
            assert!(area.contains(berry));
            assert!(!state.snake.occupies(berry));
        }
    }

    #[test]
    fn test_resize_shrinks_bounds_immediately() {
        let mut engine = engine();
        let mut state = engine.reset(VIEWPORT);
        state.snake = snake_at(&[(12, 5)], Direction::Right);
        state.berry = Position::new(3, 3);

        // Same position, smaller viewport: (13,5) is outside 280x280 bounds
        let info = engine.step(&mut state, Viewport::new(280, 280));

        assert_eq!(info.collision, Some(CollisionType::Wall));
        assert_eq!(state.snake.body, vec![Position::new(5, 5)]);
    }
}
