use super::{
    config::{FOOD_REWARD, GameConfig},
    state::{CollisionType, GameState, Position, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;
use tracing::debug;

/// Rejection-sampling attempts per board cell before enumerating free cells
const FOOD_ATTEMPTS_PER_CELL: usize = 4;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// The snake covers every cell, so no food could be placed
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Score gained this step
    pub reward: u32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn terminal(collision_type: Option<CollisionType>) -> Self {
        Self {
            reward: 0,
            terminated: true,
            info: StepInfo {
                ate_food: false,
                collision_type,
                board_full: false,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            self.config.initial_snake_length,
        );

        // Only a board without a free cell lands on the head, and
        // GameConfig::validate rejects those.
        let food = self.spawn_food(&snake).unwrap_or_else(|| snake.head());

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult::terminal(None);
        }

        let new_head = state.snake.commit_direction();

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;
            state.steps += 1;
            debug!(?collision_type, x = new_head.x, y = new_head.y, "snake collided");
            return StepResult::terminal(Some(collision_type));
        }

        let ate_food = new_head == state.food;

        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if !ate_food {
            return StepResult {
                reward: 0,
                terminated: false,
                info: StepInfo {
                    ate_food,
                    collision_type: None,
                    board_full: false,
                },
            };
        }

        state.score += FOOD_REWARD;

        match self.spawn_food(&state.snake) {
            Some(food) => {
                state.food = food;
                StepResult {
                    reward: FOOD_REWARD,
                    terminated: false,
                    info: StepInfo {
                        ate_food,
                        collision_type: None,
                        board_full: false,
                    },
                }
            }
            None => {
                state.is_alive = false;
                debug!(length = state.snake.len(), "snake fills the board");
                StepResult {
                    reward: FOOD_REWARD,
                    terminated: true,
                    info: StepInfo {
                        ate_food,
                        collision_type: None,
                        board_full: true,
                    },
                }
            }
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail still counts: it has not moved yet when the head arrives.
        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell not covered by the snake, or `None` if there is none
    pub fn spawn_food(&mut self, snake: &Snake) -> Option<Position> {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let cells = width * height;

        if snake.len() >= cells {
            return None;
        }

        for _ in 0..cells * FOOD_ATTEMPTS_PER_CELL {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Crowded board: choose uniformly among the cells that are left.
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
            .filter(|pos| !snake.occupies(*pos))
            .choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(42))
    }

    fn state_with(body: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState::new(Snake::with_body(body, direction), food, 20, 20)
    }

    #[test]
    fn test_reset() {
        let mut engine = seeded(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.direction, None);
        assert!(!state.snake.occupies(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_first_tick_moves_right_from_still() {
        let mut engine = seeded(GameConfig::default());
        let mut state = engine.reset();
        state.food = Position::new(0, 0);

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(state.snake.direction, Some(Direction::Right));
        assert_eq!(state.snake.body, vec![Position::new(11, 10)]);
    }

    #[test]
    fn test_head_moves_one_cell_per_tick() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
            Position::new(0, 19),
        );

        for dir in [Direction::Down, Direction::Down, Direction::Left, Direction::Up] {
            let before = state.snake.head();
            state.snake.steer(dir);
            let result = engine.step(&mut state);
            assert!(!result.terminated);
            assert_eq!(state.snake.head(), before.moved_in_direction(dir));
        }
    }

    #[test]
    fn test_move_without_food() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(15, 15),
        );

        let result = engine.step(&mut state);

        assert_eq!(result.reward, 0);
        assert!(!result.info.ate_food);
        assert_eq!(state.snake.body, vec![Position::new(6, 5), Position::new(5, 5)]);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(6, 5),
        );

        let result = engine.step(&mut state);

        assert!(result.info.ate_food);
        assert_eq!(result.reward, FOOD_REWARD);
        assert_eq!(state.score, 10);
        assert_eq!(
            state.snake.body,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
        assert!(!state.snake.occupies(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = seeded(GameConfig::default());
        let body = vec![Position::new(19, 3), Position::new(18, 3)];
        let mut state = state_with(body.clone(), Direction::Right, Position::new(0, 0));

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.body, body);
    }

    #[test]
    fn test_wall_collision_at_origin() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(vec![Position::new(0, 0)], Direction::Up, Position::new(5, 5));

        let result = engine.step(&mut state);

        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.body, vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = seeded(GameConfig::default());
        let body = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
            Position::new(2, 5),
        ];
        let mut state = state_with(body, Direction::Right, Position::new(8, 8));

        engine.step(&mut state);
        state.snake.steer(Direction::Down);
        engine.step(&mut state);
        state.snake.steer(Direction::Left);
        engine.step(&mut state);
        state.snake.steer(Direction::Up);
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_reversal_within_one_tick_is_fatal() {
        let mut engine = seeded(GameConfig::default());
        let mut state = state_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(15, 15),
        );

        state.snake.steer(Direction::Up);
        state.snake.steer(Direction::Left);
        let result = engine.step(&mut state);

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_chasing_own_tail_collides() {
        let mut engine = seeded(GameConfig::default());
        // 2x2 loop: the head's next cell is the current tail.
        let body = vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ];
        let mut state = state_with(body, Direction::Up, Position::new(15, 15));
        state.snake.steer(Direction::Right);

        let result = engine.step(&mut state);

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = seeded(GameConfig::small());
        let mut state = engine.reset();
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before);
    }

    #[test]
    fn test_food_never_spawns_on_snake() {
        let mut engine = seeded(GameConfig::new(4, 4));
        let body: Vec<Position> = (0..4)
            .flat_map(|y| (0..4).map(move |x| Position::new(x, y)))
            .filter(|pos| *pos != Position::new(2, 3))
            .collect();
        let snake = Snake::with_body(body, Direction::Right);

        for _ in 0..50 {
            assert_eq!(engine.spawn_food(&snake), Some(Position::new(2, 3)));
        }
    }

    #[test]
    fn test_full_board_ends_game() {
        let mut engine = seeded(GameConfig::new(2, 1));
        let mut state = GameState::new(
            Snake::with_body(vec![Position::new(0, 0)], Direction::Right),
            Position::new(1, 0),
            2,
            1,
        );

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(result.info.board_full);
        assert_eq!(result.info.collision_type, None);
        assert_eq!(state.score, FOOD_REWARD);
        assert!(!state.is_alive);
    }
}
