use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Heading applied on the last tick; `None` before the first move
    pub direction: Option<Direction>,
    /// Buffered input, committed on the next tick
    pub next_direction: Option<Direction>,
}

impl Snake {
    /// Create a motionless snake whose extra segments trail to the left of the head
    pub fn new(head: Position, length: usize) -> Self {
        let (back_dx, back_dy) = Direction::INITIAL.opposite().delta();
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction: None,
            next_direction: None,
        }
    }

    /// Create a snake from explicit segments already heading in `direction`
    pub fn with_body(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "snake needs at least a head");
        Self {
            body,
            direction: Some(direction),
            next_direction: Some(direction),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Buffer a heading for the next tick. Later calls overwrite earlier ones.
    pub fn steer(&mut self, direction: Direction) {
        self.next_direction = Some(direction);
    }

    /// Give a motionless snake its starting heading
    pub fn seed_direction(&mut self) {
        if self.direction.is_none() {
            self.direction = Some(Direction::INITIAL);
        }
        if self.next_direction.is_none() {
            self.next_direction = Some(Direction::INITIAL);
        }
    }

    /// Apply the buffered heading and return the cell the head moves into
    pub fn commit_direction(&mut self) -> Position {
        // A snake that never moved starts heading right
        let direction = self.next_direction.unwrap_or(Direction::INITIAL);
        self.direction = Some(direction);
        self.next_direction = Some(direction);
        self.head().moved_in_direction(direction)
    }

    /// Push `new_head` onto the body, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, should_grow: bool) {
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Board state for a single game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
