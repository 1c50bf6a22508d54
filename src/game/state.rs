use rand::Rng;

use super::action::Direction;
use super::obstacle::Obstacle;

/// A cell on the board, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step along a heading, before wrapping
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.step();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Fold both axes back onto a square board: walking off one edge
    /// reappears on the opposite edge
    pub fn wrapped(self, grid_size: usize) -> Self {
        let side = grid_size as i32;
        Self {
            x: self.x.rem_euclid(side),
            y: self.y.rem_euclid(side),
        }
    }
}

/// The snake on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments in order, head at index 0
    pub body: Vec<Position>,
    /// Heading applied on the next tick
    pub direction: Direction,
}

impl Snake {
    /// Lay out a snake of `length` segments, tail trailing away from the
    /// heading
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.step();
        let body = (0..length as i32)
            .map(|i| Position::new(head.x - dx * i, head.y - dy * i))
            .collect();

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// True when any segment, head included, sits on the cell
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push an already-wrapped head cell; the tail only stays put when
    /// growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Visual variant of a food item. Cosmetic only: every variant scores and
/// heals the same, the renderer just draws each one differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Apple,
    Pear,
    Cherry,
    Plum,
    Berry,
}

impl FoodKind {
    pub const ALL: [FoodKind; 5] = [
        FoodKind::Apple,
        FoodKind::Pear,
        FoodKind::Cherry,
        FoodKind::Plum,
        FoodKind::Berry,
    ];

    /// Pick a variant uniformly at random
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub pos: Position,
    pub kind: FoodKind,
}

/// Lifecycle phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    /// Terminal until an external restart
    Over,
}

/// Complete game session state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub grid_size: usize,
    pub score: u32,
    /// Remaining life, kept within [0, 100]
    pub life: f32,
    pub level: u32,
    pub phase: Phase,
    /// Best score seen this run, carried across resets
    pub high_score: u32,
}

impl GameState {
    /// True while the cell lies on the current board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let side = self.grid_size as i32;
        (0..side).contains(&pos.x) && (0..side).contains(&pos.y)
    }

    /// Index of the obstacle occupying the given cell, if any
    pub fn obstacle_at(&self, pos: Position) -> Option<usize> {
        self.obstacles.iter().position(|o| o.pos == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_follows_the_heading() {
        let pos = Position::new(3, 7);
        assert_eq!(pos.stepped(Direction::Right), Position::new(4, 7));
        assert_eq!(pos.stepped(Direction::Left), Position::new(2, 7));
        assert_eq!(pos.stepped(Direction::Down), Position::new(3, 8));
        assert_eq!(pos.stepped(Direction::Up), Position::new(3, 6));
    }

    #[test]
    fn test_wrapping_folds_every_edge() {
        assert_eq!(Position::new(-1, 3).wrapped(10), Position::new(9, 3));
        assert_eq!(Position::new(10, 3).wrapped(10), Position::new(0, 3));
        assert_eq!(Position::new(4, -1).wrapped(10), Position::new(4, 9));
        assert_eq!(Position::new(4, 10).wrapped(10), Position::new(4, 0));
        // Interior cells come back untouched
        assert_eq!(Position::new(4, 4).wrapped(10), Position::new(4, 4));
    }

    #[test]
    fn test_new_snake_trails_behind_its_head() {
        let snake = Snake::new(Position::new(6, 2), Direction::Down, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 2));
        assert_eq!(snake.body[1], Position::new(6, 1));
        assert_eq!(snake.body[2], Position::new(6, 0));

        let single = Snake::new(Position::new(4, 4), Direction::Right, 1);
        assert_eq!(single.body, vec![Position::new(4, 4)]);
    }

    #[test]
    fn test_advance_grows_only_when_asked() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(snake.occupies(Position::new(4, 5)));
    }

    #[test]
    fn test_bounds_follow_grid_size() {
        let mut state = GameState {
            snake: Snake::new(Position::new(5, 5), Direction::Right, 1),
            food: Food {
                pos: Position::new(0, 0),
                kind: FoodKind::Apple,
            },
            obstacles: Vec::new(),
            grid_size: 10,
            score: 0,
            life: 100.0,
            level: 1,
            phase: Phase::Running,
            high_score: 0,
        };

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(9, 9)));
        assert!(!state.is_in_bounds(Position::new(10, 0)));
        assert!(!state.is_in_bounds(Position::new(0, -1)));

        state.grid_size = 11;
        assert!(state.is_in_bounds(Position::new(10, 10)));
    }
}
