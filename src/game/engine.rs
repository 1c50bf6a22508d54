use rand::Rng;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    obstacle::{Obstacle, ObstacleKind},
    state::{Food, FoodKind, GameState, Phase, Position, Snake},
};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The snake ran into its own body
    SelfCollision,
    /// An obstacle hit drained the last of the snake's life
    LifeDepleted,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Whether the session is over
    pub terminated: bool,
    /// Set on the tick that ended the session
    pub cause: Option<GameOverCause>,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Kind of obstacle struck this tick, if any
    pub obstacle_hit: Option<ObstacleKind>,
    /// Whether this tick crossed a level threshold
    pub leveled_up: bool,
}

impl TickOutcome {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            cause: None,
            ate_food: false,
            obstacle_hit: None,
            leveled_up: false,
        }
    }
}

/// The game state machine. Owns the rules and the RNG; operates on a
/// [`GameState`] one tick at a time.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh session: single-segment snake heading right on the
    /// base grid, full life, randomly placed food, no obstacles.
    pub fn start(&mut self) -> GameState {
        let grid_size = self.config.base_grid_size;
        let start = grid_size as i32 / 2 - 1;

        let snake = Snake::new(
            Position::new(start, start),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let obstacles = Vec::new();
        let food = self.spawn_food(&snake, &obstacles, grid_size);

        GameState {
            snake,
            food,
            obstacles,
            grid_size,
            score: 0,
            life: self.config.max_life,
            level: 1,
            phase: Phase::Running,
            high_score: 0,
        }
    }

    /// Restart the session in place. Everything is reinitialized except the
    /// high score, which carries across resets within one run.
    pub fn reset(&mut self, state: &mut GameState) {
        let high_score = state.high_score;
        *state = self.start();
        state.high_score = high_score;
    }

    /// Advance the game by one tick. No-op unless the session is running.
    pub fn tick(&mut self, state: &mut GameState, action: Action) -> TickOutcome {
        if state.phase != Phase::Running {
            return TickOutcome::idle(state.phase == Phase::Over);
        }

        // Apply the most recent steer; a reversing steer is silently ignored
        if let Action::Steer(heading) = action {
            if heading != state.snake.direction.reversed() {
                state.snake.direction = heading;
            }
        }

        let candidate = state
            .snake
            .head()
            .stepped(state.snake.direction)
            .wrapped(state.grid_size);

        // Checked against the whole body before the tail pops, so moving
        // into the current tail cell is fatal
        if state.snake.occupies(candidate) {
            self.end_game(state);
            return TickOutcome {
                cause: Some(GameOverCause::SelfCollision),
                ..TickOutcome::idle(true)
            };
        }

        let mut obstacle_hit = None;
        if let Some(idx) = state.obstacle_at(candidate) {
            let kind = state.obstacles.remove(idx).kind;
            state.life -= kind.damage();
            let fatal = state.life <= 0.0;
            state.life = state.life.clamp(0.0, self.config.max_life);
            obstacle_hit = Some(kind);

            if fatal {
                self.end_game(state);
                return TickOutcome {
                    cause: Some(GameOverCause::LifeDepleted),
                    obstacle_hit,
                    ..TickOutcome::idle(true)
                };
            }
        }

        let ate_food = candidate == state.food.pos;
        state.snake.advance(candidate, ate_food);

        let mut leveled_up = false;
        if ate_food {
            state.score += self.config.food_points;
            state.life =
                (state.life + self.config.food_life_bonus).clamp(0.0, self.config.max_life);
            leveled_up = self.maybe_level_up(state);
            state.food = self.spawn_food(&state.snake, &state.obstacles, state.grid_size);
        }

        TickOutcome {
            terminated: false,
            cause: None,
            ate_food,
            obstacle_hit,
            leveled_up,
        }
    }

    /// Drop a new hazard onto a free cell. Called by the scheduler on its
    /// own, slower period; no-op unless the session is running.
    pub fn spawn_obstacle(&mut self, state: &mut GameState) -> Option<ObstacleKind> {
        if state.phase != Phase::Running {
            return None;
        }

        let kind = ObstacleKind::sample(&mut self.rng);

        // Rejection sampling, unbounded: there is no cap on obstacle count
        // and no retry limit, so a board filling up would stall here
        let pos = loop {
            let pos = self.random_cell(state.grid_size);
            if !state.snake.occupies(pos)
                && state.obstacle_at(pos).is_none()
                && pos != state.food.pos
            {
                break pos;
            }
        };

        state.obstacles.push(Obstacle { pos, kind });
        Some(kind)
    }

    /// Level up when the score lands exactly on a threshold multiple, up to
    /// the score cap. The grid gains one cell per level; existing entity
    /// coordinates are kept as-is across the resize.
    fn maybe_level_up(&self, state: &mut GameState) -> bool {
        if state.score % self.config.level_score_step == 0
            && state.score <= self.config.level_score_cap
        {
            state.level += 1;
            state.grid_size = self.config.grid_size_for_level(state.level);
            return true;
        }
        false
    }

    fn end_game(&self, state: &mut GameState) {
        state.phase = Phase::Over;
        if state.score > state.high_score {
            state.high_score = state.score;
        }
    }

    /// Place food on a cell free of the snake and every obstacle
    fn spawn_food(&mut self, snake: &Snake, obstacles: &[Obstacle], grid_size: usize) -> Food {
        let pos = loop {
            let pos = self.random_cell(grid_size);
            if !snake.occupies(pos) && !obstacles.iter().any(|o| o.pos == pos) {
                break pos;
            }
        };

        Food {
            pos,
            kind: FoodKind::sample(&mut self.rng),
        }
    }

    fn random_cell(&mut self, grid_size: usize) -> Position {
        Position::new(
            self.rng.gen_range(0..grid_size as i32),
            self.rng.gen_range(0..grid_size as i32),
        )
    }
}
