use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{EdgePolicy, GameConfig, GridSize, RestartPolicy};
use crate::difficulty::Difficulty;
use crate::grid::{occupied, random_free_tile};
use crate::input::{Direction, GameInput};
use crate::obstacles::Obstacles;
use crate::snake::{Position, Snake};

/// Current high-level gameplay phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GamePhase {
    NotStarted,
    Running,
    Over,
}

/// Why a game reached [`GamePhase::Over`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OverReason {
    Obstacle,
    SelfCollision,
    Wall,
    /// The snake filled every free cell.
    Victory,
    /// Reset left no free cell for the first food.
    NoRoomForFood,
}

impl OverReason {
    #[must_use]
    pub fn is_win(self) -> bool {
        self == Self::Victory
    }

    fn headline(self) -> &'static str {
        match self {
            Self::Obstacle => "Game over! You crashed into an obstacle.",
            Self::SelfCollision => "Game over! You crashed into yourself.",
            Self::Wall => "Game over! You crashed into a wall.",
            Self::Victory => "You win! No free tiles left.",
            Self::NoRoomForFood => "No space left to spawn food.",
        }
    }
}

/// Notable transitions produced by [`GameState::tick`] and
/// [`GameState::apply_input`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    Started,
    FoodEaten { score: u32 },
    /// The best score was beaten and should be persisted.
    NewBestScore(u32),
    ObstaclesAdded { count: usize },
    TickIntervalChanged(Duration),
    Ended(OverReason),
    Reset,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub obstacles: Obstacles,
    pub food: Option<Position>,
    pub score: u32,
    pub best_score: u32,
    pub phase: GamePhase,
    pub over_reason: Option<OverReason>,
    pub tick_count: u64,
    config: GameConfig,
    difficulty: Difficulty,
    tick_interval: Duration,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from system entropy.
    #[must_use]
    pub fn new(config: GameConfig, best_score: u32) -> Self {
        Self::from_rng(config, best_score, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, best_score: u32, seed: u64) -> Self {
        Self::from_rng(config, best_score, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, best_score: u32, rng: StdRng) -> Self {
        let difficulty = Difficulty::new(config.obstacles, config.speed);
        let mut state = Self {
            snake: Snake::new(Position { x: 0, y: 0 }, Direction::Right),
            obstacles: Obstacles::new(),
            food: None,
            score: 0,
            best_score,
            phase: GamePhase::NotStarted,
            over_reason: None,
            tick_count: 0,
            config,
            difficulty,
            tick_interval: difficulty.tick_interval(0),
            rng,
        };
        state.rebuild(&mut Vec::new());
        state
    }

    /// Rebuilds every entity for a new round. The best score is kept.
    ///
    /// Emits `TickIntervalChanged` when the round being discarded had sped up.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        let mut events = vec![GameEvent::Reset];
        self.rebuild(&mut events);
        events
    }

    fn rebuild(&mut self, events: &mut Vec<GameEvent>) {
        let bounds = self.bounds();
        let center = Position {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        };

        self.snake = Snake::straight(center, Direction::Right, self.config.initial_snake_length);
        self.obstacles.clear();
        self.food = None;
        self.score = 0;
        self.phase = GamePhase::NotStarted;
        self.over_reason = None;
        self.tick_count = 0;

        let interval = self.difficulty.tick_interval(0);
        if interval != self.tick_interval {
            self.tick_interval = interval;
            events.push(GameEvent::TickIntervalChanged(interval));
        }

        self.fill_obstacles(self.difficulty.base_obstacle_count());
        self.food = self.spawn_food();

        if self.food.is_none() {
            self.finish(OverReason::NoRoomForFood);
            events.push(GameEvent::Ended(OverReason::NoRoomForFood));
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != GamePhase::Running {
            return events;
        }

        self.tick_count += 1;
        self.snake.commit_direction();

        let bounds = self.bounds();
        let next_head = match self.config.edge_policy {
            EdgePolicy::Wrap => self.snake.next_head_position().wrapped(bounds),
            EdgePolicy::Wall => self.snake.next_head_position(),
        };

        // First match wins. The tail has not moved yet, so it still counts.
        let collision = if self.obstacles.contains(next_head) {
            Some(OverReason::Obstacle)
        } else if self.snake.occupies(next_head) {
            Some(OverReason::SelfCollision)
        } else if !next_head.is_within_bounds(bounds) {
            Some(OverReason::Wall)
        } else {
            None
        };

        if let Some(reason) = collision {
            self.finish(reason);
            events.push(GameEvent::Ended(reason));
            return events;
        }

        self.snake.push_head(next_head);

        if self.food == Some(next_head) {
            self.eat_food(&mut events);
        } else {
            let _ = self.snake.pop_tail();
        }

        events
    }

    fn eat_food(&mut self, events: &mut Vec<GameEvent>) {
        self.score += 1;
        events.push(GameEvent::FoodEaten { score: self.score });

        if self.score > self.best_score {
            self.best_score = self.score;
            events.push(GameEvent::NewBestScore(self.best_score));
        }

        let added = self.fill_obstacles(self.difficulty.target_obstacle_count(self.score));
        if added > 0 {
            events.push(GameEvent::ObstaclesAdded { count: added });
        }

        let interval = self.difficulty.tick_interval(self.score);
        if interval != self.tick_interval {
            self.tick_interval = interval;
            events.push(GameEvent::TickIntervalChanged(interval));
        }

        self.food = self.spawn_food();
        if self.food.is_none() {
            self.finish(OverReason::Victory);
            events.push(GameEvent::Ended(OverReason::Victory));
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) -> Vec<GameEvent> {
        match input {
            GameInput::Direction(direction) => match self.phase {
                GamePhase::Over => match self.config.restart_policy {
                    RestartPolicy::AnyKey => {
                        let mut events = self.reset();
                        if self.phase == GamePhase::NotStarted {
                            events.extend(self.steer(direction));
                        }
                        events
                    }
                    RestartPolicy::ExplicitOnly => Vec::new(),
                },
                GamePhase::NotStarted | GamePhase::Running => {
                    self.steer(direction).into_iter().collect()
                }
            },
            GameInput::Restart => self.reset(),
            GameInput::Quit => Vec::new(),
        }
    }

    fn steer(&mut self, direction: Direction) -> Option<GameEvent> {
        if !self.snake.queue_direction(direction) {
            return None;
        }

        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
            return Some(GameEvent::Started);
        }

        None
    }

    fn finish(&mut self, reason: OverReason) {
        self.phase = GamePhase::Over;
        self.over_reason = Some(reason);
    }

    /// Adds obstacles one at a time until `target` is reached or the grid is full.
    fn fill_obstacles(&mut self, target: usize) -> usize {
        if self.obstacles.len() >= target {
            return 0;
        }

        let bounds = self.bounds();
        let extra: Vec<Position> = self.food.into_iter().collect();
        let mut blocked = occupied(&self.snake, &self.obstacles, &extra);
        let mut added = 0;

        while self.obstacles.len() < target {
            let Some(cell) = random_free_tile(&mut self.rng, bounds, &blocked) else {
                log::debug!(
                    "obstacle placement stopped at {}/{target}: no free cell",
                    self.obstacles.len()
                );
                break;
            };

            blocked.insert(cell);
            self.obstacles.insert(cell);
            added += 1;
        }

        added
    }

    fn spawn_food(&mut self) -> Option<Position> {
        let bounds = self.bounds();
        let blocked = occupied(&self.snake, &self.obstacles, &[]);
        random_free_tile(&mut self.rng, bounds, &blocked)
    }

    /// Returns the player-facing status line for the current phase.
    #[must_use]
    pub fn status_message(&self) -> String {
        match (self.phase, self.over_reason) {
            (GamePhase::NotStarted, _) => "Press any movement key to begin.".to_owned(),
            (GamePhase::Running, _) => String::new(),
            (GamePhase::Over, reason) => {
                let headline = reason.map_or("Game over!", OverReason::headline);
                let prompt = match self.config.restart_policy {
                    RestartPolicy::AnyKey => "Press any movement key to play again.",
                    RestartPolicy::ExplicitOnly => "Press Restart to play again.",
                };
                format!("{headline} {prompt}")
            }
        }
    }

    /// Returns a read-only view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            snake: &self.snake,
            obstacles: self.obstacles.as_slice(),
            food: self.food,
            score: self.score,
            best_score: self.best_score,
            obstacle_count: self.obstacles.len(),
            phase: self.phase,
            over_reason: self.over_reason,
            message: self.status_message(),
            tick_interval: self.tick_interval,
            bounds: self.bounds(),
            edge_policy: self.config.edge_policy,
        }
    }

    /// Current delay between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.bounds()
    }
}

/// Everything a renderer may read after a tick or reset.
#[derive(Debug, Clone)]
pub struct GameSnapshot<'a> {
    pub snake: &'a Snake,
    pub obstacles: &'a [Position],
    pub food: Option<Position>,
    pub score: u32,
    pub best_score: u32,
    pub obstacle_count: usize,
    pub phase: GamePhase,
    pub over_reason: Option<OverReason>,
    pub message: String,
    pub tick_interval: Duration,
    pub bounds: GridSize,
    pub edge_policy: EdgePolicy,
}
