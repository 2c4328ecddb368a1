use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::collision::{self_collision, wall_collision};
use crate::config::{GameConfig, GridSize};
use crate::error::GameError;
use crate::food::Food;
use crate::input::{direction_change_is_valid, Direction, GameInput};
use crate::score::ScoreTracker;
use crate::snake::{Position, Snake};
use crate::speed::SpeedController;
use crate::walls::WallSet;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting for the player to start a round.
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    SelfCollision,
    WallCollision,
    GridFull,
}

/// Board contents after a tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BoardSnapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub walls: Vec<Position>,
}

/// Result of one [`GameSimulation::tick`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Moved(BoardSnapshot),
    Ate {
        board: BoardSnapshot,
        score: u32,
        multiplier: f64,
    },
    GameOver {
        final_score: u32,
        high_scores: Vec<u32>,
    },
}

/// Notifications queued for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    FoodEaten { score: u32 },
    LevelUp { multiplier: f64, tick_interval_ms: u64 },
    WallsRegenerated,
    GameOver { final_score: u32, reason: DeathReason },
}

/// Complete rule engine for one board.
///
/// Rounds are started, ticked and restarted in place; the high-score
/// history is the only state carried from one round to the next.
#[derive(Debug, Clone)]
pub struct GameSimulation {
    config: GameConfig,
    snake: Snake,
    food: Food,
    walls: WallSet,
    scores: ScoreTracker,
    speed: SpeedController,
    direction: Direction,
    pending_direction: Option<Direction>,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl GameSimulation {
    /// Creates an idle simulation seeded from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic simulation for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        if config.validate().is_err() {
            return Err(GameError::InvariantViolation("simulation config is invalid"));
        }

        let snake = Snake::new(start_position(config.grid));
        let food = Food::spawn(&mut rng, config.grid, config.placement_retries, |position| {
            snake.occupies(position)
        })?;

        Ok(Self {
            snake,
            food,
            walls: WallSet::new(),
            scores: ScoreTracker::new(config.high_score_capacity),
            speed: SpeedController::new(config.base_tick_interval_ms),
            direction: Direction::Right,
            pending_direction: None,
            status: GameStatus::Idle,
            death_reason: None,
            tick_count: 0,
            events: Vec::new(),
            rng,
            config,
        })
    }

    /// Begins a fresh round from `Idle` or `GameOver`.
    pub fn start(&mut self) -> Result<(), GameError> {
        if !matches!(self.status, GameStatus::Idle | GameStatus::GameOver) {
            return Ok(());
        }

        self.reset_round()?;
        self.status = GameStatus::Running;
        self.events.push(GameEvent::Started);
        info!(
            width = self.config.grid.width,
            height = self.config.grid.height,
            "round started"
        );
        Ok(())
    }

    /// Abandons the current round and waits for a new start.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.reset_round()?;
        self.status = GameStatus::Idle;
        self.events.push(GameEvent::Restarted);
        info!("round restarted");
        Ok(())
    }

    /// Toggles between `Running` and `Paused`; ignored in other states.
    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                self.events.push(GameEvent::Paused);
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                self.events.push(GameEvent::Resumed);
            }
            GameStatus::Idle | GameStatus::GameOver => {}
        }
    }

    /// Buffers a heading change for the next tick.
    ///
    /// Only accepted while running; reversals of the current heading are
    /// dropped. The last accepted direction before a tick wins.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status != GameStatus::Running {
            return;
        }
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) -> Result<(), GameError> {
        match input {
            GameInput::Direction(direction) => self.set_direction(direction),
            GameInput::Pause => self.toggle_pause(),
            GameInput::Confirm => self.start()?,
            GameInput::Restart => self.restart()?,
            GameInput::Quit => {}
        }
        Ok(())
    }

    /// Advances the simulation by one cell.
    ///
    /// Returns `Ok(None)` unless the round is running. A placement failure
    /// ends the round before the error is returned.
    pub fn tick(&mut self) -> Result<Option<TickOutcome>, GameError> {
        if self.status != GameStatus::Running {
            return Ok(None);
        }

        self.tick_count += 1;
        if let Some(next) = self.pending_direction.take() {
            if direction_change_is_valid(self.direction, next) {
                self.direction = next;
            }
        }

        let bounds = self.config.grid;
        let new_head = self.snake.head().step(self.direction, bounds);
        let ate_food = new_head == self.food.position;
        self.snake.advance(new_head, ate_food);

        if ate_food {
            if let Err(error) = self.on_food_eaten() {
                self.end_round(DeathReason::GridFull);
                return Err(error);
            }
        }

        let reason = if self_collision(&self.snake) {
            Some(DeathReason::SelfCollision)
        } else if wall_collision(&self.snake, &self.walls) {
            Some(DeathReason::WallCollision)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.end_round(reason);
            return Ok(Some(TickOutcome::GameOver {
                final_score: self.scores.score(),
                high_scores: self.scores.high_scores().to_vec(),
            }));
        }

        debug!(tick = self.tick_count, x = new_head.x, y = new_head.y, "tick");

        let board = self.snapshot();
        if ate_food {
            Ok(Some(TickOutcome::Ate {
                board,
                score: self.scores.score(),
                multiplier: self.speed.multiplier(),
            }))
        } else {
            Ok(Some(TickOutcome::Moved(board)))
        }
    }

    /// Returns and clears the queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Captures the current board contents.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food.position,
            walls: self.walls.cells().to_vec(),
        }
    }

    #[must_use]
    pub fn current_score(&self) -> u32 {
        self.scores.score()
    }

    #[must_use]
    pub fn current_speed_multiplier(&self) -> f64 {
        self.speed.multiplier()
    }

    /// Milliseconds the driver should wait before the next tick.
    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.speed.tick_interval_ms()
    }

    /// Delay before the next tick, as re-read by the driver after each one.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval()
    }

    #[must_use]
    pub fn high_scores(&self) -> &[u32] {
        self.scores.high_scores()
    }

    /// Best finished round so far, 0 before the first game over.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    #[must_use]
    pub fn grid_dimensions(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn on_food_eaten(&mut self) -> Result<(), GameError> {
        self.scores.add(self.config.points_per_food);
        let score = self.scores.score();

        let bounds = self.config.grid;
        let retries = self.config.placement_retries;
        let snake = &self.snake;
        let walls = &self.walls;
        self.food.relocate(&mut self.rng, bounds, retries, |position| {
            snake.occupies(position) || walls.contains(position)
        })?;
        self.events.push(GameEvent::FoodEaten { score });

        if self
            .speed
            .maybe_level_up(score, self.config.level_threshold, self.config.speed_step)
        {
            info!(
                score,
                multiplier = self.speed.multiplier(),
                tick_interval_ms = self.speed.tick_interval_ms(),
                "speed level up"
            );
            self.events.push(GameEvent::LevelUp {
                multiplier: self.speed.multiplier(),
                tick_interval_ms: self.speed.tick_interval_ms(),
            });
        }

        if score >= self.config.wall_trigger_min_score
            && score % self.config.wall_trigger_every == 0
        {
            let snake = &self.snake;
            let food = self.food.position;
            self.walls.regenerate(
                &mut self.rng,
                bounds,
                self.config.wall_count,
                retries,
                |position| snake.occupies(position) || position == food,
            )?;
            info!(score, count = self.walls.len(), "walls regenerated");
            self.events.push(GameEvent::WallsRegenerated);
        }

        Ok(())
    }

    fn end_round(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        self.scores.record_round_end();
        let final_score = self.scores.score();
        info!(final_score, ?reason, "game over");
        self.events.push(GameEvent::GameOver {
            final_score,
            reason,
        });
    }

    fn reset_round(&mut self) -> Result<(), GameError> {
        let bounds = self.config.grid;
        self.snake = Snake::new(start_position(bounds));
        self.walls.clear();
        let snake = &self.snake;
        self.food = Food::spawn(
            &mut self.rng,
            bounds,
            self.config.placement_retries,
            |position| snake.occupies(position),
        )?;
        self.scores.reset();
        self.speed.reset();
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.death_reason = None;
        self.tick_count = 0;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, snake: Snake, food: Position, walls: WallSet) {
        self.snake = snake;
        self.food = Food::new(food);
        self.walls = walls;
    }
}

fn start_position(bounds: GridSize) -> Position {
    Position::new(i32::from(bounds.width / 2), i32::from(bounds.height / 2))
}
