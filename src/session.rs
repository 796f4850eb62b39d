use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::game::{GameEvent, GameSnapshot, GameState};
use crate::input::GameInput;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::score::BestScoreStore;

/// One running game together with its persistence and timer collaborators.
///
/// New records are written to the store as they happen, and the timer is
/// cancelled and restarted whenever the tick interval changes.
#[derive(Debug)]
pub struct GameSession<S, B> {
    state: GameState,
    scheduler: S,
    store: B,
    timer: TimerHandle,
    scheduled_interval: Duration,
}

impl<S: Scheduler, B: BestScoreStore> GameSession<S, B> {
    /// Loads the best score, builds the first round and starts the timer.
    pub fn new(config: GameConfig, store: B, scheduler: S, seed: Option<u64>) -> Self {
        let best_score = store.load_best_score();
        let state = match seed {
            Some(seed) => GameState::new_with_seed(config, best_score, seed),
            None => GameState::new(config, best_score),
        };

        Self::from_state(state, store, scheduler)
    }

    /// Wraps an existing state, scheduling at its current interval.
    pub fn from_state(state: GameState, store: B, mut scheduler: S) -> Self {
        let scheduled_interval = state.tick_interval();
        let timer = scheduler.schedule_repeating(scheduled_interval);
        log::info!(
            "session ready: best score {}, tick {}ms",
            state.best_score,
            scheduled_interval.as_millis()
        );

        Self {
            state,
            scheduler,
            store,
            timer,
            scheduled_interval,
        }
    }

    /// Runs one simulation step if the timer is due.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<GameEvent>> {
        if !self.scheduler.poll_due(now) {
            return None;
        }

        Some(self.tick())
    }

    /// Runs one simulation step unconditionally.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let events = self.state.tick();
        self.after(&events);
        events
    }

    /// Routes one input event to the game.
    pub fn handle_input(&mut self, input: GameInput) -> Vec<GameEvent> {
        let events = self.state.apply_input(input);
        self.after(&events);
        events
    }

    /// Explicit restart action.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.handle_input(GameInput::Restart)
    }

    fn after(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::NewBestScore(score) => {
                    log::info!("new best score: {score}");
                    self.store.save_best_score(score);
                }
                GameEvent::Ended(reason) => {
                    log::info!(
                        "game over ({reason:?}) with score {} after {} ticks",
                        self.state.score,
                        self.state.tick_count
                    );
                }
                GameEvent::ObstaclesAdded { count } => {
                    log::debug!(
                        "{count} obstacle(s) added, {} on the field",
                        self.state.obstacles.len()
                    );
                }
                other => log::debug!("{other:?}"),
            }
        }

        self.sync_schedule();
    }

    fn sync_schedule(&mut self) {
        let interval = self.state.tick_interval();
        if interval == self.scheduled_interval {
            return;
        }

        self.scheduler.cancel(self.timer);
        self.timer = self.scheduler.schedule_repeating(interval);
        self.scheduled_interval = interval;
        log::debug!("tick interval now {}ms", interval.as_millis());
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        self.state.snapshot()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access for collaborators that are driven from outside.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[must_use]
    pub fn store(&self) -> &B {
        &self.store
    }

    #[must_use]
    pub fn scheduled_interval(&self) -> Duration {
        self.scheduled_interval
    }
}
