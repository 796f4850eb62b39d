use std::time::{Duration, Instant};

use obstacle_snake::config::{GameConfig, Preset};
use obstacle_snake::game::{GameEvent, GamePhase, GameState};
use obstacle_snake::input::{Direction, GameInput};
use obstacle_snake::obstacles::Obstacles;
use obstacle_snake::scheduler::{Scheduler, TimerHandle};
use obstacle_snake::score::{BestScoreStore, MemoryScoreStore};
use obstacle_snake::session::GameSession;
use obstacle_snake::snake::{Position, Snake};

/// Records scheduler calls; fires once whenever `fire_next` is set.
#[derive(Debug, Default)]
struct ManualScheduler {
    scheduled: Vec<Duration>,
    cancelled: Vec<TimerHandle>,
    active: Option<TimerHandle>,
    next_id: u64,
    fire_next: bool,
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.scheduled.push(interval);
        self.active = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
        if self.active == Some(handle) {
            self.active = None;
        }
    }

    fn poll_due(&mut self, _now: Instant) -> bool {
        self.active.is_some() && std::mem::take(&mut self.fire_next)
    }
}

type TestSession = GameSession<ManualScheduler, MemoryScoreStore>;

fn session_with_food_ahead(preset: Preset, best: u32, score: u32) -> TestSession {
    let mut state = GameState::new_with_seed(GameConfig::preset(preset), best, 21);
    state.snake = Snake::from_segments(
        vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
        Direction::Right,
    );
    state.obstacles = Obstacles::new();
    state.food = Some(Position { x: 6, y: 5 });
    state.score = score;
    state.phase = GamePhase::Running;

    GameSession::from_state(
        state,
        MemoryScoreStore::with_value(best),
        ManualScheduler::default(),
    )
}

#[test]
fn new_session_loads_best_score_and_schedules_base_interval() {
    let session = GameSession::new(
        GameConfig::preset(Preset::Arcade),
        MemoryScoreStore::with_value(9),
        ManualScheduler::default(),
        Some(1),
    );

    assert_eq!(session.state().best_score, 9);
    assert_eq!(session.scheduler().scheduled, vec![Duration::from_millis(150)]);
    assert_eq!(session.snapshot().phase, GamePhase::NotStarted);
}

#[test]
fn poll_ticks_only_when_due() {
    let mut session = session_with_food_ahead(Preset::Arcade, 0, 0);

    assert!(session.poll(Instant::now()).is_none());

    session.scheduler_mut().fire_next = true;
    let events = session.poll(Instant::now()).expect("timer was due");
    assert!(events.contains(&GameEvent::FoodEaten { score: 1 }));
    assert!(session.poll(Instant::now()).is_none());
}

#[test]
fn new_record_is_saved_to_store() {
    let mut session = session_with_food_ahead(Preset::Arcade, 0, 0);

    session.tick();

    assert_eq!(session.store().load_best_score(), 1);
    assert_eq!(session.store().writes(), 1);
}

#[test]
fn score_below_best_is_not_saved() {
    let mut session = session_with_food_ahead(Preset::Arcade, 10, 0);

    session.tick();

    assert_eq!(session.store().writes(), 0);
    assert_eq!(session.store().load_best_score(), 10);
}

#[test]
fn interval_change_cancels_then_reschedules() {
    let mut session = session_with_food_ahead(Preset::Arcade, 0, 2);

    session.tick();

    assert_eq!(session.scheduled_interval(), Duration::from_millis(140));
    assert_eq!(
        session.scheduler().scheduled,
        vec![Duration::from_millis(150), Duration::from_millis(140)]
    );
    assert_eq!(session.scheduler().cancelled, vec![TimerHandle::new(1)]);
    assert_eq!(session.scheduler().active, Some(TimerHandle::new(2)));
}

#[test]
fn restart_restores_base_interval() {
    let mut session = session_with_food_ahead(Preset::Arcade, 0, 2);
    session.tick();

    let events = session.restart();

    assert!(events.contains(&GameEvent::TickIntervalChanged(Duration::from_millis(150))));
    assert_eq!(session.scheduled_interval(), Duration::from_millis(150));
    assert_eq!(session.scheduler().cancelled.len(), 2);
    assert_eq!(session.state().score, 0);
    assert_eq!(session.state().best_score, 3);
}

#[test]
fn constant_speed_never_reschedules() {
    let mut session = session_with_food_ahead(Preset::Classic, 0, 8);

    session.tick();
    session.handle_input(GameInput::Restart);

    assert_eq!(session.scheduler().scheduled.len(), 1);
    assert!(session.scheduler().cancelled.is_empty());
}
