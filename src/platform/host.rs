//! Tokio host for the game loop
//!
//! Frames, collisions and taps arrive on the host's own task; countdown ticks
//! come from a spawned interval task. Both go through one mutex around the
//! `Game`, so no two events interleave mid-mutation. After every mutation the
//! ticker is brought in line with the game's countdown session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::consts::TIMER_PERIOD_SECS;
use crate::scene::AnchorId;
use crate::sim::{
    CollisionEvent, FrameTick, Game, GameEvent, GameState, Hud, TapEvent, TimerSession, TimerTick,
    UiSignal,
};

/// Game handle shared between the host and its ticker
pub(crate) type SharedGame = Arc<Mutex<Game>>;

fn lock(game: &Mutex<Game>) -> MutexGuard<'_, Game> {
    // Game mutations are total; a panic elsewhere cannot leave it half-updated
    game.lock().unwrap_or_else(PoisonError::into_inner)
}

struct RunningTicker {
    session: TimerSession,
    handle: JoinHandle<()>,
}

/// Owns the shared game and its countdown ticker.
///
/// Must be driven from inside a Tokio runtime.
pub struct GameHost {
    game: SharedGame,
    ticker: Option<RunningTicker>,
    events_tx: mpsc::UnboundedSender<GameEvent>,
    period: Duration,
}

impl GameHost {
    /// Wrap a game. Every event it emits is also sent to the returned receiver.
    ///
    /// The channel is unbounded: a host that keeps the receiver must drain it
    /// (or drop it) or the queue grows for as long as the game runs.
    pub fn new(game: Game) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        Self::with_period(game, Duration::from_secs_f64(TIMER_PERIOD_SECS))
    }

    pub fn with_period(game: Game, period: Duration) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let host = Self {
            game: Arc::new(Mutex::new(game)),
            ticker: None,
            events_tx,
            period,
        };
        (host, events_rx)
    }

    pub fn hud(&self) -> Hud {
        lock(&self.game).hud()
    }

    /// Read the current state under the lock
    pub fn with_state<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(lock(&self.game).state())
    }

    /// Whether a ticker task is delivering countdown ticks
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    /// Run one mutation under the lock, then bring the ticker in line with
    /// the game's countdown session
    pub fn dispatch<F>(&mut self, f: F) -> Vec<GameEvent>
    where
        F: FnOnce(&mut Game) -> Vec<GameEvent>,
    {
        let (events, session) = {
            let mut game = lock(&self.game);
            let events = f(&mut game);
            (events, game.timer_session())
        };
        self.sync_ticker(session);
        for event in &events {
            let _ = self.events_tx.send(*event);
        }
        events
    }

    pub fn anchor_ready(&mut self, anchor: AnchorId) -> Vec<GameEvent> {
        self.dispatch(|game| game.on_anchor_ready(anchor))
    }

    pub fn ui_signal(&mut self, signal: UiSignal) -> Vec<GameEvent> {
        self.dispatch(|game| game.process_ui_signal(signal))
    }

    pub fn frame(&mut self, frame: FrameTick) -> Vec<GameEvent> {
        self.dispatch(|game| game.on_frame_tick(frame))
    }

    pub fn collision(&mut self, collision: CollisionEvent) -> Vec<GameEvent> {
        self.dispatch(|game| game.on_collision(collision))
    }

    pub fn tap(&mut self, tap: TapEvent) -> Vec<GameEvent> {
        self.dispatch(|game| game.on_tap(tap))
    }

    /// Exactly one ticker runs, and only for the game's current session
    fn sync_ticker(&mut self, session: Option<TimerSession>) {
        if self.ticker.as_ref().map(|t| t.session) == session {
            return;
        }
        if let Some(old) = self.ticker.take() {
            old.handle.abort();
        }
        if let Some(session) = session {
            self.spawn_ticker(session);
        }
    }

    fn spawn_ticker(&mut self, session: TimerSession) {
        let handle = tokio::spawn(run_ticker(
            Arc::clone(&self.game),
            session,
            self.period,
            self.events_tx.clone(),
        ));
        self.ticker = Some(RunningTicker { session, handle });
    }
}

impl Drop for GameHost {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.handle.abort();
        }
    }
}

/// Deliver one tick per period until the session is over
async fn run_ticker(
    game: SharedGame,
    session: TimerSession,
    period: Duration,
    events_tx: mpsc::UnboundedSender<GameEvent>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let events = lock(&game).on_timer_tick(TimerTick { session });

        // An empty result means the session was already invalidated
        let finished = events.is_empty()
            || events
                .iter()
                .any(|e| matches!(e, GameEvent::TimerStopped(s) if *s == session));
        for event in events {
            let _ = events_tx.send(event);
        }
        if finished {
            break;
        }
    }
    log::debug!("Ticker for {:?} finished", session);
}
