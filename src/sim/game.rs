//! Game loop and lifecycle state machine
//!
//! `Game` owns the authoritative state and is the only thing that mutates it.
//! Every entry point re-checks the phase before touching anything, so events
//! delivered late (a timer tick racing a loss, a tap after the win screen)
//! are dropped without effect.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionEvent, resolve_collision};
use super::input::{TapEvent, resolve_tap};
use super::state::{CandyId, GamePhase, GameState, HandId};
use super::tick::{FrameTick, UpdateThrottle, advance_hands};
use super::timer::{CountdownTimer, TimerSession, TimerTick};
use crate::error::SetupError;
use crate::scene::AnchorId;
use crate::tuning::Tuning;

/// Signals sent by the UI buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiSignal {
    StartPressed,
    RestartPressed,
}

/// Notable things that happened while handling an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Entities were created and attached to the anchor
    SceneReady { anchor: AnchorId },
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// The host must start delivering ticks for this session
    TimerStarted(TimerSession),
    /// The host must stop delivering ticks for this session
    TimerStopped(TimerSession),
    Countdown { seconds_remaining: u32 },
    HandTapped { hand: HandId, health: i32, boosted: bool },
    CandyCaught { candy: CandyId },
}

/// Values the UI layer reads after each mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub status: String,
    pub time_left: String,
    pub candies_left: usize,
}

/// The game loop
#[derive(Debug, Clone)]
pub struct Game {
    tuning: Tuning,
    state: GameState,
    timer: CountdownTimer,
    throttle: UpdateThrottle,
    anchor: Option<AnchorId>,
}

impl Game {
    /// Create a game in the Start phase. Fails on unusable tuning.
    pub fn new(tuning: Tuning) -> Result<Self, SetupError> {
        if let Err(e) = tuning.validate() {
            log::error!("Game setup failed: {}", e);
            return Err(e);
        }
        Ok(Self {
            state: GameState::new(&tuning),
            tuning,
            timer: CountdownTimer::new(),
            throttle: UpdateThrottle::default(),
            anchor: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn anchor(&self) -> Option<AnchorId> {
        self.anchor
    }

    /// Session of the running countdown, if any
    pub fn timer_session(&self) -> Option<TimerSession> {
        self.timer.session()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.state.phase,
            status: self.state.phase.as_str().to_string(),
            time_left: self.state.seconds_remaining.to_string(),
            candies_left: self.state.candies_left(),
        }
    }

    /// First-time scene setup when the tracking target is recognized.
    ///
    /// Only the first anchor spawns entities; later anchors are ignored so
    /// entity handles stay stable.
    pub fn on_anchor_ready(&mut self, anchor: AnchorId) -> Vec<GameEvent> {
        if let Some(existing) = self.anchor {
            log::debug!("Ignoring anchor {:?}, already attached to {:?}", anchor, existing);
            return Vec::new();
        }

        self.state.spawn_entities(&self.tuning);
        self.anchor = Some(anchor);
        log::info!(
            "Attached {} hands and {} candies to anchor {:?}",
            self.state.hands.len(),
            self.state.candies.len(),
            anchor
        );
        vec![GameEvent::SceneReady { anchor }]
    }

    pub fn process_ui_signal(&mut self, signal: UiSignal) -> Vec<GameEvent> {
        match signal {
            UiSignal::StartPressed => self.start_game(),
            UiSignal::RestartPressed => self.restart(),
        }
    }

    /// Leave the title screen and begin a session
    pub fn start_game(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase != GamePhase::Start {
            log::debug!("Ignoring start in phase {:?}", self.state.phase);
            return events;
        }

        self.stop_timer(&mut events);
        self.state.reset(&self.tuning);
        self.throttle.clear();
        self.set_phase(GamePhase::InProgress, &mut events);
        events
    }

    /// Go back to the title screen after a win or loss
    pub fn restart(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.state.phase.is_finished() {
            log::debug!("Ignoring restart in phase {:?}", self.state.phase);
            return events;
        }

        self.stop_timer(&mut events);
        self.state.reset(&self.tuning);
        self.throttle.clear();
        self.set_phase(GamePhase::Start, &mut events);
        events
    }

    /// Advance the simulation for one rendered frame
    pub fn on_frame_tick(&mut self, frame: FrameTick) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase != GamePhase::InProgress {
            return events;
        }

        if let Some(session) = self.timer.start() {
            log::debug!("Countdown started ({:?})", session);
            events.push(GameEvent::TimerStarted(session));
        }

        if !self.state.hands.is_empty()
            && self
                .throttle
                .accept(frame.time, self.tuning.hand_update_interval)
        {
            advance_hands(&mut self.state);
        }

        if self.state.all_candies_caught() {
            self.stop_timer(&mut events);
            self.set_phase(GamePhase::Lose, &mut events);
        }
        events
    }

    /// One second of the countdown elapsed
    pub fn on_timer_tick(&mut self, tick: TimerTick) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.timer.accepts(&tick) {
            log::debug!("Discarding stale tick for {:?}", tick.session);
            return events;
        }
        if self.state.phase != GamePhase::InProgress {
            self.stop_timer(&mut events);
            return events;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        events.push(GameEvent::Countdown {
            seconds_remaining: self.state.seconds_remaining,
        });

        if self.state.seconds_remaining == 0 {
            self.stop_timer(&mut events);
            self.set_phase(GamePhase::Win, &mut events);
        }
        events
    }

    /// A hand touched a candy
    pub fn on_collision(&mut self, collision: CollisionEvent) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::InProgress {
            return Vec::new();
        }

        match resolve_collision(&mut self.state, &collision) {
            Some(candy) => {
                log::info!("{} ate {} ({} left)", collision.hand, candy, self.state.candies_left());
                vec![GameEvent::CandyCaught { candy }]
            }
            None => Vec::new(),
        }
    }

    /// The player tapped the screen
    pub fn on_tap(&mut self, tap: TapEvent) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::InProgress {
            return Vec::new();
        }

        match resolve_tap(&mut self.state, &tap, &self.tuning) {
            Some(hit) => {
                if hit.boosted {
                    log::debug!("{} is angry, speed boosted", hit.hand);
                }
                vec![GameEvent::HandTapped {
                    hand: hit.hand,
                    health: hit.health,
                    boosted: hit.boosted,
                }]
            }
            None => Vec::new(),
        }
    }

    fn stop_timer(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(session) = self.timer.stop() {
            log::debug!("Countdown stopped ({:?})", session);
            events.push(GameEvent::TimerStopped(session));
        }
    }

    fn set_phase(&mut self, to: GamePhase, events: &mut Vec<GameEvent>) {
        let from = self.state.phase;
        self.state.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        events.push(GameEvent::PhaseChanged { from, to });
    }
}
