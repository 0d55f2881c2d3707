//! Click-validation state machine for the call screen.
//!
//! A [`Game`] owns the current [`Session`], the random source it rolls from,
//! and the [`Scheduler`] that drives its clocks. Nothing here blocks or
//! touches the terminal: the runner feeds clicks and elapsed time in.

use std::time::Duration;

use tracing::{debug, info};

use crate::layout::{roll_decoys, Decoy, Target};
use crate::random::{RandomSource, RngSource};
use crate::timers::{
    CountdownTick, ElapsedClock, PanicCountdown, Scheduler, TimerAction, TimerHandle,
    COUNTDOWN_MAX_SECS, COUNTDOWN_MIN_SECS, GRACE_PERIOD, RESET_DELAY, TICK,
};
use crate::view::GameView;

pub const ACCEPT_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// every click on the target counts
    Classic,
    /// clicks count half the time and a countdown keeps ticking
    #[default]
    Panic,
}

impl Variant {
    /// Bounds for `required_clicks`
    pub fn click_range(&self) -> (u32, u32) {
        match self {
            Variant::Classic => (5, 15),
            Variant::Panic => (3, 5),
        }
    }

    pub fn has_countdown(&self) -> bool {
        matches!(self, Variant::Panic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// the click counted and the session goes on
    Counted,
    /// the coin said no; everything moved anyway
    Rejected,
    /// the click reached the required count
    Completed,
    /// a decoy was clicked
    Dodged,
    /// clicks are not accepted right now
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub required_clicks: u32,
    pub current_clicks: u32,
    pub phase: Phase,
    pub target: Target,
    pub decoys: Vec<Decoy>,
}

impl Session {
    pub fn roll(variant: Variant, rng: &mut dyn RandomSource) -> Self {
        let (lo, hi) = variant.click_range();
        let required_clicks = rng.range_inclusive(lo, hi);
        let target = Target::roll(rng);
        let decoys = roll_decoys(rng);
        Self {
            required_clicks,
            current_clicks: 0,
            phase: Phase::Active,
            target,
            decoys,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }
}

#[derive(Debug, Default)]
struct Timers {
    elapsed: Option<TimerHandle>,
    countdown: Option<TimerHandle>,
    grace: Option<TimerHandle>,
    reset: Option<TimerHandle>,
}

pub struct Game {
    variant: Variant,
    rng: Box<dyn RandomSource>,
    session: Session,
    scheduler: Scheduler,
    timers: Timers,
    elapsed: ElapsedClock,
    countdown: Option<PanicCountdown>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("variant", &self.variant)
            .field("session", &self.session)
            .field("elapsed", &self.elapsed)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(variant: Variant) -> Self {
        Self::with_source(variant, Box::new(RngSource::thread()))
    }

    pub fn with_source(variant: Variant, mut rng: Box<dyn RandomSource>) -> Self {
        let session = Session::roll(variant, rng.as_mut());
        let mut game = Self {
            variant,
            rng,
            session,
            scheduler: Scheduler::new(),
            timers: Timers::default(),
            elapsed: ElapsedClock::default(),
            countdown: None,
        };
        game.start_timers();
        info!(
            variant = %variant,
            required = game.session.required_clicks,
            decoys = game.session.decoys.len(),
            "call started"
        );
        game
    }

    /// Re-rolls the session and restarts both clocks
    pub fn initialize_session(&mut self) {
        self.stop_timers();
        self.session = Session::roll(self.variant, self.rng.as_mut());
        self.start_timers();
        info!(
            required = self.session.required_clicks,
            decoys = self.session.decoys.len(),
            "session initialized"
        );
    }

    fn start_timers(&mut self) {
        self.elapsed.reset();
        self.timers.elapsed = Some(self.scheduler.every(TICK, TimerAction::ElapsedTick));
        if self.variant.has_countdown() {
            let secs = self.roll_countdown();
            self.countdown = Some(PanicCountdown::new(secs));
            self.timers.countdown = Some(self.scheduler.every(TICK, TimerAction::CountdownTick));
        }
    }

    fn stop_timers(&mut self) {
        let timers = std::mem::take(&mut self.timers);
        for handle in [timers.elapsed, timers.countdown, timers.grace, timers.reset]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(handle);
        }
    }

    /// Cancels every pending task; the game no longer reacts to time
    pub fn teardown(&mut self) {
        self.stop_timers();
        self.scheduler.cancel_all();
        debug!("game torn down");
    }

    fn roll_countdown(&mut self) -> u32 {
        self.rng.range_inclusive(COUNTDOWN_MIN_SECS, COUNTDOWN_MAX_SECS)
    }

    pub fn on_target_click(&mut self) -> ClickOutcome {
        if self.session.is_terminal() {
            return ClickOutcome::Ignored;
        }

        let accepted = match self.variant {
            Variant::Classic => true,
            Variant::Panic => self.rng.chance(ACCEPT_PROBABILITY),
        };

        if accepted {
            self.session.current_clicks += 1;
            if self.session.current_clicks >= self.session.required_clicks {
                self.session.phase = Phase::Terminal;
                let reset = self.scheduler.once(RESET_DELAY, TimerAction::SessionReset);
                self.timers.reset = Some(reset);
                info!(
                    clicks = self.session.current_clicks,
                    elapsed = %self.elapsed.formatted(),
                    "call ended! (just kidding)"
                );
                return ClickOutcome::Completed;
            }
        }

        match self.variant {
            Variant::Classic => {
                self.session.target.reroll(self.rng.as_mut());
                self.shuffle_some_decoys(None);
            }
            Variant::Panic => self.shuffle_everything(),
        }

        debug!(
            accepted,
            current = self.session.current_clicks,
            required = self.session.required_clicks,
            "target clicked"
        );

        if accepted {
            ClickOutcome::Counted
        } else {
            ClickOutcome::Rejected
        }
    }

    pub fn on_decoy_click(&mut self, id: usize) -> ClickOutcome {
        if self.session.is_terminal() || !self.session.decoys.iter().any(|d| d.id == id) {
            return ClickOutcome::Ignored;
        }

        match self.variant {
            Variant::Classic => self.shuffle_some_decoys(Some(id)),
            Variant::Panic => self.shuffle_everything(),
        }
        debug!(id, "decoy clicked");
        ClickOutcome::Dodged
    }

    /// Each decoy moves on a coin flip; `always` moves regardless
    fn shuffle_some_decoys(&mut self, always: Option<usize>) {
        let rng = self.rng.as_mut();
        for decoy in self.session.decoys.iter_mut() {
            if Some(decoy.id) == always || rng.chance(0.5) {
                decoy.reroll(rng);
            }
        }
    }

    fn shuffle_everything(&mut self) {
        let rng = self.rng.as_mut();
        self.session.target.reroll(rng);
        for decoy in self.session.decoys.iter_mut() {
            decoy.reroll(rng);
        }
    }

    /// Advances the clocks by `dt`, firing every task that falls due
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(action) = self.scheduler.fire_next(until) {
            self.apply(action);
        }
        self.scheduler.settle(until);
    }

    fn apply(&mut self, action: TimerAction) {
        match action {
            TimerAction::ElapsedTick => self.elapsed.tick(),
            TimerAction::CountdownTick => {
                let reached_zero = self
                    .countdown
                    .as_mut()
                    .map(|c| c.tick() == CountdownTick::ReachedZero)
                    .unwrap_or(false);
                if reached_zero {
                    debug!("panic countdown hit zero");
                    let grace = self.scheduler.once(GRACE_PERIOD, TimerAction::CountdownReseed);
                    self.timers.grace = Some(grace);
                }
            }
            TimerAction::CountdownReseed => {
                self.timers.grace = None;
                let secs = self.roll_countdown();
                if let Some(countdown) = self.countdown.as_mut() {
                    countdown.reseed(secs);
                }
            }
            TimerAction::SessionReset => {
                self.timers.reset = None;
                self.initialize_session();
            }
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.secs()
    }

    pub fn elapsed(&self) -> &ElapsedClock {
        &self.elapsed
    }

    pub fn countdown(&self) -> Option<&PanicCountdown> {
        self.countdown.as_ref()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn view(&self) -> GameView {
        GameView::project(self)
    }
}
