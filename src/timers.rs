//! Scheduled tasks on a virtual clock, plus the two clocks the call screen shows.
//!
//! The [`Scheduler`] never runs anything by itself. The owner advances it and
//! receives due [`TimerAction`]s one at a time, so an action may schedule or
//! cancel other tasks before the next one fires.

use std::time::Duration;

pub const TICK: Duration = Duration::from_secs(1);
pub const RESET_DELAY: Duration = Duration::from_secs(1);
pub const GRACE_PERIOD: Duration = Duration::from_secs(2);
pub const COUNTDOWN_MIN_SECS: u32 = 30;
pub const COUNTDOWN_MAX_SECS: u32 = 60;

/// What a task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    ElapsedTick,
    CountdownTick,
    CountdownReseed,
    SessionReset,
}

/// Start/cancel handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Task {
    id: u64,
    due: Duration,
    every: Option<Duration>,
    action: TimerAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn every(&mut self, interval: Duration, action: TimerAction) -> TimerHandle {
        self.push(interval, Some(interval), action)
    }

    pub fn once(&mut self, delay: Duration, action: TimerAction) -> TimerHandle {
        self.push(delay, None, action)
    }

    fn push(
        &mut self,
        delay: Duration,
        every: Option<Duration>,
        action: TimerAction,
    ) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due: self.now + delay,
            every,
            action,
        });
        TimerHandle(id)
    }

    /// Returns true if the task was still pending
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != handle.0);
        before != self.tasks.len()
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Fires the earliest task due at or before `until`, moving the clock to
    /// its due time. Ties fire in creation order.
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerAction> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let Task {
            due, every, action, ..
        } = self.tasks[idx];
        self.now = self.now.max(due);
        match every {
            Some(interval) => self.tasks[idx].due += interval,
            None => {
                self.tasks.swap_remove(idx);
            }
        }
        Some(action)
    }

    /// Moves the clock forward once nothing else is due
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

/// Whole seconds since the session started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedClock {
    secs: u64,
}

impl ElapsedClock {
    pub fn tick(&mut self) {
        self.secs += 1;
    }

    pub fn reset(&mut self) {
        self.secs = 0;
    }

    pub fn secs(&self) -> u64 {
        self.secs
    }

    pub fn formatted(&self) -> String {
        format_hms(self.secs)
    }
}

pub fn format_hms(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Normal,
}

impl Severity {
    pub fn for_seconds(secs: u32) -> Self {
        match secs {
            0..=10 => Severity::Critical,
            11..=20 => Severity::Warning,
            _ => Severity::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Running,
    ReachedZero,
    Holding,
}

/// Countdown that creates urgency and nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanicCountdown {
    seconds_remaining: u32,
}

impl PanicCountdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds_remaining: seconds,
        }
    }

    pub fn tick(&mut self) -> CountdownTick {
        match self.seconds_remaining {
            0 => CountdownTick::Holding,
            1 => {
                self.seconds_remaining = 0;
                CountdownTick::ReachedZero
            }
            _ => {
                self.seconds_remaining -= 1;
                CountdownTick::Running
            }
        }
    }

    pub fn reseed(&mut self, seconds: u32) {
        self.seconds_remaining = seconds;
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn severity(&self) -> Severity {
        Severity::for_seconds(self.seconds_remaining)
    }
}
