use core::time::Duration;
use web_time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time as the host sees it.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock that only moves when told to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ManualClock {
    now: SystemTime,
}

impl ManualClock {
    pub fn new(now: SystemTime) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        self.now
    }
}

/// Play time of the current game.
///
/// Elapsed time is the span between the start and stop markers plus the paused time, which holds seconds played
/// before the game was last loaded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeKeeper {
    started_at: Option<SystemTime>,
    stopped_at: Option<SystemTime>,
    paused_secs: u32,
}

impl TimeKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: SystemTime) {
        self.started_at = Some(now);
        self.stopped_at = None;
    }

    pub fn stop(&mut self, now: SystemTime) {
        self.stopped_at = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Whole seconds played, measured up to `now` while the keeper is still running.
    pub fn elapsed_secs(&self, now: SystemTime) -> u32 {
        let run = match self.started_at {
            Some(started_at) => {
                let end = self.stopped_at.unwrap_or(now);
                // a clock stepping backwards counts as no time
                end.duration_since(started_at).unwrap_or_default().as_secs()
            }
            None => 0,
        };
        u32::try_from(run)
            .unwrap_or(u32::MAX)
            .saturating_add(self.paused_secs)
    }

    pub fn paused_secs(&self) -> u32 {
        self.paused_secs
    }

    pub fn set_paused_secs(&mut self, secs: u32) {
        self.paused_secs = secs;
    }
}
