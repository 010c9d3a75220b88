use crate::config::{clamp_ms, ClockConfig};
use crate::format::{format_clock, is_urgent, EXHAUSTED_TEXT};

/// Tick interval while the display only changes once a second.
pub const SLOW_CADENCE_MS: u64 = 1000;
/// Tick interval once tenths are on screen.
pub const FAST_CADENCE_MS: u64 = 100;
/// At or below this the timer ticks at [`FAST_CADENCE_MS`].
pub const FAST_CADENCE_AT_MS: i64 = 10_000;

/// Delay until the next tick for a timer with `remaining_ms` left, or
/// `None` once the timer is out of time.
pub fn cadence(remaining_ms: i64, allow_negative: bool) -> Option<u64> {
    if remaining_ms > FAST_CADENCE_AT_MS {
        Some(SLOW_CADENCE_MS)
    } else if remaining_ms > 0 {
        Some(FAST_CADENCE_MS)
    } else if allow_negative {
        Some(SLOW_CADENCE_MS)
    } else {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// The tick belongs to an earlier start, or the timer is stopped.
    Stale,
    Rescheduled { due_ms: u64 },
    Exhausted,
}

/// One player's clock.
///
/// A running timer always has exactly one pending tick (`next_due_ms`).
/// Each tick charges the real time since the previous one, so changing
/// cadence never adds drift. Ticks are tagged with `epoch`, which moves on
/// every start and every stop; a tick carrying an old epoch is ignored.
#[derive(Clone, Debug)]
pub struct CountdownTimer {
    config: ClockConfig,
    remaining_ms: i64,
    running: bool,
    exhausted: bool,
    last_tick_ms: u64,
    epoch: u64,
    next_due_ms: Option<u64>,
    display: String,
}

impl CountdownTimer {
    pub fn new(config: ClockConfig) -> Self {
        let mut timer = Self {
            config,
            remaining_ms: config.initial_remaining_ms(),
            running: false,
            exhausted: false,
            last_tick_ms: 0,
            epoch: 0,
            next_due_ms: None,
            display: String::new(),
        };
        timer.refresh_display();
        timer
    }

    pub fn reset(&mut self) {
        self.restore(self.config.initial_remaining_ms(), false);
    }

    /// Load a saved value. The timer is left stopped.
    pub fn restore(&mut self, remaining_ms: i64, exhausted: bool) {
        self.cancel();
        self.remaining_ms = remaining_ms;
        self.exhausted = exhausted;
        self.refresh_display();
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.running = true;
        self.last_tick_ms = now_ms;
        // first tick right away; it picks the cadence
        self.next_due_ms = Some(now_ms);
    }

    /// Charge the time since the last tick and stop. No-op when stopped.
    pub fn pause(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        self.charge_elapsed(now_ms);
        self.cancel();
        self.refresh_display();
    }

    /// Stop without charging the time since the last tick.
    pub fn cancel(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.running = false;
        self.next_due_ms = None;
    }

    pub fn increment(&mut self, ms: u64) {
        self.remaining_ms = self.remaining_ms.saturating_add(clamp_ms(ms));
        self.refresh_display();
    }

    /// Run the tick scheduled under `epoch`.
    pub fn tick(&mut self, epoch: u64, now_ms: u64) -> TickOutcome {
        if !self.running || epoch != self.epoch || self.next_due_ms.is_none() {
            return TickOutcome::Stale;
        }
        self.charge_elapsed(now_ms);

        match cadence(self.remaining_ms, self.config.allow_negative_time) {
            Some(delay) => {
                let due_ms = now_ms.saturating_add(delay);
                self.next_due_ms = Some(due_ms);
                self.refresh_display();
                TickOutcome::Rescheduled { due_ms }
            }
            None => {
                self.cancel();
                self.exhausted = true;
                self.refresh_display();
                TickOutcome::Exhausted
            }
        }
    }

    /// Keep the remaining time but pick up new increment and negative-time
    /// settings. The initial duration only takes effect on the next reset.
    pub fn set_config(&mut self, config: ClockConfig) {
        self.config = config;
        self.refresh_display();
    }

    /// Remaining time as of the last tick, pause or reset.
    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    /// Remaining time including whatever has passed since the last tick.
    pub fn remaining_ms_at(&self, now_ms: u64) -> i64 {
        if self.running {
            self.remaining_ms
                .saturating_sub(clamp_ms(now_ms.saturating_sub(self.last_tick_ms)))
        } else {
            self.remaining_ms
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_urgent(&self) -> bool {
        is_urgent(self.remaining_ms)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    fn charge_elapsed(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.last_tick_ms);
        self.remaining_ms = self.remaining_ms.saturating_sub(clamp_ms(elapsed));
        self.last_tick_ms = now_ms;
    }

    fn refresh_display(&mut self) {
        self.display = if self.exhausted {
            EXHAUSTED_TEXT.to_string()
        } else {
            format_clock(self.remaining_ms, self.config.allow_negative_time)
        };
    }
}
