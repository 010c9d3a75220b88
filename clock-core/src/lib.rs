//! Pure chess clock logic with no platform dependencies.
//! Testable on host, usable on Xous target.
//!
//! Every time-aware call takes `now_ms` explicitly, read by the caller
//! from its [`ClockSource`]. Nothing in here sleeps or spawns.

pub mod config;
pub mod error;
pub mod format;
pub mod game;
pub mod snapshot;
pub mod timer;

pub use config::ClockConfig;
pub use error::{RestoreError, TransitionError};
pub use format::{format_clock, is_urgent, EXHAUSTED_TEXT};
pub use game::{ChessClock, GameEvent, GameState, Notification, PlayerId, TickToken, TimerView};
pub use snapshot::Snapshot;
pub use timer::{cadence, CountdownTimer, TickOutcome};

/// Monotonic milliseconds since some fixed point, e.g. boot.
pub trait ClockSource {
    fn now_ms(&self) -> u64;
}
