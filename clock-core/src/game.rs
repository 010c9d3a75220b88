use std::fmt;
use std::str::FromStr;

use crate::config::ClockConfig;
use crate::error::{RestoreError, TransitionError};
use crate::snapshot::Snapshot;
use crate::timer::{CountdownTimer, TickOutcome};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Stable id used in snapshots and on the wire.
    pub fn id(self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PlayerId::Player1),
            2 => Some(PlayerId::Player2),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }
}

/// IDLE: waiting for the first move, no active player.
/// RUNNING: the active player's timer is counting.
/// PAUSED: nothing counts; the active player resumes.
/// DONE: the active player ran out of time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Idle,
    Running,
    Paused,
    Done,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::Idle => "IDLE",
            GameState::Running => "RUNNING",
            GameState::Paused => "PAUSED",
            GameState::Done => "DONE",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            GameState::Idle => 0,
            GameState::Running => 1,
            GameState::Paused => 2,
            GameState::Done => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(GameState::Idle),
            1 => Some(GameState::Running),
            2 => Some(GameState::Paused),
            3 => Some(GameState::Done),
            _ => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameState {
    type Err = RestoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(GameState::Idle),
            "RUNNING" => Ok(GameState::Running),
            "PAUSED" => Ok(GameState::Paused),
            "DONE" => Ok(GameState::Done),
            other => Err(RestoreError::UnknownState(other.to_string())),
        }
    }
}

/// Input from the buttons.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    /// A player pressed their own button, i.e. finished a move.
    PlayerPressed(PlayerId),
    PauseToggled,
    ResetPressed,
}

/// What changed, for whoever renders the clock.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Notification {
    Started(PlayerId),
    Moved { from: PlayerId, to: PlayerId },
    Paused(PlayerId),
    Resumed(PlayerId),
    Reset,
    /// A tick moved the timer across the urgency threshold.
    Urgency { player: PlayerId, urgent: bool },
    Exhausted(PlayerId),
}

/// Handle on the one pending tick of a running timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TickToken {
    pub player: PlayerId,
    pub epoch: u64,
    pub due_ms: u64,
}

/// Everything a face needs to draw one timer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TimerView {
    pub remaining_ms: i64,
    pub display: String,
    pub urgent: bool,
    pub running: bool,
    pub exhausted: bool,
}

/// Two timers and the game around them.
///
/// The only owner of the timers and of the active player. All changes go
/// through `handle`, `poll`/`fire`, `update_config` and `restore`.
pub struct ChessClock {
    config: ClockConfig,
    state: GameState,
    active: Option<PlayerId>,
    timers: [CountdownTimer; 2],
}

impl ChessClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            state: GameState::Idle,
            active: None,
            timers: [CountdownTimer::new(config), CountdownTimer::new(config)],
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn active(&self) -> Option<PlayerId> {
        self.active
    }

    pub fn timer(&self, player: PlayerId) -> &CountdownTimer {
        &self.timers[player.index()]
    }

    fn timer_mut(&mut self, player: PlayerId) -> &mut CountdownTimer {
        &mut self.timers[player.index()]
    }

    pub fn view(&self, player: PlayerId, now_ms: u64) -> TimerView {
        let timer = self.timer(player);
        TimerView {
            remaining_ms: timer.remaining_ms_at(now_ms),
            display: timer.display().to_string(),
            urgent: timer.is_urgent(),
            running: timer.is_running(),
            exhausted: timer.is_exhausted(),
        }
    }

    pub fn handle(&mut self, event: GameEvent, now_ms: u64) -> Vec<Notification> {
        match (self.state, event) {
            (GameState::Idle, GameEvent::PlayerPressed(player)) => {
                // pressing your button hands the move to the opponent
                let first = player.opponent();
                self.set_active(first);
                self.enter_or_log(GameState::Running, now_ms)
                    .map(|_| vec![Notification::Started(first)])
                    .unwrap_or_default()
            }
            (GameState::Running, GameEvent::PlayerPressed(player))
                if self.active == Some(player) && self.timer(player).is_running() =>
            {
                vec![self.complete_move(player, now_ms)]
            }
            (GameState::Running, GameEvent::PauseToggled) => self
                .enter_or_log(GameState::Paused, now_ms)
                .map(|player| vec![Notification::Paused(player)])
                .unwrap_or_default(),
            (GameState::Paused, GameEvent::PauseToggled) => self
                .enter_or_log(GameState::Running, now_ms)
                .map(|player| vec![Notification::Resumed(player)])
                .unwrap_or_default(),
            (_, GameEvent::ResetPressed) => {
                self.reset();
                vec![Notification::Reset]
            }
            (state, event) => {
                log::debug!("ignoring {:?} while {}", event, state);
                Vec::new()
            }
        }
    }

    /// Back to IDLE with both timers at the initial duration.
    pub fn reset(&mut self) {
        let start = self.state;
        for timer in self.timers.iter_mut() {
            timer.reset();
        }
        self.active = None;
        self.state = GameState::Idle;
        log::debug!("transition from {} to {}", start, self.state);
    }

    /// Pause if running. Used before saving and whenever the clock loses
    /// the user's attention.
    pub fn suspend(&mut self, now_ms: u64) -> bool {
        self.state == GameState::Running && self.enter_or_log(GameState::Paused, now_ms).is_some()
    }

    pub fn pending_tick(&self) -> Option<TickToken> {
        PlayerId::ALL
            .iter()
            .filter_map(|&player| {
                let timer = self.timer(player);
                timer.next_due_ms().map(|due_ms| TickToken {
                    player,
                    epoch: timer.epoch(),
                    due_ms,
                })
            })
            .min_by_key(|token| token.due_ms)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_tick().map(|token| token.due_ms)
    }

    /// Run every tick that is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Notification> {
        let mut notifications = Vec::new();
        while let Some(token) = self.pending_tick() {
            if token.due_ms > now_ms {
                break;
            }
            notifications.extend(self.fire(token, now_ms));
        }
        notifications
    }

    /// Run one tick. Tokens from before a pause, reset or move are dropped.
    pub fn fire(&mut self, token: TickToken, now_ms: u64) -> Vec<Notification> {
        let was_urgent = self.timer(token.player).is_urgent();
        match self.timer_mut(token.player).tick(token.epoch, now_ms) {
            TickOutcome::Stale => {
                log::debug!("dropping stale tick for {:?}", token.player);
                Vec::new()
            }
            TickOutcome::Rescheduled { .. } => {
                let urgent = self.timer(token.player).is_urgent();
                if urgent == was_urgent {
                    return Vec::new();
                }
                vec![Notification::Urgency {
                    player: token.player,
                    urgent,
                }]
            }
            TickOutcome::Exhausted => {
                log::info!("{:?} ran out of time", token.player);
                match self.transition_to(GameState::Done, now_ms) {
                    Ok(()) => vec![Notification::Exhausted(token.player)],
                    Err(e) => {
                        log::warn!("{}", e);
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Apply new settings. A new initial duration starts a fresh game;
    /// increment and negative-time changes apply to the game in progress.
    pub fn update_config(&mut self, config: ClockConfig) -> Vec<Notification> {
        let new_duration = config.initial_duration_ms != self.config.initial_duration_ms;
        self.config = config;
        for timer in self.timers.iter_mut() {
            timer.set_config(config);
        }
        if new_duration {
            self.reset();
            vec![Notification::Reset]
        } else {
            Vec::new()
        }
    }

    pub fn snapshot(&self, now_ms: u64) -> Snapshot {
        Snapshot {
            remaining_ms: [
                self.timer(PlayerId::Player1).remaining_ms_at(now_ms),
                self.timer(PlayerId::Player2).remaining_ms_at(now_ms),
            ],
            state: self.state,
            active: self.active,
        }
    }

    /// Load saved values. The game comes back stopped: a saved RUNNING
    /// must be turned into PAUSED by the caller first.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RestoreError> {
        if snapshot.state == GameState::Running {
            return Err(RestoreError::RunningState);
        }
        snapshot.check_active()?;

        if snapshot.state == GameState::Idle {
            self.reset();
            return Ok(());
        }

        let start = self.state;
        for player in PlayerId::ALL {
            let exhausted = snapshot.state == GameState::Done && snapshot.active == Some(player);
            self.timer_mut(player)
                .restore(snapshot.remaining_ms(player), exhausted);
        }
        self.active = snapshot.active;
        self.state = snapshot.state;
        log::debug!("restored from {} into {}", start, self.state);
        Ok(())
    }

    fn set_active(&mut self, player: PlayerId) {
        self.active = Some(player);
        log::debug!("active player is now {:?}", player);
    }

    fn complete_move(&mut self, mover: PlayerId, now_ms: u64) -> Notification {
        let next = mover.opponent();
        let increment_ms = self.config.increment_ms;
        let timer = self.timer_mut(mover);
        timer.pause(now_ms);
        timer.increment(increment_ms);
        self.timer_mut(next).start(now_ms);
        self.set_active(next);
        Notification::Moved {
            from: mover,
            to: next,
        }
    }

    fn enter_or_log(&mut self, target: GameState, now_ms: u64) -> Option<PlayerId> {
        match self.transition_to(target, now_ms) {
            Ok(()) => self.active,
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    /// The only place RUNNING, PAUSED and DONE are entered. Each needs an
    /// active player; without one the state is left as it was.
    fn transition_to(&mut self, target: GameState, now_ms: u64) -> Result<(), TransitionError> {
        if target == GameState::Idle {
            self.reset();
            return Ok(());
        }
        let start = self.state;
        let active = self
            .active
            .ok_or(TransitionError::NoActivePlayer { target })?;

        match target {
            GameState::Running => self.timer_mut(active).start(now_ms),
            GameState::Paused => self.timer_mut(active).pause(now_ms),
            GameState::Idle | GameState::Done => {}
        }
        self.state = target;
        log::debug!("transition from {} to {}", start, self.state);
        Ok(())
    }
}
