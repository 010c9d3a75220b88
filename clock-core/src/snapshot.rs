//! The values saved when the clock is interrupted, and their byte layout.
//!
//! Layout (little-endian): remaining ms for player 1 and player 2 as
//! `i64`, the state name as a `u8` length followed by ASCII, then the
//! active player id as a `u8` (0 for none).

use crate::error::RestoreError;
use crate::game::{GameState, PlayerId};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub remaining_ms: [i64; 2],
    pub state: GameState,
    pub active: Option<PlayerId>,
}

impl Snapshot {
    pub fn remaining_ms(&self, player: PlayerId) -> i64 {
        self.remaining_ms[player.index()]
    }

    /// A clock is never brought back running; a saved RUNNING resumes as
    /// PAUSED.
    pub fn coerce_for_restore(mut self) -> Self {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
        }
        self
    }

    /// The active player is set exactly when the game is not IDLE.
    pub fn check_active(&self) -> Result<(), RestoreError> {
        if self.active.is_none() == (self.state == GameState::Idle) {
            Ok(())
        } else {
            Err(RestoreError::ActiveMismatch {
                state: self.state,
                active: self.active,
            })
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let name = self.state.name().as_bytes();
        let mut data = Vec::with_capacity(8 + 8 + 1 + name.len() + 1);
        data.extend_from_slice(&self.remaining_ms[0].to_le_bytes());
        data.extend_from_slice(&self.remaining_ms[1].to_le_bytes());
        data.push(name.len() as u8);
        data.extend_from_slice(name);
        data.push(self.active.map(PlayerId::id).unwrap_or(0));
        data
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, RestoreError> {
        let p1 = read_i64(data, 0)?;
        let p2 = read_i64(data, 8)?;

        let name_len = *data.get(16).ok_or(RestoreError::Truncated)? as usize;
        let name = data
            .get(17..17 + name_len)
            .ok_or(RestoreError::Truncated)?;
        let state = String::from_utf8_lossy(name).parse::<GameState>()?;

        let active = match *data.get(17 + name_len).ok_or(RestoreError::Truncated)? {
            0 => None,
            id => Some(PlayerId::from_id(id).ok_or(RestoreError::UnknownPlayer(id))?),
        };

        let snapshot = Snapshot {
            remaining_ms: [p1, p2],
            state,
            active,
        };
        snapshot.check_active()?;
        Ok(snapshot)
    }
}

fn read_i64(data: &[u8], offset: usize) -> Result<i64, RestoreError> {
    data.get(offset..offset + 8)
        .and_then(|bytes| bytes.try_into().ok())
        .map(i64::from_le_bytes)
        .ok_or(RestoreError::Truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paused() -> Snapshot {
        Snapshot {
            remaining_ms: [42_000, -1_500],
            state: GameState::Paused,
            active: Some(PlayerId::Player2),
        }
    }

    #[test]
    fn test_bytes_roundtrip() {
        let snap = paused();
        assert_eq!(Snapshot::from_bytes(&snap.to_bytes()), Ok(snap));
    }

    #[test]
    fn test_layout() {
        let bytes = paused().to_bytes();
        assert_eq!(&bytes[0..8], &42_000i64.to_le_bytes());
        assert_eq!(&bytes[8..16], &(-1_500i64).to_le_bytes());
        assert_eq!(bytes[16], 6);
        assert_eq!(&bytes[17..23], b"PAUSED");
        assert_eq!(bytes[23], 2);
        assert_eq!(bytes.len(), 24);
    }

    #[test]
    fn test_truncated() {
        let bytes = paused().to_bytes();
        for len in [0, 7, 16, 20, 23] {
            assert_eq!(
                Snapshot::from_bytes(&bytes[..len]),
                Err(RestoreError::Truncated),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_unknown_state_name() {
        let mut bytes = paused().to_bytes();
        bytes[17..23].copy_from_slice(b"PAWSED");
        assert_eq!(
            Snapshot::from_bytes(&bytes),
            Err(RestoreError::UnknownState("PAWSED".to_string()))
        );
    }

    #[test]
    fn test_unknown_player() {
        let mut bytes = paused().to_bytes();
        bytes[23] = 7;
        assert_eq!(
            Snapshot::from_bytes(&bytes),
            Err(RestoreError::UnknownPlayer(7))
        );
    }

    #[test]
    fn test_inconsistent_active() {
        let mut bytes = paused().to_bytes();
        bytes[23] = 0;
        assert!(matches!(
            Snapshot::from_bytes(&bytes),
            Err(RestoreError::ActiveMismatch { .. })
        ));

        let idle = Snapshot {
            remaining_ms: [1, 1],
            state: GameState::Idle,
            active: Some(PlayerId::Player1),
        };
        assert!(Snapshot::from_bytes(&idle.to_bytes()).is_err());
    }

    #[test]
    fn test_running_decodes_then_coerces() {
        let running = Snapshot {
            state: GameState::Running,
            ..paused()
        };
        let decoded = Snapshot::from_bytes(&running.to_bytes()).unwrap();
        assert_eq!(decoded.state, GameState::Running);
        assert_eq!(decoded.coerce_for_restore().state, GameState::Paused);
        assert_eq!(paused().coerce_for_restore(), paused());
    }
}
