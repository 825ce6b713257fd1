use serde::{Deserialize, Serialize};

use crate::{GameSession, GameState};

/// Level-unlock bookkeeping lives outside the engine; hosts persist it with
/// whatever store they have (the browser build keeps a single key in
/// localStorage). The engine only defines the contract it is read and
/// written through.
pub trait ProgressStore {
    fn max_unlocked_level(&self) -> u32;
    fn unlock_next_level(&mut self);
    fn reset(&mut self);

    fn is_level_unlocked(&self, level: u32) -> bool {
        level <= self.max_unlocked_level()
    }
}

/// In-memory store, also the reference implementation for tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryProgress {
    max_unlocked: u32,
}

impl MemoryProgress {
    pub const fn new() -> Self {
        Self { max_unlocked: 1 }
    }
}

impl Default for MemoryProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for MemoryProgress {
    fn max_unlocked_level(&self) -> u32 {
        self.max_unlocked
    }

    fn unlock_next_level(&mut self) {
        self.max_unlocked += 1;
    }

    fn reset(&mut self) {
        self.max_unlocked = 1;
    }
}

/// Caller-side unlock rule: winning the highest unlocked level opens the
/// next one. Replaying an already-beaten level never re-unlocks.
pub fn unlock_on_victory(store: &mut dyn ProgressStore, session: &GameSession) {
    if session.state() == GameState::Victory && session.level() == store.max_unlocked_level() {
        store.unlock_next_level();
        log::debug!("Unlocked level {}", store.max_unlocked_level());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_has_only_the_first_level() {
        let store = MemoryProgress::new();
        assert!(store.is_level_unlocked(1));
        assert!(!store.is_level_unlocked(2));
    }

    #[test]
    fn unlock_and_reset_round_trip() {
        let mut store = MemoryProgress::new();
        store.unlock_next_level();
        store.unlock_next_level();
        assert_eq!(store.max_unlocked_level(), 3);
        store.reset();
        assert_eq!(store.max_unlocked_level(), 1);
    }

    #[test]
    fn victory_on_the_frontier_level_unlocks_the_next() {
        use crate::{GameConfig, Hex, RevealOutcome};

        // a center click on rings = 2 regenerates the whole board empty,
        // which makes the win deterministic here
        let mut session = GameSession::new(GameConfig::new(2, 0.2).unwrap(), 5).unwrap();
        assert_eq!(session.reveal(Hex::ORIGIN), RevealOutcome::Won);

        let mut store = MemoryProgress::new();
        unlock_on_victory(&mut store, &session);
        assert_eq!(store.max_unlocked_level(), 2);

        // replaying a beaten level does not move the frontier again
        session.reset_level();
        session.reveal(Hex::ORIGIN);
        unlock_on_victory(&mut store, &session);
        assert_eq!(store.max_unlocked_level(), 2);
    }
}
