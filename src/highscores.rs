//! Best-score persistence
//!
//! Stored under a single key as a decimal integer, the same shape the
//! browser build keeps in LocalStorage. Any storage failure degrades to a
//! best score of 0 rather than interrupting play.

use crate::platform::{KeyValueStore, StorageError};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "highScore";

/// The best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Load from storage, falling back to 0
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match Self::try_load(store) {
            Ok(Some(best)) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::warn!("High score unavailable ({}), using 0", err);
                Self::default()
            }
        }
    }

    fn try_load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<u64>, StorageError> {
        match store.get(STORAGE_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(raw.trim())?)),
            None => Ok(None),
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run's score, persisting it if it beats the best
    ///
    /// Returns true when the score is a new best. A failed write is logged
    /// and the in-memory best is still updated.
    pub fn record<S: KeyValueStore + ?Sized>(&mut self, score: u64, store: &mut S) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;

        let result = serde_json::to_string(&score)
            .map_err(StorageError::from)
            .and_then(|value| store.set(STORAGE_KEY, &value));
        match result {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(err) => log::warn!("Could not save high score {}: {}", score, err),
        }
        true
    }
}
