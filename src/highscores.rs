//! Best-score tracking
//!
//! A single scalar persisted to LocalStorage on the web. Storage problems
//! never interrupt play: the score simply stops persisting.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Why the backing store could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage available (private mode, native build, ...)
    Unavailable,
    /// Storage refused the write (quota, security error)
    Rejected(String),
    /// Stored value could not be parsed
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Rejected(msg) => write!(f, "storage rejected write: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "stored value is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Key-value slot holding the best score
pub trait HighScoreStore {
    /// Read the stored score; `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<u64>, StorageError>;
    /// Overwrite the stored score
    fn save(&mut self, score: u64) -> Result<(), StorageError>;
}

/// Best score of all sessions, written through to its store
pub struct HighScore {
    best: u64,
    store: Box<dyn HighScoreStore>,
}

impl HighScore {
    /// Read the persisted best score (0 if absent or unreadable)
    pub fn load(store: Box<dyn HighScoreStore>) -> Self {
        let best = match store.load() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        };
        Self { best, store }
    }

    /// Current best score
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a score; persists immediately and returns true if it is a new best
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = self.store.save(score) {
            log::warn!("High score {} not persisted: {}", score, e);
        }
        true
    }
}

/// In-memory store for native builds and tests.
///
/// Clones share the same slot, so a caller can keep a handle after giving
/// one to the game.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    slot: Rc<Cell<Option<u64>>>,
    writes: Rc<Cell<u32>>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(Cell::new(None)),
            writes: Rc::new(Cell::new(0)),
            available: true,
        }
    }

    /// Store pre-seeded with a saved score
    pub fn with_score(score: u64) -> Self {
        let store = Self::new();
        store.slot.set(Some(score));
        store
    }

    /// Store that fails every operation
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Currently stored score
    pub fn stored(&self) -> Option<u64> {
        self.slot.get()
    }

    /// Number of successful writes
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.slot.get())
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.slot.set(Some(score));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Parse a stored score. Accepts the bare number the page has always written.
pub fn parse_stored(raw: &str) -> Result<u64, StorageError> {
    serde_json::from_str::<u64>(raw.trim()).map_err(|e| StorageError::Corrupt(e.to_string()))
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "snakeHighScore";

    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => parse_stored(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Rejected(format!("{:?}", e))),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        let raw = serde_json::to_string(&score).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        storage
            .set_item(Self::STORAGE_KEY, &raw)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_starts_at_zero() {
        let high = HighScore::load(Box::new(MemoryStore::new()));
        assert_eq!(high.best(), 0);
    }

    #[test]
    fn test_new_best_is_persisted() {
        let store = MemoryStore::with_score(20);
        let mut high = HighScore::load(Box::new(store.clone()));
        assert_eq!(high.best(), 20);

        assert!(high.submit(30));
        assert_eq!(high.best(), 30);
        assert_eq!(store.stored(), Some(30));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_lower_or_equal_score_is_ignored() {
        let store = MemoryStore::with_score(20);
        let mut high = HighScore::load(Box::new(store.clone()));

        assert!(!high.submit(10));
        assert!(!high.submit(20));
        assert_eq!(high.best(), 20);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_unavailable_store_is_not_fatal() {
        let mut high = HighScore::load(Box::new(MemoryStore::unavailable()));
        assert_eq!(high.best(), 0);
        assert!(high.submit(50));
        assert_eq!(high.best(), 50);
    }

    #[test]
    fn test_parse_stored() {
        assert_eq!(parse_stored("30"), Ok(30));
        assert_eq!(parse_stored(" 120\n"), Ok(120));
        assert!(matches!(parse_stored("abc"), Err(StorageError::Corrupt(_))));
        assert!(matches!(parse_stored("-5"), Err(StorageError::Corrupt(_))));
    }
}
