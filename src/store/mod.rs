use std::cell::RefCell;
use std::io;

use thiserror::Error;

pub mod json_store;
pub mod ledger;
pub mod schema;
pub mod summary;

pub use json_store::JsonStore;
pub use ledger::Ledger;
pub use schema::{LessonProgress, UserProgress};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("progress storage unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("stored progress is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persistence seam for the progress ledger.
pub trait ProgressStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<UserProgress>, StoreError>;
    fn save(&self, progress: &UserProgress) -> Result<(), StoreError>;
}

/// Keeps the serialized document in memory. Stores JSON rather than the
/// struct so that loading goes through the same decoding as on-disk data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(json: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(json.into())),
        }
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<UserProgress>, StoreError> {
        match self.document.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, progress: &UserProgress) -> Result<(), StoreError> {
        let json = serde_json::to_string(progress)?;
        *self.document.borrow_mut() = Some(json);
        Ok(())
    }
}
