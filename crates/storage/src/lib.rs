#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod sqlite;

pub use record::{QuestionRecord, QuizRecord, RecordError};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
