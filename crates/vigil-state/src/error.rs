//! Cursor store error types.

/// Errors produced by [`CursorStore`](crate::CursorStore) operations.
///
/// Any variant returned from a cursor write is fatal to that evaluation
/// cycle: the scheduler discards the cycle's events rather than deliver
/// them without a durable replay position.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Underlying `SQLite` failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File-system I/O failure (e.g. creating the database directory).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal mutex was poisoned by a panicked thread.
    #[error("cursor store lock poisoned")]
    LockPoisoned,
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, StateError>;
