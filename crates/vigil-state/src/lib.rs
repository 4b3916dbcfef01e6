//! Sensor state persistence for the Vigil scheduler.
//!
//! Provides the [`CursorStore`] trait and a [`SqliteCursorStore`]
//! implementation for cursor tracking and evaluation history.

#![warn(clippy::pedantic)]

pub mod error;
pub mod sqlite;
pub mod store;

pub use error::StateError;
pub use sqlite::SqliteCursorStore;
pub use store::CursorStore;
