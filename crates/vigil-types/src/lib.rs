//! Shared Vigil model types.
//!
//! Pure data types used across the state, graph, and engine crates:
//! asset keys, tagged metadata values, materialization events, cursors,
//! manifest records, and graph nodes. This crate performs no I/O.

#![warn(clippy::pedantic)]

pub mod asset;
pub mod event;
pub mod graph;
pub mod manifest;
pub mod metadata;
pub mod state;

pub use asset::{AssetKey, AssetKeyError};
pub use event::Materialization;
pub use graph::{AssetGraph, GraphNode};
pub use manifest::{Manifest, ManifestRecord};
pub use metadata::MetadataValue;
pub use state::{Cursor, CursorRecord, EvalStats, EvalStatus, SensorName};
