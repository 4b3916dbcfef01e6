//! Manifest-to-graph translation for Vigil.
//!
//! Turns an externally-produced dependency manifest (dbt-style node
//! records) into the internal [`AssetGraph`](vigil_types::AssetGraph)
//! through a pluggable [`NodeTranslator`]. Runs once per definition load;
//! translation failures and key collisions abort the whole build rather
//! than producing a partial graph.

#![warn(clippy::pedantic)]

pub mod builder;
pub mod error;
pub mod manifest;
pub mod translator;

pub use builder::build_graph;
pub use error::{GraphError, TranslationError};
pub use manifest::load_manifest;
pub use translator::{DefaultTranslator, NodeTranslator};
