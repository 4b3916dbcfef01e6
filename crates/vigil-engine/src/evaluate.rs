//! The pure sensor decision rule.
//!
//! One evaluation walks `IDLE -> PROBING -> (EMITTING | QUIESCENT) ->
//! IDLE`. The probing and persistence ends are I/O owned by the
//! scheduler; the decision itself is synchronous, deterministic
//! computation with no side effects, which is what keeps sensors
//! testable without a store or a live external system.

use chrono::{DateTime, Utc};
use vigil_types::{AssetKey, Cursor, Materialization};

use crate::observed::ObservedState;

/// Result of one sensor evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Events to deliver, in emission order. Empty when quiescent.
    pub events: Vec<Materialization>,
    /// Cursor to persist. `None` means "no change to persisted state":
    /// the previously stored cursor remains in effect.
    pub cursor: Option<Cursor>,
}

impl Evaluation {
    /// Whether this evaluation detected a change.
    #[must_use]
    pub fn emitted(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Decide whether an observation warrants materialization events.
///
/// Emits when `observed` is strictly newer than the prior cursor (an
/// absent cursor means everything observed is new). Equality is treated
/// as no change, so a single external update is never reported twice
/// across a tick boundary. On emission, one event per bound asset
/// carries the observation under the `"observed"` metadata key, and the
/// new cursor is the observation's canonical encoding. Leaving the
/// cursor behind the observation would re-detect the same change next
/// tick.
#[must_use]
pub fn evaluate(
    prior: Option<&Cursor>,
    observed: &ObservedState,
    assets: &[AssetKey],
    observed_at: DateTime<Utc>,
) -> Evaluation {
    let changed = prior.map_or(true, |cursor| observed.exceeds(cursor));
    if !changed {
        return Evaluation {
            events: Vec::new(),
            cursor: None,
        };
    }

    let events = assets
        .iter()
        .map(|asset| {
            Materialization::new(asset.clone(), observed_at)
                .with_metadata("observed", observed.as_metadata())
        })
        .collect();

    Evaluation {
        events,
        cursor: Some(observed.encode()),
    }
}
