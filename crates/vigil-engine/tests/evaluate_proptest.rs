//! Property tests for the sensor decision rule.

use chrono::Utc;
use proptest::prelude::*;
use vigil_engine::{evaluate, ObservedState};
use vigil_types::{AssetKey, Cursor};

fn assets() -> Vec<AssetKey> {
    vec![AssetKey::from_path("raw/transactions").unwrap()]
}

proptest! {
    /// Emission happens exactly when the observation is strictly newer,
    /// and the new cursor is always the observation's canonical encoding.
    #[test]
    fn emits_iff_strictly_newer(prior in any::<i64>(), observed in any::<i64>()) {
        let cursor = Cursor::new(prior.to_string());
        let result = evaluate(
            Some(&cursor),
            &ObservedState::Millis { value: observed },
            &assets(),
            Utc::now(),
        );
        prop_assert_eq!(result.emitted(), observed > prior);
        if observed > prior {
            prop_assert_eq!(result.cursor, Some(Cursor::new(observed.to_string())));
        } else {
            prop_assert!(result.cursor.is_none());
        }
    }

    /// A sensor re-shown its own persisted cursor never re-emits.
    #[test]
    fn own_cursor_is_always_quiescent(value in any::<i64>()) {
        let observed = ObservedState::Millis { value };
        let cursor = observed.encode();
        let result = evaluate(Some(&cursor), &observed, &assets(), Utc::now());
        prop_assert!(!result.emitted());
        prop_assert!(result.cursor.is_none());
    }

    /// An absent cursor always emits, whatever the observation.
    #[test]
    fn absent_cursor_always_emits(value in any::<i64>()) {
        let result = evaluate(
            None,
            &ObservedState::Int { value },
            &assets(),
            Utc::now(),
        );
        prop_assert!(result.emitted());
        prop_assert_eq!(result.cursor, Some(Cursor::new(value.to_string())));
    }

    /// Text observations compare lexicographically against the cursor.
    #[test]
    fn text_comparison_is_lexicographic(prior in "[a-z]{1,8}", observed in "[a-z]{1,8}") {
        let cursor = Cursor::new(prior.clone());
        let result = evaluate(
            Some(&cursor),
            &ObservedState::Text { value: observed.clone() },
            &assets(),
            Utc::now(),
        );
        prop_assert_eq!(result.emitted(), observed > prior);
    }

    /// One event per bound asset, in binding order.
    #[test]
    fn event_count_matches_bound_assets(count in 0usize..8) {
        let bound: Vec<AssetKey> = (0..count)
            .map(|i| AssetKey::from_path(&format!("raw/table_{i}")).unwrap())
            .collect();
        let result = evaluate(None, &ObservedState::Int { value: 1 }, &bound, Utc::now());
        prop_assert_eq!(result.events.len(), count);
        for (event, asset) in result.events.iter().zip(&bound) {
            prop_assert_eq!(&event.asset_key, asset);
        }
    }
}
