//! Host-side search session state.
//!
//! Owns the ordered result list and the active selection that the map
//! synchronization component consumes. The list is append-at-front (most
//! recently resolved first) and never reordered; resolving a place that is
//! already present does not grow the list, it only moves the active selection
//! to the existing entry.

use super::{PlaceKey, PlaceResult};
use tracing::debug;

/// Ordered result list plus the active selection pointer.
#[derive(Debug, Default)]
pub struct SearchSession {
    results: Vec<PlaceResult>,
    active: Option<PlaceKey>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly resolved place and makes it the active selection.
    ///
    /// If a result with the same identity is already in the list, the list is
    /// left untouched and only the active selection moves to it. Returns the
    /// identity key of the (new or existing) entry.
    pub fn record(&mut self, result: PlaceResult) -> PlaceKey {
        let key = result.key();
        if self.results.iter().any(|r| r.is(&key)) {
            debug!(place = %key, "duplicate resolution, re-activating existing entry");
        } else {
            self.results.insert(0, result);
        }
        self.active = Some(key.clone());
        key
    }

    /// Makes an existing entry the active selection.
    ///
    /// Returns false (and changes nothing) if no entry has that identity.
    pub fn activate(&mut self, key: &PlaceKey) -> bool {
        if self.results.iter().any(|r| r.is(key)) {
            self.active = Some(key.clone());
            true
        } else {
            false
        }
    }

    /// Clears the active selection without touching the list.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// The ordered result list, most recently resolved first.
    pub fn results(&self) -> &[PlaceResult] {
        &self.results
    }

    /// The currently active result, if any.
    pub fn active(&self) -> Option<&PlaceKey> {
        self.active.as_ref()
    }

    /// The active result's full record, if any.
    pub fn active_result(&self) -> Option<&PlaceResult> {
        let key = self.active.as_ref()?;
        self.results.iter().find(|r| r.is(key))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(ancient: &str, modern: &str, lat: f64, lon: f64) -> PlaceResult {
        PlaceResult {
            ancient_name: ancient.to_string(),
            modern_name: modern.to_string(),
            province: String::new(),
            latitude: lat,
            longitude: lon,
            description: String::new(),
            dynasty_info: String::new(),
        }
    }

    #[test]
    fn test_record_prepends_and_activates() {
        let mut session = SearchSession::new();
        session.record(place("长安", "西安市", 34.26, 108.94));
        session.record(place("临安", "杭州市", 30.25, 120.17));

        assert_eq!(session.len(), 2);
        assert_eq!(session.results()[0].ancient_name, "临安");
        assert_eq!(session.active(), Some(&PlaceKey::new("临安", "杭州市")));
    }

    #[test]
    fn test_duplicate_resolution_does_not_grow_list() {
        let mut session = SearchSession::new();
        session.record(place("长安", "西安市", 34.26, 108.94));
        session.record(place("临安", "杭州市", 30.25, 120.17));
        // Resolving 长安 again, coordinates slightly jittered.
        session.record(place("长安", "西安市", 34.2601, 108.9399));

        assert_eq!(session.len(), 2);
        // Order is unchanged, only the active pointer moved.
        assert_eq!(session.results()[0].ancient_name, "临安");
        assert_eq!(session.active(), Some(&PlaceKey::new("长安", "西安市")));
    }

    #[test]
    fn test_activate_unknown_identity_is_rejected() {
        let mut session = SearchSession::new();
        session.record(place("长安", "西安市", 34.26, 108.94));

        assert!(!session.activate(&PlaceKey::new("金陵", "南京市")));
        assert_eq!(session.active(), Some(&PlaceKey::new("长安", "西安市")));
    }

    #[test]
    fn test_clear_active_keeps_list() {
        let mut session = SearchSession::new();
        session.record(place("长安", "西安市", 34.26, 108.94));
        session.clear_active();

        assert_eq!(session.active(), None);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_active_result_lookup() {
        let mut session = SearchSession::new();
        session.record(place("长安", "西安市", 34.26, 108.94));
        session.record(place("临安", "杭州市", 30.25, 120.17));
        session.activate(&PlaceKey::new("长安", "西安市"));

        let active = session.active_result().unwrap();
        assert_eq!(active.modern_name, "西安市");
    }
}
