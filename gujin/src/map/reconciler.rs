//! Marker reconciliation.
//!
//! Diffs the result list against the currently rendered markers. The diff is
//! structural only: markers are created for new identities and removed for
//! departed ones, but an identity already on the map keeps its marker and its
//! position untouched. Visual state (default vs. active icon) is derived from
//! the active selection on every call rather than cached, so a selection
//! change is an icon swap, never a marker rebuild.

use crate::place::{PlaceKey, PlaceResult};
use crate::sdk::{LatLng, MapSurface, MarkerAppearance, MarkerHandle};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Ownership-scoped mapping from result identity to live marker handle.
#[derive(Debug, Default)]
pub struct MarkerReconciler {
    markers: HashMap<PlaceKey, MarkerHandle>,
}

impl MarkerReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles rendered markers with the result list.
    ///
    /// After this returns, the marker set's identity set equals the list's
    /// identity set, except for results with invalid coordinates, which are
    /// skipped with a warning and retried on the next call.
    pub fn reconcile(
        &mut self,
        surface: &mut dyn MapSurface,
        results: &[PlaceResult],
        active: Option<&PlaceKey>,
    ) {
        let wanted: HashSet<PlaceKey> = results.iter().map(PlaceResult::key).collect();

        let stale: Vec<PlaceKey> = self
            .markers
            .keys()
            .filter(|key| !wanted.contains(*key))
            .cloned()
            .collect();
        for key in stale {
            if let Some(handle) = self.markers.remove(&key) {
                debug!(place = %key, "removing marker for departed result");
                surface.close_popup(handle);
                surface.remove_marker(handle);
            }
        }

        for result in results {
            let key = result.key();
            let appearance = Self::appearance_for(&key, active);

            if let Some(&handle) = self.markers.get(&key) {
                // Existing marker: position stays, only the icon is derived.
                surface.set_marker_appearance(handle, appearance);
                continue;
            }

            let position = match LatLng::validated(result.latitude, result.longitude) {
                Ok(position) => position,
                Err(e) => {
                    warn!(place = %key, error = %e, "skipping marker with invalid coordinates");
                    continue;
                }
            };
            match surface.add_marker(key.clone(), position, appearance) {
                Ok(handle) => {
                    debug!(place = %key, lat = position.lat, lon = position.lon, "marker created");
                    self.markers.insert(key, handle);
                }
                Err(e) => {
                    warn!(place = %key, error = %e, "provider rejected marker, skipping result");
                }
            }
        }
    }

    /// The handle for an identity's live marker, if it has one.
    pub fn handle(&self, key: &PlaceKey) -> Option<MarkerHandle> {
        self.markers.get(key).copied()
    }

    /// Whether the identity currently has a marker.
    pub fn contains(&self, key: &PlaceKey) -> bool {
        self.markers.contains_key(key)
    }

    /// Identities of all live markers.
    pub fn keys(&self) -> impl Iterator<Item = &PlaceKey> {
        self.markers.keys()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn appearance_for(key: &PlaceKey, active: Option<&PlaceKey>) -> MarkerAppearance {
        if active == Some(key) {
            MarkerAppearance::Active
        } else {
            MarkerAppearance::Default
        }
    }
}
