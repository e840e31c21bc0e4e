//! Active-result focus: popup and camera.
//!
//! Tracks which single result is focused on the map. A focus change closes
//! the previous popup, opens the new result's popup, and commands a bounded
//! eased camera animation to its coordinates. Focus is compared by identity,
//! not by coordinates, so re-selecting the already-active place is a no-op
//! even when the backend jittered its coordinates.

use super::reconciler::MarkerReconciler;
use crate::place::{PlaceKey, PlaceResult};
use crate::sdk::{LatLng, MapSurface, PopupContent, Viewport};
use std::time::Duration;
use tracing::debug;

/// Tracks and applies the active-result focus.
#[derive(Debug)]
pub struct ActiveFocusController {
    focused: Option<PlaceKey>,
    focus_zoom: f64,
    focus_duration: Duration,
}

impl ActiveFocusController {
    pub fn new(focus_zoom: f64, focus_duration: Duration) -> Self {
        Self {
            focused: None,
            focus_zoom,
            focus_duration,
        }
    }

    /// Applies an active-selection change to the surface.
    ///
    /// Idempotent by identity: if `active` matches the currently focused
    /// identity, nothing happens. At most one popup is open at any time.
    pub fn focus(
        &mut self,
        surface: &mut dyn MapSurface,
        reconciler: &MarkerReconciler,
        results: &[PlaceResult],
        active: Option<&PlaceKey>,
    ) {
        if self.focused.as_ref() == active {
            return;
        }

        if let Some(previous) = self.focused.take() {
            if let Some(handle) = reconciler.handle(&previous) {
                surface.close_popup(handle);
            }
        }

        let Some(key) = active else {
            return;
        };
        let Some(result) = results.iter().find(|r| r.is(key)) else {
            debug!(place = %key, "active selection not in result list, nothing to focus");
            return;
        };
        let Some(handle) = reconciler.handle(key) else {
            // No marker (e.g. invalid coordinates); nothing to anchor to.
            debug!(place = %key, "active selection has no marker, skipping focus");
            return;
        };

        debug!(place = %key, "focusing active result");
        surface.open_popup(handle, PopupContent::from(result));
        surface.fly_to(
            Viewport {
                center: LatLng::new(result.latitude, result.longitude),
                zoom: self.focus_zoom,
            },
            self.focus_duration,
        );
        self.focused = Some(key.clone());
    }

    /// Forgets the focus if its marker left the map.
    ///
    /// Called after reconciliation so that a result which departs and later
    /// returns is focused (and animated to) afresh.
    pub fn invalidate_missing(&mut self, reconciler: &MarkerReconciler) {
        if let Some(key) = &self.focused {
            if !reconciler.contains(key) {
                self.focused = None;
            }
        }
    }

    /// The currently focused identity, if any.
    pub fn focused(&self) -> Option<&PlaceKey> {
        self.focused.as_ref()
    }
}
