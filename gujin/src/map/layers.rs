//! Base-layer visual modes.
//!
//! A small state machine over `{Standard, Satellite, Terrain}`. Modes differ
//! only in which supplementary overlays sit above the base map, so switching
//! modes never rebuilds the map: transition detaches the current mode's
//! overlays, then attaches the target mode's. The detach-then-attach order
//! keeps the overlay count exact at every observable instant and avoids
//! transient double-rendering.

use crate::sdk::{MapSurface, OverlayHandle, OverlaySpec};
use tracing::{debug, warn};

/// Satellite imagery overlay used by the satellite mode.
pub const SATELLITE_IMAGERY: OverlaySpec = OverlaySpec {
    name: "satellite-imagery",
    url_template:
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
};

/// Shaded terrain relief overlay.
pub const TERRAIN_RELIEF: OverlaySpec = OverlaySpec {
    name: "terrain-relief",
    url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
};

/// Road network overlay rendered above terrain relief.
pub const ROAD_NETWORK: OverlaySpec = OverlaySpec {
    name: "road-network",
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
};

/// The current set of supplementary overlays on the base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerMode {
    /// Base map only, no overlays.
    #[default]
    Standard,
    /// One satellite imagery overlay.
    Satellite,
    /// Terrain relief plus road network overlays.
    Terrain,
}

impl LayerMode {
    /// Overlays this mode attaches above the base map.
    pub fn overlays(&self) -> &'static [OverlaySpec] {
        match self {
            LayerMode::Standard => &[],
            LayerMode::Satellite => &[SATELLITE_IMAGERY],
            LayerMode::Terrain => &[TERRAIN_RELIEF, ROAD_NETWORK],
        }
    }

    /// Parses a mode name as used by config files and the CLI.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(LayerMode::Standard),
            "satellite" => Some(LayerMode::Satellite),
            "terrain" => Some(LayerMode::Terrain),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerMode::Standard => "standard",
            LayerMode::Satellite => "satellite",
            LayerMode::Terrain => "terrain",
        }
    }
}

/// Applies layer mode transitions to a surface, tracking attached overlays.
#[derive(Debug, Default)]
pub struct LayerSwitcher {
    mode: LayerMode,
    attached: Vec<OverlayHandle>,
}

impl LayerSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions to `mode`. Same-mode calls are no-ops.
    ///
    /// A failed overlay attach is logged and skipped; the mode still
    /// advances, the overlay is simply absent.
    pub fn set_layer(&mut self, surface: &mut dyn MapSurface, mode: LayerMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = self.mode.name(), to = mode.name(), "switching layer mode");

        for handle in self.attached.drain(..) {
            surface.detach_overlay(handle);
        }
        for spec in mode.overlays() {
            match surface.attach_overlay(spec) {
                Ok(handle) => self.attached.push(handle),
                Err(e) => warn!(overlay = spec.name, error = %e, "overlay attach failed"),
            }
        }
        self.mode = mode;
    }

    /// The current mode.
    pub fn mode(&self) -> LayerMode {
        self.mode
    }

    /// Number of overlays currently attached.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::{
        FaultySurface, HeadlessSdk, LatLng, MapSdk, SurfaceEvent, SurfaceRecorder, Viewport,
    };

    fn surface() -> (Box<dyn MapSurface>, SurfaceRecorder) {
        let sdk = HeadlessSdk::new();
        let recorder = sdk.recorder();
        let surface = sdk
            .create_surface(
                "test",
                Viewport {
                    center: LatLng::new(35.86, 104.2),
                    zoom: 5.0,
                },
            )
            .unwrap();
        (surface, recorder)
    }

    #[test]
    fn test_initial_mode_is_standard_with_no_overlays() {
        let switcher = LayerSwitcher::new();
        assert_eq!(switcher.mode(), LayerMode::Standard);
        assert_eq!(switcher.attached_count(), 0);
    }

    #[test]
    fn test_satellite_attaches_one_overlay() {
        let (mut surface, recorder) = surface();
        let mut switcher = LayerSwitcher::new();

        switcher.set_layer(surface.as_mut(), LayerMode::Satellite);
        assert_eq!(switcher.attached_count(), 1);
        assert_eq!(recorder.attached_overlays(), vec!["satellite-imagery"]);
    }

    #[test]
    fn test_terrain_then_standard_leaves_nothing_attached() {
        let (mut surface, recorder) = surface();
        let mut switcher = LayerSwitcher::new();

        switcher.set_layer(surface.as_mut(), LayerMode::Terrain);
        assert_eq!(switcher.attached_count(), 2);
        switcher.set_layer(surface.as_mut(), LayerMode::Standard);
        assert_eq!(switcher.attached_count(), 0);
        assert!(recorder.attached_overlays().is_empty());
    }

    #[test]
    fn test_satellite_to_terrain_leaves_exactly_terrain_overlays() {
        let (mut surface, recorder) = surface();
        let mut switcher = LayerSwitcher::new();

        switcher.set_layer(surface.as_mut(), LayerMode::Satellite);
        switcher.set_layer(surface.as_mut(), LayerMode::Terrain);

        assert_eq!(switcher.attached_count(), 2);
        // No leaked satellite residue.
        assert_eq!(
            recorder.attached_overlays(),
            vec!["road-network", "terrain-relief"]
        );
    }

    #[test]
    fn test_same_mode_call_is_noop() {
        let (mut surface, recorder) = surface();
        let mut switcher = LayerSwitcher::new();

        switcher.set_layer(surface.as_mut(), LayerMode::Satellite);
        let events_before = recorder.events().len();
        switcher.set_layer(surface.as_mut(), LayerMode::Satellite);
        assert_eq!(recorder.events().len(), events_before);
    }

    #[test]
    fn test_transition_detaches_before_attaching() {
        let (mut surface, recorder) = surface();
        let mut switcher = LayerSwitcher::new();

        switcher.set_layer(surface.as_mut(), LayerMode::Satellite);
        switcher.set_layer(surface.as_mut(), LayerMode::Terrain);

        let events = recorder.events();
        let detach_idx = events
            .iter()
            .position(|e| matches!(e, SurfaceEvent::OverlayDetached { name: "satellite-imagery" }))
            .unwrap();
        let attach_idx = events
            .iter()
            .position(|e| matches!(e, SurfaceEvent::OverlayAttached { name: "terrain-relief" }))
            .unwrap();
        assert!(detach_idx < attach_idx);
    }

    #[test]
    fn test_failed_overlay_attach_still_advances_mode() {
        let (surface, recorder) = surface();
        let mut surface = FaultySurface::new(surface);
        surface.fail_overlay = Some("terrain-relief");
        let mut switcher = LayerSwitcher::new();

        switcher.set_layer(&mut surface, LayerMode::Terrain);

        // The mode advances with the surviving overlay attached.
        assert_eq!(switcher.mode(), LayerMode::Terrain);
        assert_eq!(switcher.attached_count(), 1);
        assert_eq!(recorder.attached_overlays(), vec!["road-network"]);

        // Leaving the degraded mode detaches what did attach.
        switcher.set_layer(&mut surface, LayerMode::Standard);
        assert_eq!(switcher.mode(), LayerMode::Standard);
        assert!(recorder.attached_overlays().is_empty());
    }

    #[test]
    fn test_mode_parse_roundtrip() {
        for mode in [LayerMode::Standard, LayerMode::Satellite, LayerMode::Terrain] {
            assert_eq!(LayerMode::parse(mode.name()), Some(mode));
        }
        assert_eq!(LayerMode::parse("hybrid"), None);
    }
}
