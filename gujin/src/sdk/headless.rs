//! In-process headless map adapter.
//!
//! Implements the full capability interface against in-memory state instead
//! of a rendering backend. The CLI uses it to drive a map session without a
//! browser, and the tests use its recorded event log to verify every
//! observable effect of the synchronization core.

use super::types::{
    ClickHandler, LatLng, LayerAttachError, MapSdk, MapSurface, MarkerAppearance,
    MarkerCreationError, MarkerHandle, OverlayHandle, OverlaySpec, PopupContent, SdkLoadError,
    Viewport,
};
use crate::place::PlaceKey;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::trace;

/// Everything observable that happened on a headless surface, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    MarkerAdded { key: PlaceKey, position: LatLng },
    MarkerRemoved { key: PlaceKey },
    AppearanceChanged { key: PlaceKey, appearance: MarkerAppearance },
    PopupOpened { key: PlaceKey },
    PopupClosed { key: PlaceKey },
    CameraFlown { viewport: Viewport, duration: Duration },
    OverlayAttached { name: &'static str },
    OverlayDetached { name: &'static str },
}

#[derive(Debug, Clone)]
struct MarkerState {
    key: PlaceKey,
    position: LatLng,
    appearance: MarkerAppearance,
    popup_open: bool,
}

#[derive(Default)]
struct RecorderInner {
    events: Mutex<Vec<SurfaceEvent>>,
    markers: Mutex<HashMap<u64, MarkerState>>,
    overlays: Mutex<HashMap<u64, &'static str>>,
    click_handler: Mutex<Option<ClickHandler>>,
    surfaces_created: AtomicUsize,
    next_handle: AtomicU64,
}

/// Shared view into the live state and event log of headless surfaces.
///
/// Cloned freely; all clones observe the same state.
#[derive(Clone, Default)]
pub struct SurfaceRecorder {
    inner: Arc<RecorderInner>,
}

impl SurfaceRecorder {
    /// Snapshot of the ordered event log.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.inner.events.lock().unwrap().clone()
    }

    /// Identities of all currently live markers.
    pub fn marker_keys(&self) -> Vec<PlaceKey> {
        self.inner
            .markers
            .lock()
            .unwrap()
            .values()
            .map(|m| m.key.clone())
            .collect()
    }

    /// Position of the live marker with the given identity, if any.
    pub fn marker_position(&self, key: &PlaceKey) -> Option<LatLng> {
        self.inner
            .markers
            .lock()
            .unwrap()
            .values()
            .find(|m| &m.key == key)
            .map(|m| m.position)
    }

    /// Current appearance of the live marker with the given identity.
    pub fn marker_appearance(&self, key: &PlaceKey) -> Option<MarkerAppearance> {
        self.inner
            .markers
            .lock()
            .unwrap()
            .values()
            .find(|m| &m.key == key)
            .map(|m| m.appearance)
    }

    /// Identities of markers whose popup is currently open.
    pub fn open_popups(&self) -> Vec<PlaceKey> {
        self.inner
            .markers
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.popup_open)
            .map(|m| m.key.clone())
            .collect()
    }

    /// Names of currently attached overlays.
    pub fn attached_overlays(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.inner.overlays.lock().unwrap().values().copied().collect();
        names.sort_unstable();
        names
    }

    /// Total markers created since the recorder was made.
    pub fn marker_creations(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::MarkerAdded { .. }))
    }

    /// Total markers removed since the recorder was made.
    pub fn marker_removals(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::MarkerRemoved { .. }))
    }

    /// Total camera animations commanded.
    pub fn camera_flights(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::CameraFlown { .. }))
    }

    /// Total popups opened.
    pub fn popup_opens(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::PopupOpened { .. }))
    }

    /// How many surfaces the SDK has created.
    pub fn surfaces_created(&self) -> usize {
        self.inner.surfaces_created.load(Ordering::SeqCst)
    }

    /// Simulates a user clicking the marker with the given identity.
    pub fn click(&self, key: PlaceKey) {
        let handler = self.inner.click_handler.lock().unwrap().clone();
        if let Some(handler) = handler {
            handler(key);
        }
    }

    fn count(&self, pred: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.inner.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    fn record(&self, event: SurfaceEvent) {
        trace!(?event, "headless surface event");
        self.inner.events.lock().unwrap().push(event);
    }

    fn next_handle(&self) -> u64 {
        self.inner.next_handle.fetch_add(1, Ordering::SeqCst)
    }
}

/// Headless mapping SDK: creates in-memory surfaces that share one recorder.
#[derive(Clone, Default)]
pub struct HeadlessSdk {
    recorder: SurfaceRecorder,
}

impl HeadlessSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorder shared by every surface this SDK creates.
    pub fn recorder(&self) -> SurfaceRecorder {
        self.recorder.clone()
    }
}

impl MapSdk for HeadlessSdk {
    fn name(&self) -> &str {
        "headless"
    }

    fn create_surface(
        &self,
        target: &str,
        viewport: Viewport,
    ) -> Result<Box<dyn MapSurface>, SdkLoadError> {
        trace!(target, ?viewport, "creating headless surface");
        self.recorder
            .inner
            .surfaces_created
            .fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(HeadlessSurface {
            recorder: self.recorder.clone(),
        }))
    }
}

struct HeadlessSurface {
    recorder: SurfaceRecorder,
}

impl MapSurface for HeadlessSurface {
    fn add_marker(
        &mut self,
        key: PlaceKey,
        position: LatLng,
        appearance: MarkerAppearance,
    ) -> Result<MarkerHandle, MarkerCreationError> {
        let handle = self.recorder.next_handle();
        self.recorder.inner.markers.lock().unwrap().insert(
            handle,
            MarkerState {
                key: key.clone(),
                position,
                appearance,
                popup_open: false,
            },
        );
        self.recorder.record(SurfaceEvent::MarkerAdded { key, position });
        Ok(MarkerHandle(handle))
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        let removed = self.recorder.inner.markers.lock().unwrap().remove(&marker.0);
        if let Some(state) = removed {
            self.recorder.record(SurfaceEvent::MarkerRemoved { key: state.key });
        }
    }

    fn set_marker_appearance(&mut self, marker: MarkerHandle, appearance: MarkerAppearance) {
        let mut markers = self.recorder.inner.markers.lock().unwrap();
        if let Some(state) = markers.get_mut(&marker.0) {
            if state.appearance != appearance {
                state.appearance = appearance;
                let key = state.key.clone();
                drop(markers);
                self.recorder
                    .record(SurfaceEvent::AppearanceChanged { key, appearance });
            }
        }
    }

    fn open_popup(&mut self, marker: MarkerHandle, _content: PopupContent) {
        let mut markers = self.recorder.inner.markers.lock().unwrap();
        if let Some(state) = markers.get_mut(&marker.0) {
            if !state.popup_open {
                state.popup_open = true;
                let key = state.key.clone();
                drop(markers);
                self.recorder.record(SurfaceEvent::PopupOpened { key });
            }
        }
    }

    fn close_popup(&mut self, marker: MarkerHandle) {
        let mut markers = self.recorder.inner.markers.lock().unwrap();
        if let Some(state) = markers.get_mut(&marker.0) {
            if state.popup_open {
                state.popup_open = false;
                let key = state.key.clone();
                drop(markers);
                self.recorder.record(SurfaceEvent::PopupClosed { key });
            }
        }
    }

    fn fly_to(&mut self, viewport: Viewport, duration: Duration) {
        self.recorder
            .record(SurfaceEvent::CameraFlown { viewport, duration });
    }

    fn attach_overlay(&mut self, overlay: &OverlaySpec) -> Result<OverlayHandle, LayerAttachError> {
        let handle = self.recorder.next_handle();
        self.recorder
            .inner
            .overlays
            .lock()
            .unwrap()
            .insert(handle, overlay.name);
        self.recorder
            .record(SurfaceEvent::OverlayAttached { name: overlay.name });
        Ok(OverlayHandle(handle))
    }

    fn detach_overlay(&mut self, overlay: OverlayHandle) {
        let removed = self.recorder.inner.overlays.lock().unwrap().remove(&overlay.0);
        if let Some(name) = removed {
            self.recorder.record(SurfaceEvent::OverlayDetached { name });
        }
    }

    fn set_click_handler(&mut self, handler: ClickHandler) {
        *self.recorder.inner.click_handler.lock().unwrap() = Some(handler);
    }
}
