//! The composed map view component.
//!
//! Owns the map surface for exactly the interval between successful creation
//! and teardown. Inputs (result list, active selection, layer mode) can
//! arrive at any time relative to SDK readiness: before the surface exists
//! they are buffered and re-applied wholesale once it does; afterwards each
//! change is applied synchronously under the inner lock. Teardown cancels the
//! mount continuation, so an SDK that resolves after teardown mutates
//! nothing.

use super::focus::ActiveFocusController;
use super::layers::{LayerMode, LayerSwitcher};
use super::reconciler::MarkerReconciler;
use crate::config::MapSettings;
use crate::place::{PlaceKey, PlaceResult};
use crate::sdk::{ClickHandler, MapSurface, SdkLoadError, SdkLoader, Viewport};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Inputs as last supplied by the host, buffered until the surface exists.
#[derive(Debug, Default)]
struct PendingInputs {
    results: Vec<PlaceResult>,
    active: Option<PlaceKey>,
    layer: LayerMode,
}

struct ViewInner {
    surface: Option<Box<dyn MapSurface>>,
    reconciler: MarkerReconciler,
    focus: ActiveFocusController,
    layers: LayerSwitcher,
    pending: PendingInputs,
    click_handler: Option<ClickHandler>,
    load_error: Option<SdkLoadError>,
}

impl ViewInner {
    /// Applies every buffered input to a freshly installed surface.
    fn install_surface(&mut self, mut surface: Box<dyn MapSurface>) {
        if let Some(handler) = &self.click_handler {
            surface.set_click_handler(Arc::clone(handler));
        }
        self.layers.set_layer(surface.as_mut(), self.pending.layer);
        self.surface = Some(surface);
        self.sync();
    }

    /// Re-runs reconcile and focus against the current inputs.
    fn sync(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            return;
        };
        self.reconciler
            .reconcile(surface, &self.pending.results, self.pending.active.as_ref());
        self.focus.invalidate_missing(&self.reconciler);
        self.focus.focus(
            surface,
            &self.reconciler,
            &self.pending.results,
            self.pending.active.as_ref(),
        );
    }
}

/// Map synchronization component.
///
/// One instance per mounted map. Constructed with a shared [`SdkLoader`];
/// [`mount`] kicks off the asynchronous bootstrap, [`teardown`] (or drop)
/// ends the component's lifetime.
///
/// [`mount`]: MapView::mount
/// [`teardown`]: MapView::teardown
pub struct MapView {
    inner: Arc<Mutex<ViewInner>>,
    loader: Arc<SdkLoader>,
    cancel: CancellationToken,
    settings: MapSettings,
}

impl MapView {
    pub fn new(loader: Arc<SdkLoader>, settings: MapSettings) -> Self {
        let focus = ActiveFocusController::new(settings.focus_zoom, settings.focus_duration);
        Self {
            inner: Arc::new(Mutex::new(ViewInner {
                surface: None,
                reconciler: MarkerReconciler::new(),
                focus,
                layers: LayerSwitcher::new(),
                pending: PendingInputs::default(),
                click_handler: None,
                load_error: None,
            })),
            loader,
            cancel: CancellationToken::new(),
            settings,
        }
    }

    /// Starts the asynchronous bootstrap: acquire the SDK, create the
    /// surface bound to `target`, then apply every buffered input.
    ///
    /// Returns the handle of the spawned bootstrap task; awaiting it is only
    /// needed when the caller wants to block until readiness. Safe with
    /// respect to teardown: if the component is torn down while the SDK is
    /// still loading, the continuation observes the cancellation and creates
    /// nothing.
    pub fn mount(&self, target: impl Into<String>) -> JoinHandle<()> {
        let target = target.into();
        let inner = Arc::clone(&self.inner);
        let loader = Arc::clone(&self.loader);
        let cancel = self.cancel.clone();
        let initial = Viewport {
            center: self.settings.default_center,
            zoom: self.settings.default_zoom,
        };

        tokio::spawn(async move {
            let sdk = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("map torn down before SDK resolved");
                    return;
                }
                outcome = loader.acquire() => match outcome {
                    Ok(sdk) => sdk,
                    Err(e) => {
                        error!(error = %e, "mapping SDK unavailable, map stays non-ready");
                        inner.lock().await.load_error = Some(e);
                        return;
                    }
                },
            };

            let surface = match sdk.create_surface(&target, initial) {
                Ok(surface) => surface,
                Err(e) => {
                    error!(error = %e, target, "map surface creation failed");
                    inner.lock().await.load_error = Some(e);
                    return;
                }
            };

            let mut guard = inner.lock().await;
            if cancel.is_cancelled() {
                // Torn down between creation and installation; the surface
                // drops here without ever being observable.
                debug!("map torn down during surface creation");
                return;
            }
            info!(provider = sdk.name(), target, "map surface ready");
            guard.install_surface(surface);
        })
    }

    /// Supplies the ordered result list. Reconciles immediately when the
    /// surface is ready, otherwise on readiness.
    pub async fn set_results(&self, results: Vec<PlaceResult>) {
        let mut guard = self.inner.lock().await;
        guard.pending.results = results;
        guard.sync();
    }

    /// Supplies the active selection (or clears it with `None`).
    pub async fn set_active(&self, active: Option<PlaceKey>) {
        let mut guard = self.inner.lock().await;
        guard.pending.active = active;
        guard.sync();
    }

    /// Requests a base-layer mode.
    pub async fn set_layer(&self, mode: LayerMode) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.pending.layer = mode;
        if let Some(surface) = inner.surface.as_deref_mut() {
            inner.layers.set_layer(surface, mode);
        }
    }

    /// Registers the marker click callback, invoked with the clicked
    /// result's identity.
    pub async fn on_marker_click<F>(&self, handler: F)
    where
        F: Fn(PlaceKey) + Send + Sync + 'static,
    {
        let handler: ClickHandler = Arc::new(handler);
        let mut guard = self.inner.lock().await;
        guard.click_handler = Some(Arc::clone(&handler));
        if let Some(surface) = guard.surface.as_deref_mut() {
            surface.set_click_handler(handler);
        }
    }

    /// Whether the surface exists and inputs apply synchronously.
    pub async fn is_ready(&self) -> bool {
        self.inner.lock().await.surface.is_some()
    }

    /// The SDK or surface-creation failure, if bootstrap failed.
    pub async fn load_error(&self) -> Option<SdkLoadError> {
        self.inner.lock().await.load_error.clone()
    }

    /// Number of markers currently on the map.
    pub async fn marker_count(&self) -> usize {
        self.inner.lock().await.reconciler.len()
    }

    /// The layer mode as last requested by the host.
    ///
    /// Before the surface exists this is the buffered request; it takes
    /// visual effect on mount.
    pub async fn layer_mode(&self) -> LayerMode {
        self.inner.lock().await.pending.layer
    }

    /// Tears the component down: cancels any pending bootstrap and destroys
    /// the surface along with its markers and overlays.
    pub async fn teardown(&self) {
        self.cancel.cancel();
        let mut guard = self.inner.lock().await;
        if guard.surface.take().is_some() {
            debug!("map surface destroyed");
        }
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        // Ensure a still-loading SDK cannot resurrect state owned by a view
        // the host has already discarded.
        self.cancel.cancel();
    }
}
