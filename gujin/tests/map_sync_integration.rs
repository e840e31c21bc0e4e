//! Integration tests for the map synchronization component.
//!
//! These tests drive a full MapView against the headless SDK adapter and
//! verify the component's observable behavior through the recorded surface
//! events:
//! - marker set always matching the result list
//! - reconcile and focus idempotence
//! - layer mode transitions without overlay leaks
//! - bootstrap ordering and teardown-during-load safety

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use gujin::config::MapSettings;
use gujin::map::{LayerMode, MapView};
use gujin::place::{PlaceKey, PlaceResult, SearchSession};
use gujin::sdk::{
    HeadlessSdk, LatLng, SdkHandle, SdkLoadError, SdkLoader, SurfaceEvent, SurfaceRecorder,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn place(ancient: &str, modern: &str, lat: f64, lon: f64) -> PlaceResult {
    PlaceResult {
        ancient_name: ancient.to_string(),
        modern_name: modern.to_string(),
        province: "测试省".to_string(),
        latitude: lat,
        longitude: lon,
        description: "测试描述".to_string(),
        dynasty_info: "测试朝代".to_string(),
    }
}

fn changan() -> PlaceResult {
    place("长安", "西安市", 34.26, 108.94)
}

fn linan() -> PlaceResult {
    place("临安", "杭州市", 30.25, 120.17)
}

/// Builds a view over a ready headless SDK and waits for the surface.
async fn ready_view() -> (MapView, SurfaceRecorder) {
    let sdk = Arc::new(HeadlessSdk::new());
    let recorder = sdk.recorder();
    let loader = Arc::new(SdkLoader::ready(sdk));
    let view = MapView::new(loader, MapSettings::default());
    view.mount("main-map").await.expect("mount task panicked");
    assert!(view.is_ready().await);
    (view, recorder)
}

// =============================================================================
// Reconciliation
// =============================================================================

#[tokio::test]
async fn test_marker_set_tracks_result_list() {
    let (view, recorder) = ready_view().await;

    view.set_results(vec![changan(), linan()]).await;
    let mut keys = recorder.marker_keys();
    keys.sort_by(|a, b| a.ancient_name.cmp(&b.ancient_name));
    assert_eq!(
        keys,
        vec![
            PlaceKey::new("临安", "杭州市"),
            PlaceKey::new("长安", "西安市"),
        ]
    );

    // Shrinking the list removes exactly the departed marker.
    view.set_results(vec![linan()]).await;
    assert_eq!(recorder.marker_keys(), vec![PlaceKey::new("临安", "杭州市")]);
    assert_eq!(view.marker_count().await, 1);
}

#[tokio::test]
async fn test_reconcile_is_idempotent() {
    let (view, recorder) = ready_view().await;

    view.set_results(vec![changan(), linan()]).await;
    view.set_results(vec![changan(), linan()]).await;

    assert_eq!(recorder.marker_creations(), 2);
    assert_eq!(recorder.marker_removals(), 0);
}

#[tokio::test]
async fn test_prepended_result_does_not_recreate_existing_marker() {
    let (view, recorder) = ready_view().await;
    let changan_key = PlaceKey::new("长安", "西安市");

    view.set_results(vec![changan()]).await;
    assert_eq!(
        recorder.marker_position(&changan_key),
        Some(LatLng::new(34.26, 108.94))
    );

    // New result arrives at the front of the list.
    view.set_results(vec![linan(), changan()]).await;

    assert_eq!(recorder.marker_creations(), 2);
    assert_eq!(
        recorder.marker_position(&changan_key),
        Some(LatLng::new(34.26, 108.94))
    );
}

#[tokio::test]
async fn test_invalid_coordinates_skip_only_that_result() {
    let (view, recorder) = ready_view().await;

    view.set_results(vec![changan(), place("蓬莱", "不详", f64::NAN, 999.0)])
        .await;

    assert_eq!(recorder.marker_keys(), vec![PlaceKey::new("长安", "西安市")]);
}

// =============================================================================
// Active focus
// =============================================================================

#[tokio::test]
async fn test_focus_same_identity_animates_once() {
    let (view, recorder) = ready_view().await;
    view.set_results(vec![changan()]).await;

    view.set_active(Some(PlaceKey::new("长安", "西安市"))).await;
    // Re-render with unchanged active selection.
    view.set_active(Some(PlaceKey::new("长安", "西安市"))).await;

    assert_eq!(recorder.camera_flights(), 1);
    assert_eq!(recorder.popup_opens(), 1);
}

#[tokio::test]
async fn test_focus_switch_moves_single_popup() {
    let (view, recorder) = ready_view().await;
    view.set_results(vec![changan(), linan()]).await;

    view.set_active(Some(PlaceKey::new("长安", "西安市"))).await;
    view.set_active(Some(PlaceKey::new("临安", "杭州市"))).await;

    assert_eq!(recorder.open_popups(), vec![PlaceKey::new("临安", "杭州市")]);
    assert_eq!(recorder.camera_flights(), 2);

    let flights: Vec<LatLng> = recorder
        .events()
        .iter()
        .filter_map(|e| match e {
            SurfaceEvent::CameraFlown { viewport, .. } => Some(viewport.center),
            _ => None,
        })
        .collect();
    assert_eq!(flights, vec![LatLng::new(34.26, 108.94), LatLng::new(30.25, 120.17)]);
}

#[tokio::test]
async fn test_active_marker_appearance_follows_selection() {
    let (view, recorder) = ready_view().await;
    let changan_key = PlaceKey::new("长安", "西安市");
    let linan_key = PlaceKey::new("临安", "杭州市");
    view.set_results(vec![changan(), linan()]).await;

    view.set_active(Some(changan_key.clone())).await;
    view.set_active(Some(linan_key.clone())).await;

    use gujin::sdk::MarkerAppearance;
    assert_eq!(recorder.marker_appearance(&changan_key), Some(MarkerAppearance::Default));
    assert_eq!(recorder.marker_appearance(&linan_key), Some(MarkerAppearance::Active));
    // Appearance toggling never rebuilt a marker.
    assert_eq!(recorder.marker_creations(), 2);
    assert_eq!(recorder.marker_removals(), 0);
}

// =============================================================================
// Layer modes
// =============================================================================

#[tokio::test]
async fn test_terrain_then_standard_detaches_everything() {
    let (view, recorder) = ready_view().await;

    view.set_layer(LayerMode::Terrain).await;
    view.set_layer(LayerMode::Standard).await;

    assert!(recorder.attached_overlays().is_empty());
    assert_eq!(view.layer_mode().await, LayerMode::Standard);
}

#[tokio::test]
async fn test_satellite_to_terrain_leaves_exactly_two_overlays() {
    let (view, recorder) = ready_view().await;

    view.set_layer(LayerMode::Satellite).await;
    view.set_layer(LayerMode::Terrain).await;

    assert_eq!(
        recorder.attached_overlays(),
        vec!["road-network", "terrain-relief"]
    );
}

#[tokio::test]
async fn test_layer_requested_before_ready_is_applied_on_mount() {
    let sdk = Arc::new(HeadlessSdk::new());
    let recorder = sdk.recorder();
    let loader = Arc::new(SdkLoader::ready(sdk));
    let view = MapView::new(loader, MapSettings::default());

    // Inputs arrive before the surface exists.
    view.set_layer(LayerMode::Satellite).await;
    view.set_results(vec![changan()]).await;
    view.set_active(Some(PlaceKey::new("长安", "西安市"))).await;
    assert!(!view.is_ready().await);

    view.mount("main-map").await.expect("mount task panicked");

    assert_eq!(recorder.attached_overlays(), vec!["satellite-imagery"]);
    assert_eq!(recorder.marker_keys(), vec![PlaceKey::new("长安", "西安市")]);
    assert_eq!(recorder.camera_flights(), 1);
}

#[tokio::test]
async fn test_layer_mode_reports_request_before_ready() {
    let sdk = Arc::new(HeadlessSdk::new());
    let loader = Arc::new(SdkLoader::ready(sdk));
    let view = MapView::new(loader, MapSettings::default());

    view.set_layer(LayerMode::Satellite).await;
    // The requested mode is visible before the surface exists.
    assert_eq!(view.layer_mode().await, LayerMode::Satellite);

    view.mount("main-map").await.expect("mount task panicked");
    assert_eq!(view.layer_mode().await, LayerMode::Satellite);
}

// =============================================================================
// Bootstrap and teardown
// =============================================================================

#[tokio::test]
async fn test_teardown_while_sdk_loading_creates_nothing() {
    let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
    let sdk = Arc::new(HeadlessSdk::new());
    let recorder = sdk.recorder();
    let loader = Arc::new(SdkLoader::new(async move {
        // Simulates a slow script load.
        let _ = release_rx.await;
        Ok(sdk as SdkHandle)
    }));

    let view = MapView::new(loader, MapSettings::default());
    let mount = view.mount("main-map");

    view.teardown().await;
    release_tx.send(()).unwrap();
    mount.await.expect("mount task panicked");

    assert_eq!(recorder.surfaces_created(), 0);
    assert!(!view.is_ready().await);
}

#[tokio::test]
async fn test_load_failure_is_surfaced_not_fatal() {
    let loader = Arc::new(SdkLoader::new(async {
        Err(SdkLoadError::Credentials("invalid key".to_string()))
    }));
    let view = MapView::new(loader, MapSettings::default());

    view.mount("main-map").await.expect("mount task panicked");

    assert!(!view.is_ready().await);
    assert_eq!(
        view.load_error().await,
        Some(SdkLoadError::Credentials("invalid key".to_string()))
    );

    // Inputs after a failed load are buffered without panicking.
    view.set_results(vec![changan()]).await;
    assert_eq!(view.marker_count().await, 0);
}

#[tokio::test]
async fn test_concurrent_acquire_shares_one_initialization() {
    let inits = Arc::new(AtomicUsize::new(0));
    let inits_clone = inits.clone();
    let loader = Arc::new(SdkLoader::new(async move {
        inits_clone.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        Ok(Arc::new(HeadlessSdk::new()) as SdkHandle)
    }));

    let (a, b, c) = tokio::join!(loader.acquire(), loader.acquire(), loader.acquire());
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(inits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_initial_viewport_comes_from_settings() {
    let (_view, recorder) = ready_view().await;
    // Surface created once with the configured China-overview viewport and
    // no camera movement until a result is focused.
    assert_eq!(recorder.surfaces_created(), 1);
    assert_eq!(recorder.camera_flights(), 0);
}

// =============================================================================
// Host session + click callback
// =============================================================================

#[tokio::test]
async fn test_duplicate_resolution_updates_active_without_growth() {
    let (view, recorder) = ready_view().await;
    let mut session = SearchSession::new();

    session.record(changan());
    session.record(linan());
    view.set_results(session.results().to_vec()).await;
    view.set_active(session.active().cloned()).await;

    // 长安 resolved again with jittered coordinates.
    session.record(place("长安", "西安市", 34.2601, 108.9399));
    view.set_results(session.results().to_vec()).await;
    view.set_active(session.active().cloned()).await;

    assert_eq!(session.len(), 2);
    assert_eq!(recorder.marker_creations(), 2);
    assert_eq!(recorder.open_popups(), vec![PlaceKey::new("长安", "西安市")]);
    // The marker kept its original position.
    assert_eq!(
        recorder.marker_position(&PlaceKey::new("长安", "西安市")),
        Some(LatLng::new(34.26, 108.94))
    );
}

#[tokio::test]
async fn test_marker_click_reports_identity_to_host() {
    let (view, recorder) = ready_view().await;
    view.set_results(vec![changan()]).await;

    let clicked: Arc<Mutex<Option<PlaceKey>>> = Arc::new(Mutex::new(None));
    let clicked_clone = clicked.clone();
    view.on_marker_click(move |key| {
        *clicked_clone.lock().unwrap() = Some(key);
    })
    .await;

    recorder.click(PlaceKey::new("长安", "西安市"));
    assert_eq!(
        clicked.lock().unwrap().clone(),
        Some(PlaceKey::new("长安", "西安市"))
    );
}
