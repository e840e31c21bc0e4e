//! SDK types and capability traits

use crate::place::{PlaceKey, PlaceResult};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while acquiring or initializing the mapping SDK.
///
/// Clonable because the loader memoizes the outcome and hands the same
/// failure to every caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SdkLoadError {
    /// The SDK resource could not be fetched (network failure etc.).
    #[error("Failed to fetch mapping SDK: {0}")]
    Fetch(String),
    /// The SDK was fetched but failed to initialize.
    #[error("Mapping SDK failed to initialize: {0}")]
    Initialization(String),
    /// The SDK rejected the configured credentials.
    #[error("Mapping SDK rejected credentials: {0}")]
    Credentials(String),
}

/// Errors that can occur when creating a single marker.
#[derive(Debug, Error)]
pub enum MarkerCreationError {
    /// Coordinates are non-finite or outside the valid range.
    #[error("Invalid marker coordinates ({lat}, {lon})")]
    InvalidCoordinates { lat: f64, lon: f64 },
    /// The provider rejected the marker for its own reasons.
    #[error("Provider rejected marker: {0}")]
    Provider(String),
}

/// Error attaching a base-layer overlay. Non-fatal: the layer mode still
/// advances, the overlay is simply absent.
#[derive(Debug, Error)]
#[error("Failed to attach overlay '{name}': {reason}")]
pub struct LayerAttachError {
    pub name: &'static str,
    pub reason: String,
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validates coordinates before marker creation.
    ///
    /// Rejects non-finite values and values outside ±90° / ±180°.
    pub fn validated(lat: f64, lon: f64) -> Result<Self, MarkerCreationError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(MarkerCreationError::InvalidCoordinates { lat, lon })
        }
    }
}

/// A map camera position: center plus zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

/// Visual state of a marker, derived from whether its identity equals the
/// active selection. Recomputed on every reconcile, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAppearance {
    Default,
    Active,
}

/// The four display fields rendered in a marker's info popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    /// "ancient → modern" headline.
    pub title: String,
    /// Province and formatted coordinates.
    pub subtitle: String,
    pub description: String,
    pub dynasty_info: String,
}

impl From<&PlaceResult> for PopupContent {
    fn from(result: &PlaceResult) -> Self {
        Self {
            title: format!("{} → {}", result.ancient_name, result.modern_name),
            subtitle: format!(
                "{} · {:.4}°N, {:.4}°E",
                result.province, result.latitude, result.longitude
            ),
            description: result.description.clone(),
            dynasty_info: result.dynasty_info.clone(),
        }
    }
}

/// Handle to a marker created on a surface. Issued by the surface, opaque to
/// the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Handle to an attached overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// A supplementary visual overlay, identified by name and tile URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySpec {
    pub name: &'static str,
    pub url_template: &'static str,
}

/// Callback invoked with the clicked result's identity.
pub type ClickHandler = Arc<dyn Fn(PlaceKey) + Send + Sync>;

/// Shared handle to an initialized mapping SDK, acquired once per loader
/// lifetime.
pub type SdkHandle = Arc<dyn MapSdk>;

/// An initialized mapping SDK.
///
/// Implementors create map surfaces bound to a named render target. The SDK
/// itself is acquired through [`super::SdkLoader`]; adapters should be cheap
/// to clone behind the shared [`SdkHandle`].
pub trait MapSdk: Send + Sync {
    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;

    /// Creates a map surface bound to the given render target with the given
    /// initial viewport.
    fn create_surface(
        &self,
        target: &str,
        viewport: Viewport,
    ) -> Result<Box<dyn MapSurface>, SdkLoadError>;
}

impl std::fmt::Debug for dyn MapSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSdk").field("name", &self.name()).finish()
    }
}

/// A live map surface: the capability interface the synchronization core
/// drives.
///
/// All calls are fire-and-forget from the core's point of view; camera
/// animation and popup rendering are delegated to the provider. Dropping the
/// surface destroys it along with every marker and overlay it owns.
pub trait MapSurface: Send {
    /// Creates a marker at a fixed position. Position is immutable for the
    /// marker's lifetime.
    fn add_marker(
        &mut self,
        key: PlaceKey,
        position: LatLng,
        appearance: MarkerAppearance,
    ) -> Result<MarkerHandle, MarkerCreationError>;

    /// Removes a marker. Any open popup on it is closed first.
    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Swaps a marker's icon without recreating it.
    fn set_marker_appearance(&mut self, marker: MarkerHandle, appearance: MarkerAppearance);

    /// Opens an info popup anchored to a marker.
    fn open_popup(&mut self, marker: MarkerHandle, content: PopupContent);

    /// Closes a marker's popup. No-op if none is open.
    fn close_popup(&mut self, marker: MarkerHandle);

    /// Animates the camera to a new viewport over a bounded duration.
    fn fly_to(&mut self, viewport: Viewport, duration: Duration);

    /// Attaches a supplementary overlay above the base layer.
    fn attach_overlay(&mut self, overlay: &OverlaySpec) -> Result<OverlayHandle, LayerAttachError>;

    /// Detaches a previously attached overlay.
    fn detach_overlay(&mut self, overlay: OverlayHandle);

    /// Registers the marker click callback. Replaces any previous handler.
    fn set_click_handler(&mut self, handler: ClickHandler);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_accepts_china_range() {
        let pos = LatLng::validated(34.26, 108.94).unwrap();
        assert_eq!(pos, LatLng::new(34.26, 108.94));
    }

    #[test]
    fn test_validated_rejects_non_finite() {
        assert!(LatLng::validated(f64::NAN, 108.94).is_err());
        assert!(LatLng::validated(34.26, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validated_rejects_out_of_range() {
        assert!(LatLng::validated(91.0, 0.0).is_err());
        assert!(LatLng::validated(0.0, -181.0).is_err());
        assert!(LatLng::validated(90.0, 180.0).is_ok());
    }

    #[test]
    fn test_popup_content_renders_all_fields() {
        let result = PlaceResult {
            ancient_name: "长安".to_string(),
            modern_name: "西安市".to_string(),
            province: "陕西省".to_string(),
            latitude: 34.26,
            longitude: 108.94,
            description: "十三朝古都".to_string(),
            dynasty_info: "周秦汉唐".to_string(),
        };
        let content = PopupContent::from(&result);
        assert_eq!(content.title, "长安 → 西安市");
        assert!(content.subtitle.contains("陕西省"));
        assert!(content.subtitle.contains("34.2600"));
        assert_eq!(content.description, "十三朝古都");
        assert_eq!(content.dynasty_info, "周秦汉唐");
    }

    #[test]
    fn test_sdk_load_error_display() {
        let err = SdkLoadError::Fetch("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
