//! Application configuration.
//!
//! Pure data types with documented defaults; no parsing logic. The defaults
//! mirror the reference deployment: a China-overview initial viewport and a
//! local resolution backend.

use crate::sdk::LatLng;
use std::time::Duration;

/// Default map center: geographic center of China.
pub const DEFAULT_MAP_CENTER: LatLng = LatLng::new(35.86, 104.2);

/// Default zoom showing the whole country.
pub const DEFAULT_MAP_ZOOM: f64 = 5.0;

/// Zoom used when flying to a focused result.
pub const DEFAULT_FOCUS_ZOOM: f64 = 8.0;

/// Duration of the focus camera animation.
pub const DEFAULT_FOCUS_DURATION: Duration = Duration::from_millis(1500);

/// Default resolution backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default timeout for backend requests.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Map view configuration.
#[derive(Debug, Clone)]
pub struct MapSettings {
    /// Initial viewport center.
    pub default_center: LatLng,
    /// Initial viewport zoom.
    pub default_zoom: f64,
    /// Zoom the camera animates to when a result is focused.
    pub focus_zoom: f64,
    /// Bound on the focus camera animation.
    pub focus_duration: Duration,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_MAP_CENTER,
            default_zoom: DEFAULT_MAP_ZOOM,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            focus_duration: DEFAULT_FOCUS_DURATION,
        }
    }
}

/// Resolution backend configuration.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Base URL of the resolution API, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_defaults_cover_china() {
        let settings = MapSettings::default();
        assert_eq!(settings.default_center, LatLng::new(35.86, 104.2));
        assert_eq!(settings.default_zoom, 5.0);
        assert!(settings.focus_zoom > settings.default_zoom);
    }

    #[test]
    fn test_backend_defaults() {
        let settings = BackendSettings::default();
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }
}
