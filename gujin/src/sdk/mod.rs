//! Mapping SDK abstraction
//!
//! The map synchronization core is written against a provider-agnostic
//! capability interface rather than any concrete mapping library. A provider
//! is an adapter implementing [`MapSdk`] (creates surfaces) and [`MapSurface`]
//! (markers, popups, camera, overlays); swapping providers never touches the
//! reconciliation logic.
//!
//! [`SdkLoader`] performs the one-time asynchronous acquisition of the SDK
//! and memoizes the outcome so every caller shares a single initialization.
//! [`HeadlessSdk`] is the in-process adapter used by the CLI and the tests.

mod headless;
mod loader;
mod types;

pub use headless::{HeadlessSdk, SurfaceEvent, SurfaceRecorder};
#[cfg(test)]
pub(crate) use headless::tests::FaultySurface;
pub use loader::SdkLoader;
pub use types::{
    ClickHandler, LatLng, LayerAttachError, MapSdk, MapSurface, MarkerAppearance,
    MarkerCreationError, MarkerHandle, OverlayHandle, OverlaySpec, PopupContent, SdkHandle,
    SdkLoadError, Viewport,
};
