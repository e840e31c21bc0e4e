//! Map synchronization core
//!
//! Keeps an interactive map in sync with two pieces of host-owned state: an
//! ordered list of resolved places and an active-result selection. The core
//! owns the map surface, the marker set, and the attached overlays; the host
//! owns everything else.
//!
//! # Update model
//!
//! [`MapView`] is the composed component. Until the SDK resolves and the
//! surface exists, every input is buffered and re-applied once readiness
//! arrives; after that, each input change is applied synchronously under one
//! lock, so reconciliation never interleaves with itself:
//!
//! - result list change → [`MarkerReconciler`] structural diff
//! - active selection change → appearance recompute + [`ActiveFocusController`]
//! - layer mode change → [`LayerSwitcher`] detach-then-attach transition
//!
//! Teardown cancels every pending continuation; a cancelled continuation
//! performs no further surface mutation.

mod focus;
mod layers;
mod reconciler;
mod view;

pub use focus::ActiveFocusController;
pub use layers::{LayerMode, LayerSwitcher, ROAD_NETWORK, SATELLITE_IMAGERY, TERRAIN_RELIEF};
pub use reconciler::MarkerReconciler;
pub use view::MapView;
