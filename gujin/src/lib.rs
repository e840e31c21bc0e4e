//! Gujin - Ancient Chinese place name lookup with synchronized map rendering
//!
//! This library resolves ancient Chinese place names to their modern-day
//! locations and keeps an interactive map in sync with the resolved results:
//! one marker per result, one active (focused) result at a time, and
//! switchable base-layer visual modes.
//!
//! # High-Level API
//!
//! The [`map`] module provides the synchronization component:
//!
//! ```ignore
//! use std::sync::Arc;
//! use gujin::config::MapSettings;
//! use gujin::map::MapView;
//! use gujin::sdk::{HeadlessSdk, SdkLoader};
//!
//! let sdk = Arc::new(HeadlessSdk::new());
//! let loader = Arc::new(SdkLoader::ready(sdk));
//! let view = MapView::new(loader, MapSettings::default());
//!
//! view.mount("main-map").await?;
//! view.set_results(results).await;
//! ```

pub mod config;
pub mod logging;
pub mod map;
pub mod place;
pub mod resolver;
pub mod sdk;

/// Version of the gujin library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
