//! Place result data model
//!
//! A [`PlaceResult`] is one resolved ancient-to-modern place mapping, produced
//! by the resolution backend and immutable once constructed. Two results are
//! the same place if and only if both their ancient and modern names match;
//! coordinates are deliberately excluded from identity because the backend may
//! jitter them between resolutions of the same place.

mod session;

pub use session::SearchSession;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One resolved place: an ancient name mapped to a modern location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// The ancient place name as queried (e.g. "长安").
    pub ancient_name: String,
    /// The modern city or region name (e.g. "西安市").
    pub modern_name: String,
    /// Province of the modern location.
    pub province: String,
    /// Latitude in decimal degrees (WGS84).
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS84).
    pub longitude: f64,
    /// Historical-geographic description.
    pub description: String,
    /// Related dynasty information.
    pub dynasty_info: String,
}

impl PlaceResult {
    /// Returns the identity key for this result.
    pub fn key(&self) -> PlaceKey {
        PlaceKey {
            ancient_name: self.ancient_name.clone(),
            modern_name: self.modern_name.clone(),
        }
    }

    /// Checks whether this result has the given identity.
    pub fn is(&self, key: &PlaceKey) -> bool {
        self.ancient_name == key.ancient_name && self.modern_name == key.modern_name
    }
}

/// Identity key for a place result: the `(ancient_name, modern_name)` pair.
///
/// Used wherever two independently-held views of the result list (sidebar
/// list, marker set, active selection) must agree on which result is which,
/// so list rebuilds never break the relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceKey {
    pub ancient_name: String,
    pub modern_name: String,
}

impl PlaceKey {
    pub fn new(ancient_name: impl Into<String>, modern_name: impl Into<String>) -> Self {
        Self {
            ancient_name: ancient_name.into(),
            modern_name: modern_name.into(),
        }
    }
}

impl fmt::Display for PlaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.ancient_name, self.modern_name)
    }
}
