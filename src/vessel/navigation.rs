//! Depth-based navigation warnings.

use serde::{Deserialize, Serialize};

use super::profile::VesselProfile;

/// Depth below `SHALLOW_WARNING_FACTOR * required_clearance` counts as
/// shallow.
pub const SHALLOW_WARNING_FACTOR: f32 = 1.5;

/// How safe the water under a vessel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationStatus {
    /// Comfortably deep.
    Clear,
    /// Navigable, but within the warning band above the required clearance.
    Shallow,
    /// Shallower than the required clearance.
    Beached,
}

impl NavigationStatus {
    /// Message to show the player, if any.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            NavigationStatus::Clear => None,
            NavigationStatus::Shallow => Some("SHALLOW WATER - Proceed with caution!"),
            NavigationStatus::Beached => Some("BEACHED - Move to deeper water!"),
        }
    }
}

/// Classifies a water depth for a vessel.
pub fn assess_navigation(depth: f32, profile: &VesselProfile) -> NavigationStatus {
    let required = profile.required_clearance();
    if depth < required {
        NavigationStatus::Beached
    } else if depth < required * SHALLOW_WARNING_FACTOR {
        NavigationStatus::Shallow
    } else {
        NavigationStatus::Clear
    }
}
