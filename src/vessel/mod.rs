//! Vessel classes and depth-clearance rules.

mod catalog;
mod navigation;
mod profile;

pub use catalog::VesselCatalog;
pub use navigation::{NavigationStatus, assess_navigation, SHALLOW_WARNING_FACTOR};
pub use profile::{VesselProfile, DEFAULT_SAFETY_MARGIN};
