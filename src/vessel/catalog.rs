//! Built-in vessel classes.

use super::profile::VesselProfile;

/// A named list of vessel classes.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselCatalog {
    vessels: Vec<VesselProfile>,
}

impl Default for VesselCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl VesselCatalog {
    /// Wraps an arbitrary list of profiles.
    pub fn new(vessels: Vec<VesselProfile>) -> Self {
        Self { vessels }
    }

    /// Sailboat, motorboat, cargo ship and submarine.
    pub fn standard() -> Self {
        let vessels = [
            ("Sailboat", 1.5, 2.0),
            ("Motorboat", 0.8, 1.5),
            ("Cargo Ship", 12.0, 3.0),
            ("Submarine", 8.0, 2.0),
        ]
        .into_iter()
        .filter_map(|(name, draft, margin)| VesselProfile::new(name, draft, margin).ok())
        .collect();
        Self { vessels }
    }

    /// Looks a class up by exact name.
    pub fn by_name(&self, name: &str) -> Option<&VesselProfile> {
        self.vessels.iter().find(|v| v.name() == name)
    }

    /// Looks a class up by position.
    pub fn by_index(&self, index: usize) -> Option<&VesselProfile> {
        self.vessels.get(index)
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VesselProfile> {
        self.vessels.iter()
    }

    /// Names of all classes, in order.
    pub fn names(&self) -> Vec<&str> {
        self.vessels.iter().map(|v| v.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = VesselCatalog::standard();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.names(), vec!["Sailboat", "Motorboat", "Cargo Ship", "Submarine"]);
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = VesselCatalog::default();
        let cargo = catalog.by_name("Cargo Ship").unwrap();
        assert_eq!(cargo.required_clearance(), 15.0);
        assert!(catalog.by_name("cargo ship").is_none());
        assert!(catalog.by_name("Yacht").is_none());
    }

    #[test]
    fn test_lookup_by_index() {
        let catalog = VesselCatalog::standard();
        assert_eq!(catalog.by_index(1).map(|v| v.name()), Some("Motorboat"));
        assert!(catalog.by_index(4).is_none());
    }
}
