//! Static description of a boat class.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_non_negative};

/// Safety margin used when none is given.
pub const DEFAULT_SAFETY_MARGIN: f32 = 2.0;

/// Draft and safety margin of a boat class.
///
/// Immutable once built. Controllers share one profile through an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVesselProfile")]
pub struct VesselProfile {
    name: String,
    draft: f32,
    safety_margin: f32,
}

/// Unvalidated serde form of [`VesselProfile`].
#[derive(Deserialize)]
struct RawVesselProfile {
    name: String,
    draft: f32,
    #[serde(default = "default_safety_margin")]
    safety_margin: f32,
}

fn default_safety_margin() -> f32 {
    DEFAULT_SAFETY_MARGIN
}

impl TryFrom<RawVesselProfile> for VesselProfile {
    type Error = ConfigError;

    fn try_from(raw: RawVesselProfile) -> Result<Self, Self::Error> {
        VesselProfile::new(raw.name, raw.draft, raw.safety_margin)
    }
}

impl VesselProfile {
    /// Creates a profile.
    ///
    /// # Errors
    /// `ConfigError` if `draft` or `safety_margin` is negative or not finite.
    pub fn new(name: impl Into<String>, draft: f32, safety_margin: f32) -> Result<Self, ConfigError> {
        ensure_non_negative("draft", draft)?;
        ensure_non_negative("safety_margin", safety_margin)?;
        Ok(Self {
            name: name.into(),
            draft,
            safety_margin,
        })
    }

    /// Creates a profile with the default safety margin.
    pub fn with_draft(name: impl Into<String>, draft: f32) -> Result<Self, ConfigError> {
        Self::new(name, draft, DEFAULT_SAFETY_MARGIN)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// How deep the hull sits in the water.
    pub fn draft(&self) -> f32 {
        self.draft
    }

    /// Extra clearance kept below the keel.
    pub fn safety_margin(&self) -> f32 {
        self.safety_margin
    }

    /// Minimum water depth the vessel needs: `draft + safety_margin`.
    pub fn required_clearance(&self) -> f32 {
        self.draft + self.safety_margin
    }
}
