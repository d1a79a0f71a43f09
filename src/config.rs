//! Raster configuration.
//!
//! Bundles the defaults the drawing entry points fall back to. Callers that
//! need a different algorithm or flattening tolerance build a
//! [`RasterConfig`] and use the `*_with` variants of the draw functions.

use crate::error::{Error, Result};
use crate::render::{CircleAlgorithm, LineAlgorithm, WindingRule};
use crate::verification_specs::numeric_contracts;

/// Default Bezier split parameter.
pub const DEFAULT_CURVE_SPLIT: f32 = 0.5;

/// Default straightness tolerance (chord length / endpoint distance).
pub const DEFAULT_CURVE_TOLERANCE: f32 = 1.05;

/// Default cap on recursive Bezier subdivision.
pub const MAX_SUBDIVISION_DEPTH: u32 = 12;

/// Engine-wide drawing defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RasterConfig {
    /// Algorithm for segments, polygon outlines and flattened curves.
    pub line_algorithm: LineAlgorithm,
    /// Algorithm for circles.
    pub circle_algorithm: CircleAlgorithm,
    /// Inside test for polygon fills.
    pub winding_rule: WindingRule,
    /// Bezier subdivision parameter, strictly inside (0, 1).
    pub curve_split: f32,
    /// Straightness tolerance, greater than 1.0.
    pub curve_tolerance: f32,
    /// Maximum subdivision depth for a single curve.
    pub max_subdivision_depth: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            line_algorithm: LineAlgorithm::default(),
            circle_algorithm: CircleAlgorithm::default(),
            winding_rule: WindingRule::default(),
            curve_split: DEFAULT_CURVE_SPLIT,
            curve_tolerance: DEFAULT_CURVE_TOLERANCE,
            max_subdivision_depth: MAX_SUBDIVISION_DEPTH,
        }
    }
}

impl RasterConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line algorithm.
    #[must_use]
    pub fn with_line_algorithm(mut self, algorithm: LineAlgorithm) -> Self {
        self.line_algorithm = algorithm;
        self
    }

    /// Set the circle algorithm.
    #[must_use]
    pub fn with_circle_algorithm(mut self, algorithm: CircleAlgorithm) -> Self {
        self.circle_algorithm = algorithm;
        self
    }

    /// Set the polygon winding rule.
    #[must_use]
    pub fn with_winding_rule(mut self, rule: WindingRule) -> Self {
        self.winding_rule = rule;
        self
    }

    /// Set the Bezier split parameter.
    #[must_use]
    pub fn with_curve_split(mut self, t: f32) -> Self {
        self.curve_split = t;
        self
    }

    /// Set the straightness tolerance.
    #[must_use]
    pub fn with_curve_tolerance(mut self, tolerance: f32) -> Self {
        self.curve_tolerance = tolerance;
        self
    }

    /// Set the subdivision depth cap.
    #[must_use]
    pub fn with_max_subdivision_depth(mut self, depth: u32) -> Self {
        self.max_subdivision_depth = depth;
        self
    }

    /// Check the curve parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the split parameter is outside
    /// (0, 1), the tolerance is not above 1 or not finite, or the depth cap is 0.
    pub fn validate(&self) -> Result<()> {
        validate_curve_params(self.curve_split, self.curve_tolerance)?;
        if self.max_subdivision_depth == 0 {
            return Err(Error::InvalidArgument(
                "max subdivision depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check a Bezier split parameter and straightness tolerance.
pub(crate) fn validate_curve_params(t: f32, tolerance: f32) -> Result<()> {
    if !numeric_contracts::is_open_unit(t) {
        return Err(Error::InvalidArgument(format!(
            "curve split parameter must lie in (0, 1), got {t}"
        )));
    }
    if !tolerance.is_finite() || tolerance <= 1.0 {
        return Err(Error::InvalidArgument(format!(
            "curve tolerance must be a finite value greater than 1, got {tolerance}"
        )));
    }
    Ok(())
}
