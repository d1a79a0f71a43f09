//! # rasterkit
//!
//! Scanline rasterization of 2D primitives onto in-memory pixel surfaces.
//!
//! Lines, circles, Bezier curves and polygons are converted into individual
//! pixel writes on any surface implementing [`framebuffer::PixelSink`].
//! Polygon fills can be shaded with a constant color or with a sequential or
//! directional gradient.
//!
//! ## Features
//!
//! - **Lines**: DDA, midpoint and Bresenham
//! - **Circles**: midpoint and Bresenham, outline or filled
//! - **Curves**: adaptive Bezier flattening of any degree
//! - **Polygons**: active edge table fill with odd, positive and non-zero winding
//! - **Gradients**: per-channel sequential ramps and projection-based directional shading
//! - **Shapes**: parametric ellipses, polar roses, spirals and arcs
//!
//! ## Quick Start
//!
//! ```rust
//! use rasterkit::prelude::*;
//!
//! let mut fb = Framebuffer::new(64, 64)?;
//! let square = [
//!     Point::new(8, 8),
//!     Point::new(8, 40),
//!     Point::new(40, 40),
//!     Point::new(40, 8),
//! ];
//!
//! let mut fill = RgbGradient::angle(Rgba::RED, Rgba::BLUE, 45.0);
//! draw_polygon(&mut fb, &square, Some(Rgba::WHITE), Some(&mut fill), WindingRule::Odd);
//! draw_line(&mut fb, Point::new(0, 63), Point::new(63, 0), Rgba::GREEN, LineAlgorithm::Bresenham);
//!
//! assert_eq!(fb.get_pixel(8, 20), Some(Rgba::WHITE));
//! # Ok::<(), rasterkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/Deserialize for [`config::RasterConfig`], the
//!   algorithm enums and the color types
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://crates.io/crates/log) facade.
//! Recoverable misuse such as a non-positive radius is reported at `warn`;
//! fill and flattening summaries at `debug`. Install any logger to see them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color space conversions.
pub mod color;

/// Pixel sinks and in-memory framebuffers.
pub mod framebuffer;

/// Geometric primitives (points, segments, bounds).
pub mod geometry;

/// Engine-wide drawing defaults.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization algorithms.
pub mod render;

/// Solid and gradient color sources.
pub mod gradient;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for rasterkit operations.
pub mod error;

pub use error::{Error, Result};

/// Design-by-contract checks shared by the rasterizers.
pub mod verification_specs;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use rasterkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Gray, Hsia, Hsla, Hsva, Rgba};
    pub use crate::config::RasterConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::{Framebuffer, GrayFramebuffer, PixelSink};
    pub use crate::geometry::{Point, Segment};
    pub use crate::gradient::{ColorSource, Gradient, GradientOptions, RgbGradient, Solid};
    pub use crate::render::{
        draw_circle, draw_curve, draw_line, draw_polygon, fill_polygon, BezierCurve, Circle,
        CircleAlgorithm, Drawable, LineAlgorithm, Polygon, WindingRule,
    };
}
