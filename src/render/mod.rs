//! Rasterization of geometric primitives.
//!
//! Every routine writes through a [`PixelSink`] and drops pixels that fall
//! outside the surface.
//!
//! # Algorithms
//!
//! - **Lines**: DDA, midpoint and Bresenham
//! - **Circles**: midpoint and Bresenham with 8-way symmetry
//! - **Bezier curves**: adaptive de Casteljau flattening
//! - **Polygons**: active edge table scanline fill with odd, positive and
//!   non-zero winding rules
//! - **Parametric shapes**: ellipses, roses, spirals and arcs
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Foley, J. D., et al. (1990). *Computer Graphics: Principles and Practice*, 2nd ed.

mod circle;
mod curve;
mod line;
mod polygon;
mod shapes;

use crate::framebuffer::PixelSink;

pub use circle::{draw_circle, draw_circle_with, octant_offsets, Circle, CircleAlgorithm};
pub use curve::{draw_curve, draw_curve_with, flatten, BezierCurve};
pub use line::{draw_line, LineAlgorithm};
pub use polygon::{
    draw_polygon, draw_polygon_with, fill_polygon, scan_spans, stroke_polygon, FillPlan, Polygon,
    Span, WindingRule,
};
pub use shapes::{draw_arc, draw_ellipse, draw_rose, draw_spiral};

/// A shape that can draw itself with the default algorithms.
pub trait Drawable<P: PixelSink + ?Sized> {
    /// Draw onto `sink` in `color`.
    fn draw(&self, sink: &mut P, color: P::Color);
}
