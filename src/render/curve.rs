//! Bezier curve flattening.
//!
//! A curve is subdivided with de Casteljau's construction until every piece
//! is "straight enough" (its control polygon is barely longer than the chord
//! between its endpoints), then each piece's control polygon is drawn with the
//! line rasterizer.

use log::debug;

use super::line::{draw_line, LineAlgorithm};
use super::Drawable;
use crate::config::{
    validate_curve_params, RasterConfig, DEFAULT_CURVE_SPLIT, DEFAULT_CURVE_TOLERANCE,
    MAX_SUBDIVISION_DEPTH,
};
use crate::error::{Error, Result};
use crate::framebuffer::PixelSink;
use crate::geometry::{Point, PointF};

/// A Bezier curve with exactly `N` control points.
///
/// `N` counts control points, so `BezierCurve<4>` is a cubic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BezierCurve<const N: usize> {
    points: [Point; N],
}

impl<const N: usize> BezierCurve<N> {
    /// Build a curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `points.len() != N` or `N < 2`.
    pub fn new(points: &[Point]) -> Result<Self> {
        if points.len() != N {
            return Err(Error::InvalidArgument(format!(
                "number of control points ({}) does not match expected count ({N})",
                points.len()
            )));
        }
        let mut array = [Point::ORIGIN; N];
        array.copy_from_slice(points);
        Self::from_array(array)
    }

    /// Build a curve from a control point array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `N < 2`.
    pub fn from_array(points: [Point; N]) -> Result<Self> {
        if N < 2 {
            return Err(Error::InvalidArgument(format!(
                "a curve needs at least 2 control points, got {N}"
            )));
        }
        Ok(Self { points })
    }

    /// Control points in order.
    #[must_use]
    pub const fn points(&self) -> &[Point; N] {
        &self.points
    }

    /// First control point.
    #[must_use]
    pub const fn first(&self) -> Point {
        self.points[0]
    }

    /// Last control point.
    #[must_use]
    pub const fn last(&self) -> Point {
        self.points[N - 1]
    }

    /// Whether the control polygon length divided by the endpoint distance is
    /// below `tolerance`.
    ///
    /// A curve whose endpoints coincide is straight only if all its control
    /// points coincide.
    #[must_use]
    pub fn is_straight(&self, tolerance: f32) -> bool {
        let polygon: f32 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        let chord = self.first().distance(self.last());

        if chord == 0.0 {
            return polygon == 0.0;
        }
        polygon / chord < tolerance
    }

    /// Split at parameter `t` into two curves covering `[0, t]` and `[t, 1]`.
    ///
    /// Intermediate points are computed in floating point and rounded onto the
    /// pixel grid.
    #[must_use]
    pub fn split(&self, t: f32) -> (Self, Self) {
        let mut level = self.points.map(PointF::from);
        let mut first = [Point::ORIGIN; N];
        let mut second = [Point::ORIGIN; N];

        first[0] = self.first();
        second[N - 1] = self.last();

        for k in 1..N {
            for i in 0..N - k {
                level[i] = level[i].lerp(level[i + 1], t);
            }
            first[k] = level[0].round();
            second[N - 1 - k] = level[N - 1 - k].round();
        }

        (Self { points: first }, Self { points: second })
    }
}

impl<const N: usize> TryFrom<&[Point]> for BezierCurve<N> {
    type Error = Error;

    fn try_from(points: &[Point]) -> Result<Self> {
        Self::new(points)
    }
}

impl<const N: usize> TryFrom<Vec<Point>> for BezierCurve<N> {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::new(&points)
    }
}

/// Subdivide `curve` until every piece is straight under `tolerance`.
///
/// Pieces are returned in curve order; consecutive pieces share an endpoint.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `t` is outside (0, 1) or `tolerance`
/// is not a finite value greater than 1.
pub fn flatten<const N: usize>(
    curve: &BezierCurve<N>,
    t: f32,
    tolerance: f32,
) -> Result<Vec<BezierCurve<N>>> {
    validate_curve_params(t, tolerance)?;
    Ok(subdivide(curve, t, tolerance, MAX_SUBDIVISION_DEPTH))
}

pub(crate) fn subdivide<const N: usize>(
    curve: &BezierCurve<N>,
    t: f32,
    tolerance: f32,
    max_depth: u32,
) -> Vec<BezierCurve<N>> {
    let mut pieces = vec![(*curve, 0u32)];
    let mut i = 0;

    // A split piece stays at index i so both halves are tested before moving on.
    while i < pieces.len() {
        let (piece, depth) = pieces[i];
        if depth < max_depth && !piece.is_straight(tolerance) {
            let (head, tail) = piece.split(t);
            pieces[i] = (head, depth + 1);
            pieces.insert(i + 1, (tail, depth + 1));
        } else {
            i += 1;
        }
    }

    debug!("flattened {N}-point curve into {} pieces", pieces.len());
    pieces.into_iter().map(|(piece, _)| piece).collect()
}

/// Flatten and draw a curve with the Bresenham line rasterizer.
///
/// # Errors
///
/// Same conditions as [`flatten`]. Nothing is drawn on error.
pub fn draw_curve<P: PixelSink + ?Sized, const N: usize>(
    sink: &mut P,
    curve: &BezierCurve<N>,
    color: P::Color,
    t: f32,
    tolerance: f32,
) -> Result<()> {
    let pieces = flatten(curve, t, tolerance)?;
    draw_pieces(sink, &pieces, color, LineAlgorithm::Bresenham);
    Ok(())
}

/// Flatten and draw a curve using the split, tolerance, depth cap and line
/// algorithm from `config`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `config` fails validation.
pub fn draw_curve_with<P: PixelSink + ?Sized, const N: usize>(
    sink: &mut P,
    curve: &BezierCurve<N>,
    color: P::Color,
    config: &RasterConfig,
) -> Result<()> {
    config.validate()?;
    let pieces = subdivide(
        curve,
        config.curve_split,
        config.curve_tolerance,
        config.max_subdivision_depth,
    );
    draw_pieces(sink, &pieces, color, config.line_algorithm);
    Ok(())
}

pub(crate) fn draw_pieces<P: PixelSink + ?Sized, const N: usize>(
    sink: &mut P,
    pieces: &[BezierCurve<N>],
    color: P::Color,
    algorithm: LineAlgorithm,
) {
    for piece in pieces {
        for w in piece.points().windows(2) {
            draw_line(sink, w[0], w[1], color, algorithm);
        }
    }
}

impl<P: PixelSink + ?Sized, const N: usize> Drawable<P> for BezierCurve<N> {
    fn draw(&self, sink: &mut P, color: P::Color) {
        let pieces = subdivide(self, DEFAULT_CURVE_SPLIT, DEFAULT_CURVE_TOLERANCE, MAX_SUBDIVISION_DEPTH);
        draw_pieces(sink, &pieces, color, LineAlgorithm::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Gray;
    use crate::framebuffer::GrayFramebuffer;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_wrong_point_count_is_invalid_argument() {
        let err = BezierCurve::<4>::new(&[p(0, 0), p(1, 1), p(2, 2)]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("(3)"));

        let from_vec: Result<BezierCurve<3>> = vec![p(0, 0); 5].try_into();
        assert!(from_vec.is_err());
    }

    #[test]
    fn test_single_point_curve_rejected() {
        assert!(BezierCurve::<1>::new(&[p(0, 0)]).is_err());
        assert!(BezierCurve::<0>::from_array([]).is_err());
    }

    #[test]
    fn test_split_quadratic_midpoint() {
        let curve = BezierCurve::<3>::new(&[p(0, 0), p(10, 20), p(20, 0)]).unwrap();
        let (head, tail) = curve.split(0.5);
        assert_eq!(head.points(), &[p(0, 0), p(5, 10), p(10, 10)]);
        assert_eq!(tail.points(), &[p(10, 10), p(15, 10), p(20, 0)]);
    }

    #[test]
    fn test_colinear_curve_is_not_subdivided() {
        let curve = BezierCurve::<4>::new(&[p(0, 0), p(10, 0), p(20, 0), p(30, 0)]).unwrap();
        let pieces = flatten(&curve, DEFAULT_CURVE_SPLIT, DEFAULT_CURVE_TOLERANCE).unwrap();
        assert!(pieces.len() <= 2);

        let mut img = GrayFramebuffer::new(40, 4).unwrap();
        draw_curve(&mut img, &curve, Gray::WHITE, 0.5, 1.05).unwrap();
        assert_eq!(img.count_pixels(Gray::WHITE), 31);
        for x in 0..=30 {
            assert_eq!(img.get_pixel(x, 0), Some(Gray::WHITE));
        }
    }

    #[test]
    fn test_cubic_pieces_are_connected() {
        let curve =
            BezierCurve::<4>::new(&[p(64, 192), p(128, 64), p(192, 64), p(192, 192)]).unwrap();
        let pieces = flatten(&curve, 0.5, 1.05).unwrap();

        assert!(pieces.len() > 1);
        assert_eq!(pieces[0].first(), p(64, 192));
        assert_eq!(pieces[pieces.len() - 1].last(), p(192, 192));
        for w in pieces.windows(2) {
            assert_eq!(w[0].last(), w[1].first());
        }
    }

    #[test]
    fn test_draw_cubic_touches_endpoints() {
        let curve =
            BezierCurve::<4>::new(&[p(64, 192), p(128, 64), p(192, 64), p(192, 192)]).unwrap();
        let mut img = GrayFramebuffer::new(256, 256).unwrap();
        draw_curve(&mut img, &curve, Gray::WHITE, 0.5, 1.05).unwrap();

        assert_eq!(img.get_pixel(64, 192), Some(Gray::WHITE));
        assert_eq!(img.get_pixel(192, 192), Some(Gray::WHITE));
        // Control points pull the curve well above its endpoints.
        assert_eq!(img.get_pixel(128, 64), Some(Gray::BLACK));
        assert!(img.count_pixels(Gray::WHITE) > 150);
    }

    #[test]
    fn test_closed_curve_terminates() {
        let curve = BezierCurve::<4>::new(&[p(10, 10), p(40, 10), p(40, 40), p(10, 10)]).unwrap();
        let pieces = flatten(&curve, 0.5, 1.05).unwrap();
        assert!(pieces.len() > 1);
        assert!(pieces.len() <= 1 << MAX_SUBDIVISION_DEPTH);
    }

    #[test]
    fn test_point_curve_draws_one_pixel() {
        let curve = BezierCurve::<3>::new(&[p(5, 5), p(5, 5), p(5, 5)]).unwrap();
        let pieces = flatten(&curve, 0.5, 1.05).unwrap();
        assert_eq!(pieces.len(), 1);

        let mut img = GrayFramebuffer::new(10, 10).unwrap();
        draw_curve(&mut img, &curve, Gray::WHITE, 0.5, 1.05).unwrap();
        assert_eq!(img.count_pixels(Gray::WHITE), 1);
    }

    #[test]
    fn test_invalid_parameters_draw_nothing() {
        let curve = BezierCurve::<3>::new(&[p(0, 0), p(5, 9), p(9, 0)]).unwrap();
        let mut img = GrayFramebuffer::new(10, 10).unwrap();

        assert!(draw_curve(&mut img, &curve, Gray::WHITE, 0.0, 1.05).is_err());
        assert!(draw_curve(&mut img, &curve, Gray::WHITE, 1.5, 1.05).is_err());
        assert!(draw_curve(&mut img, &curve, Gray::WHITE, 0.5, 0.9).is_err());
        assert!(draw_curve(&mut img, &curve, Gray::WHITE, 0.5, 1.0).is_err());
        assert_eq!(img.count_pixels(Gray::WHITE), 0);
    }

    #[test]
    fn test_depth_cap_from_config() {
        let curve = BezierCurve::<4>::new(&[p(0, 0), p(0, 100), p(100, 100), p(100, 0)]).unwrap();
        let config = RasterConfig::new()
            .with_max_subdivision_depth(2)
            .with_curve_tolerance(1.0001);
        let pieces = subdivide(&curve, config.curve_split, config.curve_tolerance, 2);
        assert!(pieces.len() <= 4);

        let mut img = GrayFramebuffer::new(128, 128).unwrap();
        draw_curve_with(&mut img, &curve, Gray::WHITE, &config).unwrap();
        assert_eq!(img.get_pixel(0, 0), Some(Gray::WHITE));
        assert_eq!(img.get_pixel(100, 0), Some(Gray::WHITE));
    }
}
