//! Circle rasterization with 8-way octant symmetry.
//!
//! Both algorithms walk the second octant (`0 <= y <= x`) starting at
//! `(radius, 0)` and mirror each offset into the other seven octants. They
//! make the same decision at every step, so they produce identical pixels;
//! only the bookkeeping differs.

use log::warn;

use super::line::draw_hline;
use super::Drawable;
use crate::config::RasterConfig;
use crate::framebuffer::{plot, PixelSink};
use crate::geometry::Point;

/// Circle rasterization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CircleAlgorithm {
    /// Compares the absolute radius error of the two candidate pixels.
    Midpoint,
    /// Integer decision variable `d = 3 - 2r`.
    #[default]
    Bresenham,
}

/// A circle by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    /// Center pixel.
    pub center: Point,
    /// Radius in pixels.
    pub radius: i32,
}

impl Circle {
    /// Create a new circle.
    #[must_use]
    pub const fn new(center: Point, radius: i32) -> Self {
        Self { center, radius }
    }
}

/// Draw a circle outline, optionally filling its interior.
///
/// A non-positive radius is reported through the log and draws nothing.
pub fn draw_circle<P: PixelSink + ?Sized>(
    sink: &mut P,
    center: Point,
    radius: i32,
    color: P::Color,
    fill: bool,
    algorithm: CircleAlgorithm,
) {
    if radius <= 0 {
        warn!("circle radius must be positive, got {radius}; skipping draw");
        return;
    }

    for (x, y) in octant_offsets(radius, algorithm) {
        plot_octants(sink, center, x, y, fill, color);
    }
}

/// [`draw_circle`] with the algorithm taken from `config`.
pub fn draw_circle_with<P: PixelSink + ?Sized>(
    sink: &mut P,
    center: Point,
    radius: i32,
    color: P::Color,
    fill: bool,
    config: &RasterConfig,
) {
    draw_circle(sink, center, radius, color, fill, config.circle_algorithm);
}

/// Offsets `(x, y)` with `y <= x` of the second octant, in walk order.
///
/// Empty for a non-positive radius.
#[must_use]
pub fn octant_offsets(radius: i32, algorithm: CircleAlgorithm) -> Vec<(i32, i32)> {
    if radius <= 0 {
        return Vec::new();
    }
    match algorithm {
        CircleAlgorithm::Midpoint => midpoint_offsets(radius),
        CircleAlgorithm::Bresenham => bresenham_offsets(radius),
    }
}

fn midpoint_offsets(radius: i32) -> Vec<(i32, i32)> {
    let r2 = i64::from(radius) * i64::from(radius);
    let err = |x: i32, y: i32| (r2 - i64::from(x) * i64::from(x) - i64::from(y) * i64::from(y)).abs();

    let mut offsets = Vec::new();
    let mut x = radius;
    let mut y = 0;

    while y <= x {
        offsets.push((x, y));

        y += 1;
        if err(x, y) > err(x - 1, y) {
            x -= 1;
        }
    }

    offsets
}

fn bresenham_offsets(radius: i32) -> Vec<(i32, i32)> {
    let mut offsets = Vec::new();
    let mut x = radius;
    let mut y = 0;
    let mut d = 3 - 2 * i64::from(radius);

    while y <= x {
        offsets.push((x, y));

        if d <= 0 {
            d += 4 * i64::from(y) + 6;
        } else {
            d += 4 * (i64::from(y) - i64::from(x)) + 10;
            x -= 1;
        }
        y += 1;
    }

    offsets
}

/// Plot the eight reflections of `(x, y)` and, when filling, the four rows
/// they span.
fn plot_octants<P: PixelSink + ?Sized>(
    sink: &mut P,
    c: Point,
    x: i32,
    y: i32,
    fill: bool,
    color: P::Color,
) {
    plot(sink, c.x + x, c.y + y, color);
    plot(sink, c.x - x, c.y + y, color);
    plot(sink, c.x + x, c.y - y, color);
    plot(sink, c.x - x, c.y - y, color);
    plot(sink, c.x + y, c.y + x, color);
    plot(sink, c.x - y, c.y + x, color);
    plot(sink, c.x + y, c.y - x, color);
    plot(sink, c.x - y, c.y - x, color);

    if fill {
        draw_hline(sink, c.x - x, c.x + x, c.y + y, color);
        draw_hline(sink, c.x - x, c.x + x, c.y - y, color);
        draw_hline(sink, c.x - y, c.x + y, c.y + x, color);
        draw_hline(sink, c.x - y, c.x + y, c.y - x, color);
    }
}

impl<P: PixelSink + ?Sized> Drawable<P> for Circle {
    fn draw(&self, sink: &mut P, color: P::Color) {
        draw_circle(sink, self.center, self.radius, color, false, CircleAlgorithm::default());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Gray, Rgba};
    use crate::framebuffer::{Framebuffer, GrayFramebuffer};

    #[test]
    fn test_draw_circle_filled() {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);

        draw_circle(&mut fb, Point::new(50, 50), 20, Rgba::BLUE, true, CircleAlgorithm::Bresenham);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(60, 60), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(65, 65), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_circle_outline() {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);

        draw_circle(&mut fb, Point::new(50, 50), 20, Rgba::GREEN, false, CircleAlgorithm::Midpoint);

        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(30, 50), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(50, 70), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(50, 30), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_non_positive_radius_is_noop() {
        let mut img = GrayFramebuffer::new(20, 20).expect("image creation should succeed");
        for radius in [0, -3] {
            draw_circle(&mut img, Point::new(10, 10), radius, Gray::WHITE, true, CircleAlgorithm::Bresenham);
        }
        assert_eq!(img.count_pixels(Gray::WHITE), 0);
        assert!(octant_offsets(0, CircleAlgorithm::Midpoint).is_empty());
    }

    #[test]
    fn test_radius_one() {
        let mut img = GrayFramebuffer::new(5, 5).expect("image creation should succeed");
        draw_circle(&mut img, Point::new(2, 2), 1, Gray::WHITE, false, CircleAlgorithm::Bresenham);
        assert_eq!(img.count_pixels(Gray::WHITE), 4);
        assert_eq!(img.get_pixel(2, 2), Some(Gray::BLACK));
    }

    #[test]
    fn test_algorithms_walk_identical_offsets() {
        for radius in 1..=200 {
            assert_eq!(
                octant_offsets(radius, CircleAlgorithm::Midpoint),
                octant_offsets(radius, CircleAlgorithm::Bresenham),
                "radius {radius}"
            );
        }
    }

    #[test]
    fn test_offsets_stay_in_octant() {
        let offsets = octant_offsets(37, CircleAlgorithm::Bresenham);
        assert_eq!(offsets.first(), Some(&(37, 0)));
        assert!(offsets.iter().all(|&(x, y)| y <= x));
        assert!(offsets.windows(2).all(|w| w[1].1 == w[0].1 + 1));
    }

    #[test]
    fn test_circle_clipped_at_edges() {
        let mut fb = Framebuffer::new(10, 10).expect("framebuffer creation should succeed");
        draw_circle(&mut fb, Point::new(0, 0), 30, Rgba::RED, true, CircleAlgorithm::Midpoint);
        assert_eq!(fb.count_pixels(Rgba::RED), 100);
    }

    #[test]
    fn test_draw_circle_with_config() {
        let config = RasterConfig::new().with_circle_algorithm(CircleAlgorithm::Midpoint);
        let mut via_config = GrayFramebuffer::new(40, 40).expect("image creation should succeed");
        let mut direct = via_config.clone();

        draw_circle_with(&mut via_config, Point::new(20, 20), 9, Gray::WHITE, true, &config);
        draw_circle(&mut direct, Point::new(20, 20), 9, Gray::WHITE, true, CircleAlgorithm::Midpoint);
        assert_eq!(via_config.pixels(), direct.pixels());
        assert_eq!(via_config.get_pixel(20, 20), Some(Gray::WHITE));

        let mut none = GrayFramebuffer::new(8, 8).expect("image creation should succeed");
        draw_circle_with(&mut none, Point::new(4, 4), 0, Gray::WHITE, false, &config);
        assert_eq!(none.count_pixels(Gray::WHITE), 0);
    }
}
