//! Line rasterization.
//!
//! Three interchangeable algorithms approximate the same segment:
//!
//! - **DDA**: steps the major axis and accumulates the slope in floating point.
//! - **Midpoint**: evaluates the implicit line `a*x + b*y + c = 0` at the two
//!   candidate pixels and keeps the one closer to the true line.
//! - **Bresenham**: integer-only incremental error term.
//!
//! All three plot a single pixel for a zero-length segment and pick the
//! stepping axis by extent, so no slope is ever computed with a zero divisor.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

use super::Drawable;
use crate::framebuffer::{plot, PixelSink};
use crate::geometry::{Point, Segment};

/// Line rasterization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineAlgorithm {
    /// Digital differential analyzer.
    Dda,
    /// Implicit-line decision.
    Midpoint,
    /// Integer error accumulator.
    #[default]
    Bresenham,
}

/// Draw the segment `p1`-`p2` using `algorithm`.
///
/// Pixels outside the surface are dropped.
pub fn draw_line<P: PixelSink + ?Sized>(
    sink: &mut P,
    p1: Point,
    p2: Point,
    color: P::Color,
    algorithm: LineAlgorithm,
) {
    match algorithm {
        LineAlgorithm::Dda => draw_line_dda(sink, p1, p2, color),
        LineAlgorithm::Midpoint => draw_line_midpoint(sink, p1, p2, color),
        LineAlgorithm::Bresenham => draw_line_bresenham(sink, p1, p2, color),
    }
}

fn draw_line_dda<P: PixelSink + ?Sized>(sink: &mut P, p1: Point, p2: Point, color: P::Color) {
    let dx = i64::from(p2.x) - i64::from(p1.x);
    let dy = i64::from(p2.y) - i64::from(p1.y);

    if dx == 0 && dy == 0 {
        plot(sink, p1.x, p1.y, color);
        return;
    }

    if dx.abs() >= dy.abs() {
        let (a, b) = if p1.x <= p2.x { (p1, p2) } else { (p2, p1) };
        let m =
            (i64::from(b.y) - i64::from(a.y)) as f32 / (i64::from(b.x) - i64::from(a.x)) as f32;

        let mut y = a.y as f32;
        for x in a.x..=b.x {
            plot(sink, x, y.round() as i32, color);
            y += m;
        }
    } else {
        let (a, b) = if p1.y <= p2.y { (p1, p2) } else { (p2, p1) };
        let m_inv =
            (i64::from(b.x) - i64::from(a.x)) as f32 / (i64::from(b.y) - i64::from(a.y)) as f32;

        let mut x = a.x as f32;
        for y in a.y..=b.y {
            plot(sink, x.round() as i32, y, color);
            x += m_inv;
        }
    }
}

/// Slope regime of a segment, selecting the major axis and minor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Regime {
    /// Slope in [0, 1].
    Gentle,
    /// Slope > 1.
    Steep,
    /// Slope in [-1, 0).
    GentleFalling,
    /// Slope < -1.
    SteepFalling,
}

impl Regime {
    fn of(dx: i64, dy: i64) -> Self {
        let falling = dx != 0 && dy != 0 && (dx > 0) != (dy > 0);
        match (dx.abs() >= dy.abs(), falling) {
            (true, false) => Self::Gentle,
            (false, false) => Self::Steep,
            (true, true) => Self::GentleFalling,
            (false, true) => Self::SteepFalling,
        }
    }
}

fn draw_line_midpoint<P: PixelSink + ?Sized>(sink: &mut P, p1: Point, p2: Point, color: P::Color) {
    let a = i128::from(p1.y) - i128::from(p2.y);
    let b = i128::from(p2.x) - i128::from(p1.x);
    let c = i128::from(p1.x) * i128::from(p2.y) - i128::from(p2.x) * i128::from(p1.y);
    let distance = |x: i64, y: i64| (a * i128::from(x) + b * i128::from(y) + c).abs();

    let regime = Regime::of(
        i64::from(p2.x) - i64::from(p1.x),
        i64::from(p2.y) - i64::from(p1.y),
    );

    // Walk from the end with the smaller major coordinate.
    let (start, end) = match regime {
        Regime::Gentle | Regime::GentleFalling if p1.x > p2.x => (p2, p1),
        Regime::Steep | Regime::SteepFalling if p1.y > p2.y => (p2, p1),
        _ => (p1, p2),
    };
    let span = |from: i32, to: i32| i64::from(to) - i64::from(from);
    let (major, minor, steps) = match regime {
        Regime::Gentle => ((1, 0), (0, 1), span(start.x, end.x)),
        Regime::Steep => ((0, 1), (1, 0), span(start.y, end.y)),
        Regime::GentleFalling => ((1, 0), (0, -1), span(start.x, end.x)),
        Regime::SteepFalling => ((0, 1), (-1, 0), span(start.y, end.y)),
    };

    // Candidates are evaluated in i64 so a step past i32 range only loses
    // the comparison.
    let (mut x, mut y) = (i64::from(start.x), i64::from(start.y));
    for step in 0..=steps {
        plot(sink, x as i32, y as i32, color);
        if step == steps {
            break;
        }

        let (nx, ny) = (x + major.0, y + major.1);
        if distance(nx, ny) > distance(nx + minor.0, ny + minor.1) {
            x = nx + minor.0;
            y = ny + minor.1;
        } else {
            x = nx;
            y = ny;
        }
    }
}

fn draw_line_bresenham<P: PixelSink + ?Sized>(
    sink: &mut P,
    p1: Point,
    p2: Point,
    color: P::Color,
) {
    let delta_x = (i64::from(p2.x) - i64::from(p1.x)).abs();
    let delta_y = (i64::from(p2.y) - i64::from(p1.y)).abs();
    let x_major = delta_x >= delta_y;

    // Canonical direction keeps the pixel set independent of endpoint order.
    let (mut p, end) = if (x_major && p1.x > p2.x) || (!x_major && p1.y > p2.y) {
        (p2, p1)
    } else {
        (p1, p2)
    };

    let step_x = if p.x < end.x { 1 } else { -1 };
    let step_y = if p.y < end.y { 1 } else { -1 };

    if x_major {
        let mut err = 2 * delta_y - delta_x;
        loop {
            plot(sink, p.x, p.y, color);
            if p.x == end.x {
                break;
            }
            if err >= 0 {
                p.y += step_y;
                err -= 2 * delta_x;
            }
            p.x += step_x;
            err += 2 * delta_y;
        }
    } else {
        let mut err = 2 * delta_x - delta_y;
        loop {
            plot(sink, p.x, p.y, color);
            if p.y == end.y {
                break;
            }
            if err >= 0 {
                p.x += step_x;
                err -= 2 * delta_y;
            }
            p.y += step_y;
            err += 2 * delta_x;
        }
    }
}

/// Draw a horizontal run `[x_start, x_end]` on row `y` through the line rasterizer.
pub(crate) fn draw_hline<P: PixelSink + ?Sized>(
    sink: &mut P,
    x_start: i32,
    x_end: i32,
    y: i32,
    color: P::Color,
) {
    draw_line_bresenham(sink, Point::new(x_start, y), Point::new(x_end, y), color);
}

impl<P: PixelSink + ?Sized> Drawable<P> for Segment {
    fn draw(&self, sink: &mut P, color: P::Color) {
        draw_line(sink, self.start, self.end, color, LineAlgorithm::default());
    }
}

// ============================================================================
// Tests
// ============================================================================
