//! Parametric curves: ellipses, polar roses, Archimedean spirals and arcs.
//!
//! Bad parameters (non-positive extents, petal counts or loop counts) are
//! logged at `warn` and draw nothing.

use std::f32::consts::TAU;
use std::f64::consts::TAU as TAU_F64;

use log::warn;

use super::circle::{octant_offsets, CircleAlgorithm};
use super::line::{draw_line, LineAlgorithm};
use crate::framebuffer::{plot, PixelSink};
use crate::geometry::Point;

/// Plot an axis-aligned ellipse by sampling its parametric form every
/// `step` radians.
///
/// The radii are `width / 2` and `height / 2` (integer division).
pub fn draw_ellipse<P: PixelSink + ?Sized>(
    sink: &mut P,
    center: Point,
    width: i32,
    height: i32,
    step: f32,
    color: P::Color,
) {
    if width <= 0 || height <= 0 {
        warn!("ellipse extent must be positive, got {width}x{height}; skipping draw");
        return;
    }
    if !is_positive(step) {
        warn!("ellipse step must be positive, got {step}; skipping draw");
        return;
    }

    let (rx, ry) = ((width / 2) as f32, (height / 2) as f32);
    for theta in angles(step, TAU) {
        let (sin, cos) = theta.sin_cos();
        plot(
            sink,
            (center.x as f32 + rx * cos).round() as i32,
            (center.y as f32 + ry * sin).round() as i32,
            color,
        );
    }
}

/// Draw the polar rose `r = cos(petals * theta) * scale` for `theta` in
/// `[0, 2pi]`, joining consecutive samples with Bresenham lines.
///
/// A non-positive `scale` falls back to `width / 2 - 10` of the sink.
pub fn draw_rose<P: PixelSink + ?Sized>(
    sink: &mut P,
    center: Point,
    petals: i32,
    step: f32,
    scale: f32,
    color: P::Color,
) {
    if petals <= 0 {
        warn!("rose petal count must be positive, got {petals}; skipping draw");
        return;
    }
    if !is_positive(step) {
        warn!("rose step must be positive, got {step}; skipping draw");
        return;
    }

    let scale = if scale > 0.0 {
        scale
    } else {
        (i64::from(sink.width()) / 2 - 10) as f32
    };
    let k = petals as f32;
    let at = |theta: f32| {
        let radius = (k * theta).cos() * scale;
        let (sin, cos) = theta.sin_cos();
        Point::new(
            center.x + (radius * cos).round() as i32,
            center.y + (radius * sin).round() as i32,
        )
    };

    let mut previous = at(0.0);
    for theta in angles(step, TAU).skip(1) {
        let current = at(theta);
        draw_line(sink, previous, current, color, LineAlgorithm::Bresenham);
        previous = current;
    }
}

/// Draw the Archimedean spiral `r = intercept + factor * theta / 2pi` over
/// `loops` turns as a chain of short midpoint-circle arcs.
///
/// The angle advances by `1 / max(r, 1)` so consecutive arcs are about one
/// pixel long.
pub fn draw_spiral<P: PixelSink + ?Sized>(
    sink: &mut P,
    center: Point,
    intercept: i32,
    factor: f32,
    loops: i32,
    color: P::Color,
) {
    if intercept < 0 {
        warn!("spiral intercept must not be negative, got {intercept}; skipping draw");
        return;
    }
    if !is_positive(factor) {
        warn!("spiral factor must be positive, got {factor}; skipping draw");
        return;
    }
    if loops <= 0 {
        warn!("spiral loop count must be positive, got {loops}; skipping draw");
        return;
    }

    for (start, end, radius) in spiral_windows(intercept, factor, loops) {
        draw_arc(sink, center, radius, start as f32, end as f32, color);
    }
}

/// Consecutive angular windows `(start, end, radius)` of a spiral, ending
/// once the angle passes `2pi * loops`.
///
/// The angle is accumulated in `f64`. If a step no longer moves it, the
/// walk stops early instead of spinning.
fn spiral_windows(
    intercept: i32,
    factor: f32,
    loops: i32,
) -> impl Iterator<Item = (f64, f64, i32)> {
    let max_theta = TAU_F64 * f64::from(loops);
    let (intercept, factor) = (f64::from(intercept), f64::from(factor));
    let mut theta = 0.0f64;

    std::iter::from_fn(move || {
        if theta > max_theta {
            return None;
        }
        let radius = intercept + factor * theta / TAU_F64;
        let next = theta + 1.0 / radius.max(1.0);
        if next <= theta {
            warn!("spiral step vanished at angle {theta}; stopping early");
            theta = f64::INFINITY;
            return None;
        }
        let window = (theta, next, radius.round() as i32);
        theta = next;
        Some(window)
    })
}

/// Plot the midpoint-circle pixels of radius `radius` whose angle about
/// `center` lies in `[start, end]` (radians, y pointing down).
///
/// Both bounds are reduced to `[0, 2pi)`. When `start` ends up past `end`
/// the window wraps through angle 0.
pub fn draw_arc<P: PixelSink + ?Sized>(
    sink: &mut P,
    center: Point,
    radius: i32,
    start: f32,
    end: f32,
    color: P::Color,
) {
    let (start, end) = (normalize_angle(start), normalize_angle(end));
    let in_window = |dx: i32, dy: i32| {
        let angle = normalize_angle((dy as f32).atan2(dx as f32));
        if start <= end {
            angle >= start && angle <= end
        } else {
            angle >= start || angle <= end
        }
    };

    for (x, y) in octant_offsets(radius, CircleAlgorithm::Midpoint) {
        for (dx, dy) in [(x, y), (-x, y), (x, -y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
            if in_window(dx, dy) {
                plot(sink, center.x + dx, center.y + dy, color);
            }
        }
    }
}

/// Reduce an angle into `[0, 2pi)`.
fn normalize_angle(theta: f32) -> f32 {
    let reduced = theta.rem_euclid(TAU);
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

/// `0, step, 2 * step, ...` up to and including `max`.
fn angles(step: f32, max: f32) -> impl Iterator<Item = f32> {
    (0u32..)
        .map(move |i| i as f32 * step)
        .take_while(move |&theta| theta <= max)
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
