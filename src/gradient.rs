//! Color sources for shaded fills.
//!
//! A fill asks its [`ColorSource`] for one color per pixel. Three kinds exist:
//!
//! - [`Solid`]: the same color everywhere.
//! - Sequential gradients: each call returns the current value and then moves
//!   it by a fixed step, so the result depends on how many pixels came before.
//! - Directional gradients: the color depends only on where the pixel lies
//!   along a direction vector, normalized over the extent of the shape.
//!
//! [`Gradient`] covers one channel and produces [`Gray`]. [`RgbGradient`]
//! runs one gradient per color channel and produces [`Rgba`].
//!
//! # Example
//!
//! ```
//! use rasterkit::gradient::{ColorSource, Gradient};
//!
//! let mut ramp = Gradient::new(10.0, 5.0, Some(20.0));
//! let values: Vec<u8> = (0..4).map(|_| ramp.next_color().value()).collect();
//! assert_eq!(values, vec![10, 15, 20, 20]);
//! assert!(ramp.is_finished());
//! ```

use crate::color::{channel, Gray, Rgba};
use crate::geometry::Point;
use crate::render::{FillPlan, Span};
use crate::verification_specs::numeric_contracts;

/// Anything that can shade the pixels of a fill.
pub trait ColorSource<C> {
    /// Next color in sequence.
    fn next_color(&mut self) -> C;

    /// Color for the pixel at `(x, y)`.
    ///
    /// Sources that do not depend on position fall back to [`next_color`](Self::next_color).
    fn color_at(&mut self, _x: i32, _y: i32) -> C {
        self.next_color()
    }

    /// Called once with the complete fill plan before the first pixel is shaded.
    fn prepare(&mut self, _plan: &FillPlan) {}

    /// The color every pixel gets, if the source never varies.
    fn uniform_color(&self) -> Option<C> {
        None
    }
}

/// A constant color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Solid<C>(pub C);

impl<C: Copy> ColorSource<C> for Solid<C> {
    fn next_color(&mut self) -> C {
        self.0
    }

    fn uniform_color(&self) -> Option<C> {
        Some(self.0)
    }
}

impl<C> From<C> for Solid<C> {
    fn from(color: C) -> Self {
        Self(color)
    }
}

/// Optional gradient capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientOptions {
    /// Derive the step from the number of pixels in the fill.
    pub auto_step: bool,
    /// Shade along this direction (degrees, y pointing down) instead of in
    /// fill order.
    pub angle: Option<f32>,
}

/// Projection of pixels onto a direction vector anchored at a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    angle: f32,
    center: Point,
    range: Option<(f32, f32)>,
}

impl Projection {
    /// Create an unprepared projection along `angle` degrees.
    #[must_use]
    pub const fn new(angle: f32) -> Self {
        Self {
            angle,
            center: Point::ORIGIN,
            range: None,
        }
    }

    /// Direction angle in degrees.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Anchor point.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Minimum and maximum projection, once calculated.
    #[must_use]
    pub const fn range(&self) -> Option<(f32, f32)> {
        self.range
    }

    /// Whether [`calculate_range`](Self::calculate_range) has run.
    #[must_use]
    pub const fn is_prepared(&self) -> bool {
        self.range.is_some()
    }

    /// Move the anchor point.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Signed distance of `(x, y)` from the center along the direction.
    #[must_use]
    pub fn project(&self, x: i32, y: i32) -> f32 {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        (i64::from(x) - i64::from(self.center.x)) as f32 * cos
            + (i64::from(y) - i64::from(self.center.y)) as f32 * sin
    }

    /// Record the extreme projections over every pixel of `spans`.
    ///
    /// The projection is linear along a row, so each span's endpoints bound
    /// it. Leaves the projection unprepared when `spans` is empty.
    pub fn calculate_range(&mut self, spans: &[Span]) {
        self.range = spans
            .iter()
            .flat_map(|s| [self.project(s.x_start, s.y), self.project(s.x_end, s.y)])
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((min, max)) => Some((f32::min(min, p), f32::max(max, p))),
            });
    }

    /// Normalized position of `(x, y)` in `[0, 1]` between the extreme
    /// projections. A degenerate range maps everything to 0.
    ///
    /// # Panics
    ///
    /// Panics if the range has not been calculated.
    #[must_use]
    pub fn position(&self, x: i32, y: i32) -> f32 {
        let Some((min, max)) = self.range else {
            panic!("directional gradient sampled before its projection range was calculated");
        };
        numeric_contracts::normalize(self.project(x, y), min, max)
    }
}

/// Single-channel gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    value: f32,
    step: f32,
    start: f32,
    end: Option<f32>,
    auto_step: bool,
    direction: Option<Projection>,
}

impl Gradient {
    /// Sequential gradient from `start`, moving by `step` per pixel. Without
    /// an `end` the value is only capped at 255.
    #[must_use]
    pub const fn new(start: f32, step: f32, end: Option<f32>) -> Self {
        Self {
            value: start,
            step,
            start,
            end,
            auto_step: false,
            direction: None,
        }
    }

    /// Sequential gradient that spreads `start..end` evenly across the fill.
    #[must_use]
    pub const fn auto(start: f32, end: f32) -> Self {
        let mut gradient = Self::new(start, 0.0, Some(end));
        gradient.auto_step = true;
        gradient
    }

    /// Directional gradient from `start` to `end` along `degrees`.
    #[must_use]
    pub const fn angle(start: f32, end: f32, degrees: f32) -> Self {
        let mut gradient = Self::new(start, 0.0, Some(end));
        gradient.direction = Some(Projection::new(degrees));
        gradient
    }

    /// Gradient with any combination of options. `step` is ignored when
    /// auto-stepping.
    #[must_use]
    pub const fn with_options(
        start: f32,
        step: f32,
        end: Option<f32>,
        options: GradientOptions,
    ) -> Self {
        let mut gradient = Self::new(start, if options.auto_step { 0.0 } else { step }, end);
        gradient.auto_step = options.auto_step;
        if let Some(degrees) = options.angle {
            gradient.direction = Some(Projection::new(degrees));
        }
        gradient
    }

    /// Rewind to the start value.
    pub fn reset(&mut self) {
        self.value = self.start;
    }

    /// Current (unrounded) value.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.value
    }

    /// Start value.
    #[must_use]
    pub const fn start(&self) -> f32 {
        self.start
    }

    /// End value, 255 for open-ended gradients.
    #[must_use]
    pub fn end(&self) -> f32 {
        self.end.unwrap_or(255.0)
    }

    /// Step per pixel.
    #[must_use]
    pub const fn step(&self) -> f32 {
        self.step
    }

    /// Whether the value has reached the end in the direction of travel.
    /// Always false without an end value.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end.is_some_and(|end| {
            if self.step >= 0.0 {
                self.value >= end
            } else {
                self.value <= end
            }
        })
    }

    /// Replace the step.
    pub fn set_step(&mut self, step: f32) {
        self.step = step;
    }

    /// Jump to `value`, clamped to `[0, 255]`.
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, 255.0);
    }

    /// Size the step so the value reaches the end after `total` pixels.
    ///
    /// Only auto-step gradients with an end value react, and only to a
    /// positive `total`.
    pub fn calculate_step(&mut self, total: usize) {
        if let (true, Some(end), true) = (self.auto_step, self.end, total > 0) {
            self.step = (end - self.start) / total as f32;
        }
    }

    /// Whether the step comes from the fill size.
    #[must_use]
    pub const fn is_auto_step(&self) -> bool {
        self.auto_step
    }

    /// Whether the gradient shades by position.
    #[must_use]
    pub fn is_directional(&self) -> bool {
        self.direction.is_some()
    }

    /// Directional state, if any.
    #[must_use]
    pub const fn projection(&self) -> Option<&Projection> {
        self.direction.as_ref()
    }

    /// Anchor the direction vector. No effect on sequential gradients.
    pub fn set_center(&mut self, center: Point) {
        if let Some(direction) = &mut self.direction {
            direction.set_center(center);
        }
    }

    /// Measure the projection range of a fill. No effect on sequential
    /// gradients.
    pub fn calculate_projection_range(&mut self, spans: &[Span]) {
        if let Some(direction) = &mut self.direction {
            direction.calculate_range(spans);
        }
    }

    /// Return the current value rounded to a byte, then advance it by one
    /// step and clamp it to the gradient's bounds.
    ///
    /// Directional gradients do not advance and return their start value.
    pub fn next_value(&mut self) -> u8 {
        if self.direction.is_some() {
            return channel(self.start);
        }

        let current = self.value;
        let (lo, hi) = self.bounds();
        self.value = (self.value + self.step).max(lo).min(hi);
        channel(current)
    }

    /// Value for the pixel at `(x, y)`. Sequential gradients ignore the
    /// position and advance.
    ///
    /// # Panics
    ///
    /// Panics for a directional gradient whose projection range has not been
    /// calculated.
    pub fn sample(&mut self, x: i32, y: i32) -> u8 {
        match self.direction {
            Some(direction) => self.interpolate(direction.position(x, y)),
            None => self.next_value(),
        }
    }

    /// Value at normalized position `t` between start and end.
    fn interpolate(&self, t: f32) -> u8 {
        channel(self.start + t * (self.end() - self.start))
    }

    fn bounds(&self) -> (f32, f32) {
        match self.end {
            Some(end) => (self.start.min(end), self.start.max(end)),
            None => (self.start, self.start.max(255.0)),
        }
    }
}

impl ColorSource<Gray> for Gradient {
    fn next_color(&mut self) -> Gray {
        Gray(self.next_value())
    }

    fn color_at(&mut self, x: i32, y: i32) -> Gray {
        Gray(self.sample(x, y))
    }

    fn prepare(&mut self, plan: &FillPlan) {
        if self.is_directional() {
            self.set_center(plan.center);
            self.calculate_projection_range(&plan.spans);
        } else {
            self.calculate_step(plan.pixel_count);
        }
    }
}

/// Three-channel gradient producing RGBA colors with a fixed alpha.
///
/// In directional mode the channels share one projection, so a single
/// position drives all three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbGradient {
    r: Gradient,
    g: Gradient,
    b: Gradient,
    alpha: u8,
    direction: Option<Projection>,
}

impl RgbGradient {
    /// Sequential gradient from `start` with per-channel steps `[r, g, b]`,
    /// optionally bounded by `end`.
    #[must_use]
    pub fn new(start: Rgba, end: Option<Rgba>, steps: [f32; 3]) -> Self {
        let [r_step, g_step, b_step] = steps;
        let channel_end = |pick: fn(Rgba) -> u8| end.map(|e| f32::from(pick(e)));
        Self::from_channels(
            Gradient::new(f32::from(start.r), r_step, channel_end(|c| c.r)),
            Gradient::new(f32::from(start.g), g_step, channel_end(|c| c.g)),
            Gradient::new(f32::from(start.b), b_step, channel_end(|c| c.b)),
        )
        .with_alpha(start.a)
    }

    /// Sequential gradient with the same step on every channel.
    #[must_use]
    pub fn uniform_step(start: Rgba, end: Option<Rgba>, step: f32) -> Self {
        Self::new(start, end, [step; 3])
    }

    /// Sequential gradient that spreads `start..end` evenly across the fill.
    #[must_use]
    pub fn auto(start: Rgba, end: Rgba) -> Self {
        Self::from_channels(
            Gradient::auto(f32::from(start.r), f32::from(end.r)),
            Gradient::auto(f32::from(start.g), f32::from(end.g)),
            Gradient::auto(f32::from(start.b), f32::from(end.b)),
        )
        .with_alpha(start.a)
    }

    /// Directional gradient from `start` to `end` along `degrees`.
    #[must_use]
    pub fn angle(start: Rgba, end: Rgba, degrees: f32) -> Self {
        let mut gradient = Self::new(start, Some(end), [0.0; 3]);
        gradient.direction = Some(Projection::new(degrees));
        gradient
    }

    /// Combine three channel gradients. Alpha starts opaque.
    ///
    /// Each channel keeps its own mode: a directional channel shades by its
    /// own projection while a sequential one advances per pixel.
    #[must_use]
    pub fn from_channels(r: Gradient, g: Gradient, b: Gradient) -> Self {
        Self {
            r,
            g,
            b,
            alpha: 255,
            direction: None,
        }
    }

    /// Set the alpha written with every color.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    /// Rewind every channel.
    pub fn reset(&mut self) {
        for c in self.channels_mut() {
            c.reset();
        }
    }

    /// Current color.
    #[must_use]
    pub fn current(&self) -> Rgba {
        Rgba::new(
            channel(self.r.current()),
            channel(self.g.current()),
            channel(self.b.current()),
            self.alpha,
        )
    }

    /// Red channel gradient.
    #[must_use]
    pub const fn red(&self) -> &Gradient {
        &self.r
    }

    /// Green channel gradient.
    #[must_use]
    pub const fn green(&self) -> &Gradient {
        &self.g
    }

    /// Blue channel gradient.
    #[must_use]
    pub const fn blue(&self) -> &Gradient {
        &self.b
    }

    /// True once any channel has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.r.is_finished() || self.g.is_finished() || self.b.is_finished()
    }

    /// True once every channel has finished.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.r.is_finished() && self.g.is_finished() && self.b.is_finished()
    }

    /// Jump every channel to a new value (each clamped to `[0, 255]`).
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.r.set_value(r);
        self.g.set_value(g);
        self.b.set_value(b);
    }

    /// Replace the red step.
    pub fn set_r_step(&mut self, step: f32) {
        self.r.set_step(step);
    }

    /// Replace the green step.
    pub fn set_g_step(&mut self, step: f32) {
        self.g.set_step(step);
    }

    /// Replace the blue step.
    pub fn set_b_step(&mut self, step: f32) {
        self.b.set_step(step);
    }

    /// Jump the red channel to `value`, clamped to `[0, 255]`.
    pub fn set_r_value(&mut self, value: f32) {
        self.r.set_value(value);
    }

    /// Jump the green channel to `value`, clamped to `[0, 255]`.
    pub fn set_g_value(&mut self, value: f32) {
        self.g.set_value(value);
    }

    /// Jump the blue channel to `value`, clamped to `[0, 255]`.
    pub fn set_b_value(&mut self, value: f32) {
        self.b.set_value(value);
    }

    /// Size auto-step channels for a fill of `total` pixels.
    pub fn calculate_step(&mut self, total: usize) {
        for c in self.channels_mut() {
            c.calculate_step(total);
        }
    }

    /// Whether any channel derives its step from the fill size.
    #[must_use]
    pub fn is_auto_step(&self) -> bool {
        self.r.is_auto_step() || self.g.is_auto_step() || self.b.is_auto_step()
    }

    /// Whether the gradient, or any of its channels, shades by position.
    #[must_use]
    pub fn is_directional(&self) -> bool {
        self.direction.is_some()
            || self.r.is_directional()
            || self.g.is_directional()
            || self.b.is_directional()
    }

    /// Directional state, if any.
    #[must_use]
    pub const fn projection(&self) -> Option<&Projection> {
        self.direction.as_ref()
    }

    /// Anchor the shared direction vector and every directional channel.
    pub fn set_center(&mut self, center: Point) {
        if let Some(direction) = &mut self.direction {
            direction.set_center(center);
        }
        for c in self.channels_mut() {
            c.set_center(center);
        }
    }

    /// Measure the projection range of a fill for the shared direction and
    /// every directional channel.
    pub fn calculate_projection_range(&mut self, spans: &[Span]) {
        if let Some(direction) = &mut self.direction {
            direction.calculate_range(spans);
        }
        for c in self.channels_mut() {
            c.calculate_projection_range(spans);
        }
    }

    /// Color for the pixel at `(x, y)`. Sequential gradients ignore the
    /// position and advance every channel.
    ///
    /// # Panics
    ///
    /// Panics for a directional gradient whose projection range has not been
    /// calculated.
    pub fn sample(&mut self, x: i32, y: i32) -> Rgba {
        match self.direction {
            Some(direction) => {
                let t = direction.position(x, y);
                Rgba::new(
                    self.r.interpolate(t),
                    self.g.interpolate(t),
                    self.b.interpolate(t),
                    self.alpha,
                )
            }
            None => Rgba::new(
                self.r.sample(x, y),
                self.g.sample(x, y),
                self.b.sample(x, y),
                self.alpha,
            ),
        }
    }

    fn advance(&mut self) -> Rgba {
        if self.direction.is_some() {
            return self.current();
        }
        Rgba::new(
            self.r.next_value(),
            self.g.next_value(),
            self.b.next_value(),
            self.alpha,
        )
    }

    fn channels_mut(&mut self) -> [&mut Gradient; 3] {
        [&mut self.r, &mut self.g, &mut self.b]
    }
}

impl ColorSource<Rgba> for RgbGradient {
    fn next_color(&mut self) -> Rgba {
        self.advance()
    }

    fn color_at(&mut self, x: i32, y: i32) -> Rgba {
        self.sample(x, y)
    }

    fn prepare(&mut self, plan: &FillPlan) {
        if let Some(direction) = &mut self.direction {
            direction.set_center(plan.center);
            direction.calculate_range(&plan.spans);
        }
        for c in self.channels_mut() {
            c.prepare(plan);
        }
    }
}
