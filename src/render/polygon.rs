//! Scanline polygon filling with an active edge table.
//!
//! Filling happens in two phases. [`scan_spans`] walks the polygon row by
//! row and produces a [`FillPlan`]: the horizontal runs that lie inside the
//! polygon under the chosen [`WindingRule`], their total pixel count, and
//! the center of the polygon's bounding box. [`fill_polygon`] then shades
//! the plan. Uniform colors go through the line rasterizer one span at a
//! time. Gradients are prepared with the whole plan and then sampled once
//! per pixel.

use log::{debug, trace};

use super::line::{draw_hline, draw_line, LineAlgorithm};
use super::Drawable;
use crate::config::RasterConfig;
use crate::framebuffer::{plot, PixelSink};
use crate::geometry::{Bounds, Point};
use crate::gradient::{ColorSource, Solid};
use crate::verification_specs::pixel_contracts;

/// Inside test applied to the running crossing count of a scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    /// Inside when the signed crossing count is odd (even-odd rule).
    #[default]
    Odd,
    /// Inside when the signed crossing count is greater than zero.
    ///
    /// Edges going down count +1, so the result depends on orientation.
    Positive,
    /// Inside when the signed crossing count is not zero.
    NonZero,
}

impl WindingRule {
    /// Whether a running winding number counts as inside.
    #[must_use]
    pub const fn is_inside(self, winding: i32) -> bool {
        match self {
            Self::Odd => winding % 2 != 0,
            Self::Positive => winding > 0,
            Self::NonZero => winding != 0,
        }
    }
}

/// Inclusive horizontal run of pixels on row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Row.
    pub y: i32,
    /// First column.
    pub x_start: i32,
    /// Last column.
    pub x_end: i32,
}

impl Span {
    /// Number of pixels covered, both ends included.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        pixel_contracts::span_len(self.x_start, self.x_end)
    }
}

/// Everything a color source needs to know about a fill before shading it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillPlan {
    /// Spans in row order, left to right within a row.
    pub spans: Vec<Span>,
    /// Sum of the span pixel counts.
    pub pixel_count: usize,
    /// Center of the bounding box of the edges that took part in the scan.
    pub center: Point,
}

impl FillPlan {
    /// Whether the scan found nothing to fill.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Non-horizontal polygon edge, oriented top to bottom.
#[derive(Debug, Clone, Copy)]
struct Edge {
    y_min: i32,
    y_max: i32,
    /// Crossing x on the current scanline.
    x: f64,
    inv_slope: f64,
    /// +1 if the polygon walks this edge downward, -1 if upward.
    direction: i32,
}

impl Edge {
    /// Build the edge from `a` to `b`. Horizontal edges yield `None`.
    fn new(a: Point, b: Point) -> Option<Self> {
        let (top, bottom, direction) = match a.y.cmp(&b.y) {
            std::cmp::Ordering::Less => (a, b, 1),
            std::cmp::Ordering::Greater => (b, a, -1),
            std::cmp::Ordering::Equal => return None,
        };

        Some(Self {
            y_min: top.y,
            y_max: bottom.y,
            x: f64::from(top.x),
            inv_slope: (f64::from(bottom.x) - f64::from(top.x))
                / (f64::from(bottom.y) - f64::from(top.y)),
            direction,
        })
    }
}

/// Scan a closed polygon into fill spans.
///
/// The last point connects back to the first. Edges entirely below the
/// surface (`y_min > surface_height`) or entirely above it (`y_max < 0`) are
/// ignored. Fewer than three points produce an empty plan.
#[must_use]
pub fn scan_spans(points: &[Point], surface_height: u32, rule: WindingRule) -> FillPlan {
    if points.len() < 3 {
        debug!("polygon with {} points has no interior", points.len());
        return FillPlan {
            center: Bounds::of(points).map_or(Point::ORIGIN, |b| b.center()),
            ..FillPlan::default()
        };
    }

    let height = i64::from(surface_height);
    let mut edges = Vec::with_capacity(points.len());
    let mut bounds: Option<Bounds> = None;

    for (&a, &b) in points.iter().zip(points.iter().cycle().skip(1)) {
        let Some(edge) = Edge::new(a, b) else {
            continue;
        };
        if i64::from(edge.y_min) > height || edge.y_max < 0 {
            continue;
        }
        let b_box = bounds.get_or_insert(Bounds::at(a));
        b_box.include(a);
        b_box.include(b);
        edges.push(edge);
    }

    let Some(bounds) = bounds else {
        debug!("polygon has no scannable edges");
        return FillPlan::default();
    };

    edges.sort_by_key(|e| e.y_min);
    trace!("scanning {} edges over rows {}..={}", edges.len(), bounds.y_min, bounds.y_max);

    let mut plan = FillPlan {
        center: bounds.center(),
        ..FillPlan::default()
    };
    let mut pending = edges.into_iter().peekable();
    let mut active: Vec<Edge> = Vec::new();
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for y in bounds.y_min..=bounds.y_max {
        active.retain(|e| e.y_max != y);
        while let Some(edge) = pending.next_if(|e| e.y_min == y) {
            active.push(edge);
        }
        active.sort_by(|a, b| a.x.total_cmp(&b.x));

        crossings.clear();
        for edge in &mut active {
            crossings.push((edge.x, edge.direction));
            edge.x += edge.inv_slope;
        }

        let mut winding = 0;
        let mut span_start: Option<i32> = None;
        for &(x, direction) in &crossings {
            winding += direction;
            let x = x.round() as i32;
            match (rule.is_inside(winding), span_start) {
                (true, None) => span_start = Some(x),
                (false, Some(x_start)) => {
                    if x > x_start {
                        let span = Span { y, x_start, x_end: x };
                        plan.pixel_count += span.pixel_count();
                        plan.spans.push(span);
                    }
                    span_start = None;
                }
                _ => {}
            }
        }
    }

    debug!(
        "polygon scan produced {} spans covering {} pixels",
        plan.spans.len(),
        plan.pixel_count
    );
    plan
}

/// Fill the interior of a closed polygon from `source`.
///
/// Uniform sources draw each visible span as a line. Other sources are
/// prepared with the full plan and sampled pixel by pixel; sequential
/// gradients advance across every span pixel, on-surface or not.
pub fn fill_polygon<P, S>(sink: &mut P, points: &[Point], source: &mut S, rule: WindingRule)
where
    P: PixelSink + ?Sized,
    S: ColorSource<P::Color> + ?Sized,
{
    let plan = scan_spans(points, sink.height(), rule);
    shade_plan(sink, &plan, source);
}

fn shade_plan<P, S>(sink: &mut P, plan: &FillPlan, source: &mut S)
where
    P: PixelSink + ?Sized,
    S: ColorSource<P::Color> + ?Sized,
{
    if plan.is_empty() {
        return;
    }

    if let Some(color) = source.uniform_color() {
        let (width, height) = (i64::from(sink.width()), i64::from(sink.height()));
        for span in &plan.spans {
            if span.y < 0 || i64::from(span.y) >= height {
                continue;
            }
            let x_start = span.x_start.max(0);
            let x_end = i64::from(span.x_end).min(width - 1) as i32;
            if x_start <= x_end {
                draw_hline(sink, x_start, x_end, span.y, color);
            }
        }
        return;
    }

    source.prepare(plan);
    for span in &plan.spans {
        for x in span.x_start..=span.x_end {
            let color = source.color_at(x, span.y);
            plot(sink, x, span.y, color);
        }
    }
}

/// Draw the closed outline through `points`.
pub fn stroke_polygon<P: PixelSink + ?Sized>(
    sink: &mut P,
    points: &[Point],
    color: P::Color,
    algorithm: LineAlgorithm,
) {
    for (&a, &b) in points.iter().zip(points.iter().cycle().skip(1)) {
        draw_line(sink, a, b, color, algorithm);
    }
}

/// Fill and outline a closed polygon.
///
/// The fill runs first. The outline is drawn afterwards with the Bresenham
/// rasterizer unless it would repeat a uniform fill of the same color,
/// compared on every channel including alpha.
pub fn draw_polygon<P>(
    sink: &mut P,
    points: &[Point],
    outline: Option<P::Color>,
    fill: Option<&mut dyn ColorSource<P::Color>>,
    rule: WindingRule,
) where
    P: PixelSink + ?Sized,
    P::Color: PartialEq,
{
    let config = RasterConfig::default().with_winding_rule(rule);
    draw_polygon_with(sink, points, outline, fill, &config);
}

/// [`draw_polygon`] with the winding rule and outline algorithm taken from
/// `config`.
pub fn draw_polygon_with<P>(
    sink: &mut P,
    points: &[Point],
    outline: Option<P::Color>,
    fill: Option<&mut dyn ColorSource<P::Color>>,
    config: &RasterConfig,
) where
    P: PixelSink + ?Sized,
    P::Color: PartialEq,
{
    let mut fill_color = None;
    if let Some(source) = fill {
        fill_color = source.uniform_color();
        fill_polygon(sink, points, source, config.winding_rule);
    }

    match outline {
        Some(color) if fill_color != Some(color) => {
            stroke_polygon(sink, points, color, config.line_algorithm);
        }
        _ => {}
    }
}

/// A closed polygon drawn with a solid fill, an outline, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Fill the interior.
    pub filled: bool,
    /// Inside test for the fill.
    pub rule: WindingRule,
}

impl Polygon {
    /// Outline-only polygon through `points`.
    #[must_use]
    pub fn new(points: impl Into<Vec<Point>>) -> Self {
        Self {
            points: points.into(),
            filled: false,
            rule: WindingRule::default(),
        }
    }

    /// Enable or disable the fill.
    #[must_use]
    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    /// Set the winding rule.
    #[must_use]
    pub fn with_rule(mut self, rule: WindingRule) -> Self {
        self.rule = rule;
        self
    }
}

impl<P> Drawable<P> for Polygon
where
    P: PixelSink + ?Sized,
    P::Color: PartialEq,
{
    fn draw(&self, sink: &mut P, color: P::Color) {
        let mut solid = Solid(color);
        let fill = if self.filled {
            Some(&mut solid as &mut dyn ColorSource<P::Color>)
        } else {
            None
        };
        draw_polygon(sink, &self.points, Some(color), fill, self.rule);
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
    use crate::gradient::{Gradient, RgbGradient};

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    fn square() -> Vec<Point> {
        pts(&[(0, 0), (0, 10), (10, 10), (10, 0)])
    }

    /// Five-pointed star whose center has winding number 2.
    fn pentagram() -> Vec<Point> {
        pts(&[(50, 10), (26, 82), (88, 38), (12, 38), (74, 82)])
    }

    #[test]
    fn test_winding_rules() {
        assert!(WindingRule::Odd.is_inside(1));
        assert!(WindingRule::Odd.is_inside(-3));
        assert!(!WindingRule::Odd.is_inside(2));
        assert!(WindingRule::Positive.is_inside(2));
        assert!(!WindingRule::Positive.is_inside(-1));
        assert!(WindingRule::NonZero.is_inside(-1));
        assert!(!WindingRule::NonZero.is_inside(0));
    }

    #[test]
    fn test_square_spans() {
        let plan = scan_spans(&square(), 20, WindingRule::Odd);
        assert_eq!(plan.spans.len(), 10);
        assert!(plan
            .spans
            .iter()
            .enumerate()
            .all(|(y, s)| *s == Span { y: y as i32, x_start: 0, x_end: 10 }));
        assert_eq!(plan.pixel_count, 110);
        assert_eq!(plan.center, Point::new(5, 5));
    }

    #[test]
    fn test_square_fill_end_to_end() {
        let mut img = GrayFramebuffer::new(16, 16).expect("image creation should succeed");
        fill_polygon(&mut img, &square(), &mut Solid(Gray(200)), WindingRule::Odd);

        for y in 0..16u32 {
            for x in 0..16u32 {
                let expected = if x <= 10 && y < 10 { Gray(200) } else { Gray::BLACK };
                assert_eq!(img.get_pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fewer_than_three_points() {
        for points in [vec![], pts(&[(3, 3)]), pts(&[(0, 0), (9, 9)])] {
            assert!(scan_spans(&points, 20, WindingRule::Odd).is_empty());
        }

        let mut img = GrayFramebuffer::new(10, 10).expect("image creation should succeed");
        let mut fill = Solid(Gray(9));
        draw_polygon(
            &mut img,
            &pts(&[(0, 0), (9, 9)]),
            Some(Gray::WHITE),
            Some(&mut fill),
            WindingRule::Odd,
        );
        assert_eq!(img.count_pixels(Gray::WHITE), 10);
        assert_eq!(img.count_pixels(Gray(9)), 0);
    }

    #[test]
    fn test_pentagram_center_depends_on_rule() {
        let star = pentagram();
        let mut odd = GrayFramebuffer::new(100, 100).expect("image creation should succeed");
        let mut positive = odd.clone();
        let mut nonzero = odd.clone();

        fill_polygon(&mut odd, &star, &mut Solid(Gray::WHITE), WindingRule::Odd);
        fill_polygon(&mut positive, &star, &mut Solid(Gray::WHITE), WindingRule::Positive);
        fill_polygon(&mut nonzero, &star, &mut Solid(Gray::WHITE), WindingRule::NonZero);

        assert_eq!(odd.get_pixel(50, 50), Some(Gray::BLACK));
        assert_eq!(positive.get_pixel(50, 50), Some(Gray::WHITE));
        assert_eq!(nonzero.get_pixel(50, 50), Some(Gray::WHITE));

        // A point only one edge deep is inside under every rule.
        for img in [&odd, &positive, &nonzero] {
            assert_eq!(img.get_pixel(32, 50), Some(Gray::WHITE));
        }
        assert!(positive.count_pixels(Gray::WHITE) > odd.count_pixels(Gray::WHITE));
    }

    #[test]
    fn test_reversed_orientation_is_negative() {
        let mut star = pentagram();
        star.reverse();
        assert!(scan_spans(&star, 100, WindingRule::Positive).is_empty());
        assert_eq!(
            scan_spans(&star, 100, WindingRule::NonZero),
            scan_spans(&pentagram(), 100, WindingRule::Positive)
        );
    }

    #[test]
    fn test_edges_off_surface_are_rejected() {
        let below = pts(&[(0, 30), (10, 30), (10, 40), (0, 40)]);
        assert!(scan_spans(&below, 20, WindingRule::Odd).is_empty());

        let above = pts(&[(0, -30), (10, -30), (10, -5), (0, -5)]);
        assert!(scan_spans(&above, 20, WindingRule::Odd).is_empty());
    }

    #[test]
    fn test_extreme_coordinates_scan_without_overflow() {
        let sliver = [Point::new(i32::MIN, 0), Point::new(i32::MAX, 4), Point::new(i32::MAX, 0)];
        let plan = scan_spans(&sliver, 8, WindingRule::Odd);

        assert_eq!(plan.spans.len(), 4);
        assert!(plan.spans.iter().all(|s| s.x_end == i32::MAX));
        assert_eq!(plan.spans[0].x_start, i32::MIN);

        let mut img = GrayFramebuffer::new(8, 8).expect("image creation should succeed");
        fill_polygon(&mut img, &sliver, &mut Solid(Gray::WHITE), WindingRule::Odd);
        // Rows 0..=2 start left of the surface; row 3 starts far right of it.
        assert_eq!(img.count_pixels(Gray::WHITE), 24);
        assert_eq!(img.get_pixel(0, 3), Some(Gray::BLACK));
    }

    #[test]
    fn test_partially_visible_fill_is_clipped() {
        let mut fb = Framebuffer::new(10, 10).expect("framebuffer creation should succeed");
        let big = pts(&[(-50, -50), (-50, 50), (50, 50), (50, -50)]);
        fill_polygon(&mut fb, &big, &mut Solid(Rgba::RED), WindingRule::Odd);
        assert_eq!(fb.count_pixels(Rgba::RED), 100);
    }

    #[test]
    fn test_sequential_gradient_spans_the_fill() {
        let mut img = GrayFramebuffer::new(16, 16).expect("image creation should succeed");
        let mut ramp = Gradient::auto(0.0, 220.0);
        fill_polygon(&mut img, &square(), &mut ramp, WindingRule::Odd);

        // Pixels are shaded in row order, so the value grows down the image.
        assert_eq!(img.get_pixel(0, 0), Some(Gray(0)));
        let first_row_end = img.get_pixel(10, 0).map(Gray::value).unwrap_or_default();
        let last = img.get_pixel(10, 9).map(Gray::value).unwrap_or_default();
        assert!(first_row_end < last);
        assert!(last >= 218);
        assert!(ramp.current() <= 220.0);
    }

    #[test]
    fn test_directional_gradient_extremes() {
        let mut fb = Framebuffer::new(16, 16).expect("framebuffer creation should succeed");
        let mut shade = RgbGradient::angle(Rgba::BLACK, Rgba::WHITE, 0.0);
        fill_polygon(&mut fb, &square(), &mut shade, WindingRule::Odd);

        assert_eq!(fb.get_pixel(0, 4), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(10, 4), Some(Rgba::WHITE));
        // Columns share a color regardless of row.
        assert_eq!(fb.get_pixel(5, 0), fb.get_pixel(5, 9));
    }

    #[test]
    fn test_outline_drawn_after_fill() {
        let mut img = GrayFramebuffer::new(16, 16).expect("image creation should succeed");
        let mut fill = Solid(Gray(100));
        draw_polygon(&mut img, &square(), Some(Gray::WHITE), Some(&mut fill), WindingRule::Odd);

        assert_eq!(img.get_pixel(0, 5), Some(Gray::WHITE));
        assert_eq!(img.get_pixel(5, 10), Some(Gray::WHITE));
        assert_eq!(img.get_pixel(5, 5), Some(Gray(100)));
        assert_eq!(img.count_pixels(Gray::WHITE), 40);
    }

    #[test]
    fn test_outline_skipped_for_matching_solid_fill() {
        let mut img = GrayFramebuffer::new(16, 16).expect("image creation should succeed");
        let mut fill = Solid(Gray::WHITE);
        draw_polygon(&mut img, &square(), Some(Gray::WHITE), Some(&mut fill), WindingRule::Odd);

        // Row 10 would only come from the outline.
        assert_eq!(img.get_pixel(5, 10), Some(Gray::BLACK));
        assert_eq!(img.count_pixels(Gray::WHITE), 110);
    }

    #[test]
    fn test_outline_kept_when_only_alpha_differs() {
        let mut fb = Framebuffer::new(16, 16).expect("framebuffer creation should succeed");
        let outline = Rgba::RED.with_alpha(128);
        let mut fill = Solid(Rgba::RED);
        draw_polygon(&mut fb, &square(), Some(outline), Some(&mut fill), WindingRule::Odd);

        assert_eq!(fb.get_pixel(5, 10), Some(outline));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::RED));
    }

    #[test]
    fn test_outline_only() {
        let mut img = GrayFramebuffer::new(16, 16).expect("image creation should succeed");
        draw_polygon(&mut img, &square(), Some(Gray::WHITE), None, WindingRule::Odd);
        assert_eq!(img.count_pixels(Gray::WHITE), 40);
        assert_eq!(img.get_pixel(5, 5), Some(Gray::BLACK));
    }

    #[test]
    fn test_draw_polygon_with_config() {
        let config = RasterConfig::default()
            .with_winding_rule(WindingRule::Positive)
            .with_line_algorithm(LineAlgorithm::Dda);
        let mut img = GrayFramebuffer::new(100, 100).expect("image creation should succeed");
        let mut fill = Solid(Gray(50));
        draw_polygon_with(&mut img, &pentagram(), None, Some(&mut fill), &config);
        assert_eq!(img.get_pixel(50, 50), Some(Gray(50)));
    }

    #[test]
    fn test_drawable_polygon() {
        let mut img = GrayFramebuffer::new(16, 16).expect("image creation should succeed");
        Polygon::new(square()).draw(&mut img, Gray::WHITE);
        assert_eq!(img.count_pixels(Gray::WHITE), 40);

        let mut filled = GrayFramebuffer::new(16, 16).expect("image creation should succeed");
        Polygon::new(square()).filled(true).draw(&mut filled, Gray::WHITE);
        assert_eq!(filled.count_pixels(Gray::WHITE), 110);
    }
}
