//! Formal Verification Specifications for rasterkit
//!
//! Design-by-contract specifications using Verus-style pre/postconditions.
//! These serve as both documentation and verification targets, and the
//! rasterizers call them directly at the points where the contracts apply.
//!
//! Without Verus, they serve as checked documentation via debug_assert!().

/// Pixel addressing invariants
///
/// # Verification Specifications
///
/// #[requires(width > 0 && height > 0)]
/// #[ensures(result == true ==> 0 <= x < width && 0 <= y < height)]
/// #[invariant(every write lands inside [0,width) x [0,height))]
pub mod pixel_contracts {
    /// Whether a signed coordinate addresses a pixel of a `width` x `height` surface.
    ///
    /// #[ensures(result == true ==> x >= 0 && y >= 0)]
    /// #[ensures(result == true ==> (x as u32) < width && (y as u32) < height)]
    #[inline]
    pub fn in_bounds(x: i32, y: i32, width: u32, height: u32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
    }

    /// Number of pixels in an inclusive span.
    ///
    /// #[requires(x_end >= x_start)]
    /// #[ensures(result >= 1)]
    #[inline]
    pub fn span_len(x_start: i32, x_end: i32) -> usize {
        debug_assert!(x_end >= x_start, "span must not be reversed");
        (i64::from(x_end) - i64::from(x_start) + 1) as usize
    }
}

/// Numeric invariants for shading
///
/// #[invariant(result.is_finite())]
/// #[requires(a.is_finite() && b.is_finite())]
/// #[ensures(0.0 <= result <= 1.0)]
pub mod numeric_contracts {
    /// Normalize a value to [0, 1] range
    ///
    /// #[requires(val.is_finite() && min.is_finite() && max.is_finite())]
    /// #[ensures(result >= 0.0 && result <= 1.0)]
    /// #[ensures(max <= min ==> result == 0.0)]
    pub fn normalize(val: f32, min: f32, max: f32) -> f32 {
        if max <= min {
            return 0.0;
        }
        ((val - min) / (max - min)).clamp(0.0, 1.0)
    }

    /// Validate that a parameter lies strictly inside (0, 1)
    ///
    /// #[ensures(result == true ==> 0.0 < t && t < 1.0)]
    /// #[ensures(t.is_nan() ==> result == false)]
    pub fn is_open_unit(t: f32) -> bool {
        t > 0.0 && t < 1.0
    }
}
