//! Color types and color space conversions.
//!
//! Provides the two pixel formats the rasterizers write ([`Rgba`] and
//! [`Gray`]), HSL/HSV/HSI representations with conversions to and from RGBA,
//! and "over" alpha compositing.
//! Every computed channel passes through [`channel`] so written bytes always
//! stay within `[0, 255]`.

/// Round a floating-point channel value and clamp it into a byte.
///
/// NaN maps to 0.
#[inline]
#[must_use]
pub fn channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Single-channel intensity color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gray(pub u8);

impl Gray {
    /// Zero intensity.
    pub const BLACK: Self = Self(0);
    /// Full intensity.
    pub const WHITE: Self = Self(255);

    /// Intensity value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Gray {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Gray> for Rgba {
    fn from(gray: Gray) -> Self {
        Self::rgb(gray.0, gray.0, gray.0)
    }
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(255, 255, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Composite `self` over `background` with the Porter-Duff "over"
    /// operator on straight (non-premultiplied) alpha.
    ///
    /// ```
    /// use rasterkit::color::Rgba;
    ///
    /// let veil = Rgba::new(255, 0, 0, 128);
    /// assert_eq!(veil.over(Rgba::BLUE), Rgba::new(128, 0, 127, 255));
    /// assert_eq!(Rgba::TRANSPARENT.over(Rgba::BLUE), Rgba::BLUE);
    /// ```
    #[must_use]
    pub fn over(self, background: Self) -> Self {
        let front = f32::from(self.a) / 255.0;
        let back = f32::from(background.a) / 255.0 * (1.0 - front);
        let alpha = front + back;
        if alpha <= 0.0 {
            return Self::TRANSPARENT;
        }

        let mix = |f: u8, b: u8| channel((f32::from(f) * front + f32::from(b) * back) / alpha);
        Self::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
            channel(alpha * 255.0),
        )
    }

    /// Convert to HSL.
    #[must_use]
    pub fn to_hsla(self) -> Hsla {
        let (r, g, b) = self.unit_rgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let l = (max + min) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };

        Hsla::new(hue(r, g, b, max, delta), s, l, f32::from(self.a) / 255.0)
    }

    /// Convert to HSV.
    #[must_use]
    pub fn to_hsva(self) -> Hsva {
        let (r, g, b) = self.unit_rgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0.0 { 0.0 } else { delta / max };

        Hsva::new(hue(r, g, b, max, delta), s, max, f32::from(self.a) / 255.0)
    }

    /// Convert to HSI. Saturation is 0 for black.
    #[must_use]
    pub fn to_hsia(self) -> Hsia {
        let (r, g, b) = self.unit_rgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let i = (r + g + b) / 3.0;
        let s = if i == 0.0 { 0.0 } else { 1.0 - min / i };

        Hsia::new(hue(r, g, b, max, max - min), s, i, f32::from(self.a) / 255.0)
    }

    fn unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Hue in degrees for normalized RGB channels.
fn hue(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    }
}

/// Hue, saturation, lightness and alpha, each as `f32`.
///
/// `h` is in degrees and wraps; the other components are fractions in
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Lightness.
    pub l: f32,
    /// Opacity.
    pub a: f32,
}

impl Hsla {
    /// Build from all four components.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Fully opaque color.
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to 8-bit RGBA, rounding each channel.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let chroma = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        from_chroma(self.h, chroma, self.l - chroma / 2.0, self.a)
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// Hue, saturation, value and alpha, each as `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsva {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Value (brightness).
    pub v: f32,
    /// Opacity.
    pub a: f32,
}

impl Hsva {
    /// Build from all four components.
    #[must_use]
    pub const fn new(h: f32, s: f32, v: f32, a: f32) -> Self {
        Self { h, s, v, a }
    }

    /// Fully opaque color.
    #[must_use]
    pub const fn hsv(h: f32, s: f32, v: f32) -> Self {
        Self::new(h, s, v, 1.0)
    }

    /// Convert to 8-bit RGBA, rounding each channel.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let chroma = self.v * self.s;
        from_chroma(self.h, chroma, self.v - chroma, self.a)
    }
}

impl From<Hsva> for Rgba {
    fn from(hsva: Hsva) -> Self {
        hsva.to_rgba()
    }
}

/// Hue, saturation, intensity and alpha, each as `f32`.
///
/// Intensity is the plain mean of the three channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsia {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation.
    pub s: f32,
    /// Intensity.
    pub i: f32,
    /// Opacity.
    pub a: f32,
}

impl Hsia {
    /// Build from all four components.
    #[must_use]
    pub const fn new(h: f32, s: f32, i: f32, a: f32) -> Self {
        Self { h, s, i, a }
    }

    /// Fully opaque color.
    #[must_use]
    pub const fn hsi(h: f32, s: f32, i: f32) -> Self {
        Self::new(h, s, i, 1.0)
    }

    /// Convert to 8-bit RGBA, rounding each channel.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let z = 1.0 - ((self.h.rem_euclid(360.0) / 60.0) % 2.0 - 1.0).abs();
        let chroma = 3.0 * self.i * self.s / (1.0 + z);
        from_chroma(self.h, chroma, self.i * (1.0 - self.s), self.a)
    }
}

impl From<Hsia> for Rgba {
    fn from(hsia: Hsia) -> Self {
        hsia.to_rgba()
    }
}

/// Place `chroma` in the hue sector of `h` and lift every channel by `m`.
fn from_chroma(h: f32, chroma: f32, m: f32, alpha: f32) -> Rgba {
    let h = h.rem_euclid(360.0);
    let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgba::new(
        channel((r + m) * 255.0),
        channel((g + m) * 255.0),
        channel((b + m) * 255.0),
        channel(alpha * 255.0),
    )
}
