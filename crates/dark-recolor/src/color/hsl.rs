//! RGB <-> HSL conversion
//!
//! Standard colorimetric formulas. Hue is expressed in `0.0..1.0` (fractions
//! of a full turn) and is defined as 0 for achromatic colors.

/// HSL lightness: the midpoint of the largest and smallest channel.
#[inline]
pub fn lightness(r: f64, g: f64, b: f64) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    (max + min) / 2.0
}

/// HSL saturation.
///
/// Branches on lightness: `d / (max + min)` up to 0.5, `d / (2 - max - min)`
/// above it. Achromatic colors have saturation 0.
pub fn saturation(r: f64, g: f64, b: f64) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    if d == 0.0 {
        return 0.0;
    }
    let l = (max + min) / 2.0;
    if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    }
}

/// Convert RGB to `(h, s, l)`.
///
/// # Example
/// ```
/// use dark_recolor::rgb_to_hsl;
/// let (h, s, l) = rgb_to_hsl(1.0, 0.0, 0.0);
/// assert_eq!((h, s, l), (0.0, 1.0, 0.5));
/// ```
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = saturation(r, g, b);

    let h = if max == r {
        let offset = if g < b { 6.0 } else { 0.0 };
        (g - b) / d + offset
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Convert `(h, s, l)` back to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}
