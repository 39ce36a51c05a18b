//! RGB <-> CMYK conversion (naive, device-independent)

/// Convert RGB to `(c, m, y, k)` with `k = 1 - max(r, g, b)`.
///
/// Pure black returns `(0, 0, 0, 1)`; the chromatic components cannot be
/// recovered from it.
pub fn rgb_to_cmyk(r: f64, g: f64, b: f64) -> (f64, f64, f64, f64) {
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return (0.0, 0.0, 0.0, 1.0);
    }
    let denom = 1.0 - k;
    (
        (1.0 - r - k) / denom,
        (1.0 - g - k) / denom,
        (1.0 - b - k) / denom,
        k,
    )
}

/// Convert `(c, m, y, k)` to RGB: `r = (1 - c)(1 - k)` and so on.
#[inline]
pub fn cmyk_to_rgb(c: f64, m: f64, y: f64, k: f64) -> (f64, f64, f64) {
    (
        (1.0 - c) * (1.0 - k),
        (1.0 - m) * (1.0 - k),
        (1.0 - y) * (1.0 - k),
    )
}
