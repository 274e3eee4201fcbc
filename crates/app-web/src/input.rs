// Pure helpers for turning DOM readings into host input. No web-sys types
// here so the logic can be exercised on the host.

use netfield_core::Variant;

/// Canvas backing store size for a CSS box at `dpr`, never smaller than 1×1.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let px = |css: f64| {
        let v = (css * dpr).round();
        if v.is_finite() && v >= 1.0 {
            v.min(u32::MAX as f64) as u32
        } else {
            1
        }
    };
    (px(css_width), px(css_height))
}

/// Backdrop named by the canvas `data-variant` attribute. Missing or unknown
/// names fall back to the network.
pub fn variant_from_attribute(attr: Option<&str>) -> Variant {
    match attr {
        None => Variant::default(),
        Some(name) => name.parse().unwrap_or_else(|e| {
            log::warn!("[web] {}, using {}", e, Variant::default());
            Variant::default()
        }),
    }
}

/// Seed from the `data-seed` attribute, or `fallback` when absent or malformed.
pub fn seed_from_attribute(attr: Option<&str>, fallback: u64) -> u64 {
    attr.and_then(|s| s.trim().parse().ok()).unwrap_or(fallback)
}

/// Unit random in `[0, 1)` scaled to a seed in `[0, u32::MAX]`.
///
/// An `f64` carries 53 bits, so the 32-bit range keeps neighbouring
/// draws distinct. Out of range input is clamped; non-finite input is 0.
#[inline]
pub fn seed_from_unit(r: f64) -> u64 {
    if r.is_finite() {
        (r.clamp(0.0, 1.0) * u32::MAX as f64) as u64
    } else {
        0
    }
}
