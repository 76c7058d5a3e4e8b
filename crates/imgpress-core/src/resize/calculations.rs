//! Pure calculation functions for output dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! A bound of `0` means "unconstrained in that dimension".

/// Calculate dimensions that fit within `bounds` while preserving aspect ratio.
///
/// The scale factor is the smaller of the per-axis factors for the
/// constrained axes. Without `allow_upscale` the factor never exceeds 1, so
/// an image already inside the bounds keeps its size. Each output edge is at
/// least 1 pixel and never exceeds its bound.
///
/// # Examples
/// ```
/// # use imgpress_core::resize::fit_dimensions;
/// assert_eq!(fit_dimensions((800, 600), (200, 200), false), (200, 150));
/// assert_eq!(fit_dimensions((800, 600), (0, 300), false), (400, 300));
/// assert_eq!(fit_dimensions((100, 50), (400, 400), false), (100, 50));
/// assert_eq!(fit_dimensions((100, 50), (400, 400), true), (400, 200));
/// ```
pub fn fit_dimensions(source: (u32, u32), bounds: (u32, u32), allow_upscale: bool) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w == 0 || src_h == 0 {
        return (0, 0);
    }

    let scale_w = (max_w > 0).then(|| max_w as f64 / src_w as f64);
    let scale_h = (max_h > 0).then(|| max_h as f64 / src_h as f64);

    let scale = match (scale_w, scale_h) {
        (Some(w), Some(h)) => w.min(h),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => return source,
    };
    let scale = if allow_upscale { scale } else { scale.min(1.0) };

    (
        scale_edge(src_w, scale, max_w),
        scale_edge(src_h, scale, max_h),
    )
}

/// Calculate dimensions for an exact resize.
///
/// Both bounds positive: exactly `bounds`, aspect ratio not preserved.
/// One bound zero: that edge is derived proportionally from the other.
/// Both zero: the source dimensions.
pub fn exact_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w == 0 || src_h == 0 {
        return (0, 0);
    }

    match bounds {
        (0, 0) => source,
        (w, 0) => (w, proportional(w, src_h, src_w)),
        (0, h) => (proportional(h, src_w, src_h), h),
        exact => exact,
    }
}

fn scale_edge(edge: u32, scale: f64, bound: u32) -> u32 {
    let scaled = (edge as f64 * scale).round().max(1.0) as u32;
    if bound > 0 {
        scaled.min(bound)
    } else {
        scaled
    }
}

/// `known * numerator / denominator`, rounded, at least 1.
fn proportional(known: u32, numerator: u32, denominator: u32) -> u32 {
    (known as f64 * numerator as f64 / denominator as f64)
        .round()
        .max(1.0) as u32
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn source_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=5000, 1u32..=5000)
    }

    fn bounds_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=2000, 1u32..=2000)
    }

    /// One of the two edges is computed exactly, the other rounded, so at
    /// least one of the cross-ratios is within a pixel.
    fn aspect_within_one_pixel(source: (u32, u32), out: (u32, u32)) -> bool {
        let (sw, sh) = (source.0 as f64, source.1 as f64);
        let (w, h) = (out.0 as f64, out.1 as f64);
        (h - w * sh / sw).abs() <= 1.0 || (w - h * sw / sh).abs() <= 1.0
    }

    proptest! {
        /// Property: Output always fits inside positive bounds.
        #[test]
        fn prop_fit_stays_within_bounds(
            source in source_strategy(),
            bounds in bounds_strategy(),
            allow_upscale in any::<bool>(),
        ) {
            let (w, h) = fit_dimensions(source, bounds, allow_upscale);
            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= bounds.0, "width {} > bound {}", w, bounds.0);
            prop_assert!(h <= bounds.1, "height {} > bound {}", h, bounds.1);
        }

        /// Property: Without upscaling the output never grows.
        #[test]
        fn prop_fit_never_upscales(
            source in source_strategy(),
            bounds in bounds_strategy(),
        ) {
            let (w, h) = fit_dimensions(source, bounds, false);
            prop_assert!(w <= source.0 && h <= source.1);
        }

        /// Property: Aspect ratio is preserved within one pixel of rounding.
        #[test]
        fn prop_fit_preserves_aspect_ratio(
            source in source_strategy(),
            bounds in bounds_strategy(),
            allow_upscale in any::<bool>(),
        ) {
            let out = fit_dimensions(source, bounds, allow_upscale);
            prop_assert!(
                aspect_within_one_pixel(source, out),
                "source {:?} -> {:?}", source, out
            );
        }

        /// Property: One edge touches its bound whenever the image had to shrink.
        #[test]
        fn prop_fit_touches_a_bound_when_shrinking(
            source in source_strategy(),
            bounds in bounds_strategy(),
        ) {
            prop_assume!(source.0 > bounds.0 || source.1 > bounds.1);
            let (w, h) = fit_dimensions(source, bounds, false);
            prop_assert!(w == bounds.0 || h == bounds.1);
        }

        /// Property: A zero bound leaves that axis free and keeps the ratio.
        #[test]
        fn prop_fit_zero_bound_is_proportional(
            source in source_strategy(),
            max_h in 1u32..=2000,
        ) {
            let out = fit_dimensions(source, (0, max_h), true);
            prop_assert_eq!(out.1, max_h);
            prop_assert!(aspect_within_one_pixel(source, out));
        }
    }
}
