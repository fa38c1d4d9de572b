//! Auto font sizing for text that follows a path.

use super::{FontSpec, TextMeasurer};

/// Smallest size the search will return.
pub const MIN_FONT_SIZE: u32 = 12;

/// Largest size the search will consider.
pub const MAX_FONT_SIZE: u32 = 60;

/// Headroom multiplier applied to the measured width.
pub const FIT_MARGIN: f32 = 1.1;

/// Find the largest font size at which `text` fits along a path.
///
/// A size fits when the sum of the individual character widths, times
/// [`FIT_MARGIN`], is at most `path_length`. Binary search over the integer
/// sizes `MIN_FONT_SIZE..=MAX_FONT_SIZE`, so at most `log2(49) + 1`
/// measurements are made.
///
/// # Returns
///
/// The largest fitting size, or [`MIN_FONT_SIZE`] when nothing fits (including
/// empty paths).
pub fn calculate_optimal_font_size(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontSpec,
    path_length: f32,
) -> f32 {
    let fits = |size: u32| {
        let total: f32 = measurer.char_widths(text, font, size as f32).iter().sum();
        total * FIT_MARGIN <= path_length
    };

    let mut low = MIN_FONT_SIZE;
    let mut high = MAX_FONT_SIZE;
    let mut best = MIN_FONT_SIZE;

    while low <= high {
        let mid = low + (high - low) / 2;
        if fits(mid) {
            best = mid;
            low = mid + 1;
        } else if mid == MIN_FONT_SIZE {
            break;
        } else {
            high = mid - 1;
        }
    }

    best as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::BoxGlyphs;
    use std::cell::Cell;

    #[test]
    fn test_fits_exactly() {
        // 10 chars at 0.5*size each: 5*size*1.1 <= 166 -> size <= 30
        let glyphs = BoxGlyphs::proportional(0.5);
        let size = calculate_optimal_font_size(&glyphs, "ABCDEFGHIJ", &FontSpec::default(), 166.0);
        assert_eq!(size, 30.0);
    }

    #[test]
    fn test_caps_at_max() {
        let glyphs = BoxGlyphs::proportional(0.5);
        let size = calculate_optimal_font_size(&glyphs, "Hi", &FontSpec::default(), 10_000.0);
        assert_eq!(size, MAX_FONT_SIZE as f32);
    }

    #[test]
    fn test_returns_min_when_nothing_fits() {
        let glyphs = BoxGlyphs::proportional(0.5);
        let long = "A very long caption that cannot possibly fit";
        let size = calculate_optimal_font_size(&glyphs, long, &FontSpec::default(), 20.0);
        assert_eq!(size, MIN_FONT_SIZE as f32);

        let size = calculate_optimal_font_size(&glyphs, "AB", &FontSpec::default(), 0.0);
        assert_eq!(size, MIN_FONT_SIZE as f32);
    }

    #[test]
    fn test_empty_text_fits_at_max() {
        let glyphs = BoxGlyphs::proportional(0.5);
        let size = calculate_optimal_font_size(&glyphs, "", &FontSpec::default(), 50.0);
        assert_eq!(size, MAX_FONT_SIZE as f32);
    }

    struct CountingMeasurer {
        inner: BoxGlyphs,
        calls: Cell<usize>,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure(&self, text: &str, font: &FontSpec, size: f32) -> crate::geometry::Size {
            self.inner.measure(text, font, size)
        }

        fn char_widths(&self, text: &str, font: &FontSpec, size: f32) -> Vec<f32> {
            self.calls.set(self.calls.get() + 1);
            self.inner.char_widths(text, font, size)
        }
    }

    #[test]
    fn test_logarithmic_measurement_count() {
        let measurer = CountingMeasurer {
            inner: BoxGlyphs::proportional(0.5),
            calls: Cell::new(0),
        };
        calculate_optimal_font_size(&measurer, "Hello", &FontSpec::default(), 120.0);
        assert!(measurer.calls.get() <= 6, "{} measurements", measurer.calls.get());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::BoxGlyphs;
    use proptest::prelude::*;

    proptest! {
        /// Property: the result is the largest fitting size in range.
        #[test]
        fn prop_result_is_largest_fit(
            text in "[A-Za-z ]{1,30}",
            ratio in 0.2f32..1.0,
            length in 0.0f32..3000.0,
        ) {
            let glyphs = BoxGlyphs::proportional(ratio);
            let font = FontSpec::default();
            let size = calculate_optimal_font_size(&glyphs, &text, &font, length);

            prop_assert!(size >= MIN_FONT_SIZE as f32 && size <= MAX_FONT_SIZE as f32);

            let width_at = |s: f32| -> f32 { glyphs.char_widths(&text, &font, s).iter().sum() };
            if width_at(size) * FIT_MARGIN <= length && size < MAX_FONT_SIZE as f32 {
                prop_assert!(width_at(size + 1.0) * FIT_MARGIN > length);
            }
        }

        /// Property: a longer path never yields a smaller font.
        #[test]
        fn prop_monotonic_in_path_length(
            text in "[A-Za-z]{1,20}",
            ratio in 0.2f32..1.0,
            a in 0.0f32..3000.0,
            b in 0.0f32..3000.0,
        ) {
            let glyphs = BoxGlyphs::proportional(ratio);
            let font = FontSpec::default();
            let (short, long) = if a <= b { (a, b) } else { (b, a) };

            let s1 = calculate_optimal_font_size(&glyphs, &text, &font, short);
            let s2 = calculate_optimal_font_size(&glyphs, &text, &font, long);
            prop_assert!(s1 <= s2);
        }
    }
}
