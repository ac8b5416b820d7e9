use super::*;

/// Weight extent of one layout call, computed once over the whole set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl WeightRange {
    pub fn of(words: &[NormalizedWord]) -> Option<Self> {
        let mut iter = words.iter().map(|word| word.weight);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), w| (lo.min(w), hi.max(w)));
        Some(Self { min, max })
    }

    /// True only when every weight is identical. Any positive span, however
    /// small, still spreads words over the full font range.
    pub fn is_flat(&self) -> bool {
        !(self.max - self.min > 0.0)
    }
}

/// Linear min-max mapping of weight to font size, then opacity and weight
/// class from the size. A flat range maps every word to the mid size.
pub fn style_for(weight: f64, range: WeightRange, config: &LayoutConfig) -> WordStyle {
    let min_size = config.min_font_size;
    let max_size = config.max_font_size;
    let size_span = max_size - min_size;

    let font_size = if range.is_flat() {
        config.mid_font_size()
    } else {
        let t = ((weight - range.min) / (range.max - range.min)).clamp(0.0, 1.0);
        min_size + t as f32 * size_span
    };

    let opacity = if size_span > 0.0 {
        let t = ((font_size - min_size) / size_span).clamp(0.0, 1.0);
        config.min_opacity + t * (config.max_opacity - config.min_opacity)
    } else {
        config.max_opacity
    };

    let font_weight = if font_size > config.mid_font_size() {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };

    WordStyle {
        font_size,
        opacity,
        font_weight,
    }
}

/// Estimated footprint of `text` at `font_size`: a fixed advance per
/// character and one em of height.
pub fn estimate_extent(text: &str, font_size: f32, config: &LayoutConfig) -> (f32, f32) {
    let chars = text.chars().count() as f32;
    (chars * font_size * config.char_width_ratio, font_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, weight: f64) -> NormalizedWord {
        NormalizedWord {
            text: text.to_string(),
            weight,
        }
    }

    #[test]
    fn range_spans_whole_set() {
        let words = [word("a", 4.0), word("b", 1.0), word("c", 9.0)];
        assert_eq!(
            WeightRange::of(&words),
            Some(WeightRange { min: 1.0, max: 9.0 })
        );
        assert_eq!(WeightRange::of(&[]), None);
    }

    #[test]
    fn extremes_hit_font_bounds() {
        let config = LayoutConfig::default();
        let range = WeightRange { min: 1.0, max: 10.0 };
        let low = style_for(1.0, range, &config);
        let high = style_for(10.0, range, &config);
        assert_eq!(low.font_size, 14.0);
        assert_eq!(low.opacity, 0.7);
        assert_eq!(low.font_weight, FontWeight::Normal);
        assert_eq!(high.font_size, 48.0);
        assert!((high.opacity - 1.0).abs() < 1e-6);
        assert_eq!(high.font_weight, FontWeight::Bold);
    }

    #[test]
    fn flat_range_uses_mid_size() {
        let config = LayoutConfig::default();
        let range = WeightRange { min: 5.0, max: 5.0 };
        let style = style_for(5.0, range, &config);
        assert_eq!(style.font_size, 31.0);
        assert!(style.opacity.is_finite());
        assert!((style.opacity - 0.85).abs() < 1e-6);
        assert_eq!(style.font_weight, FontWeight::Normal);
    }

    #[test]
    fn tiny_span_is_not_flat() {
        let config = LayoutConfig::default();
        let range = WeightRange::of(&[word("ab", 1e-8), word("cd", 5e-8)]).unwrap();
        assert!(!range.is_flat());
        assert_eq!(style_for(1e-8, range, &config).font_size, 14.0);
        assert_eq!(style_for(5e-8, range, &config).font_size, 48.0);

        let close = WeightRange::of(&[word("a", 0.5), word("b", 0.5000001)]).unwrap();
        assert_eq!(style_for(0.5, close, &config).font_size, 14.0);
        assert_eq!(style_for(0.5000001, close, &config).font_size, 48.0);

        let large = WeightRange::of(&[word("a", 16_777_216.0), word("b", 16_777_217.0)]).unwrap();
        assert!(!large.is_flat());
        assert_eq!(style_for(16_777_217.0, large, &config).font_size, 48.0);
    }

    #[test]
    fn mapping_is_linear_not_logarithmic() {
        let config = LayoutConfig::default();
        let range = WeightRange {
            min: 1.0,
            max: 100.0,
        };
        let style = style_for(12.0, range, &config);
        let expected = 14.0 + (11.0 / 99.0) * 34.0;
        assert!((style.font_size - expected).abs() < 1e-4);
    }

    #[test]
    fn midpoint_is_not_bold() {
        let config = LayoutConfig::default();
        let range = WeightRange { min: 0.0, max: 2.0 };
        assert_eq!(style_for(1.0, range, &config).font_weight, FontWeight::Normal);
        assert_eq!(style_for(1.01, range, &config).font_weight, FontWeight::Bold);
    }

    #[test]
    fn extent_counts_chars_not_bytes() {
        let config = LayoutConfig::default();
        let (w, h) = estimate_extent("héllo", 10.0, &config);
        assert!((w - 30.0).abs() < 1e-4);
        assert_eq!(h, 10.0);
    }
}
