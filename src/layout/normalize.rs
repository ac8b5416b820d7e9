use super::*;

/// Resolves every input to a `NormalizedWord`, keeping order and count.
/// Words without a usable weight draw one uniformly from the configured
/// fallback range.
pub(super) fn normalize_words<R: RandomSource>(
    words: &[WordInput],
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<NormalizedWord> {
    words
        .iter()
        .map(|word| {
            let weight = match word.usable_weight() {
                Some(weight) => weight,
                None => rng.int_inclusive(config.fallback_weight_min, config.fallback_weight_max)
                    as f64,
            };
            NormalizedWord {
                text: word.text().to_string(),
                weight,
            }
        })
        .collect()
}
