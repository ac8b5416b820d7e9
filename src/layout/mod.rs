mod normalize;
mod placement;
mod sizing;
pub(crate) mod types;
pub use sizing::{WeightRange, estimate_extent, style_for};
pub use types::*;
use normalize::*;
use placement::*;

use crate::config::LayoutConfig;
use crate::ir::WordInput;
use crate::random::{RandomSource, SeededRng};
use tracing::debug;

/// Lays out `words` on a `width` x `height` canvas.
///
/// Runs normalization, size mapping and randomized placement in that order.
/// The output has one entry per input, in input order. All state lives in
/// this call; `rng` is the only thing carried between calls.
pub fn compute_layout<R: RandomSource>(
    words: &[WordInput],
    width: f32,
    height: f32,
    config: &LayoutConfig,
    rng: &mut R,
) -> Layout {
    let config = config.sanitized();
    let width = sanitize_extent(width);
    let height = sanitize_extent(height);

    let normalized = normalize_words(words, &config, rng);
    let Some(range) = WeightRange::of(&normalized) else {
        return Layout {
            width,
            height,
            words: Vec::new(),
            stats: LayoutStats::default(),
        };
    };

    let (placed, stats) = place_words(normalized, range, (width, height), &config, rng);
    debug!(
        words = placed.len(),
        width,
        height,
        min_weight = range.min,
        max_weight = range.max,
        attempts = stats.attempts,
        fallbacks = stats.fallbacks,
        "word cloud layout complete"
    );

    Layout {
        width,
        height,
        words: placed,
        stats,
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Reusable entry point holding a layout configuration.
///
/// The engine itself is immutable; every call builds its own accumulator,
/// so one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out with a freshly seeded, non-deterministic generator.
    pub fn layout(&self, words: &[WordInput], width: f32, height: f32) -> Vec<PlacedWord> {
        let mut rng = SeededRng::from_entropy();
        self.layout_with_rng(words, width, height, &mut rng).words
    }

    pub fn layout_with_rng<R: RandomSource>(
        &self,
        words: &[WordInput],
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Layout {
        compute_layout(words, width, height, &self.config, rng)
    }

    /// Reproducible layout for a given seed.
    pub fn layout_seeded(&self, words: &[WordInput], width: f32, height: f32, seed: u64) -> Layout {
        let mut rng = SeededRng::new(seed);
        self.layout_with_rng(words, width, height, &mut rng)
    }
}
