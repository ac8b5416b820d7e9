use super::*;
use tracing::trace;

/// Result of searching a position for one word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Placement {
    pub x: f32,
    pub y: f32,
    pub attempts: usize,
    /// True when no free spot was found and the last candidate was kept.
    pub fallback: bool,
}

/// Draws up to `max_attempts` random top-left corners for a `width` x
/// `height` box inside the canvas and returns the first that clears every
/// box in `placed`. When the budget runs out the last candidate is returned
/// anyway. If the box is larger than the canvas the draw range collapses to
/// zero on that axis and the word sits at the origin edge.
pub(super) fn find_position<R: RandomSource>(
    width: f32,
    height: f32,
    canvas: (f32, f32),
    placed: &[BoundingBox],
    max_attempts: usize,
    rng: &mut R,
) -> Placement {
    let x_range = (canvas.0 - width).max(0.0);
    let y_range = (canvas.1 - height).max(0.0);
    let budget = max_attempts.max(1);

    let mut x = 0.0;
    let mut y = 0.0;
    for attempt in 1..=budget {
        x = rng.range_f32(0.0, x_range);
        y = rng.range_f32(0.0, y_range);
        let candidate = BoundingBox::new(x, y, width, height);
        if !collides(&candidate, placed) {
            return Placement {
                x,
                y,
                attempts: attempt,
                fallback: false,
            };
        }
    }

    Placement {
        x,
        y,
        attempts: budget,
        fallback: true,
    }
}

fn collides(candidate: &BoundingBox, placed: &[BoundingBox]) -> bool {
    placed.iter().any(|other| candidate.overlaps(other))
}

/// Places styled words greedily in input order. Each word sees every word
/// resolved before it.
pub(super) fn place_words<R: RandomSource>(
    words: Vec<NormalizedWord>,
    range: WeightRange,
    canvas: (f32, f32),
    config: &LayoutConfig,
    rng: &mut R,
) -> (Vec<PlacedWord>, LayoutStats) {
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());
    let mut boxes: Vec<BoundingBox> = Vec::with_capacity(words.len());
    let mut stats = LayoutStats::default();

    for word in words {
        let style = style_for(word.weight, range, config);
        let (width, height) = estimate_extent(&word.text, style.font_size, config);
        let spot = find_position(width, height, canvas, &boxes, config.max_attempts, rng);

        stats.attempts += spot.attempts;
        if spot.fallback {
            stats.fallbacks += 1;
            trace!(
                text = %word.text,
                attempts = spot.attempts,
                x = spot.x,
                y = spot.y,
                "no free position, keeping last candidate"
            );
        }

        boxes.push(BoundingBox::new(spot.x, spot.y, width, height));
        placed.push(PlacedWord {
            text: word.text,
            weight: word.weight,
            x: spot.x,
            y: spot.y,
            font_size: style.font_size,
            opacity: style.opacity,
            font_weight: style.font_weight,
            width,
            height,
        });
    }

    (placed, stats)
}
