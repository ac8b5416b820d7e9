use wordcloud_rs_renderer::layout::{BoundingBox, estimate_extent};
use wordcloud_rs_renderer::{FontWeight, LayoutConfig, LayoutEngine, PlacedWord, WordInput};

const TRIALS: u64 = 100;

fn weighted(pairs: &[(&str, f64)]) -> Vec<WordInput> {
    pairs.iter().map(|&pair| WordInput::from(pair)).collect()
}

fn mixed_inputs(seed: u64) -> Vec<WordInput> {
    let count = (seed % 25) as usize;
    (0..count)
        .map(|i| match (i + seed as usize) % 4 {
            0 => WordInput::from(format!("bare{i}")),
            1 => WordInput::weighted(format!("w{i}"), (i as f64 + 1.0) * 1.5),
            2 => WordInput::weighted(format!("zero{i}"), 0.0),
            _ => WordInput::Weighted {
                text: format!("none{i}"),
                weight: None,
            },
        })
        .collect()
}

fn boxes_overlap(a: &PlacedWord, b: &PlacedWord) -> bool {
    a.bounding_box().overlaps(&b.bounding_box())
}

#[test]
fn count_is_preserved() {
    let engine = LayoutEngine::default();
    for seed in 0..TRIALS {
        let input = mixed_inputs(seed);
        let layout = engine.layout_seeded(&input, 800.0, 500.0, seed);
        assert_eq!(layout.words.len(), input.len(), "seed {seed}");
        for (word, source) in layout.words.iter().zip(&input) {
            assert_eq!(word.text, source.text());
        }
    }
}

#[test]
fn sizes_and_opacity_stay_in_bounds() {
    let engine = LayoutEngine::default();
    for seed in 0..TRIALS {
        let layout = engine.layout_seeded(&mixed_inputs(seed), 640.0, 480.0, seed);
        for word in &layout.words {
            assert!((14.0..=48.0).contains(&word.font_size), "{}", word.font_size);
            assert!(
                (0.7 - 1e-6..=1.0 + 1e-6).contains(&word.opacity),
                "{}",
                word.opacity
            );
            assert!(word.x.is_finite() && word.y.is_finite());
        }
    }
}

#[test]
fn size_and_opacity_are_monotonic_in_weight() {
    let engine = LayoutEngine::default();
    let input = weighted(&[("a", 3.0), ("b", 1.0), ("c", 7.5), ("d", 7.5), ("e", 20.0)]);
    for seed in 0..20 {
        let layout = engine.layout_seeded(&input, 800.0, 500.0, seed);
        let mut words = layout.words.clone();
        words.sort_by(|l, r| l.weight.total_cmp(&r.weight));
        for pair in words.windows(2) {
            assert!(pair[0].font_size <= pair[1].font_size);
            assert!(pair[0].opacity <= pair[1].opacity);
        }
    }
}

#[test]
fn equal_weights_share_one_finite_size() {
    let engine = LayoutEngine::default();
    for n in 1..6 {
        let input: Vec<WordInput> = (0..n).map(|i| WordInput::weighted(format!("eq{i}"), 4.0)).collect();
        let layout = engine.layout_seeded(&input, 800.0, 500.0, n as u64);
        let first = layout.words[0].font_size;
        assert!(first.is_finite());
        assert!(layout.words.iter().all(|w| w.font_size == first));
        assert!(layout.words.iter().all(|w| w.opacity.is_finite()));
    }
}

#[test]
fn sub_unit_weights_span_the_full_font_range() {
    let engine = LayoutEngine::default();
    let cases: [&[(&str, f64)]; 3] = [
        &[("ab", 1e-8), ("cd", 5e-8)],
        &[("ab", 0.5), ("cd", 0.5000001)],
        &[("low", 0.001), ("mid", 0.002), ("high", 0.003)],
    ];
    for (seed, pairs) in cases.iter().enumerate() {
        let words = engine.layout_seeded(&weighted(pairs), 800.0, 500.0, seed as u64).words;
        let last = words.len() - 1;
        assert_eq!(words[0].font_size, 14.0, "case {seed}");
        assert_eq!(words[last].font_size, 48.0, "case {seed}");
        assert_eq!(words[last].font_weight, FontWeight::Bold, "case {seed}");
    }
}

#[test]
fn small_sets_rarely_overlap() {
    let engine = LayoutEngine::default();
    let input = weighted(&[("ab", 5.0), ("cd", 5.0), ("ef", 5.0)]);
    let clean = (0..TRIALS)
        .filter(|&seed| {
            let words = engine.layout_seeded(&input, 800.0, 500.0, seed).words;
            (0..words.len()).all(|i| ((i + 1)..words.len()).all(|j| !boxes_overlap(&words[i], &words[j])))
        })
        .count();
    assert!(clean >= 95, "only {clean} of {TRIALS} layouts were overlap-free");
}

#[test]
fn words_stay_inside_a_roomy_canvas() {
    let engine = LayoutEngine::default();
    let config = LayoutConfig::default();
    let input = weighted(&[("rust", 10.0), ("layout", 4.0), ("cloud", 1.0), ("svg", 6.0)]);
    for seed in 0..TRIALS {
        for word in engine.layout_seeded(&input, 1000.0, 700.0, seed).words {
            let (w, h) = estimate_extent(&word.text, word.font_size, &config);
            assert!(word.x >= 0.0 && word.x <= 1000.0 - w, "x {} w {w}", word.x);
            assert!(word.y >= 0.0 && word.y <= 700.0 - h, "y {} h {h}", word.y);
            assert_eq!((word.width, word.height), (w, h));
        }
    }
}

#[test]
fn tiny_canvas_still_places_everything() {
    let engine = LayoutEngine::default();
    let input = weighted(&[("a very long label indeed", 10.0), ("mid", 5.0), ("x", 1.0)]);
    for seed in 0..20 {
        let layout = engine.layout_seeded(&input, 30.0, 10.0, seed);
        assert_eq!(layout.words.len(), 3);
        for word in &layout.words {
            assert!(word.x >= 0.0 && word.y >= 0.0);
            assert!(word.x.is_finite() && word.y.is_finite());
        }
        assert_eq!(layout.words[0].x, 0.0);
        assert_eq!(layout.words[0].y, 0.0);
    }
    let zero = engine.layout_seeded(&input, 0.0, 0.0, 1);
    assert_eq!(zero.words.len(), 3);
}

#[test]
fn two_word_scenario() {
    let engine = LayoutEngine::default();
    let input = weighted(&[("ab", 1.0), ("cd", 10.0)]);
    for seed in 0..10 {
        let words = engine.layout_seeded(&input, 800.0, 500.0, seed).words;
        assert_eq!(words[0].font_size, 14.0);
        assert_eq!(words[1].font_size, 48.0);
        assert!((words[0].opacity - 0.7).abs() < 1e-6);
        assert!((words[1].opacity - 1.0).abs() < 1e-6);
        assert_eq!(words[0].font_weight, FontWeight::Normal);
        assert_eq!(words[1].font_weight, FontWeight::Bold);
    }
}

#[test]
fn non_overlapping_layouts_report_no_fallbacks() {
    let engine = LayoutEngine::default();
    let input = weighted(&[("one", 1.0), ("two", 2.0)]);
    let layout = engine.layout_seeded(&input, 2000.0, 2000.0, 3);
    if layout.stats.fallbacks == 0 {
        let a = BoundingBox::new(
            layout.words[0].x,
            layout.words[0].y,
            layout.words[0].width,
            layout.words[0].height,
        );
        assert!(!a.overlaps(&layout.words[1].bounding_box()));
    }
}
