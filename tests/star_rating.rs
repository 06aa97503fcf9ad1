use mania_sr::{compute_star_rating, is_key_count_supported, Note};

use proptest::prelude::*;

const SUPPORTED: [usize; 14] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 16, 18];

fn staircase_4k() -> Vec<Note> {
    vec![
        Note::new(0, 1000),
        Note::new(1, 1500),
        Note::new(2, 2000),
        Note::new(3, 2500),
    ]
}

#[test]
fn empty_chart_rates_zero_for_every_supported_key_count() {
    for k in SUPPORTED {
        let rating = compute_star_rating(&[], k, 5.0);

        assert_eq!(rating.value, 0.0, "{k}K");
    }
}

#[test]
fn unsupported_key_count_yields_minus_one() {
    let rating = compute_star_rating(&staircase_4k(), 11, 5.0);

    assert_eq!(rating.value, -1.0);
    assert!(!rating.timings.contains_key("total"));
}

#[test]
fn staircase_scenario_is_small_and_reproducible() {
    let notes = staircase_4k();
    let first = compute_star_rating(&notes, 4, 5.0);

    assert!(first.value.is_finite());
    assert!(first.value >= 0.0);
    // Four widely spaced notes sit near the low-stress asymptote.
    assert!(first.value < 2.0, "got {}", first.value);

    for _ in 0..5 {
        let again = compute_star_rating(&notes, 4, 5.0);
        assert!((again.value - first.value).abs() < 1e-6);
    }
}

#[test]
fn result_does_not_depend_on_thread_count() {
    let notes: Vec<_> = (0..200)
        .map(|i| Note::new((i % 7) as u32, i * 37))
        .collect();

    let serial = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| compute_star_rating(&notes, 7, 8.0));

    let parallel = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| compute_star_rating(&notes, 7, 8.0));

    assert_eq!(serial.value.to_bits(), parallel.value.to_bits());
}

#[test]
fn single_note_rates_deterministically_small() {
    let rating = compute_star_rating(&[Note::new(2, 5000)], 4, 5.0);

    assert!(rating.value >= 0.0);
    assert!(rating.value < 0.1);
    assert_eq!(
        rating.value,
        compute_star_rating(&[Note::new(2, 5000)], 4, 5.0).value,
    );
}

#[test]
fn faster_charts_rate_higher_than_slow_ones() {
    let fast: Vec<_> = (0..64)
        .map(|i| Note::new((i % 4) as u32, i * 60))
        .collect();
    let slow: Vec<_> = (0..64)
        .map(|i| Note::new((i % 4) as u32, i * 1200))
        .collect();

    let fast_sr = compute_star_rating(&fast, 4, 5.0).value;
    let slow_sr = compute_star_rating(&slow, 4, 5.0).value;

    assert!(fast_sr > slow_sr, "fast {fast_sr} vs slow {slow_sr}");
}

#[test]
fn hold_releases_contribute_to_the_rating() {
    let rice: Vec<_> = (0..48).map(|i| Note::new((i % 4) as u32, i * 150)).collect();
    let holds: Vec<_> = (0..48)
        .map(|i| Note::hold((i % 4) as u32, i * 150, i * 150 + 120))
        .collect();

    let rice_sr = compute_star_rating(&rice, 4, 5.0).value;
    let holds_sr = compute_star_rating(&holds, 4, 5.0).value;

    assert!(holds_sr > rice_sr, "holds {holds_sr} vs rice {rice_sr}");
}

#[test]
fn timings_cover_every_stage() {
    let rating = compute_star_rating(&staircase_4k(), 4, 5.0);

    for stage in [
        "noteModel",
        "jackBar",
        "crossBar",
        "patternBar",
        "anchorBar",
        "releaseBar",
        "aggregate",
        "total",
    ] {
        assert!(rating.timings.contains_key(stage), "missing {stage}");
    }
}

fn chart_strategy() -> impl Strategy<Value = (usize, Vec<Note>)> {
    (1usize..=20).prop_flat_map(|key_count| {
        let note = (0..key_count as u32, 0..30_000i32, prop::option::of(1..2_500i32)).prop_map(
            |(column, start, hold)| match hold {
                Some(len) => Note::hold(column, start, start + len),
                None => Note::new(column, start),
            },
        );

        (
            Just(key_count),
            prop::collection::vec(note, 0..40),
        )
    })
}

proptest! {
    #[test]
    fn rating_is_finite_nonnegative_or_exactly_minus_one((key_count, notes) in chart_strategy()) {
        let rating = compute_star_rating(&notes, key_count, 7.0);

        if !is_key_count_supported(key_count) {
            prop_assert_eq!(rating.value, -1.0);
        } else if notes.is_empty() {
            prop_assert_eq!(rating.value, 0.0);
        } else {
            prop_assert!(rating.value.is_finite());
            prop_assert!(rating.value >= 0.0);
        }
    }
}
