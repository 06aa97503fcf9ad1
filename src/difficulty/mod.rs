//! The note-sequence-to-star-rating pipeline.

use std::{
    collections::BTreeMap,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use thiserror::Error;

use crate::model::{Note, NoteModel};

mod aggregate;
mod hit_window;
mod key_table;
mod skills;
mod smooth;

pub use key_table::is_key_count_supported;

use aggregate::Bars;
use skills::ActiveColumns;

/// Wall-clock milliseconds spent per pipeline stage.
pub type StageTimings = BTreeMap<&'static str, i64>;

/// Result of one star rating computation.
#[derive(Clone, Debug, PartialEq)]
pub struct StarRating {
    /// The rating, `0.0` for empty charts, `-1.0` when unavailable.
    pub value: f64,
    pub timings: StageTimings,
}

/// Why a computation produced no rating.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum RatingError {
    #[error("key count {0} is not supported")]
    UnsupportedKeyCount(usize),
    #[error("computation was cancelled")]
    Cancelled,
}

/// Cooperative cancellation flag, checked between stages but never inside
/// one.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Computes the star rating with the sentinel-style contract: the call never
/// panics or errors across this boundary.
///
/// Unsupported key counts and internal faults yield `-1.0` (faults
/// additionally carry an `"Error"` timing entry); empty charts yield `0.0`.
/// Callers should treat any negative value as "rating unavailable".
pub fn compute_star_rating(notes: &[Note], key_count: usize, overall_difficulty: f32) -> StarRating {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        try_compute_star_rating(notes, key_count, overall_difficulty, None)
    }));

    match outcome {
        Ok(Ok(rating)) => rating,
        Ok(Err(RatingError::UnsupportedKeyCount(k))) => {
            log::warn!("rejected unsupported key count {k}");

            StarRating {
                value: -1.0,
                timings: StageTimings::new(),
            }
        }
        Ok(Err(RatingError::Cancelled)) => StarRating {
            value: -1.0,
            timings: StageTimings::from([("Cancelled", 0)]),
        },
        Err(_) => {
            log::error!("star rating computation panicked");

            StarRating {
                value: -1.0,
                timings: StageTimings::from([("Error", 0)]),
            }
        }
    }
}

/// The typed variant of [`compute_star_rating`], with optional cooperative
/// cancellation.
pub fn try_compute_star_rating(
    notes: &[Note],
    key_count: usize,
    overall_difficulty: f32,
    cancel: Option<&CancelToken>,
) -> Result<StarRating, RatingError> {
    let weights = key_table::boundary_weights(key_count)
        .ok_or(RatingError::UnsupportedKeyCount(key_count))?;

    let total = Instant::now();
    let mut timings = StageTimings::new();

    let started = Instant::now();
    let Some(model) = NoteModel::new(notes, key_count) else {
        return Ok(StarRating {
            value: 0.0,
            timings,
        });
    };
    timings.insert("noteModel", elapsed_ms(started));

    let x = hit_window::hit_window_scale(overall_difficulty);

    check_cancel(cancel)?;

    // J, X, P, and R are independent; A needs J's gap side tables.
    let ((jack, cross), (pattern, release)) = rayon::join(
        || {
            rayon::join(
                || timed(|| skills::jack::compute(&model, x)),
                || timed(|| skills::cross::compute(&model, weights, x)),
            )
        },
        || {
            rayon::join(
                || timed(|| skills::pattern::compute(&model, x)),
                || timed(|| skills::release::compute(&model, x)),
            )
        },
    );

    let (jack, jack_ms) = jack;
    timings.insert("jackBar", jack_ms);
    timings.insert("crossBar", cross.1);
    timings.insert("patternBar", pattern.1);
    timings.insert("releaseBar", release.1);

    check_cancel(cancel)?;

    let started = Instant::now();
    let active = ActiveColumns::new(&model);
    let anchor = skills::anchor::compute(&model, &jack.deltas, &active);
    timings.insert("anchorBar", elapsed_ms(started));

    check_cancel(cancel)?;

    let bars = Bars {
        jack: jack.bar,
        cross: cross.0,
        pattern: pattern.0,
        anchor,
        release: release.0,
        active,
    };

    let started = Instant::now();
    let value = aggregate::star_rating(&model, &bars);
    timings.insert("aggregate", elapsed_ms(started));
    timings.insert("total", elapsed_ms(total));

    log::debug!(
        "rated {} notes ({key_count}K, od {overall_difficulty}): {value:.4} stars in {}ms",
        notes.len(),
        timings["total"],
    );

    Ok(StarRating { value, timings })
}

fn check_cancel(cancel: Option<&CancelToken>) -> Result<(), RatingError> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(RatingError::Cancelled),
        _ => Ok(()),
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, i64) {
    let started = Instant::now();
    let value = f();

    (value, elapsed_ms(started))
}

fn elapsed_ms(started: Instant) -> i64 {
    started.elapsed().as_millis() as i64
}
