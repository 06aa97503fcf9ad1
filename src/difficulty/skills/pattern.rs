//! Stress from the global gaps between consecutive notes, modulated by how
//! much hold-note body overlaps each gap.

use crate::{
    difficulty::smooth,
    model::NoteModel,
    util::math::{prefix_sums, range_sum},
};

/// Head grace period of a hold body: the first 80 ms only half-count.
const BODY_GRACE_MS: usize = 80;
const BODY_GRACE_WEIGHT: f64 = 0.5;

/// Occupancy bonus per millisecond of hold body covering a gap.
const OCCUPANCY_RATE: f64 = 0.006;

/// Band (in `7.5 / delta` units, roughly beats per minute) where the stream
/// booster bump is active.
const BOOST_LOW: f64 = 160.0;
const BOOST_HIGH: f64 = 360.0;

pub(crate) fn compute(model: &NoteModel, x: f64) -> Vec<f64> {
    let bodies = LnBodies::new(model);
    let mut stress = vec![0.0; model.len_ms];

    for pair in model.notes.windows(2) {
        let prev = pair[0].start_time as usize;
        let curr = pair[1].start_time as usize;
        let delta = (curr - prev) as f64 / 1000.0;

        if delta < 1e-9 {
            // Chorded hits: all the pressure lands on one instant.
            stress[prev] += 1000.0 * (0.02 * (4.0 / x - 24.0)).powf(0.25);
            continue;
        }

        // Below the regime boundary the gap term peaks at delta = x/2; past
        // it the expression is frozen at its boundary value.
        let inner = if delta < 2.0 * x / 3.0 {
            1.0 - 24.0 / x * (delta - x / 2.0).powi(2)
        } else {
            1.0 - 24.0 / x * (x / 6.0).powi(2)
        };

        let occupancy = 1.0 + OCCUPANCY_RATE * bodies.sum(prev, curr);
        let val = (0.08 / x * inner).powf(0.25) / delta * stream_booster(delta) * occupancy;

        stress[prev..curr].fill(val);
    }

    smooth::smooth_sum(&stress)
}

/// S-shaped bump for gaps whose implied rate sits in the stream band.
fn stream_booster(delta: f64) -> f64 {
    let rate = 7.5 / delta;

    if rate > BOOST_LOW && rate < BOOST_HIGH {
        1.0 + 1.7e-7 * (rate - BOOST_LOW) * (rate - BOOST_HIGH).powi(2)
    } else {
        1.0
    }
}

/// Per-millisecond hold-body weight, prefix-summed so a gap's total
/// occupancy is one subtraction.
pub(crate) struct LnBodies {
    prefix: Vec<f64>,
}

impl LnBodies {
    pub fn new(model: &NoteModel) -> Self {
        let mut body = vec![0.0; model.len_ms];

        for ln in model.tails.iter() {
            let head = ln.start_time as usize;
            let tail = ln.end_time as usize;
            let grace = (head + BODY_GRACE_MS).min(tail);

            for w in &mut body[head..grace] {
                *w += BODY_GRACE_WEIGHT;
            }

            for w in &mut body[grace..tail] {
                *w += 1.0;
            }
        }

        Self {
            prefix: prefix_sums(&body),
        }
    }

    /// Total body weight over `[start, end)` in milliseconds.
    pub fn sum(&self, start: usize, end: usize) -> f64 {
        range_sum(&self.prefix, start, end)
    }
}
