//! Stress from rapid same-column repetition.

use rayon::prelude::*;

use crate::{
    difficulty::smooth,
    model::{Note, NoteModel},
};

/// Delta recorded where no same-column pair covers the timestep:
/// effectively "no recent note", so its `1/delta` weight vanishes.
pub(crate) const DELTA_SENTINEL: f64 = 1e9;

/// Gap length (seconds) the nerf is centered on. Vibro-speed repetition
/// around this gap is rated far below what the raw gap term would claim.
const NERF_CENTER: f64 = 0.08;
const NERF_SCALE: f64 = 7e-5;

/// Difficulty-dependent offset scale in the base gap term.
const GAP_OFFSET: f64 = 0.11;

/// Exponent of the across-column power mean.
const MEAN_EXPONENT: i32 = 5;

pub(crate) struct JackBar {
    /// The aggregated stress curve.
    pub bar: Vec<f64>,
    /// Per-column gap side tables, consumed by the anchor bar.
    pub deltas: Vec<Vec<f64>>,
}

pub(crate) fn compute(model: &NoteModel, x: f64) -> JackBar {
    let len_ms = model.len_ms;

    // Columns are independent; the merge below walks them in index order, so
    // the result does not depend on scheduling.
    let per_column: Vec<(Vec<f64>, Vec<f64>)> = model
        .columns
        .par_iter()
        .map(|notes| column_stress(notes, len_ms, x))
        .collect();

    let mut bar = Vec::with_capacity(len_ms);

    for t in 0..len_ms {
        let mut weighted = 0.0;
        let mut weight = 0.0;

        for (stress, deltas) in &per_column {
            let w = deltas[t].recip();
            weighted += stress[t].max(0.0).powi(MEAN_EXPONENT) * w;
            weight += w;
        }

        bar.push((weighted / weight.max(1e-9)).powf(1.0 / f64::from(MEAN_EXPONENT)));
    }

    let deltas = per_column.into_iter().map(|(_, deltas)| deltas).collect();

    JackBar { bar, deltas }
}

/// Smoothed raw stress plus the gap side table for one column.
fn column_stress(notes: &[Note], len_ms: usize, x: f64) -> (Vec<f64>, Vec<f64>) {
    let mut stress = vec![0.0; len_ms];
    let mut deltas = vec![DELTA_SENTINEL; len_ms];
    let offset = GAP_OFFSET * x.powf(0.25);

    for pair in notes.windows(2) {
        let delta = f64::from(pair[1].start_time - pair[0].start_time) / 1000.0;

        if delta < 1e-9 {
            continue;
        }

        let val = jack_nerfer(delta) / (delta * (delta + offset));
        let range = pair[0].start_time as usize..pair[1].start_time as usize;

        stress[range.clone()].fill(val);
        deltas[range].fill(delta);
    }

    (smooth::smooth_sum(&stress), deltas)
}

/// Inverse-quartic falloff toward [`NERF_CENTER`].
fn jack_nerfer(delta: f64) -> f64 {
    1.0 - NERF_SCALE * (0.15 + (delta - NERF_CENTER).abs()).powi(-4)
}
