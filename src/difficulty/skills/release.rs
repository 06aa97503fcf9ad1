//! Stress from hold-note release timing.

use crate::{
    difficulty::smooth,
    model::{Note, NoteModel},
};

/// Gap a release wants to sit at, both from its own head and to the next
/// note in the column.
const IDEAL_GAP_MS: f64 = 80.0;

const BASE: f64 = 0.08;
const INDEX_WEIGHT: f64 = 0.8;

pub(crate) fn compute(model: &NoteModel, x: f64) -> Vec<f64> {
    smooth::smooth_sum(&raw_stress(model, x))
}

/// Unsmoothed fill: each consecutive release pair (ordered by release time)
/// covers the interval between the two releases.
pub(crate) fn raw_stress(model: &NoteModel, x: f64) -> Vec<f64> {
    let scores: Vec<_> = model
        .tails
        .iter()
        .map(|ln| interaction_index(model, ln, x))
        .collect();

    let mut stress = vec![0.0; model.len_ms];

    for (i, pair) in model.tails.windows(2).enumerate() {
        let delta = f64::from(pair[1].end_time - pair[0].end_time) / 1000.0;

        if delta < 1e-9 {
            continue;
        }

        let val = BASE / (delta.sqrt() * x) * (1.0 + INDEX_WEIGHT * (scores[i] + scores[i + 1]));

        stress[pair[0].end_time as usize..pair[1].end_time as usize].fill(val);
    }

    stress
}

/// How awkward this hold's release timing is, in `[0, 1]`.
///
/// Two deviation scores against the 80 ms ideal (hold body length, and the
/// gap to the next note in the column) feed a pair of exponential sigmoids;
/// both near-ideal pushes the index toward zero.
fn interaction_index(model: &NoteModel, ln: &Note, x: f64) -> f64 {
    let pre = deviation(f64::from(ln.end_time - ln.start_time), x);
    let post = next_in_column(model, ln)
        .map(|next| deviation(f64::from(next.start_time - ln.end_time), x))
        .unwrap_or(0.0);

    2.0 / (2.0 + (-5.0 * (pre - 0.75)).exp() + (-5.0 * (post - 0.75)).exp())
}

fn deviation(gap_ms: f64, x: f64) -> f64 {
    0.001 * (gap_ms - IDEAL_GAP_MS).abs() / x
}

fn next_in_column<'m>(model: &'m NoteModel, ln: &Note) -> Option<&'m Note> {
    let column = &model.columns[ln.column as usize];
    let idx = column.partition_point(|n| n.start_time <= ln.start_time);

    column.get(idx)
}
