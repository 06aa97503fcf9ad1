//! Stress from hits crossing adjacent column boundaries.

use rayon::prelude::*;

use crate::{
    difficulty::smooth,
    model::{Note, NoteModel},
};

const BASE: f64 = 0.16;

/// There are `K + 1` boundaries; each one merges the notes of the one or two
/// columns touching it, rates the merged gaps, and contributes with its
/// weight from the key interaction table.
pub(crate) fn compute(model: &NoteModel, weights: &'static [f64], x: f64) -> Vec<f64> {
    let len_ms = model.len_ms;
    let key_count = model.key_count;

    let boundaries: Vec<Vec<f64>> = (0..=key_count)
        .into_par_iter()
        .map(|boundary| boundary_stress(model, boundary, x))
        .collect();

    let mut base = vec![0.0; len_ms];

    for (curve, &weight) in boundaries.iter().zip(weights) {
        for (acc, v) in base.iter_mut().zip(curve) {
            *acc += weight * v;
        }
    }

    smooth::smooth_sum(&base)
}

fn boundary_stress(model: &NoteModel, boundary: usize, x: f64) -> Vec<f64> {
    let left = boundary
        .checked_sub(1)
        .map(|col| &*model.columns[col])
        .unwrap_or_default();
    let right = model
        .columns
        .get(boundary)
        .map(|col| &**col)
        .unwrap_or_default();

    let merged = merge_by_start(left, right);
    let mut stress = vec![0.0; model.len_ms];

    for pair in merged.windows(2) {
        let delta = f64::from(pair[1].start_time - pair[0].start_time) / 1000.0;
        // `max(x, delta)` caps the stress of near-coincident hits.
        let val = BASE / x.max(delta).powi(2);

        stress[pair[0].start_time as usize..pair[1].start_time as usize].fill(val);
    }

    stress
}

fn merge_by_start(left: &[Note], right: &[Note]) -> Vec<Note> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if left[i].start_time <= right[j].start_time {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }

    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_time_order() {
        let left = [Note::new(0, 100), Note::new(0, 300)];
        let right = [Note::new(1, 100), Note::new(1, 200)];

        let starts: Vec<_> = merge_by_start(&left, &right)
            .iter()
            .map(|n| n.start_time)
            .collect();

        assert_eq!(starts, [100, 100, 200, 300]);
    }

    #[test]
    fn tighter_gaps_raise_the_bar() {
        let x = 0.09;

        let tight = NoteModel::new(
            &[Note::new(0, 0), Note::new(1, 150), Note::new(0, 300)],
            4,
        )
        .unwrap();
        let wide = NoteModel::new(
            &[Note::new(0, 0), Note::new(1, 900), Note::new(0, 1800)],
            4,
        )
        .unwrap();

        let weights = crate::difficulty::key_table::boundary_weights(4).unwrap();

        let peak = |model: &NoteModel| {
            compute(model, weights, x)
                .iter()
                .copied()
                .fold(0.0, f64::max)
        };

        assert!(peak(&tight) > peak(&wide));
    }

    #[test]
    fn coincident_hits_are_capped_not_infinite() {
        let model = NoteModel::new(
            &[Note::new(0, 500), Note::new(1, 500), Note::new(0, 700)],
            2,
        )
        .unwrap();
        let weights = crate::difficulty::key_table::boundary_weights(2).unwrap();

        assert!(compute(&model, weights, 0.09).iter().all(|v| v.is_finite()));
    }
}
