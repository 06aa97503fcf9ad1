//! Multiplicative stability penalty for desynchronized simultaneous
//! columns.

use crate::{
    difficulty::smooth::{self, Mode},
    model::NoteModel,
};

use super::ActiveColumns;

/// Below this desync the tight factor applies, below the looser one a
/// gentler linear factor, otherwise no penalty.
const TIGHT_DESYNC: f64 = 0.02;
const LOOSE_DESYNC: f64 = 0.07;

/// Gap length (seconds) past which the excess-over-threshold term kicks in.
const EXCESS_THRESHOLD: f64 = 0.11;

const RADIUS: usize = 250;

/// Walks every timestep's active columns in index order and compares the
/// recent same-column gaps (from the jack side tables) of each adjacent
/// active pair. Well-synced neighbors with mismatched gaps drag the factor
/// below one.
pub(crate) fn compute(
    model: &NoteModel,
    deltas: &[Vec<f64>],
    active: &ActiveColumns,
) -> Vec<f64> {
    let mut penalty = Vec::with_capacity(model.len_ms);

    for t in 0..model.len_ms {
        let mut factor = 1.0;
        let mut prev_active: Option<usize> = None;

        for col in 0..model.key_count {
            if !active.is_active(col, t) {
                continue;
            }

            if let Some(prev) = prev_active {
                factor *= pair_factor(deltas[prev][t], deltas[col][t]);
            }

            prev_active = Some(col);
        }

        penalty.push(factor);
    }

    smooth::smooth(&penalty, RADIUS, Mode::Average)
}

fn pair_factor(delta_a: f64, delta_b: f64) -> f64 {
    let max_delta = delta_a.max(delta_b);
    let desync = (delta_a - delta_b).abs() + 0.4 * (max_delta - EXCESS_THRESHOLD).max(0.0);

    if desync < TIGHT_DESYNC {
        (0.75 + 0.5 * max_delta).min(1.0)
    } else if desync < LOOSE_DESYNC {
        (0.65 + 5.0 * desync + 0.5 * max_delta).min(1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{difficulty::skills::jack::DELTA_SENTINEL, model::Note};

    #[test]
    fn synced_tight_pairs_are_penalized() {
        // Two columns jacking in lockstep at a 60 ms gap.
        let f = pair_factor(0.06, 0.06);
        assert!(f < 1.0);
        // The penalty weakens as the gaps grow.
        assert!(pair_factor(0.1, 0.1) > f);
    }

    #[test]
    fn large_desync_is_not_penalized() {
        assert_eq!(pair_factor(0.06, 0.3), 1.0);
        assert_eq!(pair_factor(DELTA_SENTINEL, 0.06), 1.0);
    }

    #[test]
    fn idle_timeline_stays_at_one() {
        let notes = [Note::new(0, 600), Note::new(0, 3000)];
        let model = NoteModel::new(&notes, 4).unwrap();
        let active = ActiveColumns::new(&model);
        let deltas = vec![vec![DELTA_SENTINEL; model.len_ms]; model.key_count];

        let bar = compute(&model, &deltas, &active);

        assert!(bar.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }
}
