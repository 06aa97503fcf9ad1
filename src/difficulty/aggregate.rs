//! Final combination of the five bars into one scalar.

use crate::model::NoteModel;

use super::skills::{ActiveColumns, ACTIVE_RADIUS};

/// The five stress curves plus the shared activity flags.
pub(crate) struct Bars {
    pub jack: Vec<f64>,
    pub cross: Vec<f64>,
    pub pattern: Vec<f64>,
    pub anchor: Vec<f64>,
    pub release: Vec<f64>,
    pub active: ActiveColumns,
}

/// Percentile bands read off the weighted CDF of the difficulty curve.
const UPPER_BAND: [f64; 4] = [0.945, 0.935, 0.925, 0.915];
const LOWER_BAND: [f64; 4] = [0.845, 0.835, 0.825, 0.815];

/// Exponent of the whole-curve weighted power mean.
const MEAN_EXPONENT: i32 = 5;

pub(crate) fn star_rating(model: &NoteModel, bars: &Bars) -> f64 {
    let len_ms = model.len_ms;
    let mut density = note_density(model);
    let mut curve = Vec::with_capacity(len_ms);

    for t in 0..len_ms {
        let jack = bars.jack[t].max(0.0);
        let cross = bars.cross[t].max(0.0);
        let pattern = bars.pattern[t].max(0.0);
        let anchor = bars.anchor[t].max(0.0);
        let release = bars.release[t].max(0.0);

        let keys = bars.active.count_at(t) as f64;
        let anchor_jack = anchor.powf(3.0 / keys);

        // Jack-dominant and stream-dominant halves, joined by a 2/3-power
        // mean after a 1.5 raise.
        let capped_jack = jack.min(2.0 + 0.85 * jack);
        let stream = anchor.powf(2.0 / 3.0)
            * (0.8 * pattern + release * 35.0 / (density[t] + 8.0));
        let skill = (0.4 * (anchor_jack * capped_jack).powf(1.5) + 0.6 * stream.powf(1.5))
            .powf(2.0 / 3.0);

        let cross_share = anchor_jack * cross / (cross + skill + 1.0);

        curve.push(2.7 * skill.sqrt() * cross_share.powf(1.5) + 0.27 * skill);
    }

    forward_fill(&mut curve);
    forward_fill(&mut density);

    let mut sr = percentile_reduce(&curve, &density);

    let total_notes = model.notes.len() as f64 + 0.5 * model.hold_count() as f64;
    sr *= total_notes / (total_notes + 60.0);

    if sr > 9.0 {
        sr = 9.0 + (sr - 9.0) / 1.2;
    }

    sr * 0.975
}

/// Count of notes starting within the centered density window of each
/// timestep, via a difference array over the sorted sequence.
fn note_density(model: &NoteModel) -> Vec<f64> {
    let len_ms = model.len_ms;
    let mut diff = vec![0i32; len_ms + 1];

    for note in model.notes.iter() {
        let start = note.start_time as usize;
        diff[start.saturating_sub(ACTIVE_RADIUS)] += 1;
        diff[(start + ACTIVE_RADIUS).min(len_ms)] -= 1;
    }

    let mut density = Vec::with_capacity(len_ms);
    let mut count = 0;

    for d in &diff[..len_ms] {
        count += d;
        density.push(f64::from(count));
    }

    density
}

/// Last-valid-value scan; leading zeros stay zero.
fn forward_fill(values: &mut [f64]) {
    let mut last = 0.0;

    for v in values.iter_mut() {
        if v.is_nan() || *v == 0.0 {
            *v = last;
        } else {
            last = *v;
        }
    }
}

/// Weighted percentile + power mean reduction of the difficulty curve.
fn percentile_reduce(curve: &[f64], weights: &[f64]) -> f64 {
    let mut pairs: Vec<(f64, f64)> = curve
        .iter()
        .copied()
        .zip(weights.iter().copied())
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total: f64 = pairs.iter().map(|(_, w)| w).sum();

    if total <= 0.0 {
        return 0.0;
    }

    let mut cdf = Vec::with_capacity(pairs.len());
    let mut acc = 0.0;

    for (_, w) in &pairs {
        acc += w;
        cdf.push(acc / total);
    }

    // Insertion-point semantics: first index whose cumulative weight is not
    // strictly below the target.
    let value_at = |p: f64| {
        let idx = cdf.partition_point(|&c| c < p).min(pairs.len() - 1);
        pairs[idx].0
    };

    let band_mean =
        |band: &[f64; 4]| band.iter().copied().map(value_at).sum::<f64>() / band.len() as f64;

    let p93 = band_mean(&UPPER_BAND);
    let p83 = band_mean(&LOWER_BAND);

    let power_mean = (pairs
        .iter()
        .map(|(d, w)| d.powi(MEAN_EXPONENT) * w)
        .sum::<f64>()
        / total)
        .powf(1.0 / f64::from(MEAN_EXPONENT));

    let sr = 0.88 * p93 * 0.25 + 0.94 * p83 * 0.2 + power_mean * 0.55;

    // Historical rescale; net identity.
    sr / 8.0 * 8.0
}
