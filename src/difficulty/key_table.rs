//! Fixed per-key-count interaction weights.
//!
//! Row `K` holds one empirically tuned weight per column boundary, so it has
//! `K + 1` entries: one before column 0, one between each adjacent pair, and
//! one after the last column. Center boundaries of even layouts carry a tiny
//! weight since nothing crosses the gap between the two hands there.

const K1: [f64; 2] = [0.075, 0.075];
const K2: [f64; 3] = [0.125, 0.05, 0.125];
const K3: [f64; 4] = [0.125, 0.125, 0.125, 0.125];
const K4: [f64; 5] = [0.175, 0.25, 0.05, 0.25, 0.175];
const K5: [f64; 6] = [0.175, 0.25, 0.175, 0.175, 0.25, 0.175];
const K6: [f64; 7] = [0.225, 0.35, 0.25, 0.05, 0.25, 0.35, 0.225];
const K7: [f64; 8] = [0.225, 0.35, 0.25, 0.225, 0.225, 0.25, 0.35, 0.225];
const K8: [f64; 9] = [0.275, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.275];
const K9: [f64; 10] = [
    0.275, 0.45, 0.35, 0.25, 0.275, 0.275, 0.25, 0.35, 0.45, 0.275,
];
const K10: [f64; 11] = [
    0.325, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.325,
];
const K12: [f64; 13] = [
    0.375, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.65, 0.375,
];
const K14: [f64; 15] = [
    0.425, 0.75, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75, 0.425,
];
const K16: [f64; 17] = [
    0.475, 0.85, 0.75, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75,
    0.85, 0.475,
];
const K18: [f64; 19] = [
    0.525, 0.95, 0.85, 0.75, 0.65, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.65,
    0.75, 0.85, 0.95, 0.525,
];

/// The boundary weight row for `key_count`, or `None` when the key count is
/// outside the supported set (1-10 and even 12-18).
pub(crate) fn boundary_weights(key_count: usize) -> Option<&'static [f64]> {
    let row: &'static [f64] = match key_count {
        1 => &K1,
        2 => &K2,
        3 => &K3,
        4 => &K4,
        5 => &K5,
        6 => &K6,
        7 => &K7,
        8 => &K8,
        9 => &K9,
        10 => &K10,
        12 => &K12,
        14 => &K14,
        16 => &K16,
        18 => &K18,
        _ => return None,
    };

    Some(row)
}

/// Whether the engine can rate charts with this key count.
pub fn is_key_count_supported(key_count: usize) -> bool {
    boundary_weights(key_count).is_some()
}
