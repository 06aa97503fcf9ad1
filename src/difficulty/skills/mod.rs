//! The five per-millisecond stress curves feeding the final aggregation.

pub(crate) mod anchor;
pub(crate) mod cross;
pub(crate) mod jack;
pub(crate) mod pattern;
pub(crate) mod release;

use crate::model::NoteModel;

/// Radius of the "a note is nearby" window used for the active-column set
/// and the local note density.
pub(crate) const ACTIVE_RADIUS: usize = 500;

/// Per-column activity flags over the timeline.
///
/// A column counts as active at `t` when one of its notes starts within the
/// half-open window `[t - 500, t + 500)`. Shared by the anchor bar and the
/// aggregation step so both agree on what "active" means.
pub(crate) struct ActiveColumns {
    flags: Box<[Box<[bool]>]>,
}

impl ActiveColumns {
    pub fn new(model: &NoteModel) -> Self {
        let flags = model
            .columns
            .iter()
            .map(|notes| {
                let mut column = vec![false; model.len_ms];

                for note in notes.iter() {
                    let start = note.start_time as usize;
                    let left = start.saturating_sub(ACTIVE_RADIUS);
                    let right = (start + ACTIVE_RADIUS).min(model.len_ms);
                    column[left..right].fill(true);
                }

                column.into_boxed_slice()
            })
            .collect();

        Self { flags }
    }

    pub fn is_active(&self, column: usize, t: usize) -> bool {
        self.flags[column][t]
    }

    /// Number of active columns at `t`, floored to one so it can be used as
    /// a divisor.
    pub fn count_at(&self, t: usize) -> usize {
        self.flags
            .iter()
            .filter(|column| column[t])
            .count()
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Note;

    #[test]
    fn activity_window_is_centered_on_the_note() {
        let notes = [Note::new(0, 1000), Note::new(1, 1000)];
        let model = NoteModel::new(&notes, 3).unwrap();
        let active = ActiveColumns::new(&model);

        assert!(active.is_active(0, 1000));
        assert!(active.is_active(0, 500));
        assert!(!active.is_active(0, 499));
        assert!(!active.is_active(2, 1000));

        assert_eq!(active.count_at(1000), 2);
        // Empty neighborhoods still report one to keep divisors sane.
        assert_eq!(active.count_at(0), 1);
    }
}
