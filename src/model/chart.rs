use rosu_map::{
    section::{general::GameMode, hit_objects::HitObjectKind},
    Beatmap,
};
use thiserror::Error;

use crate::{
    difficulty::{compute_star_rating, is_key_count_supported, StarRating},
    model::Note,
};

/// Failed to derive note triples from a beatmap.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ChartError {
    #[error("expected a mania beatmap, got {0:?}")]
    WrongMode(GameMode),
    #[error("key count {0} is not supported")]
    UnsupportedKeyCount(u32),
}

/// Raw input for one star rating computation, decoupled from any file
/// format.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub notes: Vec<Note>,
    pub key_count: u32,
    pub overall_difficulty: f32,
}

impl Chart {
    /// Converts a parsed mania beatmap into note triples.
    ///
    /// The column is derived from the object's x position the same way the
    /// game does it: `floor(x * K / 512)`, clamped into `0..K`.
    pub fn from_beatmap(map: &Beatmap) -> Result<Self, ChartError> {
        if map.mode != GameMode::Mania {
            return Err(ChartError::WrongMode(map.mode));
        }

        let key_count = map.circle_size.round_ties_even().max(1.0) as u32;

        if !is_key_count_supported(key_count as usize) {
            return Err(ChartError::UnsupportedKeyCount(key_count));
        }

        let notes = map
            .hit_objects
            .iter()
            .map(|h| {
                let (x, duration) = match &h.kind {
                    HitObjectKind::Circle(c) => (c.pos.x, None),
                    HitObjectKind::Slider(s) => (s.pos.x, None),
                    HitObjectKind::Spinner(s) => (s.pos.x, None),
                    HitObjectKind::Hold(hold) => (hold.pos_x, Some(hold.duration)),
                };

                let column = column_from_x(x, key_count);
                let start_time = h.start_time.round() as i32;

                match duration {
                    Some(duration) if duration > 0.0 => {
                        Note::hold(column, start_time, (h.start_time + duration).round() as i32)
                    }
                    _ => Note::new(column, start_time),
                }
            })
            .collect();

        Ok(Self {
            notes,
            key_count,
            overall_difficulty: map.overall_difficulty,
        })
    }

    /// Runs the full pipeline on this chart.
    pub fn star_rating(&self) -> StarRating {
        compute_star_rating(&self.notes, self.key_count as usize, self.overall_difficulty)
    }
}

fn column_from_x(x: f32, key_count: u32) -> u32 {
    let divisor = 512.0 / key_count as f32;

    ((x / divisor).floor().max(0.0) as u32).min(key_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_mapping_spans_playfield() {
        assert_eq!(column_from_x(0.0, 4), 0);
        assert_eq!(column_from_x(64.0, 4), 0);
        assert_eq!(column_from_x(128.0, 4), 1);
        assert_eq!(column_from_x(448.0, 4), 3);
        // Out-of-range positions clamp instead of indexing out of bounds.
        assert_eq!(column_from_x(512.0, 4), 3);
        assert_eq!(column_from_x(-5.0, 4), 0);
    }
}
