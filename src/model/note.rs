/// A single keyed hit or hold event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// Column index in `0..key_count`.
    pub column: u32,
    /// Hit time in milliseconds.
    pub start_time: i32,
    /// Release time in milliseconds, or [`Note::END_TIME_NONE`] for a plain
    /// note.
    pub end_time: i32,
}

impl Note {
    /// Sentinel `end_time` marking a note without a hold body.
    pub const END_TIME_NONE: i32 = -1;

    /// A plain note without a hold body.
    pub const fn new(column: u32, start_time: i32) -> Self {
        Self {
            column,
            start_time,
            end_time: Self::END_TIME_NONE,
        }
    }

    /// A hold note released at `end_time`.
    pub const fn hold(column: u32, start_time: i32, end_time: i32) -> Self {
        Self {
            column,
            start_time,
            end_time,
        }
    }

    /// Whether the note has a hold body.
    pub const fn is_long(&self) -> bool {
        self.end_time > self.start_time
    }
}

/// The canonical per-computation views over a chart's notes.
///
/// Built once per star rating computation and never mutated afterwards. The
/// caller is responsible for keeping columns inside `0..key_count`.
pub(crate) struct NoteModel {
    /// All notes ordered by `(start_time, column)`.
    pub notes: Box<[Note]>,
    /// Per-column subsequences of `notes`, order-preserving.
    pub columns: Box<[Box<[Note]>]>,
    /// Hold notes ordered by release time.
    pub tails: Box<[Note]>,
    /// Timeline length: largest start or release time plus one.
    pub len_ms: usize,
    pub key_count: usize,
}

impl NoteModel {
    /// Returns `None` for an empty chart, which short-circuits the whole
    /// computation to a rating of zero.
    pub fn new(notes: &[Note], key_count: usize) -> Option<Self> {
        if notes.is_empty() {
            return None;
        }

        let mut sorted = notes.to_vec();
        sorted.sort_by_key(|note| (note.start_time, note.column));

        let mut columns = vec![Vec::new(); key_count];

        for &note in &sorted {
            debug_assert!((note.column as usize) < key_count);
            columns[(note.column as usize).min(key_count - 1)].push(note);
        }

        let mut tails: Vec<_> = sorted.iter().copied().filter(Note::is_long).collect();
        tails.sort_by_key(|note| note.end_time);

        let len_ms = sorted
            .iter()
            .map(|note| note.start_time.max(note.end_time))
            .max()
            .unwrap_or(0)
            .max(0) as usize
            + 1;

        Some(Self {
            notes: sorted.into_boxed_slice(),
            columns: columns
                .into_iter()
                .map(Vec::into_boxed_slice)
                .collect(),
            tails: tails.into_boxed_slice(),
            len_ms,
            key_count,
        })
    }

    /// Hold note count, used for the final note-count normalization.
    pub fn hold_count(&self) -> usize {
        self.tails.len()
    }
}
