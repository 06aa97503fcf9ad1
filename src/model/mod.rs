mod chart;
mod note;

pub use chart::{Chart, ChartError};
pub use note::Note;

pub(crate) use note::NoteModel;
