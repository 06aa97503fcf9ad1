//! Star rating calculation for vertical-scrolling key-mode rhythm game
//! charts.
//!
//! The engine turns a list of note triples (column, hit time, optional
//! release time) into a single difficulty scalar. Internally it builds five
//! per-millisecond stress curves - same-column repetition, adjacent-column
//! cross pressure, global pattern pressure, a stability penalty for
//! desynchronized simultaneous columns, and hold-release stress - and
//! reduces them through a weighted-percentile aggregation.
//!
//! ## Usage
//!
//! ```
//! use mania_sr::{compute_star_rating, Note};
//!
//! let notes = vec![
//!     Note::new(0, 1000),
//!     Note::new(1, 1500),
//!     Note::new(2, 2000),
//!     Note::new(3, 2500),
//! ];
//!
//! let rating = compute_star_rating(&notes, 4, 5.0);
//! assert!(rating.value >= 0.0);
//! ```
//!
//! Unsupported key counts (anything outside 1-10 and the even counts 12-18)
//! yield `-1.0` rather than an error; empty charts yield `0.0`. The typed
//! [`try_compute_star_rating`] variant reports those cases as
//! [`RatingError`] values and supports cooperative cancellation through a
//! [`CancelToken`].
//!
//! `.osu` files parsed with `rosu-map` can be fed in through
//! [`Chart::from_beatmap`].
//!
//! ## Features
//!
//! - `capi`: C ABI entry points for use as a dynamic or static library.

mod difficulty;
mod model;
mod util;

#[cfg(feature = "capi")]
pub mod capi;

pub use self::{
    difficulty::{
        compute_star_rating, is_key_count_supported, try_compute_star_rating, CancelToken,
        RatingError, StageTimings, StarRating,
    },
    model::{Chart, ChartError, Note},
};
